// SPDX-License-Identifier: MPL-2.0
use player_view::application::event::{EventSink, SinkId, SurfaceHolder, SurfaceId};
use player_view::application::port::{
    Player, PosterDisplay, RenderSurface, SurfaceBackground, SurfaceHost, VideoSizeListener,
    VideoStateListener,
};
use player_view::config::{self, ViewConfig};
use player_view::domain::video::{
    PlaybackState, RenderKind, SampleAspectRatio, ScaleMode, StateMask, VideoSize,
};
use player_view::presentation::{compute_for, AutoHideController, MeasureHelper, Placement};
use player_view::{format_duration, Collaborators, Error, Result, VideoView};
use std::cell::{Cell, RefCell};
use std::path::PathBuf;
use std::process::ExitCode;
use std::rc::Rc;
use std::time::{Duration, Instant};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const USAGE: &str = "\
Usage:
  player_view geometry --content WxH [--sar N:D] --container WxH [--mode MODE]
  player_view simulate [--config PATH] [--snapshot PATH]

Modes: fit, fill, wrap, match, 16_9, 4_3";

/// Container the simulated surface is laid out in.
const SIMULATED_CONTAINER: (i32, i32) = (1280, 720);

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut args = pico_args::Arguments::from_env();
    if args.contains(["-h", "--help"]) {
        println!("{USAGE}");
        return ExitCode::SUCCESS;
    }

    let result = match args.subcommand() {
        Ok(Some(command)) if command == "geometry" => run_geometry(args),
        Ok(Some(command)) if command == "simulate" => run_simulate(args).await,
        Ok(other) => Err(Error::InvalidArgument(format!(
            "unknown command {:?}\n\n{USAGE}",
            other.unwrap_or_default()
        ))),
        Err(err) => Err(err.into()),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}

// ==========================================================================
// geometry
// ==========================================================================

fn run_geometry(mut args: pico_args::Arguments) -> Result<()> {
    let content: VideoSize = args.value_from_str("--content")?;
    let sar: Option<SampleAspectRatio> = args.opt_value_from_str("--sar")?;
    let container: VideoSize = args.value_from_str("--container")?;
    let mode: ScaleMode = args.opt_value_from_str("--mode")?.unwrap_or_default();
    reject_leftovers(args)?;

    let video = VideoSize::with_sar(content.width, content.height, sar.unwrap_or_default());
    let (cw, ch) = (to_i32(container.width), to_i32(container.height));
    let (width, height) = compute_for(video, cw, ch, mode);
    let placement = Placement::centered(cw, ch, width, height);

    println!("{width}x{height}");
    println!(
        "offset {},{}  pillarbox {}  letterbox {}",
        placement.x,
        placement.y,
        placement.pillarbox(),
        placement.letterbox()
    );
    Ok(())
}

fn to_i32(value: u32) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}

fn reject_leftovers(args: pico_args::Arguments) -> Result<()> {
    let rest = args.finish();
    if rest.is_empty() {
        Ok(())
    } else {
        Err(Error::InvalidArgument(format!("unexpected arguments {rest:?}")))
    }
}

// ==========================================================================
// simulate
// ==========================================================================

async fn run_simulate(mut args: pico_args::Arguments) -> Result<()> {
    let config_path: Option<PathBuf> = args.opt_value_from_str("--config")?;
    let snapshot_path: Option<PathBuf> = args.opt_value_from_str("--snapshot")?;
    reject_leftovers(args)?;

    let config = match config_path {
        Some(path) => config::load_from_path(&path)?,
        None => config::load()?,
    };
    let view_config = ViewConfig {
        use_controller: true,
        ..config
    };

    let mut view = VideoView::new(
        view_config,
        Collaborators::new(Box::new(LoggingHost))
            .with_poster(Box::new(LoggingPoster))
            .with_controller(Box::new(AutoHideController::default())),
    );
    let logger = Rc::new(LoggingListener);
    view.add_state_listener(logger.clone());
    view.add_size_listener(logger);

    let player = Rc::new(ScriptedPlayer::default());
    let start = Instant::now();
    view.set_player(Some(Rc::clone(&player) as Rc<dyn Player>), start);

    for step in SCRIPT {
        let due = start + step.at;
        drive_until(&mut view, due).await;
        step.action.apply(&player);
        tracing::info!(at = %format_duration(elapsed_millis(start)), action = ?step.action, "script step");
    }
    drive_until(&mut view, start + Duration::from_millis(7_000)).await;

    if let Some(path) = snapshot_path {
        match view.capture_snapshot() {
            Some(image) => {
                image.save(&path)?;
                tracing::info!(path = %path.display(), "snapshot saved");
            }
            None => tracing::warn!("surface produced no snapshot"),
        }
    }

    view.teardown();
    Ok(())
}

/// Runs the view's event loop until `until`, waking for its own deadlines.
async fn drive_until(view: &mut VideoView, until: Instant) {
    loop {
        let wake = view
            .next_deadline()
            .filter(|deadline| *deadline < until)
            .unwrap_or(until);
        tokio::time::sleep_until(wake.into()).await;

        let now = Instant::now();
        view.pump(now);
        view.tick(now);
        if now >= until {
            return;
        }
    }
}

fn elapsed_millis(start: Instant) -> i64 {
    i64::try_from(start.elapsed().as_millis()).unwrap_or(i64::MAX)
}

#[derive(Debug, Clone, Copy)]
enum Action {
    State(PlaybackState),
    Size(VideoSize),
}

impl Action {
    fn apply(self, player: &ScriptedPlayer) {
        match self {
            Action::State(state) => player.transition(state),
            Action::Size(size) => player.report_size(size),
        }
    }
}

struct Step {
    at: Duration,
    action: Action,
}

const fn step(millis: u64, action: Action) -> Step {
    Step {
        at: Duration::from_millis(millis),
        action,
    }
}

const SCRIPT: &[Step] = &[
    step(100, Action::State(PlaybackState::Preparing)),
    step(400, Action::Size(VideoSize::with_sar(720, 576, SampleAspectRatio::new(64, 45)))),
    step(500, Action::State(PlaybackState::Prepared)),
    step(600, Action::State(PlaybackState::Playing)),
    step(1_400, Action::State(PlaybackState::Pausing)),
    step(1_700, Action::State(PlaybackState::Playing)),
    step(5_500, Action::State(PlaybackState::Completed)),
];

// ==========================================================================
// Logging collaborators
// ==========================================================================

/// Player that reports scripted transitions to its registered sinks.
#[derive(Default)]
struct ScriptedPlayer {
    state: Cell<PlaybackState>,
    target: Cell<Option<SurfaceHolder>>,
    state_sinks: RefCell<Vec<EventSink>>,
    size_sinks: RefCell<Vec<EventSink>>,
}

impl ScriptedPlayer {
    fn transition(&self, new: PlaybackState) {
        let old = self.state.replace(new);
        for sink in self.state_sinks.borrow().iter() {
            sink.state_changed(old, new);
        }
    }

    fn report_size(&self, size: VideoSize) {
        for sink in self.size_sinks.borrow().iter() {
            sink.video_size_changed(size);
        }
    }
}

impl Player for ScriptedPlayer {
    fn set_display_target(&self, target: Option<SurfaceHolder>) {
        tracing::info!(?target, "player display target");
        self.target.set(target);
    }

    fn add_state_listener(&self, sink: EventSink) {
        self.state_sinks.borrow_mut().push(sink);
    }

    fn remove_state_listener(&self, sink: SinkId) {
        self.state_sinks.borrow_mut().retain(|s| s.id() != sink);
    }

    fn add_size_listener(&self, sink: EventSink) {
        self.size_sinks.borrow_mut().push(sink);
    }

    fn remove_size_listener(&self, sink: SinkId) {
        self.size_sinks.borrow_mut().retain(|s| s.id() != sink);
    }

    fn is_in_state(&self, mask: StateMask) -> bool {
        mask.contains(self.state.get())
    }
}

/// Surface that becomes drawable as soon as it is observed and logs layout.
struct LoggingSurface {
    id: SurfaceId,
    kind: RenderKind,
    sinks: Vec<EventSink>,
    measure: MeasureHelper,
    background: SurfaceBackground,
}

impl LoggingSurface {
    fn new(kind: RenderKind) -> Self {
        Self {
            id: SurfaceId::next(),
            kind,
            sinks: Vec::new(),
            measure: MeasureHelper::default(),
            background: SurfaceBackground::Opaque,
        }
    }

    fn holder(&self) -> SurfaceHolder {
        SurfaceHolder::new(self.id, self.id.value())
    }

    fn relayout(&mut self) {
        let (cw, ch) = SIMULATED_CONTAINER;
        let (width, height) = self.measure.measure(cw, ch);
        let placement = Placement::centered(cw, ch, width, height);
        tracing::info!(
            surface = self.id.value(),
            video = %self.measure.video(),
            mode = %self.measure.scale_mode(),
            width,
            height,
            x = placement.x,
            y = placement.y,
            "surface layout"
        );
    }
}

impl RenderSurface for LoggingSurface {
    fn id(&self) -> SurfaceId {
        self.id
    }

    fn kind(&self) -> RenderKind {
        self.kind
    }

    fn add_lifecycle_callback(&mut self, sink: EventSink) {
        let (cw, ch) = SIMULATED_CONTAINER;
        sink.surface_created(self.holder(), cw.unsigned_abs(), ch.unsigned_abs());
        self.sinks.push(sink);
    }

    fn remove_lifecycle_callback(&mut self, sink: SinkId) {
        self.sinks.retain(|s| s.id() != sink);
    }

    fn set_scale_mode(&mut self, mode: ScaleMode) {
        if self.measure.set_scale_mode(mode) {
            self.relayout();
        }
    }

    fn set_content_size(&mut self, width: u32, height: u32) {
        if self.measure.set_video_size(width, height) {
            self.relayout();
        }
    }

    fn set_sample_aspect_ratio(&mut self, sar: SampleAspectRatio) {
        if self.measure.set_sample_aspect_ratio(sar) {
            self.relayout();
        }
    }

    fn set_background(&mut self, background: SurfaceBackground) {
        tracing::info!(surface = self.id.value(), ?background, "surface background");
        self.background = background;
    }

    fn capture_snapshot(&self) -> Option<image_rs::RgbaImage> {
        let (width, height) = self.measure.measured()?;
        let width = u32::try_from(width).ok()?;
        let height = u32::try_from(height).ok()?;
        let shade = match self.background {
            SurfaceBackground::Opaque => 0,
            SurfaceBackground::Transparent => 96,
        };
        Some(image_rs::RgbaImage::from_fn(width, height, |x, y| {
            let r = u8::try_from(x * 255 / width.max(1)).unwrap_or(u8::MAX);
            let g = u8::try_from(y * 255 / height.max(1)).unwrap_or(u8::MAX);
            image_rs::Rgba([r, g, shade, 255])
        }))
    }
}

impl Drop for LoggingSurface {
    fn drop(&mut self) {
        for sink in &self.sinks {
            sink.surface_destroyed(self.holder());
        }
    }
}

struct LoggingHost;

impl SurfaceHost for LoggingHost {
    fn create_surface(&mut self, kind: RenderKind) -> Option<Box<dyn RenderSurface>> {
        match kind {
            RenderKind::None => None,
            kind => Some(Box::new(LoggingSurface::new(kind))),
        }
    }

    fn insert_view(&mut self, surface: SurfaceId) {
        tracing::info!(surface = surface.value(), "view inserted");
    }

    fn remove_view(&mut self, surface: SurfaceId) {
        tracing::info!(surface = surface.value(), "view removed");
    }
}

struct LoggingPoster;

impl PosterDisplay for LoggingPoster {
    fn fade_in(&mut self, duration_ms: u32) {
        tracing::info!(duration_ms, "poster fade in");
    }

    fn fade_out(&mut self, duration_ms: u32) {
        tracing::info!(duration_ms, "poster fade out");
    }
}

struct LoggingListener;

impl VideoStateListener for LoggingListener {
    fn on_state_changed(&self, old: PlaybackState, new: PlaybackState) {
        tracing::info!(%old, %new, "listener: state");
    }
}

impl VideoSizeListener for LoggingListener {
    fn on_video_size_changed(&self, size: VideoSize) {
        tracing::info!(%size, "listener: size");
    }
}
