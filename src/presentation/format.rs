// SPDX-License-Identifier: MPL-2.0
//! Duration formatting for the controller's time labels.

/// Formats a millisecond duration as `MM:SS`, or `H:MM:SS` from one hour up.
///
/// Negative durations are formatted by absolute value. Sub-second remainders
/// are truncated.
#[must_use]
pub fn format_duration(millis: i64) -> String {
    let total_secs = millis.unsigned_abs() / 1000;
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let secs = total_secs % 60;

    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, secs)
    } else {
        format!("{:02}:{:02}", minutes, secs)
    }
}
