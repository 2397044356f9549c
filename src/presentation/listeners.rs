// SPDX-License-Identifier: MPL-2.0
//! Listener fan-out with copy-on-write registration.
//!
//! A [`ListenerSet`] is a cheap, cloneable handle. Dispatch iterates a
//! point-in-time snapshot, so a listener may add or remove listeners (itself
//! included) while it is being called; the change applies to the next pass.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Set of distinct listeners, compared by pointer identity.
pub struct ListenerSet<T: ?Sized> {
    inner: Rc<RefCell<Rc<Vec<Rc<T>>>>>,
}

impl<T: ?Sized> ListenerSet<T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(Rc::new(Vec::new()))),
        }
    }

    /// Registers a listener. Returns false if it was already present.
    pub fn add(&self, listener: Rc<T>) -> bool {
        let mut current = self.inner.borrow_mut();
        if current.iter().any(|l| Rc::ptr_eq(l, &listener)) {
            return false;
        }
        // Clones the vector only while a dispatch snapshot is alive.
        Rc::make_mut(&mut current).push(listener);
        true
    }

    /// Unregisters a listener. Returns false if it was not present.
    pub fn remove(&self, listener: &Rc<T>) -> bool {
        let mut current = self.inner.borrow_mut();
        let Some(index) = current.iter().position(|l| Rc::ptr_eq(l, listener)) else {
            return false;
        };
        Rc::make_mut(&mut current).remove(index);
        true
    }

    #[must_use]
    pub fn contains(&self, listener: &Rc<T>) -> bool {
        self.inner.borrow().iter().any(|l| Rc::ptr_eq(l, listener))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        *self.inner.borrow_mut() = Rc::new(Vec::new());
    }

    /// The listeners registered right now.
    #[must_use]
    pub fn snapshot(&self) -> Rc<Vec<Rc<T>>> {
        Rc::clone(&self.inner.borrow())
    }

    /// Calls `f` for every listener in the current snapshot.
    pub fn dispatch(&self, mut f: impl FnMut(&T)) {
        let snapshot = self.snapshot();
        for listener in snapshot.iter() {
            f(listener);
        }
    }
}

impl<T: ?Sized> Clone for ListenerSet<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: ?Sized> Default for ListenerSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ?Sized> fmt::Debug for ListenerSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerSet")
            .field("len", &self.len())
            .finish()
    }
}
