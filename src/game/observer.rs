//! Observer registry.
//!
//! A session owns an explicit list of callback handles, invoked
//! synchronously in registration order after every externally visible
//! mutation. Callbacks are no-argument closures: they re-query the game
//! through its read API and therefore cannot mutate it from inside a
//! notification.

/// Handle returned by `add_observer`, used to unregister.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

/// The registered observer callbacks of one session.
#[derive(Default)]
pub struct Observers {
    entries: Vec<(ObserverId, Box<dyn FnMut()>)>,
    next_id: u64,
}

impl Observers {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a callback, returning its handle.
    pub fn add(&mut self, callback: Box<dyn FnMut()>) -> ObserverId {
        let id = ObserverId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, callback));
        id
    }

    /// Unregister a callback. Unknown handles are ignored.
    pub fn remove(&mut self, id: ObserverId) {
        self.entries.retain(|(entry_id, _)| *entry_id != id);
    }

    /// Invoke every callback, in registration order.
    pub fn notify_all(&mut self) {
        for (_, callback) in &mut self.entries {
            callback();
        }
    }

    /// Number of registered observers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check whether no observer is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl std::fmt::Debug for Observers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Observers")
            .field("count", &self.entries.len())
            .finish()
    }
}
