use std::fmt;
use std::mem;

/// Identifies one subscription on a [`Binding`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WatchId(u64);

type Watcher<T> = Box<dyn FnMut(&T, &T)>;

/// Reactive property shared with the host.
///
/// Every change is pushed to subscribers as `(new, old)`. The owning widget
/// reacts to the returned old value; external watchers are notified in
/// subscription order.
pub struct Binding<T> {
    value: T,
    watchers: Vec<(WatchId, Watcher<T>)>,
    next_watch_id: u64,
}

impl<T: fmt::Debug> fmt::Debug for Binding<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Binding")
            .field("value", &self.value)
            .field("watchers", &self.watchers.len())
            .finish()
    }
}

impl<T> Binding<T> {
    #[must_use]
    pub fn new(value: T) -> Self {
        Self {
            value,
            watchers: Vec::new(),
            next_watch_id: 0,
        }
    }

    #[must_use]
    pub fn get(&self) -> &T {
        &self.value
    }

    /// Stores `value` unconditionally and notifies watchers.
    ///
    /// Used for wholesale-replaced inputs where every assignment counts as a
    /// change. Returns the previous value.
    pub fn replace(&mut self, value: T) -> T {
        let old = mem::replace(&mut self.value, value);
        self.notify(&old);
        old
    }

    pub fn watch(&mut self, watcher: impl FnMut(&T, &T) + 'static) -> WatchId {
        let id = WatchId(self.next_watch_id);
        self.next_watch_id += 1;
        self.watchers.push((id, Box::new(watcher)));
        id
    }

    /// Drops a subscription. Returns `true` when it existed.
    pub fn unwatch(&mut self, id: WatchId) -> bool {
        let before = self.watchers.len();
        self.watchers.retain(|(watch_id, _)| *watch_id != id);
        before != self.watchers.len()
    }

    fn notify(&mut self, old: &T) {
        for (_, watcher) in &mut self.watchers {
            watcher(&self.value, old);
        }
    }
}

impl<T: PartialEq> Binding<T> {
    /// Stores `value` and notifies watchers only if it differs.
    ///
    /// Returns the previous value when a change happened.
    pub fn set(&mut self, value: T) -> Option<T> {
        if self.value == value {
            return None;
        }
        Some(self.replace(value))
    }
}
