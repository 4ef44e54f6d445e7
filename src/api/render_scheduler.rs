use tracing::trace;

/// Handle of one scheduled run of a [`DebouncedTask`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(u64);

#[derive(Debug, Clone, Copy, PartialEq)]
struct PendingRun {
    handle: TimerHandle,
    due_ms: f64,
}

/// Result of [`DebouncedTask::schedule`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scheduled {
    pub handle: TimerHandle,
    pub due_ms: f64,
    /// Run that this schedule superseded, if any.
    pub cancelled: Option<TimerHandle>,
}

/// Cancel-and-reschedule timer driven by the host clock.
///
/// At most one run is pending; scheduling again replaces it, so a burst of
/// triggers inside the delay window collapses into a single run.
#[derive(Debug, Clone, PartialEq)]
pub struct DebouncedTask {
    delay_ms: f64,
    pending: Option<PendingRun>,
    next_handle: u64,
}

impl DebouncedTask {
    #[must_use]
    pub fn new(delay_ms: f64) -> Self {
        Self {
            delay_ms: delay_ms.max(0.0),
            pending: None,
            next_handle: 0,
        }
    }

    #[must_use]
    pub fn delay_ms(&self) -> f64 {
        self.delay_ms
    }

    pub fn schedule(&mut self, now_ms: f64) -> Scheduled {
        let cancelled = self.cancel();
        let handle = TimerHandle(self.next_handle);
        self.next_handle += 1;
        let due_ms = now_ms + self.delay_ms;
        self.pending = Some(PendingRun { handle, due_ms });
        trace!(?handle, due_ms, "debounced run scheduled");
        Scheduled {
            handle,
            due_ms,
            cancelled,
        }
    }

    /// Drops the pending run, returning its handle.
    pub fn cancel(&mut self) -> Option<TimerHandle> {
        self.pending.take().map(|run| run.handle)
    }

    /// Fires the pending run once it is due.
    pub fn poll(&mut self, now_ms: f64) -> Option<TimerHandle> {
        let run = self.pending?;
        if now_ms < run.due_ms {
            return None;
        }
        self.pending = None;
        Some(run.handle)
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    #[must_use]
    pub fn due_ms(&self) -> Option<f64> {
        self.pending.map(|run| run.due_ms)
    }
}
