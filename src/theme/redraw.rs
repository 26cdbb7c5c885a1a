use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Debounced follow-up redraw scheduling owned by the display surface.
///
/// Components that animate (e.g. [`crate::Menu`] auto-scroll) request one
/// deferred redraw; requesting again before the deadline expires *replaces*
/// the pending deadline instead of stacking timers. The frame scheduler
/// polls [`RedrawScheduler::take_due`] on its tick.
#[derive(Debug, Default)]
pub struct RedrawScheduler {
    deadline: Mutex<Option<Instant>>,
}

impl RedrawScheduler {
    /// Create a scheduler with no pending redraw.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request a redraw after `delay`, replacing any pending request.
    pub fn request(&self, delay: Duration) {
        let mut deadline = self.deadline.lock().unwrap_or_else(|e| e.into_inner());
        *deadline = Some(Instant::now() + delay);
    }

    /// Whether a redraw request is pending.
    pub fn is_pending(&self) -> bool {
        self.deadline
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .is_some()
    }

    /// Cancel any pending request.
    pub fn cancel(&self) {
        let mut deadline = self.deadline.lock().unwrap_or_else(|e| e.into_inner());
        *deadline = None;
    }

    /// Consume the pending request if its deadline has passed. Returns
    /// `true` when the caller should redraw now.
    pub fn take_due(&self) -> bool {
        let mut deadline = self.deadline.lock().unwrap_or_else(|e| e.into_inner());
        match *deadline {
            Some(at) if at <= Instant::now() => {
                *deadline = None;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/theme/redraw.rs"]
mod tests;
