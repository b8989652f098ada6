//! Coalescing of bursty input into a single delayed commit.

use crate::temporal::EpochMillis;

/// Quiet period after the last keystroke before search text is committed.
pub const SEARCH_DEBOUNCE_MS: EpochMillis = 120;

/// Holds the latest pushed value until its quiet period has elapsed.
/// A newer push supersedes the pending one and restarts the window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Debouncer<T> {
    window_ms: EpochMillis,
    pending: Option<(T, EpochMillis)>,
}

impl<T> Debouncer<T> {
    pub fn new(window_ms: EpochMillis) -> Self {
        Self {
            window_ms,
            pending: None,
        }
    }

    pub fn push(&mut self, value: T, at_ms: EpochMillis) {
        self.pending = Some((value, at_ms + self.window_ms));
    }

    /// Takes the pending value once `now_ms` reaches its deadline.
    pub fn poll(&mut self, now_ms: EpochMillis) -> Option<T> {
        match &self.pending {
            Some((_, deadline)) if now_ms >= *deadline => self.flush(),
            _ => None,
        }
    }

    /// Takes the pending value regardless of the deadline.
    pub fn flush(&mut self) -> Option<T> {
        self.pending.take().map(|(value, _)| value)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

impl<T> Default for Debouncer<T> {
    fn default() -> Self {
        Self::new(SEARCH_DEBOUNCE_MS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn later_push_supersedes_and_restarts_window() {
        let mut debouncer = Debouncer::new(120);
        debouncer.push("f", 1_000);
        debouncer.push("fo", 1_050);
        assert_eq!(debouncer.poll(1_120), None);
        assert_eq!(debouncer.poll(1_170), Some("fo"));
        assert!(!debouncer.is_pending());
    }

    #[test]
    fn flush_ignores_deadline() {
        let mut debouncer = Debouncer::new(120);
        debouncer.push(1, 0);
        assert_eq!(debouncer.flush(), Some(1));
        assert_eq!(debouncer.flush(), None);
    }
}
