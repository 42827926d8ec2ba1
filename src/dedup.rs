//! Short-window suppression of repeated OCR captures.
//!
//! The client re-captures the chat window every ~1.5s, so the same
//! acquisition line is usually reported more than once. The suppressor keeps
//! a single slot with the last accepted item name and when it arrived; a
//! report with the same name inside the window is a duplicate.

use std::sync::Mutex;
use std::time::{Duration, Instant};

use tracing::debug;

pub const DEFAULT_DEDUP_WINDOW: Duration = Duration::from_secs(2);

/// The most recently accepted event.
///
/// `observed_at` is `None` until the first accept, which makes the elapsed
/// time effectively unbounded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LastSeen {
    pub item_name: String,
    pub observed_at: Option<Instant>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Accepted,
    Duplicate,
}

pub struct DuplicateSuppressor {
    last_seen: Mutex<LastSeen>,
    window: Duration,
}

impl Default for DuplicateSuppressor {
    fn default() -> Self {
        Self::new(DEFAULT_DEDUP_WINDOW)
    }
}

impl DuplicateSuppressor {
    pub fn new(window: Duration) -> Self {
        Self {
            last_seen: Mutex::new(LastSeen::default()),
            window,
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Classifies `item_name` arriving at `now` and records it if accepted.
    ///
    /// Compare and overwrite happen under one lock so two concurrent reports
    /// of the same item cannot both be accepted.
    pub fn check(&self, item_name: &str, now: Instant) -> Verdict {
        // A poisoned slot still holds a consistent LastSeen.
        let mut last = self.last_seen.lock().unwrap_or_else(|e| e.into_inner());

        let within_window = last
            .observed_at
            .map(|at| now.saturating_duration_since(at) < self.window)
            .unwrap_or(false);

        if within_window && last.item_name == item_name {
            debug!("Suppressed duplicate report for {}", item_name);
            return Verdict::Duplicate;
        }

        last.item_name = item_name.to_string();
        last.observed_at = Some(now);
        Verdict::Accepted
    }

    pub fn last_seen(&self) -> LastSeen {
        self.last_seen
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}
