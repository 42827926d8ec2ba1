use std::time::Instant;

use chrono::{DateTime, Local};
use tracing::{debug, info};

use crate::dedup::{DuplicateSuppressor, Verdict};
use crate::models::ParsedEvent;
use crate::utils::extraction::extract_event;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IngestOutcome {
    Ignored { reason: String },
    Duplicate,
    Accepted(ParsedEvent),
}

/// Runs one OCR report through extraction and duplicate suppression.
///
/// `arrived` drives the dedup window; `wall_clock` is only used for the
/// operator log line.
pub fn ingest(
    suppressor: &DuplicateSuppressor,
    raw_text: &str,
    arrived: Instant,
    wall_clock: DateTime<Local>,
) -> IngestOutcome {
    let event = match extract_event(raw_text) {
        Ok(event) => event,
        Err(e) => {
            debug!("Ignoring report: {}", e);
            return IngestOutcome::Ignored {
                reason: e.to_string(),
            };
        }
    };

    match suppressor.check(&event.item_name, arrived) {
        Verdict::Duplicate => IngestOutcome::Duplicate,
        Verdict::Accepted => {
            info!(
                "[{}] Acquired: {} ({})",
                wall_clock.format("%H:%M:%S"),
                event.item_name,
                event.quantity
            );
            IngestOutcome::Accepted(event)
        }
    }
}
