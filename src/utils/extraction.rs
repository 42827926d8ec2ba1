use std::sync::OnceLock;

use regex::Regex;
use thiserror::Error;

use crate::models::ParsedEvent;

// Hangul syllables and whitespace, then `x`, then the count. The count is
// ASCII digits only; other Unicode decimal digits (e.g. `٣`) do not match.
const ACQUISITION_PATTERN: &str = r"([가-힣\s]+)\s?x\s?([0-9]+)";

static ACQUISITION_RE: OnceLock<Regex> = OnceLock::new();

fn acquisition_re() -> &'static Regex {
    ACQUISITION_RE.get_or_init(|| {
        Regex::new(ACQUISITION_PATTERN).expect("acquisition pattern is a valid regex")
    })
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractError {
    #[error("No pattern matched")]
    NoMatch,
    #[error("Quantity must be positive")]
    ZeroQuantity,
    #[error("Quantity out of range")]
    QuantityOverflow,
}

/// Pulls the first `<name> x<count>` acquisition out of raw OCR text.
///
/// Only the leftmost match counts; anything else in the text is ignored,
/// even if a later fragment would have parsed cleanly.
pub fn extract_event(raw: &str) -> Result<ParsedEvent, ExtractError> {
    let caps = acquisition_re().captures(raw).ok_or(ExtractError::NoMatch)?;

    // May be empty when the match is only whitespace before `x`.
    let item_name = caps[1].trim();

    // The capture is ASCII digits only, so overflow is the only parse failure.
    let quantity: u32 = caps[2]
        .parse()
        .map_err(|_| ExtractError::QuantityOverflow)?;
    if quantity == 0 {
        return Err(ExtractError::ZeroQuantity);
    }

    Ok(ParsedEvent {
        item_name: item_name.to_string(),
        quantity,
    })
}
