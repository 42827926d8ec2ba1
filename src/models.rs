use serde::{Deserialize, Serialize};

pub const HEALTH_MESSAGE: &str = "LoA Backend is running";
pub const DUPLICATE_MESSAGE: &str = "Prevented double count";

/// An item acquisition pulled out of OCR text, e.g. `오래된 유물 x15`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedEvent {
    pub item_name: String,
    pub quantity: u32,
}

impl ParsedEvent {
    /// `<name> x<quantity>`, the form echoed back to the client.
    pub fn label(&self) -> String {
        format!("{} x{}", self.item_name, self.quantity)
    }
}

// Request/Response DTOs
#[derive(Debug, Deserialize)]
pub struct CollectRequest {
    pub raw_text: String,
    // Client capture time. Dedup timing uses server arrival time instead.
    pub timestamp: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum CollectResponse {
    Ignored { reason: String },
    Duplicate { message: String },
    Success { received: String, time: String },
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
}
