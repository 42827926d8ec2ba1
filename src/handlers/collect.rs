use std::time::Instant;

use axum::{extract::State, response::Json};

use crate::app_state::AppState;
use crate::models::{CollectRequest, CollectResponse, DUPLICATE_MESSAGE};
use crate::services::ingest_service::{self, IngestOutcome};

pub async fn collect_data(
    State(state): State<AppState>,
    Json(request): Json<CollectRequest>,
) -> Json<CollectResponse> {
    let arrived = Instant::now();
    let wall_clock = chrono::Local::now();

    let response = match ingest_service::ingest(
        &state.suppressor,
        &request.raw_text,
        arrived,
        wall_clock,
    ) {
        IngestOutcome::Ignored { reason } => CollectResponse::Ignored { reason },
        IngestOutcome::Duplicate => CollectResponse::Duplicate {
            message: DUPLICATE_MESSAGE.to_string(),
        },
        IngestOutcome::Accepted(event) => CollectResponse::Success {
            received: event.label(),
            time: wall_clock.to_rfc3339(),
        },
    };

    Json(response)
}
