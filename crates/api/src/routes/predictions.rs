//! Prediction Routes

use axum::{extract::State, Json};
use feature_engine::RawRecord;
use inference_engine::InferenceError;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info_span, warn};

use crate::error::{status_for, ApiError, ErrorBody};
use crate::AppState;

/// Counter of predictions by outcome
pub const PREDICTIONS_TOTAL: &str = "listing_predictions_total";
/// Per-record prediction latency
pub const PREDICTION_LATENCY: &str = "listing_prediction_latency_seconds";

/// Body of the batch endpoint
#[derive(Debug, Deserialize)]
pub struct BatchRequest {
    pub objects: Vec<RawRecord>,
}

/// Per-record batch result
#[derive(Debug, Serialize, Deserialize)]
pub struct BatchItem {
    /// HTTP-style status of this record
    pub status: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prediction: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorBody>,
}

impl From<Result<f64, InferenceError>> for BatchItem {
    fn from(result: Result<f64, InferenceError>) -> Self {
        match result {
            Ok(price) => Self {
                status: 200,
                prediction: Some(price),
                error: None,
            },
            Err(err) => Self {
                status: status_for(&err).as_u16(),
                prediction: None,
                error: Some(ErrorBody::from_inference(&err)),
            },
        }
    }
}

fn outcome(result: &Result<f64, InferenceError>) -> &'static str {
    match result {
        Ok(_) => "ok",
        Err(InferenceError::Features(err)) => err.kind().as_str(),
        Err(_) => "internal",
    }
}

/// Predict one record, recording latency and outcome
fn observe(state: &AppState, record: &RawRecord) -> Result<f64, InferenceError> {
    let start = Instant::now();
    let result = state.predictor.predict(record);

    metrics::histogram!(PREDICTION_LATENCY).record(start.elapsed().as_secs_f64());
    metrics::counter!(PREDICTIONS_TOTAL, "outcome" => outcome(&result)).increment(1);
    result
}

/// Price a single listing
pub async fn predict_item(
    State(state): State<Arc<AppState>>,
    Json(record): Json<RawRecord>,
) -> Result<Json<f64>, ApiError> {
    let request_id = uuid::Uuid::new_v4();
    let span = info_span!("predict_item", %request_id);

    span.in_scope(|| match observe(&state, &record) {
        Ok(price) => {
            debug!("Predicted {:.2} for {:?}", price, record.name);
            Ok(Json(price))
        }
        Err(err) => {
            warn!("Rejected listing {:?}: {}", record.name, err);
            Err(err.into())
        }
    })
}

/// Price a batch of listings; one rejected record does not affect the others
pub async fn predict_items(
    State(state): State<Arc<AppState>>,
    Json(batch): Json<BatchRequest>,
) -> Result<Json<Vec<BatchItem>>, ApiError> {
    let max = state.config.max_batch_size;
    if batch.objects.len() > max {
        warn!("Batch of {} exceeds limit {}", batch.objects.len(), max);
        return Err(ApiError::batch_too_large(batch.objects.len(), max));
    }

    let request_id = uuid::Uuid::new_v4();
    let span = info_span!("predict_items", %request_id, size = batch.objects.len());

    let items: Vec<BatchItem> = span.in_scope(|| {
        let items: Vec<BatchItem> = batch
            .objects
            .iter()
            .map(|record| BatchItem::from(observe(&state, record)))
            .collect();

        let rejected = items.iter().filter(|item| item.error.is_some()).count();
        if rejected > 0 {
            warn!("{} of {} listings rejected", rejected, items.len());
        }
        items
    });
    Ok(Json(items))
}
