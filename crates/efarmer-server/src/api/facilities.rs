use axum::{
    extract::{rejection::JsonRejection, State},
    Extension, Json,
};
use efarmer_core::Facility;
use efarmer_locator::{locate_nearest, LocateOutcome, PositionError, ReportedPosition};
use serde::Deserialize;

use crate::middleware::RequestId;

use super::{json_body, normalize_limit, ApiError, ApiResponse, AppState, ResponseMeta};

/// The caller's one-shot position read, performed client-side.
///
/// Send coordinates on success, or `position_error` when the device refused
/// or failed. Sending neither is treated as an unavailable position.
///
/// `position_error` is kept loose: a code string such as `"timeout"` or
/// `"PERMISSION_DENIED"`, or the browser's numeric code. Unrecognised codes
/// still count as a failed read.
#[derive(Debug, Deserialize)]
pub(super) struct NearestRequest {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub position_error: Option<serde_json::Value>,
    pub limit: Option<usize>,
}

fn reported_error(value: Option<&serde_json::Value>) -> Option<PositionError> {
    match value? {
        serde_json::Value::String(code) => Some(PositionError::from_code(code)),
        serde_json::Value::Number(code) => Some(PositionError::from_code(&code.to_string())),
        _ => Some(PositionError::Unavailable),
    }
}

pub(super) async fn list_facilities(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Json<ApiResponse<Vec<Facility>>> {
    Json(ApiResponse {
        data: state.registry.facilities().to_vec(),
        meta: ResponseMeta::new(req_id.0),
    })
}

pub(super) async fn nearest_facilities(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    payload: Result<Json<NearestRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<LocateOutcome>>, ApiError> {
    let body = json_body(&req_id, payload)?;
    let limit = normalize_limit(body.limit, state.default_limit);
    let reader = ReportedPosition::from_report(
        body.latitude,
        body.longitude,
        reported_error(body.position_error.as_ref()),
    );

    let outcome = locate_nearest(&state.registry, &reader, limit).await;
    tracing::info!(
        request_id = %req_id.0,
        used_fallback = outcome.used_fallback,
        results = outcome.results.len(),
        "nearest facilities located"
    );

    Ok(Json(ApiResponse {
        data: outcome,
        meta: ResponseMeta::new(req_id.0),
    }))
}
