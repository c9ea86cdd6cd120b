use axum::{
    extract::{rejection::JsonRejection, State},
    Extension, Json,
};
use efarmer_core::Language;
use serde::{Deserialize, Serialize};

use crate::middleware::RequestId;

use super::{json_body, ApiError, ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Deserialize)]
pub(super) struct AdviceRequest {
    pub question: String,
    pub language: Option<String>,
}

#[derive(Debug, Serialize)]
pub(super) struct AdviceData {
    pub reply: String,
    pub language: Language,
    pub standby: bool,
}

/// Forward one question to the advisor.
///
/// Only input validation can fail here; every advisor outcome is a 200 with
/// a displayable reply.
pub(super) async fn request_advice(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    payload: Result<Json<AdviceRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<AdviceData>>, ApiError> {
    let body = json_body(&req_id, payload)?;
    let question = body.question.trim();
    if question.is_empty() {
        return Err(ApiError::new(
            req_id.0,
            "validation_error",
            "question must not be empty",
        ));
    }

    let language = match body.language.as_deref() {
        None => Language::default(),
        Some(code) => code
            .parse::<Language>()
            .map_err(|e| ApiError::new(req_id.0.clone(), "validation_error", e.to_string()))?,
    };

    let reply = state.advisor.get_advice(question, language.code()).await;

    Ok(Json(ApiResponse {
        data: AdviceData {
            reply,
            language,
            standby: state.advisor.is_standby(),
        },
        meta: ResponseMeta::new(req_id.0),
    }))
}
