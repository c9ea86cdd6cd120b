use axum::{Extension, Json};
use efarmer_core::Language;
use serde::Serialize;

use crate::middleware::RequestId;

use super::{ApiResponse, ResponseMeta};

#[derive(Debug, Serialize)]
pub(super) struct LanguageItem {
    pub code: &'static str,
    pub name: &'static str,
    pub is_default: bool,
}

pub(super) async fn list_languages(
    Extension(req_id): Extension<RequestId>,
) -> Json<ApiResponse<Vec<LanguageItem>>> {
    let data = Language::ALL
        .into_iter()
        .map(|lang| LanguageItem {
            code: lang.code(),
            name: lang.name(),
            is_default: lang == Language::default(),
        })
        .collect();

    Json(ApiResponse {
        data,
        meta: ResponseMeta::new(req_id.0),
    })
}
