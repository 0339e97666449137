//! API 에러 응답.
//!
//! 모든 실패는 `{status: "error", message}` 형태로 변환됩니다.
//! 재시도는 하지 않으며, 한 요청의 실패가 다른 요청 처리에 영향을 주지 않습니다.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use relay_core::RelayError;
use serde::{Deserialize, Serialize};

/// 에러 응답 본문.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// 항상 "error"
    pub status: String,
    /// 사용자에게 보여줄 메시지
    pub message: String,
}

/// 핸들러 에러.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }
}

impl From<RelayError> for ApiError {
    fn from(err: RelayError) -> Self {
        let status = match &err {
            RelayError::Validation(_) | RelayError::Quote(_) => StatusCode::BAD_REQUEST,
            RelayError::Remote { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self::new(status, err.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::new(rejection.status(), rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ApiErrorResponse {
            status: "error".to_string(),
            message: self.message,
        };
        (self.status, Json(body)).into_response()
    }
}
