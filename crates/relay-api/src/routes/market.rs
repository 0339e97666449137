//! 시세 endpoint.
//!
//! - `GET /api/ticker/{currency}` - 거래소 공개 시세 원본 응답

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use serde_json::Value;
use tracing::warn;

use crate::{error::ApiError, state::AppState};

/// 시세 조회.
///
/// 거래소 응답을 상태 코드 검사 없이 그대로 전달합니다.
pub async fn get_ticker(
    State(state): State<Arc<AppState>>,
    Path(currency): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let payload = state
        .exchange
        .fetch_ticker_payload(&currency)
        .await
        .map_err(|e| {
            warn!(currency = %currency, error = %e, "시세 조회 실패");
            ApiError::from(e)
        })?;

    Ok(Json(payload))
}

/// 시세 라우터 생성.
pub fn market_router() -> Router<Arc<AppState>> {
    Router::new().route("/ticker/{currency}", get(get_ticker))
}
