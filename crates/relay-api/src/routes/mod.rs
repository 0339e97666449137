//! API 라우트.

pub mod market;
pub mod trade;

use std::sync::Arc;

use axum::Router;

use crate::state::AppState;

/// `/api` 하위 전체 라우터 생성.
pub fn create_api_router() -> Router<Arc<AppState>> {
    Router::new().nest(
        "/api",
        Router::new()
            .merge(trade::trade_router())
            .merge(market::market_router()),
    )
}
