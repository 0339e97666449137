//! 인증 거래 endpoint.
//!
//! 요청 본문의 `apiKey`, `secretKey`로 서버에서 서명해 거래소에 전달합니다.
//! 자격증명은 이 요청 안에서만 사용하고 저장하지 않습니다.
//!
//! - `POST /api/balance` - 잔고 조회
//! - `POST /api/buy` - 시장가 매수 (`amount`: KRW)
//! - `POST /api/sell` - 시장가 매도 (`units`: 수량)

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    routing::post,
    Json, Router,
};
use relay_core::{Credentials, OrderRequest, RelayError};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;
use tracing::{info, warn};

use crate::{
    error::ApiError, state::AppState, utils::serde_helpers::deserialize_optional_decimal_flexible,
};

// ==================== 요청 타입 ====================

/// 요청 본문의 자격증명 필드.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialFields {
    pub api_key: String,
    pub secret_key: String,
}

impl CredentialFields {
    fn into_credentials(self) -> Credentials {
        Credentials::new(self.api_key, self.secret_key)
    }
}

/// 잔고 조회 요청.
#[derive(Deserialize)]
pub struct BalanceRequest {
    #[serde(flatten)]
    pub credentials: CredentialFields,
}

/// 시장가 매수 요청.
#[derive(Deserialize)]
pub struct BuyRequest {
    #[serde(flatten)]
    pub credentials: CredentialFields,
    /// 지출할 KRW 금액 (숫자 또는 문자열)
    #[serde(default, deserialize_with = "deserialize_optional_decimal_flexible")]
    pub amount: Option<Decimal>,
}

/// 시장가 매도 요청.
#[derive(Deserialize)]
pub struct SellRequest {
    #[serde(flatten)]
    pub credentials: CredentialFields,
    /// 매도 수량 (숫자 또는 문자열)
    #[serde(default, deserialize_with = "deserialize_optional_decimal_flexible")]
    pub units: Option<Decimal>,
}

// ==================== Handler ====================

fn log_failure(operation: &'static str) -> impl Fn(RelayError) -> ApiError {
    move |err| {
        warn!(operation, kind = err.kind(), error = %err, "요청 처리 실패");
        ApiError::from(err)
    }
}

/// 잔고 조회.
///
/// POST /api/balance
pub async fn get_balance(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<BalanceRequest>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Json(request) = payload?;
    let credentials = request.credentials.into_credentials();

    let balance = state
        .exchange
        .get_balance(&credentials)
        .await
        .map_err(log_failure("balance"))?;

    Ok(Json(balance))
}

/// 시장가 매수.
///
/// POST /api/buy
///
/// 금액이 없거나 숫자가 아니면 0으로 취급되어 검증 에러가 됩니다.
pub async fn market_buy(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<BuyRequest>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Json(request) = payload?;
    let credentials = request.credentials.into_credentials();
    let order = OrderRequest::MarketBuyByAmount {
        krw_amount: request.amount.unwrap_or(Decimal::ZERO),
    };

    let result = state
        .exchange
        .place_order(&credentials, order)
        .await
        .map_err(log_failure("buy"))?;

    info!(units = %result.units, price = %result.current_price, "매수 주문 응답");
    Ok(Json(result.into_payload()))
}

/// 시장가 매도.
///
/// POST /api/sell
pub async fn market_sell(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<SellRequest>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Json(request) = payload?;
    let credentials = request.credentials.into_credentials();
    let order = OrderRequest::MarketSellByUnits {
        units: request.units.unwrap_or(Decimal::ZERO),
    };

    let result = state
        .exchange
        .place_order(&credentials, order)
        .await
        .map_err(log_failure("sell"))?;

    info!(units = %result.units, price = %result.current_price, "매도 주문 응답");
    Ok(Json(result.into_payload()))
}

/// 거래 라우터 생성.
pub fn trade_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/balance", post(get_balance))
        .route("/buy", post(market_buy))
        .route("/sell", post(market_sell))
}

// ==================== 테스트 ====================
