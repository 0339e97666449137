//! 거래소 추상화.
//!
//! HTTP 진입점은 이 trait만 알고, 실제 거래소 구현은 `relay-exchange`가 제공합니다.

use async_trait::async_trait;
use serde_json::Value;

use super::{OrderRequest, OrderResult, TickerSnapshot};
use crate::{Credentials, RelayError};

/// 현물 거래소 trait.
///
/// 구현체는 요청 간 공유되는 가변 상태를 갖지 않아야 합니다.
/// 자격증명은 호출마다 전달받고 저장하지 않습니다.
#[async_trait]
pub trait SpotExchange: Send + Sync {
    /// 거래소 이름.
    fn exchange_name(&self) -> &str;

    /// 공개 시세 원본 응답 조회 (상태 코드 검사 없음).
    ///
    /// # Errors
    ///
    /// - `RelayError::Remote`: 전송 계층 실패
    async fn fetch_ticker_payload(&self, symbol: &str) -> Result<Value, RelayError>;

    /// 시세 조회.
    ///
    /// # Errors
    ///
    /// - `RelayError::Remote`: 전송 실패 또는 성공 코드가 아닌 응답
    async fn get_ticker(&self, symbol: &str) -> Result<TickerSnapshot, RelayError>;

    /// 전체 잔고 조회. 거래소 응답을 그대로 반환합니다.
    async fn get_balance(&self, credentials: &Credentials) -> Result<Value, RelayError>;

    /// 시장가 주문 실행.
    ///
    /// # Errors
    ///
    /// - `RelayError::Validation`: 잘못된 수량/금액 (네트워크 호출 없음)
    /// - `RelayError::Quote`: 시세 조회 실패 (주문 호출 없음)
    /// - `RelayError::Remote`: 주문 호출 실패
    async fn place_order(
        &self,
        credentials: &Credentials,
        request: OrderRequest,
    ) -> Result<OrderResult, RelayError>;
}
