use rust_decimal::Decimal;
use serde::Serialize;

/// 주문 직전에 조회한 시세 스냅샷.
///
/// 캐시하지 않습니다. 주문마다 새로 조회한 값을 사용합니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TickerSnapshot {
    /// 자산 심볼 (예: XRP)
    pub symbol: String,
    /// 종가 (KRW)
    pub closing_price: Decimal,
}
