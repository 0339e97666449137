//! 시장가 주문 수량 계산.
//!
//! 수량은 자산의 실제 거래 단위와 무관하게 항상 소수점 4자리로 전송합니다.
//! 반올림은 5에서 올림(half-up)입니다.
//!
//! `Decimal` 가수부(96비트)에 소수점 4자리를 담을 수 없는 수량이나
//! 곱셈 결과가 범위를 넘는 경우는 `None`으로 돌려 호출 측에서 거부합니다.

use rust_decimal::{Decimal, RoundingStrategy};

/// 전송 수량 소수점 자리수.
pub const UNITS_SCALE: u32 = 4;

/// 수량을 소수점 4자리로 반올림하고 자리수를 고정.
///
/// 정수부가 너무 커서 4자리를 유지할 수 없으면 None.
pub fn round_units(units: Decimal) -> Option<Decimal> {
    let mut rounded =
        units.round_dp_with_strategy(UNITS_SCALE, RoundingStrategy::MidpointAwayFromZero);
    // rescale은 가수부가 넘치면 더 작은 자리수로 멈춤
    rounded.rescale(UNITS_SCALE);
    (rounded.scale() == UNITS_SCALE).then_some(rounded)
}

/// 전송용 수량 문자열 (예: `20.0000`).
pub fn format_units(units: Decimal) -> Option<String> {
    round_units(units).map(|rounded| rounded.to_string())
}

/// 매수 금액을 종가로 나눈 수량 (소수점 4자리).
///
/// 종가가 0이거나 수량이 4자리를 유지할 수 없으면 None.
pub fn units_for_amount(krw_amount: Decimal, closing_price: Decimal) -> Option<Decimal> {
    krw_amount.checked_div(closing_price).and_then(round_units)
}

/// 매도 예상 체결 금액 (KRW 정수 반올림). 곱셈이 넘치면 None.
pub fn estimated_amount(units: Decimal, closing_price: Decimal) -> Option<Decimal> {
    units
        .checked_mul(closing_price)
        .map(|amount| amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero))
}
