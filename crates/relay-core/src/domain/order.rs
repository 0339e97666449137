use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

/// 주문 방향.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderSide {
    /// 매수
    Bid,
    /// 매도
    Ask,
}

impl OrderSide {
    /// 거래소 `type` 파라미터 값.
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderSide::Bid => "bid",
            OrderSide::Ask => "ask",
        }
    }
}

impl std::fmt::Display for OrderSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 시장가 주문 요청.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderRequest {
    /// 지출할 KRW 금액 지정, 수량은 시세로 계산
    MarketBuyByAmount { krw_amount: Decimal },
    /// 매도할 자산 수량 직접 지정
    MarketSellByUnits { units: Decimal },
}

impl OrderRequest {
    pub fn side(&self) -> OrderSide {
        match self {
            OrderRequest::MarketBuyByAmount { .. } => OrderSide::Bid,
            OrderRequest::MarketSellByUnits { .. } => OrderSide::Ask,
        }
    }
}

/// 주문 결과.
///
/// 거래소 원본 응답에 서명 요청을 만들 때 실제로 사용한 시세/수량을 합친 값입니다.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderResult {
    /// 거래소 원본 응답
    pub response: Value,
    /// 주문에 사용한 종가
    pub current_price: Decimal,
    /// 전송한 수량 (소수점 4자리 문자열)
    pub units: String,
    /// 예상 체결 금액 (매도 시에만, 정수 KRW 문자열)
    pub estimated_amount: Option<String>,
}

impl OrderResult {
    /// 거래소 응답과 로컬 계산 필드를 합친 JSON.
    ///
    /// 같은 이름의 키는 로컬 계산 값이 덮어씁니다.
    pub fn into_payload(self) -> Value {
        let mut map = match self.response {
            Value::Object(map) => map,
            Value::Null => Map::new(),
            other => {
                let mut map = Map::new();
                map.insert("data".to_string(), other);
                map
            }
        };

        map.insert("currentPrice".to_string(), decimal_to_json(self.current_price));
        map.insert("units".to_string(), Value::String(self.units));
        if let Some(amount) = self.estimated_amount {
            map.insert("estimatedAmount".to_string(), Value::String(amount));
        }

        Value::Object(map)
    }
}

/// Decimal을 JSON 숫자로 변환. 숫자로 표현할 수 없으면 문자열.
fn decimal_to_json(value: Decimal) -> Value {
    let text = value.normalize().to_string();
    match Number::from_str(&text) {
        Ok(n) => Value::Number(n),
        Err(_) => Value::String(text),
    }
}
