//! Bithumb API 응답 타입.

use serde::Deserialize;
use serde_json::Value;

/// 성공 상태 코드.
pub const STATUS_OK: &str = "0000";

/// 공개 시세 응답 (`GET /public/ticker/{SYMBOL}_KRW`).
#[derive(Debug, Deserialize)]
pub struct BithumbTickerResponse {
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<BithumbTickerData>,
}

/// 시세 데이터. 가격은 문자열로 내려옵니다.
///
/// 주문 흐름은 종가만 사용하며 나머지 필드는 무시합니다.
#[derive(Debug, Deserialize)]
pub struct BithumbTickerData {
    pub closing_price: String,
}

/// 응답의 `status` 필드 (문자열 또는 숫자).
pub(crate) fn status_code(payload: &Value) -> Option<String> {
    match payload.get("status")? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// 응답의 `message` 필드.
pub(crate) fn error_message(payload: &Value) -> Option<String> {
    payload
        .get("message")
        .and_then(Value::as_str)
        .filter(|m| !m.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_ticker_response() {
        let payload = json!({
            "status": "0000",
            "data": {
                "opening_price": "504",
                "closing_price": "512.5",
                "min_price": "500",
                "max_price": "520",
                "units_traded_24H": "1000000",
                "date": "1700000000000"
            }
        });

        let ticker: BithumbTickerResponse = serde_json::from_value(payload).unwrap();
        assert_eq!(ticker.status, STATUS_OK);
        assert_eq!(ticker.data.unwrap().closing_price, "512.5");
    }

    #[test]
    fn test_status_and_message() {
        let payload = json!({"status": "5600", "message": "Please try again"});
        assert_eq!(status_code(&payload).as_deref(), Some("5600"));
        assert_eq!(error_message(&payload).as_deref(), Some("Please try again"));

        let payload = json!({"status": 5100, "message": ""});
        assert_eq!(status_code(&payload).as_deref(), Some("5100"));
        assert_eq!(error_message(&payload), None);
    }
}
