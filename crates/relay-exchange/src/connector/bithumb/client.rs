use std::{str::FromStr, sync::Arc};

use async_trait::async_trait;
use relay_core::{
    ClockNonce, Credentials, NonceSource, OrderRequest, OrderResult, OrderSide, RelayError,
    SpotExchange, TickerSnapshot,
};
use reqwest::{header, Client, Response};
use rust_decimal::Decimal;
use serde_json::Value;
use tracing::{debug, info, warn};

use super::types::{error_message, status_code, BithumbTickerResponse, STATUS_OK};
use crate::{
    auth::{FormParams, SignedRequest},
    order,
};

/// Bithumb REST API 기본 URL.
pub const BITHUMB_API_URL: &str = "https://api.bithumb.com";

/// 주문 자산.
const ORDER_CURRENCY: &str = "XRP";
/// 결제 통화.
const PAYMENT_CURRENCY: &str = "KRW";

const BALANCE_ENDPOINT: &str = "/info/balance";
const MARKET_BUY_ENDPOINT: &str = "/trade/market_buy";
const MARKET_SELL_ENDPOINT: &str = "/trade/market_sell";

const QUOTE_FAILED: &str = "시세 조회 실패";
const SELL_UNITS_REQUIRED: &str = "매도 수량을 입력해주세요";
const BUY_AMOUNT_REQUIRED: &str = "매수 금액을 입력해주세요";
const BUY_AMOUNT_OUT_OF_RANGE: &str = "매수 금액이 허용 범위를 벗어났습니다";
const SELL_UNITS_OUT_OF_RANGE: &str = "매도 수량이 허용 범위를 벗어났습니다";

// ============================================================================
// Bithumb 클라이언트
// ============================================================================

/// Bithumb REST 클라이언트.
///
/// 자격증명을 보관하지 않습니다. 호출마다 전달받은 자격증명으로 서명하고,
/// 재시도 없이 요청당 한 번만 전송합니다.
pub struct BithumbClient {
    client: Client,
    base_url: String,
    nonce: Arc<dyn NonceSource>,
}

impl BithumbClient {
    /// 기본 URL과 시스템 시계 nonce로 생성.
    pub fn new() -> Self {
        Self::with_base_url(BITHUMB_API_URL)
    }

    /// 지정한 기본 URL로 생성.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            nonce: Arc::new(ClockNonce::system()),
        }
    }

    /// nonce 생성기 교체.
    pub fn with_nonce_source(mut self, nonce: Arc<dyn NonceSource>) -> Self {
        self.nonce = nonce;
        self
    }

    /// HTTP 클라이언트 교체 (타임아웃/프록시 설정 등).
    pub fn with_http_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// 파라미터에 새 nonce로 서명하고 진단 필드를 로그로 남김.
    ///
    /// 시크릿 키는 로그에 남기지 않습니다.
    fn sign_request(
        &self,
        endpoint: &str,
        params: FormParams,
        credentials: &Credentials,
    ) -> SignedRequest {
        let nonce = self.nonce.next_nonce();
        let signed = SignedRequest::new(
            endpoint,
            params,
            credentials.expose_secret().as_bytes(),
            nonce,
        );

        info!(
            endpoint = %signed.endpoint_path,
            params = %signed.body,
            nonce = %signed.nonce,
            api_key = %credentials.api_key(),
            api_sign = %signed.signature,
            "Bithumb 인증 요청"
        );

        signed
    }

    /// 서명 요청 전송.
    ///
    /// 본문은 서명에 사용한 폼 문자열 그대로입니다.
    async fn post_signed(
        &self,
        credentials: &Credentials,
        signed: SignedRequest,
    ) -> Result<Value, RelayError> {
        let url = format!("{}{}", self.base_url, signed.endpoint_path);

        let response = self
            .client
            .post(&url)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .header("Api-Key", credentials.api_key())
            .header("Api-Sign", &signed.signature)
            .header("Api-Nonce", &signed.nonce)
            .body(signed.body)
            .send()
            .await
            .map_err(|e| {
                warn!(endpoint = %signed.endpoint_path, error = %e, "Bithumb 요청 전송 실패");
                RelayError::transport(e.to_string())
            })?;

        let payload = Self::read_payload(response).await?;

        match status_code(&payload) {
            Some(code) if code != STATUS_OK => {
                let message = error_message(&payload)
                    .unwrap_or_else(|| format!("Bithumb error status {}", code));
                warn!(
                    endpoint = %signed.endpoint_path,
                    status = %code,
                    message = %message,
                    "Bithumb 업무 에러"
                );
                Err(RelayError::exchange(code, message))
            }
            _ => Ok(payload),
        }
    }

    /// 응답 본문을 JSON으로 읽음. 2xx가 아니면 거래소 메시지로 에러 생성.
    async fn read_payload(response: Response) -> Result<Value, RelayError> {
        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| RelayError::transport(e.to_string()))?;
        let parsed = serde_json::from_str::<Value>(&text);

        if !status.is_success() {
            let fallback = format!("Request failed with status code {}", status.as_u16());
            return Err(match parsed {
                Ok(payload) => match (status_code(&payload), error_message(&payload)) {
                    (Some(code), Some(message)) => RelayError::exchange(code, message),
                    (None, Some(message)) => RelayError::transport(message),
                    _ => RelayError::transport(fallback),
                },
                Err(_) => RelayError::transport(fallback),
            });
        }

        parsed.map_err(|e| {
            RelayError::transport(format!(
                "Failed to parse Bithumb response: {}. Body: {}",
                e, text
            ))
        })
    }

    /// 주문 직전 시세 조회. 실패 사유와 관계없이 `Quote` 에러로 중단.
    async fn quote(&self, symbol: &str) -> Result<TickerSnapshot, RelayError> {
        let ticker = self.get_ticker(symbol).await.map_err(|e| {
            warn!(symbol, error = %e, "주문 전 시세 조회 실패");
            RelayError::Quote(QUOTE_FAILED.to_string())
        })?;

        if ticker.closing_price <= Decimal::ZERO {
            warn!(symbol, price = %ticker.closing_price, "유효하지 않은 종가");
            return Err(RelayError::Quote(QUOTE_FAILED.to_string()));
        }

        Ok(ticker)
    }

    fn order_params(units: &str, side: OrderSide) -> FormParams {
        FormParams::new()
            .with("order_currency", ORDER_CURRENCY)
            .with("payment_currency", PAYMENT_CURRENCY)
            .with("units", units)
            .with("type", side.as_str())
    }
}

impl Default for BithumbClient {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// 조회 / 주문 메서드
// ============================================================================

impl BithumbClient {
    /// 공개 시세 원본 응답 (GET /public/ticker/{SYMBOL}_KRW).
    pub async fn fetch_ticker_payload(&self, symbol: &str) -> Result<Value, RelayError> {
        let url = format!(
            "{}/public/ticker/{}_{}",
            self.base_url,
            symbol.to_uppercase(),
            PAYMENT_CURRENCY
        );
        debug!(%url, "Bithumb 시세 조회");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| RelayError::transport(e.to_string()))?;

        Self::read_payload(response).await
    }

    /// 시세 조회. 상태 코드가 `0000`이 아니면 에러.
    pub async fn get_ticker(&self, symbol: &str) -> Result<TickerSnapshot, RelayError> {
        let payload = self.fetch_ticker_payload(symbol).await?;
        let ticker: BithumbTickerResponse = serde_json::from_value(payload)
            .map_err(|e| RelayError::transport(format!("Failed to parse Bithumb ticker: {}", e)))?;

        if ticker.status != STATUS_OK {
            let message = ticker.message.unwrap_or_else(|| QUOTE_FAILED.to_string());
            return Err(RelayError::exchange(ticker.status, message));
        }

        let data = ticker
            .data
            .ok_or_else(|| RelayError::transport("Bithumb ticker has no data"))?;
        let closing_price = Decimal::from_str(data.closing_price.trim()).map_err(|e| {
            RelayError::transport(format!(
                "Invalid closing_price '{}': {}",
                data.closing_price, e
            ))
        })?;

        Ok(TickerSnapshot {
            symbol: symbol.to_uppercase(),
            closing_price,
        })
    }

    /// 전체 잔고 조회 (POST /info/balance). 거래소 응답을 그대로 반환.
    pub async fn get_balance(&self, credentials: &Credentials) -> Result<Value, RelayError> {
        let params = FormParams::new().with("currency", "ALL");
        let signed = self.sign_request(BALANCE_ENDPOINT, params, credentials);
        self.post_signed(credentials, signed).await
    }

    /// 시장가 매수 (POST /trade/market_buy).
    ///
    /// 수량 = 매수 금액 / 종가 (소수점 4자리 반올림).
    /// 수량이 소수점 4자리를 유지할 수 없을 만큼 크면 주문 전에 검증 에러.
    pub async fn market_buy(
        &self,
        credentials: &Credentials,
        krw_amount: Decimal,
    ) -> Result<OrderResult, RelayError> {
        if krw_amount <= Decimal::ZERO {
            return Err(RelayError::Validation(BUY_AMOUNT_REQUIRED.to_string()));
        }

        let ticker = self.quote(ORDER_CURRENCY).await?;
        let units = order::units_for_amount(krw_amount, ticker.closing_price)
            .ok_or_else(|| {
                warn!(amount = %krw_amount, price = %ticker.closing_price, "매수 수량 범위 초과");
                RelayError::Validation(BUY_AMOUNT_OUT_OF_RANGE.to_string())
            })?
            .to_string();

        let params = Self::order_params(&units, OrderSide::Bid);
        let signed = self.sign_request(MARKET_BUY_ENDPOINT, params, credentials);
        let response = self.post_signed(credentials, signed).await?;

        info!(
            price = %ticker.closing_price,
            units = %units,
            "Bithumb 시장가 매수 완료"
        );

        Ok(OrderResult {
            response,
            current_price: ticker.closing_price,
            units,
            estimated_amount: None,
        })
    }

    /// 시장가 매도 (POST /trade/market_sell).
    ///
    /// 수량 반올림이나 예상 금액 계산이 범위를 넘으면 주문을 보내지 않습니다.
    pub async fn market_sell(
        &self,
        credentials: &Credentials,
        units: Decimal,
    ) -> Result<OrderResult, RelayError> {
        if units <= Decimal::ZERO {
            return Err(RelayError::Validation(SELL_UNITS_REQUIRED.to_string()));
        }

        let out_of_range = || RelayError::Validation(SELL_UNITS_OUT_OF_RANGE.to_string());
        let rounded = order::round_units(units).ok_or_else(|| {
            warn!(units = %units, "매도 수량 범위 초과");
            out_of_range()
        })?;

        let ticker = self.quote(ORDER_CURRENCY).await?;
        let estimated = order::estimated_amount(rounded, ticker.closing_price).ok_or_else(|| {
            warn!(units = %rounded, price = %ticker.closing_price, "매도 예상 금액 범위 초과");
            out_of_range()
        })?;
        let units = rounded.to_string();

        let params = Self::order_params(&units, OrderSide::Ask);
        let signed = self.sign_request(MARKET_SELL_ENDPOINT, params, credentials);
        let response = self.post_signed(credentials, signed).await?;

        info!(
            price = %ticker.closing_price,
            units = %units,
            estimated_amount = %estimated,
            "Bithumb 시장가 매도 완료"
        );

        Ok(OrderResult {
            response,
            current_price: ticker.closing_price,
            units,
            estimated_amount: Some(estimated.to_string()),
        })
    }

    /// 주문 요청 종류에 따라 매수/매도 실행.
    pub async fn place_order(
        &self,
        credentials: &Credentials,
        request: OrderRequest,
    ) -> Result<OrderResult, RelayError> {
        debug!(side = request.side().as_str(), "Bithumb 시장가 주문 요청");
        match request {
            OrderRequest::MarketBuyByAmount { krw_amount } => {
                self.market_buy(credentials, krw_amount).await
            }
            OrderRequest::MarketSellByUnits { units } => self.market_sell(credentials, units).await,
        }
    }
}

// ============================================================================
// SpotExchange 구현
// ============================================================================

#[async_trait]
impl SpotExchange for BithumbClient {
    fn exchange_name(&self) -> &str {
        "bithumb"
    }

    async fn fetch_ticker_payload(&self, symbol: &str) -> Result<Value, RelayError> {
        BithumbClient::fetch_ticker_payload(self, symbol).await
    }

    async fn get_ticker(&self, symbol: &str) -> Result<TickerSnapshot, RelayError> {
        BithumbClient::get_ticker(self, symbol).await
    }

    async fn get_balance(&self, credentials: &Credentials) -> Result<Value, RelayError> {
        BithumbClient::get_balance(self, credentials).await
    }

    async fn place_order(
        &self,
        credentials: &Credentials,
        request: OrderRequest,
    ) -> Result<OrderResult, RelayError> {
        BithumbClient::place_order(self, credentials, request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_params_order() {
        let params = BithumbClient::order_params("20.0000", OrderSide::Bid);
        assert_eq!(
            params.encode(),
            "order_currency=XRP&payment_currency=KRW&units=20.0000&type=bid"
        );
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = BithumbClient::with_base_url("http://localhost:1234/");
        assert_eq!(client.base_url(), "http://localhost:1234");
        assert_eq!(BithumbClient::default().base_url(), BITHUMB_API_URL);
    }
}
