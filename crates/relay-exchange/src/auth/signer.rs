//! HMAC-SHA512 request signing for the Bithumb private API.
//!
//! 서명 = base64(hex(HMAC-SHA512(secret, path + "\0" + form + "\0" + nonce)))
//!
//! 거래소 레퍼런스 클라이언트와의 호환을 위해 원시 digest가 아니라
//! 소문자 hex 문자열의 ASCII 바이트를 base64로 인코딩합니다.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use hmac::{Hmac, Mac};
use sha2::Sha512;

use super::FormParams;

type HmacSha512 = Hmac<Sha512>;

const SEPARATOR: char = '\0';

/// 서명 대상 문자열의 hex digest (소문자 128자).
pub fn hex_digest(
    endpoint_path: &str,
    encoded_params: &str,
    secret_key: &[u8],
    nonce: &str,
) -> String {
    let message = format!(
        "{}{}{}{}{}",
        endpoint_path, SEPARATOR, encoded_params, SEPARATOR, nonce
    );

    let mut mac =
        HmacSha512::new_from_slice(secret_key).expect("HMAC can take key of any size");
    mac.update(message.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

fn sign_encoded(
    endpoint_path: &str,
    encoded_params: &str,
    secret_key: &[u8],
    nonce: &str,
) -> String {
    STANDARD.encode(hex_digest(endpoint_path, encoded_params, secret_key, nonce))
}

/// `Api-Sign` 헤더 값 계산.
///
/// 같은 입력이면 항상 같은 서명을 반환합니다.
pub fn sign(endpoint_path: &str, params: &FormParams, secret_key: &[u8], nonce: &str) -> String {
    sign_encoded(endpoint_path, &params.encode(), secret_key, nonce)
}

/// 전송 준비가 끝난 서명 요청.
///
/// `body`는 서명에 사용한 폼 문자열 그 자체입니다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedRequest {
    pub endpoint_path: String,
    pub params: FormParams,
    pub body: String,
    pub nonce: String,
    pub signature: String,
}

impl SignedRequest {
    /// 파라미터를 한 번만 인코딩해 서명과 본문에 함께 사용.
    pub fn new(
        endpoint_path: impl Into<String>,
        params: FormParams,
        secret_key: &[u8],
        nonce: impl Into<String>,
    ) -> Self {
        let endpoint_path = endpoint_path.into();
        let nonce = nonce.into();
        let body = params.encode();
        let signature = sign_encoded(&endpoint_path, &body, secret_key, &nonce);

        Self {
            endpoint_path,
            params,
            body,
            nonce,
            signature,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &[u8] = b"test_secret_key";

    fn reference_params() -> FormParams {
        FormParams::new()
            .with("currency", "ALL")
            .with("endpoint", "/info/balance")
    }

    #[test]
    fn test_reference_vector() {
        let params = reference_params();
        assert_eq!(params.encode(), "currency=ALL&endpoint=%2Finfo%2Fbalance");

        let digest = hex_digest("/info/balance", &params.encode(), SECRET, "1234567890");
        assert_eq!(
            digest,
            "57ca024e716918d0e62e9bf08c373015103d7faea4c632164aca39e8394e561c\
             f7f920db44ca504c7837d5d410a582cc84ae5ef2294b0555c15bec904f37b2d7"
        );

        let signature = sign("/info/balance", &params, SECRET, "1234567890");
        assert_eq!(
            signature,
            "NTdjYTAyNGU3MTY5MThkMGU2MmU5YmYwOGMzNzMwMTUxMDNkN2ZhZWE0YzYzMjE2\
             NGFjYTM5ZTgzOTRlNTYxY2Y3ZjkyMGRiNDRjYTUwNGM3ODM3ZDVkNDEwYTU4MmNj\
             ODRhZTVlZjIyOTRiMDU1NWMxNWJlYzkwNGYzN2IyZDc="
        );
    }

    #[test]
    fn test_signature_is_base64_of_hex() {
        let signature = sign("/info/balance", &reference_params(), SECRET, "1234567890");
        let decoded = STANDARD.decode(&signature).unwrap();
        let hex_text = String::from_utf8(decoded).unwrap();

        assert_eq!(hex_text.len(), 128);
        assert!(hex_text
            .chars()
            .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
    }

    #[test]
    fn test_deterministic() {
        let a = sign("/info/balance", &reference_params(), SECRET, "1234567890");
        let b = sign("/info/balance", &reference_params(), SECRET, "1234567890");
        assert_eq!(a, b);
    }

    #[test]
    fn test_any_input_change_changes_signature() {
        let base = sign("/info/balance", &reference_params(), SECRET, "1234567890");

        let other_path = sign("/info/account", &reference_params(), SECRET, "1234567890");
        let other_secret = sign("/info/balance", &reference_params(), b"other", "1234567890");
        let other_nonce = sign("/info/balance", &reference_params(), SECRET, "1234567891");
        let other_value = sign(
            "/info/balance",
            &FormParams::new()
                .with("currency", "BTC")
                .with("endpoint", "/info/balance"),
            SECRET,
            "1234567890",
        );
        let reordered = sign(
            "/info/balance",
            &FormParams::new()
                .with("endpoint", "/info/balance")
                .with("currency", "ALL"),
            SECRET,
            "1234567890",
        );

        for other in [other_path, other_secret, other_nonce, other_value, reordered] {
            assert_ne!(base, other);
        }
    }

    #[test]
    fn test_signed_request_body_matches_signed_string() {
        let params = FormParams::new()
            .with("order_currency", "XRP")
            .with("payment_currency", "KRW")
            .with("units", "20.0000")
            .with("type", "bid");

        let request =
            SignedRequest::new("/trade/market_buy", params.clone(), SECRET, "1700000000000");

        assert_eq!(
            request.body,
            "order_currency=XRP&payment_currency=KRW&units=20.0000&type=bid"
        );
        assert_eq!(request.body, params.encode());
        assert_eq!(
            request.signature,
            sign("/trade/market_buy", &params, SECRET, "1700000000000")
        );
        assert_eq!(
            request.signature,
            "NGUzZTUwZDM2YmQyNjliMTdmOTkxZGY3NmQzYzY1MzFhNDU0Y2RhOGZmMjQ4OWE2\
             ODVlNWNkNDUwODhkNGFjZTkxY2Y2M2RmNmYzYzYyMTcyNTRkOGQ2MmJkMTliMGQy\
             MDRlODdkZmU3ZmQwYTc2NzNkYzNjNjRhODU1ZmNmNzM="
        );
    }

    #[test]
    fn test_empty_params_still_signs() {
        let signature = sign("/info/balance", &FormParams::new(), SECRET, "1");
        assert!(!signature.is_empty());
    }
}
