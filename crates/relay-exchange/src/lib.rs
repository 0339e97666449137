//! 거래소 요청 서명과 REST 커넥터.
//!
//! - [`auth`]: 순서가 보존되는 폼 파라미터, HMAC-SHA512 서명
//! - [`order`]: 시장가 주문 수량 계산
//! - [`connector`]: 거래소별 REST 클라이언트

pub mod auth;
pub mod connector;
pub mod order;

pub use auth::{sign, FormParams, SignedRequest};
pub use connector::bithumb::{BithumbClient, BITHUMB_API_URL};
