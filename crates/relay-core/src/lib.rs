//! 거래소 중계 서버의 핵심 도메인 타입.
//!
//! 요청 단위 자격증명, 주문 요청/결과 타입, 에러 타입,
//! 그리고 서명에 사용할 nonce 생성기를 제공합니다.
//!
//! 이 크레이트는 I/O를 수행하지 않습니다. 네트워크 호출은
//! `relay-exchange`, HTTP 진입점은 `relay-api`가 담당합니다.

pub mod credentials;
pub mod domain;
pub mod error;
pub mod nonce;

pub use credentials::Credentials;
pub use domain::{OrderRequest, OrderResult, OrderSide, SpotExchange, TickerSnapshot};
pub use error::RelayError;
pub use nonce::{Clock, ClockNonce, ManualClock, MonotonicNonce, NonceSource, SystemClock};
