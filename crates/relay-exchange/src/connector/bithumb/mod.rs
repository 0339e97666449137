//! Bithumb 거래소 커넥터.
//!
//! - Public API: `GET /public/ticker/{SYMBOL}_KRW`
//! - Private API: `POST /info/balance`, `/trade/market_buy`, `/trade/market_sell`
//!   (`Api-Key`, `Api-Sign`, `Api-Nonce` 헤더 인증)

mod client;
mod types;

pub use client::{BithumbClient, BITHUMB_API_URL};
pub use types::{BithumbTickerData, BithumbTickerResponse, STATUS_OK};
