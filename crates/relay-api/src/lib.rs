//! 거래소 중계 API 서버 라이브러리.
//!
//! 브라우저 프론트엔드가 자격증명과 금액/수량을 보내면 서버에서 서명한 뒤
//! 거래소 private API로 전달합니다. 시크릿 키는 공개 채널에 노출되지 않습니다.
//!
//! # 엔드포인트
//!
//! - `POST /api/balance` - 잔고 조회
//! - `GET /api/ticker/{currency}` - 시세 조회
//! - `POST /api/buy` - XRP 시장가 매수 (KRW 금액 지정)
//! - `POST /api/sell` - XRP 시장가 매도 (수량 지정)

pub mod config;
pub mod error;
pub mod routes;
pub mod state;
pub mod utils;

pub use config::{NonceMode, ServerConfig};
pub use error::{ApiError, ApiErrorResponse};
pub use routes::create_api_router;
pub use state::AppState;
