//! 애플리케이션 상태.

use std::sync::Arc;

use relay_core::SpotExchange;

/// 라우트 핸들러가 공유하는 상태.
///
/// 거래소 클라이언트만 들고 있습니다. 자격증명은 요청마다 전달받으며
/// 상태에 저장하지 않습니다.
#[derive(Clone)]
pub struct AppState {
    /// 거래소 클라이언트
    pub exchange: Arc<dyn SpotExchange>,
    /// 서버 버전
    pub version: String,
}

impl AppState {
    pub fn new(exchange: Arc<dyn SpotExchange>) -> Self {
        Self {
            exchange,
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
