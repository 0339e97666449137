//! 서버 설정.
//!
//! 환경 변수에서 읽습니다 (`.env` 파일은 `main`에서 먼저 로드).
//!
//! | 변수 | 기본값 | 설명 |
//! |------|--------|------|
//! | `API_HOST` | `127.0.0.1` | 바인딩 호스트 |
//! | `API_PORT` | `3000` | 바인딩 포트 |
//! | `BITHUMB_API_URL` | `https://api.bithumb.com` | 거래소 REST 기본 URL |
//! | `STATIC_DIR` | `.` | 정적 파일 디렉토리 |
//! | `NONCE_MODE` | `clock` | `clock` 또는 `monotonic` |
//! | `REQUEST_TIMEOUT_SECS` | `30` | 요청 전체 타임아웃 |

use std::{net::SocketAddr, path::PathBuf, sync::Arc, time::Duration};

use relay_core::{ClockNonce, MonotonicNonce, NonceSource};
use relay_exchange::BITHUMB_API_URL;
use tracing::warn;

/// nonce 생성 방식.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NonceMode {
    /// 현재 epoch 밀리초 (거래소 레퍼런스 클라이언트와 동일)
    #[default]
    Clock,
    /// 밀리초 + 카운터, 프로세스 내 엄격 증가
    Monotonic,
}

impl NonceMode {
    /// 문자열에서 변환. 알 수 없는 값은 None.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "clock" => Some(Self::Clock),
            "monotonic" => Some(Self::Monotonic),
            _ => None,
        }
    }

    /// 설정에 맞는 nonce 생성기.
    pub fn nonce_source(&self) -> Arc<dyn NonceSource> {
        match self {
            Self::Clock => Arc::new(ClockNonce::system()),
            Self::Monotonic => Arc::new(MonotonicNonce::system()),
        }
    }
}

/// 서버 설정 구조체.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// 바인딩할 호스트 주소
    pub host: String,
    /// 바인딩할 포트
    pub port: u16,
    /// 거래소 REST 기본 URL
    pub exchange_url: String,
    /// API 외 경로에서 서빙할 정적 파일 디렉토리
    pub static_dir: PathBuf,
    /// nonce 생성 방식
    pub nonce_mode: NonceMode,
    /// HTTP 계층 요청 타임아웃
    pub request_timeout: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            exchange_url: BITHUMB_API_URL.to_string(),
            static_dir: PathBuf::from("."),
            nonce_mode: NonceMode::Clock,
            request_timeout: Duration::from_secs(30),
        }
    }
}

impl ServerConfig {
    /// 환경 변수에서 설정 로드.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 임의의 조회 함수로 설정 로드. 잘못된 값은 경고 후 기본값 사용.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let host = lookup("API_HOST").unwrap_or(defaults.host);
        let port = match lookup("API_PORT") {
            Some(p) => p.parse().unwrap_or_else(|_| {
                warn!(value = %p, "API_PORT가 유효하지 않아 기본값 사용");
                defaults.port
            }),
            None => defaults.port,
        };
        let exchange_url = lookup("BITHUMB_API_URL").unwrap_or(defaults.exchange_url);
        let static_dir = lookup("STATIC_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.static_dir);
        let nonce_mode = match lookup("NONCE_MODE") {
            Some(m) => NonceMode::parse(&m).unwrap_or_else(|| {
                warn!(value = %m, "NONCE_MODE를 알 수 없어 clock 사용");
                NonceMode::Clock
            }),
            None => defaults.nonce_mode,
        };
        let request_timeout = lookup("REQUEST_TIMEOUT_SECS")
            .and_then(|s| s.parse().ok())
            .map(Duration::from_secs)
            .unwrap_or(defaults.request_timeout);

        Self {
            host,
            port,
            exchange_url,
            static_dir,
            nonce_mode,
            request_timeout,
        }
    }

    /// 소켓 주소 반환.
    ///
    /// # Errors
    /// `host:port` 형식이 유효하지 않으면 `AddrParseError`를 반환합니다.
    pub fn socket_addr(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        format!("{}:{}", self.host, self.port).parse()
    }
}
