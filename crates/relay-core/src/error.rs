//! 중계 서버 에러 타입.

use thiserror::Error;

/// 중계 작업 에러.
///
/// 모든 변형은 HTTP 경계에서 `{status: "error", message}` 형태로 변환됩니다.
/// Display 출력이 곧 사용자에게 전달되는 메시지입니다.
#[derive(Debug, Error)]
pub enum RelayError {
    /// 잘못된 호출자 입력 (네트워크 호출 전에 거부)
    #[error("{0}")]
    Validation(String),

    /// 시세 조회 실패 (서명 전에 주문 흐름 중단)
    #[error("{0}")]
    Quote(String),

    /// 인증 호출 실패 또는 거래소가 보고한 업무 에러
    #[error("{message}")]
    Remote {
        /// 거래소 상태 코드 (예: "5100"), 전송 계층 실패 시 None
        code: Option<String>,
        /// 거래소 메시지 또는 전송 에러 메시지
        message: String,
    },
}

impl RelayError {
    /// 전송 계층 실패로 인한 원격 에러 생성.
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Remote {
            code: None,
            message: message.into(),
        }
    }

    /// 거래소가 보고한 원격 에러 생성.
    pub fn exchange(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Remote {
            code: Some(code.into()),
            message: message.into(),
        }
    }

    /// 로그용 에러 분류 이름.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation",
            Self::Quote(_) => "quote",
            Self::Remote { .. } => "remote",
        }
    }
}
