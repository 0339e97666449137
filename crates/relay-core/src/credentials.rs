//! 요청 단위 API 자격증명.
//!
//! 시크릿 키는 `SecretString`으로 감싸 실수로 로그에 출력되지 않도록 하고,
//! drop 시 메모리를 0으로 덮어씁니다. 자격증명은 요청 하나의 수명 동안만
//! 존재하며 어디에도 저장하지 않습니다.

use secrecy::{ExposeSecret, SecretString};

/// 거래소 API 자격증명.
#[derive(Clone)]
pub struct Credentials {
    api_key: String,
    secret_key: SecretString,
}

impl Credentials {
    /// 명시적인 값으로 자격증명 생성.
    pub fn new(api_key: impl Into<String>, secret_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            secret_key: SecretString::from(secret_key.into()),
        }
    }

    /// API 키 (공개값, 로그 출력 가능).
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// 서명용 시크릿 키 노출.
    ///
    /// 암호 연산에만 사용하고 절대 로그에 남기지 마세요.
    pub fn expose_secret(&self) -> &str {
        self.secret_key.expose_secret()
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &self.api_key)
            .field("secret_key", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credentials_new() {
        let creds = Credentials::new("my_api_key", "my_secret");
        assert_eq!(creds.api_key(), "my_api_key");
        assert_eq!(creds.expose_secret(), "my_secret");
    }

    #[test]
    fn test_debug_redacts_secret() {
        let creds = Credentials::new("my_api_key", "super_secret_key");
        let debug_str = format!("{:?}", creds);

        assert!(debug_str.contains("my_api_key"));
        assert!(!debug_str.contains("super_secret_key"));
        assert!(debug_str.contains("[REDACTED]"));
    }
}
