//! 브로커 에러 타입.

use thiserror::Error;

/// 브로커 관련 에러.
#[derive(Debug, Error)]
pub enum ExchangeError {
    /// 네트워크/연결 에러
    #[error("Network error: {0}")]
    NetworkError(String),

    /// 인증/권한 에러 (토큰 만료 포함)
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// 요청 한도 초과
    #[error("Rate limit exceeded")]
    RateLimited,

    /// 브로커 API 에러
    #[error("API error {error_type}: {message}")]
    ApiError { error_type: String, message: String },

    /// 파싱/역직렬화 에러
    #[error("Parse error: {0}")]
    ParseError(String),

    /// 타임아웃
    #[error("Request timeout: {0}")]
    Timeout(String),

    /// 토큰 파일 읽기/쓰기 에러
    #[error("Token file error: {0}")]
    TokenFile(String),

    /// 알 수 없는 에러
    #[error("Unknown error: {0}")]
    Unknown(String),
}

/// 브로커 작업을 위한 Result 타입.
pub type ExchangeResult<T> = Result<T, ExchangeError>;

impl ExchangeError {
    /// 인증 에러인지 확인.
    pub fn is_auth_error(&self) -> bool {
        matches!(self, ExchangeError::Unauthorized(_))
    }

    /// Kite 에러 응답의 `error_type`으로 에러를 분류합니다.
    pub fn from_kite(error_type: &str, message: String) -> Self {
        match error_type {
            "TokenException" | "PermissionException" => ExchangeError::Unauthorized(message),
            "NetworkException" => ExchangeError::NetworkError(message),
            "DataException" => ExchangeError::ParseError(message),
            _ => ExchangeError::ApiError {
                error_type: error_type.to_string(),
                message,
            },
        }
    }
}

impl From<reqwest::Error> for ExchangeError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ExchangeError::Timeout(err.to_string())
        } else if err.is_connect() {
            ExchangeError::NetworkError(err.to_string())
        } else if err.is_decode() {
            ExchangeError::ParseError(err.to_string())
        } else {
            ExchangeError::Unknown(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ExchangeError {
    fn from(err: serde_json::Error) -> Self {
        ExchangeError::ParseError(err.to_string())
    }
}
