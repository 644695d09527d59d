//! Kite Connect API 설정.

use journal_core::BrokerConfig;

use crate::error::{ExchangeError, ExchangeResult};

/// Kite Connect API 버전 헤더 값.
pub const KITE_API_VERSION: &str = "3";

/// Kite Connect API 설정.
#[derive(Debug, Clone)]
pub struct KiteConfig {
    /// API 키
    pub api_key: String,
    /// API 시크릿 (세션 발급에만 필요)
    pub api_secret: String,
    /// REST API 기본 URL
    pub base_url: String,
    /// 로그인 페이지 URL
    pub login_url: String,
    /// 요청 타임아웃 (초)
    pub timeout_secs: u64,
}

impl KiteConfig {
    /// 새 설정을 생성합니다 (나머지 값은 기본값).
    pub fn new(api_key: impl Into<String>, api_secret: impl Into<String>) -> Self {
        Self::from(&BrokerConfig {
            api_key: api_key.into(),
            api_secret: api_secret.into(),
            ..Default::default()
        })
    }

    /// 기본 URL을 변경합니다.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// 끝의 `/`를 제거한 기본 URL.
    pub fn rest_base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    /// API 키가 설정되어 있는지 확인합니다.
    pub fn require_api_key(&self) -> ExchangeResult<()> {
        if self.api_key.trim().is_empty() {
            return Err(ExchangeError::Unauthorized(
                "API key is not configured (set KITE_API_KEY or kite.api_key)".to_string(),
            ));
        }
        Ok(())
    }

    /// API 키와 시크릿이 모두 설정되어 있는지 확인합니다.
    pub fn require_secret(&self) -> ExchangeResult<()> {
        self.require_api_key()?;
        if self.api_secret.trim().is_empty() {
            return Err(ExchangeError::Unauthorized(
                "API secret is not configured (set KITE_API_SECRET or kite.api_secret)"
                    .to_string(),
            ));
        }
        Ok(())
    }
}

impl From<&BrokerConfig> for KiteConfig {
    fn from(config: &BrokerConfig) -> Self {
        Self {
            api_key: config.api_key.clone(),
            api_secret: config.api_secret.clone(),
            base_url: config.base_url.clone(),
            login_url: config.login_url.clone(),
            timeout_secs: config.timeout_secs,
        }
    }
}
