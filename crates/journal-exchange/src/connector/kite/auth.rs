//! Kite Connect 인증 모듈.
//!
//! 처리 기능:
//! - 로그인 URL 생성 (사용자가 브라우저에서 로그인 후 request_token 획득)
//! - 세션 발급 (POST /session/token)
//! - 접근 토큰 파일 저장/로드
//!
//! Kite 접근 토큰은 매일 만료되므로 갱신 API가 없습니다.
//! 토큰이 만료되면 로그인부터 다시 진행해야 합니다.

use reqwest::Client;
use sha2::{Digest, Sha256};
use std::fs;
use std::path::Path;
use tracing::{debug, info};

use super::client::decode_response;
use super::config::{KiteConfig, KITE_API_VERSION};
use super::types::SessionData;
use crate::error::{ExchangeError, ExchangeResult};

/// Kite 세션 발급기.
pub struct KiteSession {
    config: KiteConfig,
    client: Client,
}

impl KiteSession {
    /// 새 세션 발급기 생성.
    ///
    /// # Errors
    /// HTTP 클라이언트 생성에 실패하면 `ExchangeError::NetworkError`를 반환합니다.
    pub fn new(config: KiteConfig) -> ExchangeResult<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ExchangeError::NetworkError(format!("HTTP client 생성 실패: {}", e)))?;

        Ok(Self { config, client })
    }

    /// 브라우저 로그인 URL.
    pub fn login_url(&self) -> String {
        format!(
            "{}?v={}&api_key={}",
            self.config.login_url, KITE_API_VERSION, self.config.api_key
        )
    }

    /// 세션 요청 체크섬: `hex(sha256(api_key + request_token + api_secret))`.
    pub fn checksum(&self, request_token: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.config.api_key.as_bytes());
        hasher.update(request_token.as_bytes());
        hasher.update(self.config.api_secret.as_bytes());
        hex::encode(hasher.finalize())
    }

    /// request_token을 접근 토큰으로 교환합니다.
    pub async fn generate_session(&self, request_token: &str) -> ExchangeResult<SessionData> {
        self.config.require_secret()?;

        let request_token = request_token.trim();
        if request_token.is_empty() {
            return Err(ExchangeError::Unauthorized(
                "request_token is empty".to_string(),
            ));
        }

        let url = format!("{}/session/token", self.config.rest_base_url());
        debug!(%url, "Requesting Kite session");

        let checksum = self.checksum(request_token);
        let form = [
            ("api_key", self.config.api_key.as_str()),
            ("request_token", request_token),
            ("checksum", checksum.as_str()),
        ];

        let response = self
            .client
            .post(&url)
            .header("X-Kite-Version", KITE_API_VERSION)
            .form(&form)
            .send()
            .await
            .map_err(|e| ExchangeError::NetworkError(e.to_string()))?;

        let session: SessionData = decode_response(response, "session").await?;

        info!(user_id = %session.user_id, "Kite session generated");
        Ok(session)
    }
}

/// 접근 토큰을 파일에 저장합니다.
pub fn save_access_token(path: impl AsRef<Path>, access_token: &str) -> ExchangeResult<()> {
    let path = path.as_ref();
    fs::write(path, access_token.trim()).map_err(|e| {
        ExchangeError::TokenFile(format!("{} 저장 실패: {}", path.display(), e))
    })?;

    debug!(file = %path.display(), "Access token saved");
    Ok(())
}

/// 파일에서 접근 토큰을 로드합니다.
pub fn load_access_token(path: impl AsRef<Path>) -> ExchangeResult<String> {
    let path = path.as_ref();
    let token = fs::read_to_string(path)
        .map_err(|e| ExchangeError::TokenFile(format!("{} 읽기 실패: {}", path.display(), e)))?;

    let token = token.trim();
    if token.is_empty() {
        return Err(ExchangeError::TokenFile(format!(
            "{} is empty, run `journal login` first",
            path.display()
        )));
    }

    Ok(token.to_string())
}
