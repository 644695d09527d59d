//! Google OAuth 사용자 자격 증명.
//!
//! 최초 동의 절차로 만들어진 authorized-user 형식의 `token.json`을 읽고,
//! 접근 토큰이 없거나 곧 만료되면 refresh_token으로 갱신한 뒤 파일에 다시 씁니다.

use chrono::{DateTime, Duration, Utc};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{debug, error, info};

use crate::types::{SheetsError, SheetsResult};

/// 토큰 갱신 임계값 (남은 시간이 이 값보다 적으면 갱신).
const TOKEN_REFRESH_THRESHOLD_SECS: i64 = 300;

/// 기본 토큰 발급 URL.
pub const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";

/// authorized-user 형식의 자격 증명.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoogleCredentials {
    /// 현재 접근 토큰
    #[serde(default)]
    pub token: Option<String>,
    /// 갱신 토큰
    pub refresh_token: String,
    /// OAuth 클라이언트 ID
    pub client_id: String,
    /// OAuth 클라이언트 시크릿
    pub client_secret: String,
    /// 토큰 발급 URL
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
    /// 접근 토큰 만료 시각
    #[serde(default)]
    pub expiry: Option<DateTime<Utc>>,
    /// 그 외 필드 (scopes 등, 다시 쓸 때 보존)
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

fn default_token_uri() -> String {
    DEFAULT_TOKEN_URI.to_string()
}

/// 토큰 발급 응답.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<i64>,
}

impl GoogleCredentials {
    /// 파일에서 자격 증명을 로드합니다.
    pub fn load(path: impl AsRef<Path>) -> SheetsResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            SheetsError::Credentials(format!(
                "{} 읽기 실패 (authorized-user token.json 필요): {}",
                path.display(),
                e
            ))
        })?;

        Ok(serde_json::from_str(&content)?)
    }

    /// 자격 증명을 파일에 저장합니다.
    pub fn save(&self, path: impl AsRef<Path>) -> SheetsResult<()> {
        let path = path.as_ref();
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content).map_err(|e| {
            SheetsError::Credentials(format!("{} 저장 실패: {}", path.display(), e))
        })?;

        debug!(file = %path.display(), "Google credentials saved");
        Ok(())
    }

    /// 유효한 접근 토큰이 있으면 반환합니다.
    pub fn valid_token(&self) -> Option<&str> {
        let token = self.token.as_deref().filter(|t| !t.is_empty())?;
        match self.expiry {
            Some(expiry) if expiry <= Utc::now() + Duration::seconds(TOKEN_REFRESH_THRESHOLD_SECS) => {
                None
            }
            _ => Some(token),
        }
    }

    /// refresh_token으로 접근 토큰을 갱신합니다.
    pub async fn refresh(&mut self, client: &Client) -> SheetsResult<()> {
        if self.refresh_token.is_empty() {
            return Err(SheetsError::Auth(
                "refresh_token이 없습니다. token.json을 다시 생성하세요.".to_string(),
            ));
        }

        info!("Refreshing Google access token...");

        let form = [
            ("grant_type", "refresh_token"),
            ("refresh_token", self.refresh_token.as_str()),
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.as_str()),
        ];

        let response = client.post(&self.token_uri).form(&form).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            error!("Token refresh failed: {} - {}", status, body);
            return Err(SheetsError::Auth(format!("HTTP {}: {}", status, body)));
        }

        let token: TokenResponse = serde_json::from_str(&body)?;
        self.expiry = token
            .expires_in
            .map(|secs| Utc::now() + Duration::seconds(secs));
        self.token = Some(token.access_token);

        info!(expiry = ?self.expiry, "Google access token refreshed");
        Ok(())
    }
}
