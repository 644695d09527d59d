//! Google Sheets 업로드 서비스.
//!
//! Drive v3로 폴더 안의 스프레드시트를 이름으로 찾거나 생성하고,
//! Sheets v4 values API로 탭에 행을 추가하거나 덮어씁니다.

use async_trait::async_trait;
use reqwest::{Client, Method, StatusCode, Url};
use serde::Deserialize;
use serde_json::json;
use std::path::PathBuf;
use tokio::sync::RwLock;
use tracing::{debug, error, info, warn};

use journal_core::SheetsConfig;

use crate::credentials::GoogleCredentials;
use crate::types::{SheetUploader, SheetsError, SheetsResult, UploadMode};

/// 스프레드시트 MIME 타입.
const SPREADSHEET_MIME: &str = "application/vnd.google-apps.spreadsheet";

/// Google Sheets 업로더 설정.
#[derive(Debug, Clone)]
pub struct GoogleSheetsConfig {
    /// 스프레드시트 이름
    pub spreadsheet_name: String,
    /// 상위 드라이브 폴더 ID (비어 있으면 루트)
    pub folder_id: String,
    /// authorized-user 토큰 파일
    pub token_file: PathBuf,
    /// 업로드 활성화 여부
    pub enabled: bool,
    /// Sheets API 기본 URL
    pub sheets_base_url: String,
    /// Drive files API 기본 URL
    pub drive_base_url: String,
    /// 요청 타임아웃 (초)
    pub timeout_secs: u64,
}

impl GoogleSheetsConfig {
    /// API 기본 URL을 변경합니다.
    pub fn with_base_urls(mut self, sheets: impl Into<String>, drive: impl Into<String>) -> Self {
        self.sheets_base_url = sheets.into();
        self.drive_base_url = drive.into();
        self
    }
}

impl From<&SheetsConfig> for GoogleSheetsConfig {
    fn from(config: &SheetsConfig) -> Self {
        Self {
            spreadsheet_name: config.spreadsheet_name.clone(),
            folder_id: config.folder_id.clone(),
            token_file: config.token_file.clone(),
            enabled: config.enabled,
            sheets_base_url: "https://sheets.googleapis.com/v4/spreadsheets".to_string(),
            drive_base_url: "https://www.googleapis.com/drive/v3/files".to_string(),
            timeout_secs: config.timeout_secs,
        }
    }
}

#[derive(Debug, Deserialize)]
struct FileList {
    #[serde(default)]
    files: Vec<FileId>,
}

#[derive(Debug, Deserialize)]
struct FileId {
    id: String,
}

/// Google Sheets 업로더.
pub struct GoogleSheetsClient {
    config: GoogleSheetsConfig,
    client: Client,
    credentials: RwLock<GoogleCredentials>,
    spreadsheet_id: RwLock<Option<String>>,
}

impl GoogleSheetsClient {
    /// 토큰 파일에서 자격 증명을 읽어 업로더를 생성합니다.
    pub fn new(config: GoogleSheetsConfig) -> SheetsResult<Self> {
        let credentials = GoogleCredentials::load(&config.token_file)?;
        Self::with_credentials(config, credentials)
    }

    /// 자격 증명을 직접 지정하여 업로더를 생성합니다.
    pub fn with_credentials(
        config: GoogleSheetsConfig,
        credentials: GoogleCredentials,
    ) -> SheetsResult<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            config,
            client,
            credentials: RwLock::new(credentials),
            spreadsheet_id: RwLock::new(None),
        })
    }

    /// 유효한 접근 토큰 반환, 필요시 갱신 후 토큰 파일에 저장.
    async fn access_token(&self) -> SheetsResult<String> {
        {
            let creds = self.credentials.read().await;
            if let Some(token) = creds.valid_token() {
                return Ok(token.to_string());
            }
        }

        let mut creds = self.credentials.write().await;
        // 다른 호출이 먼저 갱신했을 수 있음
        if let Some(token) = creds.valid_token() {
            return Ok(token.to_string());
        }

        creds.refresh(&self.client).await?;
        if let Err(e) = creds.save(&self.config.token_file) {
            warn!(error = %e, "Failed to write refreshed token back");
        }

        creds
            .token
            .clone()
            .ok_or_else(|| SheetsError::Auth("refreshed token missing".to_string()))
    }

    /// 인증된 요청을 보내고 응답 본문을 반환합니다.
    async fn send(
        &self,
        method: Method,
        url: Url,
        body: Option<serde_json::Value>,
    ) -> SheetsResult<String> {
        let token = self.access_token().await?;
        debug!(%method, %url, "Google API request");

        let mut request = self.client.request(method, url).bearer_auth(token);
        if let Some(body) = body {
            request = request.json(&body);
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if status == StatusCode::TOO_MANY_REQUESTS {
            warn!("Google API rate limited");
            return Err(SheetsError::RateLimited);
        }
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            error!("Google API auth failed: {} - {}", status, text);
            return Err(SheetsError::Auth(format!("HTTP {}: {}", status, text)));
        }
        if !status.is_success() {
            error!("Google API request failed: {} - {}", status, text);
            return Err(SheetsError::UploadFailed(format!("HTTP {}: {}", status, text)));
        }

        Ok(text)
    }

    /// 기본 URL 뒤에 경로 세그먼트를 붙입니다.
    fn endpoint(base: &str, segments: &[&str]) -> SheetsResult<Url> {
        let mut url = Url::parse(base)
            .map_err(|e| SheetsError::InvalidConfig(format!("잘못된 URL '{}': {}", base, e)))?;
        url.path_segments_mut()
            .map_err(|_| SheetsError::InvalidConfig(format!("잘못된 URL '{}'", base)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// 폴더 안에서 이름으로 스프레드시트를 찾고, 없으면 생성합니다.
    pub async fn get_or_create_spreadsheet(&self) -> SheetsResult<String> {
        if let Some(id) = self.spreadsheet_id.read().await.as_ref() {
            return Ok(id.clone());
        }

        let name = &self.config.spreadsheet_name;
        let folder = &self.config.folder_id;

        let mut query = format!(
            "name = '{}' and mimeType = '{}' and trashed = false",
            name.replace('\'', "\\'"),
            SPREADSHEET_MIME
        );
        if !folder.is_empty() {
            query.push_str(&format!(" and '{}' in parents", folder));
        }

        let mut url = Self::endpoint(&self.config.drive_base_url, &[])?;
        url.query_pairs_mut()
            .append_pair("q", &query)
            .append_pair("fields", "files(id)");

        let found: FileList = serde_json::from_str(&self.send(Method::GET, url, None).await?)?;

        let id = match found.files.into_iter().next() {
            Some(file) => {
                debug!(spreadsheet = %name, id = %file.id, "Found existing spreadsheet");
                file.id
            }
            None => {
                let mut url = Self::endpoint(&self.config.drive_base_url, &[])?;
                url.query_pairs_mut().append_pair("fields", "id");

                let mut meta = json!({ "name": name, "mimeType": SPREADSHEET_MIME });
                if !folder.is_empty() {
                    meta["parents"] = json!([folder]);
                }

                let created: FileId =
                    serde_json::from_str(&self.send(Method::POST, url, Some(meta)).await?)?;
                info!(spreadsheet = %name, id = %created.id, "Created spreadsheet");
                created.id
            }
        };

        *self.spreadsheet_id.write().await = Some(id.clone());
        Ok(id)
    }

    /// 탭 끝에 행을 추가합니다.
    async fn append_values(&self, id: &str, tab: &str, rows: &[Vec<String>]) -> SheetsResult<()> {
        let range = format!("{}!A1:append", tab);
        let mut url = Self::endpoint(&self.config.sheets_base_url, &[id, "values", &range])?;
        url.query_pairs_mut()
            .append_pair("valueInputOption", "RAW")
            .append_pair("insertDataOption", "INSERT_ROWS");

        self.send(Method::POST, url, Some(json!({ "values": rows })))
            .await?;
        Ok(())
    }

    /// 탭의 모든 값을 지웁니다.
    async fn clear_values(&self, id: &str, tab: &str) -> SheetsResult<()> {
        let range = format!("{}:clear", tab);
        let url = Self::endpoint(&self.config.sheets_base_url, &[id, "values", &range])?;

        self.send(Method::POST, url, Some(json!({}))).await?;
        debug!(tab, "Cleared tab before upload");
        Ok(())
    }

    /// A1부터 값을 기록합니다.
    async fn update_values(&self, id: &str, tab: &str, rows: &[Vec<String>]) -> SheetsResult<()> {
        let range = format!("{}!A1", tab);
        let mut url = Self::endpoint(&self.config.sheets_base_url, &[id, "values", &range])?;
        url.query_pairs_mut().append_pair("valueInputOption", "RAW");

        self.send(
            Method::PUT,
            url,
            Some(json!({ "range": range, "values": rows })),
        )
        .await?;
        Ok(())
    }
}

#[async_trait]
impl SheetUploader for GoogleSheetsClient {
    async fn upload(
        &self,
        tab: &str,
        rows: &[Vec<String>],
        mode: UploadMode,
    ) -> SheetsResult<usize> {
        if !self.is_enabled() {
            debug!("Google Sheets upload is disabled, skipping");
            return Ok(0);
        }

        if rows.is_empty() {
            warn!(tab, "No data to upload");
            return Ok(0);
        }

        let id = self.get_or_create_spreadsheet().await?;

        match mode {
            UploadMode::Append => self.append_values(&id, tab, rows).await?,
            UploadMode::Replace => {
                self.clear_values(&id, tab).await?;
                self.update_values(&id, tab, rows).await?;
            }
        }

        info!(tab, rows = rows.len(), %mode, "Uploaded to Google Sheet");
        Ok(rows.len())
    }

    fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    fn name(&self) -> &str {
        "google-sheets"
    }
}
