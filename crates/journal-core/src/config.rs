//! 설정 관리.
//!
//! 설정은 다음 순서로 겹쳐서 로드됩니다 (뒤쪽이 우선):
//! 1. 각 섹션의 기본값
//! 2. TOML 설정 파일 (없으면 건너뜀)
//! 3. `JOURNAL__SECTION__KEY` 형식의 환경 변수
//! 4. 브로커 키 전용 환경 변수 (`KITE_API_KEY`, `API_KEY` 등)

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::JournalResult;
use crate::types::{today_in, DEFAULT_FILE_DATE_FORMAT, DEFAULT_ROW_DATE_FORMAT};

/// 기본 설정 파일 경로.
pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// 애플리케이션 설정.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    /// 브로커 (Kite Connect) 설정
    pub kite: BrokerConfig,
    /// 스프레드시트 업로드 설정
    pub sheets: SheetsConfig,
    /// 파일 경로 설정
    pub paths: PathsConfig,
    /// "오늘"을 계산할 타임존
    pub timezone: TimezoneConfig,
    /// 로깅 설정
    pub logging: LoggingConfig,
}

/// 브로커 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct BrokerConfig {
    /// API 키
    pub api_key: String,
    /// API 시크릿
    pub api_secret: String,
    /// 접근 토큰 저장 파일
    pub access_token_file: PathBuf,
    /// REST API 기본 URL
    pub base_url: String,
    /// 로그인 페이지 URL
    pub login_url: String,
    /// 요청 타임아웃 (초)
    pub timeout_secs: u64,
}

impl Default for BrokerConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            api_secret: String::new(),
            access_token_file: PathBuf::from("access_token.txt"),
            base_url: "https://api.kite.trade".to_string(),
            login_url: "https://kite.zerodha.com/connect/login".to_string(),
            timeout_secs: 30,
        }
    }
}

/// 스프레드시트 업로드 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SheetsConfig {
    /// 업로드 활성화 여부
    pub enabled: bool,
    /// 스프레드시트 이름
    pub spreadsheet_name: String,
    /// 스프레드시트가 위치할 드라이브 폴더 ID
    pub folder_id: String,
    /// OAuth 사용자 토큰 파일
    pub token_file: PathBuf,
    /// 체결 내역 탭 (누적 추가)
    pub trades_tab: String,
    /// 보유 종목 탭 (덮어쓰기)
    pub holdings_tab: String,
    /// 청산 거래 탭 (덮어쓰기)
    pub closed_trades_tab: String,
    /// 요청 타임아웃 (초)
    pub timeout_secs: u64,
}

impl Default for SheetsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            spreadsheet_name: "June".to_string(),
            folder_id: String::new(),
            token_file: PathBuf::from("token.json"),
            trades_tab: "Trades".to_string(),
            holdings_tab: "Holdings".to_string(),
            closed_trades_tab: "Closed Trades".to_string(),
            timeout_secs: 30,
        }
    }
}

/// 파일 경로 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PathsConfig {
    /// 일별 테이블과 원장이 저장될 디렉토리
    pub data_dir: PathBuf,
    /// 성과 원장 파일
    pub ledger_file: PathBuf,
    /// 일별 파일명 날짜 형식
    pub file_date_format: String,
    /// 행 날짜 형식
    pub row_date_format: String,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            ledger_file: PathBuf::from("performance_summary_by_date.csv"),
            file_date_format: DEFAULT_FILE_DATE_FORMAT.to_string(),
            row_date_format: DEFAULT_ROW_DATE_FORMAT.to_string(),
        }
    }
}

impl PathsConfig {
    /// 상대 경로를 데이터 디렉토리 기준으로 변환합니다.
    pub fn resolve(&self, path: impl AsRef<Path>) -> PathBuf {
        let path = path.as_ref();
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.data_dir.join(path)
        }
    }

    /// 성과 원장 경로.
    pub fn ledger_path(&self) -> PathBuf {
        self.resolve(&self.ledger_file)
    }
}

/// 타임존 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimezoneConfig {
    /// IANA 타임존 이름
    pub name: String,
}

impl Default for TimezoneConfig {
    fn default() -> Self {
        Self {
            name: "Asia/Kolkata".to_string(),
        }
    }
}

/// 로깅 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// 로그 레벨
    pub level: String,
    /// 로그 형식 (pretty, json, compact)
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl AppConfig {
    /// 파일과 환경 변수에서 설정을 로드합니다.
    ///
    /// 파일이 없으면 기본값과 환경 변수만 사용합니다.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, config::ConfigError> {
        dotenvy::dotenv().ok();

        let builder = config::Config::builder()
            .add_source(config::File::from(path.as_ref()).required(false))
            .add_source(
                config::Environment::with_prefix("JOURNAL")
                    .prefix_separator("__")
                    .separator("__"),
            );

        let mut config: AppConfig = builder.build()?.try_deserialize()?;
        config.kite.apply_env_fallbacks();
        Ok(config)
    }

    /// 기본 경로에서 설정을 로드합니다.
    pub fn load_default() -> Result<Self, config::ConfigError> {
        Self::load(DEFAULT_CONFIG_PATH)
    }

    /// 설정된 타임존 기준의 오늘 날짜.
    pub fn today(&self) -> JournalResult<NaiveDate> {
        today_in(&self.timezone.name)
    }
}

impl BrokerConfig {
    /// 비어 있는 키를 브로커 전용 환경 변수로 채웁니다.
    fn apply_env_fallbacks(&mut self) {
        if self.api_key.is_empty() {
            if let Some(key) = first_env(&["KITE_API_KEY", "API_KEY"]) {
                self.api_key = key;
            }
        }
        if self.api_secret.is_empty() {
            if let Some(secret) = first_env(&["KITE_API_SECRET", "API_SECRET"]) {
                self.api_secret = secret;
            }
        }
    }
}

/// 처음으로 설정된 환경 변수 값을 반환합니다.
fn first_env(keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|key| std::env::var(key).ok())
        .map(|v| v.trim().to_string())
        .find(|v| !v.is_empty())
}
