//! 업로드 타입 및 trait 정의.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use tracing::debug;

/// 업로드 방식.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UploadMode {
    /// 기존 데이터 아래에 행 추가
    Append,
    /// 탭을 비운 뒤 A1부터 기록
    Replace,
}

impl fmt::Display for UploadMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UploadMode::Append => write!(f, "append"),
            UploadMode::Replace => write!(f, "replace"),
        }
    }
}

/// 업로드 결과 타입.
pub type SheetsResult<T> = Result<T, SheetsError>;

/// 업로드 에러.
#[derive(Debug, Error)]
pub enum SheetsError {
    #[error("업로드 실패: {0}")]
    UploadFailed(String),

    #[error("잘못된 설정: {0}")]
    InvalidConfig(String),

    #[error("인증 실패: {0}")]
    Auth(String),

    #[error("자격 증명 파일 에러: {0}")]
    Credentials(String),

    #[error("요청 한도 초과")]
    RateLimited,

    #[error("네트워크 에러: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("직렬화 에러: {0}")]
    SerializationError(#[from] serde_json::Error),
}

/// 스프레드시트 업로더 trait.
#[async_trait]
pub trait SheetUploader: Send + Sync {
    /// 테이블을 탭에 업로드하고 업로드한 행 수를 반환합니다.
    ///
    /// 빈 테이블은 경고만 남기고 건너뜁니다 (에러 아님).
    async fn upload(&self, tab: &str, rows: &[Vec<String>], mode: UploadMode)
        -> SheetsResult<usize>;

    /// 업로더가 활성화되어 있는지 확인합니다.
    fn is_enabled(&self) -> bool;

    /// 업로더 이름을 반환합니다.
    fn name(&self) -> &str;
}

/// 아무것도 업로드하지 않는 업로더 (`sheets.enabled = false`).
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopUploader;

#[async_trait]
impl SheetUploader for NoopUploader {
    async fn upload(
        &self,
        tab: &str,
        rows: &[Vec<String>],
        mode: UploadMode,
    ) -> SheetsResult<usize> {
        debug!(tab, rows = rows.len(), %mode, "Spreadsheet upload disabled, skipping");
        Ok(0)
    }

    fn is_enabled(&self) -> bool {
        false
    }

    fn name(&self) -> &str {
        "noop"
    }
}
