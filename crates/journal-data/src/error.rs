//! 데이터 모듈 오류 타입.

use journal_core::JournalError;
use thiserror::Error;

/// 테이블/원장 입출력 오류.
#[derive(Debug, Error)]
pub enum DataError {
    /// 파일을 찾을 수 없음
    #[error("File not found: {0}")]
    NotFound(String),

    /// 필수 컬럼 누락 (헤더 문제이므로 행 단위 건너뛰기 대상이 아님)
    #[error("Missing column '{column}' in {path}")]
    MissingColumn { path: String, column: &'static str },

    /// 파일 입출력 오류
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV 인코딩/디코딩 오류
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl From<DataError> for JournalError {
    fn from(err: DataError) -> Self {
        match err {
            DataError::NotFound(path) => JournalError::NotFound(path),
            DataError::MissingColumn { .. } => JournalError::Data(err.to_string()),
            DataError::Io(e) => JournalError::from(e),
            DataError::Csv(e) => JournalError::Data(e.to_string()),
        }
    }
}

pub type DataResult<T> = std::result::Result<T, DataError>;
