//! 매매일지 시스템의 에러 타입.
//!
//! 이 모듈은 워크스페이스 전반에서 사용되는 에러 타입을 정의합니다.

use thiserror::Error;

/// 핵심 매매일지 에러.
#[derive(Debug, Error)]
pub enum JournalError {
    /// 설정 에러
    #[error("설정 에러: {0}")]
    Config(String),

    /// 데이터 에러 (테이블/원장 형식 문제)
    #[error("데이터 에러: {0}")]
    Data(String),

    /// 원장 기록 에러
    #[error("원장 에러: {0}")]
    Ledger(String),

    /// 파일 입출력 에러
    #[error("입출력 에러: {0}")]
    Io(String),

    /// 잘못된 입력
    #[error("잘못된 입력: {0}")]
    InvalidInput(String),

    /// 찾을 수 없음
    #[error("찾을 수 없음: {0}")]
    NotFound(String),
}

/// 매매일지 작업을 위한 Result 타입.
pub type JournalResult<T> = Result<T, JournalError>;

impl From<std::io::Error> for JournalError {
    fn from(err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => JournalError::NotFound(err.to_string()),
            _ => JournalError::Io(err.to_string()),
        }
    }
}

impl From<config::ConfigError> for JournalError {
    fn from(err: config::ConfigError) -> Self {
        JournalError::Config(err.to_string())
    }
}

/// 입력 행 검증 에러.
///
/// 테이블의 한 행이 필수 필드를 파싱하지 못했을 때 반환됩니다.
/// 호출자는 이 에러를 실행 중단이 아닌 "해당 행 건너뛰기" 신호로 취급합니다.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RowError {
    /// 필수 필드 누락
    #[error("필드 누락: {0}")]
    MissingField(&'static str),

    /// 숫자 파싱 실패
    #[error("숫자 형식 오류 ({field}): '{value}'")]
    InvalidNumber { field: &'static str, value: String },

    /// 날짜 파싱 실패
    #[error("날짜 형식 오류: '{0}'")]
    InvalidDate(String),

    /// 알 수 없는 거래 유형
    #[error("알 수 없는 거래 유형: '{0}'")]
    UnknownTransactionType(String),
}
