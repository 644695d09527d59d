//! 날짜 형식 및 파싱 유틸리티.

use chrono::{NaiveDate, Utc};
use chrono_tz::Tz;

use crate::error::{JournalError, JournalResult, RowError};

/// 테이블 행에 기록되는 기본 날짜 형식 (예: "17-06-2025").
pub const DEFAULT_ROW_DATE_FORMAT: &str = "%d-%m-%Y";

/// 일별 파일명에 사용되는 기본 날짜 형식 (예: "170625").
pub const DEFAULT_FILE_DATE_FORMAT: &str = "%d%m%y";

/// 행의 날짜 필드를 파싱합니다.
///
/// 지정된 형식을 먼저 시도하고, 실패하면 ISO 형식(`%Y-%m-%d`)을 시도합니다.
pub fn parse_row_date(raw: &str, format: &str) -> Result<NaiveDate, RowError> {
    let value = raw.trim();
    if value.is_empty() {
        return Err(RowError::MissingField("date"));
    }

    NaiveDate::parse_from_str(value, format)
        .or_else(|_| NaiveDate::parse_from_str(value, "%Y-%m-%d"))
        .map_err(|_| RowError::InvalidDate(value.to_string()))
}

/// 주어진 타임존 기준의 오늘 날짜를 반환합니다.
pub fn today_in(timezone: &str) -> JournalResult<NaiveDate> {
    let tz: Tz = timezone
        .parse()
        .map_err(|_| JournalError::Config(format!("알 수 없는 타임존: {}", timezone)))?;
    Ok(Utc::now().with_timezone(&tz).date_naive())
}
