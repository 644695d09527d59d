//! CLI 명령 구현.
//!
//! - [`login`]: Kite 로그인 및 접근 토큰 저장
//! - [`daily`]: 체결/보유 종목 수집, CSV 저장, 업로드, 청산 거래 생성
//! - [`closed_trades`]: 저장된 CSV로 청산 거래 생성 (오프라인)
//! - [`metrics`]: 청산 거래 집계 후 성과 원장에 한 행 추가

pub mod closed_trades;
pub mod daily;
pub mod login;
pub mod metrics;

use anyhow::{Context, Result};
use chrono::NaiveDate;

/// `YYYY-MM-DD` 형식의 날짜 인자를 해석합니다.
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .with_context(|| format!("Invalid date format: {}. Expected YYYY-MM-DD", s))
}
