//! 날짜별 파일명 규칙.

use chrono::NaiveDate;
use std::fs;
use std::path::{Path, PathBuf};

use journal_core::PathsConfig;

use crate::error::DataResult;

/// 하루치 테이블 파일 경로.
///
/// `trades_{날짜}.csv`, `holdings_{날짜}.csv`, `closed_trades_{날짜}.csv`
/// 형식이며 날짜 부분은 `paths.file_date_format`(기본 `%d%m%y`)을 따릅니다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyFiles {
    dir: PathBuf,
    stamp: String,
}

impl DailyFiles {
    /// 설정과 날짜로 파일 경로 묶음을 생성합니다.
    pub fn new(paths: &PathsConfig, date: NaiveDate) -> Self {
        Self::in_dir(&paths.data_dir, date, &paths.file_date_format)
    }

    /// 지정한 디렉토리 기준으로 생성합니다.
    pub fn in_dir(dir: impl AsRef<Path>, date: NaiveDate, file_date_format: &str) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
            stamp: date.format(file_date_format).to_string(),
        }
    }

    /// 파일명에 들어가는 날짜 문자열.
    pub fn stamp(&self) -> &str {
        &self.stamp
    }

    pub fn trades(&self) -> PathBuf {
        self.file("trades")
    }

    pub fn holdings(&self) -> PathBuf {
        self.file("holdings")
    }

    pub fn closed_trades(&self) -> PathBuf {
        self.file("closed_trades")
    }

    /// 데이터 디렉토리가 없으면 생성합니다.
    pub fn ensure_dir(&self) -> DataResult<()> {
        fs::create_dir_all(&self.dir)?;
        Ok(())
    }

    fn file(&self, prefix: &str) -> PathBuf {
        self.dir.join(format!("{}_{}.csv", prefix, self.stamp))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_names() {
        let files = DailyFiles::new(
            &PathsConfig::default(),
            NaiveDate::from_ymd_opt(2025, 6, 13).unwrap(),
        );

        assert_eq!(files.stamp(), "130625");
        assert_eq!(files.trades(), PathBuf::from("./trades_130625.csv"));
        assert_eq!(files.holdings(), PathBuf::from("./holdings_130625.csv"));
        assert_eq!(files.closed_trades(), PathBuf::from("./closed_trades_130625.csv"));
    }
}
