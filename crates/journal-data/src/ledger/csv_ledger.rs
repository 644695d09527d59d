//! CSV 파일 원장.

use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use journal_core::{PerformanceRecord, DEFAULT_ROW_DATE_FORMAT, LEDGER_HEADER};

use super::PerformanceLedger;
use crate::error::DataResult;

/// CSV 파일 기반 원장.
///
/// 파일이 없거나 비어 있을 때만 헤더를 기록하고, 이후에는 행만 추가합니다.
#[derive(Debug, Clone)]
pub struct CsvLedger {
    path: PathBuf,
    date_format: String,
}

impl CsvLedger {
    /// 새 CSV 원장을 생성합니다. 파일은 첫 추가 시 만들어집니다.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            date_format: DEFAULT_ROW_DATE_FORMAT.to_string(),
        }
    }

    /// 날짜 형식을 설정합니다.
    pub fn with_date_format(mut self, format: impl Into<String>) -> Self {
        self.date_format = format.into();
        self
    }

    /// 원장 파일 경로.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn needs_header(&self) -> DataResult<bool> {
        match fs::metadata(&self.path) {
            Ok(meta) => Ok(meta.len() == 0),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(true),
            Err(e) => Err(e.into()),
        }
    }
}

impl PerformanceLedger for CsvLedger {
    fn append(&mut self, record: &PerformanceRecord) -> DataResult<()> {
        let write_header = self.needs_header()?;

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);

        if write_header {
            debug!(file = %self.path.display(), "Creating ledger with header");
            writer.write_record(LEDGER_HEADER)?;
        }
        writer.write_record(record.to_row(&self.date_format))?;
        writer.flush()?;

        Ok(())
    }

    fn records(&self) -> DataResult<Vec<PerformanceRecord>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_path(&self.path)?;

        let mut records = Vec::new();
        for (index, row) in reader.records().enumerate() {
            let row = row?;
            let fields: Vec<&str> = row.iter().collect();

            match PerformanceRecord::from_row(&fields, &self.date_format) {
                Ok(record) => records.push(record),
                Err(e) => warn!(
                    file = %self.path.display(),
                    line = index + 2,
                    error = %e,
                    "Skipping malformed ledger row"
                ),
            }
        }

        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use journal_core::RiskReward;
    use rust_decimal_macros::dec;

    #[test]
    fn test_header_written_once() {
        let dir = tempfile::tempdir().unwrap();
        let mut ledger = CsvLedger::new(dir.path().join("ledger.csv"));
        let date = NaiveDate::from_ymd_opt(2025, 6, 13).unwrap();

        ledger.append(&PerformanceRecord::empty(date)).unwrap();
        ledger.append(&PerformanceRecord::empty(date)).unwrap();

        let content = fs::read_to_string(ledger.path()).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("date,total_amount_invested"));
        assert_eq!(
            lines[1],
            "13-06-2025,0.000,0.000,0.00,0.000,0.000,0.000,0.000,0.000,0.000,inf,0.000"
        );
    }

    #[test]
    fn test_records_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let mut ledger = CsvLedger::new(dir.path().join("ledger.csv"));
        let mut record = PerformanceRecord::empty(NaiveDate::from_ymd_opt(2025, 6, 13).unwrap());
        record.total_invested = dec!(1250);
        record.avg_loss_abs = dec!(-50);
        record.risk_reward_ratio = RiskReward::Ratio(dec!(4));

        ledger.append(&record).unwrap();
        let records = ledger.records().unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].total_invested, dec!(1250));
        assert_eq!(records[0].avg_loss_abs, dec!(-50));
        assert_eq!(records[0].risk_reward_ratio, RiskReward::Ratio(dec!(4)));
    }

    #[test]
    fn test_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let ledger = CsvLedger::new(dir.path().join("none.csv"));
        assert!(ledger.is_empty().unwrap());
    }
}
