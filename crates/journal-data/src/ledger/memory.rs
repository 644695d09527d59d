//! 메모리 원장.

use journal_core::PerformanceRecord;

use super::PerformanceLedger;
use crate::error::DataResult;

/// 메모리에만 유지되는 원장. 테스트 및 드라이런용입니다.
#[derive(Debug, Clone, Default)]
pub struct MemoryLedger {
    records: Vec<PerformanceRecord>,
}

impl MemoryLedger {
    /// 빈 원장을 생성합니다.
    pub fn new() -> Self {
        Self::default()
    }
}

impl PerformanceLedger for MemoryLedger {
    fn append(&mut self, record: &PerformanceRecord) -> DataResult<()> {
        self.records.push(record.clone());
        Ok(())
    }

    fn records(&self) -> DataResult<Vec<PerformanceRecord>> {
        Ok(self.records.clone())
    }

    fn len(&self) -> DataResult<usize> {
        Ok(self.records.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::append_record;
    use chrono::NaiveDate;

    #[test]
    fn test_append_keeps_order_and_duplicates() {
        let mut ledger = MemoryLedger::new();
        let d1 = NaiveDate::from_ymd_opt(2025, 6, 13).unwrap();
        let d2 = NaiveDate::from_ymd_opt(2025, 6, 14).unwrap();

        append_record(&mut ledger, &PerformanceRecord::empty(d1)).unwrap();
        append_record(&mut ledger, &PerformanceRecord::empty(d2)).unwrap();
        let len = append_record(&mut ledger, &PerformanceRecord::empty(d1)).unwrap();

        assert_eq!(len, Some(3));
        let dates: Vec<NaiveDate> = ledger.records().unwrap().iter().map(|r| r.date).collect();
        assert_eq!(dates, vec![d1, d2, d1]);
    }
}
