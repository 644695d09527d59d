//! 성과 원장.
//!
//! 원장은 집계 실행 한 번당 한 행씩 추가되는 추가 전용 로그입니다.
//! 같은 날짜로 여러 번 실행해도 중복 제거 없이 모두 기록됩니다.
//! 쓰기는 단일 작성자만 허용되며 (`&mut self`), 동시 실행 직렬화는 호출자 책임입니다.

mod csv_ledger;
mod memory;

pub use csv_ledger::CsvLedger;
pub use memory::MemoryLedger;

use tracing::{info, warn};

use journal_core::PerformanceRecord;

use crate::error::DataResult;

/// 추가 전용 성과 원장.
pub trait PerformanceLedger {
    /// 기록 하나를 원장 끝에 추가합니다.
    fn append(&mut self, record: &PerformanceRecord) -> DataResult<()>;

    /// 원장의 모든 기록을 추가된 순서대로 반환합니다.
    fn records(&self) -> DataResult<Vec<PerformanceRecord>>;

    /// 원장의 기록 수.
    fn len(&self) -> DataResult<usize> {
        Ok(self.records()?.len())
    }

    /// 원장이 비어 있는지 확인합니다.
    fn is_empty(&self) -> DataResult<bool> {
        Ok(self.len()? == 0)
    }
}

/// 기록을 원장에 추가하고 추가 후 원장 길이를 반환합니다.
///
/// 추가가 끝난 뒤 길이를 다시 읽지 못하면 경고만 남기고 `None`을 반환합니다.
/// 행은 이미 기록되었으므로 에러로 보고하면 재실행 시 같은 행이 중복됩니다.
pub fn append_record<L: PerformanceLedger + ?Sized>(
    ledger: &mut L,
    record: &PerformanceRecord,
) -> DataResult<Option<usize>> {
    ledger.append(record)?;

    let len = match ledger.len() {
        Ok(len) => Some(len),
        Err(e) => {
            warn!(error = %e, "Record appended but ledger length could not be read back");
            None
        }
    };

    info!(
        date = %record.date,
        total_pnl = %record.total_pnl_amount,
        risk_reward = %record.risk_reward_ratio,
        ledger_rows = ?len,
        "Appended performance record"
    );

    Ok(len)
}
