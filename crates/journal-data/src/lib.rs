//! 일별 테이블 및 성과 원장 입출력.
//!
//! 이 crate는 다음을 제공합니다:
//! - 체결/보유 종목/청산 거래 CSV 테이블 읽기·쓰기 (잘못된 행은 건너뛰고 집계)
//! - 추가 전용 성과 원장 (`PerformanceLedger`) 및 CSV/메모리 구현
//! - 날짜별 파일명 규칙 (`DailyFiles`)

pub mod error;
pub mod files;
pub mod ledger;
pub mod table;

pub use error::{DataError, DataResult};
pub use files::DailyFiles;
pub use ledger::{append_record, CsvLedger, MemoryLedger, PerformanceLedger};
pub use table::{
    read_table, table_rows, write_table, TableRecord, TableReport, CLOSED_TRADES_HEADER,
    HOLDINGS_HEADER, TRADES_HEADER,
};
