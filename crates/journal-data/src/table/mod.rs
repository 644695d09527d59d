//! 일별 CSV 테이블.
//!
//! 각 테이블은 고정 헤더를 가지며, 읽기 시 잘못된 행은 실행을 중단하지 않고
//! 건너뛴 뒤 [`TableReport`]에 집계합니다. 필수 컬럼 자체가 없으면 에러입니다.
//!
//! - [`trades`]: `date, tradingsymbol, transaction_type, average_price, quantity`
//! - [`holdings`]: `date, tradingsymbol, quantity, average_price, last_price, pnl, product, exchange`
//! - [`closed_trades`]: `date, tradingsymbol, avg_buy_price, avg_sell_price, quantity`

pub mod closed_trades;
pub mod holdings;
pub mod report;
pub mod trades;

pub use closed_trades::CLOSED_TRADES_HEADER;
pub use holdings::HOLDINGS_HEADER;
pub use report::TableReport;
pub use trades::TRADES_HEADER;

use serde::de::DeserializeOwned;
use std::fs::File;
use std::io;
use std::path::Path;
use tracing::{debug, warn};

use journal_core::RowError;

use crate::error::{DataError, DataResult};

/// CSV 테이블 한 행으로 표현되는 기록.
pub trait TableRecord: Sized {
    /// 테이블 헤더
    const HEADER: &'static [&'static str];

    /// 검증 전 원시 행
    type Raw: DeserializeOwned;

    /// 원시 행을 검증하여 기록으로 변환합니다.
    fn from_raw(raw: Self::Raw, date_format: &str) -> Result<Self, RowError>;

    /// 기록을 테이블 한 행으로 변환합니다.
    fn to_row(&self, date_format: &str) -> Vec<String>;
}

/// CSV 파일에서 테이블을 읽습니다.
///
/// 잘못된 행은 경고 로그와 함께 건너뛰고 `TableReport.skipped`에 집계합니다.
pub fn read_table<T: TableRecord>(
    path: impl AsRef<Path>,
    date_format: &str,
) -> DataResult<(Vec<T>, TableReport)> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => DataError::NotFound(path.display().to_string()),
        _ => DataError::Io(e),
    })?;

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(file);

    let headers = reader.headers()?.clone();
    for column in T::HEADER {
        if !headers.iter().any(|h| h == *column) {
            return Err(DataError::MissingColumn {
                path: path.display().to_string(),
                column: *column,
            });
        }
    }

    let mut records = Vec::new();
    let mut report = TableReport::default();

    for (index, row) in reader.deserialize::<T::Raw>().enumerate() {
        report.rows_read += 1;
        // 헤더가 1행
        let line = index + 2;

        let parsed = match row {
            Ok(raw) => T::from_raw(raw, date_format).map_err(|e| e.to_string()),
            Err(e) => Err(e.to_string()),
        };

        match parsed {
            Ok(record) => records.push(record),
            Err(reason) => {
                report.skipped += 1;
                warn!(file = %path.display(), line, %reason, "Skipping malformed row");
            }
        }
    }

    debug!(
        file = %path.display(),
        rows_read = report.rows_read,
        skipped = report.skipped,
        "Table loaded"
    );

    Ok((records, report))
}

/// 테이블을 CSV 파일로 씁니다 (헤더 포함, 기존 파일 덮어쓰기).
///
/// 기록한 데이터 행 수를 반환합니다.
pub fn write_table<T: TableRecord>(
    path: impl AsRef<Path>,
    records: &[T],
    date_format: &str,
) -> DataResult<usize> {
    let path = path.as_ref();
    let mut writer = csv::Writer::from_path(path)?;

    writer.write_record(T::HEADER)?;
    for record in records {
        writer.write_record(record.to_row(date_format))?;
    }
    writer.flush()?;

    debug!(file = %path.display(), rows = records.len(), "Table written");
    Ok(records.len())
}

/// 업로드용 2차원 테이블을 만듭니다.
pub fn table_rows<T: TableRecord>(
    records: &[T],
    date_format: &str,
    with_header: bool,
) -> Vec<Vec<String>> {
    let header: Option<Vec<String>> =
        with_header.then(|| T::HEADER.iter().map(|h| h.to_string()).collect());

    header
        .into_iter()
        .chain(records.iter().map(|r| r.to_row(date_format)))
        .collect()
}
