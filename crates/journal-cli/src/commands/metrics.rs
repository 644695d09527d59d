//! 성과 집계 명령.

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use std::path::{Path, PathBuf};
use std::time::Instant;

use journal_analytics::{aggregate_detailed, TradeCounts};
use journal_core::{AppConfig, ClosedTrade, PerformanceRecord};
use journal_data::{append_record, read_table, DailyFiles, PerformanceLedger};

use crate::stats::RunStats;

/// 성과 집계 결과.
#[derive(Debug)]
pub struct MetricsOutcome {
    /// 원장에 추가된 기록
    pub record: PerformanceRecord,
    /// 거래 분류 결과
    pub counts: TradeCounts,
    /// 추가 후 원장 행 수 (다시 읽지 못하면 `None`)
    pub ledger_rows: Option<usize>,
    /// 실행 통계
    pub stats: RunStats,
}

/// 입력 파일 경로를 결정합니다. 지정하지 않으면 당일 청산 거래 파일입니다.
pub fn metrics_input(config: &AppConfig, date: NaiveDate, input: Option<&Path>) -> PathBuf {
    match input {
        Some(path) => path.to_path_buf(),
        None => DailyFiles::new(&config.paths, date).closed_trades(),
    }
}

/// 청산 거래 CSV를 집계하여 원장에 한 행을 추가합니다.
///
/// 기록 날짜는 실행 날짜(`date`)이며, 같은 날짜로 다시 실행하면 행이 하나 더 추가됩니다.
pub fn run_metrics(
    config: &AppConfig,
    date: NaiveDate,
    input: Option<&Path>,
    ledger: &mut dyn PerformanceLedger,
) -> Result<MetricsOutcome> {
    let started = Instant::now();
    let path = metrics_input(config, date, input);

    if !path.exists() {
        bail!("File not found: {}", path.display());
    }

    let (closed, report) = read_table::<ClosedTrade>(&path, &config.paths.row_date_format)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let aggregation = aggregate_detailed(&closed, date);
    let ledger_rows = append_record(ledger, &aggregation.record)
        .context("Failed to append to the performance ledger")?;

    let mut stats = RunStats::new();
    stats.record_read(&report);
    stats.skipped += aggregation.counts.skipped;
    stats.emitted = 1;
    stats.elapsed = started.elapsed();

    Ok(MetricsOutcome {
        record: aggregation.record,
        counts: aggregation.counts,
        ledger_rows,
        stats,
    })
}
