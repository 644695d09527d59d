//! 청산 거래 생성 명령.
//!
//! 당일 체결 CSV와 보유 종목 CSV를 읽어 매도 체결을 종목별로 묶고,
//! 보유 종목의 평균 매입가와 짝지어 청산 거래 CSV를 씁니다.

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use std::time::Instant;
use tracing::{info, warn};

use journal_analytics::{holdings_by_symbol, match_closed_trades_detailed};
use journal_core::{AppConfig, BuyPrice, ClosedTrade, Holding, Trade};
use journal_data::{read_table, write_table, DailyFiles};

use crate::stats::RunStats;

/// 청산 거래 생성 결과.
#[derive(Debug)]
pub struct ClosedTradesOutcome {
    /// 생성된 청산 거래 (첫 등장 종목 순)
    pub closed: Vec<ClosedTrade>,
    /// 실행 통계
    pub stats: RunStats,
}

/// 저장된 일별 CSV로 청산 거래를 만들고 `closed_trades_{날짜}.csv`에 씁니다.
///
/// 체결 파일이나 보유 종목 파일이 없으면 에러를 반환합니다.
pub fn generate_closed_trades(config: &AppConfig, date: NaiveDate) -> Result<ClosedTradesOutcome> {
    let started = Instant::now();
    let files = DailyFiles::new(&config.paths, date);
    let date_format = &config.paths.row_date_format;

    for path in [files.trades(), files.holdings()] {
        if !path.exists() {
            bail!(
                "Trades or holdings file not found: {} (run `journal daily` first)",
                path.display()
            );
        }
    }

    let mut stats = RunStats::new();

    let (trades, trades_report) = read_table::<Trade>(files.trades(), date_format)
        .with_context(|| format!("Failed to read {}", files.trades().display()))?;
    stats.record_read(&trades_report);

    let (holdings, holdings_report) = read_table::<Holding>(files.holdings(), date_format)
        .with_context(|| format!("Failed to read {}", files.holdings().display()))?;
    stats.record_read(&holdings_report);

    let index = holdings_by_symbol(&holdings);
    let matching = match_closed_trades_detailed(&trades, &index, date);
    stats.skipped += matching.skipped;
    let closed = matching.closed;

    let unmatched = closed
        .iter()
        .filter(|c| c.avg_buy_price == BuyPrice::Unavailable)
        .count();
    if unmatched > 0 {
        warn!(unmatched, "Sold symbols without a holding, buy price written as N/A");
    }

    stats.emitted = write_table(files.closed_trades(), &closed, date_format)
        .with_context(|| format!("Failed to write {}", files.closed_trades().display()))?;
    stats.elapsed = started.elapsed();

    info!(
        file = %files.closed_trades().display(),
        closed = closed.len(),
        "Closed trades written"
    );

    Ok(ClosedTradesOutcome { closed, stats })
}
