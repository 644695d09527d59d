//! 일별 수집 명령.
//!
//! 1. 브로커에서 당일 체결과 보유 종목 조회
//! 2. `trades_{날짜}.csv`, `holdings_{날짜}.csv` 저장
//! 3. 체결은 누적 추가, 보유 종목은 덮어쓰기로 업로드
//! 4. 청산 거래 생성 후 헤더 포함 덮어쓰기로 업로드

use anyhow::{Context, Result};
use chrono::NaiveDate;
use std::time::Instant;
use tracing::{info, warn};

use journal_core::AppConfig;
use journal_data::{table_rows, write_table, DailyFiles};
use journal_exchange::{BrokerProvider, ExchangeError};
use journal_sheets::{SheetUploader, UploadMode};

use super::closed_trades::generate_closed_trades;
use crate::stats::RunStats;

/// 일별 수집을 실행합니다.
///
/// 브로커나 업로드 실패는 그대로 에러로 전파되며 재시도하지 않습니다.
pub async fn run_daily(
    config: &AppConfig,
    date: NaiveDate,
    broker: &dyn BrokerProvider,
    uploader: &dyn SheetUploader,
) -> Result<RunStats> {
    let started = Instant::now();
    let files = DailyFiles::new(&config.paths, date);
    let date_format = &config.paths.row_date_format;
    let tabs = &config.sheets;
    let mut stats = RunStats::new();

    info!(broker = broker.broker_name(), uploader = uploader.name(), "Fetching daily data");

    let trades = broker
        .fetch_trades(date)
        .await
        .map_err(|e| broker_error(e, "trades"))?;
    let holdings = broker
        .fetch_holdings(date)
        .await
        .map_err(|e| broker_error(e, "holdings"))?;
    stats.rows_read += trades.len() + holdings.len();

    files.ensure_dir()?;
    stats.emitted += write_table(files.trades(), &trades, date_format)
        .with_context(|| format!("Failed to write {}", files.trades().display()))?;
    stats.emitted += write_table(files.holdings(), &holdings, date_format)
        .with_context(|| format!("Failed to write {}", files.holdings().display()))?;

    info!(
        trades = trades.len(),
        holdings = holdings.len(),
        stamp = files.stamp(),
        "Daily tables saved"
    );

    stats.uploaded += uploader
        .upload(
            &tabs.trades_tab,
            &table_rows(&trades, date_format, false),
            UploadMode::Append,
        )
        .await
        .with_context(|| format!("Failed to upload to tab '{}'", tabs.trades_tab))?;

    stats.uploaded += uploader
        .upload(
            &tabs.holdings_tab,
            &table_rows(&holdings, date_format, false),
            UploadMode::Replace,
        )
        .await
        .with_context(|| format!("Failed to upload to tab '{}'", tabs.holdings_tab))?;

    let outcome = generate_closed_trades(config, date)?;
    stats.merge(&outcome.stats);

    stats.uploaded += uploader
        .upload(
            &tabs.closed_trades_tab,
            &table_rows(&outcome.closed, date_format, true),
            UploadMode::Replace,
        )
        .await
        .with_context(|| format!("Failed to upload to tab '{}'", tabs.closed_trades_tab))?;

    stats.elapsed = started.elapsed();
    Ok(stats)
}

fn broker_error(err: ExchangeError, what: &str) -> anyhow::Error {
    if err.is_auth_error() {
        warn!(error = %err, "Access token rejected, run `journal login` to get a new one");
    }
    anyhow::Error::new(err).context(format!("Failed to fetch {}", what))
}
