//! 일별 수집부터 성과 원장까지의 통합 테스트.

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::fs;
use std::sync::Mutex;

use journal_cli::{generate_closed_trades, run_daily, run_metrics};
use journal_core::{AppConfig, BuyPrice, Holding, Trade, TransactionType};
use journal_data::{DailyFiles, MemoryLedger, PerformanceLedger};
use journal_exchange::{BrokerProvider, ExchangeError, ExchangeResult};
use journal_sheets::{SheetUploader, SheetsResult, UploadMode};

fn day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 13).unwrap()
}

fn config_in(dir: &tempfile::TempDir) -> AppConfig {
    let mut config = AppConfig::default();
    config.paths.data_dir = dir.path().to_path_buf();
    config.sheets.enabled = false;
    config
}

fn holding(symbol: &str, quantity: Decimal, avg: Decimal) -> Holding {
    Holding {
        symbol: symbol.to_string(),
        quantity,
        average_price: avg,
        last_price: avg,
        pnl: Decimal::ZERO,
        product: "CNC".to_string(),
        exchange: "NSE".to_string(),
        date: day(),
    }
}

struct FakeBroker {
    fail: bool,
}

#[async_trait]
impl BrokerProvider for FakeBroker {
    async fn fetch_trades(&self, as_of: NaiveDate) -> ExchangeResult<Vec<Trade>> {
        if self.fail {
            return Err(ExchangeError::Unauthorized("Incorrect api_key or access_token".into()));
        }
        Ok(vec![
            Trade::new("INFY", TransactionType::Sell, dec!(1600), dec!(4), as_of),
            Trade::new("INFY", TransactionType::Buy, dec!(1500), dec!(2), as_of),
            Trade::new("TCS", TransactionType::Sell, dec!(3300), dec!(2), as_of),
            Trade::new("INFY", TransactionType::Sell, dec!(1600), dec!(6), as_of),
            Trade::new("HDFC", TransactionType::Sell, dec!(1700), dec!(1), as_of),
        ])
    }

    async fn fetch_holdings(&self, as_of: NaiveDate) -> ExchangeResult<Vec<Holding>> {
        let mut holdings = vec![
            holding("INFY", dec!(5), dec!(1500)),
            holding("TCS", dec!(3), dec!(3400)),
        ];
        for h in &mut holdings {
            h.date = as_of;
        }
        Ok(holdings)
    }

    fn broker_name(&self) -> &str {
        "fake"
    }
}

#[derive(Default)]
struct RecordingUploader {
    calls: Mutex<Vec<(String, Vec<Vec<String>>, UploadMode)>>,
}

#[async_trait]
impl SheetUploader for RecordingUploader {
    async fn upload(
        &self,
        tab: &str,
        rows: &[Vec<String>],
        mode: UploadMode,
    ) -> SheetsResult<usize> {
        self.calls
            .lock()
            .unwrap()
            .push((tab.to_string(), rows.to_vec(), mode));
        Ok(rows.len())
    }

    fn is_enabled(&self) -> bool {
        true
    }

    fn name(&self) -> &str {
        "recording"
    }
}

#[tokio::test]
async fn test_daily_writes_tables_and_uploads_in_order() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(&dir);
    let uploader = RecordingUploader::default();

    let stats = run_daily(&config, day(), &FakeBroker { fail: false }, &uploader)
        .await
        .unwrap();

    let files = DailyFiles::new(&config.paths, day());
    assert!(files.trades().exists());
    assert!(files.holdings().exists());

    let closed_csv = fs::read_to_string(files.closed_trades()).unwrap();
    assert_eq!(
        closed_csv,
        "date,tradingsymbol,avg_buy_price,avg_sell_price,quantity\n\
         13-06-2025,INFY,1500.00,1600.00,10\n\
         13-06-2025,TCS,3400.00,3300.00,2\n\
         13-06-2025,HDFC,N/A,1700.00,1\n"
    );

    let calls = uploader.calls.lock().unwrap();
    let tabs: Vec<(&str, UploadMode)> = calls.iter().map(|(t, _, m)| (t.as_str(), *m)).collect();
    assert_eq!(
        tabs,
        vec![
            ("Trades", UploadMode::Append),
            ("Holdings", UploadMode::Replace),
            ("Closed Trades", UploadMode::Replace),
        ]
    );

    // 체결/보유 종목은 헤더 없이, 청산 거래는 헤더 포함
    assert_eq!(calls[0].1.len(), 5);
    assert_eq!(calls[0].1[0][1], "INFY");
    assert_eq!(calls[1].1.len(), 2);
    assert_eq!(calls[2].1.len(), 4);
    assert_eq!(calls[2].1[0][0], "date");

    assert_eq!(stats.uploaded, 11);
    assert_eq!(stats.skipped, 0);
}

#[tokio::test]
async fn test_daily_propagates_broker_failure() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(&dir);
    let uploader = RecordingUploader::default();

    let err = run_daily(&config, day(), &FakeBroker { fail: true }, &uploader)
        .await
        .unwrap_err();

    assert!(err.to_string().contains("Failed to fetch trades"));
    assert!(uploader.calls.lock().unwrap().is_empty());
    assert!(!DailyFiles::new(&config.paths, day()).trades().exists());
}

#[test]
fn test_closed_trades_requires_both_input_files() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(&dir);
    let files = DailyFiles::new(&config.paths, day());

    fs::write(
        files.trades(),
        "date,tradingsymbol,transaction_type,average_price,quantity\n",
    )
    .unwrap();

    let err = generate_closed_trades(&config, day()).unwrap_err();
    assert!(err.to_string().contains("holdings_130625.csv"));
}

#[test]
fn test_closed_trades_skips_malformed_rows() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(&dir);
    let files = DailyFiles::new(&config.paths, day());

    fs::write(
        files.trades(),
        "date,tradingsymbol,transaction_type,average_price,quantity\n\
         13-06-2025,INFY,SELL,1600,10\n\
         13-06-2025,TCS,SELL,abc,2\n",
    )
    .unwrap();
    fs::write(
        files.holdings(),
        "date,tradingsymbol,quantity,average_price,last_price,pnl,product,exchange\n\
         13-06-2025,INFY,5,1500,1610,550,CNC,NSE\n",
    )
    .unwrap();

    let outcome = generate_closed_trades(&config, day()).unwrap();

    assert_eq!(outcome.closed.len(), 1);
    assert_eq!(outcome.closed[0].avg_buy_price, BuyPrice::Available(dec!(1500)));
    assert_eq!(outcome.stats.rows_read, 3);
    assert_eq!(outcome.stats.skipped, 1);
    assert_eq!(outcome.stats.emitted, 1);
}

#[tokio::test]
async fn test_daily_then_metrics_appends_one_ledger_row() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(&dir);

    run_daily(
        &config,
        day(),
        &FakeBroker { fail: false },
        &RecordingUploader::default(),
    )
    .await
    .unwrap();

    let mut ledger = MemoryLedger::default();
    let outcome = run_metrics(&config, day(), None, &mut ledger).unwrap();

    assert_eq!(outcome.counts.total, 2);
    assert_eq!(outcome.counts.winning, 1);
    assert_eq!(outcome.counts.losing, 1);
    assert_eq!(outcome.counts.skipped, 1);
    assert_eq!(outcome.record.total_invested, dec!(21800));
    assert_eq!(outcome.record.total_pnl_amount, dec!(800));
    assert_eq!(outcome.record.date, day());
    assert_eq!(outcome.ledger_rows, Some(1));
    assert_eq!(outcome.stats.skipped, 1);

    // 같은 날짜로 다시 실행하면 한 행 더 추가
    let again = run_metrics(&config, day(), None, &mut ledger).unwrap();
    assert_eq!(again.ledger_rows, Some(2));
    assert_eq!(ledger.records().unwrap()[0], ledger.records().unwrap()[1]);
}

#[test]
fn test_metrics_missing_input_is_error() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(&dir);
    let mut ledger = MemoryLedger::default();

    let missing = dir.path().join("closed_trades_010125.csv");
    let err = run_metrics(&config, day(), Some(&missing), &mut ledger).unwrap_err();

    assert!(err.to_string().starts_with("File not found"));
    assert!(ledger.is_empty().unwrap());
}
