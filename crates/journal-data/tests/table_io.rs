//! CSV 테이블 및 원장 파일 통합 테스트.

use chrono::NaiveDate;
use rust_decimal_macros::dec;
use std::fs;

use journal_core::{
    BuyPrice, ClosedTrade, Holding, PerformanceRecord, Trade, TransactionType,
    DEFAULT_ROW_DATE_FORMAT,
};
use journal_data::{
    read_table, table_rows, write_table, CsvLedger, DailyFiles, DataError, PerformanceLedger,
};

fn day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 13).unwrap()
}

#[test]
fn test_malformed_trade_rows_are_skipped_and_counted() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("trades_130625.csv");
    fs::write(
        &path,
        "date,tradingsymbol,transaction_type,average_price,quantity\n\
         13-06-2025,INFY,SELL,1550,4\n\
         13-06-2025,TCS,SELL,n/a,1\n\
         13-06-2025,SBIN,BUY,800,10\n\
         not-a-date,ITC,SELL,400,1\n",
    )
    .unwrap();

    let (trades, report) = read_table::<Trade>(&path, DEFAULT_ROW_DATE_FORMAT).unwrap();

    assert_eq!(report.rows_read, 4);
    assert_eq!(report.skipped, 2);
    assert_eq!(report.accepted(), 2);
    assert_eq!(trades[0].symbol, "INFY");
    assert_eq!(trades[1].transaction_type, TransactionType::Buy);
}

#[test]
fn test_missing_column_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("holdings.csv");
    fs::write(&path, "date,tradingsymbol,quantity\n13-06-2025,INFY,3\n").unwrap();

    let err = read_table::<Holding>(&path, DEFAULT_ROW_DATE_FORMAT).unwrap_err();

    assert!(matches!(
        err,
        DataError::MissingColumn {
            column: "average_price",
            ..
        }
    ));
}

#[test]
fn test_missing_file_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let err = read_table::<Trade>(dir.path().join("nope.csv"), DEFAULT_ROW_DATE_FORMAT)
        .unwrap_err();
    assert!(matches!(err, DataError::NotFound(_)));
}

#[test]
fn test_holdings_write_then_read() {
    let dir = tempfile::tempdir().unwrap();
    let files = DailyFiles::in_dir(dir.path(), day(), "%d%m%y");
    let holdings = vec![Holding {
        symbol: "INFY".to_string(),
        quantity: dec!(12),
        average_price: dec!(1480.35),
        last_price: dec!(1552.1),
        pnl: dec!(861),
        product: "CNC".to_string(),
        exchange: "NSE".to_string(),
        date: day(),
    }];

    write_table(files.holdings(), &holdings, DEFAULT_ROW_DATE_FORMAT).unwrap();
    let (read, report) = read_table::<Holding>(files.holdings(), DEFAULT_ROW_DATE_FORMAT).unwrap();

    assert_eq!(report.skipped, 0);
    assert_eq!(read, holdings);
}

#[test]
fn test_closed_trades_file_layout() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("closed_trades_130625.csv");
    let closed = vec![
        ClosedTrade::new("INFY", BuyPrice::Available(dec!(1500)), dec!(1556), dec!(10), day()),
        ClosedTrade::new("ZOMATO", BuyPrice::Unavailable, dec!(180.456), dec!(20), day()),
    ];

    write_table(&path, &closed, DEFAULT_ROW_DATE_FORMAT).unwrap();

    let content = fs::read_to_string(&path).unwrap();
    assert_eq!(
        content,
        "date,tradingsymbol,avg_buy_price,avg_sell_price,quantity\n\
         13-06-2025,INFY,1500.00,1556.00,10\n\
         13-06-2025,ZOMATO,N/A,180.46,20\n"
    );

    let (read, report) = read_table::<ClosedTrade>(&path, DEFAULT_ROW_DATE_FORMAT).unwrap();
    assert_eq!(report.skipped, 0);
    assert_eq!(read[1].avg_buy_price, BuyPrice::Unavailable);
}

#[test]
fn test_table_rows_for_upload() {
    let trades = vec![Trade::new("INFY", TransactionType::Sell, dec!(1550), dec!(4), day())];

    let with_header = table_rows(&trades, DEFAULT_ROW_DATE_FORMAT, true);
    let without_header = table_rows(&trades, DEFAULT_ROW_DATE_FORMAT, false);

    assert_eq!(with_header.len(), 2);
    assert_eq!(with_header[0][1], "tradingsymbol");
    assert_eq!(without_header, vec![vec!["13-06-2025", "INFY", "SELL", "1550", "4"]]);
}

#[test]
fn test_ledger_keeps_every_append_with_single_header() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("performance_summary_by_date.csv");
    let dates = [day(), day(), NaiveDate::from_ymd_opt(2025, 6, 16).unwrap(), day()];

    let mut ledger = CsvLedger::new(&path);
    for date in dates {
        ledger.append(&PerformanceRecord::empty(date)).unwrap();
    }

    let content = fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), dates.len() + 1);
    assert_eq!(lines.iter().filter(|l| l.starts_with("date,")).count(), 1);

    let read_dates: Vec<NaiveDate> = ledger.records().unwrap().iter().map(|r| r.date).collect();
    assert_eq!(read_dates, dates.to_vec());
}
