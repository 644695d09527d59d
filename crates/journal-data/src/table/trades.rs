//! 체결 테이블.

use rust_decimal::Decimal;
use serde::Deserialize;

use journal_core::{parse_decimal, parse_row_date, RowError, Trade, TransactionType};

use super::TableRecord;

/// 체결 테이블 헤더.
pub const TRADES_HEADER: &[&str] = &[
    "date",
    "tradingsymbol",
    "transaction_type",
    "average_price",
    "quantity",
];

/// 체결 테이블 원시 행.
#[derive(Debug, Deserialize)]
pub struct RawTradeRow {
    #[serde(default)]
    date: String,
    #[serde(default)]
    tradingsymbol: String,
    #[serde(default)]
    transaction_type: String,
    #[serde(default)]
    average_price: String,
    #[serde(default)]
    quantity: String,
}

impl TableRecord for Trade {
    const HEADER: &'static [&'static str] = TRADES_HEADER;
    type Raw = RawTradeRow;

    fn from_raw(raw: RawTradeRow, date_format: &str) -> Result<Self, RowError> {
        if raw.tradingsymbol.is_empty() {
            return Err(RowError::MissingField("tradingsymbol"));
        }

        let transaction_type: TransactionType = raw.transaction_type.parse()?;
        let price = parse_decimal("average_price", &raw.average_price)?;
        let quantity = parse_decimal("quantity", &raw.quantity)?;
        if quantity <= Decimal::ZERO {
            return Err(RowError::InvalidNumber {
                field: "quantity",
                value: raw.quantity,
            });
        }
        let date = parse_row_date(&raw.date, date_format)?;

        Ok(Trade::new(raw.tradingsymbol, transaction_type, price, quantity, date))
    }

    fn to_row(&self, date_format: &str) -> Vec<String> {
        vec![
            self.date.format(date_format).to_string(),
            self.symbol.clone(),
            self.transaction_type.to_string(),
            self.price.normalize().to_string(),
            self.quantity.normalize().to_string(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use journal_core::DEFAULT_ROW_DATE_FORMAT;
    use rust_decimal_macros::dec;

    fn raw(symbol: &str, side: &str, price: &str, qty: &str) -> RawTradeRow {
        RawTradeRow {
            date: "13-06-2025".to_string(),
            tradingsymbol: symbol.to_string(),
            transaction_type: side.to_string(),
            average_price: price.to_string(),
            quantity: qty.to_string(),
        }
    }

    #[test]
    fn test_from_raw() {
        let trade = Trade::from_raw(raw("INFY", "SELL", "1550.5", "4"), DEFAULT_ROW_DATE_FORMAT)
            .unwrap();

        assert!(trade.is_sell());
        assert_eq!(trade.price, dec!(1550.5));
        assert_eq!(trade.date, NaiveDate::from_ymd_opt(2025, 6, 13).unwrap());
    }

    #[test]
    fn test_from_raw_rejects_bad_rows() {
        assert_eq!(
            Trade::from_raw(raw("INFY", "SELL", "abc", "4"), DEFAULT_ROW_DATE_FORMAT),
            Err(RowError::InvalidNumber {
                field: "average_price",
                value: "abc".to_string()
            })
        );
        assert!(matches!(
            Trade::from_raw(raw("INFY", "HOLD", "1", "4"), DEFAULT_ROW_DATE_FORMAT),
            Err(RowError::UnknownTransactionType(_))
        ));
        assert_eq!(
            Trade::from_raw(raw("", "BUY", "1", "4"), DEFAULT_ROW_DATE_FORMAT),
            Err(RowError::MissingField("tradingsymbol"))
        );
        assert!(Trade::from_raw(raw("INFY", "BUY", "1", "0"), DEFAULT_ROW_DATE_FORMAT).is_err());
    }

    #[test]
    fn test_to_row() {
        let trade = Trade::new(
            "TCS",
            TransactionType::Buy,
            dec!(3400.50),
            dec!(2),
            NaiveDate::from_ymd_opt(2025, 6, 13).unwrap(),
        );

        assert_eq!(
            trade.to_row(DEFAULT_ROW_DATE_FORMAT),
            vec!["13-06-2025", "TCS", "BUY", "3400.5", "2"]
        );
    }
}
