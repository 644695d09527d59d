//! 보유 종목 테이블.

use serde::Deserialize;

use journal_core::{parse_decimal, parse_row_date, Holding, RowError};

use super::TableRecord;

/// 보유 종목 테이블 헤더.
pub const HOLDINGS_HEADER: &[&str] = &[
    "date",
    "tradingsymbol",
    "quantity",
    "average_price",
    "last_price",
    "pnl",
    "product",
    "exchange",
];

/// 보유 종목 테이블 원시 행.
#[derive(Debug, Deserialize)]
pub struct RawHoldingRow {
    #[serde(default)]
    date: String,
    #[serde(default)]
    tradingsymbol: String,
    #[serde(default)]
    quantity: String,
    #[serde(default)]
    average_price: String,
    #[serde(default)]
    last_price: String,
    #[serde(default)]
    pnl: String,
    #[serde(default)]
    product: String,
    #[serde(default)]
    exchange: String,
}

impl TableRecord for Holding {
    const HEADER: &'static [&'static str] = HOLDINGS_HEADER;
    type Raw = RawHoldingRow;

    fn from_raw(raw: RawHoldingRow, date_format: &str) -> Result<Self, RowError> {
        if raw.tradingsymbol.is_empty() {
            return Err(RowError::MissingField("tradingsymbol"));
        }

        Ok(Holding {
            quantity: parse_decimal("quantity", &raw.quantity)?,
            average_price: parse_decimal("average_price", &raw.average_price)?,
            last_price: parse_decimal("last_price", &raw.last_price)?,
            pnl: parse_decimal("pnl", &raw.pnl)?,
            date: parse_row_date(&raw.date, date_format)?,
            symbol: raw.tradingsymbol,
            product: raw.product,
            exchange: raw.exchange,
        })
    }

    fn to_row(&self, date_format: &str) -> Vec<String> {
        vec![
            self.date.format(date_format).to_string(),
            self.symbol.clone(),
            self.quantity.normalize().to_string(),
            self.average_price.normalize().to_string(),
            self.last_price.normalize().to_string(),
            self.pnl.normalize().to_string(),
            self.product.clone(),
            self.exchange.clone(),
        ]
    }
}
