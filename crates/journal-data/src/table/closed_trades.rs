//! 청산 거래 테이블.
//!
//! 가격은 소수점 2자리로 기록하며, 매입가를 알 수 없으면 `N/A`로 기록합니다.

use rust_decimal::Decimal;
use serde::Deserialize;

use journal_core::{
    parse_decimal, parse_row_date, BuyPrice, ClosedTrade, DecimalExt, RowError, PRICE_DP,
};

use super::TableRecord;

/// 청산 거래 테이블 헤더.
pub const CLOSED_TRADES_HEADER: &[&str] = &[
    "date",
    "tradingsymbol",
    "avg_buy_price",
    "avg_sell_price",
    "quantity",
];

/// 청산 거래 테이블 원시 행.
#[derive(Debug, Deserialize)]
pub struct RawClosedTradeRow {
    #[serde(default)]
    date: String,
    #[serde(default)]
    tradingsymbol: String,
    #[serde(default)]
    avg_buy_price: String,
    #[serde(default)]
    avg_sell_price: String,
    #[serde(default)]
    quantity: String,
}

impl TableRecord for ClosedTrade {
    const HEADER: &'static [&'static str] = CLOSED_TRADES_HEADER;
    type Raw = RawClosedTradeRow;

    fn from_raw(raw: RawClosedTradeRow, date_format: &str) -> Result<Self, RowError> {
        if raw.tradingsymbol.is_empty() {
            return Err(RowError::MissingField("tradingsymbol"));
        }

        let avg_buy_price = BuyPrice::parse(&raw.avg_buy_price)?;
        let avg_sell_price = parse_decimal("avg_sell_price", &raw.avg_sell_price)?;
        let quantity = parse_decimal("quantity", &raw.quantity)?;
        if quantity <= Decimal::ZERO {
            return Err(RowError::InvalidNumber {
                field: "quantity",
                value: raw.quantity,
            });
        }
        let date = parse_row_date(&raw.date, date_format)?;

        Ok(ClosedTrade::new(
            raw.tradingsymbol,
            avg_buy_price,
            avg_sell_price,
            quantity,
            date,
        ))
    }

    fn to_row(&self, date_format: &str) -> Vec<String> {
        vec![
            self.date.format(date_format).to_string(),
            self.symbol.clone(),
            self.avg_buy_price.to_field(),
            self.avg_sell_price.to_fixed(PRICE_DP),
            self.quantity.normalize().to_string(),
        ]
    }
}
