//! 체결 기록.
//!
//! 브로커가 보고한 당일 체결 내역 한 건을 나타냅니다.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::RowError;
use crate::types::{Price, Quantity};

/// 거래 유형 (매수/매도).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionType {
    /// 매수
    Buy,
    /// 매도
    Sell,
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionType::Buy => write!(f, "BUY"),
            TransactionType::Sell => write!(f, "SELL"),
        }
    }
}

impl FromStr for TransactionType {
    type Err = RowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "BUY" => Ok(TransactionType::Buy),
            "SELL" => Ok(TransactionType::Sell),
            other => Err(RowError::UnknownTransactionType(other.to_string())),
        }
    }
}

/// 체결 기록. 기록된 이후에는 변경되지 않습니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    /// 종목 심볼 (예: "INFY")
    pub symbol: String,
    /// 거래 유형
    pub transaction_type: TransactionType,
    /// 체결 단가
    pub price: Price,
    /// 체결 수량
    pub quantity: Quantity,
    /// 기록 날짜
    pub date: NaiveDate,
}

impl Trade {
    /// 새 체결 기록을 생성합니다.
    pub fn new(
        symbol: impl Into<String>,
        transaction_type: TransactionType,
        price: Price,
        quantity: Quantity,
        date: NaiveDate,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            transaction_type,
            price,
            quantity,
            date,
        }
    }

    /// 매도 체결인지 확인합니다.
    pub fn is_sell(&self) -> bool {
        self.transaction_type == TransactionType::Sell
    }

    /// 체결 금액 (단가 × 수량). `Decimal` 범위를 넘으면 `None`.
    pub fn notional(&self) -> Option<Decimal> {
        self.price.checked_mul(self.quantity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_transaction_type_parse() {
        assert_eq!("SELL".parse::<TransactionType>().unwrap(), TransactionType::Sell);
        assert_eq!(" buy ".parse::<TransactionType>().unwrap(), TransactionType::Buy);
        assert_eq!(
            "SHORT".parse::<TransactionType>(),
            Err(RowError::UnknownTransactionType("SHORT".to_string()))
        );
        assert_eq!(TransactionType::Sell.to_string(), "SELL");
    }

    #[test]
    fn test_trade_notional() {
        let date = NaiveDate::from_ymd_opt(2025, 6, 13).unwrap();
        let trade = Trade::new("INFY", TransactionType::Sell, dec!(1520.5), dec!(4), date);

        assert!(trade.is_sell());
        assert_eq!(trade.notional(), Some(dec!(6082.0)));
    }

    #[test]
    fn test_trade_notional_overflow_is_none() {
        let date = NaiveDate::from_ymd_opt(2025, 6, 13).unwrap();
        let trade = Trade::new(
            "BIG",
            TransactionType::Sell,
            dec!(100000000000000000000),
            dec!(10000000000),
            date,
        );

        assert_eq!(trade.notional(), None);
    }
}
