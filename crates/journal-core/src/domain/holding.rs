//! 보유 종목 스냅샷.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{Price, Quantity};

/// 브로커가 보고한 보유 종목 상태.
///
/// 조회 시점의 스냅샷이며, 매 조회마다 통째로 덮어씁니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Holding {
    /// 종목 심볼
    pub symbol: String,
    /// 보유 수량
    pub quantity: Quantity,
    /// 평균 매입가
    pub average_price: Price,
    /// 최근 체결가
    pub last_price: Price,
    /// 평가 손익
    pub pnl: Decimal,
    /// 상품 유형 (예: "CNC")
    pub product: String,
    /// 거래소 (예: "NSE")
    pub exchange: String,
    /// 스냅샷 날짜
    pub date: NaiveDate,
}

impl Holding {
    /// 평균 매입가 기준 투자 원금. `Decimal` 범위를 넘으면 `None`.
    pub fn cost_value(&self) -> Option<Decimal> {
        self.average_price.checked_mul(self.quantity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_holding_values() {
        let holding = Holding {
            symbol: "TCS".to_string(),
            quantity: dec!(3),
            average_price: dec!(3400),
            last_price: dec!(3500),
            pnl: dec!(300),
            product: "CNC".to_string(),
            exchange: "NSE".to_string(),
            date: NaiveDate::from_ymd_opt(2025, 6, 13).unwrap(),
        };

        assert_eq!(holding.cost_value(), Some(dec!(10200)));

        let huge = Holding {
            quantity: dec!(10000000000),
            average_price: dec!(100000000000000000000),
            ..holding
        };
        assert_eq!(huge.cost_value(), None);
    }
}
