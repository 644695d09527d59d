//! 청산 거래.
//!
//! 매도 체결을 보유 종목의 평균 매입가와 짝지은 결과입니다.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::RowError;
use crate::types::{parse_decimal, DecimalExt, Price, Quantity, PRICE_DP};

/// 매입가를 알 수 없을 때 테이블에 기록되는 표시.
pub const UNAVAILABLE_MARKER: &str = "N/A";

/// 청산 거래의 평균 매입가.
///
/// 매도한 종목이 더 이상 보유 목록에 없으면 (전량 매도 등) 매입가를 알 수 없습니다.
/// 이 경우 0이 아닌 `Unavailable`로 표시하고 손익 집계에서 제외합니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuyPrice {
    /// 보유 종목에서 조회된 평균 매입가
    Available(Price),
    /// 매입가 없음
    Unavailable,
}

impl BuyPrice {
    /// 매입가가 있으면 반환합니다.
    pub fn value(&self) -> Option<Price> {
        match self {
            BuyPrice::Available(price) => Some(*price),
            BuyPrice::Unavailable => None,
        }
    }

    /// 매입가가 있는지 확인합니다.
    pub fn is_available(&self) -> bool {
        matches!(self, BuyPrice::Available(_))
    }

    /// 테이블 필드에서 파싱합니다.
    ///
    /// 빈 값이나 `N/A`는 `Unavailable`, 그 외 숫자가 아닌 값은 행 에러입니다.
    pub fn parse(raw: &str) -> Result<Self, RowError> {
        let value = raw.trim();
        if value.is_empty()
            || value.eq_ignore_ascii_case(UNAVAILABLE_MARKER)
            || value.eq_ignore_ascii_case("unavailable")
        {
            return Ok(BuyPrice::Unavailable);
        }

        parse_decimal("avg_buy_price", value).map(BuyPrice::Available)
    }

    /// 테이블 출력용 문자열 (소수점 2자리 또는 `N/A`).
    pub fn to_field(&self) -> String {
        match self {
            BuyPrice::Available(price) => price.to_fixed(PRICE_DP),
            BuyPrice::Unavailable => UNAVAILABLE_MARKER.to_string(),
        }
    }
}

impl From<Option<Price>> for BuyPrice {
    fn from(price: Option<Price>) -> Self {
        price.map(BuyPrice::Available).unwrap_or(BuyPrice::Unavailable)
    }
}

/// 종목별 청산 거래.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClosedTrade {
    /// 종목 심볼
    pub symbol: String,
    /// 평균 매입가
    pub avg_buy_price: BuyPrice,
    /// 수량 가중 평균 매도가
    pub avg_sell_price: Price,
    /// 매도 수량 (항상 양수)
    pub quantity: Quantity,
    /// 청산 날짜
    pub date: NaiveDate,
}

impl ClosedTrade {
    /// 새 청산 거래를 생성합니다.
    pub fn new(
        symbol: impl Into<String>,
        avg_buy_price: BuyPrice,
        avg_sell_price: Price,
        quantity: Quantity,
        date: NaiveDate,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            avg_buy_price,
            avg_sell_price,
            quantity,
            date,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_buy_price_parse() {
        assert_eq!(BuyPrice::parse("101.25").unwrap(), BuyPrice::Available(dec!(101.25)));
        assert_eq!(BuyPrice::parse("N/A").unwrap(), BuyPrice::Unavailable);
        assert_eq!(BuyPrice::parse("  ").unwrap(), BuyPrice::Unavailable);
        assert!(BuyPrice::parse("12,5").is_err());
    }

    #[test]
    fn test_buy_price_to_field() {
        assert_eq!(BuyPrice::Available(dec!(102)).to_field(), "102.00");
        assert_eq!(BuyPrice::Unavailable.to_field(), "N/A");
        assert_eq!(BuyPrice::from(None), BuyPrice::Unavailable);
    }
}
