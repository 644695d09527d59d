//! 정밀한 금융 계산을 위한 Decimal 유틸리티.
//!
//! 모든 금액/비율 계산은 `Decimal`로 수행하고, 반올림은 출력 경계에서만 적용합니다.

use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;

use crate::error::RowError;

/// 금융 정밀도를 위한 가격 타입.
pub type Price = Decimal;

/// 체결/보유 수량을 위한 타입.
pub type Quantity = Decimal;

/// 퍼센트 타입 (12.0 = 12%).
pub type Percentage = Decimal;

/// 금액/비율 출력 자릿수.
pub const AMOUNT_DP: u32 = 3;

/// 총 손익률 출력 자릿수.
pub const PERCENT_DP: u32 = 2;

/// 청산 거래 테이블의 가격 출력 자릿수.
pub const PRICE_DP: u32 = 2;

/// Decimal 출력을 위한 확장 트레이트.
pub trait DecimalExt {
    /// 지정된 소수점 자릿수로 반올림합니다 (0.5는 0에서 먼 쪽으로).
    fn round_half_up(&self, dp: u32) -> Decimal;

    /// 반올림 후 고정 자릿수 문자열로 변환합니다 (예: `12.00`).
    fn to_fixed(&self, dp: u32) -> String;
}

impl DecimalExt for Decimal {
    fn round_half_up(&self, dp: u32) -> Decimal {
        self.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
    }

    fn to_fixed(&self, dp: u32) -> String {
        format!("{:.*}", dp as usize, self.round_half_up(dp))
    }
}

/// 문자열 필드를 `Decimal`로 파싱합니다.
///
/// 앞뒤 공백은 무시하며, 지수 표기(`1.5e3`)도 허용합니다.
pub fn parse_decimal(field: &'static str, raw: &str) -> Result<Decimal, RowError> {
    let value = raw.trim();
    if value.is_empty() {
        return Err(RowError::MissingField(field));
    }

    Decimal::from_str(value)
        .or_else(|_| Decimal::from_scientific(value))
        .map_err(|_| RowError::InvalidNumber {
            field,
            value: value.to_string(),
        })
}
