//! 성과 기록.
//!
//! 집계 실행 한 번당 하나씩 생성되어 성과 원장에 추가되는 기록입니다.
//! 원장에 기록된 이후에는 변경되지 않습니다.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::RowError;
use crate::types::{parse_decimal, parse_row_date, DecimalExt, Percentage, AMOUNT_DP, PERCENT_DP};

/// 성과 원장의 고정 헤더.
pub const LEDGER_HEADER: [&str; 12] = [
    "date",
    "total_amount_invested",
    "total_pnl_amount",
    "total_pnl_percent",
    "batting_avg",
    "loss_rate",
    "avg_gain_abs",
    "avg_loss_abs",
    "avg_gain_pct",
    "avg_loss_pct",
    "risk_reward_ratio",
    "expectancy",
];

/// 손실 거래가 없을 때 원장에 기록되는 손익비 표시.
pub const NO_LOSSES_MARKER: &str = "inf";

/// 손익비 (평균 수익 / 평균 손실).
///
/// 손실 거래가 없으면 비율이 정의되지 않으므로 부동소수점 무한대 대신
/// `NoLosses`로 표현합니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskReward {
    /// 계산된 비율
    Ratio(Decimal),
    /// 손실 거래 없음
    NoLosses,
}

impl RiskReward {
    /// 원장 출력용 문자열.
    pub fn to_field(&self) -> String {
        match self {
            RiskReward::Ratio(value) => value.to_fixed(AMOUNT_DP),
            RiskReward::NoLosses => NO_LOSSES_MARKER.to_string(),
        }
    }

    /// 원장 필드에서 파싱합니다.
    pub fn parse(raw: &str) -> Result<Self, RowError> {
        let value = raw.trim();
        if value.eq_ignore_ascii_case(NO_LOSSES_MARKER) || value.eq_ignore_ascii_case("infinity")
        {
            return Ok(RiskReward::NoLosses);
        }
        parse_decimal("risk_reward_ratio", value).map(RiskReward::Ratio)
    }
}

impl fmt::Display for RiskReward {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_field())
    }
}

/// 집계 성과 기록.
///
/// 손실 관련 평균(`avg_loss_abs`, `avg_loss_pct`)은 부호를 유지한 채 저장하고,
/// 원장에는 절대값으로 기록합니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceRecord {
    /// 집계 날짜
    pub date: NaiveDate,
    /// 총 투자 금액
    pub total_invested: Decimal,
    /// 총 손익 금액
    pub total_pnl_amount: Decimal,
    /// 총 손익률 (%)
    pub total_pnl_percent: Percentage,
    /// 승률 (0.0 ~ 1.0)
    pub batting_avg: Decimal,
    /// 패률 (0.0 ~ 1.0)
    pub loss_rate: Decimal,
    /// 평균 수익 금액 (수익 거래만)
    pub avg_gain_abs: Decimal,
    /// 평균 손실 금액 (손실 거래만, 음수 또는 0)
    pub avg_loss_abs: Decimal,
    /// 평균 수익률 (%)
    pub avg_gain_pct: Percentage,
    /// 평균 손실률 (%, 음수 또는 0)
    pub avg_loss_pct: Percentage,
    /// 손익비
    pub risk_reward_ratio: RiskReward,
    /// 거래당 기대값
    pub expectancy: Decimal,
}

impl PerformanceRecord {
    /// 거래가 없을 때의 기록 (모든 값 0, 손익비는 `NoLosses`).
    pub fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            total_invested: Decimal::ZERO,
            total_pnl_amount: Decimal::ZERO,
            total_pnl_percent: Decimal::ZERO,
            batting_avg: Decimal::ZERO,
            loss_rate: Decimal::ZERO,
            avg_gain_abs: Decimal::ZERO,
            avg_loss_abs: Decimal::ZERO,
            avg_gain_pct: Decimal::ZERO,
            avg_loss_pct: Decimal::ZERO,
            risk_reward_ratio: RiskReward::NoLosses,
            expectancy: Decimal::ZERO,
        }
    }

    /// 원장 한 행으로 변환합니다. 반올림은 여기서만 적용됩니다.
    pub fn to_row(&self, date_format: &str) -> Vec<String> {
        vec![
            self.date.format(date_format).to_string(),
            self.total_invested.to_fixed(AMOUNT_DP),
            self.total_pnl_amount.to_fixed(AMOUNT_DP),
            self.total_pnl_percent.to_fixed(PERCENT_DP),
            self.batting_avg.to_fixed(AMOUNT_DP),
            self.loss_rate.to_fixed(AMOUNT_DP),
            self.avg_gain_abs.to_fixed(AMOUNT_DP),
            self.avg_loss_abs.abs().to_fixed(AMOUNT_DP),
            self.avg_gain_pct.to_fixed(AMOUNT_DP),
            self.avg_loss_pct.abs().to_fixed(AMOUNT_DP),
            self.risk_reward_ratio.to_field(),
            self.expectancy.to_fixed(AMOUNT_DP),
        ]
    }

    /// 원장 한 행에서 기록을 복원합니다.
    ///
    /// 손실 관련 필드는 절대값으로 기록되어 있으므로 음수로 되돌립니다.
    pub fn from_row(fields: &[&str], date_format: &str) -> Result<Self, RowError> {
        if fields.len() < LEDGER_HEADER.len() {
            return Err(RowError::MissingField(LEDGER_HEADER[fields.len()]));
        }

        Ok(Self {
            date: parse_row_date(fields[0], date_format)?,
            total_invested: parse_decimal("total_amount_invested", fields[1])?,
            total_pnl_amount: parse_decimal("total_pnl_amount", fields[2])?,
            total_pnl_percent: parse_decimal("total_pnl_percent", fields[3])?,
            batting_avg: parse_decimal("batting_avg", fields[4])?,
            loss_rate: parse_decimal("loss_rate", fields[5])?,
            avg_gain_abs: parse_decimal("avg_gain_abs", fields[6])?,
            avg_loss_abs: -parse_decimal("avg_loss_abs", fields[7])?.abs(),
            avg_gain_pct: parse_decimal("avg_gain_pct", fields[8])?,
            avg_loss_pct: -parse_decimal("avg_loss_pct", fields[9])?.abs(),
            risk_reward_ratio: RiskReward::parse(fields[10])?,
            expectancy: parse_decimal("expectancy", fields[11])?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DEFAULT_ROW_DATE_FORMAT;
    use rust_decimal_macros::dec;

    fn sample_record() -> PerformanceRecord {
        PerformanceRecord {
            date: NaiveDate::from_ymd_opt(2025, 6, 13).unwrap(),
            total_invested: dec!(1250),
            total_pnl_amount: dec!(150),
            total_pnl_percent: dec!(12),
            batting_avg: dec!(0.5),
            loss_rate: dec!(0.5),
            avg_gain_abs: dec!(200),
            avg_loss_abs: dec!(-50),
            avg_gain_pct: dec!(20),
            avg_loss_pct: dec!(-20),
            risk_reward_ratio: RiskReward::Ratio(dec!(4)),
            expectancy: dec!(75),
        }
    }

    #[test]
    fn test_to_row_formats_fixed_precision() {
        let row = sample_record().to_row(DEFAULT_ROW_DATE_FORMAT);

        assert_eq!(
            row,
            vec![
                "13-06-2025", "1250.000", "150.000", "12.00", "0.500", "0.500", "200.000",
                "50.000", "20.000", "20.000", "4.000", "75.000"
            ]
        );
    }

    #[test]
    fn test_empty_record_reports_no_losses() {
        let date = NaiveDate::from_ymd_opt(2025, 6, 13).unwrap();
        let row = PerformanceRecord::empty(date).to_row(DEFAULT_ROW_DATE_FORMAT);

        assert_eq!(row[10], "inf");
        assert!(row[1..10].iter().all(|v| v.parse::<f64>().unwrap() == 0.0));
    }

    #[test]
    fn test_from_row_restores_loss_sign() {
        let record = sample_record();
        let row = record.to_row(DEFAULT_ROW_DATE_FORMAT);
        let fields: Vec<&str> = row.iter().map(String::as_str).collect();

        let restored = PerformanceRecord::from_row(&fields, DEFAULT_ROW_DATE_FORMAT).unwrap();
        assert_eq!(restored.avg_loss_abs, dec!(-50));
        assert_eq!(restored.risk_reward_ratio, RiskReward::Ratio(dec!(4)));
        assert_eq!(restored.date, record.date);
    }

    #[test]
    fn test_from_row_rejects_short_row() {
        let err = PerformanceRecord::from_row(&["13-06-2025", "1"], DEFAULT_ROW_DATE_FORMAT);
        assert_eq!(err, Err(RowError::MissingField("total_pnl_amount")));
    }
}
