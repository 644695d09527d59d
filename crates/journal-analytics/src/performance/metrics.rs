//! 거래별 손익 및 집계 성과 지표.
//!
//! # 계산 공식
//!
//! 거래별 (매입가를 알 수 있는 청산 거래만):
//! - 투자 금액: 매입가 × 수량
//! - 매도 금액: 매도가 × 수량
//! - 손익 금액: 매도 금액 - 투자 금액
//! - 손익률: (매도가 - 매입가) / 매입가 × 100
//!
//! 집계:
//! - 승률: 수익 거래 수 / 전체 거래 수 (손익 0인 거래는 수익/손실 어느 쪽도 아님)
//! - 손익비: |평균 수익 / 평균 손실|, 손실 거래가 없으면 `NoLosses`
//! - 기대값: 승률 × 평균 수익 - 패률 × |평균 손실|
//!
//! 모든 계산은 `Decimal`로 수행하며 반올림은 원장 출력 시에만 적용됩니다.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use journal_core::{ClosedTrade, Percentage, PerformanceRecord, Price, RiskReward};

/// 청산 거래 하나의 손익.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeOutcome {
    /// 종목 심볼
    pub symbol: String,
    /// 청산 날짜
    pub date: NaiveDate,
    /// 투자 금액
    pub invested: Decimal,
    /// 매도 금액
    pub sold: Decimal,
    /// 손익 금액
    pub pnl_amount: Decimal,
    /// 손익률 (%)
    pub pnl_percent: Percentage,
}

impl TradeOutcome {
    /// 청산 거래에서 손익을 계산합니다.
    ///
    /// 매입가를 알 수 없거나 금액이 `Decimal` 범위를 넘으면 `None`을 반환합니다.
    pub fn from_closed_trade(trade: &ClosedTrade) -> Option<Self> {
        let buy = trade.avg_buy_price.value()?;
        let sell = trade.avg_sell_price;

        let invested = buy.checked_mul(trade.quantity)?;
        let sold = sell.checked_mul(trade.quantity)?;

        Some(Self {
            symbol: trade.symbol.clone(),
            date: trade.date,
            invested,
            sold,
            pnl_amount: sold.checked_sub(invested)?,
            pnl_percent: percent_change(buy, sell)?,
        })
    }

    /// 수익 거래 여부.
    pub fn is_win(&self) -> bool {
        self.pnl_amount > Decimal::ZERO
    }

    /// 손실 거래 여부.
    pub fn is_loss(&self) -> bool {
        self.pnl_amount < Decimal::ZERO
    }
}

/// 집계에 사용된 거래 수.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeCounts {
    /// 집계된 거래 수
    pub total: usize,
    /// 수익 거래 수
    pub winning: usize,
    /// 손실 거래 수
    pub losing: usize,
    /// 매입가가 없거나 금액이 `Decimal` 범위를 넘어 제외된 거래 수
    pub skipped: usize,
}

impl TradeCounts {
    /// 손익이 정확히 0인 거래 수.
    pub fn breakeven(&self) -> usize {
        self.total - self.winning - self.losing
    }
}

/// 성과 기록과 집계 과정의 거래 수.
#[derive(Debug, Clone, PartialEq)]
pub struct Aggregation {
    pub record: PerformanceRecord,
    pub counts: TradeCounts,
}

/// 청산 거래 목록을 하나의 성과 기록으로 집계합니다.
///
/// 거래가 없으면 모든 값이 0이고 손익비가 `NoLosses`인 기록을 반환합니다.
pub fn aggregate(closed: &[ClosedTrade], as_of: NaiveDate) -> PerformanceRecord {
    aggregate_detailed(closed, as_of).record
}

/// [`aggregate`]와 같지만 제외된 거래 수 등 집계 정보를 함께 반환합니다.
pub fn aggregate_detailed(closed: &[ClosedTrade], as_of: NaiveDate) -> Aggregation {
    let mut outcomes = Vec::with_capacity(closed.len());
    let mut skipped = 0;

    for trade in closed {
        if !trade.avg_buy_price.is_available() {
            skipped += 1;
            warn!(
                symbol = %trade.symbol,
                "Buy price unavailable, excluding closed trade from metrics"
            );
            continue;
        }

        match TradeOutcome::from_closed_trade(trade) {
            Some(outcome) => outcomes.push(outcome),
            None => {
                skipped += 1;
                warn!(
                    symbol = %trade.symbol,
                    quantity = %trade.quantity,
                    avg_sell_price = %trade.avg_sell_price,
                    "Closed trade amount exceeds decimal range, excluding from metrics"
                );
            }
        }
    }

    let mut aggregation = aggregate_outcomes(&outcomes, as_of);
    aggregation.counts.skipped += skipped;
    aggregation
}

/// 집계 중인 합계.
#[derive(Debug, Clone, Copy, Default)]
struct Totals {
    invested: Decimal,
    pnl: Decimal,
    gain_abs: Decimal,
    loss_abs: Decimal,
    gain_pct: Decimal,
    loss_pct: Decimal,
    total: usize,
    winning: usize,
    losing: usize,
}

impl Totals {
    /// 거래 하나를 더한 합계. 어느 합계라도 `Decimal` 범위를 넘으면 `None`.
    fn with(&self, outcome: &TradeOutcome) -> Option<Self> {
        let mut next = Self {
            invested: self.invested.checked_add(outcome.invested)?,
            pnl: self.pnl.checked_add(outcome.pnl_amount)?,
            total: self.total + 1,
            ..*self
        };

        if outcome.is_win() {
            next.gain_abs = self.gain_abs.checked_add(outcome.pnl_amount)?;
            next.gain_pct = self.gain_pct.checked_add(outcome.pnl_percent)?;
            next.winning += 1;
        } else if outcome.is_loss() {
            next.loss_abs = self.loss_abs.checked_add(outcome.pnl_amount)?;
            next.loss_pct = self.loss_pct.checked_add(outcome.pnl_percent)?;
            next.losing += 1;
        }

        Some(next)
    }

    fn counts(&self) -> TradeCounts {
        TradeCounts {
            total: self.total,
            winning: self.winning,
            losing: self.losing,
            skipped: 0,
        }
    }
}

/// 이미 계산된 거래별 손익을 집계합니다.
///
/// 더했을 때 합계가 `Decimal` 범위를 넘는 거래는 제외하고 `skipped`에 셉니다.
pub fn aggregate_outcomes(outcomes: &[TradeOutcome], as_of: NaiveDate) -> Aggregation {
    let mut totals = Totals::default();
    let mut skipped = 0;

    for outcome in outcomes {
        match totals.with(outcome) {
            Some(next) => totals = next,
            None => {
                skipped += 1;
                warn!(
                    symbol = %outcome.symbol,
                    pnl = %outcome.pnl_amount,
                    "Running totals exceed decimal range, excluding trade from metrics"
                );
            }
        }
    }

    let mut counts = totals.counts();
    counts.skipped = skipped;

    if totals.total == 0 {
        debug!(date = %as_of, skipped, "No closed trades to aggregate");
        return Aggregation {
            record: PerformanceRecord::empty(as_of),
            counts,
        };
    }

    let total = Decimal::from(totals.total);
    let batting_avg = Decimal::from(totals.winning) / total;
    let loss_rate = Decimal::from(totals.losing) / total;

    let avg_gain_abs = mean(totals.gain_abs, totals.winning);
    let avg_loss_abs = mean(totals.loss_abs, totals.losing);
    let avg_gain_pct = mean(totals.gain_pct, totals.winning);
    let avg_loss_pct = mean(totals.loss_pct, totals.losing);

    let risk_reward_ratio = if avg_loss_abs.is_zero() {
        RiskReward::NoLosses
    } else {
        // 평균 손실이 극히 작으면 최댓값으로 포화
        RiskReward::Ratio(
            avg_gain_abs
                .checked_div(avg_loss_abs)
                .map_or(Decimal::MAX, |r| r.abs()),
        )
    };

    let expectancy = batting_avg
        .saturating_mul(avg_gain_abs)
        .saturating_sub(loss_rate.saturating_mul(avg_loss_abs.abs()));

    debug!(
        date = %as_of,
        total = counts.total,
        winning = counts.winning,
        losing = counts.losing,
        skipped = counts.skipped,
        total_pnl = %totals.pnl,
        "Performance aggregated"
    );

    Aggregation {
        record: PerformanceRecord {
            date: as_of,
            total_invested: totals.invested,
            total_pnl_amount: totals.pnl,
            total_pnl_percent: percent_of(totals.pnl, totals.invested),
            batting_avg,
            loss_rate,
            avg_gain_abs,
            avg_loss_abs,
            avg_gain_pct,
            avg_loss_pct,
            risk_reward_ratio,
            expectancy,
        },
        counts,
    }
}

/// 매입가 대비 매도가 변화율 (%). 매입가가 0이면 0, 범위를 넘으면 `None`.
fn percent_change(buy: Price, sell: Price) -> Option<Percentage> {
    if buy.is_zero() {
        return Some(Decimal::ZERO);
    }
    sell.checked_sub(buy)?
        .checked_div(buy)?
        .checked_mul(Decimal::ONE_HUNDRED)
}

/// 분모 대비 분자 비율 (%). 분모가 0이면 0, 범위를 넘으면 부호에 맞춰 포화.
fn percent_of(numerator: Decimal, denominator: Decimal) -> Percentage {
    if denominator.is_zero() {
        return Decimal::ZERO;
    }

    numerator
        .checked_div(denominator)
        .and_then(|r| r.checked_mul(Decimal::ONE_HUNDRED))
        .unwrap_or(if numerator.is_sign_negative() != denominator.is_sign_negative() {
            Decimal::MIN
        } else {
            Decimal::MAX
        })
}

/// 합계의 산술 평균. 개수가 0이면 0.
fn mean(sum: Decimal, count: usize) -> Decimal {
    if count == 0 {
        Decimal::ZERO
    } else {
        sum / Decimal::from(count)
    }
}
