//! 청산 거래 매칭.
//!
//! 당일 매도 체결을 종목별로 묶어 수량 가중 평균 매도가를 구하고,
//! 보유 종목 스냅샷의 평균 매입가와 짝지어 청산 거래를 만듭니다.
//!
//! # 계산 공식
//!
//! - 총 수량: Σ 수량
//! - 총 금액: Σ (단가 × 수량)
//! - 평균 매도가: 총 금액 / 총 수량 (단순 평균이 아닌 수량 가중 평균)

use chrono::NaiveDate;
use indexmap::IndexMap;
use rust_decimal::Decimal;
use std::collections::HashMap;
use tracing::{debug, warn};

use journal_core::{BuyPrice, ClosedTrade, Holding, Price, Quantity, Trade};

/// 종목 심볼 → 보유 종목 조회 테이블.
pub type HoldingsIndex = HashMap<String, Holding>;

/// 종목별 매도 누적값.
#[derive(Debug, Default)]
struct SellGroup {
    total_qty: Quantity,
    total_value: Decimal,
}

impl SellGroup {
    /// 체결 하나를 누적합니다. 합계가 `Decimal` 범위를 넘으면 누적하지 않고 `false`.
    fn try_add(&mut self, trade: &Trade) -> bool {
        let next = trade.notional().and_then(|value| {
            Some((
                self.total_qty.checked_add(trade.quantity)?,
                self.total_value.checked_add(value)?,
            ))
        });

        match next {
            Some((qty, value)) => {
                self.total_qty = qty;
                self.total_value = value;
                true
            }
            None => false,
        }
    }

    /// 수량 가중 평균 매도가. 총 수량이 0 이하이거나 나눗셈이 범위를 넘으면 `None`.
    fn average_price(&self) -> Option<Price> {
        if self.total_qty > Decimal::ZERO {
            self.total_value.checked_div(self.total_qty)
        } else {
            None
        }
    }
}

/// 매칭 결과와 건너뛴 매도 체결 수.
#[derive(Debug, Clone, PartialEq)]
pub struct Matching {
    /// 청산 거래 (첫 매도 순)
    pub closed: Vec<ClosedTrade>,
    /// 금액이 `Decimal` 범위를 넘거나 총 수량이 0 이하라 제외된 매도 체결 수
    pub skipped: usize,
}

/// 보유 종목 목록을 심볼 기준 조회 테이블로 변환합니다.
///
/// 같은 심볼이 여러 번 나오면 (거래소별 중복 등) 수량을 합산하고
/// 평균 매입가를 수량 가중 평균으로 합칩니다. 합산 수량이 0이면
/// 마지막 스냅샷의 평균 매입가를 사용합니다.
pub fn holdings_by_symbol(holdings: &[Holding]) -> HoldingsIndex {
    let mut index: HoldingsIndex = HashMap::with_capacity(holdings.len());

    for holding in holdings {
        match index.get_mut(&holding.symbol) {
            None => {
                index.insert(holding.symbol.clone(), holding.clone());
            }
            Some(existing) => {
                warn!(
                    symbol = %holding.symbol,
                    existing_exchange = %existing.exchange,
                    exchange = %holding.exchange,
                    "Duplicate holding for symbol, merging by quantity-weighted average"
                );

                let Some(merged) = merge_holding(existing, holding) else {
                    warn!(
                        symbol = %holding.symbol,
                        "Duplicate holding exceeds decimal range, keeping the first snapshot"
                    );
                    continue;
                };
                *existing = merged;
            }
        }
    }

    index
}

/// 같은 심볼의 보유 종목 두 개를 수량 가중 평균으로 합칩니다.
///
/// 합산 수량이 0이면 나중 스냅샷의 평균 매입가를 사용합니다.
fn merge_holding(existing: &Holding, holding: &Holding) -> Option<Holding> {
    let total_qty = existing.quantity.checked_add(holding.quantity)?;
    let average_price = if total_qty > Decimal::ZERO {
        existing
            .cost_value()?
            .checked_add(holding.cost_value()?)?
            .checked_div(total_qty)?
    } else {
        holding.average_price
    };

    Some(Holding {
        quantity: total_qty,
        average_price,
        last_price: holding.last_price,
        pnl: existing.pnl.checked_add(holding.pnl)?,
        ..existing.clone()
    })
}

/// 매도 체결과 보유 종목을 매칭하여 청산 거래 목록을 생성합니다.
///
/// - 매수 체결은 무시합니다 (매입가는 브로커 보유 종목에 이미 반영됨).
/// - 종목당 하나의 청산 거래를 생성하며, 순서는 첫 매도 체결 순서를 따릅니다.
/// - 보유 종목에 없는 심볼은 `BuyPrice::Unavailable`로 표시하고 그대로 포함합니다.
/// - 매도가 없으면 빈 목록을 반환합니다.
///
/// # 예시
///
/// ```rust,ignore
/// // (수량 10, 100원) + (수량 5, 106원) → 평균 매도가 (1000 + 530) / 15 = 102
/// let closed = match_closed_trades(&trades, &holdings_by_symbol(&holdings), today);
/// ```
pub fn match_closed_trades(
    trades: &[Trade],
    holdings: &HoldingsIndex,
    date: NaiveDate,
) -> Vec<ClosedTrade> {
    match_closed_trades_detailed(trades, holdings, date).closed
}

/// [`match_closed_trades`]와 같지만 제외된 매도 체결 수를 함께 반환합니다.
///
/// 금액 합계가 `Decimal` 범위를 넘는 체결은 그 행만 건너뜁니다.
pub fn match_closed_trades_detailed(
    trades: &[Trade],
    holdings: &HoldingsIndex,
    date: NaiveDate,
) -> Matching {
    let mut groups: IndexMap<&str, (SellGroup, usize)> = IndexMap::new();
    let mut skipped = 0;

    for trade in trades.iter().filter(|t| t.is_sell()) {
        let (group, rows) = groups.entry(trade.symbol.as_str()).or_default();
        if group.try_add(trade) {
            *rows += 1;
        } else {
            skipped += 1;
            warn!(
                symbol = %trade.symbol,
                price = %trade.price,
                quantity = %trade.quantity,
                "Sell amount exceeds decimal range, skipping trade"
            );
        }
    }

    let closed = groups
        .into_iter()
        .filter(|(_, (_, rows))| *rows > 0)
        .filter_map(|(symbol, (group, rows))| {
            let Some(avg_sell_price) = group.average_price() else {
                skipped += rows;
                warn!(
                    symbol,
                    total_qty = %group.total_qty,
                    "Skipping sell group without a valid average price"
                );
                return None;
            };

            let avg_buy_price = BuyPrice::from(holdings.get(symbol).map(|h| h.average_price));
            if !avg_buy_price.is_available() {
                debug!(symbol, "No holding found for sold symbol, buy price unavailable");
            }

            Some(ClosedTrade::new(
                symbol,
                avg_buy_price,
                avg_sell_price,
                group.total_qty,
                date,
            ))
        })
        .collect();

    Matching { closed, skipped }
}
