//! 청산 거래 매칭 및 성과 집계.
//!
//! 이 크레이트는 다음을 제공합니다:
//! - 청산 거래 매칭 (매도 체결 ↔ 보유 종목 평균 매입가)
//! - 거래별 손익 계산 및 집계 성과 기록 생성
//!
//! 두 단계 모두 메모리에 완전히 적재된 테이블을 입력으로 받는 순수 함수이며,
//! 파일/네트워크 입출력은 호출자가 담당합니다.
//!
//! # Re-exports
//!
//! - [`matcher`]: 청산 거래 매칭 (`match_closed_trades`, `holdings_by_symbol`)
//! - [`performance`]: 성과 집계 (`aggregate`, `TradeOutcome`)

pub mod matcher;
pub mod performance;

pub use matcher::{
    holdings_by_symbol, match_closed_trades, match_closed_trades_detailed, HoldingsIndex, Matching,
};
pub use performance::metrics::{
    aggregate, aggregate_detailed, aggregate_outcomes, Aggregation, TradeCounts, TradeOutcome,
};
