//! 브로커 정보 제공자 추상화.

use async_trait::async_trait;
use chrono::NaiveDate;

use journal_core::{Holding, Trade};

use crate::error::ExchangeResult;

/// 브로커 정보 제공자 trait.
///
/// 당일 체결 내역과 보유 종목 스냅샷을 조회합니다. 반환된 기록은
/// 모두 `as_of` 날짜로 표시됩니다. 실패는 재시도 없이 호출자에게 전달됩니다.
#[async_trait]
pub trait BrokerProvider: Send + Sync {
    /// 당일 체결 내역 조회.
    async fn fetch_trades(&self, as_of: NaiveDate) -> ExchangeResult<Vec<Trade>>;

    /// 보유 종목 조회.
    async fn fetch_holdings(&self, as_of: NaiveDate) -> ExchangeResult<Vec<Holding>>;

    /// 브로커 이름 (로깅용).
    fn broker_name(&self) -> &str;
}
