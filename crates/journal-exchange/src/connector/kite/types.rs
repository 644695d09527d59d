//! Kite Connect 응답 타입.

use rust_decimal::Decimal;
use serde::Deserialize;

/// Kite 응답 공통 형식.
///
/// 성공: `{"status": "success", "data": ...}`
/// 실패: `{"status": "error", "message": "...", "error_type": "TokenException"}`
#[derive(Debug, Deserialize)]
pub struct KiteEnvelope<T> {
    pub status: String,
    pub data: Option<T>,
    pub message: Option<String>,
    pub error_type: Option<String>,
}

/// 세션 발급 결과.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionData {
    pub user_id: String,
    #[serde(default)]
    pub user_name: String,
    pub access_token: String,
}

/// 사용자 프로필.
#[derive(Debug, Clone, Deserialize)]
pub struct Profile {
    pub user_id: String,
    #[serde(default)]
    pub user_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub broker: String,
}

/// `GET /trades` 응답의 체결 한 건.
#[derive(Debug, Clone, Deserialize)]
pub struct KiteTrade {
    pub tradingsymbol: String,
    pub transaction_type: String,
    pub average_price: Decimal,
    pub quantity: Decimal,
    #[serde(default)]
    pub exchange: String,
    #[serde(default)]
    pub trade_id: String,
}

/// `GET /portfolio/holdings` 응답의 보유 종목 한 건.
#[derive(Debug, Clone, Deserialize)]
pub struct KiteHolding {
    pub tradingsymbol: String,
    pub quantity: Decimal,
    pub average_price: Decimal,
    #[serde(default)]
    pub last_price: Decimal,
    #[serde(default)]
    pub pnl: Decimal,
    #[serde(default)]
    pub product: String,
    #[serde(default)]
    pub exchange: String,
}
