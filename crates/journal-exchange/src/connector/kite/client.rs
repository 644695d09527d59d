//! Kite Connect REST 클라이언트.
//!
//! 모든 요청에 다음 헤더가 포함됩니다:
//! - `X-Kite-Version: 3`
//! - `Authorization: token {api_key}:{access_token}`

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::path::Path;
use tracing::{debug, error, info, warn};

use journal_core::{Holding, Trade, TransactionType};

use super::auth::load_access_token;
use super::config::{KiteConfig, KITE_API_VERSION};
use super::types::{KiteEnvelope, KiteHolding, KiteTrade, Profile};
use crate::error::{ExchangeError, ExchangeResult};
use crate::traits::BrokerProvider;

/// 인증된 Kite Connect 클라이언트.
pub struct KiteClient {
    config: KiteConfig,
    client: Client,
    access_token: String,
}

impl KiteClient {
    /// 접근 토큰으로 클라이언트를 생성합니다.
    pub fn new(config: KiteConfig, access_token: impl Into<String>) -> ExchangeResult<Self> {
        config.require_api_key()?;

        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ExchangeError::NetworkError(format!("HTTP client 생성 실패: {}", e)))?;

        Ok(Self {
            config,
            client,
            access_token: access_token.into(),
        })
    }

    /// 토큰 파일에서 접근 토큰을 읽어 클라이언트를 생성합니다.
    pub fn from_token_file(config: KiteConfig, path: impl AsRef<Path>) -> ExchangeResult<Self> {
        let token = load_access_token(path)?;
        Self::new(config, token)
    }

    /// 인증 헤더 생성.
    fn build_headers(&self) -> ExchangeResult<HeaderMap> {
        let mut headers = HeaderMap::new();

        headers.insert("X-Kite-Version", HeaderValue::from_static(KITE_API_VERSION));
        headers.insert(
            AUTHORIZATION,
            format!("token {}:{}", self.config.api_key, self.access_token)
                .parse()
                .map_err(|_| {
                    ExchangeError::ParseError(
                        "authorization 헤더에 유효하지 않은 문자 포함".to_string(),
                    )
                })?,
        );

        Ok(headers)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str, what: &str) -> ExchangeResult<T> {
        let url = format!("{}{}", self.config.rest_base_url(), path);
        debug!(%url, "Kite GET");

        let response = self
            .client
            .get(&url)
            .headers(self.build_headers()?)
            .send()
            .await
            .map_err(|e| ExchangeError::NetworkError(e.to_string()))?;

        decode_response(response, what).await
    }

    /// 사용자 프로필 조회 (GET /user/profile).
    pub async fn profile(&self) -> ExchangeResult<Profile> {
        self.get("/user/profile", "profile").await
    }

    /// 당일 체결 내역 조회 (GET /trades).
    pub async fn trades(&self) -> ExchangeResult<Vec<KiteTrade>> {
        self.get("/trades", "trades").await
    }

    /// 보유 종목 조회 (GET /portfolio/holdings).
    pub async fn holdings(&self) -> ExchangeResult<Vec<KiteHolding>> {
        self.get("/portfolio/holdings", "holdings").await
    }
}

#[async_trait]
impl BrokerProvider for KiteClient {
    async fn fetch_trades(&self, as_of: NaiveDate) -> ExchangeResult<Vec<Trade>> {
        let raw = self.trades().await?;
        let total = raw.len();

        let trades: Vec<Trade> = raw
            .into_iter()
            .filter_map(|t| match t.transaction_type.parse::<TransactionType>() {
                Ok(side) => Some(Trade::new(
                    t.tradingsymbol,
                    side,
                    t.average_price,
                    t.quantity,
                    as_of,
                )),
                Err(e) => {
                    warn!(
                        symbol = %t.tradingsymbol,
                        trade_id = %t.trade_id,
                        error = %e,
                        "Skipping trade with unknown transaction type"
                    );
                    None
                }
            })
            .collect();

        info!(total, kept = trades.len(), "Fetched trades from Kite");
        Ok(trades)
    }

    async fn fetch_holdings(&self, as_of: NaiveDate) -> ExchangeResult<Vec<Holding>> {
        let holdings: Vec<Holding> = self
            .holdings()
            .await?
            .into_iter()
            .map(|h| Holding {
                symbol: h.tradingsymbol,
                quantity: h.quantity,
                average_price: h.average_price,
                last_price: h.last_price,
                pnl: h.pnl,
                product: h.product,
                exchange: h.exchange,
                date: as_of,
            })
            .collect();

        info!(count = holdings.len(), "Fetched holdings from Kite");
        Ok(holdings)
    }

    fn broker_name(&self) -> &str {
        "Kite"
    }
}

/// Kite 응답 본문을 해석합니다.
///
/// `status`가 `success`가 아니거나 HTTP 상태가 실패이면 `error_type`에 따라 에러로 변환합니다.
pub(crate) async fn decode_response<T: DeserializeOwned>(
    response: Response,
    what: &str,
) -> ExchangeResult<T> {
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| ExchangeError::NetworkError(e.to_string()))?;

    if status == StatusCode::TOO_MANY_REQUESTS {
        warn!(what, "Kite rate limit exceeded");
        return Err(ExchangeError::RateLimited);
    }

    let envelope: KiteEnvelope<T> = match serde_json::from_str(&body) {
        Ok(envelope) => envelope,
        Err(e) if status.is_success() => {
            return Err(ExchangeError::ParseError(format!(
                "Failed to parse {} response: {}",
                what, e
            )));
        }
        Err(_) => {
            error!(%status, what, %body, "Kite request failed");
            return Err(ExchangeError::ApiError {
                error_type: format!("HTTP {}", status.as_u16()),
                message: body,
            });
        }
    };

    if !status.is_success() || envelope.status != "success" {
        let error_type = envelope
            .error_type
            .unwrap_or_else(|| "GeneralException".to_string());
        let message = envelope
            .message
            .unwrap_or_else(|| format!("HTTP {}", status.as_u16()));

        error!(%status, what, %error_type, %message, "Kite request failed");
        return Err(ExchangeError::from_kite(&error_type, message));
    }

    envelope
        .data
        .ok_or_else(|| ExchangeError::ParseError(format!("Missing data in {} response", what)))
}
