//! Kite Connect 클라이언트 HTTP 목 테스트.

use chrono::NaiveDate;
use mockito::Matcher;
use rust_decimal_macros::dec;

use journal_core::TransactionType;
use journal_exchange::{BrokerProvider, ExchangeError, KiteClient, KiteConfig, KiteSession};

fn day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 13).unwrap()
}

fn config(server: &mockito::Server) -> KiteConfig {
    KiteConfig::new("my_api_key", "my_secret").with_base_url(server.url())
}

#[tokio::test]
async fn test_generate_session_posts_checksum() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/session/token")
        .match_header("x-kite-version", "3")
        .match_body(Matcher::AllOf(vec![
            Matcher::UrlEncoded("api_key".into(), "my_api_key".into()),
            Matcher::UrlEncoded("request_token".into(), "req_token".into()),
            Matcher::UrlEncoded(
                "checksum".into(),
                "5e30b652352feb70b37020115d6f928cc09bc5b4beb025e48e86a124dc23c951".into(),
            ),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"status":"success","data":{"user_id":"AB1234","user_name":"Test User","access_token":"tok123"}}"#,
        )
        .create_async()
        .await;

    let session = KiteSession::new(config(&server)).unwrap();
    let data = session.generate_session(" req_token\n").await.unwrap();

    mock.assert_async().await;
    assert_eq!(data.access_token, "tok123");
    assert_eq!(data.user_name, "Test User");
}

#[tokio::test]
async fn test_fetch_trades_sends_auth_and_maps_records() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/trades")
        .match_header("authorization", "token my_api_key:tok123")
        .match_header("x-kite-version", "3")
        .with_status(200)
        .with_body(
            r#"{"status":"success","data":[
                {"trade_id":"1","tradingsymbol":"INFY","exchange":"NSE","transaction_type":"SELL","average_price":1550.5,"quantity":4},
                {"trade_id":"2","tradingsymbol":"TCS","exchange":"NSE","transaction_type":"BUY","average_price":3400,"quantity":1},
                {"trade_id":"3","tradingsymbol":"ODD","exchange":"NSE","transaction_type":"SWAP","average_price":1,"quantity":1}
            ]}"#,
        )
        .create_async()
        .await;

    let client = KiteClient::new(config(&server), "tok123").unwrap();
    let trades = client.fetch_trades(day()).await.unwrap();

    mock.assert_async().await;
    assert_eq!(trades.len(), 2);
    assert_eq!(trades[0].symbol, "INFY");
    assert_eq!(trades[0].transaction_type, TransactionType::Sell);
    assert_eq!(trades[0].price, dec!(1550.5));
    assert_eq!(trades[1].date, day());
}

#[tokio::test]
async fn test_fetch_holdings() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/portfolio/holdings")
        .with_status(200)
        .with_body(
            r#"{"status":"success","data":[
                {"tradingsymbol":"INFY","exchange":"NSE","product":"CNC","quantity":12,"average_price":1480.35,"last_price":1552.1,"pnl":861.0}
            ]}"#,
        )
        .create_async()
        .await;

    let client = KiteClient::new(config(&server), "tok123").unwrap();
    let holdings = client.fetch_holdings(day()).await.unwrap();

    assert_eq!(holdings.len(), 1);
    assert_eq!(holdings[0].average_price, dec!(1480.35));
    assert_eq!(holdings[0].product, "CNC");
}

#[tokio::test]
async fn test_token_exception_is_unauthorized() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/user/profile")
        .with_status(403)
        .with_body(
            r#"{"status":"error","message":"Incorrect `api_key` or `access_token`.","error_type":"TokenException"}"#,
        )
        .create_async()
        .await;

    let client = KiteClient::new(config(&server), "stale").unwrap();
    let err = client.profile().await.unwrap_err();

    assert!(err.is_auth_error());
}

#[tokio::test]
async fn test_rate_limit_and_non_json_errors() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/trades")
        .with_status(429)
        .with_body("Too many requests")
        .create_async()
        .await;
    server
        .mock("GET", "/portfolio/holdings")
        .with_status(502)
        .with_body("<html>Bad Gateway</html>")
        .create_async()
        .await;

    let client = KiteClient::new(config(&server), "tok123").unwrap();

    assert!(matches!(client.trades().await, Err(ExchangeError::RateLimited)));
    assert!(matches!(
        client.holdings().await,
        Err(ExchangeError::ApiError { .. })
    ));
}
