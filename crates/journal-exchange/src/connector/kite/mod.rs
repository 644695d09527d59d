//! Zerodha Kite Connect v3 커넥터.
//!
//! - [`auth`]: 로그인 URL, 세션 발급, 접근 토큰 파일
//! - [`client`]: 인증된 REST 조회 (프로필, 체결, 보유 종목)

pub mod auth;
pub mod client;
pub mod config;
pub mod types;

pub use auth::{load_access_token, save_access_token, KiteSession};
pub use client::KiteClient;
pub use config::KiteConfig;
pub use types::{Profile, SessionData};
