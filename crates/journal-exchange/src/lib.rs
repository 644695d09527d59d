//! 브로커 연결.
//!
//! 이 크레이트는 다음을 제공합니다:
//! - BrokerProvider trait: 당일 체결/보유 종목 조회 인터페이스
//! - Kite Connect 커넥터 (로그인 URL, 세션 발급, 토큰 파일, REST 조회)
//! - 브로커 에러 분류 (재시도 가능 여부, 인증 에러)

pub mod connector;
pub mod error;
pub mod traits;

pub use connector::kite::{
    load_access_token, save_access_token, KiteClient, KiteConfig, KiteSession, Profile,
    SessionData,
};
pub use error::*;
pub use traits::*;
