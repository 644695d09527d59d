//! 매매일지 CLI.
//!
//! 이 crate는 `journal` 바이너리의 명령 구현을 제공합니다:
//! - Kite 로그인 및 접근 토큰 저장
//! - 당일 체결/보유 종목 수집, CSV 저장, 스프레드시트 업로드
//! - 청산 거래 생성 및 성과 원장 기록

pub mod commands;
pub mod stats;

pub use commands::closed_trades::{generate_closed_trades, ClosedTradesOutcome};
pub use commands::daily::run_daily;
pub use commands::login::login;
pub use commands::metrics::{metrics_input, run_metrics, MetricsOutcome};
pub use commands::parse_date;
pub use stats::RunStats;
