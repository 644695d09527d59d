//! 매매일지 도메인 모델.

mod closed_trade;
mod holding;
mod performance;
mod trade;

pub use closed_trade::*;
pub use holding::*;
pub use performance::*;
pub use trade::*;
