//! 성과 분석 모듈.
//!
//! 청산 거래 목록으로부터 집계 성과 기록을 계산합니다.
//!
//! # 모듈 구성
//!
//! - [`metrics`]: 거래별 손익 계산 및 성과 집계

pub mod metrics;

pub use metrics::*;
