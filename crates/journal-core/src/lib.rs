//! # Journal Core
//!
//! 매매일지 자동화의 핵심 도메인 모델 및 공통 인프라를 제공합니다.
//!
//! 이 크레이트는 워크스페이스 전반에서 사용되는 기본 타입을 제공합니다:
//! - 체결 기록 (`Trade`) 및 보유 종목 스냅샷 (`Holding`)
//! - 청산 거래 (`ClosedTrade`) 및 성과 기록 (`PerformanceRecord`)
//! - 정밀 소수점 타입 및 행 파싱 유틸리티
//! - 설정 관리
//! - 로깅 인프라

pub mod config;
pub mod domain;
pub mod error;
pub mod logging;
pub mod types;

pub use config::*;
pub use domain::*;
pub use error::*;
pub use logging::*;
pub use types::*;
