//! 스프레드시트 업로드 서비스.
//!
//! 이 크레이트는 다음을 제공합니다:
//! - SheetUploader trait: 2차원 테이블을 탭에 추가/덮어쓰기
//! - Google Sheets/Drive 업로더 (스프레드시트 조회 또는 생성 포함)
//! - 업로드 비활성화용 NoopUploader

pub mod credentials;
pub mod google;
pub mod types;

pub use credentials::GoogleCredentials;
pub use google::{GoogleSheetsClient, GoogleSheetsConfig};
pub use types::*;
