//! Kite 로그인 명령.
//!
//! 로그인 URL을 출력하고, 사용자가 브라우저 로그인 후 리다이렉트 URL에서 얻은
//! `request_token`을 표준 입력으로 받아 접근 토큰을 발급·저장합니다.

use anyhow::{bail, Context, Result};
use std::io::{BufRead, Write};
use tracing::info;

use journal_core::AppConfig;
use journal_exchange::{save_access_token, KiteClient, KiteConfig, KiteSession, Profile};

/// 로그인 절차를 실행하고 로그인한 사용자 프로필을 반환합니다.
pub async fn login<R: BufRead>(config: &AppConfig, mut input: R) -> Result<Profile> {
    let kite_config = KiteConfig::from(&config.kite);
    let session = KiteSession::new(kite_config.clone())?;

    println!("Login URL: {}", session.login_url());
    print!("Enter request_token: ");
    std::io::stdout().flush().ok();

    let mut request_token = String::new();
    input
        .read_line(&mut request_token)
        .context("Failed to read request_token from stdin")?;
    if request_token.trim().is_empty() {
        bail!("request_token is empty");
    }

    let data = session
        .generate_session(&request_token)
        .await
        .context("Failed to generate Kite session")?;

    let token_file = &config.kite.access_token_file;
    save_access_token(token_file, &data.access_token)?;
    info!(file = %token_file.display(), "Access token saved");

    let client = KiteClient::new(kite_config, data.access_token)?;
    let profile = client
        .profile()
        .await
        .context("Failed to fetch profile with the new access token")?;

    Ok(profile)
}
