//! 매매일지 CLI.
//!
//! # 사용 예시
//!
//! ```bash
//! # 브라우저 로그인 후 request_token 입력, 접근 토큰 저장
//! journal login
//!
//! # 당일 체결/보유 종목 수집 → CSV 저장 → 업로드 → 청산 거래 생성
//! journal daily
//!
//! # 저장된 CSV로 청산 거래만 다시 생성 (네트워크 없음)
//! journal closed-trades --date 2025-06-13
//!
//! # 청산 거래 집계 후 성과 원장에 한 행 추가
//! journal metrics --input closed_trades_130625.csv
//!
//! # daily + metrics
//! journal run-all
//! ```

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::io;
use std::path::PathBuf;
use tracing::{info, Instrument};

use journal_cli::{
    generate_closed_trades, login, parse_date, run_daily, run_metrics, MetricsOutcome,
};
use journal_core::{
    init_logging, journal_span, AppConfig, DecimalExt, LogConfig, AMOUNT_DP, DEFAULT_CONFIG_PATH,
    PERCENT_DP,
};
use journal_data::CsvLedger;
use journal_exchange::{KiteClient, KiteConfig};
use journal_sheets::{GoogleSheetsClient, GoogleSheetsConfig, NoopUploader, SheetUploader};

#[derive(Parser)]
#[command(name = "journal")]
#[command(about = "Daily trade journal - Kite 체결 수집, 청산 거래, 성과 원장", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// 설정 파일 경로
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// 기준 날짜 (YYYY-MM-DD, 기본값: 설정된 타임존의 오늘)
    #[arg(long, global = true)]
    date: Option<String>,

    /// 로그 레벨 (설정 파일의 logging.level보다 우선)
    #[arg(long, global = true)]
    log_level: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Kite 로그인 후 접근 토큰 저장
    Login,

    /// 당일 체결/보유 종목 수집 및 업로드, 청산 거래 생성
    Daily,

    /// 저장된 체결/보유 종목 CSV로 청산 거래 생성 (오프라인)
    ClosedTrades,

    /// 청산 거래 집계 후 성과 원장에 추가
    Metrics {
        /// 청산 거래 CSV (기본값: 당일 closed_trades 파일)
        #[arg(short, long)]
        input: Option<PathBuf>,
    },

    /// 전체 워크플로우 실행 (daily → metrics)
    RunAll,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load(&cli.config)
        .with_context(|| format!("Failed to load config from {}", cli.config.display()))?;
    if let Some(level) = &cli.log_level {
        config.logging.level = level.clone();
    }

    init_logging(&LogConfig::from_settings(&config.logging))?;

    let date = match &cli.date {
        Some(raw) => parse_date(raw)?,
        None => config.today()?,
    };

    match cli.command {
        Commands::Login => {
            let profile = login(&config, io::stdin().lock())
                .instrument(journal_span!("login", date))
                .await?;
            println!("Logged in as: {}", profile.user_name);
        }
        Commands::Daily => {
            daily(&config, date).await?;
        }
        Commands::ClosedTrades => {
            let outcome = journal_span!("closed_trades", date)
                .in_scope(|| generate_closed_trades(&config, date))?;
            outcome.stats.log_summary("청산 거래 생성");
        }
        Commands::Metrics { input } => {
            metrics(&config, date, input)?;
        }
        Commands::RunAll => {
            info!("=== 전체 워크플로우 시작 ===");

            info!("Step 1/2: 일별 수집");
            daily(&config, date).await?;

            info!("Step 2/2: 성과 집계");
            metrics(&config, date, None)?;

            info!("=== 전체 워크플로우 완료 ===");
        }
    }

    Ok(())
}

async fn daily(config: &AppConfig, date: NaiveDate) -> Result<()> {
    let broker = KiteClient::from_token_file(
        KiteConfig::from(&config.kite),
        &config.kite.access_token_file,
    )
    .context("Failed to load Kite access token (run `journal login` first)")?;
    let uploader = build_uploader(config)?;

    let stats = run_daily(config, date, &broker, uploader.as_ref())
        .instrument(journal_span!("daily", date))
        .await?;
    stats.log_summary("일별 수집");
    Ok(())
}

fn metrics(config: &AppConfig, date: NaiveDate, input: Option<PathBuf>) -> Result<()> {
    let mut ledger = CsvLedger::new(config.paths.ledger_path())
        .with_date_format(config.paths.row_date_format.clone());

    let outcome = journal_span!("metrics", date, ledger.path().display())
        .in_scope(|| run_metrics(config, date, input.as_deref(), &mut ledger))?;
    outcome.stats.log_summary("성과 집계");
    print_summary(&outcome);
    Ok(())
}

/// 스프레드시트 업로드가 꺼져 있으면 아무것도 하지 않는 업로더를 사용합니다.
fn build_uploader(config: &AppConfig) -> Result<Box<dyn SheetUploader>> {
    if !config.sheets.enabled {
        info!("Spreadsheet upload disabled");
        return Ok(Box::new(NoopUploader));
    }

    let client = GoogleSheetsClient::new(GoogleSheetsConfig::from(&config.sheets))
        .context("Failed to initialize Google Sheets uploader")?;
    Ok(Box::new(client))
}

fn print_summary(outcome: &MetricsOutcome) {
    let record = &outcome.record;
    let counts = &outcome.counts;

    println!("Performance for {}", record.date);
    println!(
        "  trades: {} (win {}, loss {}, skipped {})",
        counts.total, counts.winning, counts.losing, counts.skipped
    );
    println!(
        "  invested: {}  pnl: {} ({}%)",
        record.total_invested.to_fixed(AMOUNT_DP),
        record.total_pnl_amount.to_fixed(AMOUNT_DP),
        record.total_pnl_percent.to_fixed(PERCENT_DP)
    );
    println!(
        "  risk/reward: {}  expectancy: {}",
        record.risk_reward_ratio,
        record.expectancy.to_fixed(AMOUNT_DP)
    );
    if let Some(rows) = outcome.ledger_rows {
        println!("  ledger rows: {}", rows);
    }
}
