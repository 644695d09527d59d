//! tracing 기반 로깅 초기화.
//!
//! 출력 형식은 설정 파일의 `logging.format` 또는 `LOG_FORMAT` 환경 변수로 고릅니다.
//! 수동 실행에는 `pretty`, cron 같은 스케줄러에서는 `json` 또는 `compact`를 씁니다.
//! 레벨 필터는 `RUST_LOG`가 있으면 그것을, 없으면 `logging.level`을 사용합니다.

use tracing::Subscriber;
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    registry::LookupSpan,
    util::SubscriberInitExt,
    EnvFilter, Layer,
};

use crate::config::LoggingConfig;
use crate::error::{JournalError, JournalResult};

/// 로그 출력 형식.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
    Compact,
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            "compact" => Ok(Self::Compact),
            other => Err(format!("Unknown log format: {}", other)),
        }
    }
}

/// 로거 초기화 옵션.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// 레벨 필터 (예: "info", "journal_data=debug,info")
    pub level: String,
    pub format: LogFormat,
    /// 명령 span 종료 시 소요 시간 이벤트 출력
    pub span_timing: bool,
    /// 이벤트에 모듈 경로 표시
    pub with_target: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
            span_timing: false,
            with_target: true,
        }
    }
}

impl LogConfig {
    /// 설정 파일의 `[logging]` 섹션으로 옵션을 만듭니다.
    ///
    /// 형식 우선순위: `LOG_FORMAT` 환경 변수 → `logging.format` → pretty.
    /// 알 수 없는 형식 문자열은 무시합니다.
    pub fn from_settings(settings: &LoggingConfig) -> Self {
        let format = std::env::var("LOG_FORMAT")
            .ok()
            .and_then(|s| s.parse().ok())
            .or_else(|| settings.format.parse().ok())
            .unwrap_or_default();

        Self {
            level: settings.level.clone(),
            format,
            // 스케줄러 로그에서 명령별 소요 시간을 남김
            span_timing: format != LogFormat::Pretty,
            ..Default::default()
        }
    }

    fn filter(&self) -> JournalResult<EnvFilter> {
        EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(&self.level))
            .map_err(|e| JournalError::Config(format!("잘못된 로그 레벨 '{}': {}", self.level, e)))
    }

    fn fmt_layer<S>(&self) -> Box<dyn Layer<S> + Send + Sync>
    where
        S: Subscriber + for<'a> LookupSpan<'a>,
    {
        let span_events = if self.span_timing {
            FmtSpan::CLOSE
        } else {
            FmtSpan::NONE
        };

        let layer = fmt::layer()
            .with_target(self.with_target)
            .with_span_events(span_events);

        match self.format {
            LogFormat::Pretty => layer.pretty().boxed(),
            LogFormat::Json => layer.json().boxed(),
            LogFormat::Compact => layer.compact().boxed(),
        }
    }
}

/// 전역 tracing subscriber를 설치합니다.
///
/// 프로세스당 한 번만 호출할 수 있으며, 두 번째 호출은 `JournalError::Config`를 반환합니다.
pub fn init_logging(config: &LogConfig) -> JournalResult<()> {
    tracing_subscriber::registry()
        .with(config.filter()?)
        .with(config.fmt_layer())
        .try_init()
        .map_err(|e| JournalError::Config(format!("로깅 초기화 실패: {}", e)))?;

    tracing::debug!(format = ?config.format, level = %config.level, "Logging initialized");
    Ok(())
}

/// 실행 날짜(와 대상 파일)를 필드로 가진 명령 span을 만듭니다.
#[macro_export]
macro_rules! journal_span {
    ($name:expr, $date:expr) => {
        tracing::info_span!($name, date = %$date)
    };
    ($name:expr, $date:expr, $file:expr) => {
        tracing::info_span!($name, date = %$date, file = %$file)
    };
}
