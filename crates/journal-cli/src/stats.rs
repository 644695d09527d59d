//! 실행 통계 구조체.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use journal_data::TableReport;

/// 명령 한 번의 실행 통계
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunStats {
    /// 읽은 입력 행 수 (API 응답 포함)
    pub rows_read: usize,
    /// 건너뛴 행 수 (잘못된 행, 매입가 없는 청산 거래)
    pub skipped: usize,
    /// 파일/원장에 기록한 행 수
    pub emitted: usize,
    /// 스프레드시트에 업로드한 행 수
    pub uploaded: usize,
    /// 소요 시간
    #[serde(skip)]
    pub elapsed: Duration,
}

impl RunStats {
    /// 새 통계 객체 생성
    pub fn new() -> Self {
        Self::default()
    }

    /// 테이블 읽기 결과를 반영합니다.
    pub fn record_read(&mut self, report: &TableReport) {
        self.rows_read += report.rows_read;
        self.skipped += report.skipped;
    }

    /// 다른 단계의 통계를 합칩니다.
    pub fn merge(&mut self, other: &RunStats) {
        self.rows_read += other.rows_read;
        self.skipped += other.skipped;
        self.emitted += other.emitted;
        self.uploaded += other.uploaded;
    }

    /// 통계 요약 로그 출력
    pub fn log_summary(&self, operation: &str) {
        tracing::info!(
            operation = operation,
            rows_read = self.rows_read,
            skipped = self.skipped,
            emitted = self.emitted,
            uploaded = self.uploaded,
            elapsed = format!("{:.1}s", self.elapsed.as_secs_f64()),
            "실행 완료"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_read_and_merge() {
        let mut stats = RunStats::new();
        stats.record_read(&TableReport {
            rows_read: 5,
            skipped: 1,
        });
        stats.emitted = 4;

        let mut total = RunStats {
            uploaded: 3,
            ..Default::default()
        };
        total.merge(&stats);

        assert_eq!(total.rows_read, 5);
        assert_eq!(total.skipped, 1);
        assert_eq!(total.emitted, 4);
        assert_eq!(total.uploaded, 3);
    }
}
