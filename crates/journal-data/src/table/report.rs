//! 테이블 읽기 결과 집계.

use serde::Serialize;

/// 테이블 읽기 결과.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TableReport {
    /// 읽은 데이터 행 수 (헤더 제외)
    pub rows_read: usize,
    /// 건너뛴 행 수
    pub skipped: usize,
}

impl TableReport {
    /// 정상적으로 변환된 행 수.
    pub fn accepted(&self) -> usize {
        self.rows_read - self.skipped
    }

    /// 두 결과를 합칩니다.
    pub fn merge(self, other: TableReport) -> TableReport {
        TableReport {
            rows_read: self.rows_read + other.rows_read,
            skipped: self.skipped + other.skipped,
        }
    }
}
