//! 수집 통계 구조체.

use crate::modules::SymbolOutcome;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// 수집 작업 통계
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CollectionStats {
    /// 저장된 회사 레코드 수
    pub companies: usize,
    /// 처리한 심볼 수
    pub total: usize,
    /// 가격을 한 건 이상 저장한 심볼 수
    pub success: usize,
    /// 조회에 실패한 심볼 수
    pub errors: usize,
    /// 빈 데이터 (조회 성공, 저장할 행 없음)
    pub empty: usize,
    /// 저장된 총 일봉 수
    pub total_rows: usize,
    /// 파싱 실패로 건너뛴 행 수
    pub skipped_rows: usize,
    /// 소요 시간
    #[serde(skip)]
    pub elapsed: Duration,
}

impl CollectionStats {
    /// 새 통계 객체 생성
    pub fn new() -> Self {
        Self::default()
    }

    /// 심볼 하나의 결과 반영
    pub fn record(&mut self, outcome: &SymbolOutcome) {
        self.total += 1;
        match outcome {
            SymbolOutcome::Ingested {
                written,
                skipped_rows,
            } => {
                self.total_rows += written;
                self.skipped_rows += skipped_rows;
                if *written > 0 {
                    self.success += 1;
                } else {
                    self.empty += 1;
                }
            }
            SymbolOutcome::Failed { .. } => self.errors += 1,
        }
    }

    /// 성공률 계산 (%)
    pub fn success_rate(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            (self.success as f64 / self.total as f64) * 100.0
        }
    }

    /// 통계 요약 로그 출력
    pub fn log_summary(&self, operation: &str) {
        tracing::info!(
            operation = operation,
            companies = self.companies,
            total = self.total,
            success = self.success,
            errors = self.errors,
            empty = self.empty,
            total_rows = self.total_rows,
            skipped_rows = self.skipped_rows,
            success_rate = format!("{:.1}%", self.success_rate()),
            elapsed = format!("{:.1}s", self.elapsed.as_secs_f64()),
            "수집 완료"
        );
    }
}
