//! 회사 디렉터리 및 일봉 가격 수집기.
//!
//! 이 crate는 수집 파이프라인과 바이너리를 제공합니다:
//! - 회사 디렉터리 동기화 (벌크 CSV, 심볼 필터 지원)
//! - 심볼별 일봉 가격 수집 (순차 처리)
//! - 수집 범위 결정과 빈 디렉터리 부트스트랩

pub mod config;
pub mod context;
pub mod error;
pub mod modules;
pub mod stats;

pub use config::{parse_symbol_list, CollectorConfig};
pub use context::RunContext;
pub use error::{CollectorError, Result};
pub use stats::CollectionStats;
