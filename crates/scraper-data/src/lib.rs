//! 업스트림 데이터 소스와 문서 저장소.
//!
//! 이 crate는 다음을 제공합니다:
//! - 회사 디렉터리 Provider (벌크 CSV 내보내기)
//! - 일봉 가격 Provider (심볼별 기간 CSV)
//! - 문서 저장소 추상화 (PostgreSQL JSONB, 인메모리)

pub mod error;
pub mod provider;
pub mod storage;

pub use error::{DataError, Result};

pub use provider::{
    company_rows, price_history_url, price_rows, CompanyDirectoryProvider, CompanyRow,
    PriceHistoryProvider, DEFAULT_COMPANY_DIRECTORY_URL, DEFAULT_PRICE_HISTORY_URL,
};
pub use storage::{CollectionNames, DocumentStore, MemoryStore, PgDocumentStore};
