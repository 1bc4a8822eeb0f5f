//! 문서 저장소.
//!
//! 두 개의 논리 컬렉션을 다룹니다:
//! - 회사 디렉터리 (심볼 키)
//! - 일봉 가격 (심볼 + 거래일 키)
//!
//! 모든 쓰기는 키 기반 upsert이므로 같은 입력을 다시 넣어도 결과가 같습니다.

pub mod memory;
pub mod postgres;

use crate::error::Result;
use async_trait::async_trait;
use scraper_core::{Company, DailyPrice};

pub use memory::MemoryStore;
pub use postgres::{CollectionNames, PgDocumentStore};

/// 수집기가 사용하는 저장소 인터페이스.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// 저장소 이름 (로그용).
    fn name(&self) -> &str;

    /// 회사 레코드를 심볼 키로 upsert합니다.
    async fn upsert_company(&self, company: &Company) -> Result<()>;

    /// 일봉 레코드를 (심볼, 거래일) 키로 upsert합니다.
    async fn upsert_daily_price(&self, price: &DailyPrice) -> Result<()>;

    /// 저장된 회사 심볼 목록 (키만 조회).
    async fn company_symbols(&self) -> Result<Vec<String>>;
}
