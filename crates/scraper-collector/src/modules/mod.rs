//! 데이터 수집 모듈.

pub mod company_sync;
pub mod orchestrator;
pub mod price_collect;

pub use company_sync::{ingest_companies, sync_companies};
pub use orchestrator::{run, PROGRESS_INTERVAL};
pub use price_collect::{ingest_symbol, SymbolOutcome};
