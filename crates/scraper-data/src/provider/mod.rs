//! 업스트림 HTTP 데이터 소스.

pub mod company_directory;
pub mod price_history;

pub use company_directory::{
    company_rows, CompanyDirectoryProvider, CompanyRow, DEFAULT_COMPANY_DIRECTORY_URL,
};
pub use price_history::{
    price_history_url, price_rows, PriceHistoryProvider, DEFAULT_PRICE_HISTORY_URL,
};
