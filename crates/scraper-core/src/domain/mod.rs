//! 수집 대상 도메인 레코드.

mod company;
mod daily_price;

pub use company::*;
pub use daily_price::*;
