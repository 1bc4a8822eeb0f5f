//! 일봉 가격 레코드.

use serde::{Deserialize, Serialize};
use std::fmt;

/// 일봉 레코드의 복합 키 (심볼, 거래일).
///
/// 거래일은 업스트림이 준 문자열을 그대로 보관합니다.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PriceKey {
    #[serde(rename = "sym")]
    pub symbol: String,
    #[serde(rename = "dt")]
    pub date: String,
}

impl PriceKey {
    pub fn new(symbol: impl Into<String>, date: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            date: date.into(),
        }
    }
}

impl fmt::Display for PriceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.symbol, self.date)
    }
}

/// 하루치 OHLCV 가격 레코드.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyPrice {
    #[serde(rename = "_id")]
    pub key: PriceKey,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    #[serde(rename = "vol")]
    pub volume: i64,
    #[serde(rename = "adjClose")]
    pub adj_close: f64,
}
