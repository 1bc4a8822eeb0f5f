//! 일봉 가격 Provider.
//!
//! 심볼과 기간으로 조회 URL을 만들고 따옴표 없는 CSV 본문을 받아옵니다.
//! 업스트림 쿼리 규칙:
//! - 월은 0부터 시작 (1월 = 0)
//! - 종료일 파라미터(d, e, f)가 시작일 파라미터(a, b, c)보다 먼저 옴

use crate::error::{DataError, Result};
use chrono::{Datelike, NaiveDate};
use reqwest::{StatusCode, Url};
use scraper_core::{DailyPrice, DateRange, PriceKey};
use tracing::debug;

/// 기본 일봉 가격 엔드포인트.
pub const DEFAULT_PRICE_HISTORY_URL: &str = "http://ichart.finance.yahoo.com/table.csv";

/// 가격 CSV 컬럼 위치.
pub mod columns {
    pub const DATE: usize = 0;
    pub const OPEN: usize = 1;
    pub const HIGH: usize = 2;
    pub const LOW: usize = 3;
    pub const CLOSE: usize = 4;
    pub const VOLUME: usize = 5;
    pub const ADJ_CLOSE: usize = 6;

    /// 한 행의 정확한 필드 수
    pub const FIELD_COUNT: usize = 7;
}

/// 조회 URL 쿼리 파라미터 이름.
pub mod params {
    pub const SYMBOL: &str = "s";
    pub const END_MONTH: &str = "d";
    pub const END_DAY: &str = "e";
    pub const END_YEAR: &str = "f";
    pub const INTERVAL: &str = "g";
    pub const START_MONTH: &str = "a";
    pub const START_DAY: &str = "b";
    pub const START_YEAR: &str = "c";

    /// 일봉 간격 값
    pub const DAILY: &str = "d";
}

/// (월, 일, 연) 쿼리 값. 월은 0부터 셉니다.
fn date_params(date: NaiveDate) -> (String, String, String) {
    (
        date.month0().to_string(),
        date.day().to_string(),
        date.year().to_string(),
    )
}

/// 심볼과 기간으로 가격 조회 URL을 만듭니다.
pub fn price_history_url(base: &str, symbol: &str, range: &DateRange) -> Result<Url> {
    let (end_month, end_day, end_year) = date_params(range.end);
    let (start_month, start_day, start_year) = date_params(range.start);

    let query = [
        (params::SYMBOL, symbol.to_string()),
        (params::END_MONTH, end_month),
        (params::END_DAY, end_day),
        (params::END_YEAR, end_year),
        (params::INTERVAL, params::DAILY.to_string()),
        (params::START_MONTH, start_month),
        (params::START_DAY, start_day),
        (params::START_YEAR, start_year),
    ];

    Url::parse_with_params(base, &query)
        .map_err(|e| DataError::FetchError(format!("url error: {} ({})", base, e)))
}

/// 일봉 가격 HTTP Provider.
#[derive(Debug, Clone)]
pub struct PriceHistoryProvider {
    client: reqwest::Client,
    base_url: String,
}

impl PriceHistoryProvider {
    pub fn new(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// 한 심볼의 기간 CSV 본문을 가져옵니다.
    pub async fn fetch(&self, symbol: &str, range: &DateRange) -> Result<String> {
        let url = price_history_url(&self.base_url, symbol, range)?;
        let response = self.client.get(url.clone()).send().await?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(DataError::FetchError(format!(
                "Response not 200 OK, code={}, url={}",
                status.as_u16(),
                url
            )));
        }
        debug!(symbol, code = status.as_u16(), "가격 응답 수신");

        Ok(response.text().await?)
    }
}

/// 가격 CSV 본문을 레코드 단위로 읽습니다.
///
/// 첫 줄(헤더)은 버리고 빈 줄은 건너뜁니다.
pub fn price_rows<'a>(
    symbol: &'a str,
    body: &'a str,
) -> impl Iterator<Item = Result<DailyPrice>> + 'a {
    body.lines()
        .enumerate()
        .skip(1)
        .filter(|(_, line)| !line.trim().is_empty())
        .map(move |(idx, line)| parse_price_line(symbol, idx + 1, line))
}

/// `date,open,high,low,close,volume,adj_close` 한 줄을 파싱합니다.
fn parse_price_line(symbol: &str, line_no: usize, line: &str) -> Result<DailyPrice> {
    let parts: Vec<&str> = line.split(',').collect();
    if parts.len() != columns::FIELD_COUNT {
        return Err(DataError::ParseError(format!(
            "{} line {}: expected {} fields, found {}",
            symbol,
            line_no,
            columns::FIELD_COUNT,
            parts.len()
        )));
    }

    let number = |column: usize, field: &str| -> Result<f64> {
        parts[column].trim().parse::<f64>().map_err(|e| {
            DataError::ParseError(format!(
                "{} line {}: invalid {} '{}': {}",
                symbol, line_no, field, parts[column], e
            ))
        })
    };

    let volume = parts[columns::VOLUME].trim().parse::<i64>().map_err(|e| {
        DataError::ParseError(format!(
            "{} line {}: invalid volume '{}': {}",
            symbol,
            line_no,
            parts[columns::VOLUME],
            e
        ))
    })?;

    Ok(DailyPrice {
        key: PriceKey::new(symbol, parts[columns::DATE]),
        open: number(columns::OPEN, "open")?,
        high: number(columns::HIGH, "high")?,
        low: number(columns::LOW, "low")?,
        close: number(columns::CLOSE, "close")?,
        volume,
        adj_close: number(columns::ADJ_CLOSE, "adj close")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range(start: (i32, u32, u32), end: (i32, u32, u32)) -> DateRange {
        DateRange::new(
            NaiveDate::from_ymd_opt(start.0, start.1, start.2).unwrap(),
            NaiveDate::from_ymd_opt(end.0, end.1, end.2).unwrap(),
        )
    }

    #[test]
    fn test_url_uses_zero_indexed_months_and_end_first() {
        let url = price_history_url(
            DEFAULT_PRICE_HISTORY_URL,
            "AAPL",
            &range((2023, 1, 1), (2024, 7, 15)),
        )
        .unwrap();

        assert_eq!(url.path(), "/table.csv");
        assert_eq!(
            url.query(),
            Some("s=AAPL&d=6&e=15&f=2024&g=d&a=0&b=1&c=2023")
        );
    }

    #[test]
    fn test_url_december_is_eleven() {
        let url = price_history_url(
            DEFAULT_PRICE_HISTORY_URL,
            "MSFT",
            &range((2022, 12, 31), (2023, 12, 1)),
        )
        .unwrap();

        assert_eq!(
            url.query(),
            Some("s=MSFT&d=11&e=1&f=2023&g=d&a=11&b=31&c=2022")
        );
    }

    #[test]
    fn test_malformed_base_is_fetch_error() {
        let err = price_history_url("not a url", "AAPL", &range((2023, 1, 1), (2023, 2, 1)))
            .unwrap_err();
        assert!(err.is_fetch());
    }

    #[test]
    fn test_parse_rows_skips_header() {
        let body = "Date,Open,High,Low,Close,Volume,Adj Close\n\
                    2020-01-02,100,105,95,102,1000000,102\n\
                    2020-01-03,102,104,99.5,101.25,850000,101.1\n";
        let prices: Vec<DailyPrice> = price_rows("AAPL", body).collect::<Result<_>>().unwrap();

        assert_eq!(prices.len(), 2);
        assert_eq!(prices[0].key, PriceKey::new("AAPL", "2020-01-02"));
        assert_eq!(prices[0].close, 102.0);
        assert_eq!(prices[0].volume, 1_000_000);
        assert_eq!(prices[1].low, 99.5);
        assert_eq!(prices[1].adj_close, 101.1);
    }

    #[test]
    fn test_wrong_field_count_is_parse_error() {
        let body = "Date,Open,High,Low,Close,Volume,Adj Close\n2020-01-02,100,105,95,102\n";
        let results: Vec<_> = price_rows("AAPL", body).collect();

        assert_eq!(results.len(), 1);
        let err = results[0].as_ref().unwrap_err();
        assert!(err.is_parse());
        assert!(err.to_string().contains("line 2"));
    }

    #[test]
    fn test_bad_row_does_not_hide_following_rows() {
        let body = "Date,Open,High,Low,Close,Volume,Adj Close\n\
                    2020-01-02,abc,105,95,102,1000000,102\n\
                    2020-01-03,102,104,99,101,850000,101\n";
        let results: Vec<_> = price_rows("AAPL", body).collect();

        assert!(results[0].is_err());
        assert_eq!(results[1].as_ref().unwrap().key.date, "2020-01-03");
    }

    #[tokio::test]
    async fn test_fetch_non_ok_includes_code_and_url() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/table.csv")
            .match_query(mockito::Matcher::Any)
            .with_status(404)
            .create_async()
            .await;

        let provider =
            PriceHistoryProvider::new(reqwest::Client::new(), format!("{}/table.csv", server.url()));
        let err = provider
            .fetch("ZZZZ", &range((2023, 1, 1), (2023, 6, 30)))
            .await
            .unwrap_err();

        let message = err.to_string();
        assert!(err.is_fetch());
        assert!(message.contains("code=404"));
        assert!(message.contains("s=ZZZZ"));
    }
}
