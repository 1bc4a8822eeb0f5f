//! 회사 디렉터리 Provider.
//!
//! 벌크 내보내기 엔드포인트에서 전 종목 목록을 한 번의 GET으로 받아옵니다.
//! 응답은 큰따옴표로 감싼 쉼표 구분 CSV이며 첫 줄은 헤더입니다.
//!
//! 첫 번째 컬럼(0번)은 사용하지 않습니다. 심볼은 1번 컬럼부터 시작하며
//! 이 배치는 업스트림 스키마 그대로 유지합니다.

use crate::error::{DataError, Result};
use csv::{ReaderBuilder, StringRecord};
use reqwest::StatusCode;
use scraper_core::Company;
use tracing::debug;

/// 기본 회사 디렉터리 엔드포인트.
pub const DEFAULT_COMPANY_DIRECTORY_URL: &str = "http://finviz.com/export.ashx?v=111&&o=ticker";

/// 회사 디렉터리 CSV 컬럼 위치 (0부터).
pub mod columns {
    pub const SYMBOL: usize = 1;
    pub const NAME: usize = 2;
    pub const SECTOR: usize = 3;
    pub const INDUSTRY: usize = 4;
    pub const COUNTRY: usize = 5;
    pub const MARKET_CAP: usize = 6;
    pub const PE: usize = 7;
    pub const PRICE: usize = 8;
    pub const CHANGE: usize = 9;
    pub const VOLUME: usize = 10;

    /// 한 행이 가져야 하는 최소 컬럼 수
    pub const MIN_COLUMNS: usize = VOLUME + 1;
}

/// 회사 디렉터리 HTTP Provider.
#[derive(Debug, Clone)]
pub struct CompanyDirectoryProvider {
    client: reqwest::Client,
    url: String,
}

impl CompanyDirectoryProvider {
    pub fn new(client: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// 디렉터리 CSV 본문을 가져옵니다.
    ///
    /// 200 이외의 응답은 관측된 상태 코드를 담은 `FetchError`가 됩니다.
    pub async fn fetch(&self) -> Result<String> {
        let response = self.client.get(&self.url).send().await?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(DataError::FetchError(format!(
                "Response not 200 OK, code={}",
                status.as_u16()
            )));
        }
        debug!(code = status.as_u16(), "회사 디렉터리 응답 수신");

        Ok(response.text().await?)
    }
}

/// 헤더를 제외한 디렉터리 CSV 한 행.
#[derive(Debug, Clone)]
pub struct CompanyRow {
    record: StringRecord,
    line: u64,
}

impl CompanyRow {
    /// 심볼 컬럼 값. 행이 너무 짧으면 `None`.
    pub fn symbol(&self) -> Option<&str> {
        self.record.get(columns::SYMBOL)
    }

    /// 원본 CSV의 줄 번호 (1부터).
    pub fn line(&self) -> u64 {
        self.line
    }

    /// 행을 회사 레코드로 변환합니다.
    ///
    /// 문자열 필드는 그대로 저장하고, 숫자 필드는 비어 있으면 생략합니다.
    /// 등락률은 `%` 기호를 제거한 뒤 변환합니다.
    pub fn parse(&self) -> Result<Company> {
        let rec = &self.record;
        if rec.len() < columns::MIN_COLUMNS {
            return Err(DataError::ParseError(format!(
                "line {}: expected at least {} columns, found {}",
                self.line,
                columns::MIN_COLUMNS,
                rec.len()
            )));
        }

        Ok(Company {
            symbol: rec[columns::SYMBOL].to_string(),
            name: rec[columns::NAME].to_string(),
            sector: rec[columns::SECTOR].to_string(),
            industry: rec[columns::INDUSTRY].to_string(),
            country: rec[columns::COUNTRY].to_string(),
            market_cap: self.optional(columns::MARKET_CAP, "mcap", &rec[columns::MARKET_CAP])?,
            pe_ratio: self.optional(columns::PE, "pe", &rec[columns::PE])?,
            price: self.optional(columns::PRICE, "price", &rec[columns::PRICE])?,
            change_pct: self.optional(
                columns::CHANGE,
                "change",
                &rec[columns::CHANGE].replace('%', ""),
            )?,
            volume: self.optional(columns::VOLUME, "volume", &rec[columns::VOLUME])?,
        })
    }

    fn optional<T>(&self, column: usize, field: &str, raw: &str) -> Result<Option<T>>
    where
        T: std::str::FromStr,
        T::Err: std::fmt::Display,
    {
        if raw.is_empty() {
            return Ok(None);
        }
        raw.trim().parse::<T>().map(Some).map_err(|e| {
            DataError::ParseError(format!(
                "line {}, column {} ({}): invalid value '{}': {}",
                self.line, column, field, raw, e
            ))
        })
    }
}

/// 디렉터리 CSV 본문을 행 단위로 읽습니다. 헤더 한 줄은 건너뜁니다.
pub fn company_rows(body: &str) -> impl Iterator<Item = Result<CompanyRow>> + '_ {
    ReaderBuilder::new()
        .delimiter(b',')
        .quote(b'"')
        .has_headers(true)
        .flexible(true)
        .from_reader(body.as_bytes())
        .into_records()
        .map(|record| -> Result<CompanyRow> {
            let record = record?;
            let line = record.position().map(|p| p.line()).unwrap_or_default();
            Ok(CompanyRow { record, line })
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str =
        "\"No.\",\"Ticker\",\"Company\",\"Sector\",\"Industry\",\"Country\",\"Market Cap\",\"P/E\",\"Price\",\"Change\",\"Volume\"";

    fn rows(body: &str) -> Vec<CompanyRow> {
        company_rows(body).collect::<Result<Vec<_>>>().unwrap()
    }

    #[test]
    fn test_parse_full_row() {
        let body = format!(
            "{}\n\"1\",\"AAPL\",\"Apple Inc.\",\"Technology\",\"Consumer Electronics\",\"USA\",\"2950000.5\",\"29.1\",\"189.50\",\"-1.25%\",\"53000000\"\n",
            HEADER
        );
        let rows = rows(&body);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].symbol(), Some("AAPL"));

        let company = rows[0].parse().unwrap();
        assert_eq!(company.symbol, "AAPL");
        assert_eq!(company.name, "Apple Inc.");
        assert_eq!(company.industry, "Consumer Electronics");
        assert_eq!(company.market_cap, Some(2950000.5));
        assert_eq!(company.pe_ratio, Some(29.1));
        assert_eq!(company.price, Some(189.5));
        assert_eq!(company.change_pct, Some(-1.25));
        assert_eq!(company.volume, Some(53_000_000));
    }

    #[test]
    fn test_blank_optional_fields_are_absent() {
        let body = format!(
            "{}\n\"2\",\"XYZ\",\"Xyz Corp\",\"Financial\",\"Banks\",\"USA\",\"\",\"\",\"12.00\",\"\",\"\"\n",
            HEADER
        );
        let company = rows(&body)[0].parse().unwrap();

        assert_eq!(company.market_cap, None);
        assert_eq!(company.pe_ratio, None);
        assert_eq!(company.price, Some(12.0));
        assert_eq!(company.change_pct, None);
        assert_eq!(company.volume, None);
    }

    #[test]
    fn test_quoted_field_with_comma_stays_verbatim() {
        let body = format!(
            "{}\n\"3\",\"BRK-B\",\"Berkshire Hathaway, Inc.\",\"Financial\",\"Insurance\",\"USA\",\"\",\"\",\"\",\"0.10%\",\"\"\n",
            HEADER
        );
        let company = rows(&body)[0].parse().unwrap();

        assert_eq!(company.name, "Berkshire Hathaway, Inc.");
        assert_eq!(company.change_pct, Some(0.1));
    }

    #[test]
    fn test_non_numeric_field_is_parse_error() {
        let body = format!(
            "{}\n\"4\",\"BAD\",\"Bad Co\",\"Energy\",\"Oil\",\"USA\",\"n/a\",\"\",\"\",\"\",\"\"\n",
            HEADER
        );
        let err = rows(&body)[0].parse().unwrap_err();

        assert!(err.is_parse());
        assert!(err.to_string().contains("mcap"));
    }

    #[test]
    fn test_short_row_is_parse_error() {
        let body = format!("{}\n\"5\",\"SHORT\",\"Short Co\"\n", HEADER);
        let rows = rows(&body);

        assert_eq!(rows[0].symbol(), Some("SHORT"));
        assert!(rows[0].parse().unwrap_err().is_parse());
    }

    #[test]
    fn test_header_only_yields_no_rows() {
        assert!(rows(HEADER).is_empty());
    }

    #[tokio::test]
    async fn test_fetch_non_ok_reports_status_code() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/export.ashx")
            .with_status(503)
            .create_async()
            .await;

        let provider = CompanyDirectoryProvider::new(
            reqwest::Client::new(),
            format!("{}/export.ashx", server.url()),
        );
        let err = provider.fetch().await.unwrap_err();

        mock.assert_async().await;
        assert!(err.is_fetch());
        assert!(err.to_string().contains("code=503"));
    }

    #[tokio::test]
    async fn test_fetch_returns_body() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/export.ashx")
            .with_status(200)
            .with_body(HEADER)
            .create_async()
            .await;

        let provider = CompanyDirectoryProvider::new(
            reqwest::Client::new(),
            format!("{}/export.ashx", server.url()),
        );

        assert_eq!(provider.fetch().await.unwrap(), HEADER);
    }
}
