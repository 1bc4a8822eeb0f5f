//! 환경변수 기반 설정 모듈.
//!
//! 우선순위: CLI 플래그 > 환경변수(.env 포함) > 기본값.

use crate::error::CollectorError;
use crate::Result;
use scraper_core::FailurePolicy;
use scraper_data::{CollectionNames, DEFAULT_COMPANY_DIRECTORY_URL, DEFAULT_PRICE_HISTORY_URL};
use sqlx::postgres::PgConnectOptions;
use std::time::Duration;

/// Collector 전체 설정
#[derive(Debug, Clone)]
pub struct CollectorConfig {
    /// 데이터베이스 연결 설정
    pub database: DatabaseConfig,
    /// 컬렉션(테이블) 이름
    pub collections: CollectionNames,
    /// 업스트림 엔드포인트 설정
    pub endpoints: EndpointConfig,
    /// 수집할 과거 연수
    pub years: u32,
    /// 수집 대상 심볼 (비어 있으면 저장된 디렉터리 전체)
    pub symbols: Vec<String>,
    /// 회사 디렉터리 수집 실패 정책
    pub company_policy: FailurePolicy,
    /// 가격 수집 실패 정책
    pub price_policy: FailurePolicy,
}

/// 데이터베이스 연결 설정
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// 연결 URL (설정 시 host/port/name보다 우선)
    pub url: Option<String>,
    pub host: String,
    pub port: u16,
    pub name: String,
}

/// 업스트림 엔드포인트 설정
#[derive(Debug, Clone)]
pub struct EndpointConfig {
    /// 회사 디렉터리 벌크 내보내기 URL
    pub company_directory_url: String,
    /// 일봉 가격 기본 URL
    pub price_history_url: String,
    /// HTTP 요청 타임아웃 (초). 없으면 전송 계층 기본값을 따름
    pub http_timeout_secs: Option<u64>,
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            database: DatabaseConfig::default(),
            collections: CollectionNames::default(),
            endpoints: EndpointConfig::default(),
            years: 1,
            symbols: Vec::new(),
            company_policy: FailurePolicy::company_default(),
            price_policy: FailurePolicy::price_default(),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            host: "localhost".to_string(),
            port: 5432,
            name: "stock".to_string(),
        }
    }
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            company_directory_url: DEFAULT_COMPANY_DIRECTORY_URL.to_string(),
            price_history_url: DEFAULT_PRICE_HISTORY_URL.to_string(),
            http_timeout_secs: None,
        }
    }
}

impl CollectorConfig {
    /// 환경변수에서 설정 로드
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let defaults = Self::default();
        let symbols = std::env::var("SYMBOLS")
            .map(|v| parse_symbol_list(&v))
            .unwrap_or_default();

        Ok(Self {
            database: DatabaseConfig {
                url: std::env::var("DATABASE_URL").ok(),
                host: env_var_parse("DB_HOST", defaults.database.host),
                port: env_var_parse("DB_PORT", defaults.database.port),
                name: env_var_parse("DB_NAME", defaults.database.name),
            },
            collections: CollectionNames {
                company: env_var_parse("COMPANY_COLLECTION", defaults.collections.company),
                ticker: env_var_parse("TICKER_COLLECTION", defaults.collections.ticker),
            },
            endpoints: EndpointConfig {
                company_directory_url: env_var_parse(
                    "COMPANY_DIRECTORY_URL",
                    defaults.endpoints.company_directory_url,
                ),
                price_history_url: env_var_parse(
                    "PRICE_HISTORY_URL",
                    defaults.endpoints.price_history_url,
                ),
                http_timeout_secs: std::env::var("HTTP_TIMEOUT_SECS")
                    .ok()
                    .and_then(|v| v.parse().ok()),
            },
            years: env_var_parse("HISTORY_YEARS", defaults.years),
            symbols,
            company_policy: FailurePolicy::new(
                env_var_parse("COMPANY_FETCH_POLICY", defaults.company_policy.request),
                env_var_parse("COMPANY_ROW_POLICY", defaults.company_policy.row),
            ),
            price_policy: FailurePolicy::new(
                env_var_parse("PRICE_FETCH_POLICY", defaults.price_policy.request),
                env_var_parse("PRICE_ROW_POLICY", defaults.price_policy.row),
            ),
        })
    }
}

impl DatabaseConfig {
    /// PostgreSQL 연결 옵션 생성
    ///
    /// 사용자/비밀번호는 URL이 없으면 `PGUSER`/`PGPASSWORD`를 따릅니다.
    pub fn connect_options(&self) -> Result<PgConnectOptions> {
        match &self.url {
            Some(url) => url
                .parse::<PgConnectOptions>()
                .map_err(|e| CollectorError::Config(format!("invalid DATABASE_URL: {}", e))),
            None => Ok(PgConnectOptions::new()
                .host(&self.host)
                .port(self.port)
                .database(&self.name)),
        }
    }

    /// 로그용 연결 대상 (비밀번호 제외)
    pub fn describe(&self) -> String {
        match &self.url {
            Some(_) => "DATABASE_URL".to_string(),
            None => format!("{}:{}/{}", self.host, self.port, self.name),
        }
    }
}

impl EndpointConfig {
    /// 실행 동안 공유할 HTTP 클라이언트 생성
    pub fn http_client(&self) -> Result<reqwest::Client> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = self.http_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        Ok(builder.build()?)
    }
}

/// 쉼표로 구분된 심볼 목록 파싱
///
/// 공백은 제거하고 빈 항목과 중복은 버리며 처음 나온 순서를 유지합니다.
pub fn parse_symbol_list(csv: &str) -> Vec<String> {
    let mut symbols: Vec<String> = Vec::new();
    for symbol in csv.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        if !symbols.iter().any(|s| s == symbol) {
            symbols.push(symbol.to_string());
        }
    }
    symbols
}

/// 환경변수에서 값을 파싱 (실패 시 기본값 사용)
fn env_var_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_documented_values() {
        let config = CollectorConfig::default();

        assert_eq!(config.database.host, "localhost");
        assert_eq!(config.database.name, "stock");
        assert_eq!(config.collections.company, "company");
        assert_eq!(config.collections.ticker, "ticker");
        assert_eq!(config.years, 1);
        assert!(config.symbols.is_empty());
        assert_eq!(config.endpoints.http_timeout_secs, None);
    }

    #[test]
    fn test_parse_symbol_list() {
        assert_eq!(
            parse_symbol_list(" AAPL,MSFT ,,AAPL, GOOG "),
            vec!["AAPL", "MSFT", "GOOG"]
        );
        assert!(parse_symbol_list("").is_empty());
        assert!(parse_symbol_list(" , ").is_empty());
    }

    #[test]
    fn test_database_describe_hides_url() {
        let mut db = DatabaseConfig::default();
        assert_eq!(db.describe(), "localhost:5432/stock");

        db.url = Some("postgres://user:secret@db:5432/stock".to_string());
        assert!(!db.describe().contains("secret"));
        assert!(db.connect_options().is_ok());
    }
}
