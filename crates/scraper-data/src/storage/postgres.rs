//! PostgreSQL 문서 저장소.
//!
//! 컬렉션 하나를 테이블 하나로 두고 레코드를 JSONB 문서로 저장합니다.
//! 키 컬럼에 대한 `ON CONFLICT ... DO UPDATE`로 upsert를 구현합니다.

use super::DocumentStore;
use crate::error::{DataError, Result};
use async_trait::async_trait;
use scraper_core::{Company, DailyPrice};
use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions};
use tracing::{debug, info};

/// 컬렉션(테이블) 이름.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionNames {
    /// 회사 디렉터리 컬렉션
    pub company: String,
    /// 일봉 가격 컬렉션
    pub ticker: String,
}

impl Default for CollectionNames {
    fn default() -> Self {
        Self {
            company: "company".to_string(),
            ticker: "ticker".to_string(),
        }
    }
}

impl CollectionNames {
    /// 두 이름이 SQL 식별자로 안전한지 확인합니다.
    ///
    /// 테이블 이름은 바인딩할 수 없어 쿼리 문자열에 직접 들어갑니다.
    pub fn validate(&self) -> Result<()> {
        validate_identifier(&self.company)?;
        validate_identifier(&self.ticker)?;
        if self.company == self.ticker {
            return Err(DataError::ConfigError(format!(
                "company and ticker collections must differ (both '{}')",
                self.company
            )));
        }
        Ok(())
    }
}

fn validate_identifier(name: &str) -> Result<()> {
    let mut chars = name.chars();
    let valid_start = chars
        .next()
        .map(|c| c.is_ascii_alphabetic() || c == '_')
        .unwrap_or(false);
    let valid_rest = chars.all(|c| c.is_ascii_alphanumeric() || c == '_');

    if valid_start && valid_rest && name.len() <= 63 {
        Ok(())
    } else {
        Err(DataError::ConfigError(format!(
            "invalid collection name '{}'",
            name
        )))
    }
}

fn create_company_sql(table: &str) -> String {
    format!(
        "CREATE TABLE IF NOT EXISTS {table} (
            id TEXT PRIMARY KEY,
            doc JSONB NOT NULL,
            updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )"
    )
}

fn create_ticker_sql(table: &str) -> String {
    format!(
        "CREATE TABLE IF NOT EXISTS {table} (
            symbol TEXT NOT NULL,
            trade_date TEXT NOT NULL,
            doc JSONB NOT NULL,
            updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            PRIMARY KEY (symbol, trade_date)
        )"
    )
}

fn upsert_company_sql(table: &str) -> String {
    format!(
        "INSERT INTO {table} (id, doc, updated_at)
         VALUES ($1, $2::jsonb, NOW())
         ON CONFLICT (id) DO UPDATE SET
            doc = EXCLUDED.doc,
            updated_at = NOW()"
    )
}

fn upsert_ticker_sql(table: &str) -> String {
    format!(
        "INSERT INTO {table} (symbol, trade_date, doc, updated_at)
         VALUES ($1, $2, $3::jsonb, NOW())
         ON CONFLICT (symbol, trade_date) DO UPDATE SET
            doc = EXCLUDED.doc,
            updated_at = NOW()"
    )
}

/// PostgreSQL 기반 문서 저장소.
#[derive(Debug, Clone)]
pub struct PgDocumentStore {
    pool: PgPool,
    names: CollectionNames,
}

impl PgDocumentStore {
    /// 연결을 열고 두 컬렉션 테이블이 있는지 보장합니다.
    ///
    /// 실행 하나 동안 하나의 연결만 사용합니다.
    pub async fn connect(options: PgConnectOptions, names: CollectionNames) -> Result<Self> {
        names.validate()?;

        info!(
            company = %names.company,
            ticker = %names.ticker,
            "데이터베이스 연결 중"
        );

        let pool = PgPoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .map_err(|e| DataError::ConnectionError(e.to_string()))?;

        let store = Self { pool, names };
        store.ensure_collections().await?;
        Ok(store)
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub fn names(&self) -> &CollectionNames {
        &self.names
    }

    /// 컬렉션 테이블 생성 (이미 있으면 그대로 둠).
    pub async fn ensure_collections(&self) -> Result<()> {
        sqlx::query(&create_company_sql(&self.names.company))
            .execute(&self.pool)
            .await?;
        sqlx::query(&create_ticker_sql(&self.names.ticker))
            .execute(&self.pool)
            .await?;
        debug!("컬렉션 테이블 확인 완료");
        Ok(())
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[async_trait]
impl DocumentStore for PgDocumentStore {
    fn name(&self) -> &str {
        "postgres"
    }

    async fn upsert_company(&self, company: &Company) -> Result<()> {
        let doc = serde_json::to_string(company)?;
        sqlx::query(&upsert_company_sql(&self.names.company))
            .bind(&company.symbol)
            .bind(doc)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn upsert_daily_price(&self, price: &DailyPrice) -> Result<()> {
        let doc = serde_json::to_string(price)?;
        sqlx::query(&upsert_ticker_sql(&self.names.ticker))
            .bind(&price.key.symbol)
            .bind(&price.key.date)
            .bind(doc)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn company_symbols(&self) -> Result<Vec<String>> {
        let sql = format!("SELECT id FROM {}", self.names.company);
        let symbols: Vec<String> = sqlx::query_scalar(&sql).fetch_all(&self.pool).await?;
        Ok(symbols)
    }
}
