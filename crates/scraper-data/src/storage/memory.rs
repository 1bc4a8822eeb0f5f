//! 인메모리 문서 저장소.
//!
//! `--dry-run` 실행과 테스트에서 사용합니다. 회사 심볼은 처음 삽입된
//! 순서대로 열거됩니다.

use super::DocumentStore;
use crate::error::Result;
use async_trait::async_trait;
use scraper_core::{Company, DailyPrice, PriceKey};
use std::collections::HashMap;
use tokio::sync::RwLock;

#[derive(Debug, Default)]
struct Collections {
    companies: HashMap<String, Company>,
    company_order: Vec<String>,
    prices: HashMap<PriceKey, DailyPrice>,
    writes: usize,
}

/// 프로세스 내 저장소.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<Collections>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 회사 디렉터리가 미리 채워진 저장소.
    pub fn with_companies(companies: impl IntoIterator<Item = Company>) -> Self {
        let mut collections = Collections::default();
        for company in companies {
            if !collections.companies.contains_key(&company.symbol) {
                collections.company_order.push(company.symbol.clone());
            }
            collections.companies.insert(company.symbol.clone(), company);
        }
        Self {
            inner: RwLock::new(collections),
        }
    }

    pub async fn company(&self, symbol: &str) -> Option<Company> {
        self.inner.read().await.companies.get(symbol).cloned()
    }

    /// 삽입 순서대로 회사 레코드를 반환합니다.
    pub async fn companies(&self) -> Vec<Company> {
        let inner = self.inner.read().await;
        inner
            .company_order
            .iter()
            .filter_map(|symbol| inner.companies.get(symbol).cloned())
            .collect()
    }

    pub async fn daily_price(&self, key: &PriceKey) -> Option<DailyPrice> {
        self.inner.read().await.prices.get(key).cloned()
    }

    /// 키 순으로 정렬된 일봉 레코드.
    pub async fn daily_prices(&self) -> Vec<DailyPrice> {
        let mut prices: Vec<DailyPrice> =
            self.inner.read().await.prices.values().cloned().collect();
        prices.sort_by(|a, b| a.key.cmp(&b.key));
        prices
    }

    pub async fn company_count(&self) -> usize {
        self.inner.read().await.companies.len()
    }

    pub async fn price_count(&self) -> usize {
        self.inner.read().await.prices.len()
    }

    /// 지금까지 수행된 upsert 횟수 (덮어쓰기 포함).
    pub async fn write_count(&self) -> usize {
        self.inner.read().await.writes
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    fn name(&self) -> &str {
        "memory"
    }

    async fn upsert_company(&self, company: &Company) -> Result<()> {
        let mut inner = self.inner.write().await;
        if !inner.companies.contains_key(&company.symbol) {
            inner.company_order.push(company.symbol.clone());
        }
        inner
            .companies
            .insert(company.symbol.clone(), company.clone());
        inner.writes += 1;
        Ok(())
    }

    async fn upsert_daily_price(&self, price: &DailyPrice) -> Result<()> {
        let mut inner = self.inner.write().await;
        inner.prices.insert(price.key.clone(), price.clone());
        inner.writes += 1;
        Ok(())
    }

    async fn company_symbols(&self) -> Result<Vec<String>> {
        Ok(self.inner.read().await.company_order.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn price(symbol: &str, date: &str, close: f64) -> DailyPrice {
        DailyPrice {
            key: PriceKey::new(symbol, date),
            open: close,
            high: close,
            low: close,
            close,
            volume: 10,
            adj_close: close,
        }
    }

    #[tokio::test]
    async fn test_company_upsert_overwrites_in_place() {
        let store = MemoryStore::new();
        let mut aapl = Company::new("AAPL", "Apple", "Technology", "Hardware", "USA");
        store.upsert_company(&aapl).await.unwrap();
        store
            .upsert_company(&Company::new("MSFT", "Microsoft", "Technology", "Software", "USA"))
            .await
            .unwrap();

        aapl.price = Some(190.0);
        store.upsert_company(&aapl).await.unwrap();

        assert_eq!(store.company_count().await, 2);
        assert_eq!(store.write_count().await, 3);
        assert_eq!(store.company_symbols().await.unwrap(), vec!["AAPL", "MSFT"]);
        assert_eq!(store.company("AAPL").await.unwrap().price, Some(190.0));
    }

    #[tokio::test]
    async fn test_daily_price_keyed_by_symbol_and_date() {
        let store = MemoryStore::new();
        store.upsert_daily_price(&price("AAPL", "2020-01-02", 1.0)).await.unwrap();
        store.upsert_daily_price(&price("AAPL", "2020-01-02", 2.0)).await.unwrap();
        store.upsert_daily_price(&price("MSFT", "2020-01-02", 3.0)).await.unwrap();

        assert_eq!(store.price_count().await, 2);
        let key = PriceKey::new("AAPL", "2020-01-02");
        assert_eq!(store.daily_price(&key).await.unwrap().close, 2.0);
    }
}
