//! 실행 컨텍스트.
//!
//! 실행 한 번마다 한 번 만들어 각 수집기에 참조로 넘깁니다. 저장소 핸들,
//! HTTP Provider, 날짜 범위, 실패 정책이 모두 여기에 모입니다.

use crate::error::CollectorError;
use crate::{CollectorConfig, Result};
use chrono::NaiveDate;
use scraper_core::{DateRange, FailurePolicy};
use scraper_data::{CompanyDirectoryProvider, DocumentStore, PriceHistoryProvider};
use std::collections::HashSet;
use std::sync::Arc;

/// 수집 실행 컨텍스트
pub struct RunContext {
    /// 회사/가격 저장소
    pub store: Arc<dyn DocumentStore>,
    /// 회사 디렉터리 Provider
    pub companies: CompanyDirectoryProvider,
    /// 일봉 가격 Provider
    pub prices: PriceHistoryProvider,
    /// 가격 수집 기간
    pub range: DateRange,
    /// 명시적 수집 대상 (비어 있으면 디렉터리 전체)
    pub symbols: Vec<String>,
    pub company_policy: FailurePolicy,
    pub price_policy: FailurePolicy,
}

impl RunContext {
    /// 설정과 기준일로 컨텍스트를 만듭니다.
    ///
    /// `today`는 호출자가 넘기며 기간 끝이 됩니다.
    pub fn new(
        config: &CollectorConfig,
        store: Arc<dyn DocumentStore>,
        today: NaiveDate,
    ) -> Result<Self> {
        let range = DateRange::trailing_years(today, config.years).ok_or_else(|| {
            CollectorError::Config(format!("years out of range: {}", config.years))
        })?;
        let client = config.endpoints.http_client()?;

        Ok(Self {
            store,
            companies: CompanyDirectoryProvider::new(
                client.clone(),
                config.endpoints.company_directory_url.clone(),
            ),
            prices: PriceHistoryProvider::new(client, config.endpoints.price_history_url.clone()),
            range,
            symbols: config.symbols.clone(),
            company_policy: config.company_policy,
            price_policy: config.price_policy,
        })
    }

    /// 명시적 심볼 목록을 필터 집합으로 반환 (없으면 `None`)
    pub fn symbol_filter(&self) -> Option<HashSet<String>> {
        if self.symbols.is_empty() {
            None
        } else {
            Some(self.symbols.iter().cloned().collect())
        }
    }
}
