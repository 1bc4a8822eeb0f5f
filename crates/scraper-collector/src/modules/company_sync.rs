//! 회사 디렉터리 동기화 모듈.

use crate::{RunContext, Result};
use scraper_data::company_rows;
use std::collections::HashSet;
use tracing::{debug, error, info, warn};

/// 회사 디렉터리를 받아 회사별로 upsert합니다.
///
/// `filter`가 비어 있지 않으면 그 안의 심볼만 저장합니다. 저장한 레코드
/// 수(필터 적용 후)를 반환합니다.
pub async fn ingest_companies(ctx: &RunContext, filter: Option<&HashSet<String>>) -> Result<usize> {
    let filter = filter.filter(|f| !f.is_empty());
    let policy = ctx.company_policy;

    debug!(filter = ?filter, "회사 디렉터리 수집 시작");

    let body = match ctx.companies.fetch().await {
        Ok(body) => body,
        Err(e) if policy.request.is_abort() => return Err(e.into()),
        Err(e) => {
            error!(url = ctx.companies.url(), error = %e, "회사 디렉터리 조회 실패");
            return Ok(0);
        }
    };

    let mut written = 0;
    let mut skipped = 0;

    for row in company_rows(&body) {
        let row = match row {
            Ok(row) => row,
            Err(e) if policy.row.is_abort() => return Err(e.into()),
            Err(e) => {
                warn!(error = %e, "회사 행 읽기 실패, 건너뜀");
                skipped += 1;
                continue;
            }
        };

        if let Some(filter) = filter {
            if !row.symbol().is_some_and(|symbol| filter.contains(symbol)) {
                continue;
            }
        }

        let company = match row.parse() {
            Ok(company) => company,
            Err(e) if policy.row.is_abort() => return Err(e.into()),
            Err(e) => {
                warn!(line = row.line(), error = %e, "회사 행 파싱 실패, 건너뜀");
                skipped += 1;
                continue;
            }
        };

        ctx.store.upsert_company(&company).await?;
        written += 1;
    }

    info!(count = written, skipped, "회사 {}개 저장", written);
    Ok(written)
}

/// 설정된 심볼 목록을 필터로 회사 디렉터리만 동기화합니다.
pub async fn sync_companies(ctx: &RunContext) -> Result<usize> {
    let filter = ctx.symbol_filter();
    ingest_companies(ctx, filter.as_ref()).await
}
