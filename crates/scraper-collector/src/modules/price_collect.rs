//! 일봉 가격 수집 모듈.

use crate::{RunContext, Result};
use scraper_core::DateRange;
use scraper_data::price_rows;
use tracing::{error, trace, warn};

/// 심볼 하나의 수집 결과.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SymbolOutcome {
    /// 조회 성공
    Ingested {
        /// 저장한 일봉 수
        written: usize,
        /// 파싱 실패로 건너뛴 행 수
        skipped_rows: usize,
    },
    /// 조회 실패 (로그 후 다음 심볼로 진행)
    Failed { reason: String },
}

/// 심볼 하나의 기간 가격을 받아 거래일별로 upsert합니다.
///
/// 요청 실패와 행 실패는 `ctx.price_policy`에 따라 보고하거나 전파합니다.
/// 저장소 오류는 항상 전파합니다.
pub async fn ingest_symbol(
    ctx: &RunContext,
    range: &DateRange,
    symbol: &str,
) -> Result<SymbolOutcome> {
    let policy = ctx.price_policy;
    trace!(symbol, "가격 수집");

    let body = match ctx.prices.fetch(symbol, range).await {
        Ok(body) => body,
        Err(e) if policy.request.is_abort() => return Err(e.into()),
        Err(e) => {
            error!(symbol, error = %e, "가격 조회 실패");
            return Ok(SymbolOutcome::Failed {
                reason: e.to_string(),
            });
        }
    };

    let mut written = 0;
    let mut skipped_rows = 0;

    for row in price_rows(symbol, &body) {
        match row {
            Ok(price) => {
                ctx.store.upsert_daily_price(&price).await?;
                written += 1;
            }
            Err(e) if policy.row.is_abort() => return Err(e.into()),
            Err(e) => {
                warn!(symbol, error = %e, "가격 행 파싱 실패, 건너뜀");
                skipped_rows += 1;
            }
        }
    }

    trace!(symbol, written, skipped_rows, "가격 수집 완료");
    Ok(SymbolOutcome::Ingested {
        written,
        skipped_rows,
    })
}
