//! 수집 범위 결정 및 전체 실행.
//!
//! 1. 심볼 목록이 지정되면 그 목록으로 회사 디렉터리를 갱신하고 그대로 사용
//! 2. 아니면 저장된 디렉터리를 읽고, 비어 있으면 전체 디렉터리를 먼저 수집
//! 3. 심볼마다 순서대로 일봉 가격 수집

use super::{company_sync, price_collect};
use crate::{CollectionStats, Result, RunContext};
use std::time::Instant;
use tracing::{debug, info};

/// 진행 로그를 남기는 심볼 간격
pub const PROGRESS_INTERVAL: usize = 1000;

/// 전체 수집 실행
pub async fn run(ctx: &RunContext) -> Result<CollectionStats> {
    let started = Instant::now();
    let mut stats = CollectionStats::new();

    info!(
        range = %ctx.range,
        store = ctx.store.name(),
        "수집 시작"
    );

    let symbols = resolve_symbols(ctx, &mut stats).await?;
    info!(count = symbols.len(), "수집 대상 심볼 확정");

    let mut processed = 0usize;
    for symbol in &symbols {
        let outcome = price_collect::ingest_symbol(ctx, &ctx.range, symbol).await?;
        stats.record(&outcome);

        processed += 1;
        if is_checkpoint(processed) {
            debug!(processed, current = %symbol, "가격 {}개 심볼 수집, 현재: {}", processed, symbol);
        }
    }

    stats.elapsed = started.elapsed();
    Ok(stats)
}

/// 진행 로그를 남길 처리 건수인지 여부
fn is_checkpoint(processed: usize) -> bool {
    processed > 0 && processed % PROGRESS_INTERVAL == 0
}

/// 수집 대상 심볼 결정
async fn resolve_symbols(ctx: &RunContext, stats: &mut CollectionStats) -> Result<Vec<String>> {
    if let Some(filter) = ctx.symbol_filter() {
        stats.companies += company_sync::ingest_companies(ctx, Some(&filter)).await?;
        return Ok(ctx.symbols.clone());
    }

    let mut symbols = ctx.store.company_symbols().await?;
    if symbols.is_empty() {
        info!(
            store = ctx.store.name(),
            "회사 디렉터리가 비어 있음, 전체 목록 수집"
        );
        stats.companies += company_sync::ingest_companies(ctx, None).await?;
        symbols = ctx.store.company_symbols().await?;
    }

    Ok(symbols)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checkpoint_every_interval() {
        assert!(!is_checkpoint(0));
        assert!(!is_checkpoint(PROGRESS_INTERVAL - 1));
        assert!(is_checkpoint(PROGRESS_INTERVAL));
        assert!(!is_checkpoint(PROGRESS_INTERVAL + 1));
        assert!(is_checkpoint(PROGRESS_INTERVAL * 3));
    }
}
