//! 주식 스크래퍼 CLI.
//!
//! # 사용 예시
//!
//! ```bash
//! # 저장된 회사 디렉터리 전체의 1년치 일봉 수집 (비어 있으면 디렉터리부터)
//! stock-scraper
//!
//! # 특정 심볼만 3년치 수집
//! stock-scraper -s AAPL,MSFT -y 3
//!
//! # 회사 디렉터리만 동기화
//! stock-scraper sync-companies
//! ```

use anyhow::Context;
use clap::{Parser, Subcommand};
use scraper_collector::{modules, parse_symbol_list, CollectorConfig, RunContext};
use scraper_core::{init_logging, LogConfig, LogFormat, OnFailure};
use scraper_data::{DocumentStore, MemoryStore, PgDocumentStore};
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "stock-scraper")]
#[command(about = "Company directory and daily price scraper", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// 데이터베이스 호스트 (기본: localhost)
    #[arg(short = 'H', long)]
    host: Option<String>,

    /// 데이터베이스 포트 (기본: 5432)
    #[arg(short, long)]
    port: Option<u16>,

    /// 데이터베이스 이름 (기본: stock)
    #[arg(long = "db")]
    database: Option<String>,

    /// 회사 컬렉션 이름 (기본: company)
    #[arg(short = 'c', long = "collection")]
    company_collection: Option<String>,

    /// 일봉 컬렉션 이름 (기본: ticker)
    #[arg(short = 't', long = "ticker-collection")]
    ticker_collection: Option<String>,

    /// 수집할 과거 연수 (기본: 1)
    #[arg(short, long)]
    years: Option<u32>,

    /// 수집할 심볼 (쉼표로 구분, 예: "AAPL,MSFT")
    #[arg(short, long)]
    symbols: Option<String>,

    /// 회사 디렉터리 조회 실패 시 처리 (skip, abort)
    #[arg(long)]
    on_company_fetch_error: Option<OnFailure>,

    /// 회사 행 파싱 실패 시 처리 (skip, abort)
    #[arg(long)]
    on_company_row_error: Option<OnFailure>,

    /// 가격 조회 실패 시 처리 (skip, abort)
    #[arg(long)]
    on_price_fetch_error: Option<OnFailure>,

    /// 가격 행 파싱 실패 시 처리 (skip, abort)
    #[arg(long)]
    on_price_row_error: Option<OnFailure>,

    /// 데이터베이스 대신 메모리 저장소 사용
    #[arg(long, default_value_t = false)]
    dry_run: bool,

    /// 로그 레벨 (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,

    /// 로그 형식 (pretty, json, compact)
    #[arg(long, default_value = "compact")]
    log_format: LogFormat,
}

#[derive(Subcommand, Clone, Copy)]
enum Commands {
    /// 회사 디렉터리 → 일봉 가격 전체 수집 (기본)
    Run,

    /// 회사 디렉터리만 동기화 (--symbols가 있으면 필터로 사용)
    SyncCompanies,
}

impl Cli {
    /// CLI 플래그를 설정에 덮어씀
    fn apply(&self, config: &mut CollectorConfig) {
        if let Some(host) = &self.host {
            config.database.host = host.clone();
        }
        if let Some(port) = self.port {
            config.database.port = port;
        }
        if let Some(database) = &self.database {
            config.database.name = database.clone();
        }
        if let Some(name) = &self.company_collection {
            config.collections.company = name.clone();
        }
        if let Some(name) = &self.ticker_collection {
            config.collections.ticker = name.clone();
        }
        if let Some(years) = self.years {
            config.years = years;
        }
        if let Some(symbols) = &self.symbols {
            config.symbols = parse_symbol_list(symbols);
        }
        if let Some(policy) = self.on_company_fetch_error {
            config.company_policy.request = policy;
        }
        if let Some(policy) = self.on_company_row_error {
            config.company_policy.row = policy;
        }
        if let Some(policy) = self.on_price_fetch_error {
            config.price_policy.request = policy;
        }
        if let Some(policy) = self.on_price_row_error {
            config.price_policy.row = policy;
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logging(&LogConfig::new(cli.log_level.clone()).with_format(cli.log_format))
        .map_err(|e| anyhow::anyhow!(e))?;

    tracing::info!("Stock Scraper 시작");

    let mut config = CollectorConfig::from_env()?;
    cli.apply(&mut config);

    let today = chrono::Local::now().date_naive();
    tracing::info!(
        database = %config.database.describe(),
        company = %config.collections.company,
        ticker = %config.collections.ticker,
        years = config.years,
        symbols = config.symbols.len(),
        "설정 로드 완료"
    );

    let pg = if cli.dry_run {
        tracing::warn!("dry-run: 메모리 저장소 사용, 데이터베이스에 쓰지 않음");
        None
    } else {
        let options = config.database.connect_options()?;
        let store = PgDocumentStore::connect(options, config.collections.clone())
            .await
            .with_context(|| format!("데이터베이스 연결 실패 ({})", config.database.describe()))?;
        tracing::info!("데이터베이스 연결 성공");
        Some(store)
    };

    let store: Arc<dyn DocumentStore> = match &pg {
        Some(pg) => Arc::new(pg.clone()),
        None => Arc::new(MemoryStore::new()),
    };

    let ctx = RunContext::new(&config, store, today)?;
    tracing::info!(
        "{}년치 수집, 시작일: {}",
        config.years,
        ctx.range.start.format("%d/%m/%Y")
    );

    let result = match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => modules::run(&ctx).await.map(|stats| {
            stats.log_summary("전체 수집");
        }),
        Commands::SyncCompanies => modules::sync_companies(&ctx).await.map(|count| {
            tracing::info!(count, "회사 디렉터리 동기화 완료");
        }),
    };

    if let Some(pg) = pg {
        pg.close().await;
    }

    result.context("수집 실패")?;
    tracing::info!("Stock Scraper 종료");
    Ok(())
}
