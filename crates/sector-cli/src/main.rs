//! 섹터 상대 지수 CLI.
//!
//! # 사용 예시
//!
//! ```bash
//! # 미국 섹터 ETF vs S&P 500 (기준일 2020-01-02)
//! sector run -m US
//!
//! # 일본 섹터 ETF vs 닛케이 225, 기준일 변경
//! sector run -m JP --baseline 2021-01-04
//!
//! # 조회 기간 지정
//! sector run -m US -f 2020-01-01 -t 2024-12-31
//!
//! # 유니버스 확인
//! sector list -m US
//! sector list -m JP
//! ```

use clap::{Parser, Subcommand};
use std::time::Duration;
use tracing::{error, info};

mod commands;

use commands::list::print_universe;
use commands::run::{parse_date, run_analysis, RunConfig};
use sector_core::{init_logging_from_env, Market, MarketConfig};
use sector_data::DEFAULT_REQUEST_DELAY_MS;

#[derive(Parser)]
#[command(name = "sector")]
#[command(about = "섹터 상대 지수 CLI - 벤치마크 대비 섹터 ETF 상대 성과", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 상대 지수 계산 (수집 → 정규화 → CSV/SVG 저장)
    Run {
        /// 시장 유형 (US: 미국, JP: 일본)
        #[arg(short, long)]
        market: String,

        /// 기준일 (YYYY-MM-DD, 기본: 2020-01-02)
        #[arg(short, long)]
        baseline: Option<String>,

        /// 조회 시작일 (YYYY-MM-DD, 기본: 2019-01-01)
        #[arg(short = 'f', long)]
        from: Option<String>,

        /// 조회 종료일 (YYYY-MM-DD, 기본: 오늘)
        #[arg(short, long)]
        to: Option<String>,

        /// 출력 디렉터리
        #[arg(short, long, default_value = "data")]
        output_dir: String,

        /// 요청 간 지연 (밀리초)
        #[arg(long, default_value_t = DEFAULT_REQUEST_DELAY_MS)]
        request_delay_ms: u64,
    },

    /// 시장별 종목 유니버스 출력
    List {
        /// 시장 유형 (US: 미국, JP: 일본)
        #[arg(short, long)]
        market: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    init_logging_from_env()?;

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            market,
            baseline,
            from,
            to,
            output_dir,
            request_delay_ms,
        } => {
            let market = Market::from_str(&market)
                .ok_or_else(|| format!("Invalid market: {}. Supported: US, JP", market))?;

            let mut market_config = MarketConfig::for_market(market);
            if let Some(baseline) = baseline {
                market_config.baseline = parse_date(&baseline)?;
            }
            if let Some(from) = from {
                market_config.start = parse_date(&from)?;
            }
            let end = match to {
                Some(to) => parse_date(&to)?,
                None => chrono::Utc::now().date_naive(),
            };

            if market_config.start > end {
                return Err("Start date must be before end date".into());
            }

            let config = RunConfig {
                market_config,
                end,
                output_dir: output_dir.into(),
                request_delay: Duration::from_millis(request_delay_ms),
            };

            match run_analysis(config).await {
                Ok(output) => {
                    info!(
                        "✅ Relative index computed for {} instruments",
                        output.instruments
                    );
                    println!(
                        "\n상대 지수 계산 완료: 종목 {}개, 거래일 {}일",
                        output.instruments, output.rows
                    );
                    println!("기준일: {}", output.baseline_used);
                    println!("저장 위치: {}", output.csv_path.display());
                    println!("저장 위치: {}", output.svg_path.display());
                }
                Err(e) => {
                    error!("Run failed: {}", e);
                    return Err(e.into());
                }
            }
        }

        Commands::List { market } => {
            let market = Market::from_str(&market)
                .ok_or_else(|| format!("Invalid market: {}. Supported: US, JP", market))?;
            print_universe(&MarketConfig::for_market(market));
        }
    }

    Ok(())
}
