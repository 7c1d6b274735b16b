//! 섹터 상대 지수 계산 명령어.
//!
//! 수집 → 정규화 → 저장 순서의 파이프라인입니다. 정규화가 실패하면
//! (데이터 없음, 벤치마크 없음) 어떤 출력 파일도 쓰지 않고 중단합니다.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

use sector_analytics::{
    relative_normalized, render_relative_chart, save_relative_chart, ChartSpec,
};
use sector_core::MarketConfig;
use sector_data::{fetch_universe, write_relative_csv, YahooChartProvider};

/// 실행 설정.
pub struct RunConfig {
    /// 시장별 설정 (CLI 플래그로 기준일/시작일을 덮어쓴 상태)
    pub market_config: MarketConfig,
    /// 조회 종료일
    pub end: NaiveDate,
    /// 출력 디렉터리
    pub output_dir: PathBuf,
    /// 요청 간 지연
    pub request_delay: Duration,
}

/// 실행 결과.
pub struct RunOutput {
    /// 실제 사용된 기준일
    pub baseline_used: NaiveDate,
    /// 결과에 포함된 종목 수
    pub instruments: usize,
    /// 저장된 데이터 행 수
    pub rows: usize,
    /// CSV 출력 경로
    pub csv_path: PathBuf,
    /// SVG 차트 출력 경로
    pub svg_path: PathBuf,
}

/// 상대 지수 파이프라인 실행.
pub async fn run_analysis(config: RunConfig) -> Result<RunOutput> {
    let market = &config.market_config;
    let tickers = market.all_tickers();

    info!(
        market = %market.market,
        tickers = tickers.len(),
        from = %market.start,
        to = %config.end,
        baseline = %market.baseline,
        "상대 지수 계산 시작"
    );

    // 진행률 표시줄
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap(),
    );
    pb.set_message(format!(
        "Fetching {} tickers from Yahoo Finance...",
        tickers.len()
    ));

    let provider = YahooChartProvider::new()?;
    let table = fetch_universe(
        &provider,
        &tickers,
        market.start,
        config.end,
        config.request_delay,
    )
    .await;

    pb.finish_with_message(format!(
        "Fetched {} tickers, {} trading days",
        table.columns().len(),
        table.len()
    ));

    // 치명적 오류(데이터/벤치마크 없음)는 여기서 중단되어 파일이 생기지 않음
    let (relative, baseline_used) = relative_normalized(&table, market.benchmark, market.baseline)
        .with_context(|| format!("{} 시장 상대 정규화 실패", market.market))?;

    let csv_path = config.output_dir.join(format!("{}.csv", market.output_stem));
    let rows = write_relative_csv(&csv_path, &relative)
        .with_context(|| format!("CSV 저장 실패: {}", csv_path.display()))?;

    let title = market.chart_title(baseline_used);
    let y_label = market.y_label();
    let chart_spec = ChartSpec {
        title: &title,
        y_label: &y_label,
        baseline_label: market.baseline_label,
    };
    let svg = render_relative_chart(&relative, baseline_used, &chart_spec);
    let svg_path = config.output_dir.join(format!("{}.svg", market.output_stem));
    save_relative_chart(&svg_path, &svg)
        .with_context(|| format!("차트 저장 실패: {}", svg_path.display()))?;

    Ok(RunOutput {
        baseline_used,
        instruments: relative.series().len(),
        rows,
        csv_path,
        svg_path,
    })
}

/// 날짜 문자열 파싱 (YYYY-MM-DD)
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .with_context(|| format!("Invalid date format: {}. Expected YYYY-MM-DD", s))
}
