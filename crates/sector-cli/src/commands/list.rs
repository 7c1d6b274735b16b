//! 시장 유니버스 출력 명령어.

use sector_core::MarketConfig;

/// 시장의 벤치마크와 섹터 유니버스를 출력합니다.
pub fn print_universe(config: &MarketConfig) {
    println!("\n{} 시장 유니버스:", config.market);
    println!("{:-<60}", "");
    println!("  {} - {} (벤치마크)", config.benchmark, config.benchmark_name);
    for (ticker, name) in &config.sectors {
        println!("  {} - {}", ticker, name);
    }
    println!();
    println!("기본 기준일: {} / 조회 시작일: {}", config.baseline, config.start);
}
