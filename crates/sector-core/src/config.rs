//! 시장별 분석 설정.
//!
//! 미국/일본 두 시장은 종목 유니버스와 벤치마크만 다르고 계산 로직은
//! 동일합니다. 시장별 설정은 값 구조체로 제공되며, 정규화 로직은
//! 시장을 알지 못합니다.

use crate::types::Market;
use chrono::NaiveDate;

/// 기본 조회 시작일 (2019-01-01).
pub fn default_start_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2019, 1, 1).unwrap()
}

/// 기본 기준일 (2020-01-02, 코로나 쇼크 직전 거래일).
pub fn default_baseline_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2020, 1, 2).unwrap()
}

/// 시장별 분석 설정.
#[derive(Debug, Clone)]
pub struct MarketConfig {
    /// 시장 유형
    pub market: Market,
    /// 벤치마크 티커
    pub benchmark: &'static str,
    /// 벤치마크 표시 이름
    pub benchmark_name: &'static str,
    /// 섹터 유니버스: (티커, 표시 이름)
    pub sectors: Vec<(&'static str, &'static str)>,
    /// 조회 시작일
    pub start: NaiveDate,
    /// 기준일 (이 날의 지수가 100)
    pub baseline: NaiveDate,
    /// 기준일 주석 레이블
    pub baseline_label: &'static str,
    /// 출력 파일 이름 줄기 (확장자 제외)
    pub output_stem: &'static str,
}

impl MarketConfig {
    /// 미국 시장 설정: 섹터 ETF 14종 vs S&P 500 (SPY).
    pub fn us() -> Self {
        Self {
            market: Market::US,
            benchmark: "SPY",
            benchmark_name: "S&P 500 ETF",
            sectors: vec![
                ("XLK", "Technology"),
                ("XLV", "Health Care"),
                ("XLE", "Energy"),
                ("XRT", "Retail"),
                ("XLP", "Consumer Staples"),
                ("IGV", "Software"),
                ("XLB", "Materials"),
                ("XLU", "Utilities"),
                ("ITA", "Aerospace & Defense"),
                ("XLI", "Industrials"),
                ("XLY", "Consumer Discretionary"),
                ("ITB", "Home Construction"),
                ("IYT", "Transportation"),
                ("CARZ", "Autos"),
            ],
            start: default_start_date(),
            baseline: default_baseline_date(),
            baseline_label: "COVID baseline",
            output_stem: "us_relative_vs_spy",
        }
    }

    /// 일본 시장 설정: TOPIX-17 섹터 ETF 14종 vs 닛케이 225 (1321.T).
    pub fn japan() -> Self {
        Self {
            market: Market::JP,
            benchmark: "1321.T",
            benchmark_name: "Nikkei 225 ETF",
            sectors: vec![
                ("1625.T", "Electric Appliances & Precision"),
                ("1621.T", "Pharmaceutical"),
                ("1618.T", "Energy Resources"),
                ("1629.T", "Commercial & Wholesale Trade"),
                ("1617.T", "Foods"),
                ("1626.T", "IT & Services"),
                ("1620.T", "Raw Materials & Chemicals"),
                ("1627.T", "Electric Power & Gas"),
                ("1624.T", "Machinery"),
                ("1623.T", "Steel & Nonferrous Metals"),
                ("1630.T", "Retail Trade"),
                ("1619.T", "Construction & Materials"),
                ("1628.T", "Transportation & Logistics"),
                ("1622.T", "Automobiles & Transportation Equipment"),
            ],
            start: default_start_date(),
            baseline: default_baseline_date(),
            baseline_label: "COVID baseline",
            output_stem: "jp_relative_vs_n225",
        }
    }

    /// 시장 유형으로 설정 조회.
    pub fn for_market(market: Market) -> Self {
        match market {
            Market::US => Self::us(),
            Market::JP => Self::japan(),
        }
    }

    /// 섹터 티커 목록 (유니버스 순서).
    pub fn sector_tickers(&self) -> Vec<&'static str> {
        self.sectors.iter().map(|(ticker, _)| *ticker).collect()
    }

    /// 벤치마크를 포함한 전체 조회 대상 티커 목록.
    pub fn all_tickers(&self) -> Vec<&'static str> {
        let mut tickers = vec![self.benchmark];
        tickers.extend(self.sector_tickers());
        tickers
    }

    /// 차트 제목 (실제 사용된 기준일 포함).
    pub fn chart_title(&self, baseline_used: NaiveDate) -> String {
        match self.market {
            Market::US => format!(
                "US Sectors vs S&P 500 (SPY) - Relative, normalized to 100 at {}",
                baseline_used
            ),
            Market::JP => format!(
                "Japan Sectors vs Nikkei 225 (1321.T) - Relative, normalized to 100 at {}",
                baseline_used
            ),
        }
    }

    /// 차트 Y축 레이블.
    pub fn y_label(&self) -> String {
        format!("Relative Index (Sector / {}, baseline = 100)", self.benchmark_name)
    }
}
