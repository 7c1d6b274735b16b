//! 일별 가격 테이블.
//!
//! 여러 종목의 일별 조정 종가를 하나의 날짜 축에 정렬한 테이블입니다.
//! 종목별 시계열을 날짜 기준 외부 조인(outer join)으로 합치며,
//! 해당 날짜에 체결이 없는 종목은 결측값(`None`)으로 표현합니다.
//!
//! # 불변 조건
//!
//! - 날짜 축은 중복 없이 오름차순 정렬
//! - 모든 컬럼은 날짜 축과 같은 길이
//! - 생성 이후 테이블은 불변

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

/// 일별 조정 종가 한 건.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyClose {
    /// 거래일
    pub date: NaiveDate,
    /// 조정 종가
    pub close: Decimal,
}

impl DailyClose {
    /// 새로운 일별 종가 생성.
    pub fn new(date: NaiveDate, close: Decimal) -> Self {
        Self { date, close }
    }
}

/// 날짜 축에 정렬된 단일 종목 가격 컬럼.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceSeries {
    /// 종목 티커
    pub ticker: String,
    /// 날짜 축과 같은 길이의 가격 벡터 (결측일은 `None`)
    pub closes: Vec<Option<Decimal>>,
}

impl PriceSeries {
    /// 모든 값이 결측인지 확인.
    pub fn is_all_missing(&self) -> bool {
        self.closes.iter().all(|c| c.is_none())
    }

    /// 결측이 아닌 값의 개수.
    pub fn count(&self) -> usize {
        self.closes.iter().filter(|c| c.is_some()).count()
    }
}

/// 일별 가격 테이블.
///
/// 벤치마크와 섹터 종목의 조정 종가를 하나의 날짜 축에 정렬합니다.
/// 컬럼 순서는 빌더에 추가된 순서를 유지합니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceTable {
    dates: Vec<NaiveDate>,
    columns: Vec<PriceSeries>,
}

impl PriceTable {
    /// 새로운 빌더 생성.
    pub fn builder() -> PriceTableBuilder {
        PriceTableBuilder::default()
    }

    /// 날짜 축.
    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    /// 전체 컬럼.
    pub fn columns(&self) -> &[PriceSeries] {
        &self.columns
    }

    /// 컬럼 티커 목록 (추가 순서).
    pub fn tickers(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.ticker.as_str()).collect()
    }

    /// 날짜 축 길이.
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    /// 데이터가 전혀 없는지 확인 (날짜 또는 컬럼 없음).
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty() || self.columns.is_empty()
    }

    /// 티커로 컬럼 조회.
    pub fn column(&self, ticker: &str) -> Option<&PriceSeries> {
        self.columns.iter().find(|c| c.ticker == ticker)
    }

    /// 모든 값이 결측인 컬럼을 제거한 테이블 반환.
    pub fn retain_non_empty(self) -> Self {
        let columns = self
            .columns
            .into_iter()
            .filter(|c| !c.is_all_missing())
            .collect();
        Self {
            dates: self.dates,
            columns,
        }
    }

    /// 요청 날짜에 가장 가까운 거래일의 인덱스와 날짜를 반환.
    ///
    /// 거리 비교는 달력 일수의 절대값 기준이며, 두 후보가 정확히
    /// 같은 거리이면 이른 날짜를 선택합니다. 날짜 축이 비어 있으면
    /// `None`을 반환합니다.
    pub fn nearest_index(&self, target: NaiveDate) -> Option<(usize, NaiveDate)> {
        if self.dates.is_empty() {
            return None;
        }

        match self.dates.binary_search(&target) {
            Ok(idx) => Some((idx, self.dates[idx])),
            Err(ins) => {
                // ins는 target보다 큰 첫 위치
                if ins == 0 {
                    return Some((0, self.dates[0]));
                }
                if ins == self.dates.len() {
                    let last = self.dates.len() - 1;
                    return Some((last, self.dates[last]));
                }

                let before = self.dates[ins - 1];
                let after = self.dates[ins];
                let dist_before = (target - before).num_days();
                let dist_after = (after - target).num_days();

                // 동률이면 이른 날짜 선택
                if dist_before <= dist_after {
                    Some((ins - 1, before))
                } else {
                    Some((ins, after))
                }
            }
        }
    }
}

/// 가격 테이블 빌더.
///
/// 종목별 시계열을 모아 날짜 기준 외부 조인으로 테이블을 만듭니다.
#[derive(Debug, Default)]
pub struct PriceTableBuilder {
    series: Vec<(String, Vec<DailyClose>)>,
}

impl PriceTableBuilder {
    /// 종목 시계열 추가.
    ///
    /// 같은 날짜가 중복되면 나중 값이 우선합니다.
    pub fn add_series(mut self, ticker: impl Into<String>, closes: Vec<DailyClose>) -> Self {
        self.series.push((ticker.into(), closes));
        self
    }

    /// 테이블 생성.
    pub fn build(self) -> PriceTable {
        // 1. 전체 날짜 축 수집 (중복 제거 + 오름차순)
        let dates: Vec<NaiveDate> = self
            .series
            .iter()
            .flat_map(|(_, closes)| closes.iter().map(|c| c.date))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        // 2. 컬럼별로 날짜 축에 정렬
        let columns = self
            .series
            .into_iter()
            .map(|(ticker, closes)| {
                let by_date: HashMap<NaiveDate, Decimal> =
                    closes.into_iter().map(|c| (c.date, c.close)).collect();
                let aligned = dates.iter().map(|d| by_date.get(d).copied()).collect();
                PriceSeries {
                    ticker,
                    closes: aligned,
                }
            })
            .collect();

        PriceTable { dates, columns }
    }
}
