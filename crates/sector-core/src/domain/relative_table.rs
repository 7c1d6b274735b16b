//! 상대 지수 결과 테이블.
//!
//! 정규화 결과를 담는 불변 테이블입니다. 날짜 축은 입력 가격 테이블과
//! 동일하며, 벤치마크 컬럼은 포함하지 않습니다.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 단일 종목의 상대 지수 컬럼.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelativeSeries {
    /// 종목 티커
    pub ticker: String,
    /// 날짜 축과 같은 길이의 지수 벡터 (기준일 = 100, 결측일은 `None`)
    pub values: Vec<Option<Decimal>>,
}

/// 상대 지수 테이블.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelativeTable {
    dates: Vec<NaiveDate>,
    series: Vec<RelativeSeries>,
}

impl RelativeTable {
    /// 새로운 상대 지수 테이블 생성.
    ///
    /// 모든 컬럼은 날짜 축과 같은 길이여야 합니다.
    pub fn new(dates: Vec<NaiveDate>, series: Vec<RelativeSeries>) -> Self {
        debug_assert!(series.iter().all(|s| s.values.len() == dates.len()));
        Self { dates, series }
    }

    /// 날짜 축.
    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    /// 종목 컬럼 목록.
    pub fn series(&self) -> &[RelativeSeries] {
        &self.series
    }

    /// 컬럼 티커 목록.
    pub fn tickers(&self) -> Vec<&str> {
        self.series.iter().map(|s| s.ticker.as_str()).collect()
    }

    /// 날짜 축 길이.
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    /// 컬럼이 하나도 없거나 날짜 축이 비었는지 확인.
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty() || self.series.is_empty()
    }

    /// 티커로 컬럼 조회.
    pub fn column(&self, ticker: &str) -> Option<&RelativeSeries> {
        self.series.iter().find(|s| s.ticker == ticker)
    }
}
