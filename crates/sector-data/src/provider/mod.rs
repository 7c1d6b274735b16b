//! 가격 데이터 제공자.
//!
//! 일별 조정 종가 소스를 추상화하는 trait과 Yahoo Finance 구현을
//! 제공합니다. 테스트에서는 메모리 기반 구현으로 대체할 수 있습니다.

use async_trait::async_trait;
use chrono::NaiveDate;
use sector_core::DailyClose;

use crate::error::Result;

/// 일별 가격 데이터 제공자 trait.
#[async_trait]
pub trait PriceProvider: Send + Sync {
    /// 일별 조정 종가 시계열 조회.
    ///
    /// # 인자
    /// * `ticker` - Yahoo Finance 형식 심볼 (예: "SPY", "1321.T")
    /// * `start` - 조회 시작일 (포함)
    /// * `end` - 조회 종료일 (포함)
    ///
    /// # 반환
    /// 날짜 오름차순의 일별 종가. 기간 내 데이터가 없으면 빈 벡터.
    async fn fetch_daily(
        &self,
        ticker: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<DailyClose>>;
}

pub mod yahoo;

pub use yahoo::YahooChartProvider;
