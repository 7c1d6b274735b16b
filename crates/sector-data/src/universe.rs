//! 유니버스 가격 수집.
//!
//! 벤치마크와 섹터 티커 목록을 순차 조회하여 하나의 가격 테이블로
//! 구성합니다. 요청 사이에는 지연을 두어 업스트림 제한을 피합니다.
//!
//! 개별 티커 조회 실패는 치명적이지 않습니다. 실패한 티커는 전부
//! 결측인 컬럼과 동일하게 취급되어 테이블에서 제외되며, 벤치마크가
//! 빠졌는지 여부는 정규화 단계에서 판정합니다.

use chrono::NaiveDate;
use sector_core::PriceTable;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::provider::PriceProvider;

/// 기본 요청 간 지연 (밀리초).
pub const DEFAULT_REQUEST_DELAY_MS: u64 = 200;

/// 티커 목록의 일별 종가를 수집하여 가격 테이블을 만듭니다.
///
/// 반환 테이블의 컬럼 순서는 `tickers` 순서이며, 전부 결측인 컬럼은
/// 제거됩니다. 모든 티커가 실패하면 빈 테이블이 반환됩니다.
pub async fn fetch_universe(
    provider: &dyn PriceProvider,
    tickers: &[&str],
    start: NaiveDate,
    end: NaiveDate,
    request_delay: Duration,
) -> PriceTable {
    let mut builder = PriceTable::builder();

    for (i, ticker) in tickers.iter().enumerate() {
        if i > 0 && !request_delay.is_zero() {
            tokio::time::sleep(request_delay).await;
        }

        match provider.fetch_daily(ticker, start, end).await {
            Ok(closes) => {
                debug!(ticker = %ticker, count = closes.len(), "수집 완료");
                builder = builder.add_series(*ticker, closes);
            }
            Err(e) => {
                warn!(ticker = %ticker, error = %e, "수집 실패, 컬럼 제외");
                builder = builder.add_series(*ticker, Vec::new());
            }
        }
    }

    let table = builder.build().retain_non_empty();

    for column in table.columns() {
        debug!(ticker = %column.ticker, points = column.count(), "컬럼 구성");
    }

    info!(
        requested = tickers.len(),
        columns = table.columns().len(),
        rows = table.len(),
        "가격 테이블 구성"
    );

    table
}
