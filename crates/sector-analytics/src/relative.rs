//! 벤치마크 대비 상대 정규화.
//!
//! 일별 가격 테이블을 받아 각 종목을 벤치마크로 나눈 뒤, 기준일의
//! 비율이 100이 되도록 다시 스케일링합니다. 결과 지수의 변동은
//! 절대 가격이 아니라 벤치마크 대비 상대 성과만 반영합니다.
//!
//! # 결측값 규칙
//!
//! - 어느 한쪽이 결측인 행의 비율은 결측
//! - 벤치마크가 0인 행의 비율은 결측 (`checked_div` 전파)
//! - 기준일 비율이 결측이거나 0인 종목은 전체 컬럼이 결측
//! - 전부 결측인 종목 컬럼은 결과에서 제외

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use sector_core::{PriceTable, RelativeSeries, RelativeTable};
use tracing::{debug, info};

use crate::error::AnalyticsError;

/// 기준일에 부여되는 지수 값.
const BASE_INDEX: Decimal = dec!(100);

/// 벤치마크 대비 상대 정규화를 수행합니다.
///
/// # 인자
///
/// * `table` - 벤치마크 컬럼을 포함한 일별 가격 테이블
/// * `benchmark` - 벤치마크 티커
/// * `baseline` - 요청 기준일 (거래일이 아니어도 됨)
///
/// # 반환
///
/// 정규화된 테이블(벤치마크 컬럼 제외)과 실제 사용된 기준일.
/// 요청일이 거래일이 아니면 가장 가까운 거래일로 해석되며,
/// 동률이면 이른 날짜를 선택합니다.
///
/// # 오류
///
/// * [`AnalyticsError::EmptyData`] - 테이블에 데이터가 전혀 없거나,
///   값이 있는 종목 컬럼이 하나도 없는 경우
/// * [`AnalyticsError::MissingBenchmark`] - 벤치마크 컬럼이 없거나
///   전부 결측인 경우
pub fn relative_normalized(
    table: &PriceTable,
    benchmark: &str,
    baseline: NaiveDate,
) -> Result<(RelativeTable, NaiveDate), AnalyticsError> {
    if table.is_empty() {
        return Err(AnalyticsError::EmptyData);
    }

    // 수집 단계에서 전부 결측인 컬럼은 이미 제거되므로,
    // 전부 결측인 벤치마크도 "없음"과 같은 조건으로 취급한다.
    let bench = table
        .column(benchmark)
        .filter(|col| !col.is_all_missing())
        .ok_or_else(|| AnalyticsError::MissingBenchmark {
            ticker: benchmark.to_string(),
        })?;

    // 테이블이 비어 있지 않으므로 항상 해석 가능
    let (baseline_idx, baseline_used) = table
        .nearest_index(baseline)
        .ok_or(AnalyticsError::EmptyData)?;

    debug!(
        requested = %baseline,
        resolved = %baseline_used,
        "기준일 해석"
    );

    let mut series = Vec::new();
    for column in table.columns() {
        if column.ticker == benchmark {
            continue;
        }
        if column.is_all_missing() {
            info!(ticker = %column.ticker, "전부 결측인 컬럼 제외");
            continue;
        }

        // 1. 행 단위 비율: 종목 / 벤치마크
        let ratios: Vec<Option<Decimal>> = column
            .closes
            .iter()
            .zip(bench.closes.iter())
            .map(|(inst, bench)| match (inst, bench) {
                (Some(i), Some(b)) => i.checked_div(*b),
                _ => None,
            })
            .collect();

        // 2. 기준일 비율로 재스케일링 (기준일 비율이 결측/0이면 전체 결측)
        let base_ratio = ratios[baseline_idx];
        let values: Vec<Option<Decimal>> = ratios
            .iter()
            .map(|r| {
                let r = (*r)?;
                let base = base_ratio?;
                r.checked_div(base)?.checked_mul(BASE_INDEX)
            })
            .collect();

        series.push(RelativeSeries {
            ticker: column.ticker.clone(),
            values,
        });
    }

    if series.is_empty() {
        return Err(AnalyticsError::EmptyData);
    }

    info!(
        instruments = series.len(),
        rows = table.len(),
        baseline = %baseline_used,
        "상대 정규화 완료"
    );

    Ok((RelativeTable::new(table.dates().to_vec(), series), baseline_used))
}

#[cfg(test)]
mod tests {
    use super::*;
    use sector_core::{DailyClose, PriceTable};

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn closes(points: &[(NaiveDate, i64)]) -> Vec<DailyClose> {
        points
            .iter()
            .map(|&(date, price)| DailyClose::new(date, Decimal::from(price)))
            .collect()
    }

    fn three_day_dates() -> [NaiveDate; 3] {
        [d(2020, 1, 1), d(2020, 1, 2), d(2020, 1, 3)]
    }

    #[test]
    fn test_constant_ratio_stays_at_100() {
        let [d1, d2, d3] = three_day_dates();
        let table = PriceTable::builder()
            .add_series("BENCH", closes(&[(d1, 10), (d2, 10), (d3, 20)]))
            .add_series("A", closes(&[(d1, 5), (d2, 5), (d3, 10)]))
            .build();

        let (result, used) = relative_normalized(&table, "BENCH", d1).unwrap();

        assert_eq!(used, d1);
        let a = result.column("A").unwrap();
        assert_eq!(
            a.values,
            vec![Some(dec!(100)), Some(dec!(100)), Some(dec!(100))]
        );
    }

    #[test]
    fn test_mid_table_baseline() {
        let [d1, d2, d3] = three_day_dates();
        let table = PriceTable::builder()
            .add_series("BENCH", closes(&[(d1, 10), (d2, 10), (d3, 10)]))
            .add_series("B", closes(&[(d1, 5), (d2, 10), (d3, 20)]))
            .build();

        let (result, used) = relative_normalized(&table, "BENCH", d2).unwrap();

        assert_eq!(used, d2);
        let b = result.column("B").unwrap();
        assert_eq!(
            b.values,
            vec![Some(dec!(50)), Some(dec!(100)), Some(dec!(200))]
        );
    }

    #[test]
    fn test_baseline_row_is_exactly_100() {
        let [d1, d2, d3] = three_day_dates();
        let table = PriceTable::builder()
            .add_series("BENCH", closes(&[(d1, 7), (d2, 13), (d3, 17)]))
            .add_series("A", closes(&[(d1, 3), (d2, 11), (d3, 19)]))
            .add_series("B", closes(&[(d1, 23), (d2, 29), (d3, 31)]))
            .build();

        let (result, _) = relative_normalized(&table, "BENCH", d2).unwrap();

        // 기준일 행은 분자와 분모가 같은 비율이므로 정확히 100
        for column in result.series() {
            assert_eq!(column.values[1], Some(dec!(100)));
        }
    }

    #[test]
    fn test_missing_benchmark_column() {
        let [d1, d2, _] = three_day_dates();
        let table = PriceTable::builder()
            .add_series("A", closes(&[(d1, 5), (d2, 10)]))
            .build();

        let err = relative_normalized(&table, "BENCH", d1).unwrap_err();
        assert_eq!(
            err,
            AnalyticsError::MissingBenchmark {
                ticker: "BENCH".to_string()
            }
        );
    }

    #[test]
    fn test_all_missing_benchmark_treated_as_missing() {
        let [d1, d2, _] = three_day_dates();
        let table = PriceTable::builder()
            .add_series("BENCH", Vec::new())
            .add_series("A", closes(&[(d1, 5), (d2, 10)]))
            .build();

        let err = relative_normalized(&table, "BENCH", d1).unwrap_err();
        assert!(matches!(err, AnalyticsError::MissingBenchmark { .. }));
    }

    #[test]
    fn test_empty_table() {
        let table = PriceTable::builder().build();
        let err = relative_normalized(&table, "BENCH", d(2020, 1, 1)).unwrap_err();
        assert_eq!(err, AnalyticsError::EmptyData);
    }

    #[test]
    fn test_benchmark_only_table() {
        let [d1, d2, _] = three_day_dates();
        let table = PriceTable::builder()
            .add_series("BENCH", closes(&[(d1, 10), (d2, 10)]))
            .build();

        let err = relative_normalized(&table, "BENCH", d1).unwrap_err();
        assert_eq!(err, AnalyticsError::EmptyData);
    }

    #[test]
    fn test_all_missing_instrument_dropped() {
        let [d1, d2, _] = three_day_dates();
        let table = PriceTable::builder()
            .add_series("BENCH", closes(&[(d1, 10), (d2, 10)]))
            .add_series("A", closes(&[(d1, 5), (d2, 10)]))
            .add_series("GHOST", Vec::new())
            .build();

        let (result, _) = relative_normalized(&table, "BENCH", d1).unwrap();

        assert_eq!(result.tickers(), vec!["A"]);
        assert!(result.column("GHOST").is_none());
    }

    #[test]
    fn test_sparse_instrument_keeps_gaps() {
        let [d1, d2, d3] = three_day_dates();
        let table = PriceTable::builder()
            .add_series("BENCH", closes(&[(d1, 10), (d2, 10), (d3, 10)]))
            .add_series("A", closes(&[(d1, 5), (d3, 20)]))
            .build();

        let (result, _) = relative_normalized(&table, "BENCH", d1).unwrap();

        let a = result.column("A").unwrap();
        assert_eq!(a.values, vec![Some(dec!(100)), None, Some(dec!(400))]);
    }

    #[test]
    fn test_zero_benchmark_row_propagates_missing() {
        let [d1, d2, d3] = three_day_dates();
        let table = PriceTable::builder()
            .add_series("BENCH", closes(&[(d1, 10), (d2, 0), (d3, 10)]))
            .add_series("A", closes(&[(d1, 5), (d2, 5), (d3, 20)]))
            .build();

        let (result, _) = relative_normalized(&table, "BENCH", d1).unwrap();

        let a = result.column("A").unwrap();
        assert_eq!(a.values, vec![Some(dec!(100)), None, Some(dec!(400))]);
    }

    #[test]
    fn test_missing_baseline_ratio_blanks_column() {
        let [d1, d2, d3] = three_day_dates();
        let table = PriceTable::builder()
            .add_series("BENCH", closes(&[(d1, 10), (d2, 10), (d3, 10)]))
            // 기준일(d1)에 값이 없는 종목
            .add_series("A", closes(&[(d2, 10), (d3, 20)]))
            .build();

        let (result, _) = relative_normalized(&table, "BENCH", d1).unwrap();

        let a = result.column("A").unwrap();
        assert_eq!(a.values, vec![None, None, None]);
    }

    #[test]
    fn test_weekend_baseline_resolves_to_nearest_trading_day() {
        // 2020-01-03은 금요일, 2020-01-06은 월요일
        let friday = d(2020, 1, 3);
        let monday = d(2020, 1, 6);
        let table = PriceTable::builder()
            .add_series("BENCH", closes(&[(friday, 10), (monday, 10)]))
            .add_series("A", closes(&[(friday, 5), (monday, 10)]))
            .build();

        // 토요일 요청 → 금요일이 더 가까움
        let (_, used) = relative_normalized(&table, "BENCH", d(2020, 1, 4)).unwrap();
        assert_eq!(used, friday);

        // 일요일 요청 → 월요일이 더 가까움
        let (_, used) = relative_normalized(&table, "BENCH", d(2020, 1, 5)).unwrap();
        assert_eq!(used, monday);
    }

    #[test]
    fn test_requested_date_reported_distinctly() {
        let friday = d(2020, 1, 3);
        let monday = d(2020, 1, 6);
        let table = PriceTable::builder()
            .add_series("BENCH", closes(&[(friday, 10), (monday, 10)]))
            .add_series("A", closes(&[(friday, 5), (monday, 10)]))
            .build();

        let requested = d(2020, 1, 4);
        let (_, used) = relative_normalized(&table, "BENCH", requested).unwrap();
        assert_ne!(used, requested);
    }

    #[test]
    fn test_determinism() {
        let [d1, d2, d3] = three_day_dates();
        let table = PriceTable::builder()
            .add_series("BENCH", closes(&[(d1, 7), (d2, 13), (d3, 17)]))
            .add_series("A", closes(&[(d1, 3), (d2, 11), (d3, 19)]))
            .build();

        let first = relative_normalized(&table, "BENCH", d2).unwrap();
        let second = relative_normalized(&table, "BENCH", d2).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_benchmark_excluded_from_output() {
        let [d1, d2, _] = three_day_dates();
        let table = PriceTable::builder()
            .add_series("BENCH", closes(&[(d1, 10), (d2, 10)]))
            .add_series("A", closes(&[(d1, 5), (d2, 10)]))
            .build();

        let (result, _) = relative_normalized(&table, "BENCH", d1).unwrap();
        assert!(result.column("BENCH").is_none());
    }
}
