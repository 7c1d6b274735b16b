//! 분석 모듈 오류 타입.

use thiserror::Error;

/// 상대 정규화 오류.
///
/// 두 오류 모두 치명적이며 실행을 중단시킵니다. 일부 종목의 결측
/// 구간은 오류가 아니라 결측값으로 전파됩니다.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AnalyticsError {
    /// 가격 데이터가 전혀 없음
    #[error("가격 데이터가 비어 있습니다")]
    EmptyData,

    /// 벤치마크 컬럼이 수집된 데이터에 없음
    #[error("벤치마크 컬럼 없음: {ticker}")]
    MissingBenchmark {
        /// 요청한 벤치마크 티커
        ticker: String,
    },
}
