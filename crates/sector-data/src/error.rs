//! 데이터 모듈 오류 타입.

use thiserror::Error;

/// 데이터 관련 오류.
#[derive(Debug, Error)]
pub enum DataError {
    /// HTTP 전송 오류
    #[error("HTTP 요청 실패: {0}")]
    Http(#[from] reqwest::Error),

    /// 업스트림 API가 보고한 오류
    #[error("Yahoo Finance API 오류: {0}")]
    Api(String),

    /// 응답 본문 파싱 오류
    #[error("응답 파싱 실패: {0}")]
    Parse(String),

    /// 요청한 종목에 데이터가 없음
    #[error("데이터 없음: {ticker}")]
    NoData {
        /// 요청한 티커
        ticker: String,
    },

    /// 파일 입출력 오류
    #[error("파일 입출력 실패: {0}")]
    Io(#[from] std::io::Error),
}

/// 데이터 모듈 결과 타입.
pub type Result<T> = std::result::Result<T, DataError>;
