//! Yahoo Finance v8 차트 API 제공자.
//!
//! 일봉 조정 종가를 조회합니다. 응답에 `adjclose`가 있으면 이를
//! 우선 사용하고, 없으면 원시 종가로 대체합니다. 거래가 없는 날의
//! null 슬롯은 건너뜁니다.
//!
//! # 심볼 형식
//!
//! 모든 심볼은 Yahoo Finance 형식으로 전달되어야 합니다:
//! - 미국 ETF: "SPY", "XLK"
//! - 일본 ETF: "1321.T", "1625.T"

use async_trait::async_trait;
use chrono::{NaiveDate, TimeZone, Utc};
use reqwest::Client;
use rust_decimal::Decimal;
use sector_core::DailyClose;
use serde::Deserialize;
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, warn};

use crate::error::{DataError, Result};
use crate::provider::PriceProvider;

const DEFAULT_BASE_URL: &str = "https://query1.finance.yahoo.com";
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Yahoo Finance v8 응답 구조.
#[derive(Debug, Deserialize)]
struct YahooChartResponse {
    chart: YahooChart,
}

#[derive(Debug, Deserialize)]
struct YahooChart {
    result: Option<Vec<YahooResult>>,
    error: Option<YahooApiError>,
}

#[derive(Debug, Deserialize)]
struct YahooApiError {
    code: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct YahooResult {
    timestamp: Option<Vec<i64>>,
    indicators: YahooIndicators,
}

#[derive(Debug, Deserialize)]
struct YahooIndicators {
    quote: Vec<YahooQuote>,
    #[serde(rename = "adjclose")]
    adj_close: Option<Vec<YahooAdjClose>>,
}

#[derive(Debug, Deserialize)]
struct YahooQuote {
    close: Option<Vec<Option<f64>>>,
}

#[derive(Debug, Deserialize)]
struct YahooAdjClose {
    #[serde(rename = "adjclose")]
    adj_close: Option<Vec<Option<f64>>>,
}

/// Yahoo Finance 차트 API 제공자.
pub struct YahooChartProvider {
    client: Client,
    base_url: String,
}

impl YahooChartProvider {
    /// 새로운 제공자 생성.
    pub fn new() -> Result<Self> {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// 기본 URL을 지정하여 생성 (테스트용).
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    /// 차트 API 요청 URL 생성.
    fn chart_url(&self, ticker: &str, start: NaiveDate, end: NaiveDate) -> String {
        let start_ts = Utc
            .from_utc_datetime(&start.and_hms_opt(0, 0, 0).unwrap())
            .timestamp();
        let end_ts = Utc
            .from_utc_datetime(&end.and_hms_opt(23, 59, 59).unwrap())
            .timestamp();

        format!(
            "{}/v8/finance/chart/{}?period1={}&period2={}&interval=1d&events=history",
            self.base_url, ticker, start_ts, end_ts
        )
    }
}

#[async_trait]
impl PriceProvider for YahooChartProvider {
    async fn fetch_daily(
        &self,
        ticker: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<DailyClose>> {
        let url = self.chart_url(ticker, start, end);
        debug!(ticker = %ticker, url = %url, "Yahoo Finance 조회");

        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(DataError::Api(format!("{} - {}", status, body)));
        }

        let body = response.text().await?;
        let closes = parse_chart_body(ticker, &body)?;

        if closes.is_empty() {
            warn!(ticker = %ticker, "기간 내 데이터 없음");
        } else {
            debug!(ticker = %ticker, count = closes.len(), "일봉 수신");
        }

        Ok(closes)
    }
}

/// v8 차트 응답 본문을 일별 종가로 변환합니다.
///
/// `adjclose` 우선, 원시 종가 대체. 어느 쪽도 없는 슬롯은 건너뜁니다.
fn parse_chart_body(ticker: &str, body: &str) -> Result<Vec<DailyClose>> {
    let parsed: YahooChartResponse =
        serde_json::from_str(body).map_err(|e| DataError::Parse(e.to_string()))?;

    if let Some(error) = parsed.chart.error {
        return Err(DataError::Api(format!("{} - {}", error.code, error.description)));
    }

    let result = parsed
        .chart
        .result
        .and_then(|r| r.into_iter().next())
        .ok_or_else(|| DataError::NoData {
            ticker: ticker.to_string(),
        })?;

    let timestamps = result.timestamp.unwrap_or_default();
    let quote = result
        .indicators
        .quote
        .into_iter()
        .next()
        .ok_or_else(|| DataError::Parse("quote 데이터 없음".to_string()))?;

    let raw_closes = quote.close.unwrap_or_default();
    let adj_closes = result
        .indicators
        .adj_close
        .and_then(|ac| ac.into_iter().next())
        .and_then(|ac| ac.adj_close);

    let mut data = Vec::new();
    for (i, ts) in timestamps.iter().enumerate() {
        let close = adj_closes
            .as_ref()
            .and_then(|ac| ac.get(i).and_then(|v| *v))
            .or_else(|| raw_closes.get(i).and_then(|v| *v));

        if let Some(c) = close {
            let date = match chrono::DateTime::from_timestamp(*ts, 0) {
                Some(dt) => dt.date_naive(),
                None => continue,
            };
            if let Ok(price) = Decimal::from_str(&format!("{:.4}", c)) {
                data.push(DailyClose::new(date, price));
            }
        }
    }

    // 날짜순 정렬 후 중복 제거 (장중 임시 봉이 마지막에 붙는 경우)
    data.sort_by_key(|c| c.date);
    data.dedup_by_key(|c| c.date);

    Ok(data)
}
