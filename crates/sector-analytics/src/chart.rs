//! 상대 지수 SVG 라인 차트 렌더링.
//!
//! 정규화된 테이블을 종목별 라인 차트로 그립니다. 기준일에는 점선
//! 수직 마커와 주석 레이블을 표시하고, 지수 100에는 가이드 라인을
//! 그립니다. 결측 구간은 보간하지 않고 라인을 끊어서 표시합니다.

use chrono::{Datelike, NaiveDate};
use rust_decimal::prelude::ToPrimitive;
use sector_core::RelativeTable;
use std::io;
use std::path::Path;

const WIDTH: i32 = 960;
const HEIGHT: i32 = 540;
const MARGIN_LEFT: f64 = 64.0;
const MARGIN_RIGHT: f64 = 24.0;
const MARGIN_TOP: f64 = 48.0;
const MARGIN_BOTTOM: f64 = 104.0;

/// 종목 라인 색상 팔레트 (유니버스 순서대로 순환).
const PALETTE: [&str; 14] = [
    "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2",
    "#7f7f7f", "#bcbd22", "#17becf", "#393b79", "#ad494a", "#637939", "#7b4173",
];
const GUIDE_COLOR: &str = "#8c8c8c";
const BASELINE_COLOR: &str = "#555555";

/// 차트 텍스트 요소.
#[derive(Debug, Clone)]
pub struct ChartSpec<'a> {
    /// 차트 제목
    pub title: &'a str,
    /// Y축 레이블
    pub y_label: &'a str,
    /// 기준일 주석 레이블
    pub baseline_label: &'a str,
}

/// 상대 지수 테이블을 SVG 문서로 렌더링합니다.
///
/// `baseline`은 정규화에서 실제 사용된 기준일이어야 하며, 날짜 축에
/// 존재하면 점선 마커와 주석이 그려집니다. 테이블이 비어 있으면 빈
/// 문자열을 반환합니다.
pub fn render_relative_chart(
    table: &RelativeTable,
    baseline: NaiveDate,
    spec: &ChartSpec<'_>,
) -> String {
    if table.is_empty() {
        return String::new();
    }

    let width = WIDTH as f64;
    let height = HEIGHT as f64;
    let plot_right = width - MARGIN_RIGHT;
    let plot_bottom = height - MARGIN_BOTTOM;

    let xs = x_positions(table.len(), MARGIN_LEFT, plot_right);

    // 종목별 f64 변환 (Decimal은 SVG 좌표 경계에서만 f64로 내려간다)
    let columns: Vec<(&str, Vec<Option<f64>>)> = table
        .series()
        .iter()
        .map(|s| {
            let values = s.values.iter().map(|v| v.and_then(|d| d.to_f64())).collect();
            (s.ticker.as_str(), values)
        })
        .collect();

    let (min_v, max_v) = match value_extent(&columns) {
        Some(extent) => extent,
        None => return String::new(),
    };

    let scale_y = |v: f64| -> f64 {
        MARGIN_TOP + (max_v - v) / (max_v - min_v) * (plot_bottom - MARGIN_TOP)
    };

    let mut svg = svg_header(WIDTH, HEIGHT);

    svg.push_str(&format!(
        r##"<rect width="{w}" height="{h}" fill="#ffffff" />"##,
        w = WIDTH,
        h = HEIGHT
    ));

    // 제목과 Y축 레이블
    svg.push_str(&format!(
        r##"<text x="{x:.0}" y="26" text-anchor="middle" font-size="14" fill="#333">{title}</text>"##,
        x = width / 2.0,
        title = escape_text(spec.title)
    ));
    svg.push_str(&format!(
        r##"<text x="16" y="{y:.0}" text-anchor="middle" font-size="11" fill="#333" transform="rotate(-90 16 {y:.0})">{label}</text>"##,
        y = (MARGIN_TOP + plot_bottom) / 2.0,
        label = escape_text(spec.y_label)
    ));

    // Y축 눈금과 그리드
    for step in 0..=4 {
        let v = min_v + (max_v - min_v) * f64::from(step) / 4.0;
        let y = scale_y(v);
        svg.push_str(&format!(
            r##"<line x1="{x1:.2}" y1="{y:.2}" x2="{x2:.2}" y2="{y:.2}" stroke="#dddddd" stroke-width="0.5" />"##,
            x1 = MARGIN_LEFT,
            x2 = plot_right,
            y = y
        ));
        svg.push_str(&format!(
            r#"<text x="{x:.2}" y="{y:.2}" text-anchor="end">{v:.0}</text>"#,
            x = MARGIN_LEFT - 6.0,
            y = y + 3.0,
            v = v
        ));
    }

    // 지수 100 가이드 라인
    let guide_y = scale_y(100.0);
    svg.push_str(&format!(
        r#"<line x1="{x1:.2}" y1="{y:.2}" x2="{x2:.2}" y2="{y:.2}" stroke="{color}" stroke-width="1" stroke-dasharray="4 3" />"#,
        x1 = MARGIN_LEFT,
        x2 = plot_right,
        y = guide_y,
        color = GUIDE_COLOR
    ));

    add_time_axis(&mut svg, table.dates(), &xs, plot_bottom);

    // 종목 라인 (결측 구간에서 세그먼트를 끊는다)
    for (i, (_, values)) in columns.iter().enumerate() {
        let color = PALETTE[i % PALETTE.len()];
        let mut segment: Vec<(f64, f64)> = Vec::new();
        for (idx, value) in values.iter().enumerate() {
            match value {
                Some(v) if v.is_finite() => segment.push((xs[idx], scale_y(*v))),
                _ => flush_segment(&mut svg, &mut segment, color),
            }
        }
        flush_segment(&mut svg, &mut segment, color);
    }

    // 기준일 마커와 주석
    if let Some(bidx) = table.dates().iter().position(|d| *d == baseline) {
        let bx = xs[bidx];
        svg.push_str(&format!(
            r#"<line x1="{x:.2}" y1="{y1:.2}" x2="{x:.2}" y2="{y2:.2}" stroke="{color}" stroke-width="1" stroke-dasharray="4 3" />"#,
            x = bx,
            y1 = MARGIN_TOP,
            y2 = plot_bottom,
            color = BASELINE_COLOR
        ));
        // 플롯 상단 기준 (5, -20) 픽셀 오프셋
        svg.push_str(&format!(
            r##"<text x="{x:.2}" y="{y:.2}" text-anchor="start" fill="#333">{label}</text>"##,
            x = bx + 5.0,
            y = MARGIN_TOP + 20.0,
            label = escape_text(spec.baseline_label)
        ));
    }

    draw_legend(&mut svg, &columns, plot_bottom);

    svg.push_str(svg_footer());
    svg
}

/// 렌더링된 SVG 문서를 파일로 저장합니다.
pub fn save_relative_chart(path: impl AsRef<Path>, svg: &str) -> io::Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, svg)
}

fn svg_header(width: i32, height: i32) -> String {
    format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {w} {h}"><style>text{{font-family:Arial,sans-serif;font-size:10px;fill:#666}}</style>"#,
        w = width,
        h = height
    )
}

fn svg_footer() -> &'static str {
    "</svg>"
}

fn escape_text(s: &str) -> String {
    s.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

/// 날짜 인덱스를 X 좌표로 변환 (등간격).
fn x_positions(count: usize, left: f64, right: f64) -> Vec<f64> {
    if count == 1 {
        return vec![(left + right) / 2.0];
    }
    (0..count)
        .map(|i| left + (right - left) * i as f64 / (count - 1) as f64)
        .collect()
}

fn value_extent(columns: &[(&str, Vec<Option<f64>>)]) -> Option<(f64, f64)> {
    let mut min_v = f64::INFINITY;
    let mut max_v = f64::NEG_INFINITY;

    for (_, values) in columns {
        for value in values.iter().flatten() {
            if value.is_finite() {
                min_v = min_v.min(*value);
                max_v = max_v.max(*value);
            }
        }
    }

    // 지수 100 가이드는 항상 보이도록 범위에 포함
    min_v = min_v.min(100.0);
    max_v = max_v.max(100.0);

    if !min_v.is_finite() || !max_v.is_finite() {
        return None;
    }

    if (max_v - min_v).abs() < f64::EPSILON {
        min_v -= 1.0;
        max_v += 1.0;
    } else {
        let pad = (max_v - min_v) * 0.05;
        min_v -= pad;
        max_v += pad;
    }

    Some((min_v, max_v))
}

/// 누적된 세그먼트를 polyline 혹은 단독 점으로 출력하고 비운다.
fn flush_segment(svg: &mut String, segment: &mut Vec<(f64, f64)>, color: &str) {
    match segment.len() {
        0 => {}
        1 => {
            let (x, y) = segment[0];
            svg.push_str(&format!(
                r#"<circle cx="{x:.2}" cy="{y:.2}" r="1.8" fill="{color}" />"#,
                x = x,
                y = y,
                color = color
            ));
        }
        _ => {
            let points = segment
                .iter()
                .map(|(x, y)| format!("{x:.2},{y:.2}"))
                .collect::<Vec<_>>()
                .join(" ");
            svg.push_str(&format!(
                r#"<polyline fill="none" stroke="{color}" stroke-width="1.2" points="{points}" />"#,
                color = color,
                points = points
            ));
        }
    }
    segment.clear();
}

fn add_time_axis(svg: &mut String, dates: &[NaiveDate], xs: &[f64], axis_y: f64) {
    svg.push_str(&format!(
        r##"<line x1="{x1:.2}" y1="{y:.2}" x2="{x2:.2}" y2="{y:.2}" stroke="#000" stroke-width="1" />"##,
        x1 = xs.first().copied().unwrap_or(MARGIN_LEFT),
        x2 = xs.last().copied().unwrap_or(MARGIN_LEFT),
        y = axis_y
    ));

    // 월 첫 거래일에 레이블 (기간이 길면 분기 단위로 솎아낸다)
    let mut month_starts: Vec<(usize, NaiveDate)> = Vec::new();
    let mut last_month: Option<(i32, u32)> = None;
    for (idx, date) in dates.iter().enumerate() {
        let key = (date.year(), date.month());
        if last_month != Some(key) {
            last_month = Some(key);
            month_starts.push((idx, *date));
        }
    }
    if month_starts.len() > 24 {
        month_starts.retain(|(_, date)| date.month() % 3 == 1);
    }

    for (idx, date) in month_starts {
        let x = xs[idx];
        svg.push_str(&format!(
            r##"<line x1="{x:.2}" y1="{y1:.2}" x2="{x:.2}" y2="{y2:.2}" stroke="#ccc" stroke-width="1" />"##,
            x = x,
            y1 = axis_y,
            y2 = axis_y + 4.0
        ));
        svg.push_str(&format!(
            r#"<text x="{x:.2}" y="{y:.2}" text-anchor="middle">{label}</text>"#,
            x = x,
            y = axis_y + 16.0,
            label = date.format("%Y-%m")
        ));
    }
}

fn draw_legend(svg: &mut String, columns: &[(&str, Vec<Option<f64>>)], plot_bottom: f64) {
    let per_row = 7;
    let x_step = 124.0;
    let y_start = plot_bottom + 36.0;

    for (i, (ticker, _)) in columns.iter().enumerate() {
        let color = PALETTE[i % PALETTE.len()];
        let x = MARGIN_LEFT + (i % per_row) as f64 * x_step;
        let y = y_start + (i / per_row) as f64 * 16.0;
        svg.push_str(&format!(
            r#"<line x1="{x1:.2}" y1="{y:.2}" x2="{x2:.2}" y2="{y:.2}" stroke="{color}" stroke-width="2" />"#,
            x1 = x,
            x2 = x + 18.0,
            y = y - 3.0,
            color = color
        ));
        svg.push_str(&format!(
            r#"<text x="{x:.2}" y="{y:.2}">{label}</text>"#,
            x = x + 22.0,
            y = y,
            label = escape_text(ticker)
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use sector_core::{RelativeSeries, RelativeTable};

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn sample_table() -> RelativeTable {
        let dates = vec![
            d(2020, 1, 2),
            d(2020, 1, 3),
            d(2020, 1, 6),
            d(2020, 1, 7),
            d(2020, 1, 8),
        ];
        let full = RelativeSeries {
            ticker: "XLK".to_string(),
            values: vec![
                Some(dec!(100)),
                Some(dec!(101)),
                Some(dec!(99)),
                Some(dec!(103)),
                Some(dec!(105)),
            ],
        };
        let gapped = RelativeSeries {
            ticker: "XLE".to_string(),
            values: vec![
                Some(dec!(100)),
                Some(dec!(98)),
                None,
                Some(dec!(97)),
                Some(dec!(95)),
            ],
        };
        RelativeTable::new(dates, vec![full, gapped])
    }

    fn spec() -> ChartSpec<'static> {
        ChartSpec {
            title: "US Sectors vs S&P 500",
            y_label: "Relative Index",
            baseline_label: "COVID baseline",
        }
    }

    #[test]
    fn test_render_contains_series_and_marker() {
        let svg = render_relative_chart(&sample_table(), d(2020, 1, 2), &spec());

        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>"));
        // XLK 1개 + XLE 결측으로 끊긴 2개 = polyline 3개
        assert_eq!(svg.matches("<polyline").count(), 3);
        // 기준일 마커 주석
        assert!(svg.contains("COVID baseline"));
        assert!(svg.contains("stroke-dasharray"));
        // 범례
        assert!(svg.contains("XLK"));
        assert!(svg.contains("XLE"));
    }

    #[test]
    fn test_render_title_escaped() {
        let table = sample_table();
        let chart_spec = ChartSpec {
            title: "Aerospace & Defense",
            y_label: "Relative Index",
            baseline_label: "baseline",
        };
        let svg = render_relative_chart(&table, d(2020, 1, 2), &chart_spec);
        assert!(svg.contains("Aerospace &amp; Defense"));
    }

    #[test]
    fn test_render_empty_table() {
        let table = RelativeTable::new(Vec::new(), Vec::new());
        assert_eq!(render_relative_chart(&table, d(2020, 1, 2), &spec()), "");
    }

    #[test]
    fn test_baseline_outside_index_skips_marker() {
        let svg = render_relative_chart(&sample_table(), d(2021, 6, 1), &spec());
        assert!(!svg.contains("COVID baseline"));
    }

    #[test]
    fn test_save_relative_chart() {
        let svg = render_relative_chart(&sample_table(), d(2020, 1, 2), &spec());
        let path = std::env::temp_dir().join("sector_chart_test/out.svg");
        save_relative_chart(&path, &svg).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, svg);
        std::fs::remove_dir_all(path.parent().unwrap()).ok();
    }
}
