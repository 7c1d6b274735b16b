//! 상대 지수 CSV 저장.
//!
//! 첫 컬럼은 ISO 8601 날짜, 이후 컬럼은 종목별 상대 지수입니다.
//! 값은 소수점 4자리로 반올림하며 결측값은 빈 필드로 남깁니다.

use sector_core::RelativeTable;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::info;

use crate::error::Result;

/// 상대 지수 테이블을 CSV 파일로 저장합니다.
///
/// 필요하면 상위 디렉터리를 생성합니다. 저장된 데이터 행 수를
/// 반환합니다.
pub fn write_relative_csv(path: impl AsRef<Path>, table: &RelativeTable) -> Result<usize> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);

    // 헤더
    write!(writer, "date")?;
    for ticker in table.tickers() {
        write!(writer, ",{}", ticker)?;
    }
    writeln!(writer)?;

    // 데이터 행
    for (idx, date) in table.dates().iter().enumerate() {
        write!(writer, "{}", date.format("%Y-%m-%d"))?;
        for series in table.series() {
            match series.values[idx] {
                Some(value) => write!(writer, ",{:.4}", value)?,
                None => write!(writer, ",")?,
            }
        }
        writeln!(writer)?;
    }

    writer.flush()?;

    info!(rows = table.len(), path = %path.display(), "상대 지수 CSV 저장");

    Ok(table.len())
}
