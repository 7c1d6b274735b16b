//! 지원 시장 정의.

use serde::{Deserialize, Serialize};
use std::fmt;

/// 지원되는 시장 유형.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Market {
    /// 미국 주식 시장 (NYSE/NASDAQ/AMEX)
    US,
    /// 일본 주식 시장 (도쿄증권거래소)
    JP,
}

impl Market {
    /// 문자열에서 시장 파싱
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "US" | "USA" | "NYSE" | "NASDAQ" | "AMEX" => Some(Self::US),
            "JP" | "JAPAN" | "TSE" | "TYO" | "NIKKEI" => Some(Self::JP),
            _ => None,
        }
    }

}

impl fmt::Display for Market {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::US => write!(f, "US"),
            Self::JP => write!(f, "JP"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_market_parsing() {
        assert_eq!(Market::from_str("US"), Some(Market::US));
        assert_eq!(Market::from_str("nasdaq"), Some(Market::US));
        assert_eq!(Market::from_str("JP"), Some(Market::JP));
        assert_eq!(Market::from_str("japan"), Some(Market::JP));
        assert_eq!(Market::from_str("tse"), Some(Market::JP));
        assert_eq!(Market::from_str("invalid"), None);
    }

    #[test]
    fn test_market_display() {
        assert_eq!(Market::US.to_string(), "US");
        assert_eq!(Market::JP.to_string(), "JP");
    }
}
