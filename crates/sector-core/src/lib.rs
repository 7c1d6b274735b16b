//! # Sector Core
//!
//! 섹터 상대 지수 시스템의 핵심 도메인 모델 및 타입을 제공합니다.
//!
//! 이 크레이트는 시스템 전반에서 사용되는 기본 타입을 제공합니다:
//! - 일별 가격 테이블 (날짜 정렬 및 결측값 처리)
//! - 상대 지수 결과 테이블
//! - 시장 유형 정의 (US/JP)
//! - 시장별 분석 설정
//! - 로깅 인프라

pub mod config;
pub mod domain;
pub mod logging;
pub mod types;

pub use config::*;
pub use domain::*;
pub use logging::*;
pub use types::*;
