//! # Market Core
//!
//! 시세 데이터 캐싱 레이어의 핵심 도메인 모델 및 타입을 제공합니다.
//!
//! 이 크레이트는 다음을 제공합니다:
//! - 시세 스냅샷, 과거 캔들, 종목 검색 결과, 뉴스 도메인 모델
//! - 조회 기간/캔들 간격 타입과 심볼 검증
//! - 설정 관리
//! - 로깅 인프라

pub mod config;
pub mod domain;
pub mod error;
pub mod logging;
pub mod types;

pub use config::*;
pub use domain::*;
pub use error::*;
pub use logging::*;
pub use types::*;
