//! `market` CLI.
//!
//! 파이프라인을 호출하고 결과를 JSON으로 출력하는 소비자 계층입니다.
//! 심볼 형식 검증은 이 계층에서 수행합니다.

pub mod cli;
pub mod commands;

pub use cli::{Cli, Commands};
