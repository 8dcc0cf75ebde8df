//! 시세 데이터 도메인 모델.

mod bar;
mod news;
mod quote;
mod search;

pub use bar::*;
pub use news::*;
pub use quote::*;
pub use search::*;
