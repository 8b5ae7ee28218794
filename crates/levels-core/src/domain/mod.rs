//! 레벨 스캐너의 도메인 모델.

mod level;
mod market_data;
mod market_provider;

pub use level::*;
pub use market_data::*;
pub use market_provider::*;
