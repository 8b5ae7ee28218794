//! # Levels Engine
//!
//! 지지/저항 레벨의 탐지, 산정, 카탈로그 유지를 담당하는 엔진입니다.
//!
//! 이 크레이트는 다음을 제공합니다:
//! - 피봇 극점 탐지 ([`PivotDetector`])
//! - 터치 집계 및 지지/저항 분류 ([`TouchAnalyzer`])
//! - 강도 산정 ([`StrengthScorer`])
//! - 티어별 레벨 저장소 ([`LevelStore`])
//! - 근접/강도 조회 ([`LevelQueryEngine`])
//! - 심볼별 스캔 사이클 파사드 ([`LevelScanner`])
//!
//! # 사용 예시
//!
//! ```ignore
//! use std::sync::Arc;
//! use levels_core::{ScannerConfig, Symbol};
//! use levels_engine::LevelScanner;
//!
//! let mut scanner = LevelScanner::new(ScannerConfig::default(), Arc::new(provider))?;
//! let symbol = Symbol::forex("EUR", "USD");
//!
//! scanner.scan_symbol(&symbol);
//!
//! if let Some(support) = scanner.strongest_level(&symbol, price, true, None) {
//!     println!("가장 강한 지지: {} (강도 {})", support.price, support.strength);
//! }
//! ```

pub mod engine;
pub mod pivot;
pub mod query;
pub mod store;
pub mod strength;
pub mod touch;

pub use engine::LevelScanner;
pub use pivot::PivotDetector;
pub use query::{LevelQueryEngine, NearestLevels};
pub use store::{LevelStore, TierStores};
pub use strength::StrengthScorer;
pub use touch::{TouchAnalyzer, TouchProfile};
