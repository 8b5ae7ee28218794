//! # Levels Core
//!
//! 지지/저항 레벨 스캐너의 핵심 도메인 모델 및 타입을 제공합니다.
//!
//! 이 크레이트는 스캐너 시스템 전반에서 사용되는 기본 타입을 제공합니다:
//! - OHLC 캔들 및 시장 데이터 구조체
//! - 레벨 및 피봇 도메인 타입
//! - 심볼 및 타임프레임(티어) 정의
//! - 시장 데이터 제공자 추상화
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
