//! 시장 데이터 제공자 추상화.
//!
//! 스캐너는 캔들 이력을 직접 수집하지 않고 이 trait를 통해 조회합니다.
//! 코어의 동시성 모델이 단일 스레드 동기 방식이므로 trait도 동기입니다.
//! 조회 실패는 해당 티어만 건너뛰는 소프트 실패로 처리됩니다.

use crate::domain::market_data::Kline;
use crate::types::{Symbol, Timeframe};
use thiserror::Error;

/// MarketDataProvider 에러.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// 네트워크 에러
    #[error("네트워크 에러: {0}")]
    Network(String),

    /// 이력 부족
    #[error("이력 부족: {symbol} {timeframe} 필요 {required}개, 제공 {provided}개")]
    InsufficientHistory {
        symbol: String,
        timeframe: Timeframe,
        required: usize,
        provided: usize,
    },

    /// 지원하지 않는 심볼
    #[error("지원하지 않는 심볼: {0}")]
    UnknownSymbol(String),

    /// 기타 에러
    #[error("기타 에러: {0}")]
    Other(String),
}

/// 시장 데이터 제공자 trait.
///
/// 한 (심볼, 타임프레임)의 캔들 이력을 최신 캔들이 앞에 오는
/// 순서(most-recent-first)로 반환합니다.
///
/// # 구현 예시
///
/// ```ignore
/// pub struct BrokerProvider {
///     client: BrokerClient,
/// }
///
/// impl MarketDataProvider for BrokerProvider {
///     fn fetch_klines(
///         &self,
///         symbol: &Symbol,
///         timeframe: Timeframe,
///         count: usize,
///     ) -> Result<Vec<Kline>, ProviderError> {
///         // 브로커 API 호출 및 변환
///     }
/// }
/// ```
pub trait MarketDataProvider: Send + Sync {
    /// 캔들 이력 조회.
    ///
    /// # 인자
    ///
    /// * `symbol` - 조회할 심볼
    /// * `timeframe` - 조회할 타임프레임
    /// * `count` - 요청 캔들 수 (제공자는 보유량까지만 반환할 수 있음)
    ///
    /// # Errors
    ///
    /// - `ProviderError::Network`: 연결 실패
    /// - `ProviderError::InsufficientHistory`: 이력이 충분하지 않음
    /// - `ProviderError::UnknownSymbol`: 제공자가 모르는 심볼
    fn fetch_klines(
        &self,
        symbol: &Symbol,
        timeframe: Timeframe,
        count: usize,
    ) -> Result<Vec<Kline>, ProviderError>;
}
