//! 레벨 스캐너의 에러 타입.
//!
//! 설정 에러만이 생성 자체를 막는 유일한 조건입니다. 데이터 조회 실패는
//! `ProviderError`로 표현되며 해당 티어에만 국한되어, 스캔 사이클
//! 전체를 중단시키지 않습니다. 저장소 용량 초과는 에러가 아닌 소프트
//! 드롭입니다.

use crate::domain::ProviderError;
use thiserror::Error;

/// 핵심 스캐너 에러.
#[derive(Debug, Error)]
pub enum ScannerError {
    /// 설정 에러 (생성 시에만 발생)
    #[error("설정 에러: {0}")]
    Config(String),

    /// 데이터 제공자 에러 (티어 국한, 로깅 후 해당 티어만 건너뜀)
    #[error("데이터 제공자 에러: {0}")]
    Provider(#[from] ProviderError),
}

/// 스캐너 작업을 위한 Result 타입.
pub type ScannerResult<T> = Result<T, ScannerError>;
