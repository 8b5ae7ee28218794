//! 스캐너 설정 관리.
//!
//! 설정은 생성 시점에 한 번 읽히며 이후 불변입니다. 잘못된 설정은
//! `ScannerError::Config`로 생성 자체를 실패시키는 유일한 조건입니다.

use crate::error::{ScannerError, ScannerResult};
use crate::types::Timeframe;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// 티어별 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TierConfig {
    /// 조회 캔들 수
    pub lookback: usize,
    /// 랭킹 가중치
    pub weight: u32,
    /// 통합 허용 오차 배수 (기본 근접 허용치에 곱함)
    pub tolerance_multiplier: Decimal,
}

impl Default for TierConfig {
    fn default() -> Self {
        // serde 기본값 용도. 실제 티어별 기본값은 default_for를 사용.
        Self::default_for(Timeframe::H1)
    }
}

impl TierConfig {
    /// 주어진 타임프레임의 기본 설정을 반환합니다.
    ///
    /// 통합 배수: D1=2.0, H4=1.5, H1=1.0.
    pub fn default_for(timeframe: Timeframe) -> Self {
        let tolerance_multiplier = match timeframe {
            Timeframe::D1 => dec!(2.0),
            Timeframe::H4 => dec!(1.5),
            Timeframe::H1 => dec!(1.0),
        };
        Self {
            lookback: timeframe.default_lookback(),
            weight: timeframe.default_weight(),
            tolerance_multiplier,
        }
    }
}

/// 레벨 스캐너 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ScannerConfig {
    /// 호가 단위 (틱 크기)
    pub tick_size: Decimal,
    /// 근접 허용치 (틱 수 단위)
    pub tolerance_ticks: u32,
    /// 레벨 유효 최소 터치 수
    pub min_touches: u32,
    /// 피봇 탐지 윈도우 반경
    pub pivot_window: usize,
    /// 스캔당 최대 피봇 수
    pub max_pivots: usize,
    /// 티어당 레벨 저장소 용량
    pub store_capacity: usize,
    /// 레벨 보존 기간 (초, 기본 7일)
    pub retention_secs: i64,
    /// 최근 터치 보너스 윈도우 (초, 기본 1일)
    pub recency_window_secs: i64,
    /// 조회 기본 최대 거리 (근접 허용치의 배수)
    pub query_distance_multiple: u32,
    /// 일봉 티어 설정
    pub daily: TierConfig,
    /// 4시간봉 티어 설정
    pub h4: TierConfig,
    /// 1시간봉 티어 설정
    pub h1: TierConfig,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            tick_size: dec!(0.0001),
            tolerance_ticks: 10,
            min_touches: 2,
            pivot_window: 5,
            max_pivots: 100,
            store_capacity: 500,
            retention_secs: 604_800,
            recency_window_secs: 86_400,
            query_distance_multiple: 50,
            daily: TierConfig::default_for(Timeframe::D1),
            h4: TierConfig::default_for(Timeframe::H4),
            h1: TierConfig::default_for(Timeframe::H1),
        }
    }
}

impl ScannerConfig {
    /// 기본 근접 허용치(τ)를 반환합니다.
    ///
    /// 허용치는 호가 단위에 비례합니다: `tick_size × tolerance_ticks`.
    pub fn tolerance(&self) -> Decimal {
        self.tick_size * Decimal::from(self.tolerance_ticks)
    }

    /// 조회 기본 최대 거리를 반환합니다 (기본 50×τ).
    pub fn default_query_distance(&self) -> Decimal {
        self.tolerance() * Decimal::from(self.query_distance_multiple)
    }

    /// 주어진 타임프레임의 티어 설정을 반환합니다.
    pub fn tier(&self, timeframe: Timeframe) -> &TierConfig {
        match timeframe {
            Timeframe::D1 => &self.daily,
            Timeframe::H4 => &self.h4,
            Timeframe::H1 => &self.h1,
        }
    }

    /// 설정 값을 검증합니다.
    ///
    /// # Errors
    ///
    /// 0 이하의 조회 캔들 수, 허용치, 용량 등은 `ScannerError::Config`를
    /// 반환합니다.
    pub fn validate(&self) -> ScannerResult<()> {
        if self.tick_size <= Decimal::ZERO {
            return Err(ScannerError::Config("tick_size는 양수여야 합니다".to_string()));
        }
        if self.tolerance_ticks == 0 {
            return Err(ScannerError::Config(
                "tolerance_ticks는 1 이상이어야 합니다".to_string(),
            ));
        }
        if self.min_touches == 0 {
            return Err(ScannerError::Config(
                "min_touches는 1 이상이어야 합니다".to_string(),
            ));
        }
        if self.pivot_window == 0 {
            return Err(ScannerError::Config(
                "pivot_window는 1 이상이어야 합니다".to_string(),
            ));
        }
        if self.max_pivots == 0 {
            return Err(ScannerError::Config(
                "max_pivots는 1 이상이어야 합니다".to_string(),
            ));
        }
        if self.store_capacity == 0 {
            return Err(ScannerError::Config(
                "store_capacity는 1 이상이어야 합니다".to_string(),
            ));
        }
        if self.retention_secs <= 0 {
            return Err(ScannerError::Config(
                "retention_secs는 양수여야 합니다".to_string(),
            ));
        }
        if self.recency_window_secs <= 0 {
            return Err(ScannerError::Config(
                "recency_window_secs는 양수여야 합니다".to_string(),
            ));
        }
        if self.query_distance_multiple == 0 {
            return Err(ScannerError::Config(
                "query_distance_multiple은 1 이상이어야 합니다".to_string(),
            ));
        }
        for timeframe in Timeframe::SCAN_ORDER {
            let tier = self.tier(timeframe);
            if tier.lookback == 0 {
                return Err(ScannerError::Config(format!(
                    "{} lookback은 1 이상이어야 합니다",
                    timeframe
                )));
            }
            if tier.weight == 0 {
                return Err(ScannerError::Config(format!(
                    "{} weight는 1 이상이어야 합니다",
                    timeframe
                )));
            }
            if tier.tolerance_multiplier <= Decimal::ZERO {
                return Err(ScannerError::Config(format!(
                    "{} tolerance_multiplier는 양수여야 합니다",
                    timeframe
                )));
            }
        }
        Ok(())
    }

    /// 파일과 환경 변수에서 설정을 로드하고 검증합니다.
    ///
    /// 환경 변수는 `LEVELS` 접두사와 `__` 구분자를 사용합니다.
    /// 예: `LEVELS__MIN_TOUCHES=3`.
    pub fn load<P: AsRef<Path>>(path: P) -> ScannerResult<Self> {
        let builder = config::Config::builder()
            .add_source(config::File::from(path.as_ref()))
            .add_source(
                config::Environment::with_prefix("LEVELS")
                    .separator("__")
                    .try_parsing(true),
            );

        let loaded: Self = builder
            .build()
            .and_then(|c| c.try_deserialize())
            .map_err(|e| ScannerError::Config(e.to_string()))?;
        loaded.validate()?;
        Ok(loaded)
    }

    /// 기본 경로에서 설정을 로드합니다.
    pub fn load_default() -> ScannerResult<Self> {
        Self::load("config/default.toml")
    }
}
