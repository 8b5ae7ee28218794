//! 지지/저항 레벨 도메인 타입.
//!
//! 이 모듈은 레벨 카탈로그의 핵심 타입을 정의합니다:
//! - `PivotKind` / `PivotPoint` - 스캔 내부에서만 사용되는 일시적 극점
//! - `Level` - 터치 통계와 강도를 포함한 지지/저항 레벨

use crate::types::Timeframe;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 피봇 극점의 종류.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PivotKind {
    /// 국소 고점
    High,
    /// 국소 저점
    Low,
}

/// 국소 가격 극점.
///
/// 한 스캔 사이클 안에서 생성되고 소비되며, 저장되지 않습니다.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PivotPoint {
    /// 극점 가격
    pub price: Decimal,
    /// 극점 캔들의 시작 시간
    pub time: DateTime<Utc>,
    /// 극점 종류
    pub kind: PivotKind,
}

/// 지지/저항 레벨.
///
/// 터치 통계는 매 스캔마다 현재 조회 윈도우로부터 전부 재계산됩니다
/// (증분 누적이 아님). `is_support`와 `is_resistance`는 독립적인 플래그로,
/// 양쪽에서 터치된 레벨은 둘 다 참일 수 있습니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Level {
    /// 레벨 가격
    pub price: Decimal,
    /// 유효 터치 수 (지지/저항 터치 중 큰 쪽)
    pub touches: u32,
    /// 랭킹 강도 (상한 없는 비교 키, 백분율 아님)
    pub strength: i64,
    /// 최초 터치 시간
    pub first_touch: DateTime<Utc>,
    /// 최근 터치 시간
    pub last_touch: DateTime<Utc>,
    /// 소속 티어
    pub tier: Timeframe,
    /// 지지 레벨 여부
    pub is_support: bool,
    /// 저항 레벨 여부
    pub is_resistance: bool,
    /// 활성 여부
    pub is_active: bool,
    /// 최대 연속 터치 수 (인접 캔들 연속 터치의 최장 구간)
    pub consecutive_touches: u32,
}

impl Level {
    /// 주어진 가격과의 절대 거리를 반환합니다.
    pub fn distance_to(&self, price: Decimal) -> Decimal {
        (self.price - price).abs()
    }
}
