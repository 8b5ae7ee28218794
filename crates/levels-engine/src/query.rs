//! 레벨 조회 엔진.
//!
//! 티어 저장소들에 대한 읽기 전용 근접/강도 조회를 제공합니다. 모든
//! 결과는 소유된 스냅샷(값)으로 반환되며, 호출자가 엔진 내부 상태를
//! 변경할 수 없습니다. 거리 필터와 강도 필터는 독립적인 관심사입니다 —
//! "가장 가까운" 레벨이 자동으로 "충분히 강한" 것은 아니며, 강도
//! 게이팅은 호출자의 책임입니다.

use crate::store::TierStores;
use levels_core::Level;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 현재가 기준 가장 가까운 지지/저항 쌍.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NearestLevels {
    /// 현재가 아래 가장 가까운 지지 레벨
    pub support: Option<Level>,
    /// 현재가 위 가장 가까운 저항 레벨
    pub resistance: Option<Level>,
}

/// 레벨 조회 엔진.
///
/// 조회는 항상 스캔 순서(D1 → H4 → H1, 저장소 안에서는 삽입 순서)로
/// 진행되며, 동일 강도 동점은 먼저 만난 레벨이 이깁니다.
#[derive(Debug, Clone)]
pub struct LevelQueryEngine {
    /// 거리 미지정 시 사용하는 기본 최대 거리 (기본 50×τ)
    default_max_distance: Decimal,
}

impl LevelQueryEngine {
    /// 새 조회 엔진을 생성합니다.
    pub fn new(default_max_distance: Decimal) -> Self {
        Self {
            default_max_distance,
        }
    }

    /// 요청한 극성의 가장 강한 레벨을 반환합니다.
    ///
    /// 활성 레벨 중 현재가의 올바른 쪽(지지는 아래, 저항은 위)에 엄격히
    /// 위치하고 최대 거리 안에 있는 것만 고려합니다. 최대 강도가 여럿이면
    /// 스캔 순서에서 먼저 만난 레벨을 반환합니다.
    pub fn strongest_level(
        &self,
        stores: &TierStores,
        current_price: Decimal,
        want_support: bool,
        max_distance: Option<Decimal>,
    ) -> Option<Level> {
        let max_distance = max_distance.unwrap_or(self.default_max_distance);
        let mut best: Option<&Level> = None;

        for store in stores.scan_order() {
            for level in store.levels().iter().filter(|l| l.is_active) {
                let right_side = if want_support {
                    level.is_support && level.price < current_price
                } else {
                    level.is_resistance && level.price > current_price
                };
                if !right_side || level.distance_to(current_price) > max_distance {
                    continue;
                }

                // 엄격한 초과 비교: 동점은 먼저 만난 레벨 유지
                match best {
                    Some(b) if level.strength <= b.strength => {}
                    _ => best = Some(level),
                }
            }
        }

        best.cloned()
    }

    /// 현재가 기준 가장 가까운 지지/저항 쌍을 반환합니다.
    ///
    /// 지지와 저항은 전체 티어에 걸쳐 독립적으로 탐색되며, 어느 쪽이든
    /// 없을 수 있습니다.
    pub fn nearest_levels(
        &self,
        stores: &TierStores,
        current_price: Decimal,
        max_distance: Option<Decimal>,
    ) -> NearestLevels {
        let max_distance = max_distance.unwrap_or(self.default_max_distance);
        let mut nearest = NearestLevels::default();
        let mut support_distance: Option<Decimal> = None;
        let mut resistance_distance: Option<Decimal> = None;

        for store in stores.scan_order() {
            for level in store.levels().iter().filter(|l| l.is_active) {
                let distance = level.distance_to(current_price);
                if distance > max_distance {
                    continue;
                }

                if level.is_support
                    && level.price < current_price
                    && support_distance.map_or(true, |d| distance < d)
                {
                    support_distance = Some(distance);
                    nearest.support = Some(level.clone());
                }
                if level.is_resistance
                    && level.price > current_price
                    && resistance_distance.map_or(true, |d| distance < d)
                {
                    resistance_distance = Some(distance);
                    nearest.resistance = Some(level.clone());
                }
            }
        }

        nearest
    }

    /// 전체 티어의 활성 레벨 수를 반환합니다.
    pub fn active_level_count(&self, stores: &TierStores) -> usize {
        stores.scan_order().map(|s| s.active_count()).sum()
    }

    /// 전체 티어 활성 레벨의 평균 강도를 반환합니다.
    ///
    /// 활성 레벨이 없으면 0을 반환합니다.
    pub fn average_strength(&self, stores: &TierStores) -> Decimal {
        let mut sum = 0i64;
        let mut count = 0i64;
        for store in stores.scan_order() {
            for level in store.levels().iter().filter(|l| l.is_active) {
                sum += level.strength;
                count += 1;
            }
        }
        if count == 0 {
            return Decimal::ZERO;
        }
        Decimal::from(sum) / Decimal::from(count)
    }
}
