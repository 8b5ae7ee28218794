//! 레벨 저장소.
//!
//! 티어당 하나씩 존재하는 고정 용량 레벨 컬렉션입니다. 삽입-병합,
//! 통합, 만료를 담당하며 다음 불변식을 유지합니다:
//! - 통합 후 같은 저장소의 두 활성 레벨은 허용치 안에 함께 있지 않음
//! - 레벨 수는 용량을 절대 초과하지 않음 (초과 삽입은 소프트 드롭)

use chrono::{DateTime, Duration, Utc};
use levels_core::{Level, ScannerConfig, Timeframe};
use rust_decimal::Decimal;

/// 한 티어의 고정 용량 레벨 저장소.
#[derive(Debug, Clone)]
pub struct LevelStore {
    tier: Timeframe,
    tolerance: Decimal,
    capacity: usize,
    levels: Vec<Level>,
}

impl LevelStore {
    /// 새 저장소를 생성합니다. 용량은 생성 이후 변경되지 않습니다.
    pub fn new(tier: Timeframe, tolerance: Decimal, capacity: usize) -> Self {
        Self {
            tier,
            tolerance,
            capacity,
            levels: Vec::new(),
        }
    }

    /// 소속 티어.
    pub fn tier(&self) -> Timeframe {
        self.tier
    }

    /// 저장된 레벨 수.
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    /// 저장소가 비어 있는지 확인합니다.
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// 활성 레벨 수.
    pub fn active_count(&self) -> usize {
        self.levels.iter().filter(|l| l.is_active).count()
    }

    /// 저장된 레벨 슬라이스 (스캔 순서 유지).
    pub fn levels(&self) -> &[Level] {
        &self.levels
    }

    /// 후보 레벨을 삽입하거나 기존 레벨과 병합합니다.
    ///
    /// 기존 활성 레벨 중 가격이 허용치 안에 있는 것이 있으면 강도가 높은
    /// 쪽을 유지하고 슬롯을 소비하지 않습니다. 없으면 용량 미만일 때
    /// 추가하고, 용량에 도달했으면 후보를 조용히 버립니다 (에러 아님).
    pub fn insert_or_merge(&mut self, candidate: Level) {
        for existing in self.levels.iter_mut().filter(|l| l.is_active) {
            if (existing.price - candidate.price).abs() <= self.tolerance {
                if candidate.strength > existing.strength {
                    *existing = candidate;
                }
                return;
            }
        }

        if self.levels.len() < self.capacity {
            self.levels.push(candidate);
        } else {
            tracing::debug!(
                tier = %self.tier,
                price = %candidate.price,
                capacity = self.capacity,
                "저장소 용량 도달, 후보 레벨 드롭"
            );
        }
    }

    /// 허용치 × 배수 안의 활성 레벨 쌍을 병합합니다.
    ///
    /// 강도가 높은 쪽이 생존하며, 생존자는 먼저 만난 레벨의 자리를
    /// 유지합니다 (스캔 순서 기반 동점 처리 보존). 병합으로 가격이
    /// 바뀔 수 있으므로 더 이상 병합할 쌍이 없을 때까지 반복합니다.
    pub fn consolidate(&mut self, multiplier: Decimal) {
        let tolerance = self.tolerance * multiplier;

        let mut merged_any = true;
        while merged_any {
            merged_any = false;

            let mut i = 0;
            while i < self.levels.len() {
                if !self.levels[i].is_active {
                    i += 1;
                    continue;
                }

                let mut j = i + 1;
                while j < self.levels.len() {
                    if self.levels[j].is_active
                        && (self.levels[i].price - self.levels[j].price).abs() <= tolerance
                    {
                        if self.levels[j].strength > self.levels[i].strength {
                            self.levels[i] = self.levels[j].clone();
                        }
                        self.levels.remove(j);
                        merged_any = true;
                    } else {
                        j += 1;
                    }
                }
                i += 1;
            }
        }
    }

    /// 보존 기간을 넘긴 레벨을 제거합니다.
    ///
    /// `last_touch < now − retention`인 레벨만 제거하며, 생존 레벨의
    /// 상대 순서는 유지됩니다 (압축, 재정렬 아님).
    pub fn expire(&mut self, now: DateTime<Utc>, retention: Duration) {
        let cutoff = now - retention;
        let before = self.levels.len();
        self.levels.retain(|level| level.last_touch >= cutoff);
        let removed = before - self.levels.len();
        if removed > 0 {
            tracing::debug!(tier = %self.tier, removed, "만료된 레벨 제거");
        }
    }
}

/// 한 심볼의 세 티어 저장소 묶음.
#[derive(Debug, Clone)]
pub struct TierStores {
    daily: LevelStore,
    h4: LevelStore,
    h1: LevelStore,
}

impl TierStores {
    /// 설정으로부터 티어 저장소 묶음을 생성합니다.
    pub fn new(config: &ScannerConfig) -> Self {
        let tolerance = config.tolerance();
        Self {
            daily: LevelStore::new(Timeframe::D1, tolerance, config.store_capacity),
            h4: LevelStore::new(Timeframe::H4, tolerance, config.store_capacity),
            h1: LevelStore::new(Timeframe::H1, tolerance, config.store_capacity),
        }
    }

    /// 주어진 티어의 저장소를 반환합니다.
    pub fn get(&self, timeframe: Timeframe) -> &LevelStore {
        match timeframe {
            Timeframe::D1 => &self.daily,
            Timeframe::H4 => &self.h4,
            Timeframe::H1 => &self.h1,
        }
    }

    /// 주어진 티어의 저장소를 가변 참조로 반환합니다.
    pub fn get_mut(&mut self, timeframe: Timeframe) -> &mut LevelStore {
        match timeframe {
            Timeframe::D1 => &mut self.daily,
            Timeframe::H4 => &mut self.h4,
            Timeframe::H1 => &mut self.h1,
        }
    }

    /// 스캔 순서(D1 → H4 → H1)대로 저장소를 순회합니다.
    pub fn scan_order(&self) -> impl Iterator<Item = &LevelStore> {
        Timeframe::SCAN_ORDER.iter().map(|&tf| self.get(tf))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rust_decimal_macros::dec;

    fn make_level(price: Decimal, strength: i64) -> Level {
        let now = Utc::now();
        Level {
            price,
            touches: 2,
            strength,
            first_touch: now - Duration::days(1),
            last_touch: now - Duration::hours(1),
            tier: Timeframe::D1,
            is_support: true,
            is_resistance: false,
            is_active: true,
            consecutive_touches: 1,
        }
    }

    fn make_store(capacity: usize) -> LevelStore {
        LevelStore::new(Timeframe::D1, dec!(0.0005), capacity)
    }

    #[test]
    fn test_insert_appends_when_no_match() {
        let mut store = make_store(10);
        store.insert_or_merge(make_level(dec!(1.1000), 10));
        store.insert_or_merge(make_level(dec!(1.2000), 12));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_merge_keeps_higher_strength() {
        let mut store = make_store(10);
        store.insert_or_merge(make_level(dec!(1.1000), 10));
        store.insert_or_merge(make_level(dec!(1.1003), 15));
        assert_eq!(store.len(), 1);
        assert_eq!(store.levels()[0].strength, 15);
        assert_eq!(store.levels()[0].price, dec!(1.1003));

        // 약한 후보는 기존 레벨을 대체하지 못함
        store.insert_or_merge(make_level(dec!(1.1001), 5));
        assert_eq!(store.len(), 1);
        assert_eq!(store.levels()[0].strength, 15);
    }

    #[test]
    fn test_equal_strength_keeps_existing() {
        let mut store = make_store(10);
        store.insert_or_merge(make_level(dec!(1.1000), 10));
        store.insert_or_merge(make_level(dec!(1.1002), 10));
        assert_eq!(store.len(), 1);
        assert_eq!(store.levels()[0].price, dec!(1.1000));
    }

    #[test]
    fn test_capacity_never_exceeded() {
        let mut store = make_store(3);
        for i in 0..10 {
            // 서로 병합되지 않도록 충분히 떨어진 가격
            let price = dec!(1.0) + Decimal::from(i) * dec!(0.01);
            store.insert_or_merge(make_level(price, i));
        }
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_two_candidates_consolidate_to_stronger_price() {
        let mut store = make_store(10);
        // 통합 전 단계에서 이미 떨어져 들어온 두 저항 후보
        let mut a = make_level(dec!(1.2001), 8);
        a.is_support = false;
        a.is_resistance = true;
        let mut b = make_level(dec!(1.2003), 11);
        b.is_support = false;
        b.is_resistance = true;
        store.levels.push(a);
        store.levels.push(b);

        store.consolidate(dec!(1.0));
        assert_eq!(store.len(), 1);
        assert_eq!(store.levels()[0].price, dec!(1.2003));
        assert_eq!(store.levels()[0].strength, 11);
    }

    #[test]
    fn test_consolidate_survivor_keeps_first_position() {
        let mut store = make_store(10);
        store.levels.push(make_level(dec!(1.3000), 7));
        store.levels.push(make_level(dec!(1.1000), 3));
        store.levels.push(make_level(dec!(1.1004), 9));

        store.consolidate(dec!(1.0));
        assert_eq!(store.len(), 2);
        // 생존자는 먼저 만난 자리(인덱스 1)를 유지
        assert_eq!(store.levels()[0].price, dec!(1.3000));
        assert_eq!(store.levels()[1].price, dec!(1.1004));
        assert_eq!(store.levels()[1].strength, 9);
    }

    #[test]
    fn test_consolidate_count_non_increasing() {
        let mut store = make_store(10);
        for i in 0..5 {
            store
                .levels
                .push(make_level(dec!(1.1) + Decimal::from(i) * dec!(0.0001), i));
        }
        let before = store.len();
        store.consolidate(dec!(2.0));
        assert!(store.len() <= before);
    }

    #[test]
    fn test_expire_removes_exactly_stale_levels() {
        let now = Utc::now();
        let mut store = make_store(10);

        let mut fresh = make_level(dec!(1.1000), 10);
        fresh.last_touch = now - Duration::days(2);
        let mut stale = make_level(dec!(1.2000), 20);
        stale.last_touch = now - Duration::days(8);
        let mut boundary = make_level(dec!(1.3000), 30);
        boundary.last_touch = now - Duration::days(7);

        store.levels.push(fresh);
        store.levels.push(stale);
        store.levels.push(boundary);

        store.expire(now, Duration::days(7));

        // 정확히 7일을 넘긴 것만 제거, 순서 유지
        assert_eq!(store.len(), 2);
        assert_eq!(store.levels()[0].price, dec!(1.1000));
        assert_eq!(store.levels()[1].price, dec!(1.3000));
    }

    #[test]
    fn test_tier_stores_scan_order() {
        let stores = TierStores::new(&ScannerConfig::default());
        let tiers: Vec<Timeframe> = stores.scan_order().map(|s| s.tier()).collect();
        assert_eq!(tiers, vec![Timeframe::D1, Timeframe::H4, Timeframe::H1]);
    }

    proptest! {
        /// 통합 후 어떤 두 활성 레벨도 허용치 × 배수 안에 함께 있지 않다.
        #[test]
        fn prop_consolidate_separates_all_pairs(
            ticks in proptest::collection::vec(0u32..2000, 1..40),
            strengths in proptest::collection::vec(0i64..100, 40),
        ) {
            let mut store = make_store(500);
            for (tick, strength) in ticks.iter().zip(strengths.iter()) {
                let price = dec!(1.0) + Decimal::from(*tick) * dec!(0.0001);
                store.levels.push(make_level(price, *strength));
            }
            let max_strength = store.levels().iter().map(|l| l.strength).max();

            store.consolidate(dec!(2.0));

            let tolerance = dec!(0.0005) * dec!(2.0);
            let levels = store.levels();
            for a in 0..levels.len() {
                for b in (a + 1)..levels.len() {
                    prop_assert!((levels[a].price - levels[b].price).abs() > tolerance);
                }
            }

            // 최강 레벨은 병합에서 항상 생존
            prop_assert_eq!(
                levels.iter().map(|l| l.strength).max(),
                max_strength
            );
        }
    }
}
