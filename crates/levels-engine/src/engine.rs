//! 레벨 스캐너 파사드.
//!
//! 심볼별 스캔 사이클을 조율하고 티어 저장소를 소유하며, 협력자에게
//! 조회 API를 노출합니다. 전체 파이프라인은 단일 스레드 동기 방식으로
//! 호출자의 스레드에서 완료까지 실행됩니다. 주기적 호출은 외부
//! 스케줄러의 책임입니다.

use crate::pivot::PivotDetector;
use crate::query::{LevelQueryEngine, NearestLevels};
use crate::store::TierStores;
use crate::strength::StrengthScorer;
use crate::touch::TouchAnalyzer;
use chrono::{DateTime, Duration, Utc};
use levels_core::{
    Level, MarketDataProvider, ScannerConfig, ScannerResult, Symbol, Timeframe,
};
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::sync::Arc;

/// 지지/저항 레벨 스캐너.
///
/// 티어 저장소는 심볼별로 분리되어 있어 서로 다른 상품의 레벨이
/// 병합되는 일이 없습니다. 레벨 카탈로그는 순수 인메모리 구조이며
/// 매 스캔마다 캔들 데이터로부터 재구축 가능합니다.
pub struct LevelScanner {
    config: ScannerConfig,
    provider: Arc<dyn MarketDataProvider>,
    detector: PivotDetector,
    analyzer: TouchAnalyzer,
    scorer: StrengthScorer,
    query: LevelQueryEngine,
    stores: HashMap<Symbol, TierStores>,
}

impl LevelScanner {
    /// 새 스캐너를 생성합니다.
    ///
    /// # Errors
    ///
    /// 잘못된 설정(`ScannerError::Config`)은 생성을 막는 유일한 조건입니다.
    pub fn new(
        config: ScannerConfig,
        provider: Arc<dyn MarketDataProvider>,
    ) -> ScannerResult<Self> {
        config.validate()?;

        let detector = PivotDetector::new(config.pivot_window, config.max_pivots);
        let analyzer = TouchAnalyzer::new(config.tolerance(), config.min_touches);
        let scorer = StrengthScorer::new(Duration::seconds(config.recency_window_secs));
        let query = LevelQueryEngine::new(config.default_query_distance());

        Ok(Self {
            config,
            provider,
            detector,
            analyzer,
            scorer,
            query,
            stores: HashMap::new(),
        })
    }

    /// 현재 설정.
    pub fn config(&self) -> &ScannerConfig {
        &self.config
    }

    /// 한 심볼에 대한 스캔 사이클을 실행합니다.
    ///
    /// 티어마다 캔들 조회 → 피봇 탐지 → 터치 분석 → 강도 산정 →
    /// 삽입-병합을 수행하고, 모든 티어 완료 후 티어별로 만료와 통합을
    /// 실행합니다. 한 티어의 조회 실패는 경고 로그 후 해당 티어만
    /// 건너뛰며, 사이클 전체를 중단시키지 않습니다.
    pub fn scan_symbol(&mut self, symbol: &Symbol) {
        self.scan_symbol_at(symbol, Utc::now());
    }

    /// 기준 시각을 명시한 스캔 사이클.
    pub fn scan_symbol_at(&mut self, symbol: &Symbol, now: DateTime<Utc>) {
        let stores = self
            .stores
            .entry(symbol.clone())
            .or_insert_with(|| TierStores::new(&self.config));

        for timeframe in Timeframe::SCAN_ORDER {
            let tier_config = self.config.tier(timeframe);

            let klines = match self
                .provider
                .fetch_klines(symbol, timeframe, tier_config.lookback)
            {
                Ok(klines) => klines,
                Err(err) => {
                    tracing::warn!(
                        symbol = %symbol,
                        timeframe = %timeframe,
                        error = %err,
                        "캔들 조회 실패, 티어 건너뜀"
                    );
                    continue;
                }
            };

            let pivots = self.detector.detect(&klines);
            if pivots.is_empty() {
                tracing::debug!(
                    symbol = %symbol,
                    timeframe = %timeframe,
                    bars = klines.len(),
                    "피봇 없음"
                );
                continue;
            }

            let store = stores.get_mut(timeframe);
            for pivot in &pivots {
                let profile = self.analyzer.analyze(pivot.price, &klines);
                if !self.analyzer.is_valid(&profile) {
                    continue;
                }
                let (Some(first_touch), Some(last_touch)) =
                    (profile.first_touch, profile.last_touch)
                else {
                    continue;
                };

                let strength =
                    self.scorer
                        .score(profile.touches(), tier_config.weight, last_touch, now);

                store.insert_or_merge(Level {
                    price: pivot.price,
                    touches: profile.touches(),
                    strength,
                    first_touch,
                    last_touch,
                    tier: timeframe,
                    is_support: self.analyzer.is_support(&profile),
                    is_resistance: self.analyzer.is_resistance(&profile),
                    is_active: true,
                    consecutive_touches: profile.consecutive_touches,
                });
            }
        }

        let retention = Duration::seconds(self.config.retention_secs);
        for timeframe in Timeframe::SCAN_ORDER {
            let multiplier = self.config.tier(timeframe).tolerance_multiplier;
            let store = stores.get_mut(timeframe);
            store.expire(now, retention);
            store.consolidate(multiplier);
        }

        tracing::info!(
            symbol = %symbol,
            active_levels = self.query.active_level_count(stores),
            "스캔 사이클 완료"
        );
    }

    /// 모니터링 중인 모든 심볼을 순차 스캔합니다. 병렬 처리는 없습니다.
    pub fn scan_all(&mut self, symbols: &[Symbol]) {
        for symbol in symbols {
            self.scan_symbol(symbol);
        }
    }

    /// 요청한 극성의 가장 강한 레벨을 조회합니다 (스냅샷 반환).
    pub fn strongest_level(
        &self,
        symbol: &Symbol,
        current_price: Decimal,
        want_support: bool,
        max_distance: Option<Decimal>,
    ) -> Option<Level> {
        self.stores.get(symbol).and_then(|stores| {
            self.query
                .strongest_level(stores, current_price, want_support, max_distance)
        })
    }

    /// 현재가 기준 가장 가까운 지지/저항 쌍을 조회합니다.
    pub fn nearest_levels(
        &self,
        symbol: &Symbol,
        current_price: Decimal,
        max_distance: Option<Decimal>,
    ) -> NearestLevels {
        self.stores
            .get(symbol)
            .map(|stores| self.query.nearest_levels(stores, current_price, max_distance))
            .unwrap_or_default()
    }

    /// 심볼의 활성 레벨 수를 반환합니다.
    pub fn active_level_count(&self, symbol: &Symbol) -> usize {
        self.stores
            .get(symbol)
            .map(|stores| self.query.active_level_count(stores))
            .unwrap_or(0)
    }

    /// 심볼의 활성 레벨 평균 강도를 반환합니다.
    pub fn average_strength(&self, symbol: &Symbol) -> Decimal {
        self.stores
            .get(symbol)
            .map(|stores| self.query.average_strength(stores))
            .unwrap_or(Decimal::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use levels_core::ProviderError;

    /// 항상 실패하는 제공자.
    struct FailingProvider;

    impl MarketDataProvider for FailingProvider {
        fn fetch_klines(
            &self,
            symbol: &Symbol,
            _timeframe: Timeframe,
            _count: usize,
        ) -> Result<Vec<levels_core::Kline>, ProviderError> {
            Err(ProviderError::UnknownSymbol(symbol.to_string()))
        }
    }

    #[test]
    fn test_invalid_config_prevents_construction() {
        let mut config = ScannerConfig::default();
        config.min_touches = 0;
        let result = LevelScanner::new(config, Arc::new(FailingProvider));
        assert!(result.is_err());
    }

    #[test]
    fn test_all_tiers_failing_still_completes_cycle() {
        let mut scanner =
            LevelScanner::new(ScannerConfig::default(), Arc::new(FailingProvider)).unwrap();
        let symbol = Symbol::forex("EUR", "USD");

        scanner.scan_symbol(&symbol);
        assert_eq!(scanner.active_level_count(&symbol), 0);
    }

    #[test]
    fn test_queries_on_unknown_symbol_are_empty() {
        let scanner =
            LevelScanner::new(ScannerConfig::default(), Arc::new(FailingProvider)).unwrap();
        let symbol = Symbol::forex("GBP", "USD");

        assert_eq!(scanner.active_level_count(&symbol), 0);
        assert_eq!(scanner.average_strength(&symbol), Decimal::ZERO);
        assert!(scanner
            .strongest_level(&symbol, Decimal::ONE, true, None)
            .is_none());
        let pair = scanner.nearest_levels(&symbol, Decimal::ONE, None);
        assert!(pair.support.is_none() && pair.resistance.is_none());
    }
}
