//! 터치 분석.
//!
//! 후보 레벨 가격이 이후 가격 흐름에 의해 얼마나 자주 접근되었는지를
//! 전체 조회 윈도우에 대해 집계하고, 지지/저항 여부를 분류합니다.

use chrono::{DateTime, Utc};
use levels_core::Kline;
use rust_decimal::Decimal;

/// 한 후보 가격에 대한 터치 집계 결과.
#[derive(Debug, Clone, Default)]
pub struct TouchProfile {
    /// 저가가 허용치 안으로 접근한 횟수
    pub support_touches: u32,
    /// 고가가 허용치 안으로 접근한 횟수
    pub resistance_touches: u32,
    /// 터치가 있었던 가장 이른 캔들 시간
    pub first_touch: Option<DateTime<Utc>>,
    /// 터치가 있었던 가장 늦은 캔들 시간
    pub last_touch: Option<DateTime<Utc>>,
    /// 인접 캔들 연속 터치의 최장 구간
    pub consecutive_touches: u32,
}

impl TouchProfile {
    /// 유효 터치 수 (지지/저항 터치 중 큰 쪽).
    pub fn touches(&self) -> u32 {
        self.support_touches.max(self.resistance_touches)
    }
}

/// 터치 분석기.
///
/// 한 캔들은 저가와 고가가 모두 허용치 안이면 지지 터치와 저항 터치를
/// 동시에 증가시킬 수 있습니다. 집계는 피봇 주변이 아닌 전체 조회
/// 윈도우를 대상으로 합니다.
#[derive(Debug, Clone)]
pub struct TouchAnalyzer {
    /// 근접 허용치 τ
    tolerance: Decimal,
    /// 레벨 유효 최소 터치 수
    min_touches: u32,
}

impl TouchAnalyzer {
    /// 새 분석기를 생성합니다.
    pub fn new(tolerance: Decimal, min_touches: u32) -> Self {
        Self {
            tolerance,
            min_touches,
        }
    }

    /// 후보 가격에 대한 터치를 집계합니다.
    pub fn analyze(&self, price: Decimal, klines: &[Kline]) -> TouchProfile {
        let mut profile = TouchProfile::default();
        let mut streak = 0u32;

        for kline in klines {
            let support_hit = (kline.low - price).abs() <= self.tolerance;
            let resistance_hit = (kline.high - price).abs() <= self.tolerance;

            if support_hit {
                profile.support_touches += 1;
            }
            if resistance_hit {
                profile.resistance_touches += 1;
            }

            if support_hit || resistance_hit {
                streak += 1;
                profile.consecutive_touches = profile.consecutive_touches.max(streak);

                let time = kline.open_time;
                profile.first_touch = Some(match profile.first_touch {
                    Some(t) if t <= time => t,
                    _ => time,
                });
                profile.last_touch = Some(match profile.last_touch {
                    Some(t) if t >= time => t,
                    _ => time,
                });
            } else {
                streak = 0;
            }
        }

        profile
    }

    /// 집계 결과가 유효한 레벨 기준을 충족하는지 확인합니다.
    pub fn is_valid(&self, profile: &TouchProfile) -> bool {
        profile.touches() >= self.min_touches
    }

    /// 지지 레벨 판정 (`support_touches ≥ min_touches`).
    pub fn is_support(&self, profile: &TouchProfile) -> bool {
        profile.support_touches >= self.min_touches
    }

    /// 저항 레벨 판정 (`resistance_touches ≥ min_touches`).
    pub fn is_resistance(&self, profile: &TouchProfile) -> bool {
        profile.resistance_touches >= self.min_touches
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use levels_core::{Symbol, Timeframe};
    use rust_decimal_macros::dec;

    /// (고가, 저가) 쌍으로부터 테스트용 캔들 생성 (최신이 앞).
    fn create_candles(highs_lows: &[(Decimal, Decimal)]) -> Vec<Kline> {
        let symbol = Symbol::forex("EUR", "USD");
        let now = Utc::now();
        highs_lows
            .iter()
            .enumerate()
            .map(|(i, &(high, low))| {
                Kline::new(
                    symbol.clone(),
                    Timeframe::H1,
                    now - Duration::hours(i as i64),
                    low,
                    high,
                    low,
                    high,
                )
            })
            .collect()
    }

    #[test]
    fn test_support_touches_counted_over_full_window() {
        let analyzer = TouchAnalyzer::new(dec!(0.0010), 2);
        let candles = create_candles(&[
            (dec!(1.1100), dec!(1.1050)),
            (dec!(1.1100), dec!(1.1005)), // 터치
            (dec!(1.1100), dec!(1.1050)),
            (dec!(1.1100), dec!(1.0995)), // 터치
            (dec!(1.1100), dec!(1.1050)),
        ]);

        let profile = analyzer.analyze(dec!(1.1000), &candles);
        assert_eq!(profile.support_touches, 2);
        assert_eq!(profile.resistance_touches, 0);
        assert_eq!(profile.touches(), 2);
        assert!(analyzer.is_valid(&profile));
        assert!(analyzer.is_support(&profile));
        assert!(!analyzer.is_resistance(&profile));
    }

    #[test]
    fn test_bar_may_touch_both_sides() {
        let analyzer = TouchAnalyzer::new(dec!(0.0010), 1);
        // 좁은 범위의 캔들: 고가와 저가 모두 레벨 근처
        let candles = create_candles(&[(dec!(1.1005), dec!(1.0995)); 12]);

        let profile = analyzer.analyze(dec!(1.1000), &candles);
        assert_eq!(profile.support_touches, 12);
        assert_eq!(profile.resistance_touches, 12);
        assert!(analyzer.is_support(&profile));
        assert!(analyzer.is_resistance(&profile));
    }

    #[test]
    fn test_first_and_last_touch_timestamps() {
        let analyzer = TouchAnalyzer::new(dec!(0.0010), 2);
        let candles = create_candles(&[
            (dec!(1.1100), dec!(1.1050)),
            (dec!(1.1100), dec!(1.1000)), // 최신 터치 (1시간 전)
            (dec!(1.1100), dec!(1.1050)),
            (dec!(1.1100), dec!(1.1000)), // 최초 터치 (3시간 전)
        ]);

        let profile = analyzer.analyze(dec!(1.1000), &candles);
        let first = profile.first_touch.unwrap();
        let last = profile.last_touch.unwrap();
        assert!(first < last);
        assert_eq!(last, candles[1].open_time);
        assert_eq!(first, candles[3].open_time);
    }

    #[test]
    fn test_consecutive_touch_streak() {
        let analyzer = TouchAnalyzer::new(dec!(0.0010), 2);
        let candles = create_candles(&[
            (dec!(1.1100), dec!(1.1000)),
            (dec!(1.1100), dec!(1.1000)),
            (dec!(1.1100), dec!(1.1000)),
            (dec!(1.1100), dec!(1.1050)),
            (dec!(1.1100), dec!(1.1000)),
        ]);

        let profile = analyzer.analyze(dec!(1.1000), &candles);
        assert_eq!(profile.support_touches, 4);
        assert_eq!(profile.consecutive_touches, 3);
    }

    #[test]
    fn test_below_min_touches_is_invalid() {
        let analyzer = TouchAnalyzer::new(dec!(0.0010), 2);
        let candles = create_candles(&[
            (dec!(1.1100), dec!(1.1000)),
            (dec!(1.1100), dec!(1.1050)),
        ]);

        let profile = analyzer.analyze(dec!(1.1000), &candles);
        assert_eq!(profile.touches(), 1);
        assert!(!analyzer.is_valid(&profile));
    }
}
