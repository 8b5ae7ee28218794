//! 피봇 극점 탐지.
//!
//! 캔들 시퀀스에서 대칭 이웃 구간 대비 국소 고점/저점을 찾습니다.
//! 비교는 엄격한 부등호를 사용하므로 평평한 고점/저점 구간의 동일가
//! 캔들은 피봇으로 등록되지 않습니다.

use levels_core::{Kline, PivotKind, PivotPoint};

/// 탐지에 필요한 최소 캔들 수.
const MIN_BARS: usize = 10;

/// 피봇 극점 탐지기.
///
/// 인덱스 `i`가 피봇 고점이려면 `[i−W, i+W]` 구간의 다른 모든 캔들보다
/// 고가가 엄격히 커야 합니다. 피봇 저점은 저가에 대해 대칭 규칙을
/// 적용합니다. 한 인덱스는 고점 또는 저점 중 하나로만 등록됩니다.
#[derive(Debug, Clone)]
pub struct PivotDetector {
    /// 윈도우 반경 W
    window: usize,
    /// 스캔당 최대 피봇 수 (도달 시 조기 종료, 먼저 찾은 피봇 유지)
    max_pivots: usize,
}

impl PivotDetector {
    /// 새 탐지기를 생성합니다.
    pub fn new(window: usize, max_pivots: usize) -> Self {
        Self { window, max_pivots }
    }

    /// 캔들 시퀀스에서 피봇 극점을 탐지합니다.
    ///
    /// 캔들이 `max(10, 2W+1)`개 미만이면 에러가 아닌 빈 결과를 반환합니다.
    /// 호출자는 이를 "이번 사이클에는 피봇 없음"으로 처리해야 합니다.
    pub fn detect(&self, klines: &[Kline]) -> Vec<PivotPoint> {
        let n = klines.len();
        if n < MIN_BARS || n < 2 * self.window + 1 {
            return Vec::new();
        }

        let mut pivots = Vec::new();

        for i in self.window..(n - self.window) {
            if pivots.len() >= self.max_pivots {
                break;
            }

            if self.is_pivot_high(klines, i) {
                pivots.push(PivotPoint {
                    price: klines[i].high,
                    time: klines[i].open_time,
                    kind: PivotKind::High,
                });
            } else if self.is_pivot_low(klines, i) {
                pivots.push(PivotPoint {
                    price: klines[i].low,
                    time: klines[i].open_time,
                    kind: PivotKind::Low,
                });
            }
        }

        pivots
    }

    fn is_pivot_high(&self, klines: &[Kline], i: usize) -> bool {
        let candidate = klines[i].high;
        for j in (i - self.window)..=(i + self.window) {
            if j != i && klines[j].high >= candidate {
                return false;
            }
        }
        true
    }

    fn is_pivot_low(&self, klines: &[Kline], i: usize) -> bool {
        let candidate = klines[i].low;
        for j in (i - self.window)..=(i + self.window) {
            if j != i && klines[j].low <= candidate {
                return false;
            }
        }
        true
    }
}
