//! 레벨 강도 산정.
//!
//! 터치 통계를 랭킹용 정수로 변환하는 순수 함수입니다. 강도는 상한이
//! 없는 비교 키이며 절대 [0,100] 범위로 정규화하지 않습니다. 상위
//! 티어와 많은 터치가 랭킹을 지배하도록 설계되었습니다.

use chrono::{DateTime, Duration, Utc};

/// 강도 산정기.
///
/// `strength = touches × tier_weight + (최근 터치 ? tier_weight / 2 : 0)`
///
/// 보너스는 정수 내림 나눗셈을 사용합니다 (가중치 5 → +2, 3 → +1, 1 → +0).
#[derive(Debug, Clone)]
pub struct StrengthScorer {
    /// 최근 터치 보너스 윈도우
    recency_window: Duration,
}

impl StrengthScorer {
    /// 새 산정기를 생성합니다.
    pub fn new(recency_window: Duration) -> Self {
        Self { recency_window }
    }

    /// 강도를 계산합니다.
    pub fn score(
        &self,
        touches: u32,
        tier_weight: u32,
        last_touch: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> i64 {
        let base = i64::from(touches) * i64::from(tier_weight);
        let bonus = if now - last_touch <= self.recency_window {
            i64::from(tier_weight / 2)
        } else {
            0
        };
        base + bonus
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_score_without_recent_touch() {
        let scorer = StrengthScorer::new(Duration::days(1));
        let now = Utc::now();
        let stale = now - Duration::days(3);

        assert_eq!(scorer.score(2, 5, stale, now), 10);
        assert_eq!(scorer.score(4, 3, stale, now), 12);
    }

    #[test]
    fn test_recency_bonus_is_floored_half_weight() {
        let scorer = StrengthScorer::new(Duration::days(1));
        let now = Utc::now();
        let recent = now - Duration::hours(3);

        // 5/2=2, 3/2=1, 1/2=0
        assert_eq!(scorer.score(2, 5, recent, now), 12);
        assert_eq!(scorer.score(2, 3, recent, now), 7);
        assert_eq!(scorer.score(2, 1, recent, now), 2);
    }

    #[test]
    fn test_higher_tier_dominates_ranking() {
        let scorer = StrengthScorer::new(Duration::days(1));
        let now = Utc::now();
        let stale = now - Duration::days(3);

        // 일봉 2회 터치(10)가 1시간봉 9회 터치(9)보다 강함
        assert!(scorer.score(2, 5, stale, now) > scorer.score(9, 1, stale, now));
    }
}
