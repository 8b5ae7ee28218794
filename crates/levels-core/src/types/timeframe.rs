//! 레벨 스캔에 사용되는 타임프레임(티어) 정의.
//!
//! 스캐너는 세 개의 독립적으로 가중치가 부여된 타임프레임을 사용합니다.
//! 상위 타임프레임일수록 노이즈가 적어 랭킹 가중치가 높습니다.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// 레벨 스캔 타임프레임 (티어).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Timeframe {
    /// 1시간봉
    H1,
    /// 4시간봉
    H4,
    /// 일봉
    D1,
}

impl Timeframe {
    /// 스캔 및 조회 순서 (상위 타임프레임 우선).
    ///
    /// 조회 시 동일 강도 동점은 이 순서에서 먼저 만난 레벨이 이깁니다.
    pub const SCAN_ORDER: [Timeframe; 3] = [Timeframe::D1, Timeframe::H4, Timeframe::H1];

    /// 이 타임프레임의 기간을 반환합니다.
    pub fn duration(&self) -> Duration {
        match self {
            Timeframe::H1 => Duration::from_secs(60 * 60),
            Timeframe::H4 => Duration::from_secs(4 * 60 * 60),
            Timeframe::D1 => Duration::from_secs(24 * 60 * 60),
        }
    }

    /// 이 타임프레임의 초 단위 값을 반환합니다.
    pub fn as_secs(&self) -> u64 {
        self.duration().as_secs()
    }

    /// 기본 랭킹 가중치 (D1=5, H4=3, H1=1).
    pub fn default_weight(&self) -> u32 {
        match self {
            Timeframe::D1 => 5,
            Timeframe::H4 => 3,
            Timeframe::H1 => 1,
        }
    }

    /// 기본 조회 캔들 수 (D1=200, H4=300, H1=400).
    pub fn default_lookback(&self) -> usize {
        match self {
            Timeframe::D1 => 200,
            Timeframe::H4 => 300,
            Timeframe::H1 => 400,
        }
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Timeframe::H1 => write!(f, "1h"),
            Timeframe::H4 => write!(f, "4h"),
            Timeframe::D1 => write!(f, "1d"),
        }
    }
}

impl FromStr for Timeframe {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "1h" | "h1" => Ok(Timeframe::H1),
            "4h" | "h4" => Ok(Timeframe::H4),
            "1d" | "d1" => Ok(Timeframe::D1),
            _ => Err(format!("알 수 없는 타임프레임: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_order_is_top_down() {
        assert_eq!(
            Timeframe::SCAN_ORDER,
            [Timeframe::D1, Timeframe::H4, Timeframe::H1]
        );
    }

    #[test]
    fn test_default_weights() {
        assert_eq!(Timeframe::D1.default_weight(), 5);
        assert_eq!(Timeframe::H4.default_weight(), 3);
        assert_eq!(Timeframe::H1.default_weight(), 1);
    }

    #[test]
    fn test_from_str() {
        assert_eq!("4h".parse::<Timeframe>().unwrap(), Timeframe::H4);
        assert_eq!("D1".parse::<Timeframe>().unwrap(), Timeframe::D1);
        assert!("5m".parse::<Timeframe>().is_err());
    }

    #[test]
    fn test_duration() {
        assert_eq!(Timeframe::H4.as_secs(), 4 * 3600);
        assert_eq!(Timeframe::D1.as_secs(), 24 * 3600);
    }
}
