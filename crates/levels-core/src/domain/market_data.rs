//! 시장 데이터 타입 및 구조체.
//!
//! 이 모듈은 레벨 탐지의 입력이 되는 OHLC 캔들 타입을 정의합니다.
//! 캔들 시퀀스는 항상 최신 캔들이 앞에 오는 순서(most-recent-first)이며,
//! 스캔 사이클마다 불변 스냅샷으로 취급됩니다.

use crate::types::{Symbol, Timeframe};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// OHLC 캔들스틱 데이터.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Kline {
    /// 거래 심볼
    pub symbol: Symbol,
    /// 타임프레임
    pub timeframe: Timeframe,
    /// 캔들 시작 시간
    pub open_time: DateTime<Utc>,
    /// 시가
    pub open: Decimal,
    /// 고가
    pub high: Decimal,
    /// 저가
    pub low: Decimal,
    /// 종가
    pub close: Decimal,
}

impl Kline {
    /// 새 캔들을 생성합니다.
    pub fn new(
        symbol: Symbol,
        timeframe: Timeframe,
        open_time: DateTime<Utc>,
        open: Decimal,
        high: Decimal,
        low: Decimal,
        close: Decimal,
    ) -> Self {
        Self {
            symbol,
            timeframe,
            open_time,
            open,
            high,
            low,
            close,
        }
    }

    /// 캔들 범위(고가 - 저가)를 반환합니다.
    pub fn range(&self) -> Decimal {
        self.high - self.low
    }

    /// 양봉(종가 > 시가)인지 확인합니다.
    pub fn is_bullish(&self) -> bool {
        self.close > self.open
    }

    /// 음봉(종가 < 시가)인지 확인합니다.
    pub fn is_bearish(&self) -> bool {
        self.close < self.open
    }

    /// 대표가(고가+저가+종가 평균)를 반환합니다.
    pub fn typical_price(&self) -> Decimal {
        (self.high + self.low + self.close) / Decimal::from(3)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn sample_kline() -> Kline {
        Kline::new(
            Symbol::forex("EUR", "USD"),
            Timeframe::D1,
            Utc::now(),
            dec!(1.1000),
            dec!(1.1050),
            dec!(1.0980),
            dec!(1.1020),
        )
    }

    #[test]
    fn test_range() {
        let kline = sample_kline();
        assert_eq!(kline.range(), dec!(0.0070));
    }

    #[test]
    fn test_bullish_bearish() {
        let kline = sample_kline();
        assert!(kline.is_bullish());
        assert!(!kline.is_bearish());
    }

    #[test]
    fn test_typical_price() {
        let kline = sample_kline();
        let expected = (dec!(1.1050) + dec!(1.0980) + dec!(1.1020)) / dec!(3);
        assert_eq!(kline.typical_price(), expected);
    }
}
