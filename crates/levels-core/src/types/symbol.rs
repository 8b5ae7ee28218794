//! 심볼 및 시장 유형 정의.
//!
//! 이 모듈은 레벨 카탈로그의 키가 되는 트레이딩 심볼 타입을 정의합니다:
//! - `MarketType` - 시장 유형 (암호화폐, 주식, 외환 등)
//! - `Symbol` - 거래 가능한 상품을 나타내는 심볼

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 시장 유형 분류.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarketType {
    /// 암호화폐 현물 시장
    Crypto,
    /// 주식 시장
    Stock,
    /// 외환 시장
    Forex,
    /// 선물/파생상품 시장
    Futures,
}

impl fmt::Display for MarketType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MarketType::Crypto => write!(f, "crypto"),
            MarketType::Stock => write!(f, "stock"),
            MarketType::Forex => write!(f, "forex"),
            MarketType::Futures => write!(f, "futures"),
        }
    }
}

/// 거래 가능한 상품을 나타내는 트레이딩 심볼.
///
/// 심볼은 기준 자산, 호가 자산, 시장 유형으로 구성됩니다.
/// 예: 외환의 EUR/USD, 암호화폐의 BTC/USDT.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Symbol {
    /// 기준 자산 (예: EUR, BTC)
    pub base: String,
    /// 호가 자산 (예: USD, USDT)
    pub quote: String,
    /// 시장 유형
    pub market_type: MarketType,
}

impl Symbol {
    /// 새 심볼을 생성합니다.
    pub fn new(
        base: impl Into<String>,
        quote: impl Into<String>,
        market_type: MarketType,
    ) -> Self {
        Self {
            base: base.into().to_uppercase(),
            quote: quote.into().to_uppercase(),
            market_type,
        }
    }

    /// 외환 심볼 생성 단축 함수.
    pub fn forex(base: impl Into<String>, quote: impl Into<String>) -> Self {
        Self::new(base, quote, MarketType::Forex)
    }

    /// 암호화폐 심볼 생성 단축 함수.
    pub fn crypto(base: impl Into<String>, quote: impl Into<String>) -> Self {
        Self::new(base, quote, MarketType::Crypto)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.base, self.quote)
    }
}

impl FromStr for Symbol {
    type Err = String;

    /// "BASE/QUOTE" 형식의 문자열을 파싱합니다. 시장 유형은 Forex로 가정합니다.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (base, quote) = s
            .split_once('/')
            .ok_or_else(|| format!("잘못된 심볼 형식: {}", s))?;
        if base.is_empty() || quote.is_empty() {
            return Err(format!("잘못된 심볼 형식: {}", s));
        }
        Ok(Symbol::forex(base, quote))
    }
}
