use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::fx_errors::FxError;

/// Closed set of currencies the engine supports. Extending it means
/// adding a variant plus a registry entry in [`CurrencyCode::meta`];
/// exhaustive matching keeps every consumer honest.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum CurrencyCode {
    Cny,
    Usd,
    Eur,
    Gbp,
    Jpy,
    Hkd,
    Krw,
}

/// Static display metadata for a currency. Immutable for the process
/// lifetime; `precision` is the number of fraction digits kept after
/// rounding (0 for currencies without a subdivision).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrencyMeta {
    pub symbol: &'static str,
    pub precision: u32,
    pub locale: &'static str,
}

impl CurrencyCode {
    /// Every supported currency, in display order.
    pub const ALL: [CurrencyCode; 7] = [
        CurrencyCode::Cny,
        CurrencyCode::Usd,
        CurrencyCode::Eur,
        CurrencyCode::Gbp,
        CurrencyCode::Jpy,
        CurrencyCode::Hkd,
        CurrencyCode::Krw,
    ];

    /// Registry lookup. Total over the closed enumeration, so there is
    /// no error path.
    pub fn meta(&self) -> CurrencyMeta {
        match self {
            CurrencyCode::Cny => CurrencyMeta {
                symbol: "¥",
                precision: 2,
                locale: "zh-CN",
            },
            CurrencyCode::Usd => CurrencyMeta {
                symbol: "$",
                precision: 2,
                locale: "en-US",
            },
            CurrencyCode::Eur => CurrencyMeta {
                symbol: "€",
                precision: 2,
                locale: "de-DE",
            },
            CurrencyCode::Gbp => CurrencyMeta {
                symbol: "£",
                precision: 2,
                locale: "en-GB",
            },
            CurrencyCode::Jpy => CurrencyMeta {
                symbol: "JP¥",
                precision: 0,
                locale: "ja-JP",
            },
            CurrencyCode::Hkd => CurrencyMeta {
                symbol: "HK$",
                precision: 2,
                locale: "zh-HK",
            },
            CurrencyCode::Krw => CurrencyMeta {
                symbol: "₩",
                precision: 0,
                locale: "ko-KR",
            },
        }
    }

    pub fn symbol(&self) -> &'static str {
        self.meta().symbol
    }

    pub fn precision(&self) -> u32 {
        self.meta().precision
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CurrencyCode::Cny => "CNY",
            CurrencyCode::Usd => "USD",
            CurrencyCode::Eur => "EUR",
            CurrencyCode::Gbp => "GBP",
            CurrencyCode::Jpy => "JPY",
            CurrencyCode::Hkd => "HKD",
            CurrencyCode::Krw => "KRW",
        }
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CurrencyCode {
    type Err = FxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "CNY" => Ok(CurrencyCode::Cny),
            "USD" => Ok(CurrencyCode::Usd),
            "EUR" => Ok(CurrencyCode::Eur),
            "GBP" => Ok(CurrencyCode::Gbp),
            "JPY" => Ok(CurrencyCode::Jpy),
            "HKD" => Ok(CurrencyCode::Hkd),
            "KRW" => Ok(CurrencyCode::Krw),
            other => Err(FxError::InvalidCurrencyCode(other.to_string())),
        }
    }
}
