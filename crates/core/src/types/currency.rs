//! Display currencies and conversion from the canonical unit.
//!
//! Vacation prices are stored in US cents. Listings can be displayed in a
//! small fixed set of currencies, each with a static rate against the US
//! dollar. The rates are constants by design - this is a display
//! convenience, not a live FX integration.

use core::fmt;

use serde::{Deserialize, Serialize};

/// The closed set of display currencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Currency {
    /// US dollar, the canonical unit.
    Usd,
    /// Pound sterling.
    Gbp,
    /// Bitcoin.
    Btc,
}

impl Currency {
    /// All supported currencies, in display order.
    pub const ALL: [Self; 3] = [Self::Usd, Self::Gbp, Self::Btc];

    /// ISO-style uppercase code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Usd => "USD",
            Self::Gbp => "GBP",
            Self::Btc => "BTC",
        }
    }

    /// Parse an uppercase code; unknown codes are `None`, not an error.
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "USD" => Some(Self::Usd),
            "GBP" => Some(Self::Gbp),
            "BTC" => Some(Self::Btc),
            _ => None,
        }
    }

    /// Static multiplicative rate against one US dollar.
    #[must_use]
    pub const fn rate(self) -> f64 {
        match self {
            Self::Usd => 1.0,
            Self::Gbp => 0.6,
            Self::Btc => 0.002_370,
        }
    }

    /// Convert an amount in US dollars into this currency.
    #[must_use]
    pub fn convert_from_usd(self, amount: f64) -> f64 {
        amount * self.rate()
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Convert an amount in US dollars into the currency named by `code`.
///
/// Unknown codes yield `f64::NAN`. That is a sentinel, not an error:
/// callers rendering prices must check `is_nan()` before display.
#[must_use]
pub fn convert_from_usd(amount: f64, code: &str) -> f64 {
    Currency::from_code(code).map_or(f64::NAN, |currency| currency.convert_from_usd(amount))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_codes_are_finite_and_non_negative() {
        for code in ["USD", "GBP", "BTC"] {
            for amount in [0.0, 1.0, 99.95, 2699.95] {
                let converted = convert_from_usd(amount, code);
                assert!(converted.is_finite(), "{code} {amount}");
                assert!(converted >= 0.0, "{code} {amount}");
            }
        }
    }

    #[test]
    fn test_unknown_code_is_nan() {
        assert!(convert_from_usd(100.0, "EUR").is_nan());
        assert!(convert_from_usd(100.0, "usd").is_nan());
        assert!(convert_from_usd(100.0, "").is_nan());
    }

    #[test]
    fn test_static_rates() {
        assert!((convert_from_usd(100.0, "USD") - 100.0).abs() < f64::EPSILON);
        assert!((convert_from_usd(100.0, "GBP") - 60.0).abs() < 1e-9);
        assert!((convert_from_usd(100.0, "BTC") - 0.237).abs() < 1e-9);
    }

    #[test]
    fn test_code_round_trip() {
        for currency in Currency::ALL {
            assert_eq!(Currency::from_code(currency.code()), Some(currency));
        }
    }
}
