use derive_more::{Constructor, Display, From, Into};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display as StrumDisplay, EnumIter, EnumString};

use crate::domain::errors::ValidationError;

/// Value Object - price. May be NaN when the provider sent an unparsable field.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, From, Into, Constructor, Serialize, Deserialize)]
pub struct Price(f64);

impl Price {
    pub fn value(&self) -> f64 {
        self.0
    }

    /// `None` for NaN and infinities so callers can leave the slot blank.
    pub fn finite(&self) -> Option<f64> {
        self.0.is_finite().then_some(self.0)
    }
}

/// Value Object - traded volume. May be NaN, like [`Price`].
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, From, Into, Constructor, Serialize, Deserialize)]
pub struct Volume(f64);

impl Volume {
    pub fn value(&self) -> f64 {
        self.0
    }

    pub fn finite(&self) -> Option<f64> {
        self.0.is_finite().then_some(self.0)
    }
}

/// Value Object - epoch milliseconds of a trading day's local midnight
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, From, Into, Constructor, Display, Serialize, Deserialize,
)]
pub struct Timestamp(i64);

impl Timestamp {
    pub fn value(&self) -> i64 {
        self.0
    }

    pub fn from_millis(value: i64) -> Self {
        Self(value)
    }

    /// Chart libraries report x positions as JS numbers.
    pub fn from_chart_x(x: f64) -> Option<Self> {
        (x.is_finite() && x.fract() == 0.0).then_some(Self(x as i64))
    }
}

pub const MAX_SYMBOL_LEN: usize = 8;

/// `^[A-Z]{1,8}$`
pub fn is_valid_symbol(value: &str) -> bool {
    (1..=MAX_SYMBOL_LEN).contains(&value.len()) && value.bytes().all(|b| b.is_ascii_uppercase())
}

/// Value Object - validated ticker symbol
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[display(fmt = "{}", _0)]
pub struct Symbol(String);

impl Symbol {
    /// Uppercases `input` and accepts it only if it matches the ticker pattern.
    pub fn new(input: &str) -> Result<Self, ValidationError> {
        let upper = input.trim().to_uppercase();
        if is_valid_symbol(&upper) {
            Ok(Self(upper))
        } else {
            Err(ValidationError::InvalidSymbol(upper))
        }
    }

    pub fn value(&self) -> &str {
        &self.0
    }
}

impl Default for Symbol {
    fn default() -> Self {
        Self(DEFAULT_SYMBOL.to_string())
    }
}

pub const DEFAULT_SYMBOL: &str = "AAPL";

const POPULAR_SYMBOLS: [&str; 20] = [
    "AAPL", "MSFT", "GOOGL", "AMZN", "TSLA", "META", "NVDA", "BRK.A", "JPM", "V", "UNH", "HD", "PG", "MA",
    "DIS", "NFLX", "IBM", "INTC", "AMD", "BABA",
];

/// Popular tickers offered for autocomplete. Entries that would fail validation are left out.
pub fn popular_symbols() -> Vec<Symbol> {
    POPULAR_SYMBOLS.iter().filter_map(|s| Symbol::new(s).ok()).collect()
}

/// Popular tickers starting with the uppercased `input`, excluding an exact match.
pub fn suggestions(input: &str) -> Vec<Symbol> {
    let prefix = input.trim().to_uppercase();
    if prefix.is_empty() {
        return Vec::new();
    }
    popular_symbols()
        .into_iter()
        .filter(|s| s.value().starts_with(&prefix) && s.value() != prefix)
        .collect()
}

/// Provider `function` parameter. Only end-of-day data is supported.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, StrumDisplay, EnumIter, EnumString, AsRefStr, Serialize, Deserialize,
)]
pub enum SeriesFunction {
    #[default]
    #[strum(serialize = "TIME_SERIES_DAILY")]
    #[serde(rename = "TIME_SERIES_DAILY")]
    Daily,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symbol_is_uppercased_and_validated() {
        assert_eq!(Symbol::new("msft").map(|s| s.value().to_string()), Ok("MSFT".to_string()));
        assert!(Symbol::new("").is_err());
        assert!(Symbol::new("TOOLONGXX").is_err());
        assert!(Symbol::new("BRK.A").is_err());
        assert!(Symbol::new("A1").is_err());
        assert!(Symbol::new("ABCDEFGH").is_ok());
    }

    #[test]
    fn suggestions_complete_a_prefix() {
        let names = |input: &str| suggestions(input).iter().map(|s| s.value().to_string()).collect::<Vec<_>>();
        assert_eq!(names("am"), vec!["AMZN", "AMD"]);
        assert!(names("AMD").is_empty());
        assert!(names("").is_empty());
        assert!(names("B").iter().all(|s| s != "BRK.A"));
        assert_eq!(popular_symbols().len(), 19);
    }

    #[test]
    fn timestamp_from_chart_x_requires_integral_values() {
        assert_eq!(Timestamp::from_chart_x(1_704_153_600_000.0), Some(Timestamp::from_millis(1_704_153_600_000)));
        assert_eq!(Timestamp::from_chart_x(f64::NAN), None);
        assert_eq!(Timestamp::from_chart_x(1.5), None);
    }

    #[test]
    fn nan_prices_have_no_finite_value() {
        assert_eq!(Price::from(f64::NAN).finite(), None);
        assert_eq!(Price::from(1.5).finite(), Some(1.5));
    }

    #[test]
    fn function_name_matches_provider_parameter() {
        assert_eq!(SeriesFunction::Daily.as_ref(), "TIME_SERIES_DAILY");
    }
}
