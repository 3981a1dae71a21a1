//! # Currency
//!
//! Currencies accepted by the Payrexx gateway API.
//! Amounts are always sent in the smallest currency unit.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Supported currencies (ISO 4217)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    CHF,
    EUR,
    USD,
    GBP,
    JPY,
    DKK,
    NOK,
    SEK,
    PLN,
    CZK,
    HUF,
    AUD,
    CAD,
}

impl Currency {
    /// Returns the ISO 4217 currency code
    pub fn as_str(&self) -> &'static str {
        match self {
            Currency::CHF => "CHF",
            Currency::EUR => "EUR",
            Currency::USD => "USD",
            Currency::GBP => "GBP",
            Currency::JPY => "JPY",
            Currency::DKK => "DKK",
            Currency::NOK => "NOK",
            Currency::SEK => "SEK",
            Currency::PLN => "PLN",
            Currency::CZK => "CZK",
            Currency::HUF => "HUF",
            Currency::AUD => "AUD",
            Currency::CAD => "CAD",
        }
    }

    /// Returns the number of decimal places for this currency
    /// (JPY has 0 decimals, the others have 2)
    pub fn decimal_places(&self) -> u8 {
        match self {
            Currency::JPY => 0,
            _ => 2,
        }
    }

    /// Convert a decimal amount to the smallest currency unit (cents, etc.)
    pub fn to_smallest_unit(&self, amount: f64) -> u64 {
        let multiplier = 10_f64.powi(self.decimal_places() as i32);
        (amount * multiplier).round().max(0.0) as u64
    }

    /// Convert from smallest unit back to decimal
    pub fn from_smallest_unit(&self, amount: u64) -> f64 {
        let divisor = 10_f64.powi(self.decimal_places() as i32);
        amount as f64 / divisor
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Currency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "CHF" => Ok(Currency::CHF),
            "EUR" => Ok(Currency::EUR),
            "USD" => Ok(Currency::USD),
            "GBP" => Ok(Currency::GBP),
            "JPY" => Ok(Currency::JPY),
            "DKK" => Ok(Currency::DKK),
            "NOK" => Ok(Currency::NOK),
            "SEK" => Ok(Currency::SEK),
            "PLN" => Ok(Currency::PLN),
            "CZK" => Ok(Currency::CZK),
            "HUF" => Ok(Currency::HUF),
            "AUD" => Ok(Currency::AUD),
            "CAD" => Ok(Currency::CAD),
            other => Err(format!("unsupported currency: {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_smallest_unit_conversion() {
        assert_eq!(Currency::CHF.to_smallest_unit(10.50), 1050);
        assert_eq!(Currency::JPY.to_smallest_unit(1000.0), 1000);
        assert_eq!(Currency::EUR.from_smallest_unit(1999), 19.99);
    }

    #[test]
    fn test_wire_format_is_uppercase() {
        assert_eq!(serde_json::to_string(&Currency::EUR).unwrap(), "\"EUR\"");
        let parsed: Currency = serde_json::from_str("\"CHF\"").unwrap();
        assert_eq!(parsed, Currency::CHF);
    }

    #[test]
    fn test_from_str() {
        assert_eq!("usd".parse::<Currency>().unwrap(), Currency::USD);
        assert_eq!("GBP".parse::<Currency>().unwrap(), Currency::GBP);
        assert!("XYZ".parse::<Currency>().is_err());
    }
}
