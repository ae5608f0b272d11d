//! Currency codes and amount formatting
//!
//! Amounts are rendered the way an `en-US` currency formatter displays them:
//! a currency symbol placed before the number, comma digit grouping, and the
//! number of fraction digits customary for the currency.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::money::Money;

/// ISO 4217 currency code (three ASCII letters, upper-cased)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CurrencyCode(String);

impl CurrencyCode {
    /// Parse a user-supplied code, normalizing case
    pub fn parse(code: &str) -> Result<Self, CurrencyCodeError> {
        let code = code.trim();
        if code.len() != 3 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(CurrencyCodeError(code.to_string()));
        }
        Ok(Self(code.to_ascii_uppercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Format an amount in this currency
    pub fn format(&self, amount: Money) -> String {
        format_amount(amount, self.as_str())
    }
}

impl Default for CurrencyCode {
    fn default() -> Self {
        Self("USD".to_string())
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Error for a code that is not three ASCII letters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrencyCodeError(pub String);

impl fmt::Display for CurrencyCodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Invalid currency code '{}': expected three letters such as USD",
            self.0
        )
    }
}

impl std::error::Error for CurrencyCodeError {}

/// Display conventions for a currency under the en-US locale
struct CurrencyStyle {
    symbol: &'static str,
    fraction_digits: u32,
}

const CURRENCY_STYLES: &[(&str, CurrencyStyle)] = &[
    ("USD", CurrencyStyle { symbol: "$", fraction_digits: 2 }),
    ("EUR", CurrencyStyle { symbol: "€", fraction_digits: 2 }),
    ("GBP", CurrencyStyle { symbol: "£", fraction_digits: 2 }),
    ("JPY", CurrencyStyle { symbol: "¥", fraction_digits: 0 }),
    ("CAD", CurrencyStyle { symbol: "CA$", fraction_digits: 2 }),
    ("AUD", CurrencyStyle { symbol: "A$", fraction_digits: 2 }),
    ("INR", CurrencyStyle { symbol: "₹", fraction_digits: 2 }),
    ("CNY", CurrencyStyle { symbol: "CN¥", fraction_digits: 2 }),
    ("NZD", CurrencyStyle { symbol: "NZ$", fraction_digits: 2 }),
    ("HKD", CurrencyStyle { symbol: "HK$", fraction_digits: 2 }),
    ("MXN", CurrencyStyle { symbol: "MX$", fraction_digits: 2 }),
    ("BRL", CurrencyStyle { symbol: "R$", fraction_digits: 2 }),
    ("KRW", CurrencyStyle { symbol: "₩", fraction_digits: 0 }),
    ("ILS", CurrencyStyle { symbol: "₪", fraction_digits: 2 }),
    ("VND", CurrencyStyle { symbol: "₫", fraction_digits: 0 }),
];

/// Currencies offered by `settings currency`, with a readable name
pub const SUPPORTED_CURRENCIES: &[(&str, &str)] = &[
    ("USD", "US Dollar ($)"),
    ("EUR", "Euro (€)"),
    ("GBP", "British Pound (£)"),
    ("JPY", "Japanese Yen (¥)"),
    ("CAD", "Canadian Dollar (C$)"),
    ("AUD", "Australian Dollar (A$)"),
    ("INR", "Indian Rupee (₹)"),
    ("CNY", "Chinese Yuan (¥)"),
];

/// Render an amount as an en-US currency string
///
/// Codes without a known symbol are shown as the code followed by a space
/// (`CHF 1,234.56`). The code itself is not validated.
///
/// # Examples
/// ```
/// use moneytrack::models::{format_amount, Money};
/// assert_eq!(format_amount(Money::from_cents(123456), "USD"), "$1,234.56");
/// assert_eq!(format_amount(Money::from_cents(123456), "JPY"), "¥1,235");
/// ```
pub fn format_amount(amount: Money, currency: &str) -> String {
    let code = currency.trim().to_ascii_uppercase();
    let style = CURRENCY_STYLES
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, style)| style);

    let (prefix, digits) = match style {
        Some(style) => (style.symbol.to_string(), style.fraction_digits),
        None => (format!("{} ", code), 2),
    };

    let sign = if amount.is_negative() { "-" } else { "" };
    format!("{}{}{}", sign, prefix, format_number(amount.abs(), digits))
}

/// Format a non-negative amount with comma grouping
fn format_number(amount: Money, fraction_digits: u32) -> String {
    let cents = amount.cents().unsigned_abs();

    let (units, fraction) = if fraction_digits == 0 {
        // Round half up to whole units
        ((cents + 50) / 100, None)
    } else {
        (cents / 100, Some(cents % 100))
    };

    let grouped = group_thousands(units);
    match fraction {
        Some(fraction) => format!("{}.{:02}", grouped, fraction),
        None => grouped,
    }
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_usd_formatting() {
        assert_eq!(format_amount(Money::from_cents(0), "USD"), "$0.00");
        assert_eq!(format_amount(Money::from_cents(5), "USD"), "$0.05");
        assert_eq!(format_amount(Money::from_cents(99999), "USD"), "$999.99");
        assert_eq!(format_amount(Money::from_cents(100000), "USD"), "$1,000.00");
        assert_eq!(
            format_amount(Money::from_cents(123456789), "usd"),
            "$1,234,567.89"
        );
    }

    #[test]
    fn test_negative_amounts() {
        assert_eq!(format_amount(Money::from_cents(-1050), "USD"), "-$10.50");
        assert_eq!(format_amount(Money::from_cents(-1050), "EUR"), "-€10.50");
    }

    #[test]
    fn test_other_symbols() {
        assert_eq!(format_amount(Money::from_cents(2000), "EUR"), "€20.00");
        assert_eq!(format_amount(Money::from_cents(2000), "GBP"), "£20.00");
        assert_eq!(format_amount(Money::from_cents(2000), "CAD"), "CA$20.00");
        assert_eq!(format_amount(Money::from_cents(2000), "INR"), "₹20.00");
    }

    #[test]
    fn test_zero_fraction_currencies_round() {
        assert_eq!(format_amount(Money::from_cents(149), "JPY"), "¥1");
        assert_eq!(format_amount(Money::from_cents(150), "JPY"), "¥2");
        assert_eq!(format_amount(Money::from_cents(123_456_700), "KRW"), "₩1,234,567");
    }

    #[test]
    fn test_unknown_code_falls_back_to_code_prefix() {
        assert_eq!(format_amount(Money::from_cents(123456), "CHF"), "CHF 1,234.56");
    }

    #[test]
    fn test_currency_code_parse() {
        assert_eq!(CurrencyCode::parse(" gbp ").unwrap().as_str(), "GBP");
        assert!(CurrencyCode::parse("US").is_err());
        assert!(CurrencyCode::parse("US1").is_err());
        assert_eq!(
            CurrencyCode::parse("eur").unwrap().format(Money::from_units(3)),
            "€3.00"
        );
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(1234567), "1,234,567");
    }
}
