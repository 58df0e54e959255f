//! Currency and amount formatting with decimal precision.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! Amounts are `rust_decimal::Decimal` throughout.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// ISO 4217 currency codes supported by the system.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    /// Swiss Franc
    #[default]
    Chf,
    /// Euro
    Eur,
    /// US Dollar
    Usd,
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Chf => write!(f, "CHF"),
            Self::Eur => write!(f, "EUR"),
            Self::Usd => write!(f, "USD"),
        }
    }
}

/// Explicit number format for printed amounts.
///
/// Never consults the process locale. The default is the Swiss convention
/// used on attestations: `1'234.50`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmountFormat {
    /// Separator inserted between groups of three integer digits.
    #[serde(default = "default_thousands_separator")]
    pub thousands_separator: String,
    /// Separator between the integer and fractional part.
    #[serde(default = "default_decimal_separator")]
    pub decimal_separator: String,
    /// Number of fractional digits, always printed.
    #[serde(default = "default_decimals")]
    pub decimals: u32,
    /// Currency the amounts are expressed in.
    #[serde(default)]
    pub currency: Currency,
}

fn default_thousands_separator() -> String {
    "'".to_string()
}

fn default_decimal_separator() -> String {
    ".".to_string()
}

const fn default_decimals() -> u32 {
    2
}

impl Default for AmountFormat {
    fn default() -> Self {
        Self {
            thousands_separator: default_thousands_separator(),
            decimal_separator: default_decimal_separator(),
            decimals: default_decimals(),
            currency: Currency::default(),
        }
    }
}

impl AmountFormat {
    /// Formats an amount, rounding half away from zero to `decimals` places.
    #[must_use]
    pub fn format(&self, amount: Decimal) -> String {
        let rounded =
            amount.round_dp_with_strategy(self.decimals, RoundingStrategy::MidpointAwayFromZero);
        let negative = rounded.is_sign_negative() && !rounded.is_zero();
        let digits = format!("{:.*}", self.decimals as usize, rounded.abs());

        let (integer, fraction) = match digits.split_once('.') {
            Some((integer, fraction)) => (integer, Some(fraction)),
            None => (digits.as_str(), None),
        };

        let mut out = String::with_capacity(digits.len() + integer.len() / 3 + 1);
        if negative {
            out.push('-');
        }
        out.push_str(&group_thousands(integer, &self.thousands_separator));
        if let Some(fraction) = fraction {
            out.push_str(&self.decimal_separator);
            out.push_str(fraction);
        }
        out
    }
}

fn group_thousands(integer: &str, separator: &str) -> String {
    let len = integer.len();
    let mut out = String::with_capacity(len + (len / 3) * separator.len());
    for (i, ch) in integer.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push_str(separator);
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    #[test]
    fn test_currency_display() {
        assert_eq!(Currency::Chf.to_string(), "CHF");
        assert_eq!(Currency::Usd.to_string(), "USD");
        assert_eq!(Currency::default(), Currency::Chf);
    }

    #[rstest]
    #[case(dec!(1234.5), "1'234.50")]
    #[case(dec!(0), "0.00")]
    #[case(dec!(1000000), "1'000'000.00")]
    #[case(dec!(999.999), "1'000.00")]
    #[case(dec!(100), "100.00")]
    #[case(dec!(12345.675), "12'345.68")]
    #[case(dec!(-1234.5), "-1'234.50")]
    #[case(dec!(-0.001), "0.00")]
    fn test_default_format(#[case] amount: Decimal, #[case] expected: &str) {
        assert_eq!(AmountFormat::default().format(amount), expected);
    }

    #[test]
    fn test_custom_format() {
        let format = AmountFormat {
            thousands_separator: " ".to_string(),
            decimal_separator: ",".to_string(),
            decimals: 2,
            currency: Currency::Eur,
        };
        assert_eq!(format.format(dec!(1234567.8)), "1 234 567,80");
    }

    #[test]
    fn test_zero_decimals() {
        let format = AmountFormat {
            decimals: 0,
            ..AmountFormat::default()
        };
        assert_eq!(format.format(dec!(1234.4)), "1'234");
    }

    mod props {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Every group after the first has exactly three digits.
            #[test]
            fn prop_thousands_groups_of_three(cents in 0i64..1_000_000_000_000_000) {
                let printed = AmountFormat::default().format(Decimal::new(cents, 2));
                let integer = printed.split('.').next().unwrap_or_default();
                let groups: Vec<&str> = integer.split('\'').collect();

                prop_assert!(!groups[0].is_empty() && groups[0].len() <= 3);
                for group in &groups[1..] {
                    prop_assert_eq!(group.len(), 3);
                }
            }

            /// Negating an amount only adds a leading minus sign.
            #[test]
            fn prop_negative_mirrors_positive(cents in 1i64..1_000_000_000) {
                let format = AmountFormat::default();
                let amount = Decimal::new(cents, 2);
                prop_assert_eq!(format.format(-amount), format!("-{}", format.format(amount)));
            }
        }
    }
}
