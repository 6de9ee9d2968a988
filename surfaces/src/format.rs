//! Display formatting for currency amounts.
//!
//! Amounts are carried as exact decimals everywhere else; rounding to the
//! currency's exponent happens only here, at the presentation edge.

use rust_decimal::Decimal;
use rusty_money::{Money, iso};

/// Formats an exact decimal amount as Canadian dollars
pub(crate) fn cad(amount: Decimal) -> String {
    Money::from_decimal(amount, iso::CAD).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn formats_whole_and_fractional_amounts() {
        assert_eq!(cad(dec!(12.99)), "$12.99");
        assert_eq!(cad(dec!(0)), "$0.00");
    }

    #[test]
    fn rounds_exact_tax_amounts_for_display_only() {
        assert_eq!(cad(dec!(1.6887)), "$1.69");
    }
}
