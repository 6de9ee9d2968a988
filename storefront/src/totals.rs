//! Derived totals: subtotal, tax, and total cost.
//!
//! These are pure functions of the cart snapshot, recomputed on every read
//! and never stored, so they cannot drift from the items. No rounding is
//! applied at this layer; `Decimal` carries exact amounts until a
//! presentation surface formats them.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::types::CartState;

/// Fixed tax rate applied to the cart subtotal
pub const TAX_RATE: Decimal = dec!(0.13);

/// The three derived amounts for a cart snapshot
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Totals {
    /// Sum of all line totals
    pub subtotal: Decimal,
    /// `subtotal * TAX_RATE`
    pub tax_amount: Decimal,
    /// `subtotal + tax_amount`
    pub total_cost: Decimal,
}

impl CartState {
    /// Sum of all line totals; zero for an empty cart
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.items().iter().map(super::types::CartItem::total).sum()
    }

    /// Tax on the current subtotal
    #[must_use]
    pub fn tax_amount(&self) -> Decimal {
        self.subtotal() * TAX_RATE
    }

    /// Subtotal plus tax
    #[must_use]
    pub fn total_cost(&self) -> Decimal {
        self.subtotal() + self.tax_amount()
    }

    /// All three derived amounts in one pass over the items
    #[must_use]
    pub fn totals(&self) -> Totals {
        let subtotal = self.subtotal();
        let tax_amount = subtotal * TAX_RATE;
        Totals {
            subtotal,
            tax_amount,
            total_cost: subtotal + tax_amount,
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)] // Test code can use expect

    use super::*;
    use crate::types::{CartState, Movie};
    use chrono::NaiveDate;

    fn cart_with(prices: &[(&str, Decimal, u32)]) -> CartState {
        let mut cart = CartState::default();
        for (id, price, quantity) in prices {
            let movie = Movie::new(
                *id,
                format!("Movie {id}"),
                format!("https://example.com/{id}.jpg"),
                NaiveDate::from_ymd_opt(2024, 3, 1).expect("valid date"),
                *price,
            );
            for _ in 0..*quantity {
                cart.add(movie.clone());
            }
        }
        cart
    }

    #[test]
    fn empty_cart_totals_are_zero() {
        let cart = CartState::default();
        let totals = cart.totals();

        assert_eq!(totals.subtotal, Decimal::ZERO);
        assert_eq!(totals.tax_amount, Decimal::ZERO);
        assert_eq!(totals.total_cost, Decimal::ZERO);
    }

    #[test]
    fn subtotal_sums_line_totals() {
        let cart = cart_with(&[("1", dec!(12.99), 2), ("2", dec!(14.99), 1)]);
        assert_eq!(cart.subtotal(), dec!(40.97));
    }

    #[test]
    fn tax_is_exactly_thirteen_percent() {
        let cart = cart_with(&[("1", dec!(12.99), 1)]);
        assert_eq!(cart.tax_amount(), dec!(1.6887));
    }

    #[test]
    fn total_cost_is_subtotal_plus_tax() {
        let cart = cart_with(&[("1", dec!(12.99), 1)]);
        assert_eq!(cart.total_cost(), dec!(14.6787));
    }

    #[test]
    fn totals_matches_the_individual_reads() {
        let cart = cart_with(&[("1", dec!(12.99), 2), ("2", dec!(14.99), 3)]);
        let totals = cart.totals();

        assert_eq!(totals.subtotal, cart.subtotal());
        assert_eq!(totals.tax_amount, cart.tax_amount());
        assert_eq!(totals.total_cost, cart.total_cost());
    }
}
