//! The shopping cart surface.
//!
//! Displays the cart view pushed down by its container and raises `remove`
//! and `update quantity` upward. The surface never derives totals itself -
//! it shows exactly what the container computed.

use crate::{RemoveFromCart, Surface, UpdateQuantity, format};
use marquee_storefront::totals::TAX_RATE;
use marquee_storefront::types::{CartState, CartView, MovieId};
use rust_decimal::Decimal;

/// The cart view surface, bound to the container's mutation callbacks
pub struct CartSurface {
    view: CartView,
    remove_from_cart: RemoveFromCart,
    update_quantity: UpdateQuantity,
}

impl CartSurface {
    /// Creates a cart surface bound to the container's callbacks
    ///
    /// Starts from an empty view; the container pushes the first real
    /// snapshot via [`set_inputs`](Self::set_inputs).
    #[must_use]
    pub fn new(remove_from_cart: RemoveFromCart, update_quantity: UpdateQuantity) -> Self {
        Self {
            view: CartView::from(&CartState::default()),
            remove_from_cart,
            update_quantity,
        }
    }

    /// Binds a fresh snapshot plus totals pushed by the container
    pub fn set_inputs(&mut self, view: CartView) {
        self.view = view;
    }

    /// The currently bound view
    #[must_use]
    pub const fn view(&self) -> &CartView {
        &self.view
    }

    /// A user removes the line item for `movie_id`
    pub fn remove(&self, movie_id: MovieId) {
        tracing::debug!(%movie_id, "Raising remove-from-cart");
        (self.remove_from_cart)(movie_id);
    }

    /// A user adjusts the quantity for `movie_id` by `delta`
    pub fn change_quantity(&self, movie_id: MovieId, delta: i64) {
        tracing::debug!(%movie_id, delta, "Raising update-quantity");
        (self.update_quantity)(movie_id, delta);
    }
}

impl Surface for CartSurface {
    fn name(&self) -> &'static str {
        "shopping cart"
    }

    fn render(&self) -> String {
        if self.view.items.is_empty() {
            return String::from("Your Cart\n  (empty)\n");
        }

        let mut out = String::from("Your Cart\n");
        for item in &self.view.items {
            out.push_str(&format!(
                "  {} x {} - {}\n",
                item.quantity(),
                item.movie.name,
                format::cad(item.total()),
            ));
        }

        let tax_percent = (TAX_RATE * Decimal::ONE_HUNDRED).normalize();
        out.push_str(&format!(
            "  Subtotal: {}\n  Tax ({tax_percent}%): {}\n  Total: {}\n",
            format::cad(self.view.totals.subtotal),
            format::cad(self.view.totals.tax_amount),
            format::cad(self.view.totals.total_cost),
        ));
        out
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)] // Test code can use unwrap/expect

    use super::*;
    use marquee_storefront::reducer::CartEnvironment;
    use marquee_testing::{fixtures, test_clock};
    use std::sync::{Arc, Mutex};

    fn recording_cart() -> (CartSurface, Arc<Mutex<Vec<(MovieId, i64)>>>) {
        let raised = Arc::new(Mutex::new(Vec::new()));

        let remove_sink = Arc::clone(&raised);
        let remove: RemoveFromCart = Arc::new(move |movie_id| {
            if let Ok(mut raised) = remove_sink.lock() {
                raised.push((movie_id, 0));
            }
        });

        let update_sink = Arc::clone(&raised);
        let update: UpdateQuantity = Arc::new(move |movie_id, delta| {
            if let Ok(mut raised) = update_sink.lock() {
                raised.push((movie_id, delta));
            }
        });

        (CartSurface::new(remove, update), raised)
    }

    #[test]
    fn renders_the_empty_cart_placeholder() {
        let (surface, _) = recording_cart();
        assert!(surface.render().contains("(empty)"));
    }

    #[test]
    fn set_inputs_rebinds_the_rendered_view() {
        let (mut surface, _) = recording_cart();
        let env = CartEnvironment::new(Arc::new(test_clock()));
        let cart = fixtures::mock_cart(&env);

        surface.set_inputs(CartView::from(&cart));
        let rendered = surface.render();

        assert!(rendered.contains("2 x Dune: Part Two - $25.98"));
        assert!(rendered.contains("1 x Oppenheimer - $14.99"));
        assert!(rendered.contains("Subtotal: $40.97"));
        assert!(rendered.contains("Tax (13%)"));
        assert!(rendered.contains("Total: $46.30"));
    }

    #[test]
    fn callbacks_carry_the_user_interaction() {
        let (surface, raised) = recording_cart();

        surface.remove(MovieId::from("2"));
        surface.change_quantity(MovieId::from("1"), -1);

        let raised = raised.lock().expect("no poisoned lock");
        assert_eq!(
            *raised,
            vec![(MovieId::from("2"), 0), (MovieId::from("1"), -1)]
        );
    }
}
