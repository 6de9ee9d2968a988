//! # Marquee Storefront
//!
//! Movie catalog and cart domain logic for the Marquee storefront.
//!
//! This crate is the single cart-mutation module consumed by every surface:
//! the catalog app, the cart app, and the booking shell all drive the same
//! [`reducer::CartReducer`] instead of carrying private copies of the cart
//! rules.
//!
//! ## Modules
//!
//! - [`types`]: the data model (movies, cart items, cart state, views)
//! - [`reducer`]: the three cart mutations as a pure reducer
//! - [`totals`]: derived subtotal / tax / total, recomputed on every read
//! - [`catalog`]: the fixed list of featured movies
//!
//! ## Example
//!
//! ```
//! use marquee_core::reducer::Reducer;
//! use marquee_storefront::catalog::featured_movies;
//! use marquee_storefront::reducer::{CartAction, CartEnvironment, CartReducer};
//! use marquee_storefront::types::CartState;
//! use marquee_testing::test_clock;
//! use std::sync::Arc;
//!
//! let mut cart = CartState::default();
//! let env = CartEnvironment::new(Arc::new(test_clock()));
//! let movie = featured_movies().remove(0);
//! let price = movie.ticket_price;
//!
//! CartReducer.reduce(&mut cart, CartAction::AddToCart(movie), &env);
//!
//! assert_eq!(cart.len(), 1);
//! assert_eq!(cart.subtotal(), price);
//! ```

pub mod catalog;
pub mod reducer;
pub mod totals;
pub mod types;
