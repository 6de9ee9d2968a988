//! # Marquee Surfaces
//!
//! Presentation surfaces for the Marquee storefront and the pluggable
//! provider that acquires them.
//!
//! A *surface* is a composable presentation unit - the catalog view or the
//! cart view - that can be hosted in-process or acquired from a separately
//! deployed registry at startup. Surfaces never own cart state: they hold
//! read-only snapshots plus callback handles, and raise user interactions
//! upward through those callbacks.
//!
//! - [`catalog::CatalogSurface`]: lists movies, raises add-to-cart
//! - [`cart::CartSurface`]: shows the cart view, raises remove and
//!   quantity updates
//! - [`provider::SurfaceProvider`]: one async method returning either a
//!   bindable surface handle or a typed failure

pub mod cart;
pub mod catalog;
pub mod provider;

mod format;

pub use provider::{SurfaceError, SurfaceHandle, SurfaceKind, SurfaceProvider};

use marquee_storefront::types::{Movie, MovieId};
use std::sync::Arc;

/// Callback raised by the catalog when a user buys a ticket
pub type AddToCart = Arc<dyn Fn(Movie) + Send + Sync>;

/// Callback raised by the cart to drop a line item
pub type RemoveFromCart = Arc<dyn Fn(MovieId) + Send + Sync>;

/// Callback raised by the cart to adjust a line item's quantity
pub type UpdateQuantity = Arc<dyn Fn(MovieId, i64) + Send + Sync>;

/// A composable presentation unit
///
/// The two operations every surface supports: identify itself, and force a
/// render pass producing its current display text.
pub trait Surface {
    /// Human-readable surface name
    fn name(&self) -> &'static str;

    /// Force a render pass
    fn render(&self) -> String;
}
