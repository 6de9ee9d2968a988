//! Domain types for the storefront.
//!
//! Every surface shares these shapes: the catalog lists [`Movie`]s, the cart
//! holds [`CartItem`]s inside a [`CartState`], and containers push
//! [`CartView`] snapshots into whichever cart surface is active.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::totals::Totals;

/// Unique identifier for a movie in the catalog
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MovieId(String);

impl MovieId {
    /// Creates a `MovieId` from anything string-like
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for MovieId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl std::fmt::Display for MovieId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A purchasable movie - immutable catalog entry
///
/// Owned by the catalog; never mutated after creation. Cart items carry a
/// clone, but identity is always `id`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movie {
    /// Unique identifier
    pub id: MovieId,
    /// Display name
    pub name: String,
    /// Thumbnail image URI
    pub thumbnail: String,
    /// Theatrical release date
    pub release_date: NaiveDate,
    /// Ticket price (non-negative currency amount)
    pub ticket_price: Decimal,
}

impl Movie {
    /// Creates a new catalog entry
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        thumbnail: impl Into<String>,
        release_date: NaiveDate,
        ticket_price: Decimal,
    ) -> Self {
        Self {
            id: MovieId::new(id),
            name: name.into(),
            thumbnail: thumbnail.into(),
            release_date,
            ticket_price,
        }
    }
}

/// A cart line item
///
/// Invariants, maintained by the reducer:
/// - `quantity` is always >= 1 (an item that would reach zero is removed)
/// - `total` always equals `quantity * ticket price` - it is recomputed on
///   every quantity change and never independently settable
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    /// The movie this line refers to
    pub movie: Movie,
    quantity: u32,
    total: Decimal,
}

impl CartItem {
    /// Creates a line item for a single ticket
    #[must_use]
    pub fn new(movie: Movie) -> Self {
        let total = movie.ticket_price;
        Self {
            movie,
            quantity: 1,
            total,
        }
    }

    /// Current ticket count (always >= 1)
    #[must_use]
    pub const fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Line total (`quantity * ticket price`)
    #[must_use]
    pub const fn total(&self) -> Decimal {
        self.total
    }

    /// Sets the quantity and recomputes the total from the given price
    pub(crate) fn set_quantity(&mut self, quantity: u32, ticket_price: Decimal) {
        self.quantity = quantity;
        self.total = Decimal::from(quantity) * ticket_price;
    }
}

/// The cart: an ordered sequence of line items, one per movie id
///
/// Created empty at container startup, mutated only through
/// [`crate::reducer::CartReducer`], destroyed with its container - never
/// persisted.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartState {
    items: Vec<CartItem>,
}

impl CartState {
    /// The line items in insertion order
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Number of distinct movies in the cart
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the cart has no items
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Looks up the line item for a movie, if present
    #[must_use]
    pub fn get(&self, movie_id: &MovieId) -> Option<&CartItem> {
        self.items.iter().find(|item| item.movie.id == *movie_id)
    }

    /// Adds one ticket for `movie`
    ///
    /// An existing entry gets its quantity bumped and its total recomputed
    /// from the incoming movie's price; a new movie is appended at the end,
    /// preserving insertion order.
    pub(crate) fn add(&mut self, movie: Movie) {
        if let Some(item) = self
            .items
            .iter_mut()
            .find(|item| item.movie.id == movie.id)
        {
            item.set_quantity(item.quantity.saturating_add(1), movie.ticket_price);
        } else {
            self.items.push(CartItem::new(movie));
        }
    }

    /// Removes the line item for `movie_id`; no-op when absent
    pub(crate) fn remove(&mut self, movie_id: &MovieId) {
        self.items.retain(|item| item.movie.id != *movie_id);
    }

    /// Applies a quantity delta to the line item for `movie_id`
    ///
    /// The new quantity is clamped at zero; reaching zero removes the entry
    /// entirely. Other entries and their relative order are untouched.
    /// Unknown ids are a no-op.
    pub(crate) fn update_quantity(&mut self, movie_id: &MovieId, delta: i64) {
        let Some(index) = self
            .items
            .iter()
            .position(|item| item.movie.id == *movie_id)
        else {
            return;
        };

        let item = &mut self.items[index];
        let new_quantity = (i64::from(item.quantity) + delta).clamp(0, i64::from(u32::MAX));

        if new_quantity == 0 {
            self.items.remove(index);
        } else {
            let quantity = u32::try_from(new_quantity).unwrap_or(u32::MAX);
            let price = item.movie.ticket_price;
            item.set_quantity(quantity, price);
        }
    }
}

/// The container-to-cart-surface input bundle
///
/// A read-only snapshot of the cart plus its derived totals, pushed into the
/// cart surface whenever the cart changes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartView {
    /// Line item snapshot, insertion order preserved
    pub items: Vec<CartItem>,
    /// Derived totals for the snapshot
    pub totals: Totals,
}

impl From<&CartState> for CartView {
    fn from(state: &CartState) -> Self {
        Self {
            items: state.items.clone(),
            totals: state.totals(),
        }
    }
}
