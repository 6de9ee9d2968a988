//! Reducer logic for the cart.
//!
//! The cart is a **pure state machine**: every action mutates the cart
//! snapshot and returns `Effect::None`. This is the one cart-mutation module
//! shared by the catalog app, the cart app, and the booking shell.

use crate::types::{CartState, Movie, MovieId};
use marquee_core::{SmallVec, effect::Effect, environment::Clock, reducer::Reducer, smallvec};
use std::sync::Arc;

/// Cart actions
///
/// These are the user interactions surfaces can raise. Catalog surfaces
/// raise `AddToCart`; cart surfaces raise `RemoveFromCart` and
/// `UpdateQuantity`.
#[derive(Debug, Clone)]
pub enum CartAction {
    /// Add one ticket for the movie (fresh movies insert a new line)
    AddToCart(Movie),
    /// Drop the line item for the movie id (no-op when absent)
    RemoveFromCart(MovieId),
    /// Adjust a line item's quantity by a signed delta
    ///
    /// The resulting quantity is clamped at zero; zero removes the line.
    UpdateQuantity {
        /// Which line item to adjust
        movie_id: MovieId,
        /// Signed ticket count change, magnitude unconstrained
        delta: i64,
    },
}

/// Environment dependencies for the cart reducer
///
/// The clock is included to demonstrate dependency injection; the cart
/// itself is a pure state machine and does not read it.
#[derive(Clone)]
pub struct CartEnvironment {
    /// Clock for time-based operations
    pub clock: Arc<dyn Clock>,
}

impl CartEnvironment {
    /// Creates a new `CartEnvironment`
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }
}

/// Reducer for the cart
///
/// Implements the three cart mutations. All of them are total functions
/// over their input domains - unknown ids are no-ops or fresh inserts and
/// quantities clamp at zero - so there are no error conditions and no
/// panics.
#[derive(Clone, Copy, Debug, Default)]
pub struct CartReducer;

impl CartReducer {
    /// Creates a new `CartReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Reducer for CartReducer {
    type State = CartState;
    type Action = CartAction;
    type Environment = CartEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        _environment: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            CartAction::AddToCart(movie) => {
                state.add(movie);
            },
            CartAction::RemoveFromCart(movie_id) => {
                state.remove(&movie_id);
            },
            CartAction::UpdateQuantity { movie_id, delta } => {
                state.update_quantity(&movie_id, delta);
            },
        }

        // Pure state machine - no side effects
        smallvec![Effect::None]
    }
}
