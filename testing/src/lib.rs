//! # Marquee Testing
//!
//! Testing utilities and fixtures for the Marquee storefront.
//!
//! This crate provides:
//! - Mock implementations of Environment traits
//! - Storefront fixtures (sample movies, the standalone-mode mock cart)
//!
//! ## Example
//!
//! ```
//! use marquee_testing::{fixtures, test_clock};
//! use marquee_storefront::reducer::CartEnvironment;
//! use std::sync::Arc;
//!
//! let env = CartEnvironment::new(Arc::new(test_clock()));
//! let cart = fixtures::mock_cart(&env);
//! assert_eq!(cart.len(), 2);
//! ```

use chrono::{DateTime, Utc};
use marquee_core::environment::Clock;

/// Mock implementations of Environment traits
pub mod mocks {
    use super::{Clock, DateTime, Utc};

    /// Fixed clock for deterministic tests
    ///
    /// Always returns the same time, making tests reproducible.
    ///
    /// # Example
    ///
    /// ```
    /// use marquee_testing::mocks::FixedClock;
    /// use marquee_core::environment::Clock;
    /// use chrono::Utc;
    ///
    /// let clock = FixedClock::new(Utc::now());
    /// let time1 = clock.now();
    /// let time2 = clock.now();
    /// assert_eq!(time1, time2); // Always the same!
    /// ```
    #[derive(Debug, Clone)]
    pub struct FixedClock {
        time: DateTime<Utc>,
    }

    impl FixedClock {
        /// Create a new fixed clock with the given time
        #[must_use]
        pub const fn new(time: DateTime<Utc>) -> Self {
            Self { time }
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.time
        }
    }

    /// Create a default fixed clock for tests (2025-01-01 00:00:00 UTC)
    ///
    /// # Panics
    ///
    /// This function will panic if the hardcoded timestamp fails to parse,
    /// which should never happen in practice.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn test_clock() -> FixedClock {
        FixedClock::new(
            DateTime::parse_from_rfc3339("2025-01-01T00:00:00Z")
                .expect("hardcoded timestamp should always parse")
                .with_timezone(&Utc),
        )
    }
}

pub use mocks::{FixedClock, test_clock};

/// Storefront fixtures
///
/// Sample movies and carts matching the data the standalone apps ship with,
/// so tests and demos agree on what "the mock cart" looks like.
pub mod fixtures {
    use marquee_core::reducer::Reducer;
    use marquee_storefront::reducer::{CartAction, CartEnvironment, CartReducer};
    use marquee_storefront::types::{CartState, Movie};

    /// First sample movie: Dune: Part Two at 12.99
    #[must_use]
    pub fn dune() -> Movie {
        sample_movie("1")
    }

    /// Second sample movie: Oppenheimer at 14.99
    #[must_use]
    pub fn oppenheimer() -> Movie {
        sample_movie("2")
    }

    /// # Panics
    ///
    /// Panics if the catalog stops carrying the sample movie, which would
    /// invalidate the fixtures anyway.
    #[allow(clippy::expect_used)]
    fn sample_movie(id: &str) -> Movie {
        marquee_storefront::catalog::featured_movies()
            .into_iter()
            .find(|movie| movie.id.as_str() == id)
            .expect("catalog should always carry the sample movies")
    }

    /// The standalone-mode mock cart: Dune ×2 plus Oppenheimer ×1
    ///
    /// Built through the reducer so it satisfies every cart invariant by
    /// construction.
    #[must_use]
    pub fn mock_cart(env: &CartEnvironment) -> CartState {
        let mut cart = CartState::default();
        let reducer = CartReducer::new();

        reducer.reduce(&mut cart, CartAction::AddToCart(dune()), env);
        reducer.reduce(&mut cart, CartAction::AddToCart(dune()), env);
        reducer.reduce(&mut cart, CartAction::AddToCart(oppenheimer()), env);

        cart
    }
}
