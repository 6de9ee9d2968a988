//! Surface acquisition.
//!
//! Containers do not construct their child surfaces directly; they ask a
//! [`SurfaceProvider`] for them by kind. The concrete loading mechanism -
//! in-process construction, a registry standing in for a remote deployable,
//! anything else - is an implementation detail behind the trait.
//!
//! Acquisition is a single attempt with no retry, timeout, or cancellation:
//! it either yields a bindable handle or a typed failure the container can
//! show in place of that surface.

use crate::cart::CartSurface;
use crate::catalog::CatalogSurface;
use async_trait::async_trait;
use std::collections::HashMap;
use thiserror::Error;

use crate::{AddToCart, RemoveFromCart, UpdateQuantity};
use marquee_storefront::types::Movie;

/// The kinds of surface a container can request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SurfaceKind {
    /// The movie catalog view
    Catalog,
    /// The shopping cart view
    Cart,
}

impl std::fmt::Display for SurfaceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Catalog => write!(f, "movie catalog"),
            Self::Cart => write!(f, "shopping cart"),
        }
    }
}

/// Failure to acquire a surface
///
/// The only error class in the storefront. Containers catch it locally,
/// show the hint in place of the missing surface, and keep running.
#[derive(Error, Debug)]
pub enum SurfaceError {
    /// The requested surface is not available from this provider
    #[error("{kind} failed to load. {hint}")]
    Unavailable {
        /// Which surface could not be acquired
        kind: SurfaceKind,
        /// Actionable advice for the operator (how to start the missing
        /// deployable)
        hint: String,
    },
}

/// A successfully acquired, bindable surface
///
/// Callbacks are bound at construction; the cart handle additionally takes
/// pushed inputs via `set_inputs`. Either way, `render` forces a pass.
pub enum SurfaceHandle {
    /// The catalog view
    Catalog(CatalogSurface),
    /// The cart view
    Cart(CartSurface),
}

/// Pluggable source of surfaces
///
/// One method: acquire a named surface, yielding a bindable handle or a
/// typed failure. Each acquisition is independent - a failed catalog must
/// not prevent a cart from loading, and vice versa.
#[async_trait]
pub trait SurfaceProvider: Send + Sync {
    /// Acquire the surface of the given kind
    ///
    /// # Errors
    ///
    /// Returns [`SurfaceError::Unavailable`] when this provider cannot
    /// supply the requested surface.
    async fn acquire(&self, kind: SurfaceKind) -> Result<SurfaceHandle, SurfaceError>;
}

/// Constructor for one surface, registered under its kind
pub type SurfaceFactory = Box<dyn Fn() -> SurfaceHandle + Send + Sync>;

/// Provider backed by a name-keyed factory registry
///
/// Stands in for runtime module federation: each separately-deployed
/// surface registers a factory under its kind, and the shell acquires by
/// name at startup. A missing registration behaves exactly like an
/// unreachable remote - a typed failure with operator advice.
#[derive(Default)]
pub struct RegistrySurfaceProvider {
    factories: HashMap<SurfaceKind, SurfaceFactory>,
}

impl RegistrySurfaceProvider {
    /// Creates an empty registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the factory for a surface kind, replacing any previous one
    #[must_use]
    pub fn register(mut self, kind: SurfaceKind, factory: SurfaceFactory) -> Self {
        self.factories.insert(kind, factory);
        self
    }

    fn start_hint(kind: SurfaceKind) -> String {
        match kind {
            SurfaceKind::Catalog => {
                String::from("Start the remote: cargo run -p movie-catalog")
            },
            SurfaceKind::Cart => String::from("Start the remote: cargo run -p shopping-cart"),
        }
    }
}

#[async_trait]
impl SurfaceProvider for RegistrySurfaceProvider {
    #[tracing::instrument(skip(self), name = "registry_acquire")]
    async fn acquire(&self, kind: SurfaceKind) -> Result<SurfaceHandle, SurfaceError> {
        match self.factories.get(&kind) {
            Some(factory) => {
                tracing::info!(%kind, "Surface acquired from registry");
                Ok(factory())
            },
            None => {
                tracing::error!(%kind, "Surface not registered");
                Err(SurfaceError::Unavailable {
                    kind,
                    hint: Self::start_hint(kind),
                })
            },
        }
    }
}

/// Provider that constructs both surfaces in-process
///
/// The combined single-app variant: no registry, no failure modes, the
/// same surfaces compiled into the same deployable.
pub struct LocalSurfaceProvider {
    movies: Vec<Movie>,
    add_to_cart: AddToCart,
    remove_from_cart: RemoveFromCart,
    update_quantity: UpdateQuantity,
}

impl LocalSurfaceProvider {
    /// Creates a local provider over the given movie list and container
    /// callbacks
    #[must_use]
    pub fn new(
        movies: Vec<Movie>,
        add_to_cart: AddToCart,
        remove_from_cart: RemoveFromCart,
        update_quantity: UpdateQuantity,
    ) -> Self {
        Self {
            movies,
            add_to_cart,
            remove_from_cart,
            update_quantity,
        }
    }
}

#[async_trait]
impl SurfaceProvider for LocalSurfaceProvider {
    #[tracing::instrument(skip(self), name = "local_acquire")]
    async fn acquire(&self, kind: SurfaceKind) -> Result<SurfaceHandle, SurfaceError> {
        tracing::info!(%kind, "Surface constructed in-process");
        match kind {
            SurfaceKind::Catalog => Ok(SurfaceHandle::Catalog(CatalogSurface::new(
                self.movies.clone(),
                std::sync::Arc::clone(&self.add_to_cart),
            ))),
            SurfaceKind::Cart => Ok(SurfaceHandle::Cart(CartSurface::new(
                std::sync::Arc::clone(&self.remove_from_cart),
                std::sync::Arc::clone(&self.update_quantity),
            ))),
        }
    }
}
