//! Integration tests for surface acquisition and container wiring
//!
//! Covers independent acquisition attempts, the typed failure for missing
//! surfaces, and the full loop: surface callback → action → store →
//! snapshot → surface inputs.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)] // Test code can use unwrap/expect/panic

use marquee_runtime::Store;
use marquee_storefront::catalog::featured_movies;
use marquee_storefront::reducer::{CartAction, CartEnvironment, CartReducer};
use marquee_storefront::types::{CartState, CartView, MovieId};
use marquee_surfaces::cart::CartSurface;
use marquee_surfaces::catalog::CatalogSurface;
use marquee_surfaces::provider::{
    LocalSurfaceProvider, RegistrySurfaceProvider, SurfaceError, SurfaceHandle, SurfaceKind,
    SurfaceProvider,
};
use marquee_surfaces::{AddToCart, RemoveFromCart, Surface, UpdateQuantity};
use marquee_testing::test_clock;
use std::sync::Arc;
use tokio::sync::mpsc;

fn noop_callbacks() -> (AddToCart, RemoveFromCart, UpdateQuantity) {
    (
        Arc::new(|_movie| {}),
        Arc::new(|_movie_id| {}),
        Arc::new(|_movie_id, _delta| {}),
    )
}

#[tokio::test]
async fn missing_registration_yields_an_actionable_failure() {
    let provider = RegistrySurfaceProvider::new();

    let result = provider.acquire(SurfaceKind::Catalog).await;
    let Err(SurfaceError::Unavailable { kind, hint }) = result else {
        panic!("expected Unavailable for an empty registry");
    };

    assert_eq!(kind, SurfaceKind::Catalog);
    assert!(hint.contains("movie-catalog"));
}

#[tokio::test]
async fn acquisition_attempts_are_independent() {
    let (_, remove, update) = noop_callbacks();

    // Only the cart surface is registered; the catalog remote is "down"
    let provider = RegistrySurfaceProvider::new().register(
        SurfaceKind::Cart,
        Box::new(move || {
            SurfaceHandle::Cart(CartSurface::new(Arc::clone(&remove), Arc::clone(&update)))
        }),
    );

    assert!(provider.acquire(SurfaceKind::Catalog).await.is_err());

    match provider.acquire(SurfaceKind::Cart).await {
        Ok(SurfaceHandle::Cart(surface)) => assert_eq!(surface.name(), "shopping cart"),
        Ok(SurfaceHandle::Catalog(_)) => panic!("asked for a cart, got a catalog"),
        Err(error) => panic!("cart acquisition should not depend on the catalog: {error}"),
    }
}

#[tokio::test]
async fn local_provider_constructs_both_surfaces() {
    let (add, remove, update) = noop_callbacks();
    let provider = LocalSurfaceProvider::new(featured_movies(), add, remove, update);

    let catalog = provider.acquire(SurfaceKind::Catalog).await;
    assert!(matches!(catalog, Ok(SurfaceHandle::Catalog(_))));

    let cart = provider.acquire(SurfaceKind::Cart).await;
    assert!(matches!(cart, Ok(SurfaceHandle::Cart(_))));
}

#[tokio::test]
async fn catalog_purchase_flows_through_the_store_into_the_cart_view() {
    let env = CartEnvironment::new(Arc::new(test_clock()));
    let store = Store::new(CartState::default(), CartReducer::new(), env);

    // Surface callbacks forward actions to the container's store
    let (action_tx, mut action_rx) = mpsc::unbounded_channel();

    let add_tx = action_tx.clone();
    let add: AddToCart = Arc::new(move |movie| {
        let _ = add_tx.send(CartAction::AddToCart(movie));
    });
    let remove_tx = action_tx.clone();
    let remove: RemoveFromCart = Arc::new(move |movie_id| {
        let _ = remove_tx.send(CartAction::RemoveFromCart(movie_id));
    });
    let update_tx = action_tx;
    let update: UpdateQuantity = Arc::new(move |movie_id, delta| {
        let _ = update_tx.send(CartAction::UpdateQuantity { movie_id, delta });
    });

    let catalog = CatalogSurface::new(featured_movies(), add);
    let mut cart_surface = CartSurface::new(remove, update);

    // Two purchases plus a quantity bump from the cart surface
    assert!(catalog.purchase(&MovieId::from("1")));
    assert!(catalog.purchase(&MovieId::from("2")));
    cart_surface.change_quantity(MovieId::from("1"), 1);

    while let Ok(action) = action_rx.try_recv() {
        let _ = store.send(action).await;
    }

    // Container pushes the fresh snapshot into the cart surface
    let view = store.state(|s| CartView::from(s)).await;
    cart_surface.set_inputs(view);

    let rendered = cart_surface.render();
    assert!(rendered.contains("2 x Dune: Part Two - $25.98"));
    assert!(rendered.contains("1 x Oppenheimer - $14.99"));
    assert!(rendered.contains("Subtotal: $40.97"));
}
