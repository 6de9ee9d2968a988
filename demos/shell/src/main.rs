//! Booking shell binary
//!
//! The composition root: owns the cart store, acquires the catalog and cart
//! surfaces from a registry provider, wires their callbacks into the store,
//! and pushes every fresh snapshot back into the cart surface.
//!
//! Each surface is acquired independently. When one is missing the shell
//! shows the failure hint in its place and keeps running with whatever
//! loaded. Pass `--without-catalog` or `--without-cart` to simulate a
//! remote that is down.

use marquee_runtime::Store;
use marquee_storefront::catalog::featured_movies;
use marquee_storefront::reducer::{CartAction, CartEnvironment, CartReducer};
use marquee_storefront::types::{CartState, CartView, MovieId};
use marquee_surfaces::cart::CartSurface;
use marquee_surfaces::catalog::CatalogSurface;
use marquee_surfaces::provider::{
    RegistrySurfaceProvider, SurfaceHandle, SurfaceKind, SurfaceProvider,
};
use marquee_surfaces::{AddToCart, RemoveFromCart, Surface, UpdateQuantity};
use marquee_testing::test_clock;
use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

type CartStore = Store<CartState, CartAction, CartEnvironment, CartReducer>;

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "booking_shell=debug,marquee_runtime=info,marquee_surfaces=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    println!("=== Marquee Booking Shell ===\n");

    // The shell owns the single cart store
    let env = CartEnvironment::new(Arc::new(test_clock()));
    let store = Store::new(CartState::default(), CartReducer::new(), env);

    // Surface callbacks forward actions into the shell's store
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

    let provider = build_provider(add, remove, update);

    // Acquire each surface independently; a missing one degrades, it does
    // not abort the shell
    let catalog = match provider.acquire(SurfaceKind::Catalog).await {
        Ok(SurfaceHandle::Catalog(surface)) => Some(surface),
        Ok(SurfaceHandle::Cart(_)) => None,
        Err(error) => {
            tracing::error!(%error, "Catalog surface unavailable");
            println!("[!] {error}\n");
            None
        },
    };
    let mut cart = match provider.acquire(SurfaceKind::Cart).await {
        Ok(SurfaceHandle::Cart(surface)) => Some(surface),
        Ok(SurfaceHandle::Catalog(_)) => None,
        Err(error) => {
            tracing::error!(%error, "Cart surface unavailable");
            println!("[!] {error}\n");
            None
        },
    };

    // Redraws are driven by the store's snapshot subscription
    let mut snapshots = store.subscribe();

    if let Some(catalog) = &catalog {
        println!("{}", catalog.render());
    }
    render_cart(&mut snapshots, &mut cart);

    // A scripted booking session
    if let Some(catalog) = &catalog {
        println!(">>> Buying two Dune: Part Two tickets and one Oppenheimer");
        catalog.purchase(&MovieId::from("1"));
        catalog.purchase(&MovieId::from("1"));
        catalog.purchase(&MovieId::from("2"));
        drain_actions(&store, &mut action_rx).await;
        render_cart(&mut snapshots, &mut cart);
    }

    if let Some(surface) = cart.as_ref() {
        println!(">>> One more Dune: Part Two from the cart, then dropping Oppenheimer");
        surface.change_quantity(MovieId::from("1"), 1);
        surface.remove(MovieId::from("2"));
    }
    drain_actions(&store, &mut action_rx).await;
    render_cart(&mut snapshots, &mut cart);

    let line_count = snapshots.borrow().len();
    println!("Session complete: {line_count} line item(s) in the cart.");
}

/// Builds the surface registry, skipping kinds named on the command line
///
/// A skipped registration behaves exactly like an unreachable remote.
fn build_provider(
    add: AddToCart,
    remove: RemoveFromCart,
    update: UpdateQuantity,
) -> RegistrySurfaceProvider {
    let skip_catalog = std::env::args().any(|arg| arg == "--without-catalog");
    let skip_cart = std::env::args().any(|arg| arg == "--without-cart");

    let mut provider = RegistrySurfaceProvider::new();
    if !skip_catalog {
        provider = provider.register(
            SurfaceKind::Catalog,
            Box::new(move || {
                SurfaceHandle::Catalog(CatalogSurface::new(featured_movies(), Arc::clone(&add)))
            }),
        );
    }
    if !skip_cart {
        provider = provider.register(
            SurfaceKind::Cart,
            Box::new(move || {
                SurfaceHandle::Cart(CartSurface::new(Arc::clone(&remove), Arc::clone(&update)))
            }),
        );
    }
    provider
}

/// Forwards every raised action into the store
async fn drain_actions(store: &CartStore, action_rx: &mut mpsc::UnboundedReceiver<CartAction>) {
    while let Ok(action) = action_rx.try_recv() {
        let _ = store.send(action).await;
    }
}

/// Pushes the latest subscribed snapshot into the cart surface and renders it
fn render_cart(snapshots: &mut watch::Receiver<CartState>, cart: &mut Option<CartSurface>) {
    if let Some(surface) = cart {
        let view = CartView::from(&*snapshots.borrow_and_update());
        surface.set_inputs(view);
        println!("{}", surface.render());
    }
}
