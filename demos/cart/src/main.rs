//! Standalone shopping cart binary
//!
//! Runs the cart surface on its own, backed by a local store seeded with a
//! mock cart. The surface raises remove and update-quantity callbacks; the
//! container forwards them to the store and pushes each fresh snapshot back
//! into the surface.

use marquee_runtime::Store;
use marquee_storefront::reducer::{CartAction, CartEnvironment, CartReducer};
use marquee_storefront::types::{CartState, CartView, MovieId};
use marquee_surfaces::cart::CartSurface;
use marquee_surfaces::{RemoveFromCart, Surface, UpdateQuantity};
use marquee_testing::{fixtures, test_clock};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

type CartStore = Store<CartState, CartAction, CartEnvironment, CartReducer>;

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "shopping_cart=debug,marquee_runtime=info,marquee_surfaces=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    println!("=== Shopping Cart (standalone) ===\n");

    // Standalone mode: seed the store with the mock cart
    let env = CartEnvironment::new(Arc::new(test_clock()));
    let seeded = fixtures::mock_cart(&env);
    let store = Store::new(seeded, CartReducer::new(), env);

    // Surface callbacks forward actions into the store
    let (action_tx, mut action_rx) = mpsc::unbounded_channel();

    let remove_tx = action_tx.clone();
    let remove: RemoveFromCart = Arc::new(move |movie_id| {
        let _ = remove_tx.send(CartAction::RemoveFromCart(movie_id));
    });
    let update_tx = action_tx;
    let update: UpdateQuantity = Arc::new(move |movie_id, delta| {
        let _ = update_tx.send(CartAction::UpdateQuantity { movie_id, delta });
    });

    let mut surface = CartSurface::new(remove, update);
    sync_view(&store, &mut surface).await;
    println!("{}", surface.render());

    println!(">>> Removing Oppenheimer");
    surface.remove(MovieId::from("2"));
    pump(&store, &mut action_rx, &mut surface).await;

    println!(">>> One fewer Dune: Part Two ticket");
    surface.change_quantity(MovieId::from("1"), -1);
    pump(&store, &mut action_rx, &mut surface).await;

    println!(">>> Three more Dune: Part Two tickets");
    surface.change_quantity(MovieId::from("1"), 3);
    pump(&store, &mut action_rx, &mut surface).await;

    println!(">>> Dropping the last line to zero");
    surface.change_quantity(MovieId::from("1"), -4);
    pump(&store, &mut action_rx, &mut surface).await;
}

/// Drains raised actions into the store, then re-renders the surface
async fn pump(
    store: &CartStore,
    action_rx: &mut mpsc::UnboundedReceiver<CartAction>,
    surface: &mut CartSurface,
) {
    while let Ok(action) = action_rx.try_recv() {
        let _ = store.send(action).await;
    }
    sync_view(store, surface).await;
    println!("{}", surface.render());
}

/// Pushes the current snapshot into the surface
async fn sync_view(store: &CartStore, surface: &mut CartSurface) {
    let view = store.state(|s| CartView::from(s)).await;
    surface.set_inputs(view);
}
