//! Standalone movie catalog binary
//!
//! Runs the catalog surface on its own, without a shell. Purchases have no
//! cart to land in, so the add-to-cart callback just logs what would have
//! been dispatched.

use marquee_storefront::catalog::featured_movies;
use marquee_surfaces::catalog::CatalogSurface;
use marquee_surfaces::{AddToCart, Surface};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "movie_catalog=debug,marquee_surfaces=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    println!("=== Movie Catalog (standalone) ===\n");

    // Standalone mode: no cart is mounted, so purchases only log
    let add_to_cart: AddToCart = Arc::new(|movie| {
        tracing::info!(movie = %movie.name, "Add to cart (standalone mode)");
    });

    let catalog = CatalogSurface::new(featured_movies(), add_to_cart);
    println!("{}", catalog.render());

    println!(">>> Buying a ticket for [1]");
    catalog.purchase(&"1".into());

    println!(">>> Buying a ticket for [4]");
    catalog.purchase(&"4".into());

    println!(">>> Buying a ticket for [99] (not in the catalog)");
    catalog.purchase(&"99".into());

    println!("\nRun the booking shell to purchase into a real cart.");
}
