//! The movie catalog surface.
//!
//! Lists the purchasable movies and raises `add_to_cart` upward when a user
//! buys a ticket. The catalog never touches cart state.

use crate::{AddToCart, Surface, format};
use marquee_storefront::types::{Movie, MovieId};

/// The catalog view: a movie list plus the add-to-cart callback handle
pub struct CatalogSurface {
    movies: Vec<Movie>,
    add_to_cart: AddToCart,
}

impl CatalogSurface {
    /// Creates a catalog surface over `movies`, bound to the container's
    /// add-to-cart callback
    #[must_use]
    pub fn new(movies: Vec<Movie>, add_to_cart: AddToCart) -> Self {
        Self {
            movies,
            add_to_cart,
        }
    }

    /// The movies on display
    #[must_use]
    pub fn movies(&self) -> &[Movie] {
        &self.movies
    }

    /// A user buys a ticket for `movie_id`
    ///
    /// Raises the add-to-cart callback with a clone of the matching movie.
    /// Returns `false` (and raises nothing) for ids not in this catalog.
    pub fn purchase(&self, movie_id: &MovieId) -> bool {
        let Some(movie) = self.movies.iter().find(|movie| movie.id == *movie_id) else {
            tracing::warn!(%movie_id, "Purchase requested for a movie not in the catalog");
            return false;
        };

        tracing::debug!(movie = %movie.name, "Raising add-to-cart");
        (self.add_to_cart)(movie.clone());
        true
    }
}

impl Surface for CatalogSurface {
    fn name(&self) -> &'static str {
        "movie catalog"
    }

    fn render(&self) -> String {
        let mut out = String::from("Now Showing\n");
        for movie in &self.movies {
            out.push_str(&format!(
                "  [{}] {} ({}) - {}\n",
                movie.id,
                movie.name,
                movie.release_date.format("%b %-d, %Y"),
                format::cad(movie.ticket_price),
            ));
        }
        out
    }
}
