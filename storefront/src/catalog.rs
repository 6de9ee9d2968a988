//! The fixed list of featured movies.
//!
//! The catalog owns these records; carts only ever hold clones of them.

use crate::types::Movie;
use chrono::NaiveDate;
use rust_decimal_macros::dec;

/// A hardcoded, always-valid release date
#[allow(clippy::expect_used)]
fn release_date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("hardcoded release date should always be valid")
}

/// The movies currently on sale
///
/// Returns a fresh owned list; the catalog surface and tests each take
/// their own copy.
#[must_use]
pub fn featured_movies() -> Vec<Movie> {
    vec![
        Movie::new(
            "1",
            "Dune: Part Two",
            "https://picsum.photos/seed/movie1/400/225",
            release_date(2024, 3, 1),
            dec!(12.99),
        ),
        Movie::new(
            "2",
            "Oppenheimer",
            "https://picsum.photos/seed/movie2/400/225",
            release_date(2023, 7, 21),
            dec!(14.99),
        ),
        Movie::new(
            "3",
            "The Batman",
            "https://picsum.photos/seed/movie3/400/225",
            release_date(2022, 3, 4),
            dec!(11.99),
        ),
        Movie::new(
            "4",
            "Spider-Man: No Way Home",
            "https://picsum.photos/seed/movie4/400/225",
            release_date(2021, 12, 17),
            dec!(13.99),
        ),
        Movie::new(
            "5",
            "Top Gun: Maverick",
            "https://picsum.photos/seed/movie5/400/225",
            release_date(2022, 5, 27),
            dec!(12.49),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn catalog_lists_five_movies() {
        assert_eq!(featured_movies().len(), 5);
    }

    #[test]
    fn catalog_ids_are_unique() {
        let movies = featured_movies();
        let ids: HashSet<&str> = movies.iter().map(|movie| movie.id.as_str()).collect();
        assert_eq!(ids.len(), movies.len());
    }

    #[test]
    fn ticket_prices_are_positive() {
        for movie in featured_movies() {
            assert!(movie.ticket_price > rust_decimal::Decimal::ZERO);
        }
    }
}
