//! Query-string seeding of the initial selection.
//!
//! Detail pages are opened with a single pre-selected value, e.g.
//! `directors.html?director=Steven%20Spielberg`. The value replaces the
//! default top-N selection.

use serde::Deserialize;

use crate::core::domain::Dimension;

#[derive(Debug, Default, Deserialize)]
struct SeedParams {
    genre: Option<String>,
    director: Option<String>,
    actor: Option<String>,
}

/// Extract the seeded category for `dimension` from a query string.
///
/// A leading `?` or a full URL are accepted. Returns `None` when the
/// parameter is absent, blank, or the query cannot be decoded.
///
/// # Examples
///
/// ```
/// use movie_dash::core::domain::Dimension;
/// use movie_dash::parsing::query::seed_from_query;
///
/// let seed = seed_from_query("?director=Steven%20Spielberg", Dimension::Director);
/// assert_eq!(seed.as_deref(), Some("Steven Spielberg"));
/// assert_eq!(seed_from_query("?director=X", Dimension::Actor), None);
/// ```
pub fn seed_from_query(query: &str, dimension: Dimension) -> Option<String> {
    let query = match query.split_once('?') {
        Some((_, q)) => q,
        None => query,
    };

    let params = match serde_urlencoded::from_str::<SeedParams>(query) {
        Ok(params) => params,
        Err(e) => {
            log::warn!("Ignoring undecodable query string '{}': {}", query, e);
            return None;
        }
    };

    let value = match dimension {
        Dimension::Genre => params.genre,
        Dimension::Director => params.director,
        Dimension::Actor => params.actor,
    }?;

    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}
