//! Pure live-filter matching.
//!
//! Decides which article cards are visible for a given query. Rendering the
//! result is the view layer's job; this module never touches the terminal,
//! which keeps the matching logic unit-testable on its own.

use crate::library::Article;

/// Check whether a single card matches the query.
///
/// Matching is case-insensitive substring containment against the title OR
/// the body. The empty query matches every card, so clearing the search
/// restores full visibility.
pub fn card_matches(query: &str, title: &str, body: &str) -> bool {
    let query = query.to_lowercase();
    title.to_lowercase().contains(&query) || body.to_lowercase().contains(&query)
}

/// Recompute the visible set from scratch for the given query.
///
/// Returns indices into `articles` in their original order. Every call
/// re-evaluates every card; there is no index and no caching.
pub fn visible_indices(query: &str, articles: &[Article]) -> Vec<usize> {
    articles
        .iter()
        .enumerate()
        .filter(|(_, article)| card_matches(query, &article.title, &article.body))
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(title: &str, body: &str) -> Article {
        Article {
            title: title.to_string(),
            body: body.to_string(),
            category: "Uncategorized".to_string(),
            date: None,
        }
    }

    #[test]
    fn test_title_match() {
        assert!(card_matches("rust", "Rust Tips", "ownership"));
        assert!(!card_matches("rust", "Go Basics", "intro"));
    }

    #[test]
    fn test_body_match() {
        assert!(card_matches("owner", "Rust Tips", "ownership"));
    }

    #[test]
    fn test_case_insensitive() {
        assert!(card_matches("RUST", "rust tips", "ownership"));
        assert!(card_matches("TiPs", "Rust Tips", ""));
    }

    #[test]
    fn test_empty_query_matches_everything() {
        assert!(card_matches("", "Anything", "at all"));
        assert!(card_matches("", "", ""));
    }

    #[test]
    fn test_visible_indices() {
        let cards = vec![card("Go Basics", "intro"), card("Rust Tips", "ownership")];

        assert_eq!(visible_indices("rust", &cards), vec![1]);
        assert_eq!(visible_indices("intro", &cards), vec![0]);
        assert_eq!(visible_indices("", &cards), vec![0, 1]);
        assert!(visible_indices("elixir", &cards).is_empty());
    }

    #[test]
    fn test_visible_indices_preserve_order() {
        let cards = vec![
            card("Soil pH", "acidity basics"),
            card("Irrigation", "drip systems"),
            card("Soil drainage", "water tables"),
        ];
        assert_eq!(visible_indices("soil", &cards), vec![0, 2]);
    }
}
