//! Search-as-you-type suggestions over the featured product terms.

/// Suggestions for a query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Suggestions {
    /// Nothing typed; the list is hidden.
    Hidden,
    /// Terms containing the query, in catalog order.
    Matches(Vec<String>),
    /// Something typed but nothing matched.
    NoMatches,
}

impl Suggestions {
    /// Placeholder shown when nothing matches.
    pub const NO_MATCHES: &'static str = "No products found.";

    /// Substring-match `query` (case-insensitive) against `terms`.
    #[must_use]
    pub fn for_query(query: &str, terms: &[String]) -> Self {
        let query = query.to_lowercase();
        if query.is_empty() {
            return Self::Hidden;
        }

        let matches: Vec<String> = terms
            .iter()
            .filter(|term| term.to_lowercase().contains(&query))
            .cloned()
            .collect();

        if matches.is_empty() {
            Self::NoMatches
        } else {
            Self::Matches(matches)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;

    fn terms() -> Vec<String> {
        Catalog::builtin().featured_terms
    }

    #[test]
    fn test_empty_query_hides_list() {
        assert_eq!(Suggestions::for_query("", &terms()), Suggestions::Hidden);
    }

    #[test]
    fn test_substring_match_keeps_order() {
        assert_eq!(
            Suggestions::for_query("CI", &terms()),
            Suggestions::Matches(vec!["cinnamon".to_owned()])
        );
        assert_eq!(
            Suggestions::for_query("r", &terms()),
            Suggestions::Matches(vec![
                "rice".to_owned(),
                "flour".to_owned(),
                "turmeric".to_owned(),
            ])
        );
    }

    #[test]
    fn test_whitespace_is_part_of_query() {
        assert_eq!(
            Suggestions::for_query("o p", &terms()),
            Suggestions::Matches(vec!["combo pack".to_owned()])
        );
    }

    #[test]
    fn test_no_matches() {
        assert_eq!(
            Suggestions::for_query("saffron", &terms()),
            Suggestions::NoMatches
        );
    }
}
