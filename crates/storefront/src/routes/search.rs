//! Search route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Router,
    extract::{Query, State},
    response::IntoResponse,
    routing::get,
};
use serde::Deserialize;
use spicebox_core::Suggestions;
use tracing::instrument;

use crate::state::AppState;

/// Search suggestions query parameters.
#[derive(Debug, Deserialize)]
pub struct SuggestQuery {
    #[serde(default)]
    pub q: String,
}

/// Search suggestions template (HTMX fragment).
#[derive(Template, WebTemplate)]
#[template(path = "partials/suggestions.html")]
pub struct SuggestionsTemplate {
    pub terms: Vec<String>,
    /// Show the "nothing found" placeholder instead of terms.
    pub no_matches: bool,
    pub placeholder: &'static str,
}

impl From<Suggestions> for SuggestionsTemplate {
    fn from(suggestions: Suggestions) -> Self {
        let (terms, no_matches) = match suggestions {
            Suggestions::Hidden => (Vec::new(), false),
            Suggestions::Matches(terms) => (terms, false),
            Suggestions::NoMatches => (Vec::new(), true),
        };
        Self {
            terms,
            no_matches,
            placeholder: Suggestions::NO_MATCHES,
        }
    }
}

/// Search suggestions endpoint (HTMX).
///
/// Returns the matching featured terms as list items; an empty query
/// clears the list.
#[instrument(skip(state))]
pub async fn suggest(
    State(state): State<AppState>,
    Query(query): Query<SuggestQuery>,
) -> impl IntoResponse {
    let suggestions = Suggestions::for_query(&query.q, &state.catalog().featured_terms);
    tracing::debug!(?suggestions, "Search suggestions");
    SuggestionsTemplate::from(suggestions)
}

/// Create the search routes router.
pub fn router() -> Router<AppState> {
    Router::new().route("/suggest", get(suggest))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_from_suggestions() {
        let hidden = SuggestionsTemplate::from(Suggestions::Hidden);
        assert!(hidden.terms.is_empty());
        assert!(!hidden.no_matches);

        let none = SuggestionsTemplate::from(Suggestions::NoMatches);
        assert!(none.no_matches);
        assert_eq!(none.placeholder, "No products found.");

        let some = SuggestionsTemplate::from(Suggestions::Matches(vec!["cumin".to_string()]));
        assert_eq!(some.terms, ["cumin"]);
    }
}
