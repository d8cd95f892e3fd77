//! Bearer token discovery in redirect locations.
//!
//! The identity provider hands the token back on a redirect, but the parameter
//! name and its position (query or fragment) vary. Every recognised alias is
//! checked in a fixed order so that a redirect carrying several of them always
//! resolves to the same token.

use url::form_urlencoded;

use crate::models::SessionToken;

/// Recognised token parameter names, highest priority first.
pub const TOKEN_ALIASES: [&str; 4] = ["authToken", "auth_token", "access_token", "token"];

/// Find the bearer token in a location's query and fragment.
///
/// The query is searched first using [`TOKEN_ALIASES`] order, then the
/// fragment with the same order. Empty values are skipped. One leading `?`
/// on the query and one leading `#` on the fragment are ignored.
#[must_use]
pub fn extract_token(query: &str, fragment: &str) -> Option<SessionToken> {
    find_token(strip_marker(query, '?'), strip_marker(fragment, '#'))
}

/// Same search over components whose `?` / `#` marker is already removed.
///
/// A fragment may still open with `?` (`#?authToken=...`); that is dropped the
/// way `URLSearchParams` drops it.
pub(crate) fn find_token(query: &str, fragment: &str) -> Option<SessionToken> {
    find_alias(query).or_else(|| find_alias(strip_marker(fragment, '?')))
}

/// Names of the parameters in a query-string-like component.
#[must_use]
pub fn parameter_names(component: &str) -> Vec<String> {
    form_urlencoded::parse(component.as_bytes())
        .map(|(name, _)| name.into_owned())
        .collect()
}

/// Whether a component carries any token alias, empty or not.
#[must_use]
pub fn has_token_parameter(component: &str) -> bool {
    form_urlencoded::parse(component.as_bytes())
        .any(|(name, _)| TOKEN_ALIASES.iter().any(|alias| *alias == name))
}

fn strip_marker(component: &str, marker: char) -> &str {
    component.strip_prefix(marker).unwrap_or(component)
}

fn find_alias(component: &str) -> Option<SessionToken> {
    if component.is_empty() {
        return None;
    }
    let pairs: Vec<_> = form_urlencoded::parse(component.as_bytes()).collect();
    TOKEN_ALIASES.iter().find_map(|alias| {
        // first occurrence of a name wins, as with URLSearchParams::get
        pairs
            .iter()
            .find(|(name, _)| name == alias)
            .map(|(_, value)| value)
            .filter(|value| !value.is_empty())
            .map(|value| SessionToken::new(value.to_string()))
    })
}
