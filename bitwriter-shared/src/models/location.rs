use std::fmt;

use url::Url;

use super::SessionToken;
use crate::session::token::{find_token, parameter_names};

/// The navigable location of the client, split into the parts the session
/// layer cares about.
///
/// `query` and `fragment` are stored without their leading `?` / `#`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    path: String,
    query: String,
    fragment: String,
}

impl Default for Location {
    fn default() -> Self {
        Self::new("/", "", "")
    }
}

impl Location {
    /// Build a location from the raw `pathname`, `search`, and `hash` values a
    /// browser reports.
    pub fn new(path: impl Into<String>, query: &str, fragment: &str) -> Self {
        let path = path.into();
        Self {
            path: if path.is_empty() { "/".to_string() } else { path },
            query: query.strip_prefix('?').unwrap_or(query).to_string(),
            fragment: fragment.strip_prefix('#').unwrap_or(fragment).to_string(),
        }
    }

    /// Parse an absolute URL.
    ///
    /// # Errors
    /// Returns the parse error for malformed input.
    pub fn parse(href: &str) -> Result<Self, url::ParseError> {
        let url = Url::parse(href)?;
        // `Url` already removed the markers
        Ok(Self {
            path: url.path().to_string(),
            query: url.query().unwrap_or_default().to_string(),
            fragment: url.fragment().unwrap_or_default().to_string(),
        })
    }

    /// Path component, always starting with `/`.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Query without its leading `?`.
    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Fragment without its leading `#`.
    #[must_use]
    pub fn fragment(&self) -> &str {
        &self.fragment
    }

    /// Bearer token carried by this location, if any.
    ///
    /// The markers were removed once in [`Location::new`]; they are not
    /// stripped again here.
    #[must_use]
    pub fn token(&self) -> Option<SessionToken> {
        find_token(&self.query, &self.fragment)
    }

    /// The same location reduced to its path, dropping every query and
    /// fragment parameter.
    #[must_use]
    pub fn scrubbed(&self) -> Self {
        Self::new(self.path.clone(), "", "")
    }

    /// Parameter names (never values) in the query and fragment.
    #[must_use]
    pub fn parameter_names(&self) -> (Vec<String>, Vec<String>) {
        (parameter_names(&self.query), parameter_names(&self.fragment))
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path)?;
        if !self.query.is_empty() {
            write!(f, "?{}", self.query)?;
        }
        if !self.fragment.is_empty() {
            write!(f, "#{}", self.fragment)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::token::extract_token;

    #[test]
    fn new_strips_leading_markers() {
        let location = Location::new("/editor", "?a=1", "#b=2");
        assert_eq!(location.query(), "a=1");
        assert_eq!(location.fragment(), "b=2");
        assert_eq!(location.to_string(), "/editor?a=1#b=2");
    }

    #[test]
    fn empty_path_defaults_to_root() {
        assert_eq!(Location::new("", "", "").path(), "/");
    }

    #[test]
    fn parse_splits_url_components() {
        let location =
            Location::parse("https://writer.example/auth/handcash/callback?authToken=abc#x=1")
                .unwrap();
        assert_eq!(location.path(), "/auth/handcash/callback");
        assert_eq!(location.query(), "authToken=abc");
        assert_eq!(location.fragment(), "x=1");
    }

    #[test]
    fn parse_rejects_relative_input() {
        assert!(Location::parse("/relative/only").is_err());
    }

    #[test]
    fn scrubbed_location_keeps_only_path() {
        let location = Location::new("/auth/handcash/callback", "authToken=abc&x=1", "token=t");
        let scrubbed = location.scrubbed();
        assert_eq!(scrubbed.to_string(), "/auth/handcash/callback");
        assert!(scrubbed.token().is_none());
    }

    fn token_of(fragment: &str) -> Option<String> {
        Location::new("/", "", fragment)
            .token()
            .map(|token| token.as_str().to_string())
    }

    #[test]
    fn token_strips_exactly_one_hash() {
        assert_eq!(token_of("#token=x").as_deref(), Some("x"));
        assert_eq!(token_of("##token=x"), None);
    }

    #[test]
    fn token_accepts_query_marker_inside_fragment() {
        assert_eq!(token_of("#?authToken=x").as_deref(), Some("x"));
    }

    #[test]
    fn token_agrees_with_extract_token() {
        for (query, fragment) in [
            ("?authToken=a", "#token=b"),
            ("", "##token=x"),
            ("", "#?authToken=x"),
            ("??token=q", ""),
            ("?ref=1", "#access_token=f"),
        ] {
            assert_eq!(
                Location::new("/", query, fragment).token(),
                extract_token(query, fragment),
                "query {query:?} fragment {fragment:?}"
            );
        }
    }

    #[test]
    fn parse_finds_token_in_fragment() {
        let location = Location::parse("https://writer.example/#?authToken=abc").unwrap();
        assert_eq!(location.token(), Some(SessionToken::new("abc")));
    }

    #[test]
    fn parse_keeps_a_doubled_hash() {
        let location = Location::parse("https://writer.example/##token=x").unwrap();
        assert_eq!(location.fragment(), "#token=x");
        assert_eq!(location.token(), None);
    }

    #[test]
    fn parameter_names_do_not_include_values() {
        let location = Location::new("/", "authToken=secret&ref=home", "state=xyz");
        let (query, fragment) = location.parameter_names();
        assert_eq!(query, vec!["authToken", "ref"]);
        assert_eq!(fragment, vec!["state"]);
    }
}
