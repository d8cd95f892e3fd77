use std::time::Duration;

use cookie::Cookie;
use thiserror::Error;
use time::OffsetDateTime;

use crate::models::Location;

/// Failure of a host environment operation.
#[derive(Debug, Error)]
pub enum EnvironmentError {
    /// The named host API does not exist in this environment.
    #[error("browser API is unavailable: {0}")]
    Unavailable(&'static str),
    /// The host API refused the call.
    #[error("browser rejected the operation: {0}")]
    Rejected(String),
}

/// Side effects of the hosting client: location, notices, cookies, reloads.
pub trait ClientEnvironment {
    /// Current navigable location.
    fn location(&self) -> Location;

    /// Replace the visible location without navigating or adding a history
    /// entry.
    ///
    /// # Errors
    /// Returns an error if the history API refuses the replacement.
    fn replace_location(&self, location: &Location) -> Result<(), EnvironmentError>;

    /// Show a blocking, dismissible notice to the user.
    fn notify_failure(&self, message: &str);

    /// Raw `name=value; ...` cookie string visible to the document.
    ///
    /// # Errors
    /// Returns an error if cookies cannot be read.
    fn cookie_header(&self) -> Result<String, EnvironmentError>;

    /// Write one `Set-Cookie`-style string.
    ///
    /// # Errors
    /// Returns an error if the cookie cannot be written.
    fn write_cookie(&self, cookie: &str) -> Result<(), EnvironmentError>;

    /// Reload the client at `target` once `delay` has elapsed.
    fn schedule_reload(&self, target: &str, delay: Duration);
}

/// Names of the cookies in a document cookie string.
#[must_use]
pub fn cookie_names(header: &str) -> Vec<String> {
    header
        .split(';')
        .map(|pair| pair.trim_start().split('=').next().unwrap_or_default().trim())
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

/// A cookie string that expires `name` at the root path.
#[must_use]
pub fn expired_cookie(name: &str) -> String {
    Cookie::build((name.to_string(), ""))
        .path("/")
        .expires(OffsetDateTime::UNIX_EPOCH)
        .build()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cookie_names_are_trimmed() {
        assert_eq!(
            cookie_names("session=abc;  theme=dark; flag"),
            vec!["session", "theme", "flag"]
        );
    }

    #[test]
    fn empty_cookie_header_has_no_names() {
        assert!(cookie_names("").is_empty());
        assert!(cookie_names(" ; ").is_empty());
    }

    #[test]
    fn expired_cookie_targets_root_path_in_the_past() {
        let cookie = expired_cookie("session");
        assert!(cookie.starts_with("session="));
        assert!(cookie.contains("Path=/"));
        assert!(cookie.contains("Expires=Thu, 01 Jan 1970 00:00:00 GMT"));
    }

    #[test]
    fn expired_cookie_parses_back() {
        let parsed = Cookie::parse(expired_cookie("theme")).unwrap();
        assert_eq!(parsed.name(), "theme");
        assert_eq!(parsed.value(), "");
        assert_eq!(parsed.path(), Some("/"));
        assert_eq!(
            parsed.expires_datetime(),
            Some(OffsetDateTime::UNIX_EPOCH)
        );
    }
}
