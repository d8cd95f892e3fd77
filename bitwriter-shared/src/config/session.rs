use std::time::Duration;

use thiserror::Error;

/// Storage key under which the authenticated session is persisted.
pub const DEFAULT_STORAGE_KEY: &str = "bitwriter.session";

/// Location the client returns to after signing out.
pub const DEFAULT_RELOAD_TARGET: &str = "/";

/// Delay between finishing a logout and reloading the client.
pub const DEFAULT_RELOAD_DELAY: Duration = Duration::from_millis(100);

/// Problems detected while validating a [`SessionConfig`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// No identity provider application id was supplied.
    #[error("identity provider application id is not configured")]
    MissingAppId,
    /// The reload target is not an absolute path.
    #[error("reload target `{0}` must start with `/`")]
    InvalidReloadTarget(String),
}

/// Session bootstrap and logout settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// Identity provider application id.
    pub app_id: Option<String>,
    /// Key used for the persisted session record.
    pub storage_key: String,
    /// Location loaded after logout.
    pub reload_target: String,
    /// How long logout waits before reloading.
    pub reload_delay: Duration,
    /// Whether logout reloads the client once session state is cleared.
    pub reload_on_logout: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            app_id: None,
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            reload_target: DEFAULT_RELOAD_TARGET.to_string(),
            reload_delay: DEFAULT_RELOAD_DELAY,
            reload_on_logout: true,
        }
    }
}

impl SessionConfig {
    /// Create a configuration with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the identity provider application id. Blank values are treated as absent.
    #[must_use]
    pub fn with_app_id(mut self, app_id: Option<impl Into<String>>) -> Self {
        self.app_id = app_id
            .map(Into::into)
            .filter(|value: &String| !value.trim().is_empty());
        self
    }

    /// Override the key used for the persisted session record.
    #[must_use]
    pub fn with_storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }

    /// Disable the reload performed at the end of logout.
    #[must_use]
    pub const fn without_reload(mut self) -> Self {
        self.reload_on_logout = false;
        self
    }

    /// Whether an application id is present.
    #[must_use]
    pub const fn has_app_id(&self) -> bool {
        self.app_id.is_some()
    }

    /// Check the configuration.
    ///
    /// A missing application id is reported but is not fatal to callers: the
    /// client keeps loading and sign-in fails later at the provider.
    ///
    /// # Errors
    /// Returns every problem found.
    pub fn validate(&self) -> Result<(), Vec<ConfigError>> {
        let mut problems = Vec::new();
        if self.app_id.is_none() {
            problems.push(ConfigError::MissingAppId);
        }
        if !self.reload_target.starts_with('/') {
            problems.push(ConfigError::InvalidReloadTarget(self.reload_target.clone()));
        }
        if problems.is_empty() { Ok(()) } else { Err(problems) }
    }
}
