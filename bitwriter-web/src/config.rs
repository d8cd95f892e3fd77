//! Frontend configuration module
//!
//! This module provides the identity provider and document service settings
//! baked into the client at build time.

use shared::SessionConfig;
use url::form_urlencoded;

const DEFAULT_AUTHORIZE_URL: &str = "https://app.handcash.io/#/authorizeApp";
const DEFAULT_PROFILE_URL: &str =
    "https://cloud.handcash.io/v1/connect/profile/currentUserProfile";
const DEFAULT_DOCUMENTS_URL: &str = "/api/documents";

/// Frontend configuration for the identity provider and document service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrontendConfig {
    /// HandCash application id
    pub app_id: Option<String>,
    /// Page users are sent to in order to authorize the app
    pub authorize_url: String,
    /// Endpoint resolving a token into the user's public profile
    pub profile_url: String,
    /// Base URL of the document service
    pub documents_url: String,
}

impl Default for FrontendConfig {
    fn default() -> Self {
        Self {
            app_id: option_env!("BITWRITER_HANDCASH_APP_ID")
                .filter(|value| !value.trim().is_empty())
                .map(str::to_string),
            authorize_url: option_env!("BITWRITER_HANDCASH_AUTHORIZE_URL")
                .unwrap_or(DEFAULT_AUTHORIZE_URL)
                .to_string(),
            profile_url: option_env!("BITWRITER_HANDCASH_PROFILE_URL")
                .unwrap_or(DEFAULT_PROFILE_URL)
                .to_string(),
            documents_url: option_env!("BITWRITER_DOCUMENTS_API_URL")
                .unwrap_or(DEFAULT_DOCUMENTS_URL)
                .to_string(),
        }
    }
}

impl FrontendConfig {
    /// Create a new frontend configuration instance
    pub fn new() -> Self {
        Self::default()
    }

    /// Session settings derived from this configuration
    pub fn session_config(&self) -> SessionConfig {
        SessionConfig::new().with_app_id(self.app_id.clone())
    }

    /// URL that starts the HandCash sign-in flow, if an app id is configured
    pub fn login_url(&self) -> Option<String> {
        let app_id = self.app_id.as_deref()?;
        let encoded: String = form_urlencoded::byte_serialize(app_id.as_bytes()).collect();
        let separator = if self.authorize_url.contains('?') { '&' } else { '?' };
        Some(format!("{}{separator}appId={encoded}", self.authorize_url))
    }
}
