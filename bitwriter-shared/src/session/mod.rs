//! Session lifecycle: token discovery, persistence, bootstrap and logout.

/// Bootstrap, logout and the state they drive.
pub mod context;
/// Document service seam.
pub mod documents;
/// Host environment seam: location, notices, cookies, reloads.
pub mod environment;
pub mod provider;
/// Two-tier key-value persistence of the session record.
pub mod store;
pub mod token;

#[cfg(test)]
pub(crate) mod testing;

pub use context::{
    AUTH_FAILURE_NOTICE, BootstrapOutcome, LogoutReport, LogoutStep, SessionContext, SessionError,
};
pub use documents::{
    DocumentService, DocumentServiceError, DocumentServiceFactory, DocumentServiceHandle,
};
pub use environment::{ClientEnvironment, EnvironmentError, cookie_names, expired_cookie};
pub use provider::{ExchangeError, IdentityProvider};
pub use store::{KeyValueStore, MemoryStore, SessionStore, StorageTier, StoreError};
pub use token::{TOKEN_ALIASES, extract_token};
