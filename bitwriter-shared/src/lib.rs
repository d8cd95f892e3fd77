//! Session core of the Bitcoin Writer client.
//!
//! Platform-independent models, redirect token discovery, session persistence
//! and the [`SessionContext`] that bootstraps and tears down a signed-in
//! session. Browser bindings live in the web crate.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod models;
pub mod session;

pub use config::session::{ConfigError, SessionConfig};
pub use models::{
    AuthState, AuthenticatedSession, EditorCommand, Location, Menu, MenuState, SessionPhase,
    SessionSnapshot, SessionToken, UserIdentity,
};
pub use session::{
    BootstrapOutcome, ClientEnvironment, DocumentService, DocumentServiceError,
    DocumentServiceFactory, DocumentServiceHandle, EnvironmentError, ExchangeError,
    IdentityProvider, KeyValueStore, LogoutReport, LogoutStep, MemoryStore, SessionContext,
    SessionError, SessionStore, StorageTier, StoreError, extract_token,
};
