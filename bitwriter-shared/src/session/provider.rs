//! Identity provider seam used by the session context.

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{AuthenticatedSession, SessionToken, UserIdentity};

/// Failures of the token-for-identity exchange.
#[derive(Debug, Error)]
pub enum ExchangeError {
    /// No application id to exchange with.
    #[error("identity provider application id is not configured")]
    NotConfigured,
    /// The provider refused the token.
    #[error("identity provider rejected the token: {0}")]
    Rejected(String),
    /// The request never got an answer.
    #[error("identity provider is unreachable: {0}")]
    Transport(String),
    /// The profile response could not be read.
    #[error("identity provider returned an unreadable profile: {0}")]
    InvalidProfile(String),
}

/// The identity provider as seen by the client.
///
/// Futures are not `Send`: the client runs on a single-threaded event loop.
#[async_trait(?Send)]
pub trait IdentityProvider {
    /// Resolve a bearer token into the identity it was issued for.
    ///
    /// # Arguments
    /// * `token` - Token taken from the provider's redirect
    ///
    /// # Errors
    /// Returns an error when the token is invalid or expired, or when the
    /// provider cannot be reached.
    async fn exchange(&self, token: &SessionToken) -> Result<UserIdentity, ExchangeError>;

    /// Adopt a session restored from storage without calling the provider.
    fn resume(&self, _session: &AuthenticatedSession) {}

    /// Drop the provider-side session handle.
    ///
    /// # Errors
    /// Returns an error if the handle could not be invalidated; callers treat
    /// this as best-effort.
    fn sign_out(&self) -> Result<(), ExchangeError>;
}
