use std::fmt;
use std::rc::Rc;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{AuthenticatedSession, UserIdentity};

/// Failure to bring up the document service for a session.
#[derive(Debug, Error)]
pub enum DocumentServiceError {
    /// The service rejected or could not complete initialization.
    #[error("document service could not be initialized: {0}")]
    Init(String),
}

/// Document-access facade used by the editor once a user is signed in.
pub trait DocumentService: fmt::Debug {
    /// Identity the service acts on behalf of.
    fn owner(&self) -> &UserIdentity;
}

/// Shared handle to the active document service.
pub type DocumentServiceHandle = Rc<dyn DocumentService>;

/// Builds a document service for an authenticated session.
#[async_trait(?Send)]
pub trait DocumentServiceFactory {
    /// # Errors
    /// Returns an error if the service cannot connect for this session.
    async fn init(
        &self,
        session: &AuthenticatedSession,
    ) -> Result<DocumentServiceHandle, DocumentServiceError>;
}
