use std::rc::Rc;

use async_trait::async_trait;
use shared::{
    AuthenticatedSession, DocumentService, DocumentServiceError, DocumentServiceFactory,
    DocumentServiceHandle, UserIdentity,
};
use tracing::{info, warn};
use url::Url;

/// Document service client bound to one signed-in account.
#[derive(Debug)]
pub struct DocumentClient {
    base_url: Url,
    owner: UserIdentity,
}

impl DocumentClient {
    fn new(base_url: Url, session: &AuthenticatedSession) -> Self {
        Self {
            base_url,
            owner: session.user.clone(),
        }
    }

    /// Base URL extended by `segments`, each percent-encoded as one path segment.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// Endpoint listing the owner's documents.
    pub fn documents_url(&self) -> Url {
        self.endpoint(&["users", &self.owner.handle, "documents"])
    }
}

impl DocumentService for DocumentClient {
    fn owner(&self) -> &UserIdentity {
        &self.owner
    }
}

/// Make `url` absolute against `origin` when it is relative.
///
/// Returns the input unchanged when it is already absolute or cannot be
/// resolved; the factory reports the latter at init.
pub(crate) fn resolve_against(origin: Option<&str>, url: &str) -> String {
    if Url::parse(url).is_ok() {
        return url.to_string();
    }
    match origin.map(Url::parse) {
        Some(Ok(origin)) => match origin.join(url) {
            Ok(joined) => joined.into(),
            Err(err) => {
                warn!(error = %err, url = %url, "could not resolve document service URL");
                url.to_string()
            }
        },
        _ => url.to_string(),
    }
}

/// Creates a [`DocumentClient`] for each authenticated session.
#[derive(Debug, Clone)]
pub struct DocumentClientFactory {
    base_url: String,
}

impl DocumentClientFactory {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
        }
    }

    fn base_url(&self) -> Result<Url, DocumentServiceError> {
        if self.base_url.trim().is_empty() {
            return Err(DocumentServiceError::Init(
                "document service URL is not configured".to_string(),
            ));
        }
        let url = Url::parse(&self.base_url).map_err(|err| {
            DocumentServiceError::Init(format!(
                "invalid document service URL `{}`: {err}",
                self.base_url
            ))
        })?;
        if url.cannot_be_a_base() {
            return Err(DocumentServiceError::Init(format!(
                "document service URL `{}` cannot hold a path",
                self.base_url
            )));
        }
        Ok(url)
    }
}

#[async_trait(?Send)]
impl DocumentServiceFactory for DocumentClientFactory {
    async fn init(
        &self,
        session: &AuthenticatedSession,
    ) -> Result<DocumentServiceHandle, DocumentServiceError> {
        let client = DocumentClient::new(self.base_url()?, session);
        info!(handle = %session.user.handle, url = %client.documents_url(), "document service ready");
        Ok(Rc::new(client))
    }
}
