pub(crate) mod browser;
pub(crate) mod documents;
pub(crate) mod identity;
pub(crate) mod storage;

use std::rc::Rc;

use shared::SessionContext;

use crate::config::FrontendConfig;

pub use browser::{BrowserEnvironment, alert};
pub use documents::DocumentClientFactory;
pub use identity::HandCashClient;
pub use storage::BrowserStorage;

/// Build a fresh session context wired to the browser.
pub fn session_context(config: &FrontendConfig) -> SessionContext {
    let documents_url =
        documents::resolve_against(browser::page_origin().as_deref(), &config.documents_url);
    SessionContext::new(
        config.session_config(),
        Rc::new(BrowserStorage),
        Rc::new(HandCashClient::new(&config.profile_url, config.app_id.clone())),
        Rc::new(DocumentClientFactory::new(&documents_url)),
        Rc::new(BrowserEnvironment),
    )
}
