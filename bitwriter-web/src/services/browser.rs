use std::time::Duration;

use gloo_timers::callback::Timeout;
use shared::{ClientEnvironment, EnvironmentError, Location};
use tracing::error;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{HtmlDocument, Window};

/// [`ClientEnvironment`] backed by the browser window.
#[derive(Debug, Default, Clone, Copy)]
pub struct BrowserEnvironment;

fn window() -> Result<Window, EnvironmentError> {
    web_sys::window().ok_or(EnvironmentError::Unavailable("window"))
}

fn html_document() -> Result<HtmlDocument, EnvironmentError> {
    window()?
        .document()
        .ok_or(EnvironmentError::Unavailable("document"))?
        .dyn_into::<HtmlDocument>()
        .map_err(|_| EnvironmentError::Unavailable("html document"))
}

/// Show a blocking browser alert; failures are only logged.
pub fn alert(message: &str) {
    if let Ok(window) = window()
        && let Err(err) = window.alert_with_message(message)
    {
        error!(error = ?err, "failed to show notice");
    }
}

/// Origin of the current page, such as `https://writer.example`.
///
/// Always `None` off wasm, where there is no page.
pub(crate) fn page_origin() -> Option<String> {
    if !cfg!(target_arch = "wasm32") {
        return None;
    }
    web_sys::window().and_then(|window| window.location().origin().ok())
}

fn rejected(value: &JsValue) -> EnvironmentError {
    EnvironmentError::Rejected(format!("{value:?}"))
}

impl ClientEnvironment for BrowserEnvironment {
    fn location(&self) -> Location {
        let Ok(window) = window() else {
            return Location::default();
        };
        let location = window.location();
        Location::new(
            location.pathname().unwrap_or_default(),
            &location.search().unwrap_or_default(),
            &location.hash().unwrap_or_default(),
        )
    }

    fn replace_location(&self, location: &Location) -> Result<(), EnvironmentError> {
        let window = window()?;
        let title = window.document().map(|document| document.title()).unwrap_or_default();
        window
            .history()
            .map_err(|err| rejected(&err))?
            .replace_state_with_url(&JsValue::NULL, &title, Some(&location.to_string()))
            .map_err(|err| rejected(&err))
    }

    fn notify_failure(&self, message: &str) {
        alert(message);
    }

    fn cookie_header(&self) -> Result<String, EnvironmentError> {
        html_document()?.cookie().map_err(|err| rejected(&err))
    }

    fn write_cookie(&self, cookie: &str) -> Result<(), EnvironmentError> {
        html_document()?
            .set_cookie(cookie)
            .map_err(|err| rejected(&err))
    }

    fn schedule_reload(&self, target: &str, delay: Duration) {
        let target = target.to_string();
        let millis = u32::try_from(delay.as_millis()).unwrap_or(u32::MAX);
        Timeout::new(millis, move || match window() {
            Ok(window) => {
                if let Err(err) = window.location().replace(&target) {
                    error!(error = ?err, target = %target, "reload failed");
                }
            }
            Err(err) => error!(error = %err, "reload failed"),
        })
        .forget();
    }
}
