use crate::config::FrontendConfig;
use crate::models::app_state::AppState;
use crate::routes::{MainRoute, RouteContext, switch};
use crate::services;
use shared::{BootstrapOutcome, EditorCommand, SessionContext};
use tracing::{info, warn};
use wasm_bindgen_futures::spawn_local;
use yew::{Callback, Html, function_component, html, use_effect_with, use_memo, use_state};
use yew_router::prelude::*;
use yewdux::prelude::use_store;

/// Session context for one app generation. Generation 0 is the initial page
/// load; every later one follows a logout and starts settled, so loading is
/// never shown again.
pub(crate) fn session_for_generation(config: &FrontendConfig, generation: u32) -> SessionContext {
    let session = services::session_context(config);
    if generation == 0 {
        session
    } else {
        session.starting_signed_out()
    }
}

#[function_component(App)]
pub fn app() -> Html {
    let (store_state, store_dispatch) = use_store::<AppState>();
    let config = use_memo((), |_| FrontendConfig::new());
    // Bumped after logout so the next render owns a fresh session context
    let generation = use_state(|| 0_u32);
    let last_command = use_state(|| None::<EditorCommand>);

    let session = {
        let config = config.clone();
        use_memo(*generation, move |generation| {
            session_for_generation(&config, *generation)
        })
    };

    {
        let session = session.clone();
        let dispatch = store_dispatch.clone();
        use_effect_with(*generation, move |_| {
            let observer_dispatch = dispatch.clone();
            session.observe(move |snapshot| {
                observer_dispatch.set(AppState::from_snapshot(snapshot));
            });
            dispatch.set(AppState::from_snapshot(&session.snapshot()));

            let bootstrapping = session.clone();
            spawn_local(async move {
                match bootstrapping.bootstrap().await {
                    Ok(BootstrapOutcome::SignedIn(user)) => {
                        info!(handle = %user.handle, "signed in with HandCash");
                    }
                    Ok(BootstrapOutcome::Resumed(user)) => {
                        info!(handle = %user.handle, "resumed stored session");
                    }
                    Ok(BootstrapOutcome::Rejected(err)) => {
                        warn!(error = %err, "HandCash sign-in rejected");
                    }
                    Ok(outcome) => info!(?outcome, "session bootstrap finished"),
                    Err(err) => warn!(error = %err, "session bootstrap skipped"),
                }
            });

            move || session.teardown()
        });
    }

    let on_logout = {
        let session = session.clone();
        let generation = generation.clone();
        let last_command = last_command.clone();
        Callback::from(move |()| {
            let report = session.logout();
            if report.is_clean() {
                info!(cookies = report.cookies_expired, "signed out");
            } else {
                warn!(failed = ?report.failed_steps, "signed out with errors");
            }
            last_command.set(None);
            generation.set(*generation + 1);
        })
    };

    let on_command = {
        let last_command = last_command.clone();
        Callback::from(move |command: EditorCommand| {
            if command.is_available() {
                info!(%command, "editor command");
                last_command.set(Some(command));
            } else {
                services::alert(&format!("{command} functionality coming soon"));
            }
        })
    };

    let context = RouteContext {
        session: store_state.session.clone(),
        document_owner: session
            .document_service()
            .map(|service| service.owner().handle.clone()),
        login_url: config.login_url(),
        last_command: *last_command,
        on_logout,
        on_command,
    };

    html! {
        <BrowserRouter>
            <Switch<MainRoute> render={move |route| switch(route, &context)} />
        </BrowserRouter>
    }
}
