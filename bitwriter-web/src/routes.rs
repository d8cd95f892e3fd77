use crate::{components::loading::Loading, containers::layout::Layout, pages::*};
use shared::{EditorCommand, SessionSnapshot};
use tracing::debug;
use yew::Callback;
use yew::prelude::*;
use yew_router::prelude::*;

/// The main routes
#[derive(Debug, Clone, PartialEq, Eq, Routable)]
pub enum MainRoute {
    #[at("/")]
    Home,
    /// Landing page for the HandCash redirect.
    #[at("/auth/handcash/callback")]
    Callback,
    #[not_found]
    #[at("/404")]
    NotFound,
}

/// Everything the routed views need from the app shell.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteContext {
    pub session: SessionSnapshot,
    pub document_owner: Option<String>,
    pub login_url: Option<String>,
    pub last_command: Option<EditorCommand>,
    pub on_logout: Callback<()>,
    pub on_command: Callback<EditorCommand>,
}

/// What the shell renders for a session state, independent of the route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Loading,
    Connecting,
    Editor,
    SignIn,
}

impl View {
    pub fn for_session(session: &SessionSnapshot) -> Self {
        let auth = &session.auth;
        if auth.is_loading() {
            Self::Loading
        } else if auth.is_pending() {
            Self::Connecting
        } else if auth.is_authenticated() {
            Self::Editor
        } else {
            Self::SignIn
        }
    }
}

/// Switch function for the main routes.
pub fn switch(route: MainRoute, context: &RouteContext) -> Html {
    let view = View::for_session(&context.session);
    debug!(?route, ?view, "switching main route");

    // The redirect route is only a landing spot; once the session settles the
    // editor lives at the root.
    if route != MainRoute::Home && matches!(view, View::Editor | View::SignIn) {
        return html! { <Redirect<MainRoute> to={MainRoute::Home} /> };
    }

    let user = context.session.auth.current_user().cloned();
    let body = match view {
        View::Loading => return html! { <Loading /> },
        View::Connecting => html! { <CallbackPage /> },
        View::Editor => match user.clone() {
            Some(user) => html! {
                <EditorPage
                    {user}
                    documents_ready={context.session.documents_ready}
                    document_owner={context.document_owner.clone()}
                    last_command={context.last_command}
                />
            },
            None => html! { <LoginPage login_url={context.login_url.clone()} /> },
        },
        View::SignIn => html! { <LoginPage login_url={context.login_url.clone()} /> },
    };

    html! {
        <Layout
            {user}
            login_url={context.login_url.clone()}
            on_logout={context.on_logout.clone()}
            on_command={context.on_command.clone()}
        >
            {body}
        </Layout>
    }
}
