use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use strum::Display;
use thiserror::Error;
use tracing::{debug, error, info, warn};

use super::documents::{DocumentServiceFactory, DocumentServiceHandle};
use super::environment::{ClientEnvironment, cookie_names, expired_cookie};
use super::provider::{ExchangeError, IdentityProvider};
use super::store::{KeyValueStore, SessionStore};
use super::token::has_token_parameter;
use crate::config::session::SessionConfig;
use crate::models::{
    AuthState, AuthenticatedSession, Location, SessionPhase, SessionSnapshot, SessionToken,
    UserIdentity,
};

/// Notice shown when the provider rejects a redirect token.
pub const AUTH_FAILURE_NOTICE: &str = "HandCash authentication failed. Please try again.";

/// Misuse of a [`SessionContext`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    /// `bootstrap` was called a second time on the same context.
    #[error("session bootstrap already ran for this context")]
    AlreadyBootstrapped,
}

/// How a bootstrap attempt ended.
#[derive(Debug)]
pub enum BootstrapOutcome {
    /// A redirect token was exchanged for this identity.
    SignedIn(UserIdentity),
    /// A persisted session was adopted without contacting the provider.
    Resumed(UserIdentity),
    /// Neither a token nor a persisted session was found.
    Anonymous,
    /// The provider rejected the redirect token.
    Rejected(ExchangeError),
    /// The session changed while the exchange was in flight; its result was
    /// discarded.
    Superseded,
}

/// Logout stages that can fail without stopping the logout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum LogoutStep {
    /// Invalidating the provider-side session handle.
    ProviderSignOut,
    /// Clearing the durable and ephemeral storage tiers.
    ClearStorage,
    /// Expiring the visible cookies.
    ExpireCookies,
}

/// What a logout did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogoutReport {
    /// Steps that failed, in the order they ran.
    pub failed_steps: Vec<LogoutStep>,
    /// Number of cookies written back with a past expiry.
    pub cookies_expired: usize,
    /// Whether a reload to the clean root was scheduled.
    pub reload_scheduled: bool,
}

impl LogoutReport {
    /// True when every step succeeded.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failed_steps.is_empty()
    }
}

type Observer = Box<dyn Fn(&SessionSnapshot)>;

/// Process-scoped owner of the session: authentication state, the persisted
/// session record, the identity provider and the document service.
///
/// One context exists per running client. Logging out leaves the context in
/// its signed-out state; the client builds a fresh context for the next
/// session rather than reusing this one.
pub struct SessionContext {
    config: SessionConfig,
    store: SessionStore,
    provider: Rc<dyn IdentityProvider>,
    documents: Rc<dyn DocumentServiceFactory>,
    environment: Rc<dyn ClientEnvironment>,
    state: RefCell<AuthState>,
    document_service: RefCell<Option<DocumentServiceHandle>>,
    epoch: Cell<u64>,
    bootstrapped: Cell<bool>,
    observers: RefCell<Vec<Observer>>,
}

impl fmt::Debug for SessionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionContext")
            .field("state", &self.state.borrow())
            .field("epoch", &self.epoch.get())
            .field("bootstrapped", &self.bootstrapped.get())
            .finish_non_exhaustive()
    }
}

impl SessionContext {
    /// Build a context that has not bootstrapped yet. Its state starts out
    /// loading until [`SessionContext::bootstrap`] decides how to proceed.
    ///
    /// Configuration problems are logged, never fatal.
    pub fn new(
        config: SessionConfig,
        storage: Rc<dyn KeyValueStore>,
        provider: Rc<dyn IdentityProvider>,
        documents: Rc<dyn DocumentServiceFactory>,
        environment: Rc<dyn ClientEnvironment>,
    ) -> Self {
        if let Err(problems) = config.validate() {
            for problem in &problems {
                warn!(error = %problem, "session configuration is incomplete; sign-in may fail");
            }
        }
        let store = SessionStore::new(storage, config.storage_key.clone());
        Self {
            config,
            store,
            provider,
            documents,
            environment,
            state: RefCell::new(AuthState::initial()),
            document_service: RefCell::new(None),
            epoch: Cell::new(0),
            bootstrapped: Cell::new(false),
            observers: RefCell::new(Vec::new()),
        }
    }

    /// Start from settled, signed-out state instead of loading.
    ///
    /// Used for the context that replaces one just logged out: loading never
    /// re-enters after the first bootstrap.
    #[must_use]
    pub fn starting_signed_out(self) -> Self {
        *self.state.borrow_mut() = AuthState::signed_out();
        self
    }

    /// Settings this context was built with.
    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Current authentication state.
    #[must_use]
    pub fn state(&self) -> AuthState {
        self.state.borrow().clone()
    }

    /// Active document service, present only while authenticated.
    #[must_use]
    pub fn document_service(&self) -> Option<DocumentServiceHandle> {
        self.document_service.borrow().clone()
    }

    /// Current state together with document service readiness.
    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            auth: self.state(),
            documents_ready: self.document_service.borrow().is_some(),
        }
    }

    /// Register a callback invoked after every state change.
    pub fn observe(&self, observer: impl Fn(&SessionSnapshot) + 'static) {
        self.observers.borrow_mut().push(Box::new(observer));
    }

    fn notify(&self) {
        let snapshot = self.snapshot();
        debug!(
            phase = %snapshot.auth.phase(),
            authenticated = snapshot.auth.is_authenticated(),
            documents_ready = snapshot.documents_ready,
            "session state changed"
        );
        for observer in self.observers.borrow().iter() {
            observer(&snapshot);
        }
    }

    fn transition(&self, apply: impl FnOnce(&mut AuthState)) {
        {
            let mut state = self.state.borrow_mut();
            apply(&mut state);
            if !state.is_authenticated() {
                self.document_service.borrow_mut().take();
            }
        }
        self.notify();
    }

    fn is_current(&self, epoch: u64) -> bool {
        self.epoch.get() == epoch
    }

    /// Decide between handling a provider redirect and resuming a persisted
    /// session, then carry that branch through.
    ///
    /// The decision and every state change before the first suspension point
    /// happen synchronously. Loading ends as soon as the decision is made.
    ///
    /// # Errors
    /// Returns [`SessionError::AlreadyBootstrapped`] on a second call.
    pub async fn bootstrap(&self) -> Result<BootstrapOutcome, SessionError> {
        if self.bootstrapped.replace(true) {
            return Err(SessionError::AlreadyBootstrapped);
        }
        let epoch = self.epoch.get();
        let location = self.environment.location();
        self.log_startup(&location);

        let outcome = match location.token() {
            Some(token) => {
                self.transition(|state| state.begin(SessionPhase::HandlingCallback));
                self.handle_callback(epoch, token, &location).await
            }
            None => self.resume(epoch).await,
        };
        Ok(outcome)
    }

    fn log_startup(&self, location: &Location) {
        let (query_names, fragment_names) = location.parameter_names();
        info!(
            app_id_configured = self.config.has_app_id(),
            path = %location.path(),
            query_parameters = ?query_names,
            fragment_parameters = ?fragment_names,
            token_parameter = has_token_parameter(location.query())
                || has_token_parameter(location.fragment()),
            "bootstrapping session"
        );
    }

    async fn handle_callback(
        &self,
        epoch: u64,
        token: SessionToken,
        location: &Location,
    ) -> BootstrapOutcome {
        info!("redirect token found; exchanging for identity");
        let result = self.provider.exchange(&token).await;
        if !self.is_current(epoch) {
            info!("session changed during identity exchange; discarding result");
            return BootstrapOutcome::Superseded;
        }
        self.scrub_location(location);

        match result {
            Ok(user) => {
                info!(handle = %user.handle, paymail = %user.paymail, "identity exchange succeeded");
                let session = AuthenticatedSession::new(user.clone(), token);
                if let Err(err) = self.store.save(&session) {
                    warn!(error = %err, "failed to persist session; it will not survive a reload");
                }
                self.transition(|state| state.authenticate(user.clone()));
                self.initialize_documents(epoch, &session).await;
                BootstrapOutcome::SignedIn(user)
            }
            Err(err) => {
                error!(error = %err, "identity exchange failed");
                self.transition(AuthState::reset);
                self.environment.notify_failure(AUTH_FAILURE_NOTICE);
                BootstrapOutcome::Rejected(err)
            }
        }
    }

    fn scrub_location(&self, location: &Location) {
        let scrubbed = location.scrubbed();
        if let Err(err) = self.environment.replace_location(&scrubbed) {
            warn!(error = %err, "failed to remove token parameters from location");
        }
    }

    async fn resume(&self, epoch: u64) -> BootstrapOutcome {
        // Not published: the store read below is synchronous, so observers
        // only ever see where the resume lands.
        self.state.borrow_mut().begin(SessionPhase::Resuming);
        let Some(session) = self.store.load() else {
            debug!("no persisted session; starting signed out");
            self.transition(AuthState::reset);
            return BootstrapOutcome::Anonymous;
        };

        info!(handle = %session.user.handle, "resuming persisted session");
        self.provider.resume(&session);
        self.transition(|state| state.authenticate(session.user.clone()));
        self.initialize_documents(epoch, &session).await;
        BootstrapOutcome::Resumed(session.user)
    }

    async fn initialize_documents(&self, epoch: u64, session: &AuthenticatedSession) {
        let result = self.documents.init(session).await;
        let still_signed_in = self.is_current(epoch) && self.state.borrow().is_authenticated();
        match result {
            Ok(handle) if still_signed_in => {
                *self.document_service.borrow_mut() = Some(handle);
                self.notify();
            }
            Ok(_) => debug!("session changed during document service startup; dropping it"),
            Err(err) => error!(error = %err, handle = %session.user.handle, "document service unavailable"),
        }
    }

    /// Tear down every piece of session state, then schedule a reload.
    ///
    /// Each step runs whether or not the previous one succeeded, so logout
    /// always completes. Calling it while signed out is harmless.
    pub fn logout(&self) -> LogoutReport {
        let handle = self
            .state
            .borrow()
            .current_user()
            .map(|user| user.handle.clone());
        info!(handle = ?handle, "logging out");
        let mut report = LogoutReport::default();

        if let Err(err) = self.provider.sign_out() {
            warn!(error = %err, "provider sign-out failed");
            report.failed_steps.push(LogoutStep::ProviderSignOut);
        }

        let storage_failures = self.store.clear_all();
        for err in &storage_failures {
            warn!(error = %err, "failed to clear session storage");
        }
        if !storage_failures.is_empty() {
            report.failed_steps.push(LogoutStep::ClearStorage);
        }

        match self.expire_cookies() {
            Ok(expired) => report.cookies_expired = expired,
            Err(expired) => {
                report.cookies_expired = expired;
                report.failed_steps.push(LogoutStep::ExpireCookies);
            }
        }

        self.epoch.set(self.epoch.get().wrapping_add(1));
        self.transition(AuthState::reset);

        if self.config.reload_on_logout {
            self.environment
                .schedule_reload(&self.config.reload_target, self.config.reload_delay);
            report.reload_scheduled = true;
        }
        info!(
            cookies_expired = report.cookies_expired,
            failed_steps = ?report.failed_steps,
            reload = report.reload_scheduled,
            "logout complete"
        );
        report
    }

    /// Expire every visible cookie. Returns the number expired, as `Err` when
    /// any cookie could not be handled.
    fn expire_cookies(&self) -> Result<usize, usize> {
        let header = match self.environment.cookie_header() {
            Ok(header) => header,
            Err(err) => {
                warn!(error = %err, "failed to read cookies");
                return Err(0);
            }
        };
        let mut expired = 0;
        let mut failed = false;
        for name in cookie_names(&header) {
            match self.environment.write_cookie(&expired_cookie(&name)) {
                Ok(()) => expired += 1,
                Err(err) => {
                    warn!(error = %err, cookie = %name, "failed to expire cookie");
                    failed = true;
                }
            }
        }
        if failed { Err(expired) } else { Ok(expired) }
    }

    /// Detach this context: pending work is invalidated, the document service
    /// is dropped and observers stop receiving updates.
    pub fn teardown(&self) {
        self.epoch.set(self.epoch.get().wrapping_add(1));
        self.document_service.borrow_mut().take();
        self.observers.borrow_mut().clear();
        debug!("session context torn down");
    }
}
