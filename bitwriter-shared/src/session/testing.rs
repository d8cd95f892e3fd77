//! Hand-written collaborators for exercising the session context.

use std::cell::{Cell, RefCell};
use std::collections::{HashSet, VecDeque};
use std::rc::Rc;
use std::time::Duration;

use async_trait::async_trait;
use cookie::Cookie;
use tokio::sync::oneshot;

use super::documents::{
    DocumentService, DocumentServiceError, DocumentServiceFactory, DocumentServiceHandle,
};
use super::environment::{ClientEnvironment, EnvironmentError};
use super::provider::{ExchangeError, IdentityProvider};
use super::store::{KeyValueStore, MemoryStore, StorageTier, StoreError};
use crate::models::{AuthenticatedSession, Location, SessionToken, UserIdentity};

pub fn alice() -> UserIdentity {
    UserIdentity::new("alice", "alice@example.com")
}

pub fn bob() -> UserIdentity {
    UserIdentity::new("bob", "bob@example.com")
}

/// Memory store whose tiers can be made to fail.
#[derive(Debug, Default)]
pub struct FlakyStore {
    inner: MemoryStore,
    failing_reads: RefCell<HashSet<StorageTier>>,
    failing_writes: RefCell<HashSet<StorageTier>>,
    failing_clears: RefCell<HashSet<StorageTier>>,
}

impl FlakyStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn inner(&self) -> &MemoryStore {
        &self.inner
    }

    pub fn fail_reads(&self, tier: StorageTier) {
        self.failing_reads.borrow_mut().insert(tier);
    }

    pub fn fail_writes(&self, tier: StorageTier) {
        self.failing_writes.borrow_mut().insert(tier);
    }

    pub fn fail_clears(&self, tier: StorageTier) {
        self.failing_clears.borrow_mut().insert(tier);
    }
}

impl KeyValueStore for FlakyStore {
    fn get(&self, tier: StorageTier, key: &str) -> Result<Option<String>, StoreError> {
        if self.failing_reads.borrow().contains(&tier) {
            return Err(StoreError::Unavailable { tier });
        }
        self.inner.get(tier, key)
    }

    fn set(&self, tier: StorageTier, key: &str, value: &str) -> Result<(), StoreError> {
        if self.failing_writes.borrow().contains(&tier) {
            return Err(StoreError::Backend {
                tier,
                message: "quota exceeded".to_string(),
            });
        }
        self.inner.set(tier, key, value)
    }

    fn clear(&self, tier: StorageTier) -> Result<(), StoreError> {
        if self.failing_clears.borrow().contains(&tier) {
            return Err(StoreError::Unavailable { tier });
        }
        self.inner.clear(tier)
    }
}

type ExchangeResult = Result<UserIdentity, ExchangeError>;

/// Identity provider with scripted exchange results.
#[derive(Debug, Default)]
pub struct FakeProvider {
    scripted: RefCell<VecDeque<ExchangeResult>>,
    deferred: RefCell<Option<oneshot::Receiver<ExchangeResult>>>,
    exchanged: RefCell<Vec<String>>,
    resumed: RefCell<Vec<String>>,
    sign_outs: Cell<usize>,
    fail_sign_out: Cell<bool>,
}

impl FakeProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn resolving(user: UserIdentity) -> Self {
        let provider = Self::new();
        provider.scripted.borrow_mut().push_back(Ok(user));
        provider
    }

    pub fn rejecting(message: &str) -> Self {
        let provider = Self::new();
        provider
            .scripted
            .borrow_mut()
            .push_back(Err(ExchangeError::Rejected(message.to_string())));
        provider
    }

    /// Hold the next exchange open until the returned sender resolves it.
    pub fn defer(&self) -> oneshot::Sender<ExchangeResult> {
        let (sender, receiver) = oneshot::channel();
        *self.deferred.borrow_mut() = Some(receiver);
        sender
    }

    pub fn exchanged_tokens(&self) -> Vec<String> {
        self.exchanged.borrow().clone()
    }

    pub fn resumed_handles(&self) -> Vec<String> {
        self.resumed.borrow().clone()
    }

    pub fn sign_outs(&self) -> usize {
        self.sign_outs.get()
    }

    pub fn fail_sign_out(&self) {
        self.fail_sign_out.set(true);
    }
}

#[async_trait(?Send)]
impl IdentityProvider for FakeProvider {
    async fn exchange(&self, token: &SessionToken) -> Result<UserIdentity, ExchangeError> {
        self.exchanged.borrow_mut().push(token.as_str().to_string());
        let deferred = self.deferred.borrow_mut().take();
        if let Some(receiver) = deferred {
            return receiver
                .await
                .unwrap_or_else(|_| Err(ExchangeError::Transport("dropped".to_string())));
        }
        self.scripted
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(ExchangeError::Rejected("unexpected token".to_string())))
    }

    fn resume(&self, session: &AuthenticatedSession) {
        self.resumed.borrow_mut().push(session.user.handle.clone());
    }

    fn sign_out(&self) -> Result<(), ExchangeError> {
        self.sign_outs.set(self.sign_outs.get() + 1);
        if self.fail_sign_out.get() {
            return Err(ExchangeError::Transport("offline".to_string()));
        }
        Ok(())
    }
}

#[derive(Debug)]
pub struct FakeDocumentService {
    owner: UserIdentity,
}

impl DocumentService for FakeDocumentService {
    fn owner(&self) -> &UserIdentity {
        &self.owner
    }
}

/// Document service factory that records each initialization.
#[derive(Debug, Default)]
pub struct FakeDocuments {
    inits: RefCell<Vec<String>>,
    fail: Cell<bool>,
}

impl FakeDocuments {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        let documents = Self::new();
        documents.fail.set(true);
        documents
    }

    pub fn initialized_for(&self) -> Vec<String> {
        self.inits.borrow().clone()
    }
}

#[async_trait(?Send)]
impl DocumentServiceFactory for FakeDocuments {
    async fn init(
        &self,
        session: &AuthenticatedSession,
    ) -> Result<DocumentServiceHandle, DocumentServiceError> {
        self.inits.borrow_mut().push(session.user.handle.clone());
        if self.fail.get() {
            return Err(DocumentServiceError::Init("backend offline".to_string()));
        }
        Ok(Rc::new(FakeDocumentService {
            owner: session.user.clone(),
        }))
    }
}

/// Browser stand-in with an in-memory cookie jar.
#[derive(Debug, Default)]
pub struct FakeEnvironment {
    location: RefCell<Location>,
    replaced: RefCell<Vec<String>>,
    notices: RefCell<Vec<String>>,
    cookies: RefCell<Vec<(String, String)>>,
    reloads: RefCell<Vec<(String, Duration)>>,
    cookies_blocked: Cell<bool>,
}

impl FakeEnvironment {
    pub fn at(href: &str) -> Self {
        let environment = Self::default();
        *environment.location.borrow_mut() = Location::parse(href).unwrap();
        environment
    }

    pub fn with_cookie(self, name: &str, value: &str) -> Self {
        self.cookies
            .borrow_mut()
            .push((name.to_string(), value.to_string()));
        self
    }

    pub fn block_cookies(&self) {
        self.cookies_blocked.set(true);
    }

    pub fn current_location(&self) -> Location {
        self.location.borrow().clone()
    }

    pub fn replaced_locations(&self) -> Vec<String> {
        self.replaced.borrow().clone()
    }

    pub fn notices(&self) -> Vec<String> {
        self.notices.borrow().clone()
    }

    pub fn live_cookies(&self) -> Vec<String> {
        self.cookies
            .borrow()
            .iter()
            .map(|(name, _)| name.clone())
            .collect()
    }

    pub fn reloads(&self) -> Vec<(String, Duration)> {
        self.reloads.borrow().clone()
    }
}

impl ClientEnvironment for FakeEnvironment {
    fn location(&self) -> Location {
        self.location.borrow().clone()
    }

    fn replace_location(&self, location: &Location) -> Result<(), EnvironmentError> {
        self.replaced.borrow_mut().push(location.to_string());
        *self.location.borrow_mut() = location.clone();
        Ok(())
    }

    fn notify_failure(&self, message: &str) {
        self.notices.borrow_mut().push(message.to_string());
    }

    fn cookie_header(&self) -> Result<String, EnvironmentError> {
        if self.cookies_blocked.get() {
            return Err(EnvironmentError::Unavailable("document.cookie"));
        }
        Ok(self
            .cookies
            .borrow()
            .iter()
            .map(|(name, value)| format!("{name}={value}"))
            .collect::<Vec<_>>()
            .join("; "))
    }

    fn write_cookie(&self, raw: &str) -> Result<(), EnvironmentError> {
        let cookie = Cookie::parse(raw).map_err(|err| EnvironmentError::Rejected(err.to_string()))?;
        let expired = cookie
            .expires_datetime()
            .is_some_and(|at| at <= time::OffsetDateTime::now_utc());
        let mut jar = self.cookies.borrow_mut();
        jar.retain(|(name, _)| name != cookie.name());
        if !expired {
            jar.push((cookie.name().to_string(), cookie.value().to_string()));
        }
        Ok(())
    }

    fn schedule_reload(&self, target: &str, delay: Duration) {
        self.reloads.borrow_mut().push((target.to_string(), delay));
    }
}
