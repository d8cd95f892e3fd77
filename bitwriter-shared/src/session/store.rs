use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use strum::{Display, EnumIter, IntoEnumIterator};
use thiserror::Error;
use tracing::{debug, warn};

use crate::models::AuthenticatedSession;

/// Persistence tiers available to the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, Display)]
#[strum(serialize_all = "snake_case")]
pub enum StorageTier {
    /// Survives browser restarts (`localStorage`).
    Durable,
    /// Cleared when the tab closes (`sessionStorage`).
    Ephemeral,
}

/// Errors raised by a [`KeyValueStore`] backend.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The tier does not exist in this environment.
    #[error("{tier} storage is unavailable")]
    Unavailable {
        /// Tier that was asked for.
        tier: StorageTier,
    },
    /// The backend refused a read, write or removal.
    #[error("{tier} storage rejected the operation: {message}")]
    Backend {
        /// Tier that failed.
        tier: StorageTier,
        /// Backend's description of the failure.
        message: String,
    },
    /// The stored record is not valid JSON for a session.
    #[error("stored session record is malformed: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// String key-value storage split into tiers.
pub trait KeyValueStore {
    /// Read a value.
    ///
    /// # Errors
    /// Returns an error if the tier cannot be read.
    fn get(&self, tier: StorageTier, key: &str) -> Result<Option<String>, StoreError>;

    /// Write a value, replacing any existing one.
    ///
    /// # Errors
    /// Returns an error if the tier cannot be written.
    fn set(&self, tier: StorageTier, key: &str, value: &str) -> Result<(), StoreError>;

    /// Remove every entry of a tier.
    ///
    /// # Errors
    /// Returns an error if the tier cannot be cleared.
    fn clear(&self, tier: StorageTier) -> Result<(), StoreError>;
}

/// In-memory [`KeyValueStore`], used off-browser and in tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tiers: RefCell<HashMap<StorageTier, HashMap<String, String>>>,
}

impl MemoryStore {
    /// Empty store with both tiers available.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries held in a tier.
    #[must_use]
    pub fn len(&self, tier: StorageTier) -> usize {
        self.tiers.borrow().get(&tier).map_or(0, HashMap::len)
    }

    /// Whether a tier holds no entries.
    #[must_use]
    pub fn is_empty(&self, tier: StorageTier) -> bool {
        self.len(tier) == 0
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, tier: StorageTier, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self
            .tiers
            .borrow()
            .get(&tier)
            .and_then(|entries| entries.get(key).cloned()))
    }

    fn set(&self, tier: StorageTier, key: &str, value: &str) -> Result<(), StoreError> {
        self.tiers
            .borrow_mut()
            .entry(tier)
            .or_default()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn clear(&self, tier: StorageTier) -> Result<(), StoreError> {
        self.tiers.borrow_mut().remove(&tier);
        Ok(())
    }
}

/// Typed access to the persisted session record.
///
/// The record lives in the durable tier so a reload resumes the session. Reads
/// that fail for any reason are treated as "no session"; losing a session only
/// costs a re-login.
#[derive(Clone)]
pub struct SessionStore {
    backend: Rc<dyn KeyValueStore>,
    key: String,
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore").field("key", &self.key).finish_non_exhaustive()
    }
}

impl SessionStore {
    /// Persist sessions under `key` in `backend`.
    pub fn new(backend: Rc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self {
            backend,
            key: key.into(),
        }
    }

    /// Storage key of the session record.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Load the persisted session, if a readable one exists.
    #[must_use]
    pub fn load(&self) -> Option<AuthenticatedSession> {
        match self.try_load() {
            Ok(session) => session,
            Err(err) => {
                warn!(error = %err, key = %self.key, "ignoring unreadable persisted session");
                None
            }
        }
    }

    fn try_load(&self) -> Result<Option<AuthenticatedSession>, StoreError> {
        let Some(raw) = self.backend.get(StorageTier::Durable, &self.key)? else {
            return Ok(None);
        };
        let session: AuthenticatedSession = serde_json::from_str(&raw)?;
        if session.user.handle.is_empty() || session.token.as_str().is_empty() {
            debug!(key = %self.key, "persisted session is incomplete");
            return Ok(None);
        }
        Ok(Some(session))
    }

    /// Persist a session in the durable tier.
    ///
    /// # Errors
    /// Returns an error if the record cannot be encoded or written.
    pub fn save(&self, session: &AuthenticatedSession) -> Result<(), StoreError> {
        let raw = serde_json::to_string(session)?;
        self.backend.set(StorageTier::Durable, &self.key, &raw)
    }

    /// Clear every tier. Each tier is attempted regardless of earlier
    /// failures; the failures are returned.
    pub fn clear_all(&self) -> Vec<StoreError> {
        StorageTier::iter()
            .filter_map(|tier| self.backend.clear(tier).err())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{SessionToken, UserIdentity};
    use crate::session::testing::FlakyStore;

    fn bob_session() -> AuthenticatedSession {
        AuthenticatedSession::new(
            UserIdentity::new("bob", "bob@example.com"),
            SessionToken::new("bob-token"),
        )
    }

    #[test]
    fn save_then_load_returns_session() {
        let backend = Rc::new(MemoryStore::new());
        let store = SessionStore::new(backend.clone(), "session");
        store.save(&bob_session()).unwrap();

        assert_eq!(store.load(), Some(bob_session()));
        assert_eq!(backend.len(StorageTier::Durable), 1);
        assert!(backend.is_empty(StorageTier::Ephemeral));
    }

    #[test]
    fn load_without_record_is_none() {
        let store = SessionStore::new(Rc::new(MemoryStore::new()), "session");
        assert_eq!(store.load(), None);
    }

    #[test]
    fn malformed_record_is_treated_as_absent() {
        let backend = Rc::new(MemoryStore::new());
        backend
            .set(StorageTier::Durable, "session", "{not json")
            .unwrap();
        let store = SessionStore::new(backend, "session");
        assert_eq!(store.load(), None);
    }

    #[test]
    fn incomplete_record_is_treated_as_absent() {
        let backend = Rc::new(MemoryStore::new());
        backend
            .set(
                StorageTier::Durable,
                "session",
                r#"{"user":{"handle":"","paymail":""},"token":"t"}"#,
            )
            .unwrap();
        let store = SessionStore::new(backend, "session");
        assert_eq!(store.load(), None);
    }

    #[test]
    fn unreadable_backend_is_treated_as_absent() {
        let backend = Rc::new(FlakyStore::new());
        backend.fail_reads(StorageTier::Durable);
        let store = SessionStore::new(backend, "session");
        assert_eq!(store.load(), None);
    }

    #[test]
    fn clear_all_empties_both_tiers() {
        let backend = Rc::new(MemoryStore::new());
        backend.set(StorageTier::Ephemeral, "provider", "x").unwrap();
        let store = SessionStore::new(backend.clone(), "session");
        store.save(&bob_session()).unwrap();

        assert!(store.clear_all().is_empty());
        assert!(backend.is_empty(StorageTier::Durable));
        assert!(backend.is_empty(StorageTier::Ephemeral));
    }

    #[test]
    fn clear_all_continues_past_a_failing_tier() {
        let backend = Rc::new(FlakyStore::new());
        backend.inner().set(StorageTier::Durable, "session", "x").unwrap();
        backend.inner().set(StorageTier::Ephemeral, "other", "y").unwrap();
        backend.fail_clears(StorageTier::Durable);
        let store = SessionStore::new(backend.clone(), "session");

        let failures = store.clear_all();
        assert_eq!(failures.len(), 1);
        assert!(matches!(
            failures[0],
            StoreError::Unavailable {
                tier: StorageTier::Durable
            }
        ));
        assert!(backend.inner().is_empty(StorageTier::Ephemeral));
    }
}
