use gloo_storage::errors::StorageError;
use gloo_storage::{LocalStorage, SessionStorage, Storage};
use shared::{KeyValueStore, StorageTier, StoreError};

/// [`KeyValueStore`] over `localStorage` (durable) and `sessionStorage`
/// (ephemeral).
#[derive(Debug, Default, Clone, Copy)]
pub struct BrowserStorage;

impl BrowserStorage {
    /// Storage can be missing or blocked (private browsing, sandboxed frames);
    /// check it before touching the gloo helpers.
    fn ensure_available(tier: StorageTier) -> Result<(), StoreError> {
        let window = web_sys::window().ok_or(StoreError::Unavailable { tier })?;
        let storage = match tier {
            StorageTier::Durable => window.local_storage(),
            StorageTier::Ephemeral => window.session_storage(),
        };
        match storage {
            Ok(Some(_)) => Ok(()),
            _ => Err(StoreError::Unavailable { tier }),
        }
    }
}

fn backend_error(tier: StorageTier, err: &StorageError) -> StoreError {
    StoreError::Backend {
        tier,
        message: err.to_string(),
    }
}

impl KeyValueStore for BrowserStorage {
    fn get(&self, tier: StorageTier, key: &str) -> Result<Option<String>, StoreError> {
        Self::ensure_available(tier)?;
        let value = match tier {
            StorageTier::Durable => LocalStorage::get::<String>(key),
            StorageTier::Ephemeral => SessionStorage::get::<String>(key),
        };
        match value {
            Ok(value) => Ok(Some(value)),
            Err(StorageError::KeyNotFound(_)) => Ok(None),
            Err(err) => Err(backend_error(tier, &err)),
        }
    }

    fn set(&self, tier: StorageTier, key: &str, value: &str) -> Result<(), StoreError> {
        Self::ensure_available(tier)?;
        let result = match tier {
            StorageTier::Durable => LocalStorage::set(key, value),
            StorageTier::Ephemeral => SessionStorage::set(key, value),
        };
        result.map_err(|err| backend_error(tier, &err))
    }

    fn clear(&self, tier: StorageTier) -> Result<(), StoreError> {
        Self::ensure_available(tier)?;
        match tier {
            StorageTier::Durable => LocalStorage::clear(),
            StorageTier::Ephemeral => SessionStorage::clear(),
        }
        Ok(())
    }
}
