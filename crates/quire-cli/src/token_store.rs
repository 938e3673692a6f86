//! Token persistence for CLI profiles: OS keychain or a JSON file.

#[cfg(test)]
use std::collections::HashMap;
use std::sync::Arc;
#[cfg(test)]
use std::sync::{Mutex, OnceLock};

#[cfg(not(test))]
use keyring::Entry;
use quire_core::storage::FileTokenStore;
use quire_core::{Error, Result, TokenStore};

use crate::config_profiles::{default_token_file_path, CliProfile, TokenStoreKind};
use crate::error::CliError;

#[cfg(not(test))]
const KEYRING_SERVICE_NAME: &str = "quire-cli";

/// One keychain entry per token key, namespaced by profile.
#[derive(Debug, Clone)]
pub struct KeyringTokenStore {
    profile_name: String,
}

impl KeyringTokenStore {
    pub fn new(profile_name: &str) -> Self {
        Self {
            profile_name: profile_name.to_string(),
        }
    }

    fn username(&self, key: &str) -> String {
        format!("{}:{key}", self.profile_name)
    }

    #[cfg(test)]
    fn test_store() -> &'static Mutex<HashMap<String, String>> {
        static STORE: OnceLock<Mutex<HashMap<String, String>>> = OnceLock::new();
        STORE.get_or_init(|| Mutex::new(HashMap::new()))
    }

    #[cfg(not(test))]
    fn entry(&self, key: &str) -> Result<Entry> {
        Entry::new(KEYRING_SERVICE_NAME, &self.username(key))
            .map_err(|error| Error::Storage(error.to_string()))
    }
}

impl TokenStore for KeyringTokenStore {
    #[cfg(not(test))]
    fn get(&self, key: &str) -> Result<Option<String>> {
        match self.entry(key)?.get_password() {
            Ok(value) => Ok(Some(value)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(error) => Err(Error::Storage(error.to_string())),
        }
    }

    #[cfg(test)]
    fn get(&self, key: &str) -> Result<Option<String>> {
        let guard = Self::test_store()
            .lock()
            .map_err(|error| Error::Storage(error.to_string()))?;
        Ok(guard.get(&self.username(key)).cloned())
    }

    #[cfg(not(test))]
    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.entry(key)?
            .set_password(value)
            .map_err(|error| Error::Storage(error.to_string()))
    }

    #[cfg(test)]
    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut guard = Self::test_store()
            .lock()
            .map_err(|error| Error::Storage(error.to_string()))?;
        guard.insert(self.username(key), value.to_string());
        Ok(())
    }

    #[cfg(not(test))]
    fn remove(&self, key: &str) -> Result<()> {
        match self.entry(key)?.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(error) => Err(Error::Storage(error.to_string())),
        }
    }

    #[cfg(test)]
    fn remove(&self, key: &str) -> Result<()> {
        let mut guard = Self::test_store()
            .lock()
            .map_err(|error| Error::Storage(error.to_string()))?;
        guard.remove(&self.username(key));
        Ok(())
    }
}

pub fn open_token_store(
    profile_name: &str,
    profile: &CliProfile,
) -> std::result::Result<Arc<dyn TokenStore>, CliError> {
    match profile.token_store_kind() {
        TokenStoreKind::Keyring => Ok(Arc::new(KeyringTokenStore::new(profile_name))),
        TokenStoreKind::File => {
            let path = default_token_file_path(profile_name).map_err(CliError::TokenStorage)?;
            Ok(Arc::new(FileTokenStore::new(path)))
        }
    }
}
