/*
    This file is part of Curv library
    Copyright 2018 by Kzen Networks
    (https://github.com/KZen-networks/curv)
    License MIT: <https://github.com/KZen-networks/curv/blob/master/LICENSE>
*/

use std::collections::HashMap;
use std::fmt;

use thiserror::Error;
use zeroize::Zeroizing;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CredentialError {
    #[error("no credentials for identity {0:?}")]
    NotFound(String),
}

/// Source of the passwords a server authenticates its clients against
pub trait CredentialStore {
    fn lookup_password(&self, identity: &str) -> Result<Zeroizing<String>, CredentialError>;
}

#[derive(Default)]
pub struct InMemoryCredentialStore {
    passwords: HashMap<String, Zeroizing<String>>,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `identity`, replacing any previous password
    pub fn insert(&mut self, identity: impl Into<String>, password: impl Into<String>) {
        self.passwords
            .insert(identity.into(), Zeroizing::new(password.into()));
    }

    pub fn remove(&mut self, identity: &str) -> bool {
        self.passwords.remove(identity).is_some()
    }

    pub fn len(&self) -> usize {
        self.passwords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.passwords.is_empty()
    }
}

impl CredentialStore for InMemoryCredentialStore {
    fn lookup_password(&self, identity: &str) -> Result<Zeroizing<String>, CredentialError> {
        self.passwords
            .get(identity)
            .cloned()
            .ok_or_else(|| CredentialError::NotFound(identity.to_string()))
    }
}

impl<I, P> std::iter::FromIterator<(I, P)> for InMemoryCredentialStore
where
    I: Into<String>,
    P: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (I, P)>>(iter: T) -> Self {
        let mut store = Self::new();
        for (identity, password) in iter {
            store.insert(identity, password);
        }
        store
    }
}

impl fmt::Debug for InMemoryCredentialStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.passwords.keys()).finish()
    }
}
