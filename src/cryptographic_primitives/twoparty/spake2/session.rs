/*
    This file is part of Curv library
    Copyright 2018 by Kzen Networks
    (https://github.com/KZen-networks/curv)
    License MIT: <https://github.com/KZen-networks/curv/blob/master/LICENSE>
*/

//! Server-side bookkeeping: one [Participant] per in-flight handshake, keyed by a session
//! token. Expired sessions are dropped, which erases their secrets.
//!
//! The table lock only guards the map. Each participant sits behind its own lock, so a slow
//! phase in one session does not hold up the others.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration, Instant};

use thiserror::Error;
use tracing::{error, info};

use super::participant::Participant;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("session {0:?} already exists")]
    Duplicate(String),
    #[error("session {0:?} not found")]
    NotFound(String),
    #[error("session {0:?} is in use")]
    Busy(String),
    #[error("session table lock poisoned")]
    Poisoned,
}

struct Session {
    participant: Arc<Mutex<Participant>>,
    created: Instant,
}

pub struct SessionTable {
    sessions: Mutex<HashMap<String, Session>>,
    ttl: Duration,
}

impl SessionTable {
    /// Sessions older than `ttl` are treated as gone
    pub fn new(ttl: Duration) -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn insert(
        &self,
        token: impl Into<String>,
        participant: Participant,
    ) -> Result<(), SessionError> {
        let token = token.into();
        let mut sessions = self.lock()?;
        if sessions.contains_key(&token) {
            error!(token = %token, "session already exists");
            return Err(SessionError::Duplicate(token));
        }
        info!(token = %token, identity = %participant.opponent_identity(), "session opened");
        sessions.insert(
            token,
            Session {
                participant: Arc::new(Mutex::new(participant)),
                created: Instant::now(),
            },
        );
        Ok(())
    }

    /// Runs `f` on the participant of `token`. Only that session is locked while `f` runs;
    /// `f` must not reenter the same session.
    pub fn with_session<T, F>(&self, token: &str, f: F) -> Result<T, SessionError>
    where
        F: FnOnce(&mut Participant) -> T,
    {
        let participant = {
            let mut sessions = self.lock()?;
            let expired = match sessions.get(token) {
                None => return Err(SessionError::NotFound(token.to_string())),
                Some(session) => session.created.elapsed() > self.ttl,
            };
            if expired {
                sessions.remove(token);
                info!(token = %token, "session expired");
                return Err(SessionError::NotFound(token.to_string()));
            }
            match sessions.get(token) {
                Some(session) => Arc::clone(&session.participant),
                None => return Err(SessionError::NotFound(token.to_string())),
            }
        };
        let mut participant = participant.lock().map_err(|_| {
            error!(token = %token, "failed to lock session");
            SessionError::Poisoned
        })?;
        Ok(f(&mut *participant))
    }

    /// Takes the participant out of the table, typically once its handshake finished. A
    /// session that another caller is still working on stays in place.
    pub fn remove(&self, token: &str) -> Result<Option<Participant>, SessionError> {
        let mut sessions = self.lock()?;
        match sessions.get(token) {
            None => return Ok(None),
            Some(session) if Arc::strong_count(&session.participant) > 1 => {
                return Err(SessionError::Busy(token.to_string()))
            }
            Some(_) => {}
        }
        let session = match sessions.remove(token) {
            Some(session) => session,
            None => return Ok(None),
        };
        drop(sessions);
        info!(token = %token, "session closed");

        let participant = Arc::try_unwrap(session.participant)
            .map_err(|_| SessionError::Busy(token.to_string()))?;
        participant
            .into_inner()
            .map(Some)
            .map_err(|_| SessionError::Poisoned)
    }

    /// Drops every session older than the table's ttl. Returns how many were dropped.
    pub fn evict_expired(&self) -> Result<usize, SessionError> {
        self.evict_expired_at(Instant::now())
    }

    pub fn evict_expired_at(&self, now: Instant) -> Result<usize, SessionError> {
        let ttl = self.ttl;
        let mut sessions = self.lock()?;
        let before = sessions.len();
        sessions.retain(|_, session| now.saturating_duration_since(session.created) <= ttl);
        let evicted = before - sessions.len();
        if evicted > 0 {
            info!(evicted, remaining = sessions.len(), "expired sessions evicted");
        }
        Ok(evicted)
    }

    pub fn len(&self) -> Result<usize, SessionError> {
        Ok(self.lock()?.len())
    }

    pub fn is_empty(&self) -> Result<bool, SessionError> {
        Ok(self.lock()?.is_empty())
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<String, Session>>, SessionError> {
        self.sessions.lock().map_err(|_| {
            error!("failed to lock sessions");
            SessionError::Poisoned
        })
    }
}
