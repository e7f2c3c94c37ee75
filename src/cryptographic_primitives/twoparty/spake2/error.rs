/*
    This file is part of Curv library
    Copyright 2018 by Kzen Networks
    (https://github.com/KZen-networks/curv)
    License MIT: <https://github.com/KZen-networks/curv/blob/master/LICENSE>
*/

use thiserror::Error;

use crate::elliptic::curves::HashToCurveError;

use super::credentials::CredentialError;
use super::participant::State;

/// Static parameters of a handshake are unusable
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("unknown cipher suite {0:?}")]
    UnknownSuite(String),
    #[error("invalid group element")]
    InvalidGroupElement,
    #[error("invalid group parameter")]
    InvalidGroupParameter,
    #[error("no confirmation cipher for a {0}-byte session key")]
    UnsupportedKeyLength(usize),
    #[error("deriving blinding points failed: {0}")]
    BlindingPoints(#[from] HashToCurveError),
    #[error("key derivation failed")]
    KeyDerivation,
}

#[derive(Debug, Error)]
pub enum Spake2Error {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
    #[error("secure randomness unavailable: {0}")]
    Randomness(#[source] rand::Error),
    #[error("peer share is not a valid group element")]
    InvalidPeerShare,
    #[error(transparent)]
    Credentials(#[from] CredentialError),
    #[error("encrypting confirmation failed")]
    Encryption,
    #[error("malformed confirmation ciphertext")]
    Decryption,
    #[error("confirmation MAC mismatch")]
    AuthenticationFailure,
    #[error("{operation} is not allowed in state {state:?}")]
    InvalidState {
        operation: &'static str,
        state: State,
    },
}

/// What a caller may learn about a failed handshake
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    Configuration,
    Randomness,
    /// Wrong password, tampered share and corrupted ciphertext all land here
    HandshakeFailed,
    Misuse,
}

impl Spake2Error {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Spake2Error::Configuration(_) => ErrorCategory::Configuration,
            Spake2Error::Randomness(_) => ErrorCategory::Randomness,
            Spake2Error::InvalidPeerShare
            | Spake2Error::Credentials(_)
            | Spake2Error::Encryption
            | Spake2Error::Decryption
            | Spake2Error::AuthenticationFailure => ErrorCategory::HandshakeFailed,
            Spake2Error::InvalidState { .. } => ErrorCategory::Misuse,
        }
    }
}
