/*
    This file is part of Curv library
    Copyright 2018 by Kzen Networks
    (https://github.com/KZen-networks/curv)
    License MIT: <https://github.com/KZen-networks/curv/blob/master/LICENSE>
*/

//! SPAKE2 handshake between an Initiator (server) and a Responder (client).
//!
//! ```
//! use spake2::cryptographic_primitives::twoparty::spake2::*;
//!
//! # fn main() -> Result<(), Spake2Error> {
//! let server = SetupParams::new(Role::Initiator, "pw", "alice", "bob", P256_SHA256);
//! let client = SetupParams::new(Role::Responder, "pw", "bob", "alice", P256_SHA256);
//! let mut a = Participant::set_up(&server)?;
//! let mut b = Participant::set_up(&client)?;
//!
//! let share_a = a.compute_public_share()?;
//! let share_b = b.compute_public_share()?;
//! a.compute_shared_element(&share_b)?;
//! b.compute_shared_element(&share_a)?;
//! a.compute_transcript()?;
//! b.compute_transcript()?;
//! a.derive_keys()?;
//! b.derive_keys()?;
//!
//! assert_eq!(b.verify_confirmation(&a.produce_confirmation()?)?, Confirmation::Confirmed);
//! assert_eq!(a.verify_confirmation(&b.produce_confirmation()?)?, Confirmation::Confirmed);
//! assert_eq!(a.session_key()?, b.session_key()?);
//! # Ok(())
//! # }
//! ```

mod confirmation;
mod credentials;
mod error;
mod messages;
mod participant;
mod server;
mod session;
mod suite;
mod transcript;


pub use self::confirmation::{ConfirmationChannel, NONCE_LEN};
pub use self::credentials::{CredentialError, CredentialStore, InMemoryCredentialStore};
pub use self::error::{ConfigurationError, ErrorCategory, Spake2Error};
pub use self::messages::{ConfirmationMessage, HelloRequest, HelloResponse, PublicShareMessage};
pub use self::participant::{Confirmation, Participant, Role, SetupParams, State};
pub use self::server::accept_hello;
pub use self::session::{SessionError, SessionTable};
pub use self::suite::{
    cofactor_reduction, compute_w, derive_blinding_points, select_suite, BlindingPoints,
    CipherSuite, KeySchedule, Spake2Suite, CONFIRMATION_KEYS_INFO, P256_ALIAS, P256_CONFIRMATION_KEY_LEN,
    P256_SHA256, P256_SHA512, SUPPORTED_SUITES,
};
pub use self::transcript::{Transcript, TranscriptBuilder};
