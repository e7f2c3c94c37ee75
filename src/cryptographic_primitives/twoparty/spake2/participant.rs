/*
    This file is part of Curv library
    Copyright 2018 by Kzen Networks
    (https://github.com/KZen-networks/curv)
    License MIT: <https://github.com/KZen-networks/curv/blob/master/LICENSE>
*/

//! One party of a SPAKE2 handshake.
//!
//! A [Participant] walks through
//! `Configured → ShareComputed → ElementComputed → TranscriptReady → KeysDerived` and ends in
//! either `Confirmed` or `Rejected`. Calling a phase out of order fails with
//! [Spake2Error::InvalidState] and leaves the participant untouched. Any invalid data from the
//! peer moves it to `Rejected` for good; a new handshake needs a new participant.

use std::fmt;
use std::sync::Arc;

use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};
use serde_derive::{Deserialize, Serialize};
use tracing::{debug, trace, warn};
use zeroize::{Zeroize, Zeroizing};

use crate::arithmetic::traits::*;
use crate::arithmetic::Zero;
use crate::elliptic::curves::Point;
use crate::BigInt;

use super::confirmation::ConfirmationChannel;
use super::error::Spake2Error;
use super::suite::{cofactor_reduction, select_suite, BlindingPoints, CipherSuite, P256_SHA256};
use super::transcript::Transcript;

/// Side of the handshake. The Initiator (the server, "A") is blinded with `M` and fills the
/// first transcript slots; the Responder ("B") is blinded with `N`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Initiator,
    Responder,
}

impl Role {
    /// Swaps a pair between `(own, peer)` order and transcript slot order `(A, B)`. The
    /// mapping is its own inverse.
    pub fn orient<T>(self, first: T, second: T) -> (T, T) {
        match self {
            Role::Initiator => (first, second),
            Role::Responder => (second, first),
        }
    }

    pub fn peer(self) -> Role {
        match self {
            Role::Initiator => Role::Responder,
            Role::Responder => Role::Initiator,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum State {
    Configured,
    ShareComputed,
    ElementComputed,
    TranscriptReady,
    KeysDerived,
    Confirmed,
    Rejected,
}

/// Outcome of checking the peer's confirmation. Deliberately carries no reason.
#[must_use]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Confirmation {
    Confirmed,
    Rejected,
}

fn default_suite() -> String {
    P256_SHA256.to_string()
}

/// Everything needed to set up a [Participant]
#[derive(Clone, Deserialize)]
pub struct SetupParams {
    pub role: Role,
    pub password: String,
    pub identity: String,
    pub opponent_identity: String,
    #[serde(default = "default_suite")]
    pub suite: String,
    /// Negotiated sub-prime `p'`, giving the cofactor-reduction factor `h = n / p'`
    #[serde(default)]
    pub group_parameter: Option<BigInt>,
    /// Replaces the derived `M` and `N`; validated at setup
    #[serde(default)]
    pub blinding_points: Option<BlindingPoints>,
}

impl SetupParams {
    pub fn new(
        role: Role,
        password: impl Into<String>,
        identity: impl Into<String>,
        opponent_identity: impl Into<String>,
        suite: impl Into<String>,
    ) -> Self {
        Self {
            role,
            password: password.into(),
            identity: identity.into(),
            opponent_identity: opponent_identity.into(),
            suite: suite.into(),
            group_parameter: None,
            blinding_points: None,
        }
    }

    pub fn with_group_parameter(mut self, group_parameter: BigInt) -> Self {
        self.group_parameter = Some(group_parameter);
        self
    }

    pub fn with_blinding_points(mut self, blinding_points: BlindingPoints) -> Self {
        self.blinding_points = Some(blinding_points);
        self
    }
}

impl Drop for SetupParams {
    fn drop(&mut self) {
        self.password.zeroize();
    }
}

impl fmt::Debug for SetupParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SetupParams")
            .field("role", &self.role)
            .field("password", &"<redacted>")
            .field("identity", &self.identity)
            .field("opponent_identity", &self.opponent_identity)
            .field("suite", &self.suite)
            .field("group_parameter", &self.group_parameter)
            .field("blinding_points", &self.blinding_points.is_some())
            .finish()
    }
}

/// Session key and confirmation keys as seen by one role
struct RoleKeys {
    session_key: Zeroizing<Vec<u8>>,
    own_confirmation: Zeroizing<Vec<u8>>,
    expected_confirmation: Zeroizing<Vec<u8>>,
}

pub struct Participant {
    suite: Arc<dyn CipherSuite>,
    role: Role,
    identity: String,
    opponent_identity: String,
    w: BigInt,
    h: BigInt,
    own_blinding_point: Point,
    peer_blinding_point: Point,
    x: BigInt,
    blinded_password: Point,
    own_share: Vec<u8>,
    peer_share: Vec<u8>,
    shared_element: Zeroizing<Vec<u8>>,
    transcript: Option<Transcript>,
    keys: Option<RoleKeys>,
    state: State,
}

impl Participant {
    /// Selects the suite, assigns the blinding points by role and computes `w`.
    pub fn set_up(params: &SetupParams) -> Result<Self, Spake2Error> {
        let suite = select_suite(&params.suite)?;
        let curve = suite.curve();

        let blinding_points = match &params.blinding_points {
            Some(points) => {
                points.validate(curve)?;
                points.clone()
            }
            None => suite.blinding_points().clone(),
        };
        let h = cofactor_reduction(curve, params.group_parameter.as_ref())?;
        let (own_blinding_point, peer_blinding_point) =
            params.role.orient(blinding_points.m, blinding_points.n);
        let w = suite.compute_w(params.password.as_bytes());

        debug!(
            role = ?params.role,
            identity = %params.identity,
            opponent = %params.opponent_identity,
            suite = suite.name(),
            "participant configured"
        );
        Ok(Self {
            role: params.role,
            identity: params.identity.clone(),
            opponent_identity: params.opponent_identity.clone(),
            w,
            h,
            own_blinding_point,
            peer_blinding_point,
            x: BigInt::zero(),
            blinded_password: Point::Identity,
            own_share: Vec::new(),
            peer_share: Vec::new(),
            shared_element: Zeroizing::new(Vec::new()),
            transcript: None,
            keys: None,
            state: State::Configured,
            suite,
        })
    }

    /// Samples `x` from the operating system and returns the encoded share
    /// `x·G + w·own_blinding_point`.
    pub fn compute_public_share(&mut self) -> Result<Vec<u8>, Spake2Error> {
        self.compute_public_share_with_rng(&mut OsRng)
    }

    pub fn compute_public_share_with_rng<R: RngCore + CryptoRng>(
        &mut self,
        rng: &mut R,
    ) -> Result<Vec<u8>, Spake2Error> {
        self.require("compute_public_share", &[State::Configured])?;
        let sampled = BigInt::sample_below_with_rng(self.suite.curve().order(), rng);
        match sampled {
            Ok(x) => Ok(self.publish_share(x)),
            Err(error) => {
                let error = Spake2Error::Randomness(error);
                self.reject(&error);
                Err(error)
            }
        }
    }

    /// Same as [compute_public_share](Self::compute_public_share) with a caller-chosen secret,
    /// reduced modulo the group order. Meant for reproducible test runs only.
    pub fn compute_public_share_with_fixed_secret(
        &mut self,
        x: &BigInt,
    ) -> Result<Vec<u8>, Spake2Error> {
        self.require("compute_public_share", &[State::Configured])?;
        let x = x.modulus(self.suite.curve().order());
        Ok(self.publish_share(x))
    }

    fn publish_share(&mut self, x: BigInt) -> Vec<u8> {
        let curve = self.suite.curve();
        let blinded_password = curve.multiply(&self.own_blinding_point, &self.w);
        let share = curve.add(&curve.base_multiply(&x), &blinded_password);
        let encoded = curve.encode_point(&share);

        self.x = x;
        self.blinded_password = blinded_password;
        self.own_share = encoded.clone();
        trace!(role = ?self.role, share = %hex::encode(&encoded), "public share");
        self.advance(State::ShareComputed);
        encoded
    }

    /// Validates the peer's share and computes `K = h·x·(peer_share − w·peer_blinding_point)`.
    pub fn compute_shared_element(&mut self, peer_share: &[u8]) -> Result<(), Spake2Error> {
        self.require("compute_shared_element", &[State::ShareComputed])?;
        trace!(role = ?self.role, share = %hex::encode(peer_share), "peer share");
        match self.shared_element_from(peer_share) {
            Ok(shared_element) => {
                self.shared_element = shared_element;
                self.peer_share = peer_share.to_vec();
                self.x.zeroize();
                self.advance(State::ElementComputed);
                Ok(())
            }
            Err(error) => {
                self.reject(&error);
                Err(error)
            }
        }
    }

    fn shared_element_from(&self, peer_share: &[u8]) -> Result<Zeroizing<Vec<u8>>, Spake2Error> {
        let curve = self.suite.curve();
        let peer = curve.decode_point(peer_share).map_err(|error| {
            debug!(role = ?self.role, %error, "undecodable peer share");
            Spake2Error::InvalidPeerShare
        })?;
        if peer.is_identity() {
            return Err(Spake2Error::InvalidPeerShare);
        }

        let unblinded = curve.subtract(&peer, &curve.multiply(&self.peer_blinding_point, &self.w));
        let mut exponent = &self.h * &self.x;
        let mut shared_element = curve.multiply(&unblinded, &exponent);
        exponent.zeroize();
        if shared_element.is_identity() {
            return Err(Spake2Error::InvalidPeerShare);
        }
        let encoded = Zeroizing::new(curve.encode_point(&shared_element));
        shared_element.zeroize();
        Ok(encoded)
    }

    /// Builds `TT` with the Initiator's values in the A slots, whichever side we are.
    pub fn compute_transcript(&mut self) -> Result<&Transcript, Spake2Error> {
        self.require("compute_transcript", &[State::ElementComputed])?;
        let (id_a, id_b) = self.role.orient(&self.identity, &self.opponent_identity);
        let (share_a, share_b) = self.role.orient(&self.own_share, &self.peer_share);
        let w = Zeroizing::new(self.w.to_bytes_padded(self.suite.curve().scalar_len()));
        let transcript = Transcript::spake2(id_a, id_b, share_a, share_b, &self.shared_element, &w);

        self.advance(State::TranscriptReady);
        let transcript: &Transcript = self.transcript.insert(transcript);
        Ok(transcript)
    }

    /// Splits the key schedule of `TT` into the session key and this role's confirmation keys.
    pub fn derive_keys(&mut self) -> Result<(), Spake2Error> {
        self.require("derive_keys", &[State::TranscriptReady])?;
        let schedule = self.suite.kdf(self.transcript_ref("derive_keys")?.as_bytes())?;
        let (own_confirmation, expected_confirmation) = self
            .role
            .orient(schedule.confirmation_a, schedule.confirmation_b);
        self.keys = Some(RoleKeys {
            session_key: schedule.session_key,
            own_confirmation,
            expected_confirmation,
        });
        self.advance(State::KeysDerived);
        Ok(())
    }

    /// Encrypts our confirmation key under the session key with a fresh nonce
    pub fn produce_confirmation(&self) -> Result<Vec<u8>, Spake2Error> {
        self.produce_confirmation_with_rng(&mut OsRng)
    }

    pub fn produce_confirmation_with_rng<R: RngCore + CryptoRng>(
        &self,
        rng: &mut R,
    ) -> Result<Vec<u8>, Spake2Error> {
        self.require(
            "produce_confirmation",
            &[State::KeysDerived, State::Confirmed],
        )?;
        let keys = self.keys_ref("produce_confirmation")?;
        let channel = ConfirmationChannel::new(&keys.session_key)?;
        let ciphertext = channel.encrypt_with_rng(&keys.own_confirmation, rng)?;
        debug!(role = ?self.role, "confirmation produced");
        Ok(ciphertext)
    }

    /// Decrypts the peer's confirmation key and compares `MAC(received, TT)` with
    /// `MAC(expected, TT)`. Every failure looks the same to the caller; the reason is only
    /// logged.
    pub fn verify_confirmation(&mut self, ciphertext: &[u8]) -> Result<Confirmation, Spake2Error> {
        self.require("verify_confirmation", &[State::KeysDerived])?;
        match self.check_confirmation(ciphertext) {
            Ok(()) => {
                self.advance(State::Confirmed);
                Ok(Confirmation::Confirmed)
            }
            Err(reason) => {
                self.reject(&reason);
                Ok(Confirmation::Rejected)
            }
        }
    }

    fn check_confirmation(&self, ciphertext: &[u8]) -> Result<(), Spake2Error> {
        let keys = self.keys_ref("verify_confirmation")?;
        let transcript = self.transcript_ref("verify_confirmation")?;
        let received = ConfirmationChannel::new(&keys.session_key)?.decrypt(ciphertext)?;
        if self
            .suite
            .mac_equal(&received, &keys.expected_confirmation, transcript.as_bytes())?
        {
            Ok(())
        } else {
            Err(Spake2Error::AuthenticationFailure)
        }
    }

    /// The session key `Ke`, available once the peer's confirmation checked out
    pub fn session_key(&self) -> Result<&[u8], Spake2Error> {
        self.require("session_key", &[State::Confirmed])?;
        Ok(&self.keys_ref("session_key")?.session_key[..])
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn identity(&self) -> &str {
        &self.identity
    }

    pub fn opponent_identity(&self) -> &str {
        &self.opponent_identity
    }

    pub fn suite(&self) -> &dyn CipherSuite {
        self.suite.as_ref()
    }

    /// Our encoded public share, once computed
    pub fn public_share(&self) -> Option<&[u8]> {
        if self.own_share.is_empty() {
            None
        } else {
            Some(&self.own_share[..])
        }
    }

    pub fn transcript(&self) -> Option<&Transcript> {
        self.transcript.as_ref()
    }

    fn require(&self, operation: &'static str, allowed: &[State]) -> Result<(), Spake2Error> {
        if allowed.contains(&self.state) {
            Ok(())
        } else {
            Err(Spake2Error::InvalidState {
                operation,
                state: self.state,
            })
        }
    }

    fn keys_ref(&self, operation: &'static str) -> Result<&RoleKeys, Spake2Error> {
        self.keys.as_ref().ok_or(Spake2Error::InvalidState {
            operation,
            state: self.state,
        })
    }

    fn transcript_ref(&self, operation: &'static str) -> Result<&Transcript, Spake2Error> {
        self.transcript.as_ref().ok_or(Spake2Error::InvalidState {
            operation,
            state: self.state,
        })
    }

    fn advance(&mut self, next: State) {
        debug!(role = ?self.role, from = ?self.state, to = ?next, "state transition");
        self.state = next;
    }

    fn reject(&mut self, reason: &Spake2Error) {
        warn!(
            role = ?self.role,
            identity = %self.identity,
            opponent = %self.opponent_identity,
            category = ?reason.category(),
            "handshake rejected"
        );
        debug!(role = ?self.role, %reason, "rejection reason");
        self.erase_secrets();
        self.state = State::Rejected;
    }

    fn erase_secrets(&mut self) {
        self.x.zeroize();
        self.w.zeroize();
        self.blinded_password.zeroize();
        self.shared_element.zeroize();
        self.transcript = None;
        self.keys = None;
    }

    #[cfg(test)]
    pub(crate) fn confirmation_keys(&self) -> Option<(&[u8], &[u8])> {
        self.keys
            .as_ref()
            .map(|keys| (&keys.own_confirmation[..], &keys.expected_confirmation[..]))
    }

    #[cfg(test)]
    pub(crate) fn unconfirmed_session_key(&self) -> Option<&[u8]> {
        self.keys.as_ref().map(|keys| &keys.session_key[..])
    }
}

impl Drop for Participant {
    fn drop(&mut self) {
        self.erase_secrets();
    }
}

impl fmt::Debug for Participant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Participant")
            .field("role", &self.role)
            .field("identity", &self.identity)
            .field("opponent_identity", &self.opponent_identity)
            .field("suite", &self.suite.name())
            .field("state", &self.state)
            .finish()
    }
}
