/*
    This file is part of Curv library
    Copyright 2018 by Kzen Networks
    (https://github.com/KZen-networks/curv)
    License MIT: <https://github.com/KZen-networks/curv/blob/master/LICENSE>
*/

//! SPAKE2 password-authenticated key exchange over NIST P-256.
//!
//! The crate is layered the way its modules are named: big integer [arithmetic], affine
//! [elliptic] curve arithmetic with RFC 9380 hashing to the curve, and the handshake itself in
//! [cryptographic_primitives::twoparty::spake2].

pub mod elliptic;

pub mod arithmetic;
pub use crate::arithmetic::BigInt;

pub mod cryptographic_primitives;

mod marker;
pub use marker::HashChoice;

mod test_utils;

pub use crate::cryptographic_primitives::twoparty::spake2::{
    Confirmation, Participant, Role, SetupParams, Spake2Error,
};
