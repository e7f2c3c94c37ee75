/*
    This file is part of Curv library
    Copyright 2018 by Kzen Networks
    (https://github.com/KZen-networks/curv)
    License MIT: <https://github.com/KZen-networks/curv/blob/master/LICENSE>
*/

/// This is an implementation of the SPAKE2 password-authenticated key exchange.
/// Both parties know a low-entropy password `pw`, hashed to a scalar `w`.
/// Initiator private key is "x", Responder private key is "y",
/// protocol:
/// the initiator sends pA = x·G + w·M, the responder sends pB = y·G + w·N
/// each party removes the other's blinding and computes K = h·x·y·G
/// both hash the transcript (identities, shares, K, w) into a session key and two
/// confirmation keys, then exchange encrypted confirmations
/// reference: <https://datatracker.ietf.org/doc/html/rfc9382>
pub mod spake2;
