/*
    This file is part of Curv library
    Copyright 2018 by Kzen Networks
    (https://github.com/KZen-networks/curv)
    License MIT: <https://github.com/KZen-networks/curv/blob/master/LICENSE>
*/

use std::fmt;
use std::marker::PhantomData;

use digest::Digest;

/// Zero-sized marker type denoting choice of hash function
///
/// `fn(H)` keeps the marker `Send + Sync` whatever `H` is.
pub struct HashChoice<H: Digest>(PhantomData<fn(H)>);

impl<H: Digest> HashChoice<H> {
    pub fn new() -> Self {
        Self(PhantomData)
    }

    /// Digest length in bytes
    pub fn output_size(&self) -> usize {
        <H as Digest>::output_size()
    }

    pub fn digest(&self, data: &[u8]) -> Vec<u8> {
        H::digest(data).to_vec()
    }
}

impl<H: Digest> Default for HashChoice<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: Digest> Clone for HashChoice<H> {
    fn clone(&self) -> Self {
        Self::new()
    }
}

impl<H: Digest> Copy for HashChoice<H> {}

impl<H: Digest> fmt::Debug for HashChoice<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HashChoice<{}>", std::any::type_name::<H>())
    }
}
