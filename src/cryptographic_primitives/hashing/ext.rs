/*
    This file is part of Curv library
    Copyright 2018 by Kzen Networks
    (https://github.com/KZen-networks/curv)
    License MIT: <https://github.com/KZen-networks/curv/blob/master/LICENSE>
*/

use digest::core_api::BlockSizeUser;
use digest::Digest;
use hkdf::SimpleHkdf;
use hmac::{Mac, SimpleHmac};
use zeroize::Zeroizing;

/// HMAC (RFC 2104) over any block-oriented digest
pub fn hmac<D>(key: &[u8], data: &[u8]) -> Result<Vec<u8>, digest::InvalidLength>
where
    D: Digest + BlockSizeUser + Clone,
{
    let mut mac = <SimpleHmac<D> as Mac>::new_from_slice(key)?;
    mac.update(data);
    Ok(mac.finalize().into_bytes().to_vec())
}

/// HKDF (RFC 5869) extract-then-expand into `len` bytes of output keying material
pub fn hkdf<D>(
    salt: Option<&[u8]>,
    ikm: &[u8],
    info: &[u8],
    len: usize,
) -> Result<Zeroizing<Vec<u8>>, hkdf::InvalidLength>
where
    D: Digest + BlockSizeUser + Clone,
{
    let mut okm = Zeroizing::new(vec![0u8; len]);
    SimpleHkdf::<D>::new(salt, ikm).expand(info, &mut okm)?;
    Ok(okm)
}
