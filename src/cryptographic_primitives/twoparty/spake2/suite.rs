/*
    This file is part of Curv library
    Copyright 2018 by Kzen Networks
    (https://github.com/KZen-networks/curv)
    License MIT: <https://github.com/KZen-networks/curv/blob/master/LICENSE>
*/

//! Cipher suites: a curve bundled with the hash, KDF and MAC a handshake runs on.
//!
//! Suites are looked up by name in a fixed registry and shared read-only between handshakes.

use std::fmt;
use std::sync::{Arc, OnceLock};

use digest::core_api::BlockSizeUser;
use digest::Digest;
use serde_derive::{Deserialize, Serialize};
use sha2::{Sha256, Sha512};
use subtle::ConstantTimeEq;
use zeroize::{Zeroize, Zeroizing};

use crate::arithmetic::traits::*;
use crate::cryptographic_primitives::hashing::{hkdf, hmac};
use crate::elliptic::curves::hash_to_curve::hash_to_curve;
use crate::elliptic::curves::{secp256r1, Curve, Point};
use crate::{BigInt, HashChoice};

use super::error::ConfigurationError;

pub const P256_SHA256: &str = "P256-SHA256-HKDF-HMAC-SHA256";
pub const P256_SHA512: &str = "P256-SHA512-HKDF-HMAC-SHA512";
/// Short name accepted for [P256_SHA256]
pub const P256_ALIAS: &str = "P256";

pub const SUPPORTED_SUITES: [&str; 2] = [P256_SHA256, P256_SHA512];

/// HKDF info string of the confirmation key expansion
pub const CONFIRMATION_KEYS_INFO: &[u8] = b"ConfirmationKeys";

/// Confirmation key material `L` drawn from HKDF on P-256, in bytes
pub const P256_CONFIRMATION_KEY_LEN: usize = 256;

/// Output of the key schedule, in transcript slot order
pub struct KeySchedule {
    pub session_key: Zeroizing<Vec<u8>>,
    /// Confirmation key sent by A and expected by B
    pub confirmation_a: Zeroizing<Vec<u8>>,
    /// Confirmation key sent by B and expected by A
    pub confirmation_b: Zeroizing<Vec<u8>>,
}

/// Capability interface of a suite
pub trait CipherSuite: fmt::Debug + Send + Sync {
    fn name(&self) -> &'static str;

    fn curve(&self) -> &Curve;

    fn blinding_points(&self) -> &BlindingPoints;

    /// Length of the confirmation key material `L`, split into two halves
    fn confirmation_key_len(&self) -> usize;

    fn hash(&self, data: &[u8]) -> Zeroizing<Vec<u8>>;

    fn mac(&self, key: &[u8], data: &[u8]) -> Result<Vec<u8>, ConfigurationError>;

    fn expand(&self, ikm: &[u8], info: &[u8], len: usize)
        -> Result<Zeroizing<Vec<u8>>, ConfigurationError>;

    /// Password scalar `w = Hash(password) mod n`
    fn compute_w(&self, password: &[u8]) -> BigInt {
        let digest = self.hash(password);
        let mut reduced = BigInt::from_bytes(&digest);
        let w = reduced.modulus(self.curve().order());
        reduced.zeroize();
        w
    }

    /// `Hash(TT) = Ke || Ka`, then `HKDF(Ka, "ConfirmationKeys")` split into the two
    /// confirmation keys.
    fn kdf(&self, transcript: &[u8]) -> Result<KeySchedule, ConfigurationError> {
        let digest = self.hash(transcript);
        let (ke, ka) = digest.split_at(digest.len() / 2);
        let len = self.confirmation_key_len();
        let material = self.expand(ka, CONFIRMATION_KEYS_INFO, len)?;
        let (kc_a, kc_b) = material.split_at(len / 2);
        Ok(KeySchedule {
            session_key: Zeroizing::new(ke.to_vec()),
            confirmation_a: Zeroizing::new(kc_a.to_vec()),
            confirmation_b: Zeroizing::new(kc_b.to_vec()),
        })
    }

    /// Whether `MAC(key_a, TT)` and `MAC(key_b, TT)` agree, compared in constant time
    fn mac_equal(
        &self,
        key_a: &[u8],
        key_b: &[u8],
        transcript: &[u8],
    ) -> Result<bool, ConfigurationError> {
        let tag_a = self.mac(key_a, transcript)?;
        let tag_b = self.mac(key_b, transcript)?;
        Ok(tag_a[..].ct_eq(&tag_b[..]).into())
    }
}

/// SPAKE2 over a short Weierstrass curve with hash `D`, HKDF-`D` and HMAC-`D`
pub struct Spake2Suite<D: Digest> {
    name: &'static str,
    curve: Curve,
    blinding_points: BlindingPoints,
    confirmation_key_len: usize,
    hash: HashChoice<D>,
}

impl<D> Spake2Suite<D>
where
    D: Digest + BlockSizeUser + Clone,
{
    pub fn new(
        name: &'static str,
        curve: Curve,
        confirmation_key_len: usize,
    ) -> Result<Self, ConfigurationError> {
        let hash = HashChoice::<D>::new();
        // HKDF expands to at most 255 hash blocks
        if confirmation_key_len == 0
            || confirmation_key_len % 2 != 0
            || confirmation_key_len > 255 * hash.output_size()
        {
            return Err(ConfigurationError::UnsupportedKeyLength(confirmation_key_len));
        }
        let blinding_points = BlindingPoints::derive(&curve, name)?;
        Ok(Self {
            name,
            curve,
            blinding_points,
            confirmation_key_len,
            hash,
        })
    }
}

impl<D: Digest> fmt::Debug for Spake2Suite<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Spake2Suite")
            .field("name", &self.name)
            .field("curve", &self.curve.name())
            .field("confirmation_key_len", &self.confirmation_key_len)
            .field("hash", &self.hash)
            .finish()
    }
}

impl<D> CipherSuite for Spake2Suite<D>
where
    D: Digest + BlockSizeUser + Clone,
{
    fn name(&self) -> &'static str {
        self.name
    }

    fn curve(&self) -> &Curve {
        &self.curve
    }

    fn blinding_points(&self) -> &BlindingPoints {
        &self.blinding_points
    }

    fn confirmation_key_len(&self) -> usize {
        self.confirmation_key_len
    }

    fn hash(&self, data: &[u8]) -> Zeroizing<Vec<u8>> {
        Zeroizing::new(self.hash.digest(data))
    }

    fn mac(&self, key: &[u8], data: &[u8]) -> Result<Vec<u8>, ConfigurationError> {
        hmac::<D>(key, data).map_err(|_| ConfigurationError::KeyDerivation)
    }

    fn expand(
        &self,
        ikm: &[u8],
        info: &[u8],
        len: usize,
    ) -> Result<Zeroizing<Vec<u8>>, ConfigurationError> {
        hkdf::<D>(None, ikm, info, len).map_err(|_| ConfigurationError::KeyDerivation)
    }
}

/// Looks a suite up in the registry. Each suite is built once per process.
pub fn select_suite(name: &str) -> Result<Arc<dyn CipherSuite>, ConfigurationError> {
    type Slot = OnceLock<Result<Arc<dyn CipherSuite>, ConfigurationError>>;
    static P256_SHA256_SUITE: Slot = OnceLock::new();
    static P256_SHA512_SUITE: Slot = OnceLock::new();

    let slot = match name {
        P256_SHA256 | P256_ALIAS => P256_SHA256_SUITE.get_or_init(|| {
            Spake2Suite::<Sha256>::new(P256_SHA256, secp256r1(), P256_CONFIRMATION_KEY_LEN)
                .map(|suite| Arc::new(suite) as Arc<dyn CipherSuite>)
        }),
        P256_SHA512 => P256_SHA512_SUITE.get_or_init(|| {
            Spake2Suite::<Sha512>::new(P256_SHA512, secp256r1(), P256_CONFIRMATION_KEY_LEN)
                .map(|suite| Arc::new(suite) as Arc<dyn CipherSuite>)
        }),
        _ => return Err(ConfigurationError::UnknownSuite(name.to_string())),
    };
    slot.clone()
}

/// The password scalar for `password` under `suite`
pub fn compute_w(password: &[u8], suite: &dyn CipherSuite) -> BigInt {
    suite.compute_w(password)
}

/// The public blinding points `M` (Initiator) and `N` (Responder)
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlindingPoints {
    pub m: Point,
    pub n: Point,
}

impl BlindingPoints {
    /// Hashes `"M"` and `"N"` to the curve with a suite-specific domain separation tag
    pub fn derive(curve: &Curve, suite_name: &str) -> Result<Self, ConfigurationError> {
        let dst = format!("SPAKE2-V1-{}_XMD:SHA-256_SSWU_RO_", suite_name);
        Ok(Self {
            m: hash_to_curve::<Sha256>(curve, b"M", dst.as_bytes())?,
            n: hash_to_curve::<Sha256>(curve, b"N", dst.as_bytes())?,
        })
    }

    /// Both points must be distinct non-identity elements of `curve`
    pub fn validate(&self, curve: &Curve) -> Result<(), ConfigurationError> {
        let valid = |point: &Point| !point.is_identity() && curve.is_on_curve(point);
        if !valid(&self.m) || !valid(&self.n) || self.m == self.n {
            return Err(ConfigurationError::InvalidGroupElement);
        }
        Ok(())
    }
}

/// `(M, N)` of the named suite
pub fn derive_blinding_points(suite_name: &str) -> Result<BlindingPoints, ConfigurationError> {
    Ok(select_suite(suite_name)?.blinding_points().clone())
}

/// Cofactor-reduction factor `h = n / p'` for a negotiated group parameter `p'`
pub fn cofactor_reduction(
    curve: &Curve,
    group_parameter: Option<&BigInt>,
) -> Result<BigInt, ConfigurationError> {
    let sub_prime = match group_parameter {
        None => return Ok(curve.cofactor().clone()),
        Some(p) => p,
    };
    if BigInt::is_negative(sub_prime) || BigInt::is_zero(sub_prime) {
        return Err(ConfigurationError::InvalidGroupParameter);
    }
    let order = curve.order();
    let h = order / sub_prime;
    if BigInt::is_zero(&h) || BigInt::is_zero(&h.modulus(order)) {
        return Err(ConfigurationError::InvalidGroupParameter);
    }
    Ok(h)
}

#[cfg(test)]
mod tests {
    use sha2::Sha256;

    use super::*;
    use crate::arithmetic::One;

    fn same_suite(a: &Arc<dyn CipherSuite>, b: &Arc<dyn CipherSuite>) -> bool {
        Arc::ptr_eq(a, b)
    }

    #[test]
    fn registry_knows_supported_suites() {
        for name in SUPPORTED_SUITES.iter() {
            let suite = select_suite(name).unwrap();
            assert_eq!(suite.name(), *name);
            assert_eq!(suite.curve().name(), "P-256");
        }
        let suite = select_suite(P256_SHA256).unwrap();
        assert!(same_suite(&suite, &select_suite(P256_SHA256).unwrap()));
        assert!(same_suite(&suite, &select_suite(P256_ALIAS).unwrap()));
    }

    #[test]
    fn unknown_suite_is_rejected() {
        assert_eq!(
            select_suite("P384-SHA384").unwrap_err(),
            ConfigurationError::UnknownSuite("P384-SHA384".to_string())
        );
        assert!(derive_blinding_points("").is_err());
    }

    #[test]
    fn key_lengths() {
        let sha256 = select_suite(P256_SHA256).unwrap();
        assert_eq!(sha256.confirmation_key_len(), P256_CONFIRMATION_KEY_LEN);
        let schedule = sha256.kdf(b"transcript").unwrap();
        assert_eq!(schedule.session_key.len(), 16);
        assert_eq!(schedule.confirmation_a.len(), 128);
        assert_eq!(schedule.confirmation_b.len(), 128);
        assert_ne!(schedule.confirmation_a, schedule.confirmation_b);

        let sha512 = select_suite(P256_SHA512).unwrap();
        let schedule = sha512.kdf(b"transcript").unwrap();
        assert_eq!(schedule.session_key.len(), 32);
        assert_eq!(schedule.confirmation_a.len(), 128);
        assert_eq!(schedule.confirmation_b.len(), 128);
    }

    #[test]
    fn unusable_confirmation_key_lengths_are_rejected() {
        for &len in [0usize, 255, 255 * 32 + 2].iter() {
            assert_eq!(
                Spake2Suite::<Sha256>::new(P256_SHA256, secp256r1(), len).unwrap_err(),
                ConfigurationError::UnsupportedKeyLength(len)
            );
        }
    }

    #[test]
    fn kdf_splits_the_transcript_digest() {
        let suite = select_suite(P256_SHA256).unwrap();
        let transcript = b"some transcript";
        let digest = Sha256::digest(transcript);
        let schedule = suite.kdf(transcript).unwrap();
        assert_eq!(&schedule.session_key[..], &digest[..16]);

        let material = hkdf::<Sha256>(None, &digest[16..], b"ConfirmationKeys", 256).unwrap();
        assert_eq!(&schedule.confirmation_a[..], &material[..128]);
        assert_eq!(&schedule.confirmation_b[..], &material[128..]);
    }

    #[test]
    fn mac_equality() {
        let suite = select_suite(P256_SHA256).unwrap();
        assert!(suite.mac_equal(b"key", b"key", b"tt").unwrap());
        assert!(!suite.mac_equal(b"key", b"kez", b"tt").unwrap());
        assert_eq!(suite.mac(b"key", b"tt").unwrap().len(), 32);
    }

    #[test]
    fn w_is_reduced_modulo_the_order() {
        let suite = select_suite(P256_SHA256).unwrap();
        let w = compute_w(b"correct-horse-battery", suite.as_ref());
        let expected = BigInt::from_hex(
            "62249369389075490555a758353aec61500c6218fa597252d52dc4bd0148f12d",
        )
        .unwrap();
        assert_eq!(w, expected);
        let digest = BigInt::from_bytes(&Sha256::digest(b"correct-horse-battery"));
        assert_eq!(w, digest.modulus(suite.curve().order()));
        assert!(&w < suite.curve().order());

        let sha512 = select_suite(P256_SHA512).unwrap();
        let w = compute_w(b"correct-horse-battery", sha512.as_ref());
        assert!(&w < sha512.curve().order());
        assert_ne!(w, expected);
    }

    #[test]
    fn blinding_points_are_deterministic_and_distinct() {
        let curve = secp256r1();
        let points = BlindingPoints::derive(&curve, P256_SHA256).unwrap();
        assert_eq!(points, BlindingPoints::derive(&curve, P256_SHA256).unwrap());
        assert_eq!(points, derive_blinding_points(P256_SHA256).unwrap());
        assert_eq!(points, derive_blinding_points(P256_ALIAS).unwrap());
        points.validate(&curve).unwrap();

        let other = derive_blinding_points(P256_SHA512).unwrap();
        assert_ne!(points.m, other.m);
        assert_ne!(points.n, other.n);
    }

    // SEC1 encodings of M and N under "SPAKE2-V1-<suite>_XMD:SHA-256_SSWU_RO_"
    #[test]
    fn blinding_points_known_answers() {
        let vectors = [
            (
                P256_SHA256,
                "04896a5ffc5434977680d6904d85c67c7f5a0082676b0b8c56d81cdc51a74582d9\
                 283ca2002f2eb913a51a379911d8c4a1e9646cc846a44f2d941e63a33707f868",
                "04beee62cf7b0ee6d30ce9ea993b288f37cb5129912297561d4afd5a07575b3179\
                 ae6230c5be20522d3244a05e0f75a8f30d947b340addd6bf41cdf945c0bf6df6",
            ),
            (
                P256_SHA512,
                "046f80be847d8f4b608155543c14d741de8cbc031a471517bf78915167005887c0\
                 6558c493e64a19462e55099b2221668de1372e5dcdd846cc97a2d144650667c4",
                "0428c3177ac9a6dd91dde78010fb1c87d67aa40eb8a05dd5c8932233f28c83a6b8\
                 6322a2c96efcb7f1b4a164f70e5404aa7ce9c2fbad666bcfb3b9222f1ec70796",
            ),
        ];
        let curve = secp256r1();
        for (suite, m, n) in vectors.iter() {
            let points = derive_blinding_points(suite).unwrap();
            assert_eq!(hex::encode(curve.encode_point(&points.m)), *m, "M of {}", suite);
            assert_eq!(hex::encode(curve.encode_point(&points.n)), *n, "N of {}", suite);
        }
    }

    #[test]
    fn invalid_blinding_points_are_rejected() {
        let curve = secp256r1();
        let points = BlindingPoints::derive(&curve, P256_SHA256).unwrap();

        let identity = BlindingPoints {
            m: Point::Identity,
            n: points.n.clone(),
        };
        assert_eq!(
            identity.validate(&curve),
            Err(ConfigurationError::InvalidGroupElement)
        );

        let off_curve = BlindingPoints {
            m: points.m.clone(),
            n: Point::Affine {
                x: BigInt::one(),
                y: BigInt::one(),
            },
        };
        assert_eq!(
            off_curve.validate(&curve),
            Err(ConfigurationError::InvalidGroupElement)
        );

        let equal = BlindingPoints {
            m: points.m.clone(),
            n: points.m.clone(),
        };
        assert!(equal.validate(&curve).is_err());
    }

    #[test]
    fn cofactor_reduction_validates_the_group_parameter() {
        let curve = secp256r1();
        let n = curve.order().clone();
        assert_eq!(cofactor_reduction(&curve, None).unwrap(), BigInt::one());
        assert_eq!(cofactor_reduction(&curve, Some(&n)).unwrap(), BigInt::one());
        assert_eq!(
            cofactor_reduction(&curve, Some(&BigInt::from(2u32))).unwrap(),
            &n / BigInt::from(2u32)
        );

        for bad in [
            &n + BigInt::one(),
            BigInt::from(0u32),
            BigInt::from(-7),
            BigInt::one(),
        ]
        .iter()
        {
            assert_eq!(
                cofactor_reduction(&curve, Some(bad)),
                Err(ConfigurationError::InvalidGroupParameter),
                "p' = {}",
                bad
            );
        }
    }
}
