/*
    This file is part of Curv library
    Copyright 2018 by Kzen Networks
    (https://github.com/KZen-networks/curv)
    License MIT: <https://github.com/KZen-networks/curv/blob/master/LICENSE>
*/

//! Hashing arbitrary byte strings to curve points, RFC 9380.
//!
//! Only the pieces needed for the random-oracle encoding on curves with `p ≡ 3 (mod 4)` are
//! implemented: `expand_message_xmd`, `hash_to_field`, the simplified SWU map and cofactor
//! clearing. The resulting point has no known discrete logarithm relative to the generator.

use digest::core_api::BlockSizeUser;
use digest::Digest;

use crate::arithmetic::traits::*;
use crate::arithmetic::{One, Zero};
use crate::BigInt;

use super::error::HashToCurveError;
use super::short_weierstrass::{Curve, Point};

/// RFC 9380 section 5.3.1
pub fn expand_message_xmd<D>(
    msg: &[u8],
    dst: &[u8],
    len_in_bytes: usize,
) -> Result<Vec<u8>, HashToCurveError>
where
    D: Digest + BlockSizeUser,
{
    if dst.is_empty() || dst.len() > 255 {
        return Err(HashToCurveError::InvalidDst(dst.len()));
    }
    let b_in_bytes = <D as Digest>::output_size();
    let s_in_bytes = <D as BlockSizeUser>::block_size();
    let ell = (len_in_bytes + b_in_bytes - 1) / b_in_bytes;
    if len_in_bytes == 0 || ell > 255 || len_in_bytes > usize::from(u16::MAX) {
        return Err(HashToCurveError::OutputTooLong(len_in_bytes));
    }
    let dst_len = [dst.len() as u8];

    let b_0 = D::new()
        .chain_update(vec![0u8; s_in_bytes])
        .chain_update(msg)
        .chain_update((len_in_bytes as u16).to_be_bytes())
        .chain_update([0u8])
        .chain_update(dst)
        .chain_update(dst_len)
        .finalize();

    let mut b_i = D::new()
        .chain_update(&b_0)
        .chain_update([1u8])
        .chain_update(dst)
        .chain_update(dst_len)
        .finalize();

    let mut uniform_bytes = Vec::with_capacity(ell * b_in_bytes);
    uniform_bytes.extend_from_slice(&b_i);
    for i in 2..=ell {
        let mixed: Vec<u8> = b_0.iter().zip(b_i.iter()).map(|(l, r)| l ^ r).collect();
        b_i = D::new()
            .chain_update(mixed)
            .chain_update([i as u8])
            .chain_update(dst)
            .chain_update(dst_len)
            .finalize();
        uniform_bytes.extend_from_slice(&b_i);
    }
    uniform_bytes.truncate(len_in_bytes);
    Ok(uniform_bytes)
}

/// RFC 9380 section 5.2, extension degree 1
pub fn hash_to_field<D>(
    curve: &Curve,
    msg: &[u8],
    dst: &[u8],
    count: usize,
) -> Result<Vec<BigInt>, HashToCurveError>
where
    D: Digest + BlockSizeUser,
{
    let len = curve.hash_to_field_len;
    let uniform_bytes = expand_message_xmd::<D>(msg, dst, count * len)?;
    Ok(uniform_bytes
        .chunks(len)
        .map(|chunk| BigInt::from_bytes(chunk).modulus(curve.prime()))
        .collect())
}

/// Simplified Shallue-van de Woestijne-Ulas map, RFC 9380 section 6.6.2
pub fn map_to_curve_simple_swu(curve: &Curve, u: &BigInt) -> Point {
    let p = curve.prime();
    let z = &curve.sswu_z;

    let z_u2 = BigInt::mod_mul(z, &BigInt::mod_mul(u, u, p), p);
    let tv1 = curve.invert(&BigInt::mod_add(&BigInt::mod_mul(&z_u2, &z_u2, p), &z_u2, p));

    let x1 = if tv1.is_zero() {
        let z_a = BigInt::mod_mul(z, curve.a(), p);
        BigInt::mod_mul(curve.b(), &curve.invert(&z_a), p)
    } else {
        let minus_b_over_a = BigInt::mod_mul(
            &BigInt::mod_sub(&BigInt::zero(), curve.b(), p),
            &curve.invert(curve.a()),
            p,
        );
        BigInt::mod_mul(&minus_b_over_a, &BigInt::mod_add(&BigInt::one(), &tv1, p), p)
    };

    let gx1 = curve.curve_equation(&x1);
    let (x, y) = if is_square(curve, &gx1) {
        let y1 = sqrt(curve, &gx1);
        (x1, y1)
    } else {
        let x2 = BigInt::mod_mul(&z_u2, &x1, p);
        let gx2 = curve.curve_equation(&x2);
        let y2 = sqrt(curve, &gx2);
        (x2, y2)
    };

    let y = if sgn0(u) != sgn0(&y) {
        BigInt::mod_sub(&BigInt::zero(), &y, p)
    } else {
        y
    };
    Point::Affine { x, y }
}

/// `hash_to_curve` random-oracle encoding, RFC 9380 section 3
pub fn hash_to_curve<D>(curve: &Curve, msg: &[u8], dst: &[u8]) -> Result<Point, HashToCurveError>
where
    D: Digest + BlockSizeUser,
{
    let u = hash_to_field::<D>(curve, msg, dst, 2)?;
    let q0 = map_to_curve_simple_swu(curve, &u[0]);
    let q1 = map_to_curve_simple_swu(curve, &u[1]);
    let r = curve.add(&q0, &q1);
    Ok(curve.multiply(&r, curve.cofactor()))
}

fn is_square(curve: &Curve, v: &BigInt) -> bool {
    let p = curve.prime();
    let exponent = (p - BigInt::one()) >> 1;
    let legendre = BigInt::mod_pow(v, &exponent, p);
    legendre.is_zero() || legendre == BigInt::one()
}

/// Square root for `p ≡ 3 (mod 4)`.
fn sqrt(curve: &Curve, v: &BigInt) -> BigInt {
    let p = curve.prime();
    debug_assert!(p.test_bit(0) && p.test_bit(1));
    let exponent = (p + BigInt::one()) >> 2;
    BigInt::mod_pow(v, &exponent, p)
}

fn sgn0(v: &BigInt) -> bool {
    !BigInt::is_even(v)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elliptic::curves::secp256_r1::secp256r1;
    use sha2::{Sha256, Sha512};

    // RFC 9380 appendix K.1
    #[test]
    fn expand_message_xmd_sha256_vector() {
        let dst = b"QUUX-V01-CS02-with-expander-SHA256-128";
        let uniform_bytes = expand_message_xmd::<Sha256>(b"", dst, 0x20).unwrap();
        assert_eq!(
            hex::encode(uniform_bytes),
            "68a985b87eb6b46952128911f2a4412bbc302a9d759667f87f7a21d803f07235"
        );
    }

    #[test]
    fn expand_message_xmd_lengths() {
        let dst = b"spake2-test";
        for len in [1usize, 31, 32, 33, 96, 128, 255].iter() {
            let out = expand_message_xmd::<Sha256>(b"abc", dst, *len).unwrap();
            assert_eq!(out.len(), *len);
        }
        let long = expand_message_xmd::<Sha512>(b"abc", dst, 200).unwrap();
        assert_eq!(long.len(), 200);
        // prefix property does not hold: the requested length is hashed in
        let short = expand_message_xmd::<Sha256>(b"abc", dst, 32).unwrap();
        let longer = expand_message_xmd::<Sha256>(b"abc", dst, 64).unwrap();
        assert_ne!(&short[..], &longer[..32]);
    }

    #[test]
    fn expand_message_xmd_rejects_bad_input() {
        assert_eq!(
            expand_message_xmd::<Sha256>(b"abc", b"", 32),
            Err(HashToCurveError::InvalidDst(0))
        );
        assert_eq!(
            expand_message_xmd::<Sha256>(b"abc", &[0x41; 256], 32),
            Err(HashToCurveError::InvalidDst(256))
        );
        assert_eq!(
            expand_message_xmd::<Sha256>(b"abc", b"dst", 32 * 256),
            Err(HashToCurveError::OutputTooLong(32 * 256))
        );
    }

    // RFC 9380 appendix J.1.1, P256_XMD:SHA-256_SSWU_RO_, msg = ""
    #[test]
    fn hash_to_curve_p256_vector() {
        let curve = secp256r1();
        let dst = b"QUUX-V01-CS02-with-P256_XMD:SHA-256_SSWU_RO_";
        let point = hash_to_curve::<Sha256>(&curve, b"", dst).unwrap();
        assert_eq!(
            point.x_coor().unwrap().to_bytes_padded(32),
            hex::decode("2c15230b26dbc6fc9a37051158c95b79656e17a1a920b11394ca91c44247d3e4")
                .unwrap()
        );
        assert_eq!(
            point.y_coor().unwrap().to_bytes_padded(32),
            hex::decode("8a7a74985cc5c776cdfe4b1f19884970453912e9d31528c060be9ab5c43e8415")
                .unwrap()
        );
    }

    #[test]
    fn mapped_points_are_on_curve() {
        let curve = secp256r1();
        let dst = b"spake2-map-test";
        let us = hash_to_field::<Sha256>(&curve, b"some input", dst, 8).unwrap();
        for u in us.iter() {
            let point = map_to_curve_simple_swu(&curve, u);
            assert!(curve.is_on_curve(&point));
            assert_eq!(sgn0(u), sgn0(point.y_coor().unwrap()));
        }
        // u = 0 takes the exceptional branch
        let point = map_to_curve_simple_swu(&curve, &BigInt::zero());
        assert!(curve.is_on_curve(&point));
    }

    #[test]
    fn hash_to_curve_is_deterministic_and_separated() {
        let curve = secp256r1();
        let a = hash_to_curve::<Sha256>(&curve, b"M", b"dst-one").unwrap();
        let b = hash_to_curve::<Sha256>(&curve, b"M", b"dst-one").unwrap();
        let c = hash_to_curve::<Sha256>(&curve, b"M", b"dst-two").unwrap();
        let d = hash_to_curve::<Sha256>(&curve, b"N", b"dst-one").unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_ne!(a, d);
        assert!(curve.is_on_curve(&a));
        assert!(!a.is_identity());
    }
}
