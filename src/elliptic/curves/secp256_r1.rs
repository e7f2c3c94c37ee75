/*
    This file is part of Curv library
    Copyright 2018 by Kzen Networks
    (https://github.com/KZen-networks/curv)
    License MIT: <https://github.com/KZen-networks/curv/blob/master/LICENSE>
*/

// NIST P-256 / secp256r1 domain parameters, FIPS 186-4 D.1.2.3

use crate::arithmetic::traits::Converter;
use crate::arithmetic::One;
use crate::BigInt;

use super::short_weierstrass::{Curve, Point};

pub const CURVE_NAME: &str = "P-256";

/// The size (in bytes) of a field element
pub const FIELD_SIZE: usize = 32;

/// `L = ceil((ceil(log2(p)) + k) / 8)` with security level k = 128, RFC 9380 section 5
pub const HASH_TO_FIELD_LEN: usize = 48;

pub const FIELD_MODULO: [u8; 32] = [
    0xFF, 0xFF, 0xFF, 0xFF, 0x00, 0x00, 0x00, 0x01,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0xFF, 0xFF, 0xFF, 0xFF,
    0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
];

pub const CURVE_ORDER: [u8; 32] = [
    0xFF, 0xFF, 0xFF, 0xFF, 0x00, 0x00, 0x00, 0x00,
    0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
    0xBC, 0xE6, 0xFA, 0xAD, 0xA7, 0x17, 0x9E, 0x84,
    0xF3, 0xB9, 0xCA, 0xC2, 0xFC, 0x63, 0x25, 0x51,
];

/// a = -3 mod p
pub const CURVE_A: [u8; 32] = [
    0xFF, 0xFF, 0xFF, 0xFF, 0x00, 0x00, 0x00, 0x01,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0xFF, 0xFF, 0xFF, 0xFF,
    0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFC,
];

pub const CURVE_B: [u8; 32] = [
    0x5A, 0xC6, 0x35, 0xD8, 0xAA, 0x3A, 0x93, 0xE7,
    0xB3, 0xEB, 0xBD, 0x55, 0x76, 0x98, 0x86, 0xBC,
    0x65, 0x1D, 0x06, 0xB0, 0xCC, 0x53, 0xB0, 0xF6,
    0x3B, 0xCE, 0x3C, 0x3E, 0x27, 0xD2, 0x60, 0x4B,
];

pub const GENERATOR_X: [u8; 32] = [
    0x6B, 0x17, 0xD1, 0xF2, 0xE1, 0x2C, 0x42, 0x47,
    0xF8, 0xBC, 0xE6, 0xE5, 0x63, 0xA4, 0x40, 0xF2,
    0x77, 0x03, 0x7D, 0x81, 0x2D, 0xEB, 0x33, 0xA0,
    0xF4, 0xA1, 0x39, 0x45, 0xD8, 0x98, 0xC2, 0x96,
];

pub const GENERATOR_Y: [u8; 32] = [
    0x4f, 0xe3, 0x42, 0xe2, 0xfe, 0x1a, 0x7f, 0x9b,
    0x8e, 0xe7, 0xeb, 0x4a, 0x7c, 0x0f, 0x9e, 0x16,
    0x2b, 0xce, 0x33, 0x57, 0x6b, 0x31, 0x5e, 0xce,
    0xcb, 0xb6, 0x40, 0x68, 0x37, 0xbf, 0x51, 0xf5,
];

/// Simplified SWU constant Z = -10, RFC 9380 section 8.2
const SSWU_Z: u32 = 10;

pub fn secp256r1() -> Curve {
    let p = BigInt::from_bytes(&FIELD_MODULO);
    let sswu_z = &p - BigInt::from(SSWU_Z);
    Curve {
        name: CURVE_NAME,
        n: BigInt::from_bytes(&CURVE_ORDER),
        a: BigInt::from_bytes(&CURVE_A),
        b: BigInt::from_bytes(&CURVE_B),
        cofactor: BigInt::one(),
        generator: Point::Affine {
            x: BigInt::from_bytes(&GENERATOR_X),
            y: BigInt::from_bytes(&GENERATOR_Y),
        },
        field_len: FIELD_SIZE,
        sswu_z,
        hash_to_field_len: HASH_TO_FIELD_LEN,
        p,
    }
}
