/*
    This file is part of Curv library
    Copyright 2018 by Kzen Networks
    (https://github.com/KZen-networks/curv)
    License MIT: <https://github.com/KZen-networks/curv/blob/master/LICENSE>
*/

use rand::{CryptoRng, RngCore};

use super::errors::ParseBigIntError;

/// Byte and hex conversions. Byte strings are big-endian magnitudes.
pub trait Converter: Sized {
    fn to_bytes(&self) -> Vec<u8>;
    /// Big-endian encoding left-padded with zeroes to `len` bytes. Values that do not fit are
    /// returned unpadded.
    fn to_bytes_padded(&self, len: usize) -> Vec<u8>;
    fn from_bytes(bytes: &[u8]) -> Self;
    fn to_hex(&self) -> String;
    fn from_hex(n: &str) -> Result<Self, ParseBigIntError>;
}

/// Modular arithmetic. Every result lies in `[0, modulus)`.
pub trait Modulo: Sized {
    fn mod_pow(base: &Self, exponent: &Self, modulus: &Self) -> Self;
    fn mod_mul(a: &Self, b: &Self, modulus: &Self) -> Self;
    fn mod_sub(a: &Self, b: &Self, modulus: &Self) -> Self;
    fn mod_add(a: &Self, b: &Self, modulus: &Self) -> Self;
    fn modulus(&self, modulus: &Self) -> Self;
}

/// Uniform sampling. Failures of the randomness source are reported, never papered over.
pub trait Samplable: Sized {
    fn sample_below(upper: &Self) -> Result<Self, rand::Error>;
    fn sample_below_with_rng<R: RngCore + CryptoRng>(
        upper: &Self,
        rng: &mut R,
    ) -> Result<Self, rand::Error>;
    fn sample_with_rng<R: RngCore + CryptoRng>(
        bit_size: usize,
        rng: &mut R,
    ) -> Result<Self, rand::Error>;
}

pub trait NumberTests {
    fn is_zero(_: &Self) -> bool;
    fn is_even(_: &Self) -> bool;
    fn is_negative(_: &Self) -> bool;
}

pub trait BitManipulation {
    fn test_bit(&self, bit: usize) -> bool;
    fn bit_length(&self) -> usize;
}
