use rand::{rngs::OsRng, CryptoRng, RngCore};

use super::traits::{BitManipulation, Converter, Samplable};
use super::BigInt;
use num_traits::Zero;

impl Samplable for BigInt {
    fn sample_below(upper: &Self) -> Result<Self, rand::Error> {
        Self::sample_below_with_rng(upper, &mut OsRng)
    }

    /// Rejection sampling: draws `bit_length(upper)` random bits until the value falls below
    /// `upper`, so every value in `[0, upper)` is equally likely.
    fn sample_below_with_rng<R: RngCore + CryptoRng>(
        upper: &Self,
        rng: &mut R,
    ) -> Result<Self, rand::Error> {
        assert!(*upper > Self::zero());

        let bits = upper.bit_length();
        loop {
            let n = Self::sample_with_rng(bits, rng)?;
            if n < *upper {
                return Ok(n);
            }
        }
    }

    fn sample_with_rng<R: RngCore + CryptoRng>(
        bit_size: usize,
        rng: &mut R,
    ) -> Result<Self, rand::Error> {
        if bit_size == 0 {
            return Ok(BigInt::zero());
        }
        let bytes = (bit_size - 1) / 8 + 1;
        let mut buf: Vec<u8> = vec![0; bytes];
        rng.try_fill_bytes(&mut buf)?;
        let n = BigInt::from_bytes(&buf) >> (bytes * 8 - bit_size);
        zeroize::Zeroize::zeroize(&mut buf);
        Ok(n)
    }
}
