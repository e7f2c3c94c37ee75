/*
    This file is part of Curv library
    Copyright 2018 by Kzen Networks
    (https://github.com/KZen-networks/curv)
    License MIT: <https://github.com/KZen-networks/curv/blob/master/LICENSE>
*/

//! Carries confirmation keys encrypted under the session key.
//!
//! AES-128-GCM for 16-byte session keys, AES-256-GCM for 32-byte ones. Every encryption draws
//! a fresh 12-byte nonce and the output is `nonce || ciphertext || tag`.

use std::fmt;

use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::{Aes128Gcm, Aes256Gcm, Nonce};
use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};
use zeroize::Zeroizing;

use super::error::{ConfigurationError, Spake2Error};

pub const NONCE_LEN: usize = 12;

enum Cipher {
    Aes128(Aes128Gcm),
    Aes256(Aes256Gcm),
}

pub struct ConfirmationChannel {
    cipher: Cipher,
}

impl ConfirmationChannel {
    pub fn new(session_key: &[u8]) -> Result<Self, Spake2Error> {
        let invalid_length = |_| ConfigurationError::UnsupportedKeyLength(session_key.len());
        let cipher = match session_key.len() {
            16 => Cipher::Aes128(Aes128Gcm::new_from_slice(session_key).map_err(invalid_length)?),
            32 => Cipher::Aes256(Aes256Gcm::new_from_slice(session_key).map_err(invalid_length)?),
            len => return Err(ConfigurationError::UnsupportedKeyLength(len).into()),
        };
        Ok(Self { cipher })
    }

    pub fn encrypt(&self, plaintext: &[u8]) -> Result<Vec<u8>, Spake2Error> {
        self.encrypt_with_rng(plaintext, &mut OsRng)
    }

    pub fn encrypt_with_rng<R: RngCore + CryptoRng>(
        &self,
        plaintext: &[u8],
        rng: &mut R,
    ) -> Result<Vec<u8>, Spake2Error> {
        let mut nonce = [0u8; NONCE_LEN];
        rng.try_fill_bytes(&mut nonce)
            .map_err(Spake2Error::Randomness)?;
        let nonce_ref = Nonce::from_slice(&nonce);

        let ciphertext = match &self.cipher {
            Cipher::Aes128(cipher) => cipher.encrypt(nonce_ref, plaintext),
            Cipher::Aes256(cipher) => cipher.encrypt(nonce_ref, plaintext),
        }
        .map_err(|_| Spake2Error::Encryption)?;

        let mut blob = Vec::with_capacity(NONCE_LEN + ciphertext.len());
        blob.extend_from_slice(&nonce);
        blob.extend_from_slice(&ciphertext);
        Ok(blob)
    }

    pub fn decrypt(&self, blob: &[u8]) -> Result<Zeroizing<Vec<u8>>, Spake2Error> {
        if blob.len() < NONCE_LEN {
            return Err(Spake2Error::Decryption);
        }
        let (nonce, ciphertext) = blob.split_at(NONCE_LEN);
        let nonce = Nonce::from_slice(nonce);
        match &self.cipher {
            Cipher::Aes128(cipher) => cipher.decrypt(nonce, ciphertext),
            Cipher::Aes256(cipher) => cipher.decrypt(nonce, ciphertext),
        }
        .map(Zeroizing::new)
        .map_err(|_| Spake2Error::Decryption)
    }
}

impl fmt::Debug for ConfirmationChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cipher = match self.cipher {
            Cipher::Aes128(_) => "AES-128-GCM",
            Cipher::Aes256(_) => "AES-256-GCM",
        };
        f.debug_struct("ConfirmationChannel")
            .field("cipher", &cipher)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::test_utils::FailingRng;

    #[test]
    fn round_trip_with_both_key_sizes() {
        for key_len in [16usize, 32].iter() {
            let channel = ConfirmationChannel::new(&vec![7u8; *key_len]).unwrap();
            let blob = channel.encrypt(b"confirmation key").unwrap();
            assert_eq!(blob.len(), NONCE_LEN + 16 + 16);
            assert_eq!(&channel.decrypt(&blob).unwrap()[..], b"confirmation key");
        }
    }

    #[test]
    fn nonces_are_fresh() {
        let channel = ConfirmationChannel::new(&[1u8; 16]).unwrap();
        let first = channel.encrypt(b"same plaintext").unwrap();
        let second = channel.encrypt(b"same plaintext").unwrap();
        assert_ne!(first, second);
        assert_ne!(first[..NONCE_LEN], second[..NONCE_LEN]);
    }

    #[test]
    fn seeded_rng_gives_reproducible_output() {
        let channel = ConfirmationChannel::new(&[1u8; 32]).unwrap();
        let first = channel
            .encrypt_with_rng(b"key", &mut StdRng::seed_from_u64(3))
            .unwrap();
        let second = channel
            .encrypt_with_rng(b"key", &mut StdRng::seed_from_u64(3))
            .unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn short_or_tampered_blobs_fail_to_decrypt() {
        let channel = ConfirmationChannel::new(&[9u8; 16]).unwrap();
        assert!(matches!(
            channel.decrypt(&[0u8; NONCE_LEN - 1]),
            Err(Spake2Error::Decryption)
        ));
        assert!(matches!(channel.decrypt(&[]), Err(Spake2Error::Decryption)));

        let blob = channel.encrypt(b"payload").unwrap();
        for i in 0..blob.len() {
            let mut tampered = blob.clone();
            tampered[i] ^= 0x80;
            assert!(
                matches!(channel.decrypt(&tampered), Err(Spake2Error::Decryption)),
                "byte {} flipped",
                i
            );
        }

        let other = ConfirmationChannel::new(&[8u8; 16]).unwrap();
        assert!(matches!(other.decrypt(&blob), Err(Spake2Error::Decryption)));
    }

    #[test]
    fn unsupported_key_length() {
        assert!(matches!(
            ConfirmationChannel::new(&[0u8; 24]),
            Err(Spake2Error::Configuration(
                ConfigurationError::UnsupportedKeyLength(24)
            ))
        ));
    }

    #[test]
    fn rng_failure_is_reported() {
        let channel = ConfirmationChannel::new(&[1u8; 16]).unwrap();
        assert!(matches!(
            channel.encrypt_with_rng(b"key", &mut FailingRng),
            Err(Spake2Error::Randomness(_))
        ));
    }
}
