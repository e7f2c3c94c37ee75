/*
    This file is part of Curv library
    Copyright 2018 by Kzen Networks
    (https://github.com/KZen-networks/curv)
    License MIT: <https://github.com/KZen-networks/curv/blob/master/LICENSE>
*/

use std::fmt;

use zeroize::Zeroizing;

/// Length-prefixed encoding of the values both parties must agree on.
///
/// Every field is preceded by its length as an 8-byte little-endian integer.
#[derive(Default)]
pub struct TranscriptBuilder {
    bytes: Zeroizing<Vec<u8>>,
}

impl TranscriptBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, field: &[u8]) {
        self.bytes
            .extend_from_slice(&(field.len() as u64).to_le_bytes());
        self.bytes.extend_from_slice(field);
    }

    pub fn chain(mut self, field: &[u8]) -> Self {
        self.append(field);
        self
    }

    pub fn build(self) -> Transcript {
        Transcript(self.bytes)
    }
}

/// The transcript `TT` fed to the key schedule
#[derive(Clone, PartialEq, Eq)]
pub struct Transcript(Zeroizing<Vec<u8>>);

impl Transcript {
    /// `A-id, B-id, pA, pB, K, w` in this order, A being the Initiator
    pub fn spake2(
        id_a: &str,
        id_b: &str,
        share_a: &[u8],
        share_b: &[u8],
        shared_element: &[u8],
        w: &[u8],
    ) -> Self {
        TranscriptBuilder::new()
            .chain(id_a.as_bytes())
            .chain(id_b.as_bytes())
            .chain(share_a)
            .chain(share_b)
            .chain(shared_element)
            .chain(w)
            .build()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AsRef<[u8]> for Transcript {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

// Contents include the password scalar
impl fmt::Debug for Transcript {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Transcript({} bytes)", self.0.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fields_are_length_prefixed() {
        let transcript = TranscriptBuilder::new().chain(b"ab").chain(b"").build();
        assert_eq!(
            transcript.as_bytes(),
            &[2, 0, 0, 0, 0, 0, 0, 0, b'a', b'b', 0, 0, 0, 0, 0, 0, 0, 0][..]
        );
    }

    #[test]
    fn field_boundaries_are_unambiguous() {
        let one = Transcript::spake2("ab", "c", b"1", b"2", b"3", b"4");
        let other = Transcript::spake2("a", "bc", b"1", b"2", b"3", b"4");
        assert_ne!(one, other);
        assert_eq!(one.len(), other.len());
        assert_eq!(one.len(), 6 * 8 + 7);
    }

    #[test]
    fn debug_hides_contents() {
        let transcript = Transcript::spake2("alice", "bob", b"", b"", b"", b"secret");
        assert_eq!(format!("{:?}", transcript), "Transcript(62 bytes)");
    }
}
