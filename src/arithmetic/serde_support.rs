/*
    This file is part of Curv library
    Copyright 2018 by Kzen Networks
    (https://github.com/KZen-networks/curv)
    License MIT: <https://github.com/KZen-networks/curv/blob/master/LICENSE>
*/

// Human-readable formats carry a BigInt as a hex string (leading `-` for negative values),
// binary formats as its big-endian magnitude.

use std::fmt;

use serde::de::{Error, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::traits::Converter;
use super::BigInt;

impl Serialize for BigInt {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if serializer.is_human_readable() {
            serializer.serialize_str(&self.to_hex())
        } else {
            serializer.serialize_bytes(&self.to_bytes())
        }
    }
}

impl<'de> Deserialize<'de> for BigInt {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct BigIntVisitor;

        impl<'de> Visitor<'de> for BigIntVisitor {
            type Value = BigInt;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                write!(f, "a hex string or big-endian bytes")
            }

            fn visit_str<E: Error>(self, v: &str) -> Result<BigInt, E> {
                BigInt::from_hex(v).map_err(E::custom)
            }

            fn visit_bytes<E: Error>(self, v: &[u8]) -> Result<BigInt, E> {
                Ok(BigInt::from_bytes(v))
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<BigInt, A::Error>
            where
                A: SeqAccess<'de>,
            {
                let mut bytes = Vec::with_capacity(seq.size_hint().unwrap_or(0));
                while let Some(byte) = seq.next_element::<u8>()? {
                    bytes.push(byte)
                }
                Ok(BigInt::from_bytes(&bytes))
            }
        }

        if deserializer.is_human_readable() {
            deserializer.deserialize_str(BigIntVisitor)
        } else {
            deserializer.deserialize_bytes(BigIntVisitor)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_uses_hex_strings() {
        let n = BigInt::from_hex("ffffffff00000000ffffffffffffffffbce6faada7179e84f3b9cac2fc632551")
            .unwrap();
        let json = serde_json::to_string(&n).unwrap();
        assert_eq!(
            json,
            "\"ffffffff00000000ffffffffffffffffbce6faada7179e84f3b9cac2fc632551\""
        );
        assert_eq!(serde_json::from_str::<BigInt>(&json).unwrap(), n);

        let negative = BigInt::from(-255);
        let json = serde_json::to_string(&negative).unwrap();
        assert_eq!(json, "\"-ff\"");
        assert_eq!(serde_json::from_str::<BigInt>(&json).unwrap(), negative);
    }

    #[test]
    fn malformed_hex_is_rejected() {
        assert!(serde_json::from_str::<BigInt>("\"xyz\"").is_err());
        assert!(serde_json::from_str::<BigInt>("12").is_err());
    }
}
