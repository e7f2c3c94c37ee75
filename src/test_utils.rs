#[cfg(test)]
use rand::{CryptoRng, RngCore};

/// Runs a protocol test once per registered cipher suite
#[cfg(test)]
#[macro_export]
macro_rules! test_for_all_suites {
    (#[should_panic] $fn: ident) => {
        crate::test_for_all_suites!([#[should_panic]] $fn);
    };
    ($fn: ident) => {
        crate::test_for_all_suites!([] $fn);
    };
    ([$($attrs:tt)*] $fn: ident) => {
        crate::test_for_all!{[$($attrs)*] $fn =>
            p256_sha256 = crate::cryptographic_primitives::twoparty::spake2::P256_SHA256,
            p256_sha512 = crate::cryptographic_primitives::twoparty::spake2::P256_SHA512,
        }
    };
}

#[cfg(test)]
#[macro_export]
macro_rules! test_for_all {
    ([$($attrs:tt)*] $fn: ident =>) => {};
    ([$($attrs:tt)*] $fn: ident => $inst_name: ident = $inst:expr, $($rest: tt)*) => {
        paste::paste!{
            #[test]
            $($attrs)*
            fn [<$fn _$inst_name>]() {
                $fn($inst)
            }
        }
        crate::test_for_all!([$($attrs)*] $fn => $($rest)*);
    };
}

/// Randomness source that is always unavailable
#[cfg(test)]
pub(crate) struct FailingRng;

#[cfg(test)]
impl RngCore for FailingRng {
    fn next_u32(&mut self) -> u32 {
        panic!("entropy source unavailable")
    }

    fn next_u64(&mut self) -> u64 {
        panic!("entropy source unavailable")
    }

    fn fill_bytes(&mut self, _dest: &mut [u8]) {
        panic!("entropy source unavailable")
    }

    fn try_fill_bytes(&mut self, _dest: &mut [u8]) -> Result<(), rand::Error> {
        Err(rand::Error::new("entropy source unavailable"))
    }
}

#[cfg(test)]
impl CryptoRng for FailingRng {}
