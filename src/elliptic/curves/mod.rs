pub mod hash_to_curve;
pub mod secp256_r1;
mod short_weierstrass;

mod error;

#[cfg(test)]
mod test;

pub use self::error::{HashToCurveError, PointError};
pub use self::secp256_r1::secp256r1;
pub use self::short_weierstrass::{Curve, Point};
