/*
    This file is part of Curv library
    Copyright 2018 by Kzen Networks
    (https://github.com/KZen-networks/curv)
    License MIT: <https://github.com/KZen-networks/curv/blob/master/LICENSE>
*/

mod big_native;
mod errors;
mod macros;
mod samplable;
mod serde_support;
pub mod traits;

pub use big_native::BigInt;
pub use errors::ParseBigIntError;
pub use num_traits::{One, Zero};
pub use traits::*;
