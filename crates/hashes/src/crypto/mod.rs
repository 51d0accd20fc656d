//! Cryptographic-style hash primitives.

mod keccak;
pub mod qvortex;
pub mod shake;

pub use qvortex::{DIGEST_SIZE, Qvortex};
pub use shake::{Shake128, Shake128Xof};
