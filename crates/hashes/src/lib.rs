//! The Qvortex hash primitive.
//!
//! This crate is `no_std` compatible and has zero library dependencies outside
//! the workspace except `zeroize`. Dev-only dependencies are used for property
//! testing and benchmarking.
//!
//! # Modules
//!
//! - [`crypto`] - The Qvortex digest, its XOF, and the underlying permutation.
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::indexing_slicing))]
#![no_std]

#[cfg(feature = "std")]
extern crate std;

pub mod crypto;

pub use traits::{Digest, Xof};
