//! Qvortex: a keyed 256-bit hash built from an S-box substitution layer and
//! an ARX compression core.
//!
//! # Quick Start
//!
//! ```
//! use qvortex::{Digest, Qvortex};
//!
//! // One-shot computation
//! let digest = Qvortex::digest(b"hello world");
//! assert_eq!(digest.len(), 32);
//!
//! // Streaming computation
//! let mut hasher = Qvortex::new();
//! hasher.update(b"hello ");
//! hasher.update(b"world");
//! assert_eq!(hasher.finalize(), digest);
//!
//! // Keyed hashing: the key seeds the substitution table
//! let mut keyed = Qvortex::with_key(b"secret");
//! keyed.update(b"hello world");
//! assert_ne!(keyed.finalize(), digest);
//! ```
//!
//! # Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `std` | Yes | Std-only conveniences; the core is `no_std` |
//!
//! # C API
//!
//! The [`ffi`] module exports a C-ABI surface (`qvortex_hash`,
//! `qvortex_init` / `qvortex_update` / `qvortex_final`, `qvortex_version`)
//! so other languages can bind against the cdylib/staticlib build.
#![cfg_attr(not(feature = "std"), no_std)]

pub mod ffi;

pub use hashes::crypto::{DIGEST_SIZE, Qvortex, Shake128, Shake128Xof};
pub use hashes::{Digest, Xof};

/// Library version, also exposed through [`ffi::qvortex_version`].
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
