//! Streaming BLAKE3 (hash mode) reference implementation.
//!
//! A sequential, single-lane implementation of the BLAKE3 tree hash: input is
//! cut into 1 KiB chunks of 64-byte blocks, each chunk yields a chaining
//! value, and chunk chaining values are merged into a binary Merkle tree as
//! they complete. The hasher never buffers more than one block of input.
//!
//! This crate is `no_std` compatible. Correctness over throughput: there is no
//! SIMD, no multi-chunk parallelism, and no `unsafe`.
//!
//! # Quick Start
//!
//! ```
//! use streamhash::{Blake3, Digest};
//!
//! let oneshot = Blake3::digest(b"hello world");
//!
//! let mut hasher = Blake3::new();
//! hasher.update(b"hello ")?;
//! hasher.update(b"world")?;
//! assert_eq!(hasher.finalize()?, oneshot);
//!
//! // A hasher is single-use.
//! assert!(hasher.finalize().is_err());
//! # Ok::<(), streamhash::FinalizedError>(())
//! ```
//!
//! # Modules
//!
//! - [`compress`] - The BLAKE3 compression function.
//! - [`hasher`] - The streaming context and finalizer.
//! - [`hash`] - The [`Hash`] output type.
//!
//! # Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `std` | Yes | I/O adapters, reader hashing, env configuration |
//! | `tracing` | No | Emit `tracing` events for chunk merges and finalization |
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::indexing_slicing))]
#![no_std]

#[cfg(feature = "std")]
extern crate std;

#[macro_use]
mod diag;

pub mod compress;
#[cfg(feature = "std")]
pub mod config;
pub mod flags;
pub mod hash;
pub mod hasher;
#[cfg(feature = "std")]
pub mod io;
mod stack;
mod words;

pub use flags::Flags;
pub use hash::{Hash, HexError};
pub use hasher::{Blake3, Phase, RootNode, Stats};
pub use traits::{Digest, FinalizedError, VerificationError};

/// Digest length in bytes.
pub const OUT_LEN: usize = 32;
/// Compression block length in bytes.
pub const BLOCK_LEN: usize = 64;
/// Chunk length in bytes (16 blocks).
pub const CHUNK_LEN: usize = 1024;
