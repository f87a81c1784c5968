//! Core digest traits for streamhash.
//!
//! This crate provides the foundational trait that streaming hash
//! implementations conform to, plus the small error types they share. It is
//! `no_std` compatible and has zero dependencies.
//!
//! # Traits
//!
//! | Trait | Purpose | Examples |
//! |-------|---------|----------|
//! | [`Digest`] | Single-use streaming cryptographic hash | BLAKE3 (hash mode) |
//!
//! # Error Types
//!
//! - [`FinalizedError`] - A hasher was used after its one allowed `finalize`
//! - [`VerificationError`] - Opaque error for digest verification
//!
//! # Fallibility Discipline
//!
//! This crate denies `unwrap`, `expect`, and indexing in non-test code to ensure
//! all error paths are handled explicitly.
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::indexing_slicing))]
#![no_std]

#[cfg(feature = "std")]
extern crate std;

mod digest;
pub mod error;
#[cfg(feature = "std")]
pub mod io;

pub use digest::Digest;
pub use error::{FinalizedError, VerificationError};
