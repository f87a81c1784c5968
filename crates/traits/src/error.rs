//! Error types for digest operations.
//!
//! Minimal, opaque error types. Hashing itself never fails on data; the only
//! faults are lifecycle misuse and failed verification.

use core::fmt;

/// The hasher was already finalized.
///
/// Returned by `update` and `finalize` on a hasher whose single `finalize`
/// call already succeeded. This is a caller contract violation, not a
/// data-dependent failure; retrying on the same hasher cannot succeed.
///
/// # Examples
///
/// ```
/// use traits::FinalizedError;
///
/// fn finish(done: &mut bool) -> Result<[u8; 4], FinalizedError> {
///   if *done {
///     return Err(FinalizedError::new());
///   }
///   *done = true;
///   Ok([0; 4])
/// }
///
/// let mut done = false;
/// assert!(finish(&mut done).is_ok());
/// assert_eq!(finish(&mut done), Err(FinalizedError::new()));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub struct FinalizedError;

impl FinalizedError {
  /// Create a new finalized-state error.
  #[inline]
  #[must_use]
  pub const fn new() -> Self {
    Self
  }
}

impl Default for FinalizedError {
  #[inline]
  fn default() -> Self {
    Self::new()
  }
}

impl fmt::Display for FinalizedError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("hasher already finalized")
  }
}

impl core::error::Error for FinalizedError {}

/// Verification failed.
///
/// Returned when a computed digest does not match an expected one.
/// Intentionally opaque to prevent timing side-channels.
///
/// # Examples
///
/// ```
/// use traits::VerificationError;
///
/// fn verify(computed: &[u8; 32], expected: &[u8; 32]) -> Result<(), VerificationError> {
///   // Real code: use constant-time comparison
///   if computed == expected {
///     Ok(())
///   } else {
///     Err(VerificationError::new())
///   }
/// }
///
/// let a = [0u8; 32];
/// let b = [1u8; 32];
/// assert!(verify(&a, &b).is_err());
/// ```
///
/// # Security
///
/// This error provides no details about the failure. The underlying
/// verification should use constant-time comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub struct VerificationError;

impl VerificationError {
  /// Create a new verification error.
  ///
  /// This is the only way to construct this error from outside the crate,
  /// ensuring forward compatibility if fields are added in the future.
  #[inline]
  #[must_use]
  pub const fn new() -> Self {
    Self
  }
}

impl Default for VerificationError {
  #[inline]
  fn default() -> Self {
    Self::new()
  }
}

impl fmt::Display for VerificationError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("verification failed")
  }
}

impl core::error::Error for VerificationError {}
