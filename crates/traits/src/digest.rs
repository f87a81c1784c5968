//! Cryptographic digest trait.
//!
//! Hashers following this trait are single-use accumulators: any number of
//! updates, then exactly one finalize. Once finalized, every further call
//! reports [`FinalizedError`] instead of silently producing a value.

use core::fmt::Debug;

use crate::FinalizedError;

/// Cryptographic hash function producing a fixed-size digest.
///
/// # Implementor Requirements
///
/// - `new()` must return the same state as `Default::default()`
/// - `update` called with any split of the input must reach the same state as a
///   single call with the concatenation
/// - after a successful `finalize`, both `update` and `finalize` must return
///   [`FinalizedError`] and leave the hasher untouched
pub trait Digest: Default {
  /// Output size in bytes.
  const OUTPUT_SIZE: usize;

  /// The digest output type.
  ///
  /// Typically `[u8; N]`.
  type Output: Copy + Eq + Debug;

  /// Create a new hasher in its initial state.
  #[must_use]
  fn new() -> Self;

  /// Update the hasher with additional data.
  ///
  /// # Errors
  ///
  /// Returns [`FinalizedError`] if the hasher was already finalized.
  fn update(&mut self, data: &[u8]) -> Result<(), FinalizedError>;

  /// Update the hasher with multiple non-contiguous buffers.
  ///
  /// # Errors
  ///
  /// Returns [`FinalizedError`] if the hasher was already finalized.
  #[inline]
  fn update_vectored(&mut self, bufs: &[&[u8]]) -> Result<(), FinalizedError> {
    if self.is_finalized() {
      return Err(FinalizedError::new());
    }
    for buf in bufs {
      self.update(buf)?;
    }
    Ok(())
  }

  /// Update the hasher with `std::io::IoSlice` buffers.
  ///
  /// # Errors
  ///
  /// Returns [`FinalizedError`] if the hasher was already finalized.
  #[cfg(feature = "std")]
  #[inline]
  fn update_io_slices(&mut self, bufs: &[std::io::IoSlice<'_>]) -> Result<(), FinalizedError> {
    if self.is_finalized() {
      return Err(FinalizedError::new());
    }
    for buf in bufs {
      self.update(buf)?;
    }
    Ok(())
  }

  /// Finalize and return the digest.
  ///
  /// # Errors
  ///
  /// Returns [`FinalizedError`] on every call after the first.
  fn finalize(&mut self) -> Result<Self::Output, FinalizedError>;

  /// Whether `finalize` has already succeeded on this hasher.
  #[must_use]
  fn is_finalized(&self) -> bool;

  /// Compute the digest of data in one shot.
  ///
  /// A fresh hasher cannot be in the finalized state, so this is infallible.
  #[must_use]
  fn digest(data: &[u8]) -> Self::Output;

  /// Wrap a reader to compute digest transparently during I/O.
  ///
  /// # Example
  ///
  /// ```rust
  /// # use traits::{Digest, FinalizedError};
  /// # #[derive(Default)]
  /// # struct SumDigest(u8, bool);
  /// # impl Digest for SumDigest {
  /// #   const OUTPUT_SIZE: usize = 4;
  /// #   type Output = [u8; 4];
  /// #   fn new() -> Self { Self(0, false) }
  /// #   fn update(&mut self, data: &[u8]) -> Result<(), FinalizedError> {
  /// #     if self.1 { return Err(FinalizedError::new()); }
  /// #     self.0 = data.iter().fold(self.0, |acc, &b| acc.wrapping_add(b));
  /// #     Ok(())
  /// #   }
  /// #   fn finalize(&mut self) -> Result<Self::Output, FinalizedError> {
  /// #     if self.1 { return Err(FinalizedError::new()); }
  /// #     self.1 = true;
  /// #     Ok([self.0; 4])
  /// #   }
  /// #   fn is_finalized(&self) -> bool { self.1 }
  /// #   fn digest(data: &[u8]) -> Self::Output {
  /// #     [data.iter().fold(0u8, |acc, &b| acc.wrapping_add(b)); 4]
  /// #   }
  /// # }
  /// # use std::io::Cursor;
  ///
  /// let mut reader = SumDigest::reader(Cursor::new(b"abc".to_vec()));
  /// std::io::copy(&mut reader, &mut std::io::sink())?;
  /// assert_eq!(
  ///   reader.finalize().unwrap(),
  ///   [b'a'.wrapping_add(b'b').wrapping_add(b'c'); 4]
  /// );
  /// # Ok::<(), std::io::Error>(())
  /// ```
  #[cfg(feature = "std")]
  #[inline]
  #[must_use]
  fn reader<R>(inner: R) -> crate::io::DigestReader<R, Self>
  where
    Self: Sized,
  {
    crate::io::DigestReader::new(inner)
  }

  /// Wrap a writer to compute digest transparently during I/O.
  ///
  /// # Example
  ///
  /// ```rust
  /// # use traits::{Digest, FinalizedError};
  /// # #[derive(Default)]
  /// # struct SumDigest(u8, bool);
  /// # impl Digest for SumDigest {
  /// #   const OUTPUT_SIZE: usize = 4;
  /// #   type Output = [u8; 4];
  /// #   fn new() -> Self { Self(0, false) }
  /// #   fn update(&mut self, data: &[u8]) -> Result<(), FinalizedError> {
  /// #     if self.1 { return Err(FinalizedError::new()); }
  /// #     self.0 = data.iter().fold(self.0, |acc, &b| acc.wrapping_add(b));
  /// #     Ok(())
  /// #   }
  /// #   fn finalize(&mut self) -> Result<Self::Output, FinalizedError> {
  /// #     if self.1 { return Err(FinalizedError::new()); }
  /// #     self.1 = true;
  /// #     Ok([self.0; 4])
  /// #   }
  /// #   fn is_finalized(&self) -> bool { self.1 }
  /// #   fn digest(data: &[u8]) -> Self::Output {
  /// #     [data.iter().fold(0u8, |acc, &b| acc.wrapping_add(b)); 4]
  /// #   }
  /// # }
  /// # use std::io::Write;
  ///
  /// let mut writer = SumDigest::writer(Vec::new());
  /// writer.write_all(b"hello world")?;
  /// let (out, digest) = writer.into_parts();
  /// assert_eq!(out, b"hello world".to_vec());
  /// assert_eq!(digest.unwrap(), SumDigest::digest(b"hello world"));
  /// # Ok::<(), std::io::Error>(())
  /// ```
  #[cfg(feature = "std")]
  #[inline]
  #[must_use]
  fn writer<W>(inner: W) -> crate::io::DigestWriter<W, Self>
  where
    Self: Sized,
  {
    crate::io::DigestWriter::new(inner)
  }
}
