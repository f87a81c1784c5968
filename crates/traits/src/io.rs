//! I/O adapters for digests.
//!
//! [`DigestReader`] and [`DigestWriter`] wrap [`std::io::Read`] and
//! [`std::io::Write`] implementations and feed every byte actually transferred
//! into a [`Digest`](crate::Digest), handling short reads and short writes.
//!
//! Feeding a finalized hasher is surfaced as an [`std::io::Error`] of kind
//! [`Other`](std::io::ErrorKind::Other) wrapping [`FinalizedError`].

use std::io;

use crate::{Digest, FinalizedError};

#[inline]
fn finalized(err: FinalizedError) -> io::Error {
  io::Error::other(err)
}

#[inline]
fn read_and_update<R, D>(inner: &mut R, hasher: &mut D, buf: &mut [u8]) -> io::Result<usize>
where
  R: io::Read,
  D: Digest,
{
  if hasher.is_finalized() {
    return Err(finalized(FinalizedError::new()));
  }
  let n = inner.read(buf)?;
  if let Some(data) = buf.get(..n) {
    hasher.update(data).map_err(finalized)?;
  }
  Ok(n)
}

#[inline]
fn read_vectored_and_update<R, D>(inner: &mut R, hasher: &mut D, bufs: &mut [io::IoSliceMut<'_>]) -> io::Result<usize>
where
  R: io::Read,
  D: Digest,
{
  if hasher.is_finalized() {
    return Err(finalized(FinalizedError::new()));
  }
  let n = inner.read_vectored(bufs)?;
  let mut remaining = n;
  for buf in bufs.iter() {
    let to_hash = remaining.min(buf.len());
    if to_hash == 0 {
      break;
    }
    if let Some(data) = buf.get(..to_hash) {
      hasher.update(data).map_err(finalized)?;
    }
    remaining -= to_hash;
  }
  Ok(n)
}

#[inline]
fn write_and_update<W, D>(inner: &mut W, hasher: &mut D, buf: &[u8]) -> io::Result<usize>
where
  W: io::Write,
  D: Digest,
{
  if hasher.is_finalized() {
    return Err(finalized(FinalizedError::new()));
  }
  let n = inner.write(buf)?;
  if let Some(data) = buf.get(..n) {
    hasher.update(data).map_err(finalized)?;
  }
  Ok(n)
}

/// Wraps a [`Read`](std::io::Read) and computes a digest transparently.
///
/// All reads from this type pass through to the inner reader while
/// updating the digest with the bytes actually read.
///
/// # Type Parameters
///
/// - `R`: The inner reader type
/// - `D`: The digest algorithm type (e.g., `Blake3`)
#[derive(Debug)]
pub struct DigestReader<R, D: Digest> {
  inner: R,
  hasher: D,
}

impl<R, D: Digest> DigestReader<R, D> {
  /// Create a new reader wrapper around a fresh hasher.
  #[inline]
  #[must_use]
  pub fn new(inner: R) -> Self {
    Self { inner, hasher: D::new() }
  }

  /// Finalize the digest over everything read so far.
  ///
  /// Later reads fail, since the hasher cannot accept more input.
  ///
  /// # Errors
  ///
  /// Returns [`FinalizedError`] if the digest was already taken.
  #[inline]
  pub fn finalize(&mut self) -> Result<D::Output, FinalizedError> {
    self.hasher.finalize()
  }

  /// Get a reference to the underlying hasher.
  #[inline]
  pub fn hasher(&self) -> &D {
    &self.hasher
  }

  /// Get a mutable reference to the underlying hasher.
  #[inline]
  pub fn hasher_mut(&mut self) -> &mut D {
    &mut self.hasher
  }

  /// Unwrap this `DigestReader`, returning the inner reader and the final digest.
  #[inline]
  pub fn into_parts(mut self) -> (R, Result<D::Output, FinalizedError>) {
    let digest = self.hasher.finalize();
    (self.inner, digest)
  }

  /// Unwrap this `DigestReader`, returning the inner reader and discarding the digest.
  #[inline]
  pub fn into_inner(self) -> R {
    self.inner
  }

  /// Get a reference to the inner reader.
  #[inline]
  pub fn inner(&self) -> &R {
    &self.inner
  }

  /// Get a mutable reference to the inner reader.
  #[inline]
  pub fn inner_mut(&mut self) -> &mut R {
    &mut self.inner
  }
}

impl<R: io::Read, D: Digest> io::Read for DigestReader<R, D> {
  #[inline]
  fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
    read_and_update(&mut self.inner, &mut self.hasher, buf)
  }

  #[inline]
  fn read_vectored(&mut self, bufs: &mut [io::IoSliceMut<'_>]) -> io::Result<usize> {
    read_vectored_and_update(&mut self.inner, &mut self.hasher, bufs)
  }
}

/// Wraps a [`Write`](std::io::Write) and computes a digest transparently.
///
/// Only the bytes the inner writer accepted are hashed, so after a short
/// write the digest still covers exactly what reached the sink.
///
/// # Type Parameters
///
/// - `W`: The inner writer type
/// - `D`: The digest algorithm type (e.g., `Blake3`)
#[derive(Debug)]
pub struct DigestWriter<W, D: Digest> {
  inner: W,
  hasher: D,
}

impl<W, D: Digest> DigestWriter<W, D> {
  /// Create a new writer wrapper around a fresh hasher.
  #[inline]
  #[must_use]
  pub fn new(inner: W) -> Self {
    Self { inner, hasher: D::new() }
  }

  /// Finalize the digest over everything written so far.
  ///
  /// # Errors
  ///
  /// Returns [`FinalizedError`] if the digest was already taken.
  #[inline]
  pub fn finalize(&mut self) -> Result<D::Output, FinalizedError> {
    self.hasher.finalize()
  }

  /// Get a reference to the underlying hasher.
  #[inline]
  pub fn hasher(&self) -> &D {
    &self.hasher
  }

  /// Get a mutable reference to the underlying hasher.
  #[inline]
  pub fn hasher_mut(&mut self) -> &mut D {
    &mut self.hasher
  }

  /// Unwrap this `DigestWriter`, returning the inner writer and the final digest.
  #[inline]
  pub fn into_parts(mut self) -> (W, Result<D::Output, FinalizedError>) {
    let digest = self.hasher.finalize();
    (self.inner, digest)
  }

  /// Unwrap this `DigestWriter`, returning the inner writer and discarding the digest.
  #[inline]
  pub fn into_inner(self) -> W {
    self.inner
  }

  /// Get a reference to the inner writer.
  #[inline]
  pub fn inner(&self) -> &W {
    &self.inner
  }

  /// Get a mutable reference to the inner writer.
  #[inline]
  pub fn inner_mut(&mut self) -> &mut W {
    &mut self.inner
  }
}

impl<W: io::Write, D: Digest> io::Write for DigestWriter<W, D> {
  #[inline]
  fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
    write_and_update(&mut self.inner, &mut self.hasher, buf)
  }

  #[inline]
  fn flush(&mut self) -> io::Result<()> {
    self.inner.flush()
  }
}
