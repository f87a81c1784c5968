//! The 32-byte digest value.

use core::fmt;

use subtle::ConstantTimeEq;
use traits::VerificationError;

use crate::OUT_LEN;

/// A finished BLAKE3 digest.
///
/// Equality through [`verify`](Self::verify) is constant-time; the derived
/// `PartialEq` is not, and is meant for tests and map keys.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Hash([u8; OUT_LEN]);

/// Hex parsing failure for [`Hash::from_hex`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HexError {
  /// The input was not exactly 64 hex digits.
  InvalidLength(usize),
  /// A byte at this offset was not a hex digit.
  InvalidDigit(usize),
}

impl fmt::Display for HexError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::InvalidLength(len) => write!(f, "expected {} hex digits, got {len}", 2 * OUT_LEN),
      Self::InvalidDigit(at) => write!(f, "invalid hex digit at offset {at}"),
    }
  }
}

impl core::error::Error for HexError {}

const HEX_DIGITS: &[u8; 16] = b"0123456789abcdef";

#[inline]
fn hex_value(c: u8) -> Option<u8> {
  match c {
    b'0'..=b'9' => Some(c - b'0'),
    b'a'..=b'f' => Some(c - b'a' + 10),
    b'A'..=b'F' => Some(c - b'A' + 10),
    _ => None,
  }
}

impl Hash {
  /// Wrap raw digest bytes.
  #[inline]
  #[must_use]
  pub const fn from_bytes(bytes: [u8; OUT_LEN]) -> Self {
    Self(bytes)
  }

  /// The raw digest bytes.
  #[inline]
  #[must_use]
  pub const fn as_bytes(&self) -> &[u8; OUT_LEN] {
    &self.0
  }

  /// Lowercase hex encoding, 64 ASCII bytes.
  #[must_use]
  pub fn to_hex(&self) -> [u8; 2 * OUT_LEN] {
    let mut out = [0u8; 2 * OUT_LEN];
    let (pairs, _) = out.as_chunks_mut::<2>();
    for (pair, &byte) in pairs.iter_mut().zip(&self.0) {
      let hi = HEX_DIGITS.get(usize::from(byte >> 4)).copied().unwrap_or(b'0');
      let lo = HEX_DIGITS.get(usize::from(byte & 0x0f)).copied().unwrap_or(b'0');
      *pair = [hi, lo];
    }
    out
  }

  /// Parse 64 hex digits (either case).
  ///
  /// # Errors
  ///
  /// Returns [`HexError`] on a wrong length or a non-hex byte.
  pub fn from_hex(hex: impl AsRef<[u8]>) -> Result<Self, HexError> {
    let hex = hex.as_ref();
    if hex.len() != 2 * OUT_LEN {
      return Err(HexError::InvalidLength(hex.len()));
    }
    let mut out = [0u8; OUT_LEN];
    let (pairs, _) = hex.as_chunks::<2>();
    for (i, (dst, &[hi, lo])) in out.iter_mut().zip(pairs).enumerate() {
      let hi = hex_value(hi).ok_or(HexError::InvalidDigit(2 * i))?;
      let lo = hex_value(lo).ok_or(HexError::InvalidDigit(2 * i + 1))?;
      *dst = (hi << 4) | lo;
    }
    Ok(Self(out))
  }

  /// Check this digest against `expected` in constant time.
  ///
  /// # Errors
  ///
  /// Returns [`VerificationError`] if the digests differ.
  pub fn verify(&self, expected: &[u8; OUT_LEN]) -> Result<(), VerificationError> {
    if bool::from(self.0.ct_eq(expected)) {
      Ok(())
    } else {
      Err(VerificationError::new())
    }
  }
}

impl From<[u8; OUT_LEN]> for Hash {
  #[inline]
  fn from(bytes: [u8; OUT_LEN]) -> Self {
    Self(bytes)
  }
}

impl From<Hash> for [u8; OUT_LEN] {
  #[inline]
  fn from(hash: Hash) -> Self {
    hash.0
  }
}

impl AsRef<[u8]> for Hash {
  #[inline]
  fn as_ref(&self) -> &[u8] {
    &self.0
  }
}

impl fmt::Display for Hash {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for byte in &self.0 {
      write!(f, "{byte:02x}")?;
    }
    Ok(())
  }
}

impl fmt::Debug for Hash {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "Hash({self})")
  }
}

impl core::str::FromStr for Hash {
  type Err = HexError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Self::from_hex(s)
  }
}
