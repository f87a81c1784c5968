//! Runtime configuration for the I/O helpers.
//!
//! The only knob is the read buffer used by [`crate::io::hash_reader`]:
//! - `STREAMHASH_READ_BUFFER_LEN`: buffer size in bytes
//!
//! The environment is read once per process. Values are clamped to
//! [`MIN_READ_BUFFER_LEN`]..=[`MAX_READ_BUFFER_LEN`]; unparsable values fall
//! back to the default.

/// Environment variable overriding the read buffer length.
pub const READ_BUFFER_ENV: &str = "STREAMHASH_READ_BUFFER_LEN";

/// Default read buffer length (16 KiB, sixteen chunks).
pub const DEFAULT_READ_BUFFER_LEN: usize = 16 * 1024;
/// Smallest accepted buffer: one block.
pub const MIN_READ_BUFFER_LEN: usize = crate::BLOCK_LEN;
/// Largest accepted buffer (1 MiB).
pub const MAX_READ_BUFFER_LEN: usize = 1 << 20;

/// Effective I/O configuration (after applying overrides).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IoConfig {
  /// Buffer length requested through the environment, if any.
  pub requested_buffer_len: Option<usize>,
  /// Buffer length actually used.
  pub buffer_len: usize,
}

#[derive(Clone, Copy, Debug, Default)]
struct Overrides {
  buffer_len: Option<usize>,
}

fn parse_len(value: &str) -> Option<usize> {
  let value = value.trim();
  if value.is_empty() {
    return None;
  }
  value.parse::<usize>().ok()
}

fn read_env_overrides() -> Overrides {
  Overrides {
    buffer_len: std::env::var(READ_BUFFER_ENV).ok().as_deref().and_then(parse_len),
  }
}

fn overrides() -> Overrides {
  use std::sync::OnceLock;
  static OVERRIDES: OnceLock<Overrides> = OnceLock::new();
  *OVERRIDES.get_or_init(read_env_overrides)
}

#[inline]
#[must_use]
fn resolve(ov: Overrides) -> IoConfig {
  let buffer_len = ov
    .buffer_len
    .unwrap_or(DEFAULT_READ_BUFFER_LEN)
    .clamp(MIN_READ_BUFFER_LEN, MAX_READ_BUFFER_LEN);
  IoConfig {
    requested_buffer_len: ov.buffer_len,
    buffer_len,
  }
}

/// Get the effective I/O configuration.
#[inline]
#[must_use]
pub fn get() -> IoConfig {
  resolve(overrides())
}
