//! I/O adapters for BLAKE3 hashing.
//!
//! [`DigestReader`] and [`DigestWriter`] hash the bytes that actually pass
//! through them. [`hash_reader`] drains a reader into a fresh hasher using the
//! buffer length from [`crate::config`].
//!
//! # Example
//!
//! ```rust
//! use std::io::{Cursor, Read};
//!
//! use streamhash::{Blake3, Digest};
//!
//! let mut reader = Blake3::reader(Cursor::new(b"hello world".to_vec()));
//! let mut contents = Vec::new();
//! reader.read_to_end(&mut contents)?;
//! assert_eq!(contents, b"hello world");
//! assert_eq!(reader.finalize().map_err(std::io::Error::other)?, Blake3::digest(&contents));
//! # Ok::<(), std::io::Error>(())
//! ```

use std::io::{self, Read};

pub use traits::io::{DigestReader, DigestWriter};

use crate::{Blake3, Hash, config};

/// Hash everything `reader` yields until EOF.
///
/// Interrupted reads are retried.
///
/// # Errors
///
/// Propagates any other error from `reader`.
pub fn hash_reader<R: Read>(reader: R) -> io::Result<Hash> {
  hash_reader_with_buffer(reader, config::get().buffer_len)
}

fn hash_reader_with_buffer<R: Read>(mut reader: R, buffer_len: usize) -> io::Result<Hash> {
  let mut hasher = Blake3::new();
  let mut buf = std::vec![0u8; buffer_len];
  loop {
    let n = match reader.read(&mut buf) {
      Ok(0) => break,
      Ok(n) => n,
      Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
      Err(e) => return Err(e),
    };
    if let Some(data) = buf.get(..n) {
      hasher.update(data).map_err(io::Error::other)?;
    }
  }
  hasher.finalize_hash().map_err(io::Error::other)
}
