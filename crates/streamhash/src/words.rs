//! Little-endian word (de)serialization.

use crate::{BLOCK_LEN, OUT_LEN};

/// Read a 64-byte block as sixteen little-endian words.
#[inline(always)]
pub(crate) fn block_words(bytes: &[u8; BLOCK_LEN]) -> [u32; 16] {
  let mut words = [0u32; 16];
  let (quads, _) = bytes.as_chunks::<4>();
  for (word, quad) in words.iter_mut().zip(quads) {
    *word = u32::from_le_bytes(*quad);
  }
  words
}

/// Write eight words as 32 little-endian bytes.
#[inline(always)]
pub(crate) fn words8_to_le_bytes(words: &[u32; 8]) -> [u8; OUT_LEN] {
  let mut out = [0u8; OUT_LEN];
  for (dst, word) in out.chunks_exact_mut(4).zip(words) {
    dst.copy_from_slice(&word.to_le_bytes());
  }
  out
}

/// Concatenate two chaining values into a parent message block.
#[inline(always)]
pub(crate) fn concat_cvs(left: &[u32; 8], right: &[u32; 8]) -> [u32; 16] {
  let mut block = [0u32; 16];
  let (lo, hi) = block.split_at_mut(8);
  lo.copy_from_slice(left);
  hi.copy_from_slice(right);
  block
}
