//! Streaming context and finalizer.
//!
//! [`Blake3`] accumulates input one 64-byte block at a time. A block is only
//! compressed once more input proves it is not the final block of the
//! message, so the finalizer can always apply `CHUNK_END` and `ROOT` to the
//! right compression.

use traits::{Digest, FinalizedError};

use crate::{
  BLOCK_LEN, Flags, OUT_LEN,
  compress::{IV, compress},
  hash::Hash,
  stack::MergeStack,
  words::{block_words, words8_to_le_bytes},
};

/// Blocks per chunk.
const CHUNK_BLOCKS: u8 = 16;

/// Lifecycle of a [`Blake3`] hasher.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Phase {
  /// Created; no bytes appended yet.
  #[default]
  Empty,
  /// At least one byte appended.
  Accumulating,
  /// The digest was taken. Terminal.
  Finalized,
}

/// Which node produced the digest.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RootNode {
  /// The whole input fit in one chunk; its last block was the root.
  Chunk,
  /// The root was a parent node over two subtrees.
  Parent,
}

/// Counters describing what a hasher has done so far.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Stats {
  /// Total bytes accepted by `update`.
  pub bytes: u64,
  /// Chunks whose chaining value has been folded into the tree.
  pub chunks_completed: u64,
  /// Parent compressions performed, including those done by `finalize`.
  pub parent_compressions: u64,
  /// Pending subtrees currently on the merge stack.
  pub stack_depth: usize,
  /// Deepest the merge stack has been.
  pub max_stack_depth: usize,
  /// Current lifecycle phase.
  pub phase: Phase,
  /// Set once finalized.
  pub root: Option<RootNode>,
}

/// Streaming BLAKE3 hasher (hash mode, 32-byte output).
///
/// Single-use: after [`finalize`](Self::finalize) succeeds, further `update`
/// and `finalize` calls return [`FinalizedError`] and change nothing.
#[derive(Clone, Debug)]
pub struct Blake3 {
  /// Pending input; only the first `block_len` bytes are meaningful.
  block: [u8; BLOCK_LEN],
  block_len: u8,
  /// Position of the pending block inside the current chunk (0..16).
  block_index: u8,
  chunk_counter: u64,
  /// Chaining value of the in-progress chunk.
  chaining_value: [u32; 8],
  stack: MergeStack,
  phase: Phase,
  stats: Stats,
}

impl Default for Blake3 {
  #[inline]
  fn default() -> Self {
    Self::new()
  }
}

impl Blake3 {
  /// Create a fresh hasher.
  #[inline]
  #[must_use]
  pub fn new() -> Self {
    Self {
      block: [0u8; BLOCK_LEN],
      block_len: 0,
      block_index: 0,
      chunk_counter: 0,
      chaining_value: IV,
      stack: MergeStack::default(),
      phase: Phase::Empty,
      stats: Stats::default(),
    }
  }

  /// Compute the hash of `data` in one shot.
  #[inline]
  #[must_use]
  pub fn digest(data: &[u8]) -> [u8; OUT_LEN] {
    let mut h = Self::new();
    h.ingest(data);
    h.finish()
  }

  /// Compute the hash of `data` in one shot, as a [`Hash`].
  #[inline]
  #[must_use]
  pub fn hash(data: &[u8]) -> Hash {
    Hash::from_bytes(Self::digest(data))
  }

  /// Append `input` to the message.
  ///
  /// # Errors
  ///
  /// Returns [`FinalizedError`] if the hasher was already finalized.
  #[inline]
  pub fn update(&mut self, input: &[u8]) -> Result<(), FinalizedError> {
    self.ensure_live()?;
    self.ingest(input);
    Ok(())
  }

  /// Produce the digest. Callable exactly once.
  ///
  /// # Errors
  ///
  /// Returns [`FinalizedError`] on every call after the first.
  #[inline]
  pub fn finalize(&mut self) -> Result<[u8; OUT_LEN], FinalizedError> {
    self.ensure_live()?;
    Ok(self.finish())
  }

  /// Write the digest into `out`. Callable exactly once.
  ///
  /// `out` is left untouched on error.
  ///
  /// # Errors
  ///
  /// Returns [`FinalizedError`] if the hasher was already finalized.
  #[inline]
  pub fn finalize_into(&mut self, out: &mut [u8; OUT_LEN]) -> Result<(), FinalizedError> {
    *out = self.finalize()?;
    Ok(())
  }

  /// Produce the digest as a [`Hash`]. Callable exactly once.
  ///
  /// # Errors
  ///
  /// Returns [`FinalizedError`] if the hasher was already finalized.
  #[inline]
  pub fn finalize_hash(&mut self) -> Result<Hash, FinalizedError> {
    self.finalize().map(Hash::from_bytes)
  }

  /// Current lifecycle phase.
  #[inline]
  #[must_use]
  pub fn phase(&self) -> Phase {
    self.phase
  }

  /// Snapshot of the hasher's counters.
  #[inline]
  #[must_use]
  pub fn stats(&self) -> Stats {
    Stats {
      stack_depth: self.stack.len(),
      phase: self.phase,
      ..self.stats
    }
  }

  #[inline]
  fn ensure_live(&self) -> Result<(), FinalizedError> {
    if self.phase == Phase::Finalized {
      debug_event!(bytes = self.stats.bytes, "streamhash: hasher used after finalize");
      return Err(FinalizedError::new());
    }
    Ok(())
  }

  fn ingest(&mut self, mut input: &[u8]) {
    if input.is_empty() {
      return;
    }
    self.phase = Phase::Accumulating;
    self.stats.bytes = self.stats.bytes.wrapping_add(input.len() as u64);

    // Compress only while there is more input than fits in the pending
    // block: the last full block must stay buffered for `finish`.
    while input.len() > BLOCK_LEN - self.block_len as usize {
      let (head, rest) = input.split_at(BLOCK_LEN - self.block_len as usize);
      if let Some(dst) = self.block.get_mut(self.block_len as usize..) {
        dst.copy_from_slice(head);
      }
      input = rest;
      self.block_len = 0;
      self.compress_pending_block();
    }

    let start = self.block_len as usize;
    if let Some(dst) = self.block.get_mut(start..start + input.len()) {
      dst.copy_from_slice(input);
    }
    self.block_len = (start + input.len()) as u8;
  }

  fn compress_pending_block(&mut self) {
    let words = block_words(&self.block);
    self.chaining_value = compress(
      &self.chaining_value,
      &words,
      self.chunk_counter,
      BLOCK_LEN as u32,
      Flags::for_block(self.block_index),
    );
    self.block_index += 1;

    if self.block_index == CHUNK_BLOCKS {
      self.block_index = 0;
      self.chunk_counter = self.chunk_counter.wrapping_add(1);
      let merges = self.stack.push_chunk(self.chaining_value, self.chunk_counter);
      self.chaining_value = IV;

      self.stats.chunks_completed = self.chunk_counter;
      self.stats.parent_compressions += u64::from(merges);
      self.stats.max_stack_depth = self.stats.max_stack_depth.max(self.stack.len());
      trace_event!(
        chunk = self.chunk_counter,
        merges,
        stack_depth = self.stack.len(),
        "streamhash: chunk complete"
      );
    }
  }

  fn finish(&mut self) -> [u8; OUT_LEN] {
    let pending = self.block_len as usize;
    if let Some(tail) = self.block.get_mut(pending..) {
      tail.fill(0);
    }

    let mut flags = Flags::CHUNK_END;
    if self.block_index == 0 {
      flags |= Flags::CHUNK_START;
    }
    let root = if self.stack.is_empty() {
      flags |= Flags::ROOT;
      RootNode::Chunk
    } else {
      RootNode::Parent
    };

    let words = block_words(&self.block);
    let candidate = compress(&self.chaining_value, &words, self.chunk_counter, pending as u32, flags);

    self.stats.parent_compressions += self.stack.len() as u64;
    let out = self.stack.unwind(candidate);

    self.phase = Phase::Finalized;
    self.stats.root = Some(root);
    debug_event!(
      bytes = self.stats.bytes,
      chunks = self.chunk_counter + 1,
      parent_compressions = self.stats.parent_compressions,
      root = ?root,
      "streamhash: finalized"
    );
    words8_to_le_bytes(&out)
  }
}

impl Digest for Blake3 {
  const OUTPUT_SIZE: usize = OUT_LEN;
  type Output = [u8; OUT_LEN];

  #[inline]
  fn new() -> Self {
    Blake3::new()
  }

  #[inline]
  fn update(&mut self, data: &[u8]) -> Result<(), FinalizedError> {
    Blake3::update(self, data)
  }

  #[inline]
  fn finalize(&mut self) -> Result<Self::Output, FinalizedError> {
    Blake3::finalize(self)
  }

  #[inline]
  fn is_finalized(&self) -> bool {
    self.phase == Phase::Finalized
  }

  #[inline]
  fn digest(data: &[u8]) -> Self::Output {
    Blake3::digest(data)
  }
}

#[cfg(test)]
mod tests {
  extern crate alloc;

  use alloc::vec::Vec;

  use super::*;
  use crate::CHUNK_LEN;

  fn input_pattern(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i % 251) as u8).collect()
  }

  fn hex32(hex: &str) -> [u8; 32] {
    let mut out = [0u8; 32];
    for (i, pair) in hex.as_bytes().chunks_exact(2).enumerate() {
      let hi = (pair[0] as char).to_digit(16).unwrap();
      let lo = (pair[1] as char).to_digit(16).unwrap();
      out[i] = ((hi << 4) | lo) as u8;
    }
    out
  }

  #[test]
  fn empty_input_without_update() {
    let mut h = Blake3::new();
    assert_eq!(h.phase(), Phase::Empty);
    assert_eq!(
      h.finalize().unwrap(),
      hex32("af1349b9f5f9a1a6a0404dea36dcc9499bcb25c9adc112b7cc9a93cae41f3262")
    );
    assert_eq!(h.stats().root, Some(RootNode::Chunk));
  }

  #[test]
  fn empty_updates_keep_empty_phase() {
    let mut h = Blake3::new();
    h.update(&[]).unwrap();
    h.update(b"").unwrap();
    assert_eq!(h.phase(), Phase::Empty);
    assert_eq!(h.finalize().unwrap(), Blake3::digest(&[]));
  }

  #[test]
  fn lifecycle_transitions() {
    let mut h = Blake3::new();
    h.update(b"a").unwrap();
    assert_eq!(h.phase(), Phase::Accumulating);
    h.update(b"b").unwrap();
    assert_eq!(h.phase(), Phase::Accumulating);
    let first = h.finalize().unwrap();
    assert_eq!(h.phase(), Phase::Finalized);
    assert_eq!(first, Blake3::digest(b"ab"));
  }

  #[test]
  fn second_finalize_is_rejected() {
    let mut h = Blake3::new();
    h.update(b"abc").unwrap();
    h.finalize().unwrap();
    assert_eq!(h.finalize(), Err(FinalizedError::new()));

    let mut out = [0x55u8; 32];
    assert_eq!(h.finalize_into(&mut out), Err(FinalizedError::new()));
    assert_eq!(out, [0x55u8; 32]);
  }

  #[test]
  fn update_after_finalize_is_rejected_and_inert() {
    let mut h = Blake3::new();
    h.update(b"abc").unwrap();
    h.finalize().unwrap();
    let before = h.stats();
    assert_eq!(h.update(b"more"), Err(FinalizedError::new()));
    assert_eq!(h.stats(), before);
  }

  #[test]
  fn abc_split_three_ways() {
    let mut h = Blake3::new();
    for b in b"abc" {
      h.update(core::slice::from_ref(b)).unwrap();
    }
    assert_eq!(h.finalize().unwrap(), Blake3::digest(b"abc"));
  }

  #[test]
  fn single_chunk_boundary_uses_no_parent() {
    let mut h = Blake3::new();
    h.update(&input_pattern(CHUNK_LEN)).unwrap();
    let before = h.stats();
    assert_eq!(before.stack_depth, 0);
    assert_eq!(before.chunks_completed, 0);

    h.finalize().unwrap();
    let after = h.stats();
    assert_eq!(after.parent_compressions, 0);
    assert_eq!(after.root, Some(RootNode::Chunk));
  }

  #[test]
  fn one_byte_past_a_chunk_needs_exactly_one_parent() {
    let mut h = Blake3::new();
    h.update(&input_pattern(CHUNK_LEN + 1)).unwrap();
    let before = h.stats();
    assert_eq!(before.chunks_completed, 1);
    assert_eq!(before.stack_depth, 1);
    assert_eq!(before.parent_compressions, 0);

    h.finalize().unwrap();
    let after = h.stats();
    assert_eq!(after.parent_compressions, 1);
    assert_eq!(after.root, Some(RootNode::Parent));
    assert_eq!(after.stack_depth, 0);
  }

  #[test]
  fn stack_depth_is_popcount_of_completed_chunks() {
    // One byte past the boundary forces the Nth chunk to complete.
    let data = input_pattern(64 * CHUNK_LEN + 1);
    for n in 1..=64usize {
      let mut h = Blake3::new();
      h.update(&data[..n * CHUNK_LEN + 1]).unwrap();
      let stats = h.stats();
      assert_eq!(stats.chunks_completed, n as u64);
      assert_eq!(stats.stack_depth, n.count_ones() as usize, "after {n} chunks");
    }
  }

  #[test]
  fn parent_count_is_chunks_minus_one() {
    for chunks in [2usize, 3, 4, 5, 7, 8, 9, 16, 17] {
      let mut h = Blake3::new();
      h.update(&input_pattern(chunks * CHUNK_LEN)).unwrap();
      h.finalize().unwrap();
      assert_eq!(h.stats().parent_compressions, chunks as u64 - 1, "{chunks} chunks");
    }
  }

  #[test]
  fn full_block_stays_buffered() {
    let mut h = Blake3::new();
    h.update(&[7u8; BLOCK_LEN]).unwrap();
    assert_eq!(h.block_len as usize, BLOCK_LEN);
    assert_eq!(h.block_index, 0);
    assert_eq!(h.chaining_value, IV);

    h.update(&[7u8]).unwrap();
    assert_eq!(h.block_len, 1);
    assert_eq!(h.block_index, 1);
  }

  #[test]
  fn incremental_state_matches_concatenated_state() {
    let data = input_pattern(3 * CHUNK_LEN + 100);
    let mut whole = Blake3::new();
    whole.update(&data).unwrap();

    for split in [0, 1, 63, 64, 65, 1023, 1024, 1025, 2048, data.len()] {
      let (a, b) = data.split_at(split);
      let mut parts = Blake3::new();
      parts.update(a).unwrap();
      parts.update(b).unwrap();

      assert_eq!(parts.block[..parts.block_len as usize], whole.block[..whole.block_len as usize]);
      assert_eq!(parts.block_len, whole.block_len);
      assert_eq!(parts.block_index, whole.block_index);
      assert_eq!(parts.chunk_counter, whole.chunk_counter);
      assert_eq!(parts.chaining_value, whole.chaining_value);
      assert_eq!(parts.stats(), whole.stats(), "split {split}");
      assert_eq!(parts.clone().finalize().unwrap(), whole.clone().finalize().unwrap());
    }
  }

  #[test]
  fn clone_forks_independent_state() {
    let mut h = Blake3::new();
    h.update(b"shared prefix ").unwrap();
    let mut fork = h.clone();
    h.update(b"left").unwrap();
    fork.update(b"right").unwrap();
    assert_eq!(h.finalize().unwrap(), Blake3::digest(b"shared prefix left"));
    assert_eq!(fork.finalize().unwrap(), Blake3::digest(b"shared prefix right"));
  }

  #[test]
  fn digest_trait_matches_inherent_api() {
    let data = input_pattern(2500);
    let mut h = <Blake3 as Digest>::new();
    Digest::update_vectored(&mut h, &[&data[..10], &data[10..1500], &data[1500..]]).unwrap();
    assert!(!Digest::is_finalized(&h));
    assert_eq!(Digest::finalize(&mut h).unwrap(), <Blake3 as Digest>::digest(&data));
    assert!(Digest::is_finalized(&h));
    assert_eq!(Digest::update_vectored(&mut h, &[]), Err(FinalizedError::new()));
  }
}
