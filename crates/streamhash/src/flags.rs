//! Domain-separation flags.
//!
//! Every compression carries the role of the node it produces. The block's
//! position inside its chunk is tracked separately by the hasher; flags only
//! say what the output is for.

bitflags::bitflags! {
  /// Role bits fed into the last word of the compression state.
  #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
  pub struct Flags: u32 {
    /// First block of a chunk.
    const CHUNK_START = 1 << 0;
    /// Last block of a chunk.
    const CHUNK_END = 1 << 1;
    /// Parent node over two child chaining values.
    const PARENT = 1 << 2;
    /// The one compression whose output is the digest.
    const ROOT = 1 << 3;
  }
}

impl Flags {
  /// Flags for a block at `block_index` (0..16) of a chunk, before the chunk's
  /// final block is known.
  #[inline]
  #[must_use]
  pub const fn for_block(block_index: u8) -> Self {
    match block_index {
      0 => Self::CHUNK_START,
      15 => Self::CHUNK_END,
      _ => Self::empty(),
    }
  }
}
