//! Fuzz target for the streaming BLAKE3 API.
//!
//! Arbitrary sequences of update calls must agree with the one-shot digest and
//! with the official crate fed the same pieces.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use streamhash::{Blake3, FinalizedError};

#[derive(Arbitrary, Debug)]
struct Input {
  data: Vec<u8>,
  /// Piece sizes for streaming updates, cycled.
  piece_sizes: Vec<u16>,
}

fuzz_target!(|input: Input| {
  let data = &input.data;
  let expected = *blake3::hash(data).as_bytes();

  let mut hasher = Blake3::new();
  let mut reference = blake3::Hasher::new();
  let mut offset = 0;
  let mut piece_idx = 0;

  while offset < data.len() {
    let piece = if input.piece_sizes.is_empty() {
      1
    } else {
      usize::from(input.piece_sizes[piece_idx % input.piece_sizes.len()] % 2049)
    };

    // Zero-sized pieces are legal and must not change anything.
    if piece == 0 {
      hasher.update(&[]).unwrap();
    }
    let end = (offset + piece.max(1)).min(data.len());
    hasher.update(&data[offset..end]).unwrap();
    reference.update(&data[offset..end]);
    offset = end;
    piece_idx += 1;

    if piece_idx % 7 == 0 {
      assert_eq!(hasher.clone().finalize().unwrap(), *reference.finalize().as_bytes());
    }
  }

  assert_eq!(hasher.finalize().unwrap(), expected, "streaming mismatch");
  assert_eq!(hasher.update(data), Err(FinalizedError::new()));
  assert_eq!(hasher.finalize(), Err(FinalizedError::new()));
});
