//! Merge stack of completed-subtree chaining values.
//!
//! Entry `i` is the root of a complete subtree, and sizes strictly decrease
//! toward the top. The number of entries equals the popcount of the number of
//! chunks merged so far, so 64 slots cover every 64-bit chunk counter.

use arrayvec::ArrayVec;

use crate::{Flags, compress::parent_cv};

pub(crate) const MAX_DEPTH: usize = 64;

#[derive(Clone, Debug, Default)]
pub(crate) struct MergeStack {
  entries: ArrayVec<[u32; 8], MAX_DEPTH>,
}

impl MergeStack {
  #[inline]
  pub(crate) fn len(&self) -> usize {
    self.entries.len()
  }

  #[inline]
  pub(crate) fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }

  /// Fold the chaining value of a just-completed chunk into the tree.
  ///
  /// `total_chunks` is the chunk count including this one. Each trailing zero
  /// bit means an equal-sized left sibling is waiting on the stack. Returns the
  /// number of parent compressions performed.
  pub(crate) fn push_chunk(&mut self, mut cv: [u32; 8], mut total_chunks: u64) -> u32 {
    let mut merges = 0;
    while total_chunks & 1 == 0 {
      let Some(left) = self.entries.pop() else {
        break;
      };
      cv = parent_cv(&left, &cv, Flags::empty());
      merges += 1;
      total_chunks >>= 1;
    }
    // Popcount bound: a full stack always merges at least once above.
    debug_assert!(!self.entries.is_full());
    let _ = self.entries.try_push(cv);
    merges
  }

  /// Fold every pending subtree into `right`, newest first.
  ///
  /// The last parent compression carries `ROOT`. `right` is returned unchanged
  /// when the stack is empty, in which case the caller already applied `ROOT`.
  pub(crate) fn unwind(&mut self, mut right: [u32; 8]) -> [u32; 8] {
    while let Some(left) = self.entries.pop() {
      let flags = if self.entries.is_empty() { Flags::ROOT } else { Flags::empty() };
      right = parent_cv(&left, &right, flags);
    }
    right
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn cv(tag: u32) -> [u32; 8] {
    [tag; 8]
  }

  #[test]
  fn odd_counts_push_without_merging() {
    let mut stack = MergeStack::default();
    assert_eq!(stack.push_chunk(cv(1), 1), 0);
    assert_eq!(stack.len(), 1);
  }

  #[test]
  fn second_chunk_merges_into_one_parent() {
    let mut stack = MergeStack::default();
    stack.push_chunk(cv(1), 1);
    assert_eq!(stack.push_chunk(cv(2), 2), 1);
    assert_eq!(stack.len(), 1);
    assert_eq!(stack.entries[0], parent_cv(&cv(1), &cv(2), Flags::empty()));
  }

  #[test]
  fn depth_tracks_popcount() {
    let mut stack = MergeStack::default();
    for n in 1..=300u64 {
      stack.push_chunk(cv(n as u32), n);
      assert_eq!(stack.len(), n.count_ones() as usize, "after {n} chunks");
    }
  }

  #[test]
  fn unwind_empties_and_roots_last_step() {
    let mut stack = MergeStack::default();
    stack.push_chunk(cv(1), 1);
    stack.push_chunk(cv(2), 2);
    stack.push_chunk(cv(3), 3);
    assert_eq!(stack.len(), 2);

    let a = stack.entries[0];
    let b = stack.entries[1];
    let right = cv(4);
    let expected = parent_cv(&a, &parent_cv(&b, &right, Flags::empty()), Flags::ROOT);
    assert_eq!(stack.unwind(right), expected);
    assert!(stack.is_empty());
  }

  #[test]
  fn unwind_of_empty_stack_is_identity() {
    let mut stack = MergeStack::default();
    assert_eq!(stack.unwind(cv(9)), cv(9));
  }

  #[test]
  fn counter_wrap_collapses_full_stack() {
    let mut stack = MergeStack::default();
    for tag in 0..MAX_DEPTH as u32 {
      stack.entries.push(cv(tag));
    }
    // A wrapped counter has no set bit; every pending entry merges.
    assert_eq!(stack.push_chunk(cv(99), 0), MAX_DEPTH as u32);
    assert_eq!(stack.len(), 1);
  }
}
