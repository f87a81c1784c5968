//! One-shot BLAKE3 against the official crate.

#![no_main]

use libfuzzer_sys::fuzz_target;
use streamhash::{Blake3, Hash};

fuzz_target!(|data: &[u8]| {
  let ours = Blake3::digest(data);
  let expected = *blake3::hash(data).as_bytes();
  assert_eq!(ours, expected);

  let hash = Blake3::hash(data);
  assert!(hash.verify(&expected).is_ok());
  assert_eq!(Hash::from_hex(hash.to_hex()), Ok(hash));
});
