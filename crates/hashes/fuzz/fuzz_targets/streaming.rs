//! Fuzz target for the streaming Qvortex API.
//!
//! Tests that arbitrary sequences of update calls reproduce the one-shot
//! digest, for arbitrary keys.

#![no_main]

use arbitrary::Arbitrary;
use hashes::crypto::Qvortex;
use libfuzzer_sys::fuzz_target;
use traits::Digest;

#[derive(Arbitrary, Debug)]
struct Input {
  key: Vec<u8>,
  data: Vec<u8>,
  /// Chunk sizes for streaming updates
  chunk_sizes: Vec<usize>,
}

fuzz_target!(|input: Input| {
  let data = &input.data;

  let mut oneshot = Qvortex::with_key(&input.key);
  oneshot.update(data);
  let expected = oneshot.finalize();

  let mut hasher = Qvortex::with_key(&input.key);
  let mut offset = 0;
  let mut chunk_idx = 0;

  while offset < data.len() {
    let chunk_size = if input.chunk_sizes.is_empty() {
      1
    } else {
      let idx = chunk_idx.strict_rem(input.chunk_sizes.len());
      input.chunk_sizes[idx].strict_rem(256).max(1)
    };

    let end = offset.strict_add(chunk_size).min(data.len());
    hasher.update(&data[offset..end]);
    offset = end;
    chunk_idx = chunk_idx.strict_add(1);
  }

  assert_eq!(hasher.finalize(), expected, "qvortex streaming mismatch");

  // Reset must return the hasher to its post-init state, key included.
  hasher.reset();
  hasher.update(data);
  assert_eq!(hasher.finalize(), expected, "qvortex reset mismatch");

  if input.key.is_empty() {
    assert_eq!(expected, Qvortex::digest(data), "keyless one-shot mismatch");
  }
});
