//! Qvortex digest: keyed S-box substitution over an ARX compression core.
//!
//! Each 64-byte block is bytewise-substituted through a key-derived table,
//! loaded as eight little-endian words, folded into a working copy of the
//! chaining state with input-driven rotations, mixed by two ARX rounds, and
//! fed forward by XOR. Finalization pads with `0x80`, zeros, and a 64-bit
//! little-endian bit count, then emits the first 32 state bytes.

#![allow(clippy::indexing_slicing)] // Fixed-size state, S-box, and block buffers

use traits::Digest;
use zeroize::{Zeroize, ZeroizeOnDrop};

use super::shake::Shake128;

/// Digest size in bytes.
pub const DIGEST_SIZE: usize = 32;

/// Compression block size in bytes.
pub const BLOCK_SIZE: usize = 64;

const STATE_WORDS: usize = 8;
const ARX_ROUNDS: usize = 2;
const LENGTH_SUFFIX: usize = 8;

// Quarter-mix rotation constants.
const R1: u32 = 32;
const R2: u32 = 24;
const R3: u32 = 16;
const R4: u32 = 63;

// Chaining-state initial vector.
const IV: [u64; STATE_WORDS] = [
  0x6A09_E667_F3BC_C908,
  0xBB67_AE85_84CA_A73B,
  0x3C6E_F372_FE94_F82B,
  0xA54F_F53A_5F1D_36F1,
  0x510E_527F_ADE6_82D1,
  0x9B05_688C_2B3E_6C1F,
  0x1F83_D9AB_FB41_BD6B,
  0x5BE0_CD19_137E_2179,
];

// Seed used when no key is supplied.
const DEFAULT_SEED: [u8; 32] = [0xCC; 32];

/// Derive the 256-entry substitution table from `key`.
///
/// The table is a pseudorandom byte mapping, not a permutation of `0..=255`;
/// collisions are part of the construction and must not be corrected.
pub(crate) fn derive_sbox(key: &[u8]) -> [u8; 256] {
  let mut seed = DEFAULT_SEED;
  if !key.is_empty() {
    Shake128::hash_into(key, &mut seed);
  }
  let mut sbox = [0u8; 256];
  Shake128::hash_into(&seed, &mut sbox);
  sbox
}

/// Streaming Qvortex hasher.
///
/// Unkeyed via [`Qvortex::new`] (or the [`Digest`] trait), keyed via
/// [`Qvortex::with_key`]. `#[repr(C)]` with this exact field order so the
/// C API can hand out caller-allocated contexts.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
#[repr(C)]
pub struct Qvortex {
  state: [u64; STATE_WORDS],
  sbox: [u8; 256],
  buf: [u8; BLOCK_SIZE],
  buf_len: usize,
  total_len: u64,
}

impl Default for Qvortex {
  #[inline]
  fn default() -> Self {
    Self::with_key(&[])
  }
}

impl Qvortex {
  /// Create an unkeyed hasher.
  #[inline]
  #[must_use]
  pub fn new() -> Self {
    Self::default()
  }

  /// Create a keyed hasher; an empty key selects the unkeyed table.
  #[must_use]
  pub fn with_key(key: &[u8]) -> Self {
    Self {
      state: IV,
      sbox: derive_sbox(key),
      buf: [0u8; BLOCK_SIZE],
      buf_len: 0,
      total_len: 0,
    }
  }

  #[inline(always)]
  fn quarter_mix(s: &mut [u64; STATE_WORDS], a: usize, b: usize, c: usize, d: usize) {
    s[a] = s[a].wrapping_add(s[b]);
    s[d] = (s[d] ^ s[a]).rotate_left(R1);
    s[c] = s[c].wrapping_add(s[d]);
    s[b] = (s[b] ^ s[c]).rotate_left(R2);
    s[a] = s[a].wrapping_add(s[b]);
    s[d] = (s[d] ^ s[a]).rotate_left(R3);
    s[c] = s[c].wrapping_add(s[d]);
    s[b] = (s[b] ^ s[c]).rotate_left(R4);
  }

  fn process_block(state: &mut [u64; STATE_WORDS], sbox: &[u8; 256], block: &[u8; BLOCK_SIZE]) {
    // Substitute and load in one pass, little-endian words.
    let mut m = [0u64; STATE_WORDS];
    let (chunks, _) = block.as_chunks::<8>();
    for (word, chunk) in m.iter_mut().zip(chunks.iter()) {
      let mut sub = [0u8; 8];
      for (dst, &src) in sub.iter_mut().zip(chunk.iter()) {
        *dst = sbox[usize::from(src)];
      }
      *word = u64::from_le_bytes(sub);
    }

    let mut s = *state;

    // Input-driven rotation: the count is the low six bits of each word's
    // top byte.
    for (lane, &word) in s.iter_mut().zip(m.iter()) {
      let rot = ((word >> 56) & 63) as u32;
      *lane ^= word.rotate_left(rot);
    }

    for _ in 0..ARX_ROUNDS {
      Self::quarter_mix(&mut s, 0, 1, 2, 3);
      Self::quarter_mix(&mut s, 4, 5, 6, 7);
      Self::quarter_mix(&mut s, 0, 5, 2, 7);
      Self::quarter_mix(&mut s, 4, 1, 6, 3);
      s.rotate_left(1);
    }

    // Feed-forward into the chaining state.
    for (chain, mixed) in state.iter_mut().zip(s.iter()) {
      *chain ^= mixed;
    }
  }

  pub fn update(&mut self, mut data: &[u8]) {
    if data.is_empty() {
      return;
    }

    self.total_len = self.total_len.wrapping_add(data.len() as u64);

    if self.buf_len != 0 {
      let take = core::cmp::min(BLOCK_SIZE - self.buf_len, data.len());
      self.buf[self.buf_len..self.buf_len + take].copy_from_slice(&data[..take]);
      self.buf_len += take;
      data = &data[take..];

      if self.buf_len == BLOCK_SIZE {
        let block = self.buf;
        Self::process_block(&mut self.state, &self.sbox, &block);
        self.buf_len = 0;
      }
    }

    let (blocks, rest) = data.as_chunks::<BLOCK_SIZE>();
    for block in blocks {
      Self::process_block(&mut self.state, &self.sbox, block);
    }
    data = rest;

    if !data.is_empty() {
      self.buf[..data.len()].copy_from_slice(data);
      self.buf_len = data.len();
    }
  }

  fn finalize_state(&self) -> [u64; STATE_WORDS] {
    let mut state = self.state;
    let mut buf = self.buf;
    let buf_len = self.buf_len;

    debug_assert!(buf_len < BLOCK_SIZE, "buf_len={buf_len} should be < {BLOCK_SIZE}");

    buf[buf_len] = 0x80;
    if buf_len + 1 > BLOCK_SIZE - LENGTH_SUFFIX {
      // No room left for the length suffix; spill into a second block.
      buf[buf_len + 1..].fill(0);
      Self::process_block(&mut state, &self.sbox, &buf);
      buf = [0u8; BLOCK_SIZE];
    } else {
      buf[buf_len + 1..BLOCK_SIZE - LENGTH_SUFFIX].fill(0);
    }

    let total_bits = self.total_len.wrapping_mul(8);
    buf[BLOCK_SIZE - LENGTH_SUFFIX..].copy_from_slice(&total_bits.to_le_bytes());
    Self::process_block(&mut state, &self.sbox, &buf);
    state
  }

  /// Finalize into a caller-provided buffer; the hasher is left untouched.
  pub fn finalize_into(&self, out: &mut [u8; DIGEST_SIZE]) {
    let state = self.finalize_state();
    let (chunks, _) = out.as_chunks_mut::<8>();
    for (chunk, word) in chunks.iter_mut().zip(state.iter()) {
      *chunk = word.to_le_bytes();
    }
  }

  /// Return to the post-init state, keeping the derived S-box.
  pub fn reset(&mut self) {
    self.state = IV;
    self.buf = [0u8; BLOCK_SIZE];
    self.buf_len = 0;
    self.total_len = 0;
  }
}

impl Digest for Qvortex {
  const OUTPUT_SIZE: usize = DIGEST_SIZE;
  type Output = [u8; DIGEST_SIZE];

  #[inline]
  fn new() -> Self {
    Self::default()
  }

  #[inline]
  fn update(&mut self, data: &[u8]) {
    Qvortex::update(self, data);
  }

  #[inline]
  fn finalize(&self) -> Self::Output {
    let mut out = [0u8; DIGEST_SIZE];
    self.finalize_into(&mut out);
    out
  }

  #[inline]
  fn reset(&mut self) {
    Qvortex::reset(self);
  }
}

#[cfg(test)]
mod tests {
  extern crate alloc;

  use alloc::string::String;
  use alloc::vec::Vec;
  use core::fmt::Write;

  use traits::Digest;

  use super::{Qvortex, derive_sbox};
  use crate::crypto::shake::Shake128;

  fn hex(bytes: &[u8]) -> String {
    let mut s = String::new();
    for &b in bytes {
      write!(&mut s, "{b:02x}").unwrap();
    }
    s
  }

  fn hamming(a: &[u8; 32], b: &[u8; 32]) -> u32 {
    a.iter().zip(b.iter()).map(|(x, y)| (x ^ y).count_ones()).sum()
  }

  #[test]
  fn empty_input_golden() {
    assert_eq!(
      hex(&Qvortex::digest(b"")),
      "f161a330d8c842b133df1606bc07f95da47d5c5449d6c562cb83f25bd059ce23"
    );
  }

  #[test]
  fn short_input_goldens() {
    assert_eq!(
      hex(&Qvortex::digest(b"abc")),
      "5511cab1274c90513ab612235e97b1c7dce66efffe3d978c739aebf85723fb1f"
    );
    assert_eq!(
      hex(&Qvortex::digest(b"Hello, Qvortex!")),
      "b84ffaa8017df6a724db068def4e497dda373e13d37ad2cc3aa3de4412a42e2a"
    );
  }

  #[test]
  fn keyed_golden_differs_from_unkeyed() {
    let mut keyed = Qvortex::with_key(b"test key");
    keyed.update(b"Hello, Qvortex!");
    let digest = keyed.finalize();
    assert_eq!(
      hex(&digest),
      "1ed7391c1ae1827effa6a02f89aec7fa6ee225910821d60a170e31c4d13eeaa4"
    );
    assert_ne!(digest, Qvortex::digest(b"Hello, Qvortex!"));
  }

  #[test]
  fn block_boundary_goldens() {
    // 1, 63, 64, and 65 bytes of 0xAB: below, at, and above one block.
    let cases: [(usize, &str); 4] = [
      (1, "0e893f3ce4f12fa056e7996684703ea00f9892554f574953fa0ffaa9bc8c097c"),
      (63, "c9569aa442798e53f9c38c65aacf35f6c6719e2ba8eb58929d1d7d02f257ea48"),
      (64, "357f2459df45ebe17c6add0785016f63ba60d8ec4ef96a794f76d02d71b528cf"),
      (65, "6403229e2e766bc31af71e4f8ec207622f8e25c19a39845b2bfc370ea3a14573"),
    ];
    for (len, expected) in cases {
      let data = alloc::vec![0xABu8; len];
      assert_eq!(hex(&Qvortex::digest(&data)), expected, "len={len}");
    }
  }

  #[test]
  fn padding_spill_goldens() {
    // 55 bytes leaves exactly room for 0x80 + length; 56 and 57 spill into a
    // second padding block.
    let cases: [(usize, &str); 3] = [
      (55, "3ca7532e14649277c32030e09d8e8236e8ad443602c3cf1f6c6484fccbe73f96"),
      (56, "197c625bcec50496f71b0973fcb823116838a44f03df6fbd9c12478cdd54a4ce"),
      (57, "660d554b631db229f1d8d383cbd490d88dc13f502227f496621d24f592637cd7"),
    ];
    for (len, expected) in cases {
      let data = alloc::vec![b'a'; len];
      assert_eq!(hex(&Qvortex::digest(&data)), expected, "len={len}");
    }
  }

  #[test]
  fn zeros_input_is_nondegenerate() {
    let data = alloc::vec![0u8; 1024];
    let digest = Qvortex::digest(&data);
    assert_eq!(
      hex(&digest),
      "da64e0913843a0f1881f2ee0af3ca5627bf0a34c76b355398b8e863a5f52b5da"
    );

    let weight: u32 = digest.iter().map(|b| b.count_ones()).sum();
    assert!(digest.iter().any(|&b| b != 0));
    // A random 256-bit string has weight 128 on average; demand a wide band
    // around that rather than a bit-exact count.
    assert!((64..=192).contains(&weight), "degenerate weight {weight}");
  }

  #[test]
  fn large_input_golden() {
    let data: Vec<u8> = (0..1usize << 20).map(|i| ((i * 7 + 13) & 0xFF) as u8).collect();
    assert_eq!(
      hex(&Qvortex::digest(&data)),
      "109744a70a40c1e84bb3ad1fb73c36489df7590072062ae22f92b426cb074aea"
    );
  }

  #[test]
  fn split_updates_match_oneshot() {
    let data: Vec<u8> = (0..=255u8).collect();
    let oneshot = Qvortex::digest(&data);
    assert_eq!(
      hex(&oneshot),
      "2a5bef98210b089adc46d2cbe4a7594c457a5a9df0876dd535e5277301850b28"
    );

    let mut split = Qvortex::new();
    split.update(&data[..7]);
    split.update(&data[7..200]);
    split.update(&data[200..]);
    assert_eq!(split.finalize(), oneshot);

    let mut bytewise = Qvortex::new();
    for b in &data {
      bytewise.update(core::slice::from_ref(b));
    }
    assert_eq!(bytewise.finalize(), oneshot);
  }

  #[test]
  fn sbox_is_double_xof_of_key() {
    // Unkeyed: the seed is 32 bytes of 0xCC, not an XOF output.
    let mut expected = [0u8; 256];
    Shake128::hash_into(&[0xCC; 32], &mut expected);
    let sbox = derive_sbox(&[]);
    assert_eq!(sbox, expected);
    assert_eq!(hex(&sbox[..16]), "c34860d64d6d3f9b07fe1750e4ca63ae");

    // Keyed: seed = XOF(key, 32), table = XOF(seed, 256).
    let mut seed = [0u8; 32];
    Shake128::hash_into(b"test key", &mut seed);
    assert_eq!(
      hex(&seed),
      "95631329fbc0e542af74c4cf03428bfbf28b876a6089e19b336ac98b7ec35546"
    );
    let mut expected = [0u8; 256];
    Shake128::hash_into(&seed, &mut expected);
    let sbox = derive_sbox(b"test key");
    assert_eq!(sbox, expected);
    assert_eq!(hex(&sbox[..16]), "6592e706fc592a8618dba1ac0321dbf4");
  }

  #[test]
  fn single_key_bit_flips_half_the_digest() {
    let mut key = [0u8; 16];
    let mut a = Qvortex::with_key(&key);
    key[0] ^= 1;
    let mut b = Qvortex::with_key(&key);
    a.update(b"Hello, Qvortex!");
    b.update(b"Hello, Qvortex!");

    let dist = hamming(&a.finalize(), &b.finalize());
    assert!((64..=192).contains(&dist), "weak key diffusion: {dist} bits");
  }

  #[test]
  fn reset_keeps_the_key() {
    let mut keyed = Qvortex::with_key(b"test key");
    keyed.update(b"discarded prefix");
    keyed.reset();
    keyed.update(b"Hello, Qvortex!");
    assert_eq!(
      hex(&keyed.finalize()),
      "1ed7391c1ae1827effa6a02f89aec7fa6ee225910821d60a170e31c4d13eeaa4"
    );
  }

  #[test]
  fn finalize_is_nonconsuming() {
    let mut h = Qvortex::new();
    h.update(b"Hello, ");
    assert_eq!(h.finalize(), Qvortex::digest(b"Hello, "));

    // The hasher keeps absorbing as if finalize never happened.
    h.update(b"Qvortex!");
    assert_eq!(h.finalize(), Qvortex::digest(b"Hello, Qvortex!"));
  }

  #[test]
  fn vectored_update_matches_contiguous() {
    let digest = Qvortex::digest_vectored(&[b"Hello, ".as_slice(), b"", b"Qvortex!"]);
    assert_eq!(digest, Qvortex::digest(b"Hello, Qvortex!"));
  }

  #[test]
  fn empty_key_selects_unkeyed_table() {
    let mut keyed = Qvortex::with_key(&[]);
    keyed.update(b"abc");
    assert_eq!(keyed.finalize(), Qvortex::digest(b"abc"));
  }
}
