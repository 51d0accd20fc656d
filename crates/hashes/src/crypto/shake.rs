//! SHAKE-style XOF over the f[1600] permutation.
//!
//! Rate 168 bytes, domain separator `0x1F`, pad10*1 with a final `0x80`. The
//! Qvortex core uses this XOF to derive its S-box; the types are public for
//! callers that need the raw stream.

#![allow(clippy::indexing_slicing)] // Fixed-size state + sponge buffering

use traits::Xof;

use super::keccak;

/// Sponge rate in bytes; the remaining 32 state bytes are capacity.
pub const RATE: usize = 168;

const LANES: usize = RATE / 8;
const DS: u8 = 0x1F;

/// Streaming XOF hasher.
#[derive(Clone)]
pub struct Shake128 {
  state: [u64; 25],
  buf: [u8; RATE],
  buf_len: usize,
}

impl Default for Shake128 {
  #[inline]
  fn default() -> Self {
    Self {
      state: [0u64; 25],
      buf: [0u8; RATE],
      buf_len: 0,
    }
  }
}

impl Shake128 {
  #[inline]
  #[must_use]
  pub fn new() -> Self {
    Self::default()
  }

  #[inline(always)]
  fn absorb_block(state: &mut [u64; 25], block: &[u8; RATE]) {
    let (chunks, _) = block.as_chunks::<8>();
    for (lane, chunk) in state[..LANES].iter_mut().zip(chunks.iter()) {
      *lane ^= u64::from_le_bytes(*chunk);
    }
    keccak::permute(state);
  }

  pub fn update(&mut self, mut data: &[u8]) {
    if data.is_empty() {
      return;
    }

    if self.buf_len != 0 {
      let take = core::cmp::min(RATE - self.buf_len, data.len());
      self.buf[self.buf_len..self.buf_len + take].copy_from_slice(&data[..take]);
      self.buf_len += take;
      data = &data[take..];

      if self.buf_len == RATE {
        let block = self.buf;
        Self::absorb_block(&mut self.state, &block);
        self.buf_len = 0;
      }
    }

    let (blocks, rest) = data.as_chunks::<RATE>();
    for block in blocks {
      Self::absorb_block(&mut self.state, block);
    }
    data = rest;

    if !data.is_empty() {
      self.buf[..data.len()].copy_from_slice(data);
      self.buf_len = data.len();
    }
  }

  #[inline(always)]
  fn finalize_state(&self) -> [u64; 25] {
    let mut state = self.state;
    let mut buf = self.buf;
    let buf_len = self.buf_len;

    debug_assert!(buf_len < RATE, "buf_len={buf_len} should be < RATE={RATE}");

    // Pad over a zeroed tail: domain separator, then 0x80 on the last rate byte.
    buf[buf_len..].fill(0);
    buf[buf_len] ^= DS;
    buf[RATE - 1] ^= 0x80;

    Self::absorb_block(&mut state, &buf);
    state
  }

  /// Finalize into an XOF reader; the hasher itself can keep absorbing.
  #[inline]
  #[must_use]
  pub fn finalize_xof(&self) -> Shake128Xof {
    let state = self.finalize_state();
    let mut buf = [0u8; RATE];
    Shake128Xof::fill_buf(&state, &mut buf);
    Shake128Xof { state, buf, pos: 0 }
  }

  /// Finalize and squeeze `out.len()` bytes without constructing a reader.
  pub fn finalize_xof_into(&self, mut out: &mut [u8]) {
    let mut state = self.finalize_state();

    while !out.is_empty() {
      let mut lane = 0usize;
      while lane < LANES && !out.is_empty() {
        let bytes = state[lane].to_le_bytes();
        let take = core::cmp::min(8, out.len());
        out[..take].copy_from_slice(&bytes[..take]);
        out = &mut out[take..];
        lane += 1;
      }

      if !out.is_empty() {
        keccak::permute(&mut state);
      }
    }
  }

  #[inline]
  pub fn reset(&mut self) {
    *self = Self::default();
  }

  /// One-shot: absorb `data`, squeeze `out.len()` bytes.
  #[inline]
  pub fn hash_into(data: &[u8], out: &mut [u8]) {
    let mut h = Self::new();
    h.update(data);
    h.finalize_xof_into(out);
  }
}

/// XOF reader; created by [`Shake128::finalize_xof`].
#[derive(Clone)]
pub struct Shake128Xof {
  state: [u64; 25],
  buf: [u8; RATE],
  pos: usize,
}

impl Shake128Xof {
  #[inline(always)]
  fn fill_buf(state: &[u64; 25], out: &mut [u8; RATE]) {
    let (chunks, _) = out.as_chunks_mut::<8>();
    for (chunk, lane) in chunks.iter_mut().zip(state.iter()) {
      *chunk = lane.to_le_bytes();
    }
  }
}

impl Xof for Shake128Xof {
  fn squeeze(&mut self, mut out: &mut [u8]) {
    while !out.is_empty() {
      if self.pos == RATE {
        keccak::permute(&mut self.state);
        Self::fill_buf(&self.state, &mut self.buf);
        self.pos = 0;
      }

      let take = core::cmp::min(RATE - self.pos, out.len());
      out[..take].copy_from_slice(&self.buf[self.pos..self.pos + take]);
      self.pos += take;
      out = &mut out[take..];
    }
  }
}
