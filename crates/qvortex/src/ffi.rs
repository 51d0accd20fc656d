//! C-ABI surface.
//!
//! Every function validates its pointers and reports through the status code
//! alone; there are no out-of-band channels. A `NULL` data pointer is valid
//! when the paired length is zero. Contexts are caller-allocated (the
//! [`Qvortex`] struct is `#[repr(C)]` for exactly this purpose) and are
//! wiped by [`qvortex_final`] before it returns.

use core::ffi::{c_char, c_int};

use hashes::crypto::{DIGEST_SIZE, Qvortex};
use zeroize::Zeroize;

/// Operation completed.
pub const QVORTEX_SUCCESS: c_int = 0;
/// A required pointer was null, or a data pointer was null with a nonzero length.
pub const QVORTEX_ERROR_NULL_POINTER: c_int = -1;
/// Reserved; the hash path performs no allocation.
pub const QVORTEX_ERROR_MEMORY_ALLOCATION: c_int = -2;

// Shared body of `qvortex_hash` and its legacy alias. Safety contract is the
// callers': data readable for len bytes (or null with len == 0), key readable
// for key_len bytes (or null), out writable for 32 bytes.
unsafe fn hash_into(
  data: *const u8,
  len: usize,
  key: *const u8,
  key_len: usize,
  out: *mut u8,
) -> c_int {
  if out.is_null() || (data.is_null() && len > 0) {
    return QVORTEX_ERROR_NULL_POINTER;
  }

  let data = if len == 0 {
    &[][..]
  } else {
    core::slice::from_raw_parts(data, len)
  };
  let key = if key.is_null() || key_len == 0 {
    &[][..]
  } else {
    core::slice::from_raw_parts(key, key_len)
  };

  let mut ctx = Qvortex::with_key(key);
  ctx.update(data);
  ctx.finalize_into(&mut *out.cast::<[u8; DIGEST_SIZE]>());
  QVORTEX_SUCCESS
}

/// One-shot hash.
///
/// The `blocks_per_sbox` and `use_precomputed` parameters are retained for
/// binary compatibility with older callers; any value is accepted and ignored.
///
/// # Safety
///
/// `data` must be readable for `len` bytes (or null with `len == 0`), `key`
/// readable for `key_len` bytes (or null), and `out` writable for 32 bytes.
#[no_mangle]
pub unsafe extern "C" fn qvortex_hash(
  data: *const u8,
  len: usize,
  _blocks_per_sbox: c_int,
  _use_precomputed: c_int,
  key: *const u8,
  key_len: usize,
  out: *mut u8,
) -> c_int {
  hash_into(data, len, key, key_len, out)
}

/// Legacy alias for [`qvortex_hash`] with identical semantics.
///
/// # Safety
///
/// See [`qvortex_hash`].
#[no_mangle]
pub unsafe extern "C" fn vortex_hash(
  data: *const u8,
  len: usize,
  _blocks_per_sbox: c_int,
  _use_precomputed: c_int,
  key: *const u8,
  key_len: usize,
  out: *mut u8,
) -> c_int {
  hash_into(data, len, key, key_len, out)
}

/// Initialize a caller-allocated context, deriving the S-box from `key`.
///
/// # Safety
///
/// `ctx` must point to memory large enough for a [`Qvortex`] context; `key`
/// must be readable for `key_len` bytes or null.
#[no_mangle]
pub unsafe extern "C" fn qvortex_init(ctx: *mut Qvortex, key: *const u8, key_len: usize) -> c_int {
  if ctx.is_null() {
    return QVORTEX_ERROR_NULL_POINTER;
  }

  let key = if key.is_null() || key_len == 0 {
    &[][..]
  } else {
    core::slice::from_raw_parts(key, key_len)
  };

  // The target may hold uninitialized C memory; write without dropping it.
  ctx.write(Qvortex::with_key(key));
  QVORTEX_SUCCESS
}

/// Absorb `len` bytes into an initialized context.
///
/// # Safety
///
/// `ctx` must point to a context initialized by [`qvortex_init`]; `data` must
/// be readable for `len` bytes (or null with `len == 0`).
#[no_mangle]
pub unsafe extern "C" fn qvortex_update(ctx: *mut Qvortex, data: *const u8, len: usize) -> c_int {
  if ctx.is_null() || (data.is_null() && len > 0) {
    return QVORTEX_ERROR_NULL_POINTER;
  }

  if len > 0 {
    (*ctx).update(core::slice::from_raw_parts(data, len));
  }
  QVORTEX_SUCCESS
}

/// Emit the 32-byte digest and wipe the context.
///
/// # Safety
///
/// `ctx` must point to a context initialized by [`qvortex_init`]; `out` must
/// be writable for 32 bytes.
#[no_mangle]
pub unsafe extern "C" fn qvortex_final(ctx: *mut Qvortex, out: *mut u8) -> c_int {
  if ctx.is_null() || out.is_null() {
    return QVORTEX_ERROR_NULL_POINTER;
  }

  let ctx = &mut *ctx;
  ctx.finalize_into(&mut *out.cast::<[u8; DIGEST_SIZE]>());
  ctx.zeroize();
  QVORTEX_SUCCESS
}

/// Version string as a static NUL-terminated `major.minor.patch`.
#[no_mangle]
pub extern "C" fn qvortex_version() -> *const c_char {
  static VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), "\0");
  VERSION.as_ptr().cast()
}
