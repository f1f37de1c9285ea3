//! The hashing state machine: buffering, counters, finalization.
//!
//! An engine owns its working state outright and never aliases caller
//! buffers beyond read-only decoding. It is single-threaded by design;
//! distinct engines share nothing and may run fully in parallel.

#![allow(clippy::indexing_slicing)] // Fixed-size block buffer, audited offsets

use core::fmt;

use crate::{BLOCK_LEN, ConfigError, InputError, OUT_LEN_MAX, Params, kernel::compress};

/// A finalized digest of 1..=64 bytes.
///
/// Comparisons look only at the configured digest length, so a 32-byte
/// output never equals a 64-byte one.
#[derive(Clone, Copy)]
pub struct Output {
  pub(crate) bytes: [u8; OUT_LEN_MAX],
  pub(crate) len: u8,
}

impl Output {
  /// The digest bytes, truncated to the configured digest length.
  #[inline]
  #[must_use]
  pub fn as_bytes(&self) -> &[u8] {
    &self.bytes[..self.len as usize]
  }

  /// Digest length in bytes.
  #[inline]
  #[must_use]
  pub const fn len(&self) -> usize {
    self.len as usize
  }

  /// Always false; digests are at least one byte.
  #[inline]
  #[must_use]
  pub const fn is_empty(&self) -> bool {
    self.len == 0
  }
}

impl AsRef<[u8]> for Output {
  #[inline]
  fn as_ref(&self) -> &[u8] {
    self.as_bytes()
  }
}

impl PartialEq for Output {
  #[inline]
  fn eq(&self, other: &Self) -> bool {
    self.as_bytes() == other.as_bytes()
  }
}

impl Eq for Output {}

impl PartialEq<[u8]> for Output {
  #[inline]
  fn eq(&self, other: &[u8]) -> bool {
    self.as_bytes() == other
  }
}

impl fmt::Debug for Output {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("Output(")?;
    for b in self.as_bytes() {
      write!(f, "{b:02x}")?;
    }
    f.write_str(")")
  }
}

/// Incremental BLAKE2b engine.
///
/// Construction derives the initial chain value from a [`Params`] block (and
/// absorbs the key block if one is configured); mutating the params
/// afterwards has no effect on the engine. Zero or more [`update`] calls
/// absorb input; a finalize emits the digest and returns the engine to its
/// freshly constructed state, ready for the next message.
///
/// [`update`]: Engine::update
#[derive(Clone)]
pub struct Engine {
  pub(crate) h: [u64; 8],
  pub(crate) t: u128,
  pub(crate) f: [u64; 2],
  pub(crate) buf: [u8; BLOCK_LEN],
  pub(crate) buf_len: usize,
  pub(crate) last_node: bool,
  pub(crate) out_len: u8,
  pub(crate) h0: [u64; 8],
  pub(crate) key_block: [u8; BLOCK_LEN],
  pub(crate) key_len: u8,
}

impl fmt::Debug for Engine {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    // Neither the chain value nor the stored key block is shown; the chain
    // value of a keyed engine is key-derived material.
    f.debug_struct("Engine")
      .field("digest_length", &self.out_len)
      .field("key_length", &self.key_len)
      .field("bytes_compressed", &self.t)
      .field("buf_len", &self.buf_len)
      .field("last_node", &self.last_node)
      .finish_non_exhaustive()
  }
}

impl Default for Engine {
  #[inline]
  fn default() -> Self {
    Self::new(&Params::default())
  }
}

impl Engine {
  /// Build an engine from a parameter block (keyed or unkeyed).
  #[must_use]
  pub fn new(params: &Params) -> Self {
    let mut engine = Self {
      h: params.h0(),
      t: 0,
      f: [0; 2],
      buf: [0u8; BLOCK_LEN],
      buf_len: 0,
      last_node: false,
      out_len: params.digest_length() as u8,
      h0: params.h0(),
      key_block: params.key_block().copied().unwrap_or([0u8; BLOCK_LEN]),
      key_len: params.key_length() as u8,
    };
    engine.absorb_key();
    engine
  }

  /// Build a MAC engine; fails unless the params carry a non-empty key.
  pub fn keyed(params: &Params) -> Result<Self, ConfigError> {
    if !params.has_key() {
      return Err(ConfigError::MissingKey);
    }
    Ok(Self::new(params))
  }

  pub(crate) fn with_last_node(params: &Params, last_node: bool) -> Self {
    let mut engine = Self::new(params);
    engine.last_node = last_node;
    engine
  }

  /// One-shot digest of `data` under `params`.
  #[must_use]
  pub fn hash(params: &Params, data: &[u8]) -> Output {
    let mut engine = Self::new(params);
    engine.update(data);
    engine.finalize()
  }

  /// Configured digest length in bytes.
  #[inline]
  #[must_use]
  pub fn digest_length(&self) -> usize {
    self.out_len as usize
  }

  fn absorb_key(&mut self) {
    // The zero-padded key block is the first 128 absorbed bytes; it sits in
    // the buffer until input (or finalization) flushes it, so it is counted
    // into t exactly like message data.
    if self.key_len > 0 {
      let block = self.key_block;
      self.update(&block);
    }
  }

  /// Return the engine to its freshly constructed state, discarding any
  /// buffered input (re-absorbing the key block if keyed).
  pub fn reset(&mut self) {
    self.buf = [0u8; BLOCK_LEN];
    self.buf_len = 0;
    self.t = 0;
    self.f = [0; 2];
    self.h = self.h0;
    self.absorb_key();
  }

  /// Absorb `data`.
  ///
  /// A full buffer is flushed only once more input arrives, so the buffer
  /// always holds the candidate final block; long inputs are compressed in
  /// direct 128-byte strides without staging through the buffer.
  pub fn update(&mut self, mut data: &[u8]) {
    if data.is_empty() {
      return;
    }

    if self.buf_len != 0 {
      let take = core::cmp::min(BLOCK_LEN - self.buf_len, data.len());
      self.buf[self.buf_len..self.buf_len + take].copy_from_slice(&data[..take]);
      self.buf_len += take;
      data = &data[take..];

      if self.buf_len == BLOCK_LEN && !data.is_empty() {
        self.t = self.t.wrapping_add(BLOCK_LEN as u128);
        compress(&mut self.h, &self.buf, self.t, self.f);
        self.buf_len = 0;
      }
    }

    let (blocks, rest) = data.as_chunks::<BLOCK_LEN>();
    if !blocks.is_empty() {
      // If `rest` is empty the last full block may be final; hold it back.
      let (interior, held) = if rest.is_empty() {
        (&blocks[..blocks.len() - 1], Some(blocks[blocks.len() - 1]))
      } else {
        (blocks, None)
      };

      for block in interior {
        self.t = self.t.wrapping_add(BLOCK_LEN as u128);
        compress(&mut self.h, block, self.t, self.f);
      }

      if let Some(last) = held {
        self.buf.copy_from_slice(&last);
        self.buf_len = BLOCK_LEN;
      }
    }
    data = rest;

    if !data.is_empty() {
      self.buf[..data.len()].copy_from_slice(data);
      self.buf_len = data.len();
    }
  }

  /// Absorb a single byte.
  #[inline]
  pub fn update_byte(&mut self, byte: u8) {
    self.update(&[byte]);
  }

  fn finalize_unchecked(&mut self, out: &mut [u8]) {
    self.buf[self.buf_len..].fill(0);
    self.t = self.t.wrapping_add(self.buf_len as u128);
    self.f[0] = u64::MAX;
    self.f[1] = if self.last_node { u64::MAX } else { 0 };
    compress(&mut self.h, &self.buf, self.t, self.f);

    let mut words = [0u8; OUT_LEN_MAX];
    for (i, word) in self.h.iter().enumerate() {
      words[i * 8..i * 8 + 8].copy_from_slice(&word.to_le_bytes());
    }
    out.copy_from_slice(&words[..out.len()]);

    self.reset();
  }

  /// Finalize into `out`, truncating to `out.len()` bytes, then auto-reset.
  ///
  /// `out.len()` must not exceed the configured digest length; a rejected
  /// call leaves the engine untouched and usable.
  pub fn finalize_into(&mut self, out: &mut [u8]) -> Result<(), InputError> {
    if out.len() > self.out_len as usize {
      return Err(InputError::OutputLength {
        requested: out.len(),
        limit: self.out_len as usize,
      });
    }
    self.finalize_unchecked(out);
    Ok(())
  }

  /// Finalize into a digest-length [`Output`], then auto-reset.
  #[must_use]
  pub fn finalize(&mut self) -> Output {
    let mut output = Output {
      bytes: [0u8; OUT_LEN_MAX],
      len: self.out_len,
    };
    let len = self.out_len as usize;
    self.finalize_unchecked(&mut output.bytes[..len]);
    output
  }
}

#[cfg(test)]
mod tests {
  extern crate std;

  use std::vec::Vec;

  use super::*;

  fn pattern(len: usize) -> Vec<u8> {
    (0..len)
      .map(|i| (i as u8).wrapping_mul(31).wrapping_add((i >> 8) as u8))
      .collect()
  }

  #[test]
  fn chunked_updates_match_one_shot() {
    let msg = pattern(1000);
    let params = Params::new();
    let expected = Engine::hash(&params, &msg);

    for &chunk in &[1usize, 7, 63, 64, 65, 127, 128, 129, 256] {
      let mut engine = Engine::new(&params);
      for part in msg.chunks(chunk) {
        engine.update(part);
      }
      assert_eq!(engine.finalize(), expected, "chunk={chunk}");
    }
  }

  #[test]
  fn update_byte_matches_slice_update() {
    let msg = pattern(300);
    let params = Params::new();
    let expected = Engine::hash(&params, &msg);

    let mut engine = Engine::new(&params);
    for &b in &msg {
      engine.update_byte(b);
    }
    assert_eq!(engine.finalize(), expected);
  }

  #[test]
  fn engine_is_reusable_after_finalize() {
    let params = Params::new();
    let mut engine = Engine::new(&params);

    engine.update(b"first message");
    let _ = engine.finalize();

    engine.update(b"second message");
    let reused = engine.finalize();
    assert_eq!(reused, Engine::hash(&params, b"second message"));
  }

  #[test]
  fn keyed_engine_is_reusable_after_finalize() {
    let mut params = Params::new();
    params.set_key(b"sixteen byte key").unwrap();
    let mut engine = Engine::keyed(&params).unwrap();

    engine.update(b"first");
    let first = engine.finalize();
    engine.update(b"first");
    assert_eq!(engine.finalize(), first);
  }

  #[test]
  fn explicit_reset_discards_buffered_input() {
    let params = Params::new();
    let mut engine = Engine::new(&params);
    engine.update(&pattern(500));
    engine.reset();
    engine.update(b"msg");
    assert_eq!(engine.finalize(), Engine::hash(&params, b"msg"));
  }

  #[test]
  fn keyed_constructor_requires_key() {
    assert_eq!(Engine::keyed(&Params::new()).unwrap_err(), ConfigError::MissingKey);
  }

  #[test]
  fn later_params_mutation_does_not_affect_engine() {
    let mut params = Params::new();
    params.set_digest_length(32).unwrap();
    let mut engine = Engine::new(&params);

    params.set_digest_length(64).unwrap().set_node_offset(99);
    engine.update(b"data");
    let digest = engine.finalize();

    let mut fresh_params = Params::new();
    fresh_params.set_digest_length(32).unwrap();
    assert_eq!(digest, Engine::hash(&fresh_params, b"data"));
  }

  #[test]
  fn finalize_into_truncates_and_rejects_overlong() {
    let mut params = Params::new();
    params.set_digest_length(32).unwrap();
    let full = Engine::hash(&params, b"data");

    let mut short = [0u8; 20];
    let mut engine = Engine::new(&params);
    engine.update(b"data");
    engine.finalize_into(&mut short).unwrap();
    assert_eq!(&short, &full.as_bytes()[..20]);

    let mut long = [0u8; 33];
    engine.update(b"data");
    let err = engine.finalize_into(&mut long).unwrap_err();
    assert_eq!(
      err,
      InputError::OutputLength {
        requested: 33,
        limit: 32
      }
    );
    // The rejected call left the stream intact.
    let mut out = [0u8; 32];
    engine.finalize_into(&mut out).unwrap();
    assert_eq!(&out[..], full.as_bytes());
  }

  #[test]
  fn digest_lengths_one_and_sixty_four_size_the_output() {
    for len in [1usize, 64] {
      let mut params = Params::new();
      params.set_digest_length(len).unwrap();
      assert_eq!(Engine::hash(&params, b"x").len(), len);
    }
  }

  #[test]
  fn debug_output_redacts_key_material() {
    let mut params = Params::new();
    params.set_key(b"super secret key").unwrap();
    let engine = Engine::keyed(&params).unwrap();

    let rendered = std::format!("{params:?} {engine:?}");
    assert!(!rendered.contains("super secret"));
    assert!(rendered.contains("key_length: 16"));
  }

  #[test]
  fn output_eq_respects_length() {
    let mut p32 = Params::new();
    p32.set_digest_length(32).unwrap();
    let a = Engine::hash(&p32, b"data");
    let b = Engine::hash(&Params::new(), b"data");
    // Same leading bytes would still not make unequal lengths compare equal.
    assert_ne!(a, b);
    assert_eq!(a, Engine::hash(&p32, b"data"));
  }
}
