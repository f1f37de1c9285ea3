//! Parameter block: the 64-byte configuration image and its derived initial
//! chain value.
//!
//! Field layout (all little-endian):
//!
//! | offset | field          |
//! |--------|----------------|
//! | 0      | digest_length  |
//! | 1      | key_length     |
//! | 2      | fanout         |
//! | 3      | depth          |
//! | 4..8   | leaf_length    |
//! | 8..16  | node_offset    |
//! | 16     | node_depth     |
//! | 17     | inner_length   |
//! | 18..32 | reserved (zero)|
//! | 32..48 | salt           |
//! | 48..64 | personal       |
//!
//! The initial chain value is `h0[i] = IV[i] ^ LE64(image[8i..8i+8])`;
//! setters rewrite their field in the image and recompute only the lane(s)
//! the field lies in.

#![allow(clippy::indexing_slicing)] // Fixed image layout, audited offsets

use core::fmt;

use crate::{BLOCK_LEN, ConfigError, KEY_LEN_MAX, OUT_LEN_MAX, PARAM_LEN, PERSONAL_LEN, SALT_LEN, kernel::IV};

const OFF_DIGEST_LENGTH: usize = 0;
const OFF_KEY_LENGTH: usize = 1;
const OFF_FANOUT: usize = 2;
const OFF_DEPTH: usize = 3;
const OFF_LEAF_LENGTH: usize = 4;
const OFF_NODE_OFFSET: usize = 8;
const OFF_NODE_DEPTH: usize = 16;
const OFF_INNER_LENGTH: usize = 17;
const OFF_SALT: usize = 32;
const OFF_PERSONAL: usize = 48;

#[inline]
fn lane(bytes: &[u8; PARAM_LEN], i: usize) -> u64 {
  let mut w = [0u8; 8];
  w.copy_from_slice(&bytes[i * 8..i * 8 + 8]);
  u64::from_le_bytes(w)
}

/// BLAKE2b configuration parameter block.
///
/// Built with chainable `set_*` methods, then handed to
/// [`Engine::new`](crate::Engine::new); the engine copies the derived state
/// at construction, so mutating a `Params` afterwards never affects an
/// already-built engine. Every setter validates eagerly — out-of-range input
/// fails with [`ConfigError`], nothing is clamped.
///
/// The default block is unkeyed with a 64-byte digest, fanout 1, depth 1
/// (sequential hashing), and zero salt/personalization.
#[derive(Clone)]
pub struct Params {
  bytes: [u8; PARAM_LEN],
  h: [u64; 8],
  key_block: [u8; BLOCK_LEN],
}

impl fmt::Debug for Params {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    // The stored key block never enters the output; only its length does.
    f.debug_struct("Params")
      .field("digest_length", &self.digest_length())
      .field("key_length", &self.key_length())
      .field("fanout", &self.fanout())
      .field("depth", &self.depth())
      .field("leaf_length", &self.leaf_length())
      .field("node_offset", &self.node_offset())
      .field("node_depth", &self.node_depth())
      .field("inner_length", &self.inner_length())
      .field("salt", &self.salt())
      .field("personal", &self.personal())
      .finish()
  }
}

impl Default for Params {
  fn default() -> Self {
    let mut bytes = [0u8; PARAM_LEN];
    bytes[OFF_DIGEST_LENGTH] = OUT_LEN_MAX as u8;
    bytes[OFF_FANOUT] = 1;
    bytes[OFF_DEPTH] = 1;

    let mut h = [0u64; 8];
    for (i, word) in h.iter_mut().enumerate() {
      *word = IV[i] ^ lane(&bytes, i);
    }

    Self {
      bytes,
      h,
      key_block: [0u8; BLOCK_LEN],
    }
  }
}

impl Params {
  /// Default parameter block: unkeyed, 64-byte digest, sequential mode.
  #[inline]
  #[must_use]
  pub fn new() -> Self {
    Self::default()
  }

  #[inline]
  fn reload_lane(&mut self, i: usize) {
    self.h[i] = IV[i] ^ lane(&self.bytes, i);
  }

  /// Set the digest length in bytes, `1..=64`.
  pub fn set_digest_length(&mut self, len: usize) -> Result<&mut Self, ConfigError> {
    if len == 0 || len > OUT_LEN_MAX {
      return Err(ConfigError::DigestLength(len));
    }
    self.bytes[OFF_DIGEST_LENGTH] = len as u8;
    self.reload_lane(0);
    Ok(self)
  }

  /// Set the key, up to 64 bytes, switching the params into MAC mode.
  ///
  /// The key is stored zero-padded to a full 128-byte block, which a keyed
  /// engine absorbs as its first block. An empty key switches back to
  /// unkeyed mode.
  pub fn set_key(&mut self, key: &[u8]) -> Result<&mut Self, ConfigError> {
    if key.len() > KEY_LEN_MAX {
      return Err(ConfigError::KeyLength(key.len()));
    }
    self.key_block = [0u8; BLOCK_LEN];
    self.key_block[..key.len()].copy_from_slice(key);
    self.bytes[OFF_KEY_LENGTH] = key.len() as u8;
    self.reload_lane(0);
    Ok(self)
  }

  /// Set the tree fanout, at least 1.
  pub fn set_fanout(&mut self, fanout: u8) -> Result<&mut Self, ConfigError> {
    if fanout == 0 {
      return Err(ConfigError::Fanout);
    }
    self.bytes[OFF_FANOUT] = fanout;
    self.reload_lane(0);
    Ok(self)
  }

  /// Set the maximum tree depth, at least 1.
  pub fn set_depth(&mut self, depth: u8) -> Result<&mut Self, ConfigError> {
    if depth == 0 {
      return Err(ConfigError::Depth);
    }
    self.bytes[OFF_DEPTH] = depth;
    self.reload_lane(0);
    Ok(self)
  }

  /// Set the tree leaf length in bytes.
  pub fn set_leaf_length(&mut self, leaf_length: u32) -> &mut Self {
    self.bytes[OFF_LEAF_LENGTH..OFF_LEAF_LENGTH + 4].copy_from_slice(&leaf_length.to_le_bytes());
    self.reload_lane(0);
    self
  }

  /// Set the tree node offset.
  pub fn set_node_offset(&mut self, node_offset: u64) -> &mut Self {
    self.bytes[OFF_NODE_OFFSET..OFF_NODE_OFFSET + 8].copy_from_slice(&node_offset.to_le_bytes());
    self.reload_lane(1);
    self
  }

  /// Set the tree node depth.
  pub fn set_node_depth(&mut self, node_depth: u8) -> &mut Self {
    self.bytes[OFF_NODE_DEPTH] = node_depth;
    self.reload_lane(2);
    self
  }

  /// Set the tree inner digest length in bytes.
  pub fn set_inner_length(&mut self, inner_length: u8) -> &mut Self {
    // Byte 17 sits in lane 2, alongside node_depth.
    self.bytes[OFF_INNER_LENGTH] = inner_length;
    self.reload_lane(2);
    self
  }

  /// Set the salt, up to 16 bytes, zero-padded.
  pub fn set_salt(&mut self, salt: &[u8]) -> Result<&mut Self, ConfigError> {
    if salt.len() > SALT_LEN {
      return Err(ConfigError::SaltLength(salt.len()));
    }
    self.bytes[OFF_SALT..OFF_SALT + SALT_LEN].fill(0);
    self.bytes[OFF_SALT..OFF_SALT + salt.len()].copy_from_slice(salt);
    self.reload_lane(4);
    self.reload_lane(5);
    Ok(self)
  }

  /// Set the personalization string, up to 16 bytes, zero-padded.
  pub fn set_personal(&mut self, personal: &[u8]) -> Result<&mut Self, ConfigError> {
    if personal.len() > PERSONAL_LEN {
      return Err(ConfigError::PersonalLength(personal.len()));
    }
    self.bytes[OFF_PERSONAL..OFF_PERSONAL + PERSONAL_LEN].fill(0);
    self.bytes[OFF_PERSONAL..OFF_PERSONAL + personal.len()].copy_from_slice(personal);
    self.reload_lane(6);
    self.reload_lane(7);
    Ok(self)
  }

  /// Configured digest length in bytes.
  #[inline]
  #[must_use]
  pub fn digest_length(&self) -> usize {
    self.bytes[OFF_DIGEST_LENGTH] as usize
  }

  /// Configured key length in bytes (0 when unkeyed).
  #[inline]
  #[must_use]
  pub fn key_length(&self) -> usize {
    self.bytes[OFF_KEY_LENGTH] as usize
  }

  /// Whether the params carry a key.
  #[inline]
  #[must_use]
  pub fn has_key(&self) -> bool {
    self.key_length() > 0
  }

  /// Tree fanout.
  #[inline]
  #[must_use]
  pub fn fanout(&self) -> u8 {
    self.bytes[OFF_FANOUT]
  }

  /// Maximum tree depth.
  #[inline]
  #[must_use]
  pub fn depth(&self) -> u8 {
    self.bytes[OFF_DEPTH]
  }

  /// Tree leaf length in bytes.
  #[inline]
  #[must_use]
  pub fn leaf_length(&self) -> u32 {
    let mut w = [0u8; 4];
    w.copy_from_slice(&self.bytes[OFF_LEAF_LENGTH..OFF_LEAF_LENGTH + 4]);
    u32::from_le_bytes(w)
  }

  /// Tree node offset.
  #[inline]
  #[must_use]
  pub fn node_offset(&self) -> u64 {
    let mut w = [0u8; 8];
    w.copy_from_slice(&self.bytes[OFF_NODE_OFFSET..OFF_NODE_OFFSET + 8]);
    u64::from_le_bytes(w)
  }

  /// Tree node depth.
  #[inline]
  #[must_use]
  pub fn node_depth(&self) -> u8 {
    self.bytes[OFF_NODE_DEPTH]
  }

  /// Tree inner digest length in bytes.
  #[inline]
  #[must_use]
  pub fn inner_length(&self) -> u8 {
    self.bytes[OFF_INNER_LENGTH]
  }

  /// Salt, zero-padded to 16 bytes.
  #[inline]
  #[must_use]
  pub fn salt(&self) -> [u8; SALT_LEN] {
    let mut out = [0u8; SALT_LEN];
    out.copy_from_slice(&self.bytes[OFF_SALT..OFF_SALT + SALT_LEN]);
    out
  }

  /// Personalization, zero-padded to 16 bytes.
  #[inline]
  #[must_use]
  pub fn personal(&self) -> [u8; PERSONAL_LEN] {
    let mut out = [0u8; PERSONAL_LEN];
    out.copy_from_slice(&self.bytes[OFF_PERSONAL..OFF_PERSONAL + PERSONAL_LEN]);
    out
  }

  /// Copy of the 64-byte parameter-block image.
  #[inline]
  #[must_use]
  pub fn to_bytes(&self) -> [u8; PARAM_LEN] {
    self.bytes
  }

  /// Derived initial chain value.
  #[inline]
  pub(crate) fn h0(&self) -> [u64; 8] {
    self.h
  }

  /// Zero-padded 128-byte key block, present iff the key length is nonzero.
  #[inline]
  pub(crate) fn key_block(&self) -> Option<&[u8; BLOCK_LEN]> {
    if self.has_key() { Some(&self.key_block) } else { None }
  }
}
