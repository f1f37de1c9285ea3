//! Pause/continue: explicit snapshots of engine state.
//!
//! A [`Snapshot`] is a plain value struct of the engine's mutable state —
//! no host serialization machinery. How it is persisted on the wire is the
//! caller's choice; the contract here is only that resuming it under the
//! same params reproduces the uninterrupted digest bit-exactly.

use crate::{BLOCK_LEN, ConfigError, Engine, Params};

/// Captured engine state, sufficient to reconstruct an identical
/// continuation under a compatible [`Params`] block.
///
/// The key material itself is not captured; it re-enters through the params
/// handed to [`Engine::resume`], which checks the recorded key length
/// against them.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Snapshot {
  /// Running chain value.
  pub h: [u64; 8],
  /// Byte counter, low word first.
  pub t: [u64; 2],
  /// Finalization flags (all-zero for an open stream).
  pub f: [u64; 2],
  /// Unconsumed tail input.
  pub buf: [u8; BLOCK_LEN],
  /// Number of live bytes in `buf`.
  pub buf_len: usize,
  /// Whether this engine finalizes as the rightmost tree node.
  pub last_node: bool,
  /// Configured digest length.
  pub digest_length: u8,
  /// Configured key length (0 when unkeyed).
  pub key_length: u8,
}

impl Engine {
  /// Capture the engine's mutable state by value.
  ///
  /// Later mutation of this engine never affects a taken snapshot.
  #[must_use]
  pub fn snapshot(&self) -> Snapshot {
    Snapshot {
      h: self.h,
      t: [self.t as u64, (self.t >> 64) as u64],
      f: self.f,
      buf: self.buf,
      buf_len: self.buf_len,
      last_node: self.last_node,
      digest_length: self.out_len,
      key_length: self.key_len,
    }
  }

  /// Materialize an engine from a snapshot and the params it was built with.
  ///
  /// Fails with [`ConfigError::SnapshotMismatch`] when the params disagree
  /// with the snapshot on digest length or key configuration, or when the
  /// snapshot's buffer length is out of range.
  pub fn resume(snapshot: &Snapshot, params: &Params) -> Result<Self, ConfigError> {
    if params.digest_length() != snapshot.digest_length as usize
      || params.key_length() != snapshot.key_length as usize
      || snapshot.buf_len > BLOCK_LEN
    {
      return Err(ConfigError::SnapshotMismatch);
    }

    Ok(Self {
      h: snapshot.h,
      t: (snapshot.t[0] as u128) | ((snapshot.t[1] as u128) << 64),
      f: snapshot.f,
      buf: snapshot.buf,
      buf_len: snapshot.buf_len,
      last_node: snapshot.last_node,
      out_len: snapshot.digest_length,
      h0: params.h0(),
      key_block: params.key_block().copied().unwrap_or([0u8; BLOCK_LEN]),
      key_len: params.key_length() as u8,
    })
  }
}
