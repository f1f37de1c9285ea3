//! Error types.
//!
//! Misconfiguration surfaces as [`ConfigError`] at the point of
//! configuration, never later from inside hashing. Runtime misuse of an
//! otherwise valid engine surfaces as [`InputError`].

use core::fmt;

/// Invalid parameter-block configuration.
///
/// Raised eagerly by [`Params`](crate::Params) setters, by the keyed
/// [`Engine`](crate::Engine) constructor, and by
/// [`Engine::resume`](crate::Engine::resume) when the supplied params are
/// incompatible with a snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigError {
  /// Digest length outside `1..=64`.
  DigestLength(usize),
  /// Key longer than 64 bytes.
  KeyLength(usize),
  /// Salt longer than 16 bytes.
  SaltLength(usize),
  /// Personalization longer than 16 bytes.
  PersonalLength(usize),
  /// Fanout of zero.
  Fanout,
  /// Depth of zero.
  Depth,
  /// Keyed construction from params that carry no key.
  MissingKey,
  /// Params do not match the snapshot they are asked to resume.
  SnapshotMismatch,
}

impl fmt::Display for ConfigError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match *self {
      Self::DigestLength(n) => write!(f, "digest length {n} outside 1..=64"),
      Self::KeyLength(n) => write!(f, "key length {n} exceeds 64 bytes"),
      Self::SaltLength(n) => write!(f, "salt length {n} exceeds 16 bytes"),
      Self::PersonalLength(n) => write!(f, "personalization length {n} exceeds 16 bytes"),
      Self::Fanout => f.write_str("fanout must be at least 1"),
      Self::Depth => f.write_str("depth must be at least 1"),
      Self::MissingKey => f.write_str("keyed engine requires params with a non-empty key"),
      Self::SnapshotMismatch => f.write_str("params are incompatible with the snapshot"),
    }
  }
}

impl core::error::Error for ConfigError {}

/// Invalid argument to an engine operation.
///
/// The engine state is unchanged after a rejected call and remains usable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum InputError {
  /// Requested more output bytes than the configured digest length.
  OutputLength {
    /// Bytes requested.
    requested: usize,
    /// Configured digest length.
    limit: usize,
  },
}

impl fmt::Display for InputError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match *self {
      Self::OutputLength { requested, limit } => {
        write!(f, "output length {requested} exceeds configured digest length {limit}")
      }
    }
  }
}

impl core::error::Error for InputError {}
