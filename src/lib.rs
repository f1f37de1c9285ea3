//! Parameterized BLAKE2b (RFC 7693 plus the keyed, salted, and tree-mode
//! extensions of the BLAKE2 specification).
//!
//! Portable, `no_std`, pure Rust. Zero library dependencies; dev-only
//! dependencies are used for oracle testing and benchmarking.
//!
//! Unlike a fixed BLAKE2b-512, every digest here is driven by a [`Params`]
//! block: digest length (1..=64), an optional key (MAC mode), salt,
//! personalization, and the tree-hashing fields (fanout, depth, leaf length,
//! node offset, node depth, inner length). An [`Engine`] derives its initial
//! chain value from the params at construction and is a plain sequential
//! state machine: any number of [`Engine::update`] calls, then a finalize,
//! after which the engine is back in its freshly constructed state.
//!
//! In-flight state can be captured as a [`Snapshot`] and resumed later
//! (possibly in another process); the continuation is bit-identical to the
//! uninterrupted computation.
//!
//! ```
//! use blake2b::{Engine, Params};
//!
//! let mut params = Params::new();
//! params.set_digest_length(32)?.set_personal(b"demo app")?;
//!
//! let mut engine = Engine::new(&params);
//! engine.update(b"hello ");
//! engine.update(b"world");
//! let digest = engine.finalize();
//! assert_eq!(digest.len(), 32);
//! # Ok::<(), blake2b::ConfigError>(())
//! ```
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::indexing_slicing))]
#![no_std]

mod engine;
mod error;
mod kernel;
mod params;
mod state;
mod tree;

pub use engine::{Engine, Output};
pub use error::{ConfigError, InputError};
pub use params::Params;
pub use state::Snapshot;
pub use tree::Tree;

/// Compression block size in bytes.
pub const BLOCK_LEN: usize = 128;

/// Parameter block size in bytes.
pub const PARAM_LEN: usize = 64;

/// Maximum digest size in bytes.
pub const OUT_LEN_MAX: usize = 64;

/// Maximum key size in bytes.
pub const KEY_LEN_MAX: usize = 64;

/// Salt size in bytes (shorter salts are zero-padded).
pub const SALT_LEN: usize = 16;

/// Personalization size in bytes (shorter strings are zero-padded).
pub const PERSONAL_LEN: usize = 16;
