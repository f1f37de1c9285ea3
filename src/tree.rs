//! Tree-mode node hashing.
//!
//! A [`Tree`] fixes the tree shape once; each node it derives is an
//! independent [`Engine`] over that node's own bytes, parameterized with the
//! node's offset, depth, and last-node flag. Combining child digests into a
//! parent's input is the caller's responsibility — this module only
//! guarantees correct per-node parameterization, not reduction.

use crate::{ConfigError, Engine, Params};

/// Shared configuration for the nodes of one hash tree.
///
/// ```
/// use blake2b::Tree;
///
/// let tree = Tree::new(2, 2, 4096, 64)?;
/// let h00 = tree.node(0, 0).finalize();
/// let h10 = tree.last_node(1, 0).finalize();
/// assert_ne!(h00, h10);
/// # Ok::<(), blake2b::ConfigError>(())
/// ```
#[derive(Clone, Debug)]
pub struct Tree {
  params: Params,
}

impl Tree {
  /// Fix fanout, depth, leaf length, and inner length for a tree.
  pub fn new(fanout: u8, depth: u8, leaf_length: u32, inner_length: u8) -> Result<Self, ConfigError> {
    let mut params = Params::new();
    params.set_fanout(fanout)?.set_depth(depth)?;
    params.set_leaf_length(leaf_length).set_inner_length(inner_length);
    Ok(Self { params })
  }

  fn node_params(&self, offset: u64, node_depth: u8) -> Params {
    let mut params = self.params.clone();
    params.set_node_offset(offset).set_node_depth(node_depth);
    params
  }

  /// Engine for an interior or leaf node at the given offset and depth.
  #[must_use]
  pub fn node(&self, offset: u64, node_depth: u8) -> Engine {
    Engine::with_last_node(&self.node_params(offset, node_depth), false)
  }

  /// Engine for the rightmost node of its depth; its terminal compression
  /// carries the last-node finalization flag.
  #[must_use]
  pub fn last_node(&self, offset: u64, node_depth: u8) -> Engine {
    Engine::with_last_node(&self.node_params(offset, node_depth), true)
  }
}
