//! Recursive descent over a configuration tree.
//!
//! The traversal is a pure rebuild: it borrows the input tree and returns a
//! new one. Nothing in the input is ever mutated, so a caller whose pass
//! aborts still holds the original tree intact.
//!
//! What happens at each node is decided by a [`Policy`]. The traverser only
//! knows about structure: sequences keep their order, mappings keep their
//! keys, and a mapping carrying the policy's marker key collapses to a string
//! scalar once the policy hands back plaintext.

use std::fmt;

use crate::core::node::{ConfigNode, Mapping, Scalar};
use crate::error::Result;

/// Location of a node in the tree, rendered as `$.a.list[0]`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodePath(String);

impl NodePath {
    pub fn root() -> Self {
        Self("$".to_string())
    }

    pub fn key(&self, key: &str) -> Self {
        Self(format!("{}.{}", self.0, key))
    }

    pub fn index(&self, index: usize) -> Self {
        Self(format!("{}[{}]", self.0, index))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Per-node decision rules applied during a traversal.
///
/// Returning `Ok(Some(plaintext))` replaces the node, `Ok(None)` leaves it as
/// it was, and `Err` aborts the traversal with no further nodes visited.
pub trait Policy {
    /// Reserved mapping key that marks wrapped ciphertext.
    fn marker(&self) -> &'static str;

    /// Called with the value under the marker key of a marker mapping.
    fn unwrap_marker(&mut self, path: &NodePath, value: &ConfigNode) -> Result<Option<String>>;

    /// Called for every string scalar outside marker mappings.
    fn inline(&mut self, _path: &NodePath, _value: &str) -> Result<Option<String>> {
        Ok(None)
    }
}

/// Rebuild `node` applying `policy` everywhere.
pub fn transform<P: Policy + ?Sized>(node: &ConfigNode, policy: &mut P) -> Result<ConfigNode> {
    visit(node, &NodePath::root(), policy)
}

fn visit<P: Policy + ?Sized>(
    node: &ConfigNode,
    path: &NodePath,
    policy: &mut P,
) -> Result<ConfigNode> {
    match node {
        ConfigNode::Sequence(items) => {
            let mut out = Vec::with_capacity(items.len());
            for (i, item) in items.iter().enumerate() {
                out.push(visit(item, &path.index(i), policy)?);
            }
            Ok(ConfigNode::Sequence(out))
        }
        ConfigNode::Mapping(mapping) => {
            if let Some(value) = mapping.get(policy.marker()) {
                return Ok(match policy.unwrap_marker(path, value)? {
                    Some(plaintext) => ConfigNode::string(plaintext),
                    None => node.clone(),
                });
            }
            let mut out = Mapping::with_capacity(mapping.len());
            for (key, value) in mapping.iter() {
                out.insert(key, visit(value, &path.key(key), policy)?);
            }
            Ok(ConfigNode::Mapping(out))
        }
        ConfigNode::Scalar(Scalar::String(s)) => Ok(match policy.inline(path, s)? {
            Some(plaintext) => ConfigNode::string(plaintext),
            None => node.clone(),
        }),
        ConfigNode::Scalar(_) => Ok(node.clone()),
    }
}
