// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tree-edit operations and their batched application to a [`Document`].

use crate::document::{DocNodeKind, Document};
use crate::ids::DocId;

/// A single tree edit.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Patch {
    /// Remove `node` from the children of `parent`. The node stays in the document, unattached.
    Detach {
        /// Node to detach.
        node: DocId,
        /// Its current parent.
        parent: DocId,
    },
    /// Insert an unattached `node` into the children of `parent` at `index`.
    Attach {
        /// Node to attach.
        node: DocId,
        /// New parent.
        parent: DocId,
        /// Position in the parent's child list at the time of the attach.
        index: usize,
    },
}

impl Patch {
    /// The node this patch moves.
    pub fn node(&self) -> &DocId {
        match self {
            Self::Detach { node, .. } | Self::Attach { node, .. } => node,
        }
    }
}

/// Reasons a patch batch is rejected.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum PatchError {
    /// A patch names a node that does not exist.
    #[error("unknown node {0}")]
    UnknownNode(DocId),
    /// A detach names a parent that does not hold the node.
    #[error("{node} is not a child of {parent}")]
    NotAChild {
        /// Node being detached.
        node: DocId,
        /// Claimed parent.
        parent: DocId,
    },
    /// An attach names a node that still has a parent.
    #[error("{0} is still attached; detach it first")]
    StillAttached(DocId),
    /// An attach targets a node that cannot hold children.
    #[error("{0} cannot hold children")]
    NotAContainer(DocId),
    /// An attach index is past the end of the parent's child list.
    #[error("index {index} out of range for {parent} with {len} children")]
    IndexOutOfRange {
        /// Target parent.
        parent: DocId,
        /// Requested index.
        index: usize,
        /// Current child count.
        len: usize,
    },
    /// An attach would make a node its own ancestor.
    #[error("attaching {node} under {parent} creates a cycle")]
    Cycle {
        /// Node being attached.
        node: DocId,
        /// Target parent.
        parent: DocId,
    },
}

impl Document {
    /// Apply a batch of patches atomically.
    ///
    /// Patches are applied in order to a scratch copy. The document is only
    /// replaced if every patch succeeds, so a failed batch leaves it untouched
    /// and a successful one forms a single undoable step for the caller.
    pub fn apply_patches(&mut self, patches: &[Patch]) -> Result<(), PatchError> {
        let mut scratch = self.clone();
        for patch in patches {
            scratch.apply_one(patch)?;
        }
        *self = scratch;
        Ok(())
    }

    fn apply_one(&mut self, patch: &Patch) -> Result<(), PatchError> {
        match patch {
            Patch::Detach { node, parent } => {
                if !self.nodes.contains_key(node) {
                    return Err(PatchError::UnknownNode(node.clone()));
                }
                let p = self
                    .nodes
                    .get_mut(parent)
                    .ok_or_else(|| PatchError::UnknownNode(parent.clone()))?;
                let Some(pos) = p.children.iter().position(|c| c == node) else {
                    return Err(PatchError::NotAChild {
                        node: node.clone(),
                        parent: parent.clone(),
                    });
                };
                p.children.remove(pos);
                if let Some(n) = self.nodes.get_mut(node) {
                    n.parent = None;
                }
                Ok(())
            }
            Patch::Attach {
                node,
                parent,
                index,
            } => {
                let n = self
                    .nodes
                    .get(node)
                    .ok_or_else(|| PatchError::UnknownNode(node.clone()))?;
                if n.parent.is_some() {
                    return Err(PatchError::StillAttached(node.clone()));
                }
                if self.is_descendant_of(parent, node) {
                    return Err(PatchError::Cycle {
                        node: node.clone(),
                        parent: parent.clone(),
                    });
                }
                let p = self
                    .nodes
                    .get_mut(parent)
                    .ok_or_else(|| PatchError::UnknownNode(parent.clone()))?;
                if p.kind != DocNodeKind::Container {
                    return Err(PatchError::NotAContainer(parent.clone()));
                }
                if *index > p.children.len() {
                    return Err(PatchError::IndexOutOfRange {
                        parent: parent.clone(),
                        index: *index,
                        len: p.children.len(),
                    });
                }
                p.children.insert(*index, node.clone());
                if let Some(n) = self.nodes.get_mut(node) {
                    n.parent = Some(parent.clone());
                }
                Ok(())
            }
        }
    }
}
