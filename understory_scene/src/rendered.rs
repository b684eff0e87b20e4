// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The rendered scene of one surface, as produced by the rendering layer.

use alloc::vec::Vec;

use hashbrown::HashMap;
use kurbo::Rect;

use crate::ids::{DocId, ExpandedId, SurfaceId};

bitflags::bitflags! {
    /// Flags controlling how a rendered node participates in queries.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct RenderFlags: u8 {
        /// Node is visible. Invisible children are left out of insertion lists.
        const VISIBLE  = 0b0000_0001;
        /// Node is pickable (participates in hit testing).
        const PICKABLE = 0b0000_0010;
    }
}

impl Default for RenderFlags {
    fn default() -> Self {
        Self::VISIBLE | Self::PICKABLE
    }
}

/// Structural kind of a rendered node.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum RenderKind {
    /// Can hold children; a hit-test candidate.
    Container,
    /// Terminal content; never a hit-test candidate.
    Leaf,
}

/// One node of a rendered scene.
#[derive(Clone, Debug)]
pub struct RenderedNode {
    /// Rendered identity.
    pub id: ExpandedId,
    /// Structural kind.
    pub kind: RenderKind,
    /// Axis-aligned bounds in surface world space.
    pub bounds: Rect,
    /// Document id that edits aimed at this node apply to; `None` if unpatchable.
    pub patch_target: Option<DocId>,
    /// Query flags.
    pub flags: RenderFlags,
    pub(crate) parent: Option<ExpandedId>,
    pub(crate) children: Vec<ExpandedId>,
}

impl RenderedNode {
    /// Rendered parent, `None` for the surface root.
    pub fn parent(&self) -> Option<&ExpandedId> {
        self.parent.as_ref()
    }

    /// Rendered children in authoritative order.
    pub fn children(&self) -> &[ExpandedId] {
        &self.children
    }
}

/// Reasons a rendered scene fails to build.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SceneError {
    /// Two nodes share an expanded id.
    #[error("duplicate expanded id {0}")]
    DuplicateId(ExpandedId),
    /// A node names a parent that has not been added.
    #[error("parent {parent} of {child} is not in the scene")]
    UnknownParent {
        /// Missing parent.
        parent: ExpandedId,
        /// Child that referenced it.
        child: ExpandedId,
    },
    /// A node names a leaf as its parent.
    #[error("{0} is a leaf and cannot have children")]
    LeafParent(ExpandedId),
}

/// Rendered nodes of one surface in total paint order (back to front).
///
/// The scene is an arena: nodes live in a vector in paint order and an index
/// maps expanded ids to slots.
#[derive(Clone, Debug)]
pub struct RenderedScene {
    surface: SurfaceId,
    generation: u64,
    nodes: Vec<RenderedNode>,
    slots: HashMap<ExpandedId, usize>,
}

impl RenderedScene {
    /// Start building a scene for `surface`.
    pub fn builder(surface: SurfaceId) -> RenderedSceneBuilder {
        RenderedSceneBuilder {
            scene: Self {
                surface,
                generation: 0,
                nodes: Vec::new(),
                slots: HashMap::new(),
            },
        }
    }

    /// Surface this scene belongs to.
    pub fn surface(&self) -> SurfaceId {
        self.surface
    }

    /// Version stamp assigned by the producer.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Number of rendered nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the scene is empty.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Whether `id` is rendered in this scene.
    pub fn contains(&self, id: &ExpandedId) -> bool {
        self.slots.contains_key(id)
    }

    /// Look up a rendered node.
    pub fn get(&self, id: &ExpandedId) -> Option<&RenderedNode> {
        self.slots.get(id).map(|&i| &self.nodes[i])
    }

    /// World-space bounds of `id`.
    pub fn bounds(&self, id: &ExpandedId) -> Option<Rect> {
        self.get(id).map(|n| n.bounds)
    }

    /// Rendered children of `id`, or an empty slice.
    pub fn children_of(&self, id: &ExpandedId) -> &[ExpandedId] {
        self.get(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    /// Position of `id` in paint order (higher is painted later, i.e. on top).
    pub fn paint_index(&self, id: &ExpandedId) -> Option<usize> {
        self.slots.get(id).copied()
    }

    /// Nodes back to front.
    pub fn paint_order(&self) -> impl DoubleEndedIterator<Item = &RenderedNode> + '_ {
        self.nodes.iter()
    }

    /// Nodes front to back, the order used for hit testing.
    pub fn front_to_back(&self) -> impl Iterator<Item = &RenderedNode> + '_ {
        self.nodes.iter().rev()
    }

    /// Whether `id` is `ancestor` or lies in its rendered subtree.
    pub fn is_within(&self, id: &ExpandedId, ancestor: &ExpandedId) -> bool {
        let mut current = Some(id);
        while let Some(c) = current {
            if c == ancestor {
                return true;
            }
            current = self.get(c).and_then(|n| n.parent.as_ref());
        }
        false
    }
}

/// Incremental constructor for a [`RenderedScene`].
///
/// Nodes are appended in paint order; a parent must be added before its
/// children, and children are recorded in the order they are added.
#[derive(Debug)]
pub struct RenderedSceneBuilder {
    scene: RenderedScene,
}

impl RenderedSceneBuilder {
    /// Set the producer's version stamp.
    pub fn generation(mut self, generation: u64) -> Self {
        self.scene.generation = generation;
        self
    }

    /// Append a node with default flags.
    pub fn push(
        &mut self,
        id: ExpandedId,
        parent: Option<&ExpandedId>,
        kind: RenderKind,
        bounds: Rect,
        patch_target: Option<DocId>,
    ) -> Result<&mut Self, SceneError> {
        self.push_with_flags(id, parent, kind, bounds, patch_target, RenderFlags::default())
    }

    /// Append a node with explicit flags.
    pub fn push_with_flags(
        &mut self,
        id: ExpandedId,
        parent: Option<&ExpandedId>,
        kind: RenderKind,
        bounds: Rect,
        patch_target: Option<DocId>,
        flags: RenderFlags,
    ) -> Result<&mut Self, SceneError> {
        if self.scene.slots.contains_key(&id) {
            return Err(SceneError::DuplicateId(id));
        }
        if let Some(p) = parent {
            let Some(&slot) = self.scene.slots.get(p) else {
                return Err(SceneError::UnknownParent {
                    parent: p.clone(),
                    child: id,
                });
            };
            let pn = &mut self.scene.nodes[slot];
            if pn.kind == RenderKind::Leaf {
                return Err(SceneError::LeafParent(p.clone()));
            }
            pn.children.push(id.clone());
        }
        self.scene.slots.insert(id.clone(), self.scene.nodes.len());
        self.scene.nodes.push(RenderedNode {
            id,
            kind,
            bounds,
            patch_target,
            flags,
            parent: parent.cloned(),
            children: Vec::new(),
        });
        Ok(self)
    }

    /// Finish building.
    pub fn build(self) -> RenderedScene {
        self.scene
    }
}
