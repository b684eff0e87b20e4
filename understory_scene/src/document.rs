// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The document store: a tree of nodes keyed by [`DocId`].

use alloc::vec::Vec;

use hashbrown::HashMap;
use kurbo::Insets;

use crate::ids::DocId;

/// Main axis of an auto-layout container.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Axis {
    /// Children flow left to right ("row").
    Horizontal,
    /// Children flow top to bottom ("column").
    Vertical,
}

impl Axis {
    /// The perpendicular axis.
    pub const fn cross(self) -> Self {
        match self {
            Self::Horizontal => Self::Vertical,
            Self::Vertical => Self::Horizontal,
        }
    }
}

/// Cross-axis alignment of an auto-layout container's children.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Alignment {
    /// Align to the start of the cross axis.
    #[default]
    Start,
    /// Center on the cross axis.
    Center,
    /// Align to the end of the cross axis.
    End,
    /// Fill the cross axis.
    Stretch,
}

/// Auto-layout descriptor.
///
/// A container carrying one orders its children along [`AutoLayout::axis`]
/// and is therefore an eligible target for ordered insertion. The engine only
/// reads this metadata; layout itself is computed elsewhere.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AutoLayout {
    /// Main axis.
    pub axis: Axis,
    /// Spacing between consecutive children along the main axis.
    pub gap: f64,
    /// Inset of the content box from the container bounds.
    pub padding: Insets,
    /// Cross-axis alignment.
    pub align: Alignment,
}

impl AutoLayout {
    /// A row (horizontal) layout with the given gap and no padding.
    pub fn row(gap: f64) -> Self {
        Self {
            axis: Axis::Horizontal,
            gap,
            padding: Insets::ZERO,
            align: Alignment::Start,
        }
    }

    /// A column (vertical) layout with the given gap and no padding.
    pub fn column(gap: f64) -> Self {
        Self {
            axis: Axis::Vertical,
            gap,
            padding: Insets::ZERO,
            align: Alignment::Start,
        }
    }

    /// Replace the padding.
    pub fn with_padding(mut self, padding: Insets) -> Self {
        self.padding = padding;
        self
    }

    /// Replace the alignment.
    pub fn with_align(mut self, align: Alignment) -> Self {
        self.align = align;
        self
    }
}

/// What a document node is.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DocNodeKind {
    /// A node that may hold children.
    Container,
    /// A terminal node (text, image, ...).
    Leaf,
    /// An instance of a component; renders the subtree rooted at `component`.
    Instance {
        /// Root of the component definition.
        component: DocId,
    },
}

/// One node of the document tree.
#[derive(Clone, Debug)]
pub struct DocNode {
    /// Kind of node.
    pub kind: DocNodeKind,
    /// Ordered children.
    pub children: Vec<DocId>,
    /// Auto-layout descriptor, if any.
    pub auto_layout: Option<AutoLayout>,
    pub(crate) parent: Option<DocId>,
}

impl DocNode {
    /// The parent recorded for this node, `None` for roots.
    pub fn parent(&self) -> Option<&DocId> {
        self.parent.as_ref()
    }
}

/// A document tree.
///
/// Nodes are keyed by [`DocId`]. A parent map is maintained alongside the
/// child lists so ancestor queries never scan the tree.
#[derive(Clone, Debug, Default)]
pub struct Document {
    pub(crate) nodes: HashMap<DocId, DocNode>,
}

impl Document {
    /// Create an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start building a document.
    pub fn builder() -> DocumentBuilder {
        DocumentBuilder::default()
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the document has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Whether `id` names a node in this document.
    pub fn contains(&self, id: &DocId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Look up a node.
    pub fn node(&self, id: &DocId) -> Option<&DocNode> {
        self.nodes.get(id)
    }

    /// Children of `id`, or an empty slice for unknown ids.
    pub fn children_of(&self, id: &DocId) -> &[DocId] {
        self.nodes.get(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    /// Parent of `id`, `None` for roots and unknown ids.
    pub fn parent_of(&self, id: &DocId) -> Option<&DocId> {
        self.nodes.get(id).and_then(|n| n.parent.as_ref())
    }

    /// Auto-layout descriptor of `id`, if it has one.
    pub fn auto_layout(&self, id: &DocId) -> Option<&AutoLayout> {
        self.nodes.get(id).and_then(|n| n.auto_layout.as_ref())
    }

    /// Whether `id` is a container that orders its children.
    ///
    /// Instances and leaves are never eligible, whatever layout they carry.
    pub fn is_auto_layout_container(&self, id: &DocId) -> bool {
        self.nodes
            .get(id)
            .is_some_and(|n| n.kind == DocNodeKind::Container && n.auto_layout.is_some())
    }

    /// Whether `id` is `ancestor` or lies in its subtree.
    pub fn is_descendant_of(&self, id: &DocId, ancestor: &DocId) -> bool {
        let mut current = Some(id);
        while let Some(c) = current {
            if c == ancestor {
                return true;
            }
            current = self.parent_of(c);
        }
        false
    }

    /// Iterate all root nodes (nodes without a parent) in unspecified order.
    pub fn roots(&self) -> impl Iterator<Item = &DocId> + '_ {
        self.nodes
            .iter()
            .filter(|(_, n)| n.parent.is_none())
            .map(|(id, _)| id)
    }
}

/// Incremental constructor for a [`Document`].
///
/// Parents must be inserted before their children; children are appended in
/// insertion order.
#[derive(Debug, Default)]
pub struct DocumentBuilder {
    doc: Document,
}

impl DocumentBuilder {
    /// Add a container, optionally with an auto-layout descriptor.
    pub fn container(
        mut self,
        id: &str,
        parent: Option<&str>,
        auto_layout: Option<AutoLayout>,
    ) -> Self {
        self.push(id, parent, DocNodeKind::Container, auto_layout);
        self
    }

    /// Add a leaf.
    pub fn leaf(mut self, id: &str, parent: Option<&str>) -> Self {
        self.push(id, parent, DocNodeKind::Leaf, None);
        self
    }

    /// Add an instance of the component rooted at `component`.
    pub fn instance(mut self, id: &str, parent: Option<&str>, component: &str) -> Self {
        self.push(
            id,
            parent,
            DocNodeKind::Instance {
                component: DocId::new(component),
            },
            None,
        );
        self
    }

    /// Finish building.
    pub fn build(self) -> Document {
        self.doc
    }

    #[track_caller]
    fn push(&mut self, id: &str, parent: Option<&str>, kind: DocNodeKind, al: Option<AutoLayout>) {
        let id = DocId::new(id);
        let parent = parent.map(DocId::new);
        assert!(
            !self.doc.nodes.contains_key(&id),
            "duplicate document id {id}"
        );
        if let Some(p) = &parent {
            let Some(pn) = self.doc.nodes.get_mut(p) else {
                panic!("parent {p} of {id} must be inserted first");
            };
            pn.children.push(id.clone());
        }
        self.doc.nodes.insert(
            id,
            DocNode {
                kind,
                children: Vec::new(),
                auto_layout: al,
                parent,
            },
        );
    }
}
