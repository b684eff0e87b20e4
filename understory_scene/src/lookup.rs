// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Lookup tables between the document and expanded identifier spaces.

use hashbrown::HashMap;
use smallvec::SmallVec;

use crate::ids::{DocId, ExpandedId};
use crate::rendered::RenderedScene;

/// Expanded ids rendering one document id. Most documents render a node once or twice.
pub type ExpandedIds = SmallVec<[ExpandedId; 2]>;

/// Precomputed maps between identifier spaces for one surface.
///
/// Built once per scene version by [`SceneLookup::build`] and read-only
/// afterwards; drag handling never scans the scene to answer these queries.
#[derive(Clone, Debug, Default)]
pub struct SceneLookup {
    expanded_to_doc: HashMap<ExpandedId, Option<DocId>>,
    doc_to_expanded: HashMap<DocId, ExpandedIds>,
    expanded_parent: HashMap<ExpandedId, Option<ExpandedId>>,
}

impl SceneLookup {
    /// Build the tables for `scene`.
    ///
    /// `doc_to_expanded` lists expanded ids in paint order.
    pub fn build(scene: &RenderedScene) -> Self {
        let mut expanded_to_doc = HashMap::with_capacity(scene.len());
        let mut doc_to_expanded: HashMap<DocId, ExpandedIds> = HashMap::new();
        let mut expanded_parent = HashMap::with_capacity(scene.len());
        for node in scene.paint_order() {
            expanded_to_doc.insert(node.id.clone(), node.patch_target.clone());
            expanded_parent.insert(node.id.clone(), node.parent().cloned());
            if let Some(doc) = &node.patch_target {
                doc_to_expanded
                    .entry(doc.clone())
                    .or_default()
                    .push(node.id.clone());
            }
        }
        Self {
            expanded_to_doc,
            doc_to_expanded,
            expanded_parent,
        }
    }

    /// Patch target of `id`.
    ///
    /// `None` covers both unpatchable nodes and ids missing from the scene;
    /// use [`SceneLookup::contains`] to tell them apart.
    pub fn doc_of(&self, id: &ExpandedId) -> Option<&DocId> {
        self.expanded_to_doc.get(id).and_then(Option::as_ref)
    }

    /// Every expanded id whose patch target is `doc`, in paint order.
    pub fn expanded_of(&self, doc: &DocId) -> &[ExpandedId] {
        self.doc_to_expanded
            .get(doc)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// Rendered parent of `id`.
    pub fn parent_of(&self, id: &ExpandedId) -> Option<&ExpandedId> {
        self.expanded_parent.get(id).and_then(Option::as_ref)
    }

    /// Whether `id` was rendered in the scene the tables were built from.
    pub fn contains(&self, id: &ExpandedId) -> bool {
        self.expanded_to_doc.contains_key(id)
    }

    /// Whether `id` is rendered and has a patch target.
    pub fn is_patchable(&self, id: &ExpandedId) -> bool {
        self.doc_of(id).is_some()
    }

    /// Iterate `id` and its rendered ancestors, innermost first.
    pub fn ancestors<'a>(&'a self, id: &'a ExpandedId) -> Ancestors<'a> {
        Ancestors {
            lookup: self,
            next: Some(id),
        }
    }
}

/// Iterator over an expanded id and its ancestors; see [`SceneLookup::ancestors`].
#[derive(Clone, Debug)]
pub struct Ancestors<'a> {
    lookup: &'a SceneLookup,
    next: Option<&'a ExpandedId>,
}

impl<'a> Iterator for Ancestors<'a> {
    type Item = &'a ExpandedId;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = self.lookup.parent_of(current);
        Some(current)
    }
}
