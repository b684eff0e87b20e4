// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hit-test resolver: the deepest eligible container under the cursor.
//!
//! Resolution is expanded-identity first. The resolver walks rendered nodes
//! front to back and returns an expanded id together with its patch target.
//! It never starts from a document id: one document id can be rendered by
//! several instances, and picking among them after the fact is ambiguous.

use hashbrown::HashSet;
use kurbo::Point;
use understory_scene::{DocId, ExpandedId, RenderFlags, RenderKind, SurfaceScene};

/// A resolved container: its rendered identity and the document id edits go to.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct HitTarget {
    /// Rendered identity.
    pub expanded: ExpandedId,
    /// Patch target of [`HitTarget::expanded`].
    pub doc: DocId,
}

/// Expanded ids the resolver must skip.
pub type ExcludeSet = HashSet<ExpandedId>;

/// Build the exclusion set for a drag.
///
/// With `subtrees`, every rendered descendant of a dragged node is excluded
/// as well, so a node can never be dropped into itself from the inside.
pub fn exclusion_set(
    surface: &SurfaceScene,
    dragged: &[ExpandedId],
    subtrees: bool,
) -> ExcludeSet {
    let mut out = ExcludeSet::with_capacity(dragged.len());
    if !subtrees {
        out.extend(dragged.iter().cloned());
        return out;
    }
    let scene = surface.scene();
    let mut stack: alloc::vec::Vec<&ExpandedId> = dragged.iter().collect();
    while let Some(id) = stack.pop() {
        if out.insert(id.clone()) {
            stack.extend(scene.children_of(id));
        }
    }
    out
}

/// Return the topmost pickable, patchable container containing `cursor`.
///
/// - Nodes are visited in reverse paint order (front to back).
/// - Leaves, excluded ids, unpickable nodes, and unpatchable nodes are skipped.
/// - The first node whose bounds contain `cursor` wins. Paint order is total,
///   so there are no ties.
///
/// For a fixed scene and cursor the result is always the same.
pub fn resolve_hit(surface: &SurfaceScene, cursor: Point, exclude: &ExcludeSet) -> Option<HitTarget> {
    let lookup = surface.lookup();
    surface
        .scene()
        .front_to_back()
        .filter(|n| n.kind == RenderKind::Container)
        .filter(|n| n.flags.contains(RenderFlags::PICKABLE))
        .filter(|n| !exclude.contains(&n.id))
        .find_map(|n| {
            let doc = lookup.doc_of(&n.id)?;
            n.bounds.contains(cursor).then(|| HitTarget {
                expanded: n.id.clone(),
                doc: doc.clone(),
            })
        })
}
