// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Structural validation of a candidate drop target.

use understory_scene::{DocId, Document, ExpandedId, SurfaceScene};

use crate::hit::HitTarget;
use crate::preview::InvalidReason;

/// The single origin parent shared by every dragged node.
///
/// Returns `Err` when the dragged nodes come from different parents, and
/// `Ok(None)` for an empty selection.
pub fn shared_origin(origin_parents: &[DocId]) -> Result<Option<&DocId>, InvalidReason> {
    let Some((first, rest)) = origin_parents.split_first() else {
        return Ok(None);
    };
    if rest.iter().any(|p| p != first) {
        return Err(InvalidReason::MixedOriginMultiselect);
    }
    Ok(Some(first))
}

/// Check that `target` may receive the dragged nodes.
///
/// In order:
/// 1. the dragged nodes share one origin parent,
/// 2. the target is patchable,
/// 3. the target is neither a dragged node nor inside one, checked along the
///    rendered parent chain and along the document tree.
///
/// The target's surface is the locked surface by construction; the resolver
/// only ever searches there.
pub fn validate_target(
    target: &HitTarget,
    surface: &SurfaceScene,
    document: &Document,
    dragged_doc_ids: &[DocId],
    dragged_expanded_ids: &[ExpandedId],
    origin_parents: &[DocId],
) -> Result<(), InvalidReason> {
    shared_origin(origin_parents)?;

    let lookup = surface.lookup();
    if lookup.doc_of(&target.expanded) != Some(&target.doc) || !document.contains(&target.doc) {
        return Err(InvalidReason::UnpatchableTarget);
    }

    for ancestor in lookup.ancestors(&target.expanded) {
        if dragged_expanded_ids.contains(ancestor) {
            return Err(InvalidReason::CircularTarget);
        }
        if lookup
            .doc_of(ancestor)
            .is_some_and(|d| dragged_doc_ids.contains(d))
        {
            return Err(InvalidReason::CircularTarget);
        }
    }
    if dragged_doc_ids
        .iter()
        .any(|d| document.is_descendant_of(&target.doc, d))
    {
        return Err(InvalidReason::CircularTarget);
    }
    Ok(())
}
