// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ancestor climber: from a hit to the nearest container that orders its children.

use understory_scene::{Document, SurfaceScene};

use crate::hit::HitTarget;

/// Climb from `hit` to the nearest auto-layout container.
///
/// The hit itself is checked first. Otherwise the expanded parent chain is
/// followed; unpatchable ancestors are passed over without resolving a
/// document id, patchable ones are re-checked for eligibility. Returns `None`
/// when the chain runs out.
pub fn climb_to_target(
    hit: &HitTarget,
    surface: &SurfaceScene,
    document: &Document,
) -> Option<HitTarget> {
    if document.is_auto_layout_container(&hit.doc) {
        return Some(hit.clone());
    }
    let lookup = surface.lookup();
    lookup
        .ancestors(&hit.expanded)
        .skip(1)
        .find_map(|expanded| {
            let doc = lookup.doc_of(expanded)?;
            document.is_auto_layout_container(doc).then(|| HitTarget {
                expanded: expanded.clone(),
                doc: doc.clone(),
            })
        })
}
