// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Patch generation: a committed preview as an ordered batch of tree edits.
//!
//! Moves are never expressed as one "move" per node. With more than one
//! dragged node, each sequential move shifts the index the next one should
//! land at. Instead every dragged node is detached first, then attached in
//! dragged-set order at consecutive indices. The insertion index already
//! counts positions in the list with the dragged nodes removed, so the two
//! phases need no index arithmetic between them.

use alloc::vec::Vec;

use understory_scene::{DocId, Patch};

use crate::preview::DropPreview;

/// Two-phase patch batch for moving `dragged` into `target_parent` at `insertion_index`.
///
/// `filtered_child_doc_ids` is the target's child list with the dragged
/// nodes removed, the list `insertion_index` points into.
pub fn generate_patches(
    dragged: &[DocId],
    origin_parent: &DocId,
    target_parent: &DocId,
    insertion_index: usize,
    filtered_child_doc_ids: &[DocId],
) -> Vec<Patch> {
    debug_assert!(
        insertion_index <= filtered_child_doc_ids.len(),
        "insertion index {insertion_index} past {} filtered children",
        filtered_child_doc_ids.len()
    );
    debug_assert!(
        dragged.iter().all(|d| !filtered_child_doc_ids.contains(d)),
        "filtered children must not contain dragged nodes"
    );

    let detach = dragged.iter().map(|node| Patch::Detach {
        node: node.clone(),
        parent: origin_parent.clone(),
    });
    let attach = dragged.iter().enumerate().map(|(i, node)| Patch::Attach {
        node: node.clone(),
        parent: target_parent.clone(),
        index: insertion_index + i,
    });
    detach.chain(attach).collect()
}

/// The patch batch a drop of `preview` would apply.
///
/// Returns `None` for invalid previews; releasing the pointer over them does nothing.
pub fn patches_for_preview(preview: &DropPreview) -> Option<Vec<Patch>> {
    if !preview.is_valid() {
        return None;
    }
    Some(generate_patches(
        preview.dragged_doc_ids(),
        preview.origin_parent_doc_id()?,
        preview.target_parent_doc_id()?,
        preview.insertion_index()?,
        preview.target_children_doc_ids(),
    ))
}
