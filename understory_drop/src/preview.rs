// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The drop preview: one immutable snapshot of drag intent per pointer move.
//!
//! ## Pipeline
//!
//! [`build_drop_preview`] runs these steps in order, from scratch, every time:
//!
//! 1. resolve the hit ([`resolve_hit`]),
//! 2. climb to an auto-layout target ([`climb_to_target`]),
//! 3. validate it ([`validate_target`]),
//! 4. filter the target's rendered children ([`filter_children`]),
//! 5. compute the insertion index with hysteresis ([`resolve_index`]),
//! 6. build the indicator, invalidating the preview when there is none,
//! 7. compute sibling reflow,
//! 8. decide the intent.
//!
//! The cost is proportional to the target's child count, not the tree size,
//! so nothing is carried over from the previous preview except the
//! [`Hysteresis`] memory.

use alloc::vec::Vec;
use core::fmt;

use kurbo::{Point, Rect, Vec2};
use understory_scene::{
    Axis, DocId, Document, ExpandedId, SceneCache, SurfaceId, SurfaceScene,
};

use crate::climb::climb_to_target;
use crate::config::DropConfig;
use crate::hit::{HitTarget, exclusion_set, resolve_hit};
use crate::indicator::{
    ReflowOffsets, bundle_extent, content_box, indicator_rect, reflow_offsets, slot_position,
};
use crate::insertion::{
    FilteredChildren, Hysteresis, decision_boundaries, filter_children, main_coord, resolve_index,
};
use crate::validate::{shared_origin, validate_target};

/// What a drop would do.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Intent {
    /// Nothing; the preview is invalid or no pointer move has been seen.
    #[default]
    None,
    /// Move within the origin parent.
    Reorder,
    /// Move into a different parent.
    Reparent,
}

/// Why a preview is invalid.
///
/// These are expected outcomes of pointer movement, not errors. The string
/// forms returned by [`InvalidReason::as_str`] are stable.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InvalidReason {
    /// No auto-layout container under the cursor or above it.
    #[cfg_attr(feature = "serde", serde(rename = "no_autolayout_target"))]
    NoAutolayoutTarget,
    /// The dragged nodes come from different parents.
    #[cfg_attr(feature = "serde", serde(rename = "mixed-origin-multiselect"))]
    MixedOriginMultiselect,
    /// The target is a dragged node or inside one.
    #[cfg_attr(feature = "serde", serde(rename = "circular-target"))]
    CircularTarget,
    /// The target has no document identity to patch.
    #[cfg_attr(feature = "serde", serde(rename = "unpatchable-target"))]
    UnpatchableTarget,
    /// The target's content box is collapsed, so no indicator can be drawn.
    #[cfg_attr(feature = "serde", serde(rename = "indicator-unavailable"))]
    IndicatorUnavailable,
    /// The scene changed since the drag started.
    #[cfg_attr(feature = "serde", serde(rename = "scene-changed"))]
    SceneChanged,
    /// The locked surface has no rendered scene.
    #[cfg_attr(feature = "serde", serde(rename = "unknown-surface"))]
    UnknownSurface,
}

impl InvalidReason {
    /// Machine-readable form.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NoAutolayoutTarget => "no_autolayout_target",
            Self::MixedOriginMultiselect => "mixed-origin-multiselect",
            Self::CircularTarget => "circular-target",
            Self::UnpatchableTarget => "unpatchable-target",
            Self::IndicatorUnavailable => "indicator-unavailable",
            Self::SceneChanged => "scene-changed",
            Self::UnknownSurface => "unknown-surface",
        }
    }
}

impl fmt::Display for InvalidReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Authoritative snapshot of drop intent.
///
/// Produced fresh by [`build_drop_preview`] and never mutated afterwards.
/// Consumers read it; they never recompute any part of it.
///
/// A valid preview always has a target parent in both identifier spaces, an
/// insertion index, and an indicator. An invalid one has no indicator and no
/// reflow.
#[derive(Clone, Debug, PartialEq)]
pub struct DropPreview {
    intent: Intent,
    invalid_reason: Option<InvalidReason>,
    surface: SurfaceId,
    dragged_doc_ids: Vec<DocId>,
    dragged_expanded_ids: Vec<ExpandedId>,
    origin_parent_doc_id: Option<DocId>,
    target: Option<HitTarget>,
    children: FilteredChildren,
    insertion_index: Option<usize>,
    indicator_rect: Option<Rect>,
    indicator_axis: Option<Axis>,
    reflow_offsets: ReflowOffsets,
}

impl DropPreview {
    /// The preview before any pointer move: no intent, not valid, no reason.
    pub fn idle(
        surface: SurfaceId,
        dragged_doc_ids: Vec<DocId>,
        dragged_expanded_ids: Vec<ExpandedId>,
    ) -> Self {
        Self {
            intent: Intent::None,
            invalid_reason: None,
            surface,
            dragged_doc_ids,
            dragged_expanded_ids,
            origin_parent_doc_id: None,
            target: None,
            children: FilteredChildren::default(),
            insertion_index: None,
            indicator_rect: None,
            indicator_axis: None,
            reflow_offsets: ReflowOffsets::new(),
        }
    }

    fn invalid(query: &DropQuery<'_>, reason: InvalidReason, target: Option<HitTarget>) -> Self {
        #[cfg(feature = "tracing")]
        tracing::trace!(
            reason = reason.as_str(),
            target = target.as_ref().map(|t| t.expanded.as_str()),
            "drop preview invalid"
        );
        let mut p = Self::idle(
            query.surface,
            query.dragged_doc_ids.to_vec(),
            query.dragged_expanded_ids.to_vec(),
        );
        p.invalid_reason = Some(reason);
        p.origin_parent_doc_id = shared_origin(query.origin_parents).ok().flatten().cloned();
        p.target = target;
        p
    }

    /// What a drop would do.
    pub fn intent(&self) -> Intent {
        self.intent
    }

    /// Whether a drop would be accepted.
    pub fn is_valid(&self) -> bool {
        self.intent != Intent::None
    }

    /// Why the preview is invalid; `None` for valid and idle previews.
    pub fn invalid_reason(&self) -> Option<InvalidReason> {
        self.invalid_reason
    }

    /// Surface the drag is locked to.
    pub fn surface(&self) -> SurfaceId {
        self.surface
    }

    /// Dragged document ids, in dragged-set order.
    pub fn dragged_doc_ids(&self) -> &[DocId] {
        &self.dragged_doc_ids
    }

    /// Dragged expanded ids, in dragged-set order.
    pub fn dragged_expanded_ids(&self) -> &[ExpandedId] {
        &self.dragged_expanded_ids
    }

    /// Parent shared by every dragged node, if there is exactly one.
    pub fn origin_parent_doc_id(&self) -> Option<&DocId> {
        self.origin_parent_doc_id.as_ref()
    }

    /// Document id of the target parent.
    pub fn target_parent_doc_id(&self) -> Option<&DocId> {
        self.target.as_ref().map(|t| &t.doc)
    }

    /// Expanded id of the target parent.
    pub fn target_parent_expanded_id(&self) -> Option<&ExpandedId> {
        self.target.as_ref().map(|t| &t.expanded)
    }

    /// Filtered, ordered children of the target (expanded ids).
    pub fn target_children_expanded_ids(&self) -> &[ExpandedId] {
        &self.children.expanded
    }

    /// Filtered, ordered children of the target (document ids), parallel to
    /// [`DropPreview::target_children_expanded_ids`].
    pub fn target_children_doc_ids(&self) -> &[DocId] {
        &self.children.docs
    }

    /// Index into the filtered child list.
    pub fn insertion_index(&self) -> Option<usize> {
        self.insertion_index
    }

    /// Indicator line in surface world space, already clipped.
    pub fn indicator_rect(&self) -> Option<Rect> {
        self.indicator_rect
    }

    /// Main axis of the target; the indicator runs across it.
    pub fn indicator_axis(&self) -> Option<Axis> {
        self.indicator_axis
    }

    /// Preview-only sibling displacements. Never written to the document.
    pub fn reflow_offsets(&self) -> &ReflowOffsets {
        &self.reflow_offsets
    }

    /// Offset for one sibling, zero if it does not move.
    pub fn reflow_offset(&self, id: &ExpandedId) -> Vec2 {
        self.reflow_offsets.get(id).copied().unwrap_or(Vec2::ZERO)
    }
}

/// Inputs to [`build_drop_preview`] that describe the gesture.
#[derive(Clone, Debug)]
pub struct DropQuery<'a> {
    /// Surface locked at drag start.
    pub surface: SurfaceId,
    /// Cursor in surface world space.
    pub cursor: Point,
    /// Dragged document ids, in dragged-set order.
    pub dragged_doc_ids: &'a [DocId],
    /// Dragged expanded ids, parallel to `dragged_doc_ids`.
    pub dragged_expanded_ids: &'a [ExpandedId],
    /// Document parent of each dragged node, parallel to `dragged_doc_ids`.
    pub origin_parents: &'a [DocId],
    /// Insertion-index memory from previous moves.
    pub hysteresis: &'a Hysteresis,
    /// Current zoom factor (screen pixels per world unit).
    pub zoom: f64,
    /// Cache generation the drag locked; `None` skips the check.
    pub locked_generation: Option<u64>,
}

/// Compute the drop preview for one pointer position.
///
/// Pure: the same inputs always produce the same preview.
pub fn build_drop_preview(
    query: &DropQuery<'_>,
    cache: &SceneCache,
    document: &Document,
    config: &DropConfig,
) -> DropPreview {
    debug_assert_eq!(
        query.dragged_doc_ids.len(),
        query.dragged_expanded_ids.len(),
        "dragged id lists must be parallel"
    );
    debug_assert_eq!(
        query.dragged_doc_ids.len(),
        query.origin_parents.len(),
        "origin parents must be parallel to dragged ids"
    );

    if query
        .locked_generation
        .is_some_and(|g| g != cache.generation())
    {
        return DropPreview::invalid(query, InvalidReason::SceneChanged, None);
    }
    let Some(surface) = cache.surface(query.surface) else {
        return DropPreview::invalid(query, InvalidReason::UnknownSurface, None);
    };

    // 1. Hit.
    let exclude = exclusion_set(
        surface,
        query.dragged_expanded_ids,
        config.exclude_dragged_subtrees,
    );
    let hit = resolve_hit(surface, query.cursor, &exclude);

    // 2. Climb.
    let Some(target) = hit.and_then(|h| climb_to_target(&h, surface, document)) else {
        return DropPreview::invalid(query, InvalidReason::NoAutolayoutTarget, None);
    };
    debug_assert_eq!(surface.surface(), query.surface, "target left the locked surface");

    // 3. Validate.
    if let Err(reason) = validate_target(
        &target,
        surface,
        document,
        query.dragged_doc_ids,
        query.dragged_expanded_ids,
        query.origin_parents,
    ) {
        return DropPreview::invalid(query, reason, Some(target));
    }
    let Some(layout) = document.auto_layout(&target.doc).copied() else {
        return DropPreview::invalid(query, InvalidReason::NoAutolayoutTarget, Some(target));
    };
    let Some(target_bounds) = surface.scene().bounds(&target.expanded) else {
        return DropPreview::invalid(query, InvalidReason::UnpatchableTarget, Some(target));
    };

    // 4. Children.
    let children = filter_children(
        surface,
        &target.expanded,
        query.dragged_doc_ids,
        query.dragged_expanded_ids,
    );

    // 5. Index.
    let axis = layout.axis;
    let boundaries = decision_boundaries(&children.bounds, axis);
    let cursor = main_coord(query.cursor, axis);
    let index = resolve_index(
        &boundaries,
        cursor,
        query.hysteresis.index_for(&target.expanded),
        config.hysteresis_world(query.zoom),
    );
    debug_assert!(index <= children.len(), "insertion index out of range");
    #[cfg(feature = "tracing")]
    {
        let raw = resolve_index(&boundaries, cursor, None, 0.0);
        if raw != index {
            tracing::trace!(held = index, raw, cursor, "hysteresis holds insertion index");
        }
    }

    // 6. Indicator.
    let content = content_box(target_bounds, layout.padding);
    let position = slot_position(&children.bounds, index, axis, content);
    let Some(indicator) = indicator_rect(
        content,
        axis,
        position,
        config.indicator_thickness_world(query.zoom),
    ) else {
        return DropPreview::invalid(query, InvalidReason::IndicatorUnavailable, Some(target));
    };

    // 7. Reflow.
    let scene = surface.scene();
    let extent = bundle_extent(
        query
            .dragged_expanded_ids
            .iter()
            .zip(query.dragged_doc_ids)
            .filter_map(|(expanded, doc)| moved_bounds(surface, expanded, doc)),
        axis,
        layout.gap,
    );
    let reflow = reflow_offsets(&children, index, axis, extent);
    debug_assert!(
        reflow.keys().all(|id| scene.contains(id)),
        "reflow keys must be rendered"
    );

    // 8. Intent.
    let origin = shared_origin(query.origin_parents).ok().flatten().cloned();
    let intent = if origin.as_ref() == Some(&target.doc) {
        Intent::Reorder
    } else {
        Intent::Reparent
    };

    DropPreview {
        intent,
        invalid_reason: None,
        surface: query.surface,
        dragged_doc_ids: query.dragged_doc_ids.to_vec(),
        dragged_expanded_ids: query.dragged_expanded_ids.to_vec(),
        origin_parent_doc_id: origin,
        target: Some(target),
        children,
        insertion_index: Some(index),
        indicator_rect: Some(indicator),
        indicator_axis: Some(axis),
        reflow_offsets: reflow,
    }
}

/// Bounds of the rendered node that moves when `doc` is committed.
///
/// The grabbed node may sit inside an instance whose edits route to the
/// instance itself; the outermost node on its chain that still maps to `doc`
/// is the one that moves.
fn moved_bounds(surface: &SurfaceScene, grabbed: &ExpandedId, doc: &DocId) -> Option<Rect> {
    let lookup = surface.lookup();
    let node = lookup
        .ancestors(grabbed)
        .take_while(|a| lookup.doc_of(a) == Some(doc))
        .last()?;
    surface.scene().bounds(node)
}
