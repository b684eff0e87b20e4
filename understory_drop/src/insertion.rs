// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Insertion index calculator.
//!
//! ## Child list
//!
//! The children considered for insertion come from the rendered scene, never
//! from the document tree. Dragged nodes (by expanded id or by document id)
//! and unpatchable children are filtered out. Hidden children stay: they still
//! hold a position in the document's child list, and the insertion index must
//! count them for a commit to land where the preview shows. The result is the
//! authoritative list every later step indexes into.
//!
//! ## Decision boundaries
//!
//! Along the container's main axis there is one decision boundary between
//! each pair of consecutive children, at the midpoint of the gap separating
//! them, plus one at the main-axis midpoint of the last child. The raw index
//! is the number of boundaries the cursor has passed: hovering child `i`
//! inserts before it, and hovering the trailing half of the last child (or
//! anything past it) appends.
//!
//! ## Hysteresis
//!
//! With a remembered index for the same target, a different index is only
//! accepted once the cursor is at least the hysteresis distance past each
//! boundary separating the two. Without it the index flips every time the
//! cursor grazes a boundary, which shows up as indicator flicker.

use alloc::vec::Vec;

use kurbo::{Point, Rect};
use smallvec::SmallVec;
use understory_scene::{Axis, DocId, ExpandedId, SurfaceScene};

/// The filtered, ordered children of a drop target.
///
/// The three vectors are parallel.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FilteredChildren {
    /// Rendered identities.
    pub expanded: Vec<ExpandedId>,
    /// Patch targets.
    pub docs: Vec<DocId>,
    /// World-space bounds.
    pub bounds: Vec<Rect>,
}

impl FilteredChildren {
    /// Number of children.
    pub fn len(&self) -> usize {
        self.expanded.len()
    }

    /// Whether there are no children.
    pub fn is_empty(&self) -> bool {
        self.expanded.is_empty()
    }
}

/// Collect the children of `target` that can sit beside the dropped nodes.
pub fn filter_children(
    surface: &SurfaceScene,
    target: &ExpandedId,
    dragged_doc_ids: &[DocId],
    dragged_expanded_ids: &[ExpandedId],
) -> FilteredChildren {
    let scene = surface.scene();
    let lookup = surface.lookup();
    let mut out = FilteredChildren::default();
    for child in scene.children_of(target) {
        if dragged_expanded_ids.contains(child) {
            continue;
        }
        let Some(node) = scene.get(child) else {
            continue;
        };
        let Some(doc) = lookup.doc_of(child) else {
            continue;
        };
        if dragged_doc_ids.contains(doc) {
            continue;
        }
        out.expanded.push(child.clone());
        out.docs.push(doc.clone());
        out.bounds.push(node.bounds);
    }
    out
}

/// `(start, end)` of `rect` along `axis`.
pub(crate) fn main_span(rect: Rect, axis: Axis) -> (f64, f64) {
    match axis {
        Axis::Horizontal => (rect.x0, rect.x1),
        Axis::Vertical => (rect.y0, rect.y1),
    }
}

/// `(start, end)` of `rect` across `axis`.
pub(crate) fn cross_span(rect: Rect, axis: Axis) -> (f64, f64) {
    main_span(rect, axis.cross())
}

/// Coordinate of `point` along `axis`.
pub(crate) fn main_coord(point: Point, axis: Axis) -> f64 {
    match axis {
        Axis::Horizontal => point.x,
        Axis::Vertical => point.y,
    }
}

/// Decision boundaries for `children` laid out along `axis`; see the module docs.
///
/// Boundary `k` separates index `k` from index `k + 1`.
pub fn decision_boundaries(children: &[Rect], axis: Axis) -> SmallVec<[f64; 8]> {
    let mut out = SmallVec::new();
    for pair in children.windows(2) {
        let (_, prev_end) = main_span(pair[0], axis);
        let (next_start, _) = main_span(pair[1], axis);
        out.push(0.5 * (prev_end + next_start));
    }
    if let Some(&last) = children.last() {
        let (s, e) = main_span(last, axis);
        out.push(0.5 * (s + e));
    }
    out
}

/// Insertion-index memory carried across pointer moves of one drag.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Hysteresis {
    /// Target the memory belongs to; memory for any other target is ignored.
    pub target: Option<ExpandedId>,
    /// Last accepted insertion index.
    pub last_index: Option<usize>,
    /// Main-axis cursor coordinate at which [`Hysteresis::last_index`] was accepted.
    ///
    /// Diagnostic only: [`resolve_index`] compares the cursor against the
    /// decision boundaries, not against this position.
    pub last_cursor: Option<f64>,
}

impl Hysteresis {
    /// The remembered index, if it belongs to `target`.
    pub fn index_for(&self, target: &ExpandedId) -> Option<usize> {
        if self.target.as_ref() == Some(target) {
            self.last_index
        } else {
            None
        }
    }

    /// Remember `index` as accepted for `target` at `cursor`.
    pub fn remember(&mut self, target: ExpandedId, index: usize, cursor: f64) {
        self.target = Some(target);
        self.last_index = Some(index);
        self.last_cursor = Some(cursor);
    }

    /// Forget everything.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Index into the filtered list for a cursor at `cursor` along the main axis.
///
/// `last` is the remembered index for the same target and `threshold` the
/// hysteresis distance in world units. The result is in `0..=boundaries.len()`.
pub fn resolve_index(boundaries: &[f64], cursor: f64, last: Option<usize>, threshold: f64) -> usize {
    let raw = boundaries.iter().filter(|&&b| cursor > b).count();
    let Some(last) = last.filter(|&l| l <= boundaries.len()) else {
        return raw;
    };
    if raw > last {
        last + boundaries[last..raw]
            .iter()
            .take_while(|&&b| cursor >= b + threshold)
            .count()
    } else if raw < last {
        last - boundaries[raw..last]
            .iter()
            .rev()
            .take_while(|&&b| cursor <= b - threshold)
            .count()
    } else {
        last
    }
}
