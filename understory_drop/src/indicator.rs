// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Insertion indicator geometry and sibling reflow offsets.

use hashbrown::HashMap;
use kurbo::{Insets, Rect, Vec2};
use understory_scene::{Axis, ExpandedId};

use crate::insertion::{FilteredChildren, cross_span, main_span};

/// Preview-only displacement per sibling.
pub type ReflowOffsets = HashMap<ExpandedId, Vec2>;

/// `bounds` shrunk by `padding`. The result may have negative extent.
pub fn content_box(bounds: Rect, padding: Insets) -> Rect {
    Rect::new(
        bounds.x0 + padding.x0,
        bounds.y0 + padding.y0,
        bounds.x1 - padding.x1,
        bounds.y1 - padding.y1,
    )
}

/// Main-axis position of slot `index` among `children`.
///
/// Slot 0 sits at the start of the content box, the last slot at its end,
/// and every slot in between at the midpoint of the gap separating its
/// neighbors.
pub fn slot_position(children: &[Rect], index: usize, axis: Axis, content: Rect) -> f64 {
    let (start, end) = main_span(content, axis);
    if index == 0 {
        return start;
    }
    if index >= children.len() {
        return end;
    }
    let (_, prev_end) = main_span(children[index - 1], axis);
    let (next_start, _) = main_span(children[index], axis);
    0.5 * (prev_end + next_start)
}

/// A line across `axis` at `position`, confined to `content`.
///
/// Returns `None` when the content box has no positive extent on either
/// dimension; callers treat that as an invalid drop.
pub fn indicator_rect(content: Rect, axis: Axis, position: f64, thickness: f64) -> Option<Rect> {
    if !(content.width() > 0.0 && content.height() > 0.0) {
        return None;
    }
    let (start, end) = main_span(content, axis);
    let (c0, c1) = cross_span(content, axis);
    let p = position.clamp(start, end);
    let half = 0.5 * thickness.max(0.0);
    let line = match axis {
        Axis::Horizontal => Rect::new(p - half, c0, p + half, c1),
        Axis::Vertical => Rect::new(c0, p - half, c1, p + half),
    };
    Some(line.intersect(content))
}

/// Main-axis space taken by the dragged bundle once dropped.
///
/// The sum of the dragged nodes' extents plus one gap per inserted node.
/// The bundle is assumed to land contiguously.
pub fn bundle_extent(dragged: impl IntoIterator<Item = Rect>, axis: Axis, gap: f64) -> f64 {
    dragged
        .into_iter()
        .map(|r| {
            let (s, e) = main_span(r, axis);
            (e - s).max(0.0) + gap
        })
        .sum()
}

/// Offsets nudging every child at or after `index` by `extent` along `axis`.
pub fn reflow_offsets(
    children: &FilteredChildren,
    index: usize,
    axis: Axis,
    extent: f64,
) -> ReflowOffsets {
    let delta = match axis {
        Axis::Horizontal => Vec2::new(extent, 0.0),
        Axis::Vertical => Vec2::new(0.0, extent),
    };
    children
        .expanded
        .iter()
        .skip(index)
        .map(|id| (id.clone(), delta))
        .collect()
}
