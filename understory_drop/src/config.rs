// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tunables for drop resolution.

/// Configuration for [`build_drop_preview`](crate::build_drop_preview) and
/// [`DragSession`](crate::DragSession).
///
/// Distances are in screen pixels and divided by the current zoom before use,
/// so they feel the same at every zoom level.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct DropConfig {
    /// How far past a slot boundary the cursor must travel before the
    /// insertion index changes.
    pub hysteresis_px: f64,
    /// Thickness of the insertion indicator line.
    pub indicator_thickness_px: f64,
    /// Exclude the rendered subtrees of dragged nodes from hit testing,
    /// not just the dragged nodes themselves.
    pub exclude_dragged_subtrees: bool,
}

impl Default for DropConfig {
    fn default() -> Self {
        Self {
            hysteresis_px: 8.0,
            indicator_thickness_px: 2.0,
            exclude_dragged_subtrees: true,
        }
    }
}

impl DropConfig {
    /// Replace the hysteresis distance.
    pub fn with_hysteresis_px(mut self, px: f64) -> Self {
        self.hysteresis_px = px;
        self
    }

    /// Replace the indicator thickness.
    pub fn with_indicator_thickness_px(mut self, px: f64) -> Self {
        self.indicator_thickness_px = px;
        self
    }

    /// Choose whether dragged subtrees are excluded from hit testing.
    pub fn with_exclude_dragged_subtrees(mut self, exclude: bool) -> Self {
        self.exclude_dragged_subtrees = exclude;
        self
    }

    /// Hysteresis distance in world units at `zoom`.
    pub fn hysteresis_world(&self, zoom: f64) -> f64 {
        self.hysteresis_px / sanitize_zoom(zoom)
    }

    /// Indicator thickness in world units at `zoom`.
    pub fn indicator_thickness_world(&self, zoom: f64) -> f64 {
        self.indicator_thickness_px / sanitize_zoom(zoom)
    }
}

/// Non-positive or non-finite zoom factors fall back to 1.
fn sanitize_zoom(zoom: f64) -> f64 {
    if zoom.is_finite() && zoom > 0.0 {
        zoom
    } else {
        1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distances_scale_with_zoom() {
        let config = DropConfig::default();
        assert_eq!(config.hysteresis_world(1.0), 8.0);
        assert_eq!(config.hysteresis_world(2.0), 4.0);
        assert_eq!(config.indicator_thickness_world(0.5), 4.0);
    }

    #[test]
    fn degenerate_zoom_is_treated_as_one() {
        let config = DropConfig::default().with_hysteresis_px(10.0);
        assert_eq!(config.hysteresis_world(0.0), 10.0);
        assert_eq!(config.hysteresis_world(-3.0), 10.0);
        assert_eq!(config.hysteresis_world(f64::NAN), 10.0);
    }
}
