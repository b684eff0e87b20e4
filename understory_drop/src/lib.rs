// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_drop --heading-base-level=0

//! Understory Drop: spatial drag-and-drop for auto-layout scene graphs.
//!
//! Given a rendered scene, a cursor, and a set of dragged nodes, this crate
//! decides where a drop would land and what document edits it would make.
//!
//! - Resolves the container under the cursor in expanded-id space, so component
//!   instances that render the same document subtree are never confused.
//! - Climbs to the nearest auto-layout container and validates it.
//! - Computes an insertion index with directional hysteresis, an insertion
//!   indicator, and preview-only sibling reflow offsets.
//! - Turns a committed drop into a two-phase batch of [`Patch`]es that stays
//!   correct for multi-node moves.
//!
//! ## API overview
//!
//! - [`DragSession`]: locks a surface and scene generation at pointer-down,
//!   rebuilds the [`DropPreview`] on every pointer move, and yields patches on commit.
//! - [`build_drop_preview`]: the pure preview pipeline, for callers managing their own state.
//! - [`DropPreview`]: the single authoritative output. Overlays draw its indicator,
//!   animations read its reflow offsets, and nothing recomputes any part of it.
//! - [`generate_patches`] / [`patches_for_preview`]: detach-then-attach patch batches.
//! - [`DropConfig`]: hysteresis distance, indicator thickness, subtree exclusion.
//!
//! Invalid drops are not errors: an invalid preview carries an [`InvalidReason`]
//! and produces no patches. Only malformed drag starts fail, with [`DragError`].
//!
//! ## Example
//!
//! ```
//! use kurbo::{Point, Rect};
//! use understory_drop::{DragSession, DropConfig, Intent};
//! use understory_scene::{AutoLayout, DocId, Document, ExpandedId, SceneCache, SurfaceId, expand_surface};
//!
//! let mut doc = Document::builder()
//!     .container("list", None, Some(AutoLayout::column(4.0)))
//!     .leaf("a", Some("list"))
//!     .leaf("b", Some("list"))
//!     .build();
//! let bounds = |id: &ExpandedId| -> Option<Rect> {
//!     Some(match id.as_str() {
//!         "list" => Rect::new(0.0, 0.0, 100.0, 44.0),
//!         "a" => Rect::new(0.0, 0.0, 100.0, 20.0),
//!         "b" => Rect::new(0.0, 24.0, 100.0, 44.0),
//!         _ => return None,
//!     })
//! };
//! let mut cache = SceneCache::new();
//! cache.install(expand_surface(&doc, SurfaceId(0), 0, &DocId::new("list"), &bounds).unwrap());
//!
//! let a = ExpandedId::parse("a").unwrap();
//! let mut session = DragSession::begin(&cache, &doc, SurfaceId(0), &[a]).unwrap();
//! let preview = session.update(&cache, &doc, Point::new(50.0, 40.0), 1.0, &DropConfig::default());
//! assert_eq!(preview.intent(), Intent::Reorder);
//!
//! let patches = session.commit(&cache);
//! doc.apply_patches(&patches).unwrap();
//! assert_eq!(doc.children_of(&DocId::new("list")), &[DocId::new("b"), DocId::new("a")]);
//! ```
//!
//! ## Features
//!
//! - `std` (default) / `libm`: float support for `kurbo`.
//! - `tracing`: debug events for drag begin, commit, and cancel; trace events for
//!   invalid previews and held insertion indices.
//! - `serde`: serialization of [`DropConfig`] and [`InvalidReason`].
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod climb;
mod config;
mod hit;
mod indicator;
mod insertion;
mod patch;
mod preview;
mod session;
mod validate;

pub use climb::climb_to_target;
pub use config::DropConfig;
pub use hit::{ExcludeSet, HitTarget, exclusion_set, resolve_hit};
pub use indicator::{
    ReflowOffsets, bundle_extent, content_box, indicator_rect, reflow_offsets, slot_position,
};
pub use insertion::{
    FilteredChildren, Hysteresis, decision_boundaries, filter_children, resolve_index,
};
pub use patch::{generate_patches, patches_for_preview};
pub use preview::{DropPreview, DropQuery, Intent, InvalidReason, build_drop_preview};
pub use session::{DragError, DragSession};
pub use validate::{shared_origin, validate_target};

pub use understory_scene::Patch;
