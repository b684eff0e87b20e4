// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_scene --heading-base-level=0

//! Understory Scene: document and rendered-scene model for direct-manipulation editors.
//!
//! Editors for tree-shaped designs deal with two identities for every node:
//!
//! - **Document ids** ([`DocId`]): stable identity of a node in the persisted tree.
//!   All edits are expressed in this space.
//! - **Expanded ids** ([`ExpandedId`]): identity of a node as rendered. Component
//!   instances render the same document subtree several times, so one document id
//!   may correspond to many expanded ids. Ids produced inside an instance are
//!   namespaced by the instance's expanded id.
//!
//! This crate keeps those spaces apart and provides the tables to move between them.
//!
//! ## API overview
//!
//! - [`Document`]: the document store, with ordered children, a parent map, and
//!   optional [`AutoLayout`] descriptors. Batches of [`Patch`]es are applied
//!   atomically with [`Document::apply_patches`].
//! - [`RenderedScene`]: the rendered nodes of one surface in paint order, with
//!   world-space bounds and a patch target per node. Produced by the rendering
//!   layer, or by [`expand_surface`] which flattens component instances.
//! - [`SceneLookup`]: forward, reverse, and parent tables built once per scene version.
//! - [`SceneCache`]: per-surface scenes and tables, with a generation counter that
//!   drag sessions lock.
//!
//! ## Not a layout engine
//!
//! Bounds come from elsewhere. This crate records layout metadata (axis, gap,
//! padding) for consumers that need it but never measures or arranges anything.
//!
//! ## Features
//!
//! - `std` (default) / `libm`: float support for `kurbo`.
//! - `tracing`: debug events when lookup tables are rebuilt.
//! - `serde`: serialization of identifiers, layout descriptors, and patches.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod cache;
mod document;
mod expand;
mod ids;
mod lookup;
mod patch;
mod rendered;

pub use cache::{SceneCache, SurfaceScene};
pub use document::{Alignment, AutoLayout, Axis, DocNode, DocNodeKind, Document, DocumentBuilder};
pub use expand::{ExpandError, expand_surface};
pub use ids::{DocId, EXPANDED_SEPARATOR, ExpandedId, IdError, SurfaceId};
pub use lookup::{Ancestors, ExpandedIds, SceneLookup};
pub use patch::{Patch, PatchError};
pub use rendered::{
    RenderFlags, RenderKind, RenderedNode, RenderedScene, RenderedSceneBuilder, SceneError,
};
