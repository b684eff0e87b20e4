// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Identifier spaces: document ids, expanded ids, and surface ids.
//!
//! Document ids and expanded ids are deliberately distinct newtypes. The only
//! way to move between the two spaces is through a
//! [`SceneLookup`](crate::SceneLookup).

use alloc::string::String;
use alloc::sync::Arc;
use core::fmt;

/// Separator between the segments of a namespaced [`ExpandedId`].
///
/// A [`DocId`] can never contain this sequence, which keeps namespacing unambiguous.
pub const EXPANDED_SEPARATOR: &str = "::";

/// Reasons an identifier string is rejected.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum IdError {
    /// Identifiers must not be empty.
    #[error("identifier is empty")]
    Empty,
    /// Document ids must not contain [`EXPANDED_SEPARATOR`].
    #[error("document id `{0}` contains the reserved separator `::`")]
    ContainsSeparator(String),
}

/// Stable identity of a document tree node.
///
/// Cloning is cheap; the string is shared.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "String", into = "String")
)]
pub struct DocId(Arc<str>);

impl DocId {
    /// Create a document id, validating it.
    pub fn try_new(id: &str) -> Result<Self, IdError> {
        if id.is_empty() {
            return Err(IdError::Empty);
        }
        if id.contains(EXPANDED_SEPARATOR) {
            return Err(IdError::ContainsSeparator(id.into()));
        }
        Ok(Self(Arc::from(id)))
    }

    /// Create a document id from a string known to be valid.
    ///
    /// # Panics
    ///
    /// Panics if `id` is empty or contains [`EXPANDED_SEPARATOR`].
    /// Use [`DocId::try_new`] for untrusted input.
    #[track_caller]
    pub fn new(id: &str) -> Self {
        match Self::try_new(id) {
            Ok(id) => id,
            Err(err) => panic!("invalid document id: {err}"),
        }
    }

    /// The id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for DocId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DocId({})", self.0)
    }
}

impl fmt::Display for DocId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for DocId {
    type Error = IdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::try_new(&value)
    }
}

impl From<DocId> for String {
    fn from(value: DocId) -> Self {
        value.0.as_ref().into()
    }
}

/// Identity of a node as rendered.
///
/// Outside component instances an expanded id equals the document id of the
/// node it renders. Inside an instance it is the instance's expanded id
/// joined with the local document id by [`EXPANDED_SEPARATOR`]. One document
/// id may therefore map to many expanded ids.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "String", into = "String")
)]
pub struct ExpandedId(Arc<str>);

impl ExpandedId {
    /// Expanded id of a node rendered outside any instance.
    pub fn root(doc: &DocId) -> Self {
        Self(doc.0.clone())
    }

    /// Expanded id of `local` rendered inside the instance identified by `self`.
    pub fn child(&self, local: &DocId) -> Self {
        let mut s = String::with_capacity(self.0.len() + EXPANDED_SEPARATOR.len() + local.0.len());
        s.push_str(&self.0);
        s.push_str(EXPANDED_SEPARATOR);
        s.push_str(&local.0);
        Self(Arc::from(s))
    }

    /// Parse an expanded id, validating each segment as a document id.
    pub fn parse(id: &str) -> Result<Self, IdError> {
        for segment in id.split(EXPANDED_SEPARATOR) {
            DocId::try_new(segment)?;
        }
        Ok(Self(Arc::from(id)))
    }

    /// The last segment, i.e. the document id local to the innermost instance.
    pub fn local_doc_id(&self) -> DocId {
        let local = self
            .0
            .rsplit(EXPANDED_SEPARATOR)
            .next()
            .unwrap_or(&self.0);
        DocId(Arc::from(local))
    }

    /// Whether this id was produced inside a component instance.
    pub fn is_namespaced(&self) -> bool {
        self.0.contains(EXPANDED_SEPARATOR)
    }

    /// The id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ExpandedId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ExpandedId({})", self.0)
    }
}

impl fmt::Display for ExpandedId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for ExpandedId {
    type Error = IdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<ExpandedId> for String {
    fn from(value: ExpandedId) -> Self {
        value.0.as_ref().into()
    }
}

/// Identity of a top-level surface (frame) on the canvas.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SurfaceId(pub u32);
