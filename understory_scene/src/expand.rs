// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Component-instance expansion: flattening a document subtree into a [`RenderedScene`].
//!
//! An instance node is rendered in place of the component root it refers to.
//! Every node rendered inside it gets an expanded id namespaced by the
//! instance's expanded id, and edits aimed at any of them are routed to the
//! outermost instance's own document id.

use alloc::vec::Vec;

use kurbo::Rect;

use crate::document::{DocNodeKind, Document};
use crate::ids::{DocId, ExpandedId, SurfaceId};
use crate::rendered::{RenderKind, RenderedScene, RenderedSceneBuilder, SceneError};

/// Reasons a document subtree cannot be expanded.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ExpandError {
    /// A referenced document node does not exist.
    #[error("document node {0} does not exist")]
    MissingNode(DocId),
    /// The bounds source has no bounds for a rendered node.
    #[error("no bounds for rendered node {0}")]
    MissingBounds(ExpandedId),
    /// A component (transitively) instantiates itself.
    #[error("component {0} instantiates itself")]
    RecursiveComponent(DocId),
    /// The expanded nodes do not form a valid scene.
    #[error(transparent)]
    Scene(#[from] SceneError),
}

struct Expander<'a> {
    doc: &'a Document,
    bounds: &'a dyn Fn(&ExpandedId) -> Option<Rect>,
    builder: RenderedSceneBuilder,
    components: Vec<DocId>,
}

/// Expand the document subtree at `root` into the rendered scene of `surface`.
///
/// `bounds` supplies the world-space bounds of every expanded id; layout is the
/// caller's responsibility. Nodes are emitted in pre-order, which is also the
/// paint order (later siblings on top of earlier ones, children on top of parents).
pub fn expand_surface(
    doc: &Document,
    surface: SurfaceId,
    generation: u64,
    root: &DocId,
    bounds: &dyn Fn(&ExpandedId) -> Option<Rect>,
) -> Result<RenderedScene, ExpandError> {
    let mut ex = Expander {
        doc,
        bounds,
        builder: RenderedScene::builder(surface).generation(generation),
        components: Vec::new(),
    };
    ex.visit(root, ExpandedId::root(root), None, None, None)?;
    Ok(ex.builder.build())
}

impl Expander<'_> {
    fn visit(
        &mut self,
        id: &DocId,
        expanded: ExpandedId,
        parent: Option<&ExpandedId>,
        namespace: Option<&ExpandedId>,
        patch_override: Option<&DocId>,
    ) -> Result<(), ExpandError> {
        let node = self
            .doc
            .node(id)
            .ok_or_else(|| ExpandError::MissingNode(id.clone()))?;
        let rect = (self.bounds)(&expanded).ok_or_else(|| ExpandError::MissingBounds(expanded.clone()))?;
        let patch_target = Some(patch_override.unwrap_or(id).clone());
        let kind = match node.kind {
            DocNodeKind::Leaf => RenderKind::Leaf,
            DocNodeKind::Container | DocNodeKind::Instance { .. } => RenderKind::Container,
        };
        self.builder
            .push(expanded.clone(), parent, kind, rect, patch_target)?;

        match &node.kind {
            DocNodeKind::Leaf => Ok(()),
            DocNodeKind::Container => {
                for child in &node.children {
                    let child_expanded = match namespace {
                        Some(ns) => ns.child(child),
                        None => ExpandedId::root(child),
                    };
                    self.visit(child, child_expanded, Some(&expanded), namespace, patch_override)?;
                }
                Ok(())
            }
            DocNodeKind::Instance { component } => {
                if self.components.contains(component) {
                    return Err(ExpandError::RecursiveComponent(component.clone()));
                }
                let def = self
                    .doc
                    .node(component)
                    .ok_or_else(|| ExpandError::MissingNode(component.clone()))?;
                self.components.push(component.clone());
                let routed = patch_override.unwrap_or(id);
                for child in &def.children {
                    self.visit(
                        child,
                        expanded.child(child),
                        Some(&expanded),
                        Some(&expanded),
                        Some(routed),
                    )?;
                }
                self.components.pop();
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::AutoLayout;
    use crate::lookup::SceneLookup;

    fn unit_bounds(_: &ExpandedId) -> Option<Rect> {
        Some(Rect::new(0.0, 0.0, 10.0, 10.0))
    }

    fn doc_with_instances() -> Document {
        Document::builder()
            .container("card", None, Some(AutoLayout::row(4.0)))
            .container("row_1", Some("card"), Some(AutoLayout::row(2.0)))
            .leaf("label", Some("row_1"))
            .container("page", None, Some(AutoLayout::column(8.0)))
            .instance("x", Some("page"), "card")
            .instance("y", Some("page"), "card")
            .leaf("footer", Some("page"))
            .build()
    }

    #[test]
    fn instances_get_namespaced_ids_and_route_patches() {
        let doc = doc_with_instances();
        let scene =
            expand_surface(&doc, SurfaceId(0), 1, &DocId::new("page"), &unit_bounds).unwrap();
        let ids: Vec<&str> = scene.paint_order().map(|n| n.id.as_str()).collect();
        assert_eq!(
            ids,
            [
                "page",
                "x",
                "x::row_1",
                "x::label",
                "y",
                "y::row_1",
                "y::label",
                "footer"
            ]
        );

        let lookup = SceneLookup::build(&scene);
        let x_row = ExpandedId::parse("x::row_1").unwrap();
        assert_eq!(lookup.doc_of(&x_row), Some(&DocId::new("x")));
        assert_eq!(
            lookup.doc_of(&ExpandedId::parse("footer").unwrap()),
            Some(&DocId::new("footer"))
        );
        assert_eq!(
            lookup.parent_of(&ExpandedId::parse("x::label").unwrap()),
            Some(&x_row)
        );
    }

    #[test]
    fn nested_instances_route_to_outermost() {
        let doc = Document::builder()
            .container("chip", None, None)
            .leaf("dot", Some("chip"))
            .container("card", None, Some(AutoLayout::row(0.0)))
            .instance("badge", Some("card"), "chip")
            .container("page", None, Some(AutoLayout::row(0.0)))
            .instance("x", Some("page"), "card")
            .build();
        let scene =
            expand_surface(&doc, SurfaceId(0), 0, &DocId::new("page"), &unit_bounds).unwrap();
        let dot = scene.get(&ExpandedId::parse("x::badge::dot").unwrap()).unwrap();
        assert_eq!(dot.patch_target, Some(DocId::new("x")));
    }

    #[test]
    fn recursive_component_is_rejected() {
        let doc = Document::builder()
            .container("card", None, None)
            .instance("again", Some("card"), "card")
            .container("page", None, None)
            .instance("x", Some("page"), "card")
            .build();
        let err = expand_surface(&doc, SurfaceId(0), 0, &DocId::new("page"), &unit_bounds)
            .unwrap_err();
        assert_eq!(err, ExpandError::RecursiveComponent(DocId::new("card")));
    }

    #[test]
    fn missing_bounds_is_reported() {
        let doc = doc_with_instances();
        let only_page = |id: &ExpandedId| (id.as_str() == "page").then(|| Rect::new(0.0, 0.0, 1.0, 1.0));
        let err =
            expand_surface(&doc, SurfaceId(0), 0, &DocId::new("page"), &only_page).unwrap_err();
        assert_eq!(err, ExpandError::MissingBounds(ExpandedId::parse("x").unwrap()));
    }
}
