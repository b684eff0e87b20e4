// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drag session: the state carried from pointer-down to pointer-up.

use alloc::vec::Vec;

use hashbrown::HashSet;
use kurbo::Point;
use understory_scene::{DocId, Document, ExpandedId, Patch, SceneCache, SurfaceId};

use crate::config::DropConfig;
use crate::insertion::{Hysteresis, main_coord};
use crate::patch::patches_for_preview;
use crate::preview::{DropPreview, DropQuery, build_drop_preview};
use crate::validate::shared_origin;

/// Reasons a drag cannot start.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DragError {
    /// Nothing is selected.
    #[error("drag selection is empty")]
    EmptySelection,
    /// The surface has no rendered scene.
    #[error("surface {0:?} has no rendered scene")]
    UnknownSurface(SurfaceId),
    /// A dragged id is not rendered on the surface.
    #[error("{0} is not rendered on the drag surface")]
    NotRendered(ExpandedId),
    /// A dragged node has no patch target.
    #[error("{0} has no patch target")]
    Unpatchable(ExpandedId),
    /// A dragged node's patch target is missing from the document.
    #[error("{0} is not in the document")]
    NotInDocument(DocId),
    /// A dragged node is a document root and has no parent to detach from.
    #[error("{0} is a document root")]
    DocumentRoot(DocId),
    /// The same document node is dragged twice.
    #[error("{0} is dragged more than once")]
    Duplicate(DocId),
}

/// One drag gesture, locked to the surface it started on.
///
/// The surface and the scene-cache generation are captured by
/// [`DragSession::begin`] and never re-derived from the cursor. Each
/// [`DragSession::update`] replaces the current preview; [`DragSession::commit`]
/// turns the last one into a patch batch.
#[derive(Clone, Debug)]
pub struct DragSession {
    surface: SurfaceId,
    generation: u64,
    dragged_doc_ids: Vec<DocId>,
    dragged_expanded_ids: Vec<ExpandedId>,
    origin_parents: Vec<DocId>,
    hysteresis: Hysteresis,
    preview: DropPreview,
}

impl DragSession {
    /// Start dragging `dragged` on `surface`.
    ///
    /// The dragged ids keep their order; it is the order they are attached in
    /// on commit. A selection spanning several parents is accepted here and
    /// reported by every preview as invalid.
    pub fn begin(
        cache: &SceneCache,
        document: &Document,
        surface: SurfaceId,
        dragged: &[ExpandedId],
    ) -> Result<Self, DragError> {
        if dragged.is_empty() {
            return Err(DragError::EmptySelection);
        }
        let scene = cache
            .surface(surface)
            .ok_or(DragError::UnknownSurface(surface))?;
        let lookup = scene.lookup();

        let mut seen = HashSet::with_capacity(dragged.len());
        let mut dragged_doc_ids = Vec::with_capacity(dragged.len());
        let mut origin_parents = Vec::with_capacity(dragged.len());
        for expanded in dragged {
            if !lookup.contains(expanded) {
                return Err(DragError::NotRendered(expanded.clone()));
            }
            let doc = lookup
                .doc_of(expanded)
                .ok_or_else(|| DragError::Unpatchable(expanded.clone()))?;
            if !document.contains(doc) {
                return Err(DragError::NotInDocument(doc.clone()));
            }
            let parent = document
                .parent_of(doc)
                .ok_or_else(|| DragError::DocumentRoot(doc.clone()))?;
            if !seen.insert(doc) {
                return Err(DragError::Duplicate(doc.clone()));
            }
            dragged_doc_ids.push(doc.clone());
            origin_parents.push(parent.clone());
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(
            surface = surface.0,
            generation = cache.generation(),
            dragged = dragged.len(),
            "drag begin"
        );

        let dragged_expanded_ids = dragged.to_vec();
        Ok(Self {
            surface,
            generation: cache.generation(),
            preview: DropPreview::idle(
                surface,
                dragged_doc_ids.clone(),
                dragged_expanded_ids.clone(),
            ),
            dragged_doc_ids,
            dragged_expanded_ids,
            origin_parents,
            hysteresis: Hysteresis::default(),
        })
    }

    /// Rebuild the preview for a pointer at `cursor` (surface world space).
    ///
    /// The hysteresis memory is updated from valid previews and cleared by
    /// invalid ones.
    pub fn update(
        &mut self,
        cache: &SceneCache,
        document: &Document,
        cursor: Point,
        zoom: f64,
        config: &DropConfig,
    ) -> &DropPreview {
        let query = DropQuery {
            surface: self.surface,
            cursor,
            dragged_doc_ids: &self.dragged_doc_ids,
            dragged_expanded_ids: &self.dragged_expanded_ids,
            origin_parents: &self.origin_parents,
            hysteresis: &self.hysteresis,
            zoom,
            locked_generation: Some(self.generation),
        };
        let preview = build_drop_preview(&query, cache, document, config);

        match (
            preview.target_parent_expanded_id(),
            preview.insertion_index(),
            preview.indicator_axis(),
        ) {
            (Some(target), Some(index), Some(axis)) if preview.is_valid() => {
                self.hysteresis
                    .remember(target.clone(), index, main_coord(cursor, axis));
            }
            _ => self.hysteresis.reset(),
        }
        self.preview = preview;
        &self.preview
    }

    /// The current preview.
    pub fn preview(&self) -> &DropPreview {
        &self.preview
    }

    /// The locked surface.
    pub fn surface(&self) -> SurfaceId {
        self.surface
    }

    /// The scene-cache generation locked at drag start.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Dragged document ids, in dragged-set order.
    pub fn dragged_doc_ids(&self) -> &[DocId] {
        &self.dragged_doc_ids
    }

    /// Dragged expanded ids, in dragged-set order.
    pub fn dragged_expanded_ids(&self) -> &[ExpandedId] {
        &self.dragged_expanded_ids
    }

    /// The parent every dragged node shares, if there is one.
    pub fn origin_parent(&self) -> Option<&DocId> {
        shared_origin(&self.origin_parents).ok().flatten()
    }

    /// Insertion-index memory.
    pub fn hysteresis(&self) -> &Hysteresis {
        &self.hysteresis
    }

    /// End the drag and return the patches for the last preview.
    ///
    /// The batch is empty when the last preview is invalid or the scene
    /// changed since the drag started.
    pub fn commit(self, cache: &SceneCache) -> Vec<Patch> {
        let patches = if cache.generation() == self.generation {
            patches_for_preview(&self.preview).unwrap_or_default()
        } else {
            Vec::new()
        };
        #[cfg(feature = "tracing")]
        tracing::debug!(
            surface = self.surface.0,
            patches = patches.len(),
            intent = ?self.preview.intent(),
            "drag commit"
        );
        patches
    }

    /// End the drag without patches.
    pub fn cancel(self) {
        #[cfg(feature = "tracing")]
        tracing::debug!(surface = self.surface.0, "drag cancel");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preview::{Intent, InvalidReason};
    use kurbo::{Rect, Vec2};
    use understory_scene::{AutoLayout, RenderFlags, RenderKind, RenderedScene, expand_surface};

    fn eid(s: &str) -> ExpandedId {
        ExpandedId::parse(s).unwrap()
    }

    fn d(s: &str) -> DocId {
        DocId::new(s)
    }

    fn abc_doc() -> Document {
        Document::builder()
            .container("root", None, Some(AutoLayout::row(10.0)))
            .leaf("A", Some("root"))
            .leaf("B", Some("root"))
            .leaf("C", Some("root"))
            .build()
    }

    fn abc_bounds(id: &ExpandedId) -> Option<Rect> {
        Some(match id.as_str() {
            "root" => Rect::new(0.0, 0.0, 320.0, 100.0),
            "A" => Rect::new(0.0, 0.0, 100.0, 100.0),
            "B" => Rect::new(110.0, 0.0, 210.0, 100.0),
            "C" => Rect::new(220.0, 0.0, 320.0, 100.0),
            _ => return None,
        })
    }

    fn abc_cache(doc: &Document) -> SceneCache {
        let scene = expand_surface(doc, SurfaceId(1), 0, &d("root"), &abc_bounds).unwrap();
        let mut cache = SceneCache::new();
        cache.install(scene);
        cache
    }

    #[test]
    fn reorder_a_before_c() {
        let mut doc = abc_doc();
        let cache = abc_cache(&doc);
        let mut session = DragSession::begin(&cache, &doc, SurfaceId(1), &[eid("A")]).unwrap();
        assert_eq!(session.origin_parent(), Some(&d("root")));
        assert_eq!(session.preview().intent(), Intent::None);

        // Past the B|C gap midpoint at 215.
        let p = session.update(&cache, &doc, Point::new(230.0, 50.0), 1.0, &DropConfig::default());
        assert!(p.is_valid());
        assert_eq!(p.intent(), Intent::Reorder);
        assert_eq!(p.target_children_doc_ids(), &[d("B"), d("C")]);
        assert_eq!(p.insertion_index(), Some(1));
        assert_eq!(p.reflow_offsets().len(), 1);
        assert!(p.reflow_offsets().contains_key(&eid("C")));

        let patches = session.commit(&cache);
        doc.apply_patches(&patches).unwrap();
        assert_eq!(doc.children_of(&d("root")), &[d("B"), d("A"), d("C")]);
    }

    #[test]
    fn hysteresis_is_carried_between_moves() {
        let doc = abc_doc();
        let cache = abc_cache(&doc);
        let config = DropConfig::default();
        let mut session = DragSession::begin(&cache, &doc, SurfaceId(1), &[eid("A")]).unwrap();

        let at = |s: &mut DragSession, x: f64| {
            s.update(&cache, &doc, Point::new(x, 50.0), 1.0, &config)
                .insertion_index()
        };
        assert_eq!(at(&mut session, 212.0), Some(0));
        assert_eq!(at(&mut session, 219.0), Some(0));
        assert_eq!(at(&mut session, 224.0), Some(1));
        assert_eq!(session.hysteresis().index_for(&eid("root")), Some(1));
        assert_eq!(session.hysteresis().last_cursor, Some(224.0));

        // Leaving every container forgets the memory.
        assert_eq!(at(&mut session, 900.0), None);
        assert_eq!(session.hysteresis(), &Hysteresis::default());
    }

    #[test]
    fn scene_change_invalidates_the_drag() {
        let doc = abc_doc();
        let mut cache = abc_cache(&doc);
        let mut session = DragSession::begin(&cache, &doc, SurfaceId(1), &[eid("A")]).unwrap();
        assert!(
            session
                .update(&cache, &doc, Point::new(230.0, 50.0), 1.0, &DropConfig::default())
                .is_valid()
        );

        let scene = expand_surface(&doc, SurfaceId(1), 1, &d("root"), &abc_bounds).unwrap();
        cache.install(scene);
        // Committing a preview taken against the old scene does nothing.
        assert!(session.clone().commit(&cache).is_empty());

        let p = session.update(&cache, &doc, Point::new(230.0, 50.0), 1.0, &DropConfig::default());
        assert_eq!(p.invalid_reason(), Some(InvalidReason::SceneChanged));
        assert!(session.commit(&cache).is_empty());
    }

    #[test]
    fn mixed_origin_selection_never_commits() {
        let doc = Document::builder()
            .container("root", None, Some(AutoLayout::column(0.0)))
            .container("left", Some("root"), Some(AutoLayout::row(0.0)))
            .leaf("a", Some("left"))
            .container("right", Some("root"), Some(AutoLayout::row(0.0)))
            .leaf("b", Some("right"))
            .build();
        let bounds = |id: &ExpandedId| -> Option<Rect> {
            Some(match id.as_str() {
                "root" => Rect::new(0.0, 0.0, 200.0, 200.0),
                "left" => Rect::new(0.0, 0.0, 200.0, 100.0),
                "a" => Rect::new(0.0, 0.0, 50.0, 100.0),
                "right" => Rect::new(0.0, 100.0, 200.0, 200.0),
                "b" => Rect::new(0.0, 100.0, 50.0, 200.0),
                _ => return None,
            })
        };
        let mut cache = SceneCache::new();
        cache.install(expand_surface(&doc, SurfaceId(0), 0, &d("root"), &bounds).unwrap());

        let mut session =
            DragSession::begin(&cache, &doc, SurfaceId(0), &[eid("a"), eid("b")]).unwrap();
        assert_eq!(session.origin_parent(), None);
        let p = session.update(&cache, &doc, Point::new(150.0, 50.0), 1.0, &DropConfig::default());
        assert_eq!(p.invalid_reason(), Some(InvalidReason::MixedOriginMultiselect));
        assert!(session.commit(&cache).is_empty());
    }

    #[test]
    fn begin_rejects_bad_selections() {
        let doc = abc_doc();
        let cache = abc_cache(&doc);
        let begin = |ids: &[ExpandedId]| DragSession::begin(&cache, &doc, SurfaceId(1), ids).map(|_| ());

        assert_eq!(begin(&[]), Err(DragError::EmptySelection));
        assert_eq!(begin(&[eid("Z")]), Err(DragError::NotRendered(eid("Z"))));
        assert_eq!(begin(&[eid("root")]), Err(DragError::DocumentRoot(d("root"))));
        assert_eq!(begin(&[eid("A"), eid("A")]), Err(DragError::Duplicate(d("A"))));
        assert_eq!(
            DragSession::begin(&cache, &doc, SurfaceId(9), &[eid("A")]).map(|_| ()),
            Err(DragError::UnknownSurface(SurfaceId(9)))
        );
    }

    /// `page` holds two instance frames `X` and `Y`, each rendering the same
    /// component row `row_1` under its own namespace, plus a loose `item`.
    fn shared_row_fixture() -> (SceneCache, Document) {
        let doc = Document::builder()
            .container("row_1", None, Some(AutoLayout::row(4.0)))
            .leaf("label", Some("row_1"))
            .container("page", None, Some(AutoLayout::column(0.0)))
            .container("X", Some("page"), None)
            .container("Y", Some("page"), None)
            .leaf("item", Some("page"))
            .build();
        let mut b = RenderedScene::builder(SurfaceId(3));
        let c = RenderKind::Container;
        let l = RenderKind::Leaf;
        b.push(eid("page"), None, c, Rect::new(0.0, 0.0, 400.0, 300.0), Some(d("page")))
            .unwrap()
            .push(eid("X"), Some(&eid("page")), c, Rect::new(0.0, 0.0, 400.0, 100.0), Some(d("X")))
            .unwrap()
            .push(eid("X::row_1"), Some(&eid("X")), c, Rect::new(10.0, 10.0, 390.0, 90.0), Some(d("row_1")))
            .unwrap()
            .push(eid("X::label"), Some(&eid("X::row_1")), l, Rect::new(20.0, 20.0, 100.0, 80.0), Some(d("label")))
            .unwrap()
            .push(eid("Y"), Some(&eid("page")), c, Rect::new(0.0, 100.0, 400.0, 200.0), Some(d("Y")))
            .unwrap()
            .push(eid("Y::row_1"), Some(&eid("Y")), c, Rect::new(10.0, 110.0, 390.0, 190.0), Some(d("row_1")))
            .unwrap()
            .push(eid("Y::label"), Some(&eid("Y::row_1")), l, Rect::new(20.0, 120.0, 100.0, 180.0), Some(d("label")))
            .unwrap()
            .push(eid("item"), Some(&eid("page")), l, Rect::new(0.0, 200.0, 400.0, 300.0), Some(d("item")))
            .unwrap();
        let mut cache = SceneCache::new();
        cache.install(b.build());
        (cache, doc)
    }

    #[test]
    fn shared_component_row_stays_in_hovered_instance() {
        let (cache, doc) = shared_row_fixture();
        let config = DropConfig::default();
        let mut session = DragSession::begin(&cache, &doc, SurfaceId(3), &[eid("item")]).unwrap();

        let x_frame = Rect::new(0.0, 0.0, 400.0, 100.0);
        let p = session.update(&cache, &doc, Point::new(300.0, 50.0), 1.0, &config);
        assert_eq!(p.intent(), Intent::Reparent);
        assert_eq!(p.target_parent_expanded_id(), Some(&eid("X::row_1")));
        assert_eq!(p.target_parent_doc_id(), Some(&d("row_1")));
        assert_eq!(p.target_children_expanded_ids(), &[eid("X::label")]);
        let line = p.indicator_rect().unwrap();
        assert_eq!(line.intersect(x_frame), line);

        let y_frame = Rect::new(0.0, 100.0, 400.0, 200.0);
        let p = session.update(&cache, &doc, Point::new(300.0, 150.0), 1.0, &config);
        assert_eq!(p.target_parent_expanded_id(), Some(&eid("Y::row_1")));
        assert_eq!(p.target_parent_doc_id(), Some(&d("row_1")));
        let line = p.indicator_rect().unwrap();
        assert_eq!(line.intersect(y_frame), line);
        assert!(p.reflow_offsets().keys().all(|k| k.as_str().starts_with("Y::")));

        let patches = session.commit(&cache);
        assert_eq!(
            patches,
            alloc::vec![
                Patch::Detach { node: d("item"), parent: d("page") },
                Patch::Attach { node: d("item"), parent: d("row_1"), index: 1 },
            ]
        );
    }

    #[test]
    fn multi_select_lands_in_dragged_order() {
        let mut doc = abc_doc();
        let cache = abc_cache(&doc);
        let mut session =
            DragSession::begin(&cache, &doc, SurfaceId(1), &[eid("B"), eid("A")]).unwrap();

        // Before the midpoint of C, the only remaining child.
        let p = session.update(&cache, &doc, Point::new(230.0, 50.0), 1.0, &DropConfig::default());
        assert_eq!(p.intent(), Intent::Reorder);
        assert_eq!(p.target_children_doc_ids(), &[d("C")]);
        assert_eq!(p.insertion_index(), Some(0));
        // Two 100-wide nodes plus one gap each.
        assert_eq!(p.reflow_offset(&eid("C")), Vec2::new(220.0, 0.0));

        let patches = session.commit(&cache);
        doc.apply_patches(&patches).unwrap();
        assert_eq!(doc.children_of(&d("root")), &[d("B"), d("A"), d("C")]);
    }

    #[test]
    fn hidden_sibling_keeps_its_slot() {
        let mut doc = Document::builder()
            .container("root", None, Some(AutoLayout::row(10.0)))
            .leaf("H", Some("root"))
            .leaf("A", Some("root"))
            .leaf("B", Some("root"))
            .build();
        let mut b = RenderedScene::builder(SurfaceId(1));
        b.push(
            eid("root"),
            None,
            RenderKind::Container,
            Rect::new(0.0, 0.0, 320.0, 100.0),
            Some(d("root")),
        )
        .unwrap()
        .push_with_flags(
            eid("H"),
            Some(&eid("root")),
            RenderKind::Leaf,
            Rect::new(0.0, 0.0, 100.0, 100.0),
            Some(d("H")),
            RenderFlags::PICKABLE,
        )
        .unwrap()
        .push(
            eid("A"),
            Some(&eid("root")),
            RenderKind::Leaf,
            Rect::new(110.0, 0.0, 210.0, 100.0),
            Some(d("A")),
        )
        .unwrap()
        .push(
            eid("B"),
            Some(&eid("root")),
            RenderKind::Leaf,
            Rect::new(220.0, 0.0, 320.0, 100.0),
            Some(d("B")),
        )
        .unwrap();
        let mut cache = SceneCache::new();
        cache.install(b.build());

        let mut session = DragSession::begin(&cache, &doc, SurfaceId(1), &[eid("A")]).unwrap();
        let p = session.update(&cache, &doc, Point::new(290.0, 50.0), 1.0, &DropConfig::default());
        assert_eq!(p.target_children_doc_ids(), &[d("H"), d("B")]);
        assert_eq!(p.insertion_index(), Some(2));

        let patches = session.commit(&cache);
        doc.apply_patches(&patches).unwrap();
        assert_eq!(doc.children_of(&d("root")), &[d("H"), d("B"), d("A")]);
    }

    #[test]
    fn grabbing_inside_an_instance_moves_the_whole_instance() {
        let mut doc = Document::builder()
            .container("card", None, Some(AutoLayout::column(0.0)))
            .leaf("title", Some("card"))
            .container("page", None, Some(AutoLayout::column(20.0)))
            .instance("first", Some("page"), "card")
            .container("tray", Some("page"), Some(AutoLayout::column(8.0)))
            .leaf("a", Some("tray"))
            .leaf("b", Some("tray"))
            .build();
        let bounds = |id: &ExpandedId| -> Option<Rect> {
            Some(match id.as_str() {
                "page" => Rect::new(0.0, 0.0, 400.0, 500.0),
                "first" => Rect::new(0.0, 0.0, 400.0, 200.0),
                "first::title" => Rect::new(0.0, 0.0, 400.0, 20.0),
                "tray" => Rect::new(0.0, 220.0, 400.0, 500.0),
                "a" => Rect::new(0.0, 220.0, 400.0, 260.0),
                "b" => Rect::new(0.0, 268.0, 400.0, 308.0),
                _ => return None,
            })
        };
        let mut cache = SceneCache::new();
        cache.install(expand_surface(&doc, SurfaceId(0), 0, &d("page"), &bounds).unwrap());

        let mut session =
            DragSession::begin(&cache, &doc, SurfaceId(0), &[eid("first::title")]).unwrap();
        assert_eq!(session.dragged_doc_ids(), &[d("first")]);

        let p = session.update(&cache, &doc, Point::new(200.0, 230.0), 1.0, &DropConfig::default());
        assert_eq!(p.intent(), Intent::Reparent);
        assert_eq!(p.target_parent_doc_id(), Some(&d("tray")));
        assert_eq!(p.insertion_index(), Some(0));
        // The 200-tall instance moves, not the 20-tall title.
        assert_eq!(p.reflow_offset(&eid("a")), Vec2::new(0.0, 208.0));
        assert_eq!(p.reflow_offset(&eid("b")), Vec2::new(0.0, 208.0));

        let patches = session.commit(&cache);
        doc.apply_patches(&patches).unwrap();
        assert_eq!(doc.children_of(&d("tray")), &[d("first"), d("a"), d("b")]);
        assert_eq!(doc.children_of(&d("page")), &[d("tray")]);
    }

    #[test]
    fn expanded_instances_resolve_through_the_hovered_copy() {
        let doc = Document::builder()
            .container("card", None, Some(AutoLayout::column(0.0)))
            .container("row_1", Some("card"), Some(AutoLayout::row(4.0)))
            .leaf("label", Some("row_1"))
            .container("screen", None, Some(AutoLayout::column(0.0)))
            .container("page", Some("screen"), Some(AutoLayout::column(0.0)))
            .instance("X", Some("page"), "card")
            .instance("Y", Some("page"), "card")
            .container("dock", Some("screen"), Some(AutoLayout::row(0.0)))
            .leaf("item", Some("dock"))
            .build();
        let bounds = |id: &ExpandedId| -> Option<Rect> {
            Some(match id.as_str() {
                "screen" => Rect::new(0.0, 0.0, 400.0, 300.0),
                "page" => Rect::new(0.0, 0.0, 400.0, 200.0),
                "X" => Rect::new(0.0, 0.0, 400.0, 100.0),
                "X::row_1" => Rect::new(10.0, 10.0, 390.0, 90.0),
                "X::label" => Rect::new(20.0, 20.0, 100.0, 80.0),
                "Y" => Rect::new(0.0, 100.0, 400.0, 200.0),
                "Y::row_1" => Rect::new(10.0, 110.0, 390.0, 190.0),
                "Y::label" => Rect::new(20.0, 120.0, 100.0, 180.0),
                "dock" => Rect::new(0.0, 200.0, 400.0, 300.0),
                "item" => Rect::new(0.0, 200.0, 100.0, 300.0),
                _ => return None,
            })
        };
        let mut cache = SceneCache::new();
        cache.install(expand_surface(&doc, SurfaceId(2), 0, &d("screen"), &bounds).unwrap());
        let surface = cache.surface(SurfaceId(2)).unwrap();
        // Shipped routing: both copies of `row_1` edit their own instance.
        assert_eq!(surface.lookup().doc_of(&eid("X::row_1")), Some(&d("X")));
        assert_eq!(surface.lookup().doc_of(&eid("Y::row_1")), Some(&d("Y")));

        let config = DropConfig::default();
        let mut session = DragSession::begin(&cache, &doc, SurfaceId(2), &[eid("item")]).unwrap();

        let x_frame = Rect::new(0.0, 0.0, 400.0, 100.0);
        let p = session.update(&cache, &doc, Point::new(300.0, 30.0), 1.0, &config);
        let target = p.target_parent_expanded_id().unwrap();
        assert_eq!(target, &eid("page"));
        assert!(surface.scene().is_within(&eid("X::row_1"), target));
        assert_eq!(p.target_children_expanded_ids(), &[eid("X"), eid("Y")]);
        assert_eq!(p.insertion_index(), Some(0));
        let line = p.indicator_rect().unwrap();
        assert_eq!(line.intersect(x_frame), line);

        let y_frame = Rect::new(0.0, 100.0, 400.0, 200.0);
        let p = session.update(&cache, &doc, Point::new(300.0, 170.0), 1.0, &config);
        let target = p.target_parent_expanded_id().unwrap();
        assert_eq!(target, &eid("page"));
        assert!(surface.scene().is_within(&eid("Y::row_1"), target));
        assert_eq!(p.insertion_index(), Some(2));
        let line = p.indicator_rect().unwrap();
        assert_eq!(line.intersect(y_frame), line);

        assert_eq!(
            session.commit(&cache),
            alloc::vec![
                Patch::Detach { node: d("item"), parent: d("dock") },
                Patch::Attach { node: d("item"), parent: d("page"), index: 2 },
            ]
        );
    }

    #[test]
    fn cancel_produces_nothing() {
        let doc = abc_doc();
        let cache = abc_cache(&doc);
        let mut session = DragSession::begin(&cache, &doc, SurfaceId(1), &[eid("B")]).unwrap();
        session.update(&cache, &doc, Point::new(10.0, 50.0), 1.0, &DropConfig::default());
        session.cancel();
    }
}
