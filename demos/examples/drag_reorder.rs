// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drag-and-drop over a card that is instantiated twice.
//!
//! This example shows how to:
//! - expand a document with component instances into a rendered scene,
//! - run a `DragSession` across a few pointer moves and watch hysteresis hold the index,
//! - commit the final preview and apply the patch batch to the document.
//!
//! Run:
//! - `cargo run -p understory_demos --example drag_reorder`

use std::collections::HashMap;

use kurbo::{Point, Rect};
use understory_drop::{DragSession, DropConfig, DropPreview};
use understory_scene::{
    AutoLayout, DocId, Document, ExpandedId, SceneCache, SurfaceId, expand_surface,
};

fn describe(preview: &DropPreview) {
    match preview.invalid_reason() {
        Some(reason) => println!("  invalid: {reason}"),
        None if !preview.is_valid() => println!("  idle"),
        None => println!(
            "  {:?} into {} at {} (children {:?}), indicator {:?}",
            preview.intent(),
            preview
                .target_parent_expanded_id()
                .map_or("?", ExpandedId::as_str),
            preview.insertion_index().unwrap_or_default(),
            preview
                .target_children_doc_ids()
                .iter()
                .map(DocId::as_str)
                .collect::<Vec<_>>(),
            preview.indicator_rect(),
        ),
    }
    let mut nudged: Vec<_> = preview.reflow_offsets().iter().collect();
    nudged.sort_by(|a, b| a.0.cmp(b.0));
    for (id, offset) in nudged {
        println!("    nudge {id} by {offset:?}");
    }
}

fn main() {
    // `card` is a component: a row of two labels. The page stacks two
    // instances of it above a row of loose items.
    let mut doc = Document::builder()
        .container("card", None, Some(AutoLayout::row(8.0)))
        .leaf("title", Some("card"))
        .leaf("subtitle", Some("card"))
        .container("page", None, Some(AutoLayout::column(16.0)))
        .instance("first", Some("page"), "card")
        .instance("second", Some("page"), "card")
        .container("tray", Some("page"), Some(AutoLayout::row(8.0)))
        .leaf("a", Some("tray"))
        .leaf("b", Some("tray"))
        .leaf("c", Some("tray"))
        .build();

    // Layout comes from elsewhere; here it is a fixed table.
    let rects: HashMap<&str, Rect> = [
        ("page", Rect::new(0.0, 0.0, 400.0, 272.0)),
        ("first", Rect::new(0.0, 0.0, 400.0, 80.0)),
        ("first::title", Rect::new(0.0, 0.0, 120.0, 80.0)),
        ("first::subtitle", Rect::new(128.0, 0.0, 248.0, 80.0)),
        ("second", Rect::new(0.0, 96.0, 400.0, 176.0)),
        ("second::title", Rect::new(0.0, 96.0, 120.0, 176.0)),
        ("second::subtitle", Rect::new(128.0, 96.0, 248.0, 176.0)),
        ("tray", Rect::new(0.0, 192.0, 400.0, 272.0)),
        ("a", Rect::new(0.0, 192.0, 100.0, 272.0)),
        ("b", Rect::new(108.0, 192.0, 208.0, 272.0)),
        ("c", Rect::new(216.0, 192.0, 316.0, 272.0)),
    ]
    .into_iter()
    .collect();
    let bounds = |id: &ExpandedId| rects.get(id.as_str()).copied();

    let surface = SurfaceId(0);
    let mut cache = SceneCache::new();
    match expand_surface(&doc, surface, 0, &DocId::new("page"), &bounds) {
        Ok(scene) => cache.install(scene),
        Err(err) => {
            eprintln!("cannot expand page: {err}");
            return;
        }
    }

    let dragged = [ExpandedId::root(&DocId::new("a"))];
    let mut session = match DragSession::begin(&cache, &doc, surface, &dragged) {
        Ok(session) => session,
        Err(err) => {
            eprintln!("cannot start drag: {err}");
            return;
        }
    };
    let config = DropConfig::default();

    // Inside an instance the frame is not an auto-layout container and its
    // contents are routed to the instance, so the drop falls through to `page`.
    // Then along the tray: hysteresis holds the index just past the b|c gap.
    let moves = [
        Point::new(200.0, 40.0),
        Point::new(205.0, 230.0),
        Point::new(215.0, 230.0),
        Point::new(222.0, 230.0),
        Point::new(380.0, 230.0),
    ];
    for at in moves {
        println!("pointer at {at:?}");
        describe(session.update(&cache, &doc, at, 1.0, &config));
    }

    let patches = session.commit(&cache);
    println!("commit: {patches:?}");
    if let Err(err) = doc.apply_patches(&patches) {
        eprintln!("rejected: {err}");
        return;
    }
    println!(
        "tray is now {:?}",
        doc.children_of(&DocId::new("tray"))
            .iter()
            .map(DocId::as_str)
            .collect::<Vec<_>>()
    );
}
