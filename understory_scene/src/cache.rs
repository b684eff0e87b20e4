// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-surface rendered scenes with their lookup tables.

use hashbrown::HashMap;

use crate::ids::SurfaceId;
use crate::lookup::SceneLookup;
use crate::rendered::RenderedScene;

/// A rendered scene paired with the lookup tables built from it.
#[derive(Clone, Debug)]
pub struct SurfaceScene {
    scene: RenderedScene,
    lookup: SceneLookup,
}

impl SurfaceScene {
    /// Pair `scene` with freshly built lookup tables.
    pub fn new(scene: RenderedScene) -> Self {
        let lookup = SceneLookup::build(&scene);
        Self { scene, lookup }
    }

    /// The rendered scene.
    pub fn scene(&self) -> &RenderedScene {
        &self.scene
    }

    /// The lookup tables.
    pub fn lookup(&self) -> &SceneLookup {
        &self.lookup
    }

    /// Surface id of the scene.
    pub fn surface(&self) -> SurfaceId {
        self.scene.surface()
    }
}

/// Rendered scenes for every surface, keyed by [`SurfaceId`].
///
/// The cache generation increases whenever any surface is installed or
/// removed. Drag sessions lock the generation they started with and treat
/// any change as an invalidation.
#[derive(Clone, Debug, Default)]
pub struct SceneCache {
    surfaces: HashMap<SurfaceId, SurfaceScene>,
    generation: u64,
}

impl SceneCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current generation.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Install (or replace) the scene of its surface and rebuild that surface's tables.
    pub fn install(&mut self, scene: RenderedScene) {
        let surface = scene.surface();
        #[cfg(feature = "tracing")]
        tracing::debug!(
            surface = surface.0,
            nodes = scene.len(),
            scene_generation = scene.generation(),
            "rebuilding scene lookup tables"
        );
        self.surfaces.insert(surface, SurfaceScene::new(scene));
        self.generation += 1;
    }

    /// Drop the scene of `surface`.
    pub fn remove(&mut self, surface: SurfaceId) -> Option<SurfaceScene> {
        let removed = self.surfaces.remove(&surface);
        if removed.is_some() {
            self.generation += 1;
        }
        removed
    }

    /// Scene and tables for `surface`.
    pub fn surface(&self, surface: SurfaceId) -> Option<&SurfaceScene> {
        self.surfaces.get(&surface)
    }

    /// Number of cached surfaces.
    pub fn len(&self) -> usize {
        self.surfaces.len()
    }

    /// Whether no surfaces are cached.
    pub fn is_empty(&self) -> bool {
        self.surfaces.is_empty()
    }
}
