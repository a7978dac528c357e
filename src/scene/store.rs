use std::collections::{BTreeMap, HashMap};

use crate::{
    content::cell::{Cell, ContentSource, DEFAULT_TRANSPARENT_CHAR},
    effects::blend::ColorTransform,
    effects::influence::{Influence, LayerEffect},
    effects::mask::InfluenceMask,
    foundation::color::Rgb,
    foundation::core::{Bounds, Position, Viewport},
    foundation::error::{GlyphError, GlyphResult},
    render::cache::RenderCache,
    render::compositor::Compositor,
    render::output::RenderOutput,
    scene::layers::LayerIndex,
    scene::object::{AsciiObject, ObjectOptions, ObjectSnapshot, prepare_content},
};

/// Scene-wide configuration.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SceneOpts {
    /// Viewport used by [`Scene::render`] when none is passed.
    pub default_viewport: Option<Viewport>,
    /// `#rrggbb` color of cells nothing covers.
    pub background: String,
    /// Character that marks a transparent content cell.
    pub transparent_char: char,
}

impl Default for SceneOpts {
    fn default() -> Self {
        Self {
            default_viewport: None,
            background: "#000000".to_owned(),
            transparent_char: DEFAULT_TRANSPARENT_CHAR,
        }
    }
}

/// Layered ASCII scene with cached viewport rendering.
///
/// Objects are addressed by unique string ids. Every mutation validates its input before
/// touching the scene, so a failed call leaves the scene exactly as it was.
#[derive(Debug)]
pub struct Scene {
    opts: SceneOpts,
    background: Rgb,
    /// Insertion order; also the same-layer tie-break.
    objects: Vec<AsciiObject>,
    slots: HashMap<String, usize>,
    layer_effects: BTreeMap<i32, (LayerEffect, ColorTransform)>,
    cache: RenderCache,
}

impl Default for Scene {
    fn default() -> Self {
        Self {
            opts: SceneOpts::default(),
            background: Rgb::BLACK,
            objects: Vec::new(),
            slots: HashMap::new(),
            layer_effects: BTreeMap::new(),
            cache: RenderCache::default(),
        }
    }
}

impl Scene {
    /// Empty scene with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty scene with validated `opts`.
    pub fn with_opts(opts: SceneOpts) -> GlyphResult<Self> {
        let background = Rgb::parse_hex(&opts.background, "background")?;
        if let Some(vp) = &opts.default_viewport {
            vp.validate()?;
        }
        if opts.transparent_char == ' ' {
            return Err(GlyphError::validation(
                "transparent_char must differ from ' ', which marks an opaque space",
            ));
        }
        Ok(Self {
            opts: SceneOpts {
                background: background.to_hex(),
                ..opts
            },
            background,
            ..Self::default()
        })
    }

    /// Current options, with the background normalized.
    pub fn opts(&self) -> &SceneOpts {
        &self.opts
    }

    /// Add an object under a new id.
    pub fn add_object(&mut self, id: impl Into<String>, opts: ObjectOptions) -> GlyphResult<()> {
        let id = id.into();
        if self.slots.contains_key(&id) {
            return Err(GlyphError::duplicate(&id));
        }
        let obj = AsciiObject::build(&id, &opts, self.opts.transparent_char)?;
        tracing::trace!(
            id = %id,
            layer = obj.layer(),
            opaque = obj.opaque_count(),
            "add object"
        );
        self.slots.insert(id, self.objects.len());
        self.objects.push(obj);
        self.cache.invalidate();
        Ok(())
    }

    /// Remove an object.
    pub fn remove_object(&mut self, id: &str) -> GlyphResult<()> {
        let slot = self.slot(id)?;
        self.objects.remove(slot);
        self.slots.remove(id);
        for (i, obj) in self.objects.iter().enumerate().skip(slot) {
            self.slots.insert(obj.id().to_owned(), i);
        }
        tracing::trace!(id, "remove object");
        self.cache.invalidate();
        Ok(())
    }

    /// Move an object's top-left content cell to `position`.
    pub fn move_object(&mut self, id: &str, position: Position) -> GlyphResult<()> {
        self.object_mut(id)?.set_position(position);
        tracing::trace!(id, x = position.x, y = position.y, "move object");
        self.cache.invalidate();
        Ok(())
    }

    /// Set an object's `#rrggbb` color.
    pub fn set_color(&mut self, id: &str, color: &str) -> GlyphResult<()> {
        let slot = self.slot(id)?;
        let color = Rgb::parse_hex(color, &format!("color of object '{id}'"))?;
        self.objects[slot].set_color(color);
        tracing::trace!(id, color = %color, "set color");
        self.cache.invalidate();
        Ok(())
    }

    /// Move an object to another layer. It keeps its insertion-order rank.
    pub fn set_layer(&mut self, id: &str, layer: i32) -> GlyphResult<()> {
        self.object_mut(id)?.set_layer(layer);
        tracing::trace!(id, layer, "set layer");
        self.cache.invalidate();
        Ok(())
    }

    /// Replace or clear an object's influence.
    pub fn set_influence(&mut self, id: &str, influence: Option<Influence>) -> GlyphResult<()> {
        let slot = self.slot(id)?;
        let influence = influence.as_ref().map(Influence::validated).transpose()?;
        tracing::trace!(id, radius = ?influence.as_ref().map(|i| i.radius), "set influence");
        self.objects[slot].set_influence(influence);
        self.cache.invalidate();
        Ok(())
    }

    /// Replace an object's content. Current flips and edge detection are re-applied.
    pub fn set_content(&mut self, id: &str, content: impl Into<ContentSource>) -> GlyphResult<()> {
        let slot = self.slot(id)?;
        let obj = &mut self.objects[slot];
        let content = prepare_content(
            &content.into(),
            self.opts.transparent_char,
            obj.auto_detect_edges(),
        )?;
        tracing::trace!(
            id,
            width = content.width(),
            height = content.height(),
            opaque = content.opaque_count(),
            "set content"
        );
        obj.set_content(content);
        self.cache.invalidate();
        Ok(())
    }

    /// Toggle the horizontal flip.
    pub fn flip_horizontal(&mut self, id: &str) -> GlyphResult<()> {
        self.object_mut(id)?.toggle_flip_horizontal();
        tracing::trace!(id, "flip horizontal");
        self.cache.invalidate();
        Ok(())
    }

    /// Toggle the vertical flip.
    pub fn flip_vertical(&mut self, id: &str) -> GlyphResult<()> {
        self.object_mut(id)?.toggle_flip_vertical();
        tracing::trace!(id, "flip vertical");
        self.cache.invalidate();
        Ok(())
    }

    /// Set the horizontal flip state; no-op when already there.
    pub fn set_flip_horizontal(&mut self, id: &str, flipped: bool) -> GlyphResult<()> {
        let (h, _) = self.object(id)?.flip_state();
        if h != flipped {
            self.flip_horizontal(id)?;
        }
        Ok(())
    }

    /// Set the vertical flip state; no-op when already there.
    pub fn set_flip_vertical(&mut self, id: &str, flipped: bool) -> GlyphResult<()> {
        let (_, v) = self.object(id)?.flip_state();
        if v != flipped {
            self.flip_vertical(id)?;
        }
        Ok(())
    }

    /// Owned snapshot of one object.
    pub fn get_object(&self, id: &str) -> GlyphResult<ObjectSnapshot> {
        Ok(self.object(id)?.snapshot())
    }

    /// Snapshots of every object in insertion order.
    pub fn list_objects(&self) -> Vec<ObjectSnapshot> {
        self.objects.iter().map(AsciiObject::snapshot).collect()
    }

    /// Owned copy of an object's influence mask, regenerated first if stale.
    pub fn influence_mask(&mut self, id: &str) -> GlyphResult<InfluenceMask> {
        let slot = self.slot(id)?;
        Ok(self.objects[slot].ensure_mask().clone())
    }

    /// Whether an object with `id` exists.
    pub fn contains(&self, id: &str) -> bool {
        self.slots.contains_key(id)
    }

    /// Number of objects.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Whether the scene holds no objects.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Layers holding objects or a layer effect, highest first.
    pub fn layers(&self) -> Vec<i32> {
        LayerIndex::build(&self.objects, self.layer_effects.keys().copied(), None).layers()
    }

    /// Id of the object whose content is visible at world cell `(x, y)`.
    ///
    /// Influence gradients and glass panes are looked through; only glyphs and plain spaces
    /// claim a cell.
    pub fn object_at(&self, x: i32, y: i32) -> Option<&str> {
        let index = LayerIndex::build(&self.objects, [], None);
        index
            .slots()
            .map(|slot| &self.objects[slot])
            .find(|obj| match obj.cell_at(x, y) {
                Some(Cell::Glyph(_)) => true,
                Some(Cell::Space) => obj.tint().is_none(),
                Some(Cell::Transparent) | None => false,
            })
            .map(AsciiObject::id)
    }

    /// Attach (or with `None`, clear) a uniform effect on `layer`.
    pub fn set_layer_effect(&mut self, layer: i32, effect: Option<LayerEffect>) -> GlyphResult<()> {
        match effect {
            Some(effect) => {
                let resolved = effect.resolve()?;
                tracing::trace!(layer, kind = ?effect.kind, "set layer effect");
                self.layer_effects.insert(layer, resolved);
            }
            None => {
                tracing::trace!(layer, "clear layer effect");
                self.layer_effects.remove(&layer);
            }
        }
        self.cache.invalidate();
        Ok(())
    }

    /// Effect attached to `layer`, normalized.
    pub fn layer_effect(&self, layer: i32) -> Option<LayerEffect> {
        self.layer_effects.get(&layer).map(|(effect, _)| effect.clone())
    }

    /// Viewport used when [`Scene::render`] gets none.
    pub fn set_default_viewport(&mut self, viewport: Option<Viewport>) -> GlyphResult<()> {
        if let Some(vp) = &viewport {
            vp.validate()?;
        }
        self.opts.default_viewport = viewport;
        Ok(())
    }

    /// Configured default viewport.
    pub fn default_viewport(&self) -> Option<Viewport> {
        self.opts.default_viewport
    }

    /// Change the background color.
    pub fn set_background(&mut self, color: &str) -> GlyphResult<()> {
        let background = Rgb::parse_hex(color, "background")?;
        self.background = background;
        self.opts.background = background.to_hex();
        tracing::trace!(background = %background, "set background");
        self.cache.invalidate();
        Ok(())
    }

    /// Union of every object's bounds, influence radius included.
    pub fn canvas_bounds(&self) -> Bounds {
        self.objects
            .iter()
            .fold(Bounds::ZERO, |acc, obj| acc.union(&obj.bounds()))
    }

    /// Render `viewport`, or the default viewport when `None`.
    ///
    /// Repeating a render of the same viewport with no mutation in between returns a copy of
    /// the cached result.
    #[tracing::instrument(skip(self))]
    pub fn render(&mut self, viewport: Option<Viewport>) -> GlyphResult<RenderOutput> {
        let viewport = viewport.or(self.opts.default_viewport).ok_or_else(|| {
            GlyphError::validation("render needs a viewport and no default viewport is set")
        })?;
        viewport.validate()?;

        if let Some(output) = self.cache.lookup(&viewport) {
            tracing::debug!("render cache hit");
            return Ok(output);
        }
        tracing::debug!(dirty = self.cache.is_dirty(), "render cache miss");

        let window = viewport.bounds();
        let index = LayerIndex::build(
            &self.objects,
            self.layer_effects.keys().copied(),
            Some(&window),
        );
        for slot in index.slots() {
            self.objects[slot].ensure_mask();
        }

        let output = Compositor::new(&self.objects, &index, &self.layer_effects, self.background)
            .render(&viewport);
        self.cache.store(viewport, &output);
        Ok(output)
    }

    fn slot(&self, id: &str) -> GlyphResult<usize> {
        self.slots
            .get(id)
            .copied()
            .ok_or_else(|| GlyphError::not_found(id))
    }

    fn object(&self, id: &str) -> GlyphResult<&AsciiObject> {
        let slot = self.slot(id)?;
        Ok(&self.objects[slot])
    }

    fn object_mut(&mut self, id: &str) -> GlyphResult<&mut AsciiObject> {
        let slot = self.slot(id)?;
        Ok(&mut self.objects[slot])
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/store.rs"]
mod tests;
