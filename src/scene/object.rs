use crate::{
    content::cell::{Cell, Content, ContentSource},
    content::{edges, mirror},
    effects::blend::ColorTransform,
    effects::influence::Influence,
    effects::mask::{InfluenceMask, MaskValue},
    foundation::color::Rgb,
    foundation::core::{Bounds, Position},
    foundation::error::GlyphResult,
};

/// Creation parameters for a scene object.
///
/// Built with [`ObjectOptions::new`] and the chained setters, or deserialized from a UI layer.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ObjectOptions {
    /// Content in any accepted shape.
    pub content: ContentSource,
    /// World position of the content's top-left cell.
    #[serde(default)]
    pub position: Position,
    /// `#rrggbb` color; black when omitted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Layer; higher layers occlude lower ones.
    #[serde(default)]
    pub layer: i32,
    /// Optional proximity effect.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub influence: Option<Influence>,
    /// Make border-reachable spaces transparent.
    #[serde(default)]
    pub auto_detect_edges: bool,
    /// Remap directional glyphs whenever the object is flipped.
    #[serde(default)]
    pub mirror_glyphs: bool,
}

impl ObjectOptions {
    /// Options for `content` at the origin on layer 0.
    pub fn new(content: impl Into<ContentSource>) -> Self {
        Self {
            content: content.into(),
            position: Position::default(),
            color: None,
            layer: 0,
            influence: None,
            auto_detect_edges: false,
            mirror_glyphs: false,
        }
    }

    /// Set the position.
    pub fn at(mut self, x: i32, y: i32) -> Self {
        self.position = Position::new(x, y);
        self
    }

    /// Set the color.
    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Set the layer.
    pub fn layer(mut self, layer: i32) -> Self {
        self.layer = layer;
        self
    }

    /// Attach an influence.
    pub fn influence(mut self, influence: Influence) -> Self {
        self.influence = Some(influence);
        self
    }

    /// Enable flood-fill edge detection.
    pub fn auto_detect_edges(mut self, enabled: bool) -> Self {
        self.auto_detect_edges = enabled;
        self
    }

    /// Enable glyph mirroring on flips.
    pub fn mirror_glyphs(mut self, enabled: bool) -> Self {
        self.mirror_glyphs = enabled;
        self
    }
}

/// Owned copy of an object's state, safe to keep or mutate.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct ObjectSnapshot {
    /// Object id.
    pub id: String,
    /// Content in its current orientation.
    pub content: Vec<Vec<Cell>>,
    /// Position of the content's top-left cell.
    pub position: Position,
    /// Layer.
    pub layer: i32,
    /// Normalized `#rrggbb` color.
    pub color: String,
    /// Normalized influence, if any.
    pub influence: Option<Influence>,
    /// Horizontal flip state.
    pub flip_horizontal: bool,
    /// Vertical flip state.
    pub flip_vertical: bool,
    /// Whether edge detection runs on content changes.
    pub auto_detect_edges: bool,
    /// Whether flips mirror directional glyphs.
    pub mirror_glyphs: bool,
    /// Content box extended by the influence radius.
    pub bounds: Bounds,
}

/// What an object contributes at one world cell.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum Sample {
    /// Outside the mask, or the mask holds no effect there.
    None,
    /// Gradient strength in percent.
    Partial(f64),
    /// The object's own opaque cell.
    Full(Cell),
}

/// Scene graph node. Mutated in place; never replaced while it lives in a scene.
#[derive(Clone, Debug)]
pub(crate) struct AsciiObject {
    id: String,
    /// Normalized (and edge-detected) content before any flip.
    source: Content,
    /// `source` with the current flips applied.
    content: Content,
    position: Position,
    layer: i32,
    color: Rgb,
    influence: Option<Influence>,
    /// Full-strength influence transform, resolved against `color`.
    tint: Option<ColorTransform>,
    flip_h: bool,
    flip_v: bool,
    auto_detect_edges: bool,
    mirror_glyphs: bool,
    bounds: Bounds,
    /// `None` once invalidated; rebuilt by the next read.
    mask: Option<InfluenceMask>,
}

impl AsciiObject {
    /// Validate `opts` completely, then build the object.
    pub(crate) fn build(id: &str, opts: &ObjectOptions, transparent: char) -> GlyphResult<Self> {
        let source = prepare_content(&opts.content, transparent, opts.auto_detect_edges)?;
        let color = match opts.color.as_deref() {
            Some(c) => Rgb::parse_hex(c, &format!("color of object '{id}'"))?,
            None => Rgb::BLACK,
        };
        let influence = opts.influence.as_ref().map(Influence::validated).transpose()?;

        let mut obj = Self {
            id: id.to_owned(),
            content: source.clone(),
            source,
            position: opts.position,
            layer: opts.layer,
            color,
            tint: None,
            influence,
            flip_h: false,
            flip_v: false,
            auto_detect_edges: opts.auto_detect_edges,
            mirror_glyphs: opts.mirror_glyphs,
            bounds: Bounds::ZERO,
            mask: None,
        };
        obj.refresh_tint();
        obj.refresh_bounds();
        Ok(obj)
    }

    pub(crate) fn id(&self) -> &str {
        &self.id
    }

    pub(crate) fn layer(&self) -> i32 {
        self.layer
    }

    pub(crate) fn color(&self) -> Rgb {
        self.color
    }

    pub(crate) fn tint(&self) -> Option<ColorTransform> {
        self.tint
    }

    pub(crate) fn opaque_count(&self) -> usize {
        self.content.opaque_count()
    }

    pub(crate) fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub(crate) fn flip_state(&self) -> (bool, bool) {
        (self.flip_h, self.flip_v)
    }

    pub(crate) fn set_position(&mut self, position: Position) {
        self.position = position;
        self.refresh_bounds();
    }

    pub(crate) fn set_layer(&mut self, layer: i32) {
        self.layer = layer;
    }

    pub(crate) fn set_color(&mut self, color: Rgb) {
        self.color = color;
        self.refresh_tint();
    }

    /// Expects an influence that already passed [`Influence::validated`].
    pub(crate) fn set_influence(&mut self, influence: Option<Influence>) {
        self.influence = influence;
        self.refresh_tint();
        self.refresh_bounds();
        self.mask = None;
    }

    /// Replace the unflipped content; current flips are re-applied on top of it.
    pub(crate) fn set_content(&mut self, source: Content) {
        let mut content = source.clone();
        if self.flip_h {
            mirror::flip_horizontal(&mut content, self.mirror_glyphs);
        }
        if self.flip_v {
            mirror::flip_vertical(&mut content, self.mirror_glyphs);
        }
        self.source = source;
        self.content = content;
        self.refresh_bounds();
        self.mask = None;
    }

    pub(crate) fn auto_detect_edges(&self) -> bool {
        self.auto_detect_edges
    }

    pub(crate) fn toggle_flip_horizontal(&mut self) {
        self.flip_h = !self.flip_h;
        mirror::flip_horizontal(&mut self.content, self.mirror_glyphs);
        if let Some(mask) = self.mask.as_mut() {
            mask.flip_horizontal();
        }
    }

    pub(crate) fn toggle_flip_vertical(&mut self) {
        self.flip_v = !self.flip_v;
        mirror::flip_vertical(&mut self.content, self.mirror_glyphs);
        if let Some(mask) = self.mask.as_mut() {
            mask.flip_vertical();
        }
    }

    /// Regenerate the mask if a mutation invalidated it.
    pub(crate) fn ensure_mask(&mut self) -> &InfluenceMask {
        if self.mask.is_none() {
            tracing::debug!(id = %self.id, "regenerating influence mask");
        }
        self.mask
            .get_or_insert_with(|| InfluenceMask::generate(&self.content, self.influence.as_ref()))
    }

    /// Contribution at world cell `(x, y)`.
    ///
    /// Reads the cached mask only; callers run [`AsciiObject::ensure_mask`] first.
    pub(crate) fn sample(&self, x: i32, y: i32) -> Sample {
        if !self.bounds.contains(x, y) {
            return Sample::None;
        }
        let Some(mask) = self.mask.as_ref() else {
            return Sample::None;
        };
        let pad = mask.padding() as i64;
        let mx = i64::from(x) - i64::from(self.position.x) + pad;
        let my = i64::from(y) - i64::from(self.position.y) + pad;
        let (Ok(mx), Ok(my)) = (usize::try_from(mx), usize::try_from(my)) else {
            return Sample::None;
        };
        match mask.get(mx, my) {
            None | Some(MaskValue::NoEffect) => Sample::None,
            Some(MaskValue::Partial(pct)) => Sample::Partial(pct),
            Some(MaskValue::Full) => {
                let (col, row) = (mx - mask.padding(), my - mask.padding());
                self.content.get(col, row).map_or(Sample::None, Sample::Full)
            }
        }
    }

    /// Content cell at world `(x, y)`, ignoring the mask.
    pub(crate) fn cell_at(&self, x: i32, y: i32) -> Option<Cell> {
        let col = usize::try_from(i64::from(x) - i64::from(self.position.x)).ok()?;
        let row = usize::try_from(i64::from(y) - i64::from(self.position.y)).ok()?;
        self.content.get(col, row)
    }

    pub(crate) fn snapshot(&self) -> ObjectSnapshot {
        ObjectSnapshot {
            id: self.id.clone(),
            content: self.content.to_rows(),
            position: self.position,
            layer: self.layer,
            color: self.color.to_hex(),
            influence: self.influence.clone(),
            flip_horizontal: self.flip_h,
            flip_vertical: self.flip_v,
            auto_detect_edges: self.auto_detect_edges,
            mirror_glyphs: self.mirror_glyphs,
            bounds: self.bounds,
        }
    }

    fn refresh_tint(&mut self) {
        self.tint = self.influence.as_ref().map(|inf| inf.to_transform(self.color));
    }

    fn refresh_bounds(&mut self) {
        let r = i64::from(self.influence.as_ref().map_or(0, |inf| inf.radius));
        let clamp_i32 = |v: i64| v.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32;
        let extent = |len: usize| {
            u32::try_from((len as i64).saturating_add(2 * r)).unwrap_or(u32::MAX)
        };
        self.bounds = Bounds {
            x: clamp_i32(i64::from(self.position.x) - r),
            y: clamp_i32(i64::from(self.position.y) - r),
            width: extent(self.content.width()),
            height: extent(self.content.height()),
        };
    }
}

/// Normalize content and optionally run edge detection.
pub(crate) fn prepare_content(
    source: &ContentSource,
    transparent: char,
    auto_detect_edges: bool,
) -> GlyphResult<Content> {
    let mut content = source.normalize(transparent)?;
    if auto_detect_edges {
        edges::detect_edges(&mut content);
    }
    Ok(content)
}

#[cfg(test)]
#[path = "../../tests/unit/scene/object.rs"]
mod tests;
