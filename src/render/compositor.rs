use std::collections::BTreeMap;

use smallvec::SmallVec;

use crate::{
    content::cell::Cell,
    effects::blend::{ColorTransform, apply_all},
    effects::influence::LayerEffect,
    foundation::color::Rgb,
    foundation::core::Viewport,
    render::output::RenderOutput,
    scene::layers::LayerIndex,
    scene::object::{AsciiObject, Sample},
};

/// Lightening, in percent, at which a cell is blanked to the scene background.
const SATURATION_PCT: f64 = 100.0;

/// Per-cell top-down layer search over an indexed object list.
///
/// Objects referenced by `index` must already have their masks built.
pub(crate) struct Compositor<'a> {
    objects: &'a [AsciiObject],
    index: &'a LayerIndex,
    layer_effects: &'a BTreeMap<i32, (LayerEffect, ColorTransform)>,
    background: Rgb,
}

/// Search state for one cell.
struct CellState {
    pending: SmallVec<[ColorTransform; 8]>,
    background: Rgb,
    background_claimed: bool,
    lightening: f64,
}

impl CellState {
    fn new(background: Rgb) -> Self {
        Self {
            pending: SmallVec::new(),
            background,
            background_claimed: false,
            lightening: 0.0,
        }
    }

    /// Push a transform that counts toward saturation; true once saturated.
    fn push_counted(&mut self, transform: ColorTransform) -> bool {
        self.lightening += transform.lightening_pct();
        self.pending.push(transform);
        self.lightening >= SATURATION_PCT
    }

    fn push_pane(&mut self, transform: ColorTransform, pane_color: Rgb) {
        self.pending.push(transform);
        if !self.background_claimed {
            self.background = pane_color;
            self.background_claimed = true;
        }
    }
}

impl<'a> Compositor<'a> {
    pub(crate) fn new(
        objects: &'a [AsciiObject],
        index: &'a LayerIndex,
        layer_effects: &'a BTreeMap<i32, (LayerEffect, ColorTransform)>,
        background: Rgb,
    ) -> Self {
        Self {
            objects,
            index,
            layer_effects,
            background,
        }
    }

    pub(crate) fn render(&self, viewport: &Viewport) -> RenderOutput {
        let (w, h) = (viewport.width as usize, viewport.height as usize);
        let mut characters = Vec::with_capacity(h);
        let mut colors = Vec::with_capacity(h);

        for row in 0..h {
            let mut chars = Vec::with_capacity(w);
            let mut hexes = Vec::with_capacity(w);
            let y = offset(viewport.y, row);
            for col in 0..w {
                let (c, color) = match (offset(viewport.x, col), y) {
                    (Some(x), Some(y)) => self.resolve_cell(x, y),
                    _ => (' ', self.background),
                };
                chars.push(c);
                hexes.push(color.to_hex());
            }
            characters.push(chars);
            colors.push(hexes);
        }

        RenderOutput { characters, colors }
    }

    /// Character and color shown at world cell `(x, y)`.
    pub(crate) fn resolve_cell(&self, x: i32, y: i32) -> (char, Rgb) {
        let blank = (' ', self.background);
        let mut state = CellState::new(self.background);

        for entry in self.index.entries() {
            if let Some((_, effect)) = self.layer_effects.get(&entry.layer)
                && state.push_counted(*effect)
            {
                return blank;
            }

            for &slot in &entry.objects {
                let obj = &self.objects[slot];
                match obj.sample(x, y) {
                    Sample::None | Sample::Full(Cell::Transparent) => {}
                    Sample::Full(Cell::Glyph(c)) => {
                        return (c, apply_all(&state.pending, obj.color()));
                    }
                    Sample::Full(Cell::Space) => match obj.tint() {
                        Some(tint) => state.push_pane(tint, obj.color()),
                        None => return (' ', apply_all(&state.pending, obj.color())),
                    },
                    Sample::Partial(pct) => {
                        let Some(tint) = obj.tint() else { continue };
                        if state.push_counted(tint.with_strength(pct / 100.0)) {
                            return blank;
                        }
                    }
                }
            }
        }

        (' ', apply_all(&state.pending, state.background))
    }
}

fn offset(origin: i32, delta: usize) -> Option<i32> {
    i32::try_from(i64::from(origin) + delta as i64).ok()
}

#[cfg(test)]
#[path = "../../tests/unit/render/compositor.rs"]
mod tests;
