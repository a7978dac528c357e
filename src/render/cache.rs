use crate::{foundation::core::Viewport, render::output::RenderOutput};

/// Whole-viewport memo of the last render.
///
/// Any scene mutation marks the cache dirty; a clean cache answers only for the exact
/// viewport it stored. Lookups and stores always copy, so callers never share cache state.
#[derive(Debug, Default)]
pub(crate) struct RenderCache {
    dirty: bool,
    last: Option<(Viewport, RenderOutput)>,
}

impl RenderCache {
    pub(crate) fn invalidate(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub(crate) fn lookup(&self, viewport: &Viewport) -> Option<RenderOutput> {
        if self.dirty {
            return None;
        }
        match &self.last {
            Some((cached, output)) if cached == viewport => Some(output.clone()),
            _ => None,
        }
    }

    pub(crate) fn store(&mut self, viewport: Viewport, output: &RenderOutput) {
        self.last = Some((viewport, output.clone()));
        self.dirty = false;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/cache.rs"]
mod tests;
