use crate::foundation::error::{GlyphError, GlyphResult};

/// Integer anchor in world cell coordinates. Any sign is allowed.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct Position {
    /// Column of the content's top-left cell.
    pub x: i32,
    /// Row of the content's top-left cell.
    pub y: i32,
}

impl Position {
    /// Create a position.
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Rectangular window of world cells to render.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Viewport {
    /// Left column.
    pub x: i32,
    /// Top row.
    pub y: i32,
    /// Width in cells, must be > 0.
    pub width: u32,
    /// Height in cells, must be > 0.
    pub height: u32,
}

impl Viewport {
    /// Create a viewport without validating it.
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Reject zero-sized viewports.
    pub fn validate(&self) -> GlyphResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(GlyphError::validation(format!(
                "viewport width/height must be > 0 (got {}x{})",
                self.width, self.height
            )));
        }
        Ok(())
    }

    /// The viewport as a [`Bounds`] box.
    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.x, self.y, self.width, self.height)
    }
}

/// Axis-aligned box in world cell coordinates.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct Bounds {
    /// Left column.
    pub x: i32,
    /// Top row.
    pub y: i32,
    /// Width in cells.
    pub width: u32,
    /// Height in cells.
    pub height: u32,
}

impl Bounds {
    /// Degenerate box reported for an empty scene.
    pub const ZERO: Self = Self {
        x: 0,
        y: 0,
        width: 0,
        height: 0,
    };

    /// Create a box.
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Return `true` when the box covers no cells.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Exclusive right edge.
    pub fn right(&self) -> i64 {
        i64::from(self.x) + i64::from(self.width)
    }

    /// Exclusive bottom edge.
    pub fn bottom(&self) -> i64 {
        i64::from(self.y) + i64::from(self.height)
    }

    /// Return `true` when world cell `(x, y)` lies inside the box.
    pub fn contains(&self, x: i32, y: i32) -> bool {
        i64::from(x) >= i64::from(self.x)
            && i64::from(x) < self.right()
            && i64::from(y) >= i64::from(self.y)
            && i64::from(y) < self.bottom()
    }

    /// Return `true` when both boxes share at least one cell.
    pub fn intersects(&self, other: &Bounds) -> bool {
        if self.is_empty() || other.is_empty() {
            return false;
        }
        i64::from(self.x) < other.right()
            && i64::from(other.x) < self.right()
            && i64::from(self.y) < other.bottom()
            && i64::from(other.y) < self.bottom()
    }

    /// Smallest box containing both inputs. Empty boxes are ignored.
    pub fn union(&self, other: &Bounds) -> Bounds {
        if self.is_empty() {
            return *other;
        }
        if other.is_empty() {
            return *self;
        }
        let x0 = self.x.min(other.x);
        let y0 = self.y.min(other.y);
        let x1 = self.right().max(other.right());
        let y1 = self.bottom().max(other.bottom());
        Bounds {
            x: x0,
            y: y0,
            width: span(i64::from(x0), x1),
            height: span(i64::from(y0), y1),
        }
    }
}

fn span(start: i64, end: i64) -> u32 {
    u32::try_from(end - start).unwrap_or(u32::MAX)
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
