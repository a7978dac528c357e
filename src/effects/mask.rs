use crate::{content::cell::Content, effects::influence::Influence};

/// Strength of an object's effect on one cell of its (padded) mask.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MaskValue {
    /// The object does not touch this cell.
    NoEffect,
    /// Gradient strength in percent, `0.0..=100.0`.
    Partial(f64),
    /// The object's own opaque content covers this cell.
    Full,
}

/// Padded per-object gradient grid.
///
/// The mask is `radius` cells larger than the content on every side; mask cell
/// `(radius, radius)` lines up with content cell `(0, 0)`.
#[derive(Clone, Debug, PartialEq)]
pub struct InfluenceMask {
    width: usize,
    height: usize,
    padding: usize,
    values: Vec<MaskValue>,
}

impl InfluenceMask {
    /// Build the mask for `content` under an optional influence.
    ///
    /// Without influence the mask is unpadded: `Full` on opaque cells and `NoEffect`
    /// elsewhere. With influence, every cell within `radius` of an opaque cell takes the
    /// strongest falloff contribution among those cells.
    pub fn generate(content: &Content, influence: Option<&Influence>) -> Self {
        let padding = influence.map_or(0, |inf| inf.radius as usize);
        let width = content.width() + 2 * padding;
        let height = content.height() + 2 * padding;
        let mut values = vec![MaskValue::NoEffect; width * height];

        for (row, cells) in content.rows().enumerate() {
            for (col, cell) in cells.iter().enumerate() {
                if cell.is_opaque() {
                    values[(row + padding) * width + col + padding] = MaskValue::Full;
                }
            }
        }

        let Some(influence) = influence else {
            return Self {
                width,
                height,
                padding,
                values,
            };
        };

        let kernel = GradientKernel::new(influence);
        for (row, cells) in content.rows().enumerate() {
            for (col, cell) in cells.iter().enumerate() {
                if !cell.is_opaque() {
                    continue;
                }
                // Mask coordinates of this content cell are (col + r, row + r), so the kernel
                // window starts at (col, row).
                for ky in 0..kernel.side {
                    let base = (row + ky) * width + col;
                    for kx in 0..kernel.side {
                        let Some(pct) = kernel.weights[ky * kernel.side + kx] else {
                            continue;
                        };
                        let slot = &mut values[base + kx];
                        *slot = match *slot {
                            MaskValue::Full => MaskValue::Full,
                            MaskValue::Partial(prev) if prev >= pct => MaskValue::Partial(prev),
                            MaskValue::Partial(_) | MaskValue::NoEffect => MaskValue::Partial(pct),
                        };
                    }
                }
            }
        }

        Self {
            width,
            height,
            padding,
            values,
        }
    }

    /// Mask width in cells (content width plus padding on both sides).
    pub fn width(&self) -> usize {
        self.width
    }

    /// Mask height in cells (content height plus padding on both sides).
    pub fn height(&self) -> usize {
        self.height
    }

    /// Padding on each side, equal to the influence radius (0 without influence).
    pub fn padding(&self) -> usize {
        self.padding
    }

    /// Value at mask cell `(col, row)`, or `None` outside the mask.
    pub fn get(&self, col: usize, row: usize) -> Option<MaskValue> {
        if col >= self.width || row >= self.height {
            return None;
        }
        self.values.get(row * self.width + col).copied()
    }

    /// Mirror the mask left-right in place.
    pub(crate) fn flip_horizontal(&mut self) {
        for row in self.values.chunks_exact_mut(self.width) {
            row.reverse();
        }
    }

    /// Mirror the mask top-bottom in place.
    pub(crate) fn flip_vertical(&mut self) {
        let (w, h) = (self.width, self.height);
        for row in 0..h / 2 {
            let other = h - 1 - row;
            for col in 0..w {
                self.values.swap(row * w + col, other * w + col);
            }
        }
    }
}

/// Precomputed gradient weights (in percent) over a `(2r + 1)^2` window centered on a
/// content cell; `None` past the radius and at the center.
struct GradientKernel {
    side: usize,
    weights: Vec<Option<f64>>,
}

impl GradientKernel {
    fn new(influence: &Influence) -> Self {
        let radius = influence.radius as usize;
        let side = 2 * radius + 1;
        let r = f64::from(influence.radius);
        let scale = influence.transform.strength * 100.0;
        let falloff = influence.transform.falloff;

        let mut weights = Vec::with_capacity(side * side);
        for ky in 0..side {
            for kx in 0..side {
                let dx = kx as f64 - r;
                let dy = ky as f64 - r;
                let d = (dx * dx + dy * dy).sqrt();
                if d == 0.0 || d > r {
                    weights.push(None);
                } else {
                    weights.push(Some((falloff.weight(d, r) * scale).clamp(0.0, 100.0)));
                }
            }
        }

        Self { side, weights }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/mask.rs"]
mod tests;
