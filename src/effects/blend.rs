use crate::{effects::influence::TransformKind, foundation::color::Rgb};

/// Darken factor used by multiply-darken when none is configured.
pub const DEFAULT_DARKEN_FACTOR: f64 = 0.5;

/// A resolved color transform: kind, target color and strength.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct ColorTransform {
    pub(crate) kind: TransformKind,
    pub(crate) target: Rgb,
    pub(crate) strength: f64,
    pub(crate) darken_factor: f64,
}

impl ColorTransform {
    /// Same transform at another strength, e.g. a gradient value read from a mask.
    pub(crate) fn with_strength(self, strength: f64) -> Self {
        Self {
            strength: strength.clamp(0.0, 1.0),
            ..self
        }
    }

    /// Signed contribution, in percent, to the compositor's lightening accumulator.
    pub(crate) fn lightening_pct(&self) -> f64 {
        match self.kind {
            TransformKind::Lighten => self.strength * 100.0,
            TransformKind::Darken => -self.strength * 100.0,
            TransformKind::Multiply | TransformKind::MultiplyDarken => 0.0,
        }
    }

    pub(crate) fn apply(&self, color: Rgb) -> Rgb {
        let s = self.strength.clamp(0.0, 1.0);
        if s <= 0.0 {
            return color;
        }
        let c = color.channels();
        let t = self.target.channels();

        let mut out = [0.0f64; 3];
        match self.kind {
            TransformKind::Lighten | TransformKind::Darken => {
                for i in 0..3 {
                    out[i] = lerp(c[i], t[i], s);
                }
            }
            TransformKind::Multiply => {
                for i in 0..3 {
                    out[i] = lerp(c[i], c[i] * t[i] / 255.0, s);
                }
            }
            TransformKind::MultiplyDarken => {
                let keep = 1.0 - self.darken_factor.clamp(0.0, 1.0) * s;
                for i in 0..3 {
                    out[i] = lerp(c[i], c[i] * t[i] / 255.0, s) * keep;
                }
            }
        }
        Rgb::from_f64(out[0], out[1], out[2])
    }
}

/// Apply pending transforms to `base`, nearest first.
///
/// `pending` is ordered top-down as the compositor collected it, so the last entry sits
/// closest to the content and is applied first.
pub(crate) fn apply_all(pending: &[ColorTransform], base: Rgb) -> Rgb {
    pending.iter().rev().fold(base, |color, t| t.apply(color))
}

fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

#[cfg(test)]
#[path = "../../tests/unit/effects/blend.rs"]
mod tests;
