use crate::{
    effects::blend::{ColorTransform, DEFAULT_DARKEN_FACTOR},
    foundation::color::{Rgb, normalize_hex},
    foundation::error::{GlyphError, GlyphResult},
};

/// Closed set of color transform kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TransformKind {
    /// Interpolate toward the target (white unless overridden).
    Lighten,
    /// Interpolate toward the target (black unless overridden).
    Darken,
    /// Per-channel multiply with the target.
    Multiply,
    /// Multiply, then darken uniformly by a darken factor.
    MultiplyDarken,
}

impl TransformKind {
    /// Target used when a descriptor carries no override color.
    ///
    /// Multiply kinds tint with the color of whatever owns the transform.
    pub fn default_target(self, owner: Rgb) -> Rgb {
        match self {
            TransformKind::Lighten => Rgb::WHITE,
            TransformKind::Darken => Rgb::BLACK,
            TransformKind::Multiply | TransformKind::MultiplyDarken => owner,
        }
    }
}

/// Distance falloff curve for influence gradients.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum Falloff {
    /// `1 - d/r`
    #[default]
    Linear,
    /// `1 - (d/r)^2`
    Quadratic,
    /// `e^(-3 d/r)`
    Exponential,
    /// `1 - (d/r)^3`
    Cubic,
}

impl Falloff {
    /// Weight in `[0, 1]` at `distance` cells for an influence of `radius` cells.
    ///
    /// Distances beyond the radius weigh nothing.
    pub fn weight(self, distance: f64, radius: f64) -> f64 {
        if radius <= 0.0 || distance > radius {
            return 0.0;
        }
        let t = (distance / radius).max(0.0);
        let w = match self {
            Falloff::Linear => 1.0 - t,
            Falloff::Quadratic => 1.0 - t * t,
            Falloff::Exponential => (-3.0 * t).exp(),
            Falloff::Cubic => 1.0 - t * t * t,
        };
        w.clamp(0.0, 1.0)
    }
}

/// Transform half of an influence descriptor.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct InfluenceTransform {
    /// Transform kind.
    pub kind: TransformKind,
    /// Strength in `[0, 1]`.
    pub strength: f64,
    /// Distance falloff curve.
    #[serde(default)]
    pub falloff: Falloff,
    /// Extra darkening, only valid for [`TransformKind::MultiplyDarken`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub darken_factor: Option<f64>,
}

impl InfluenceTransform {
    /// Create a transform with linear falloff and no darken factor.
    pub fn new(kind: TransformKind, strength: f64) -> Self {
        Self {
            kind,
            strength,
            falloff: Falloff::Linear,
            darken_factor: None,
        }
    }

    /// Replace the falloff curve.
    pub fn with_falloff(mut self, falloff: Falloff) -> Self {
        self.falloff = falloff;
        self
    }

    /// Set the darken factor (multiply-darken only).
    pub fn with_darken_factor(mut self, darken_factor: f64) -> Self {
        self.darken_factor = Some(darken_factor);
        self
    }
}

/// Largest accepted influence radius, in cells.
///
/// Masks are padded by the radius on every side, so this caps per-object mask memory.
pub const MAX_INFLUENCE_RADIUS: u32 = 256;

/// Proximity effect an object projects onto the layers below it.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Influence {
    /// Reach in cells, within `1..=MAX_INFLUENCE_RADIUS`.
    pub radius: u32,
    /// Override target color (`#rrggbb`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// How the influence changes colors underneath.
    pub transform: InfluenceTransform,
}

impl Influence {
    /// Create an influence without an override color.
    pub fn new(radius: u32, transform: InfluenceTransform) -> Self {
        Self {
            radius,
            color: None,
            transform,
        }
    }

    /// Set the override target color.
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Validate every field and return a copy with the color normalized.
    pub fn validated(&self) -> GlyphResult<Self> {
        if self.radius == 0 {
            return Err(GlyphError::validation(
                "influence.radius must be a positive integer",
            ));
        }
        if self.radius > MAX_INFLUENCE_RADIUS {
            return Err(GlyphError::validation(format!(
                "influence.radius must be at most {MAX_INFLUENCE_RADIUS} (got {})",
                self.radius
            )));
        }
        validate_strength(self.transform.strength, "influence.transform.strength")?;
        validate_darken_factor(
            self.transform.kind,
            self.transform.darken_factor,
            "influence.transform.darken_factor",
        )?;
        let color = self
            .color
            .as_deref()
            .map(|c| normalize_hex(c, "influence.color"))
            .transpose()?;
        Ok(Self {
            radius: self.radius,
            color,
            transform: self.transform,
        })
    }

    /// Full-strength transform for an object colored `owner`.
    ///
    /// Expects a descriptor that already passed [`Influence::validated`].
    pub(crate) fn to_transform(&self, owner: Rgb) -> ColorTransform {
        let kind = self.transform.kind;
        let target = self
            .color
            .as_deref()
            .and_then(|c| Rgb::parse_hex(c, "influence.color").ok())
            .unwrap_or_else(|| kind.default_target(owner));
        ColorTransform {
            kind,
            target,
            strength: self.transform.strength,
            darken_factor: self.transform.darken_factor.unwrap_or(DEFAULT_DARKEN_FACTOR),
        }
    }
}

/// Uniform transform attached to a whole layer, independent of any object.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LayerEffect {
    /// Transform kind.
    pub kind: TransformKind,
    /// Strength in `[0, 1]`.
    pub strength: f64,
    /// Override target color (`#rrggbb`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Extra darkening, only valid for [`TransformKind::MultiplyDarken`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub darken_factor: Option<f64>,
}

impl LayerEffect {
    /// Create an effect without an override color.
    pub fn new(kind: TransformKind, strength: f64) -> Self {
        Self {
            kind,
            strength,
            color: None,
            darken_factor: None,
        }
    }

    /// Set the override target color.
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Set the darken factor (multiply-darken only).
    pub fn with_darken_factor(mut self, darken_factor: f64) -> Self {
        self.darken_factor = Some(darken_factor);
        self
    }

    /// Validate every field and resolve the transform applied while compositing.
    ///
    /// Layer effects have no owner color, so multiply-darken defaults to a white target and
    /// plain multiply, which would be a no-op against white, requires an override color.
    pub(crate) fn resolve(&self) -> GlyphResult<(LayerEffect, ColorTransform)> {
        validate_strength(self.strength, "layer_effect.strength")?;
        if self.kind == TransformKind::Multiply && self.color.is_none() {
            return Err(GlyphError::validation(
                "layer_effect.color is required for multiply layer effects",
            ));
        }
        validate_darken_factor(self.kind, self.darken_factor, "layer_effect.darken_factor")?;
        let target = match self.color.as_deref() {
            Some(c) => Rgb::parse_hex(c, "layer_effect.color")?,
            None => self.kind.default_target(Rgb::WHITE),
        };
        let normalized = LayerEffect {
            color: self.color.as_ref().map(|_| target.to_hex()),
            ..self.clone()
        };
        let transform = ColorTransform {
            kind: self.kind,
            target,
            strength: self.strength,
            darken_factor: self.darken_factor.unwrap_or(DEFAULT_DARKEN_FACTOR),
        };
        Ok((normalized, transform))
    }
}

fn validate_strength(strength: f64, field: &str) -> GlyphResult<()> {
    if !strength.is_finite() || !(0.0..=1.0).contains(&strength) {
        return Err(GlyphError::validation(format!(
            "{field} must be within [0, 1] (got {strength})"
        )));
    }
    Ok(())
}

fn validate_darken_factor(
    kind: TransformKind,
    darken_factor: Option<f64>,
    field: &str,
) -> GlyphResult<()> {
    let Some(df) = darken_factor else {
        return Ok(());
    };
    if kind != TransformKind::MultiplyDarken {
        return Err(GlyphError::validation(format!(
            "{field} is only valid with the multiply-darken kind (got {kind:?})"
        )));
    }
    if !df.is_finite() || !(0.0..=1.0).contains(&df) {
        return Err(GlyphError::validation(format!(
            "{field} must be within [0, 1] (got {df})"
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/effects/influence.rs"]
mod tests;
