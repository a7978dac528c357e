//! glyphcomp is a layered compositing engine for ASCII art.
//!
//! A [`Scene`] holds rectangular character grids ("objects") placed on integer layers. Rendering
//! a [`Viewport`] resolves every cell by searching the layers top-down:
//!
//! - transparent cells reveal whatever lies below,
//! - glyphs and plain spaces claim the cell,
//! - spaces carrying an [`Influence`] act as glass panes that tint what is beneath them,
//! - influence gradients spread a color transform around an object with a distance falloff,
//! - layer effects tint everything on and below their layer.
//!
//! Objects can be flipped (optionally mirroring directional glyphs such as `/` or `┐`),
//! recolored, moved and re-layered in place. The last render is memoized per viewport and any
//! mutation invalidates it.
//!
//! ```
//! use glyphcomp::{ObjectOptions, Scene, Viewport};
//!
//! let mut scene = Scene::new();
//! scene.add_object("a", ObjectOptions::new("A").color("#ff0000"))?;
//! scene.add_object("b", ObjectOptions::new("B").color("#00ff00").layer(1))?;
//! let out = scene.render(Some(Viewport::new(0, 0, 1, 1)))?;
//! assert_eq!(out.cell(0, 0), Some(('B', "#00ff00")));
//! # Ok::<(), glyphcomp::GlyphError>(())
//! ```
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod content;
mod effects;
mod foundation;
mod render;
mod scene;

pub use crate::content::cell::{Cell, Content, ContentSource, DEFAULT_TRANSPARENT_CHAR};
pub use crate::content::edges::detect_edges;
pub use crate::content::mirror::{
    flip_horizontal, flip_vertical, mirror_horizontal, mirror_vertical,
};
pub use crate::effects::blend::DEFAULT_DARKEN_FACTOR;
pub use crate::effects::influence::{
    Falloff, Influence, InfluenceTransform, LayerEffect, MAX_INFLUENCE_RADIUS, TransformKind,
};
pub use crate::effects::mask::{InfluenceMask, MaskValue};
pub use crate::foundation::color::{Rgb, normalize_hex};
pub use crate::foundation::core::{Bounds, Position, Viewport};
pub use crate::foundation::error::{GlyphError, GlyphResult};
pub use crate::render::output::RenderOutput;
pub use crate::scene::object::{ObjectOptions, ObjectSnapshot};
pub use crate::scene::store::{Scene, SceneOpts};
