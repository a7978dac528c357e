//! Viewport rendering: per-cell compositing, the whole-viewport memo and the output grids.

pub(crate) mod cache;
pub(crate) mod compositor;
/// Rendered character and color grids.
pub mod output;
