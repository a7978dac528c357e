pub(crate) mod cell;
pub(crate) mod edges;
pub(crate) mod mirror;
