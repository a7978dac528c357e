//! Scene graph: object nodes, the layer index and the mutable object store.

pub(crate) mod layers;
/// Object creation options, snapshots and the scene node.
pub mod object;
/// The scene store and its configuration.
pub mod store;
