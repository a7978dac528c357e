use std::cmp::Reverse;
use std::collections::BTreeMap;

use crate::{foundation::core::Bounds, scene::object::AsciiObject};

/// One layer of the index: its number and member object slots in insertion order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct LayerEntry {
    pub(crate) layer: i32,
    pub(crate) objects: Vec<usize>,
}

/// Distinct layers, highest first, with per-layer membership.
///
/// Rebuilt for every render pass so compositing never rescans the object list per cell.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct LayerIndex {
    entries: Vec<LayerEntry>,
}

impl LayerIndex {
    /// Index `objects` (slots are positions in the slice).
    ///
    /// `effect_layers` are visited even when no object lives on them. When `window` is given,
    /// objects whose bounds miss it are left out.
    pub(crate) fn build(
        objects: &[AsciiObject],
        effect_layers: impl IntoIterator<Item = i32>,
        window: Option<&Bounds>,
    ) -> Self {
        let mut by_layer: BTreeMap<Reverse<i32>, Vec<usize>> = BTreeMap::new();
        for layer in effect_layers {
            by_layer.entry(Reverse(layer)).or_default();
        }
        for (slot, obj) in objects.iter().enumerate() {
            if window.is_some_and(|w| !obj.bounds().intersects(w)) {
                continue;
            }
            by_layer.entry(Reverse(obj.layer())).or_default().push(slot);
        }

        Self {
            entries: by_layer
                .into_iter()
                .map(|(Reverse(layer), objects)| LayerEntry { layer, objects })
                .collect(),
        }
    }

    pub(crate) fn entries(&self) -> &[LayerEntry] {
        &self.entries
    }

    /// Layer numbers, highest first.
    pub(crate) fn layers(&self) -> Vec<i32> {
        self.entries.iter().map(|e| e.layer).collect()
    }

    /// Every indexed slot, highest layer first.
    pub(crate) fn slots(&self) -> impl Iterator<Item = usize> + '_ {
        self.entries.iter().flat_map(|e| e.objects.iter().copied())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/layers.rs"]
mod tests;
