mod bindings;
mod color;
mod object;

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::ids::IdKind;

pub use bindings::{binding_descriptors, resolve_bindings, BindingDescriptor, IdBinding, IdField, IdSlot};
pub(crate) use color::slot_index;
pub use color::{ColorChannel, ColorChannelError, ColorChannelTable, HsvAdjustment, PlayerColor};
pub use object::{
    AlphaTrigger, CollisionBlock, CollisionTrigger, ColorTrigger, CountComparison, CountTrigger,
    FollowTrigger, InstantCountTrigger, ItemCounter, LevelObject, MoveTrigger, ObjectColors,
    ObjectData, ObjectTag, OrbKind, PickupTrigger, PortalKind, PulseTarget, PulseTrigger,
    RotateTrigger, SpawnTrigger, StopTrigger, ToggleTrigger, TouchTrigger,
};

/// In-memory level: the placed objects plus the color channel table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Level {
    pub name: String,
    objects: Vec<LevelObject>,
    #[serde(default)]
    colors: ColorChannelTable,
}

impl Level {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn objects(&self) -> &[LevelObject] {
        &self.objects
    }

    pub fn objects_mut(&mut self) -> &mut [LevelObject] {
        &mut self.objects
    }

    pub fn add_object(&mut self, object: LevelObject) -> usize {
        self.objects.push(object);
        self.objects.len() - 1
    }

    pub fn add_objects(&mut self, objects: impl IntoIterator<Item = LevelObject>) {
        self.objects.extend(objects);
    }

    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    pub fn colors(&self) -> &ColorChannelTable {
        &self.colors
    }

    pub fn colors_mut(&mut self) -> &mut ColorChannelTable {
        &mut self.colors
    }

    /// Object bindings of `kind`, each with its current value.
    pub fn id_bindings(&self, kind: IdKind) -> Vec<(IdBinding, u32)> {
        resolve_bindings(&self.objects, kind)
    }

    /// Distinct non-zero IDs of `kind` referenced anywhere in the level. For
    /// colors this includes materialized channel slots and their copy pointers.
    pub fn used_ids(&self, kind: IdKind) -> BTreeSet<u32> {
        let mut used = self
            .id_bindings(kind)
            .into_iter()
            .map(|(_, value)| value)
            .filter(|value| *value > 0)
            .collect::<BTreeSet<_>>();
        if kind == IdKind::Color {
            for (id, channel) in self.colors.iter() {
                used.insert(id);
                if channel.copied_color_id > 0 {
                    used.insert(channel.copied_color_id);
                }
            }
        }
        used
    }

    /// Smallest ID `>= 1` of `kind` that nothing references.
    pub fn first_unused_id(&self, kind: IdKind) -> u32 {
        let used = self.used_ids(kind);
        let mut candidate = 1;
        for id in used {
            if id > candidate {
                break;
            }
            if id == candidate {
                candidate += 1;
            }
        }
        candidate
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_level() -> Level {
        let mut level = Level::new("sample");
        level.add_objects([
            LevelObject::new(1, ObjectData::general(3, 0)).with_groups([1, 2]),
            LevelObject::new(901, ObjectData::move_trigger(4)),
            LevelObject::new(1616, ObjectData::instant_count_trigger(9, 0)),
        ]);
        level
            .colors_mut()
            .insert(8, ColorChannel::copying(1))
            .expect("insert");
        level
    }

    #[test]
    fn used_ids_skip_unset_values() {
        let level = sample_level();
        assert_eq!(level.used_ids(IdKind::Group), BTreeSet::from([1, 2, 4]));
        assert_eq!(level.used_ids(IdKind::Item), BTreeSet::from([9]));
        assert!(level.used_ids(IdKind::Block).is_empty());
    }

    #[test]
    fn used_color_ids_include_channel_slots_and_copy_pointers() {
        let level = sample_level();
        assert_eq!(level.used_ids(IdKind::Color), BTreeSet::from([1, 3, 8]));
    }

    #[test]
    fn first_unused_id_fills_gaps() {
        let level = sample_level();
        assert_eq!(level.first_unused_id(IdKind::Group), 3);
        assert_eq!(level.first_unused_id(IdKind::Color), 2);
        assert_eq!(level.first_unused_id(IdKind::Block), 1);
    }
}
