use crate::ids::{IdKind, MAX_COLOR_CHANNEL_ID};
use crate::level::{IdBinding, Level};

use super::coupling::{check_relocations, relocate_channels};
use super::{RemapError, RemapReport};

/// One value rewrite, addressed by `at` as it was read in the snapshot.
#[derive(Debug, Clone, Copy)]
struct Rewrite<A> {
    at: A,
    old: u32,
    new: u32,
}

/// Every write a remap call will perform, captured from one read of the level
/// before anything is written.
#[derive(Debug, Clone)]
pub(crate) struct RemapPlan {
    kind: IdKind,
    object_writes: Vec<Rewrite<IdBinding>>,
    /// Keyed by the channel's pre-relocation slot.
    pointer_writes: Vec<Rewrite<u32>>,
    relocations: Vec<(u32, u32)>,
}

impl RemapPlan {
    /// `map` returns the new value for an old one, or `None` to leave it. The
    /// unset value 0 is never offered to `map`.
    pub(crate) fn snapshot(level: &Level, kind: IdKind, map: impl Fn(u32) -> Option<u32>) -> Self {
        let remapped = |old: u32| {
            if old == 0 {
                return None;
            }
            map(old).filter(|new| *new != old)
        };

        let object_writes = level
            .id_bindings(kind)
            .into_iter()
            .filter_map(|(at, old)| remapped(old).map(|new| Rewrite { at, old, new }))
            .collect::<Vec<_>>();

        let mut pointer_writes = Vec::new();
        let mut relocations = Vec::new();
        if kind == IdKind::Color {
            for (id, channel) in level.colors().iter() {
                let old = channel.copied_color_id;
                if let Some(new) = remapped(old) {
                    pointer_writes.push(Rewrite { at: id, old, new });
                }
                if let Some(new) = remapped(id) {
                    relocations.push((id, new));
                }
            }
        }

        Self {
            kind,
            object_writes,
            pointer_writes,
            relocations,
        }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.object_writes.is_empty() && self.pointer_writes.is_empty() && self.relocations.is_empty()
    }

    fn value_changes(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        self.object_writes
            .iter()
            .map(|write| (write.old, write.new))
            .chain(self.pointer_writes.iter().map(|write| (write.old, write.new)))
            .chain(self.relocations.iter().copied())
    }

    pub(crate) fn validate(&self, level: &Level) -> Result<(), RemapError> {
        if let Some((old, _)) = self.value_changes().find(|(_, new)| *new == 0) {
            return Err(RemapError::UnsetIdTarget {
                kind: self.kind,
                old,
            });
        }
        if self.kind != IdKind::Color {
            return Ok(());
        }
        if let Some((_, value)) = self
            .value_changes()
            .find(|(_, new)| *new > MAX_COLOR_CHANNEL_ID)
        {
            return Err(RemapError::ColorIdOutOfRange { value });
        }
        check_relocations(level.colors(), &self.relocations)
    }

    /// Writes are applied against the snapshot; pointer writes address
    /// channels by their pre-relocation slot.
    pub(crate) fn apply(self, level: &mut Level) -> Result<RemapReport, RemapError> {
        let mut report = RemapReport::empty(self.kind);
        for write in &self.object_writes {
            if let Some(object) = level.objects_mut().get_mut(write.at.object_index) {
                if object.write_slot(write.at.slot, write.new) {
                    report.rewritten_values += 1;
                }
            }
        }
        for write in &self.pointer_writes {
            level.colors_mut().get_or_insert(write.at)?.copied_color_id = write.new;
            report.rewritten_pointers += 1;
        }
        report.relocated_channels = relocate_channels(level.colors_mut(), &self.relocations)?;
        Ok(report)
    }
}
