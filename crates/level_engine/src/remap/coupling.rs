use std::collections::{HashMap, HashSet};

use crate::level::{slot_index, ColorChannelTable};

use super::RemapError;

/// Rejects a batch of `(old, new)` channel moves that would overwrite a
/// channel staying in place, or land two channels in one slot.
pub(crate) fn check_relocations(
    table: &ColorChannelTable,
    moves: &[(u32, u32)],
) -> Result<(), RemapError> {
    let moving = moves.iter().map(|(old, _)| *old).collect::<HashSet<_>>();
    let mut claimed = HashMap::<u32, u32>::with_capacity(moves.len());
    for (old, new) in moves {
        slot_index(*old)?;
        slot_index(*new)?;
        if let Some(first_source) = claimed.insert(*new, *old) {
            return Err(RemapError::DuplicateChannelTarget {
                first_source,
                second_source: *old,
                target_id: *new,
            });
        }
        if table.is_materialized(*new) && !moving.contains(new) {
            return Err(RemapError::ChannelCollision {
                source_id: *old,
                target_id: *new,
            });
        }
    }
    Ok(())
}

/// Moves every channel out of its old slot before placing any of them, so
/// chains and swaps inside one batch resolve independently of order.
pub(crate) fn relocate_channels(
    table: &mut ColorChannelTable,
    moves: &[(u32, u32)],
) -> Result<usize, RemapError> {
    let mut lifted = Vec::with_capacity(moves.len());
    for (old, new) in moves {
        if let Some(channel) = table.take(*old)? {
            lifted.push((*new, channel));
        }
    }
    let relocated = lifted.len();
    for (new, channel) in lifted {
        table.insert(new, channel)?;
    }
    Ok(relocated)
}

impl ColorChannelTable {
    /// Moves the channel at `old_id` to `new_id`, leaving `old_id` unset.
    /// Copy pointers elsewhere in the table are not rewritten; use
    /// `Level::perform_color_id_migration` for that.
    pub fn relocate_channel(&mut self, old_id: u32, new_id: u32) -> Result<bool, RemapError> {
        if old_id == new_id {
            slot_index(old_id)?;
            return Ok(self.is_materialized(old_id));
        }
        let moves = [(old_id, new_id)];
        check_relocations(self, &moves)?;
        Ok(relocate_channels(self, &moves)? == 1)
    }
}
