use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ids::MAX_COLOR_CHANNEL_ID;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerColor {
    #[default]
    None,
    Player1,
    Player2,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HsvAdjustment {
    pub hue: f32,
    pub saturation: f32,
    pub brightness: f32,
    pub saturation_additive: bool,
    pub brightness_additive: bool,
}

impl Default for HsvAdjustment {
    fn default() -> Self {
        Self {
            hue: 0.0,
            saturation: 1.0,
            brightness: 1.0,
            saturation_additive: false,
            brightness_additive: false,
        }
    }
}

/// Rendering parameters for one color ID. `copied_color_id` is 0 or the ID of
/// another channel in the same table; copy chains may form cycles.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorChannel {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    pub opacity: f32,
    pub blending: bool,
    #[serde(default)]
    pub player_color: PlayerColor,
    #[serde(default)]
    pub copied_color_id: u32,
    #[serde(default)]
    pub copied_hsv: HsvAdjustment,
    #[serde(default)]
    pub copy_opacity: bool,
}

impl Default for ColorChannel {
    fn default() -> Self {
        Self {
            red: 255,
            green: 255,
            blue: 255,
            opacity: 1.0,
            blending: false,
            player_color: PlayerColor::None,
            copied_color_id: 0,
            copied_hsv: HsvAdjustment::default(),
            copy_opacity: false,
        }
    }
}

impl ColorChannel {
    pub fn rgb(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red,
            green,
            blue,
            ..Self::default()
        }
    }

    pub fn copying(copied_color_id: u32) -> Self {
        Self {
            copied_color_id,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ColorChannelError {
    #[error("color channel id {id} is outside 1..={max}", max = MAX_COLOR_CHANNEL_ID)]
    OutOfRange { id: u32 },
}

/// Fixed table of `MAX_COLOR_CHANNEL_ID` slots. Slots start unset; reads of an
/// unset slot see `ColorChannel::default()` and only `get_or_insert` and
/// `insert` materialize one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    try_from = "BTreeMap<u32, ColorChannel>",
    into = "BTreeMap<u32, ColorChannel>"
)]
pub struct ColorChannelTable {
    slots: Vec<Option<ColorChannel>>,
}

impl Default for ColorChannelTable {
    fn default() -> Self {
        Self {
            slots: vec![None; MAX_COLOR_CHANNEL_ID as usize],
        }
    }
}

pub(crate) fn slot_index(id: u32) -> Result<usize, ColorChannelError> {
    if id == 0 || id > MAX_COLOR_CHANNEL_ID {
        return Err(ColorChannelError::OutOfRange { id });
    }
    Ok((id - 1) as usize)
}

impl ColorChannelTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Materialized channel at `id`, if any. Out-of-range IDs read as unset.
    pub fn get(&self, id: u32) -> Option<&ColorChannel> {
        let index = slot_index(id).ok()?;
        self.slots[index].as_ref()
    }

    /// Channel value at `id`, falling back to the default for unset slots
    /// without materializing them.
    pub fn channel(&self, id: u32) -> Result<ColorChannel, ColorChannelError> {
        let index = slot_index(id)?;
        Ok(self.slots[index].unwrap_or_default())
    }

    pub fn get_or_insert(&mut self, id: u32) -> Result<&mut ColorChannel, ColorChannelError> {
        let index = slot_index(id)?;
        Ok(self.slots[index].get_or_insert_with(ColorChannel::default))
    }

    pub fn insert(
        &mut self,
        id: u32,
        channel: ColorChannel,
    ) -> Result<Option<ColorChannel>, ColorChannelError> {
        let index = slot_index(id)?;
        Ok(self.slots[index].replace(channel))
    }

    pub fn take(&mut self, id: u32) -> Result<Option<ColorChannel>, ColorChannelError> {
        let index = slot_index(id)?;
        Ok(self.slots[index].take())
    }

    pub fn is_materialized(&self, id: u32) -> bool {
        self.get(id).is_some()
    }

    pub fn materialized_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u32, &ColorChannel)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| slot.as_ref().map(|channel| (index as u32 + 1, channel)))
    }
}

impl TryFrom<BTreeMap<u32, ColorChannel>> for ColorChannelTable {
    type Error = ColorChannelError;

    fn try_from(entries: BTreeMap<u32, ColorChannel>) -> Result<Self, Self::Error> {
        let mut table = Self::default();
        for (id, channel) in entries {
            table.insert(id, channel)?;
        }
        Ok(table)
    }
}

impl From<ColorChannelTable> for BTreeMap<u32, ColorChannel> {
    fn from(table: ColorChannelTable) -> Self {
        table
            .iter()
            .map(|(id, channel)| (id, *channel))
            .collect::<BTreeMap<_, _>>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_slots_read_as_default_without_materializing() {
        let table = ColorChannelTable::new();
        assert_eq!(table.channel(7).expect("in range"), ColorChannel::default());
        assert!(table.get(7).is_none());
        assert_eq!(table.materialized_count(), 0);
    }

    #[test]
    fn get_or_insert_materializes_once() {
        let mut table = ColorChannelTable::new();
        table.get_or_insert(12).expect("in range").red = 10;
        table.get_or_insert(12).expect("in range").green = 20;
        let channel = table.get(12).expect("materialized");
        assert_eq!((channel.red, channel.green, channel.blue), (10, 20, 255));
        assert_eq!(table.materialized_count(), 1);
    }

    #[test]
    fn ids_are_one_indexed_and_bounded() {
        let mut table = ColorChannelTable::new();
        assert_eq!(
            table.get_or_insert(0).map(|_| ()),
            Err(ColorChannelError::OutOfRange { id: 0 })
        );
        assert!(table.insert(MAX_COLOR_CHANNEL_ID, ColorChannel::default()).is_ok());
        assert_eq!(
            table.insert(MAX_COLOR_CHANNEL_ID + 1, ColorChannel::default()),
            Err(ColorChannelError::OutOfRange {
                id: MAX_COLOR_CHANNEL_ID + 1
            })
        );
        assert!(table.get(MAX_COLOR_CHANNEL_ID + 1).is_none());
    }

    #[test]
    fn iter_reports_ids_in_ascending_order() {
        let mut table = ColorChannelTable::new();
        for id in [40, 3, 1000] {
            table.insert(id, ColorChannel::copying(id)).expect("insert");
        }
        let ids = table.iter().map(|(id, _)| id).collect::<Vec<_>>();
        assert_eq!(ids, vec![3, 40, 1000]);
    }

    #[test]
    fn json_keeps_only_materialized_slots() {
        let mut table = ColorChannelTable::new();
        table.insert(5, ColorChannel::rgb(1, 2, 3)).expect("insert");
        let json = serde_json::to_string(&table).expect("encode");
        let decoded = serde_json::from_str::<ColorChannelTable>(&json).expect("decode");
        assert_eq!(decoded, table);
        assert_eq!(decoded.materialized_count(), 1);

        let bad = serde_json::from_str::<ColorChannelTable>(r#"{"5001":{"red":0,"green":0,"blue":0,"opacity":1.0,"blending":false}}"#);
        assert!(bad.is_err());
    }
}
