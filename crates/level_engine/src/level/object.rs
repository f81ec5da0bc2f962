use serde::{Deserialize, Serialize};

/// Placed level object. `object_id` is the game's object type number; the
/// ID-bearing properties live in `data`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelObject {
    pub object_id: u32,
    pub x: f32,
    pub y: f32,
    #[serde(default)]
    pub group_ids: Vec<u32>,
    pub data: ObjectData,
}

impl LevelObject {
    pub fn new(object_id: u32, data: ObjectData) -> Self {
        Self {
            object_id,
            x: 0.0,
            y: 0.0,
            group_ids: Vec::new(),
            data,
        }
    }

    pub fn with_position(mut self, x: f32, y: f32) -> Self {
        self.x = x;
        self.y = y;
        self
    }

    pub fn with_groups(mut self, group_ids: impl IntoIterator<Item = u32>) -> Self {
        self.group_ids = group_ids.into_iter().collect();
        self
    }

    pub fn tag(&self) -> ObjectTag {
        self.data.tag()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectColors {
    pub main_color_id: u32,
    pub detail_color_id: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrbKind {
    Yellow,
    Pink,
    Red,
    Blue,
    Green,
    Black,
    Dash,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PortalKind {
    GravityUp,
    GravityDown,
    Mirror,
    Size,
    Speed,
    Dual,
    Teleport,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MoveTrigger {
    pub target_group_id: u32,
    pub target_pos_group_id: u32,
    pub move_x: f32,
    pub move_y: f32,
    pub duration: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RotateTrigger {
    pub target_group_id: u32,
    pub center_group_id: u32,
    pub degrees: f32,
    pub duration: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FollowTrigger {
    pub target_group_id: u32,
    pub follow_group_id: u32,
    pub x_mod: f32,
    pub y_mod: f32,
    pub duration: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AlphaTrigger {
    pub target_group_id: u32,
    pub opacity: f32,
    pub duration: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToggleTrigger {
    pub target_group_id: u32,
    pub activate_group: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnTrigger {
    pub target_group_id: u32,
    pub delay: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StopTrigger {
    pub target_group_id: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TouchTrigger {
    pub target_group_id: u32,
    pub hold_mode: bool,
}

/// A pulse addresses either a color channel or a group, never both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PulseTarget {
    Channel(u32),
    Group(u32),
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PulseTrigger {
    pub target: PulseTarget,
    pub copied_color_id: u32,
    pub fade_in: f32,
    pub hold: f32,
    pub fade_out: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorTrigger {
    pub target_color_id: u32,
    pub copied_color_id: u32,
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    pub opacity: f32,
    pub duration: f32,
    pub blending: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PickupTrigger {
    pub item_id: u32,
    pub count: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CountComparison {
    Equals,
    Larger,
    Smaller,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstantCountTrigger {
    pub item_id: u32,
    pub target_group_id: u32,
    pub target_count: i32,
    pub activate_group: bool,
    pub comparison: CountComparison,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountTrigger {
    pub item_id: u32,
    pub target_group_id: u32,
    pub target_count: i32,
    pub activate_group: bool,
    pub multi_activate: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollisionTrigger {
    pub block_a_id: u32,
    pub block_b_id: u32,
    pub target_group_id: u32,
    pub activate_group: bool,
    pub trigger_on_exit: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollisionBlock {
    pub block_id: u32,
    pub dynamic_block: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemCounter {
    pub item_id: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ObjectData {
    General(ObjectColors),
    Orb { kind: OrbKind, colors: ObjectColors },
    Portal { kind: PortalKind, colors: ObjectColors },
    Move(MoveTrigger),
    Rotate(RotateTrigger),
    Follow(FollowTrigger),
    Alpha(AlphaTrigger),
    Toggle(ToggleTrigger),
    Spawn(SpawnTrigger),
    Stop(StopTrigger),
    Touch(TouchTrigger),
    Pulse(PulseTrigger),
    Color(ColorTrigger),
    Pickup(PickupTrigger),
    InstantCount(InstantCountTrigger),
    Count(CountTrigger),
    Collision(CollisionTrigger),
    CollisionBlock(CollisionBlock),
    ItemCounter(ItemCounter),
}

/// Field-free mirror of `ObjectData`, used as the binding table key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectTag {
    General,
    Orb,
    Portal,
    Move,
    Rotate,
    Follow,
    Alpha,
    Toggle,
    Spawn,
    Stop,
    Touch,
    Pulse,
    Color,
    Pickup,
    InstantCount,
    Count,
    Collision,
    CollisionBlock,
    ItemCounter,
}

impl ObjectTag {
    pub const ALL: [ObjectTag; 19] = [
        ObjectTag::General,
        ObjectTag::Orb,
        ObjectTag::Portal,
        ObjectTag::Move,
        ObjectTag::Rotate,
        ObjectTag::Follow,
        ObjectTag::Alpha,
        ObjectTag::Toggle,
        ObjectTag::Spawn,
        ObjectTag::Stop,
        ObjectTag::Touch,
        ObjectTag::Pulse,
        ObjectTag::Color,
        ObjectTag::Pickup,
        ObjectTag::InstantCount,
        ObjectTag::Count,
        ObjectTag::Collision,
        ObjectTag::CollisionBlock,
        ObjectTag::ItemCounter,
    ];
}

impl ObjectData {
    pub fn tag(&self) -> ObjectTag {
        match self {
            ObjectData::General(_) => ObjectTag::General,
            ObjectData::Orb { .. } => ObjectTag::Orb,
            ObjectData::Portal { .. } => ObjectTag::Portal,
            ObjectData::Move(_) => ObjectTag::Move,
            ObjectData::Rotate(_) => ObjectTag::Rotate,
            ObjectData::Follow(_) => ObjectTag::Follow,
            ObjectData::Alpha(_) => ObjectTag::Alpha,
            ObjectData::Toggle(_) => ObjectTag::Toggle,
            ObjectData::Spawn(_) => ObjectTag::Spawn,
            ObjectData::Stop(_) => ObjectTag::Stop,
            ObjectData::Touch(_) => ObjectTag::Touch,
            ObjectData::Pulse(_) => ObjectTag::Pulse,
            ObjectData::Color(_) => ObjectTag::Color,
            ObjectData::Pickup(_) => ObjectTag::Pickup,
            ObjectData::InstantCount(_) => ObjectTag::InstantCount,
            ObjectData::Count(_) => ObjectTag::Count,
            ObjectData::Collision(_) => ObjectTag::Collision,
            ObjectData::CollisionBlock(_) => ObjectTag::CollisionBlock,
            ObjectData::ItemCounter(_) => ObjectTag::ItemCounter,
        }
    }

    pub fn general(main_color_id: u32, detail_color_id: u32) -> Self {
        ObjectData::General(ObjectColors {
            main_color_id,
            detail_color_id,
        })
    }

    pub fn move_trigger(target_group_id: u32) -> Self {
        ObjectData::Move(MoveTrigger {
            target_group_id,
            target_pos_group_id: 0,
            move_x: 0.0,
            move_y: 0.0,
            duration: 0.5,
        })
    }

    pub fn color_trigger(target_color_id: u32, copied_color_id: u32) -> Self {
        ObjectData::Color(ColorTrigger {
            target_color_id,
            copied_color_id,
            red: 255,
            green: 255,
            blue: 255,
            opacity: 1.0,
            duration: 0.5,
            blending: false,
        })
    }

    pub fn instant_count_trigger(item_id: u32, target_group_id: u32) -> Self {
        ObjectData::InstantCount(InstantCountTrigger {
            item_id,
            target_group_id,
            target_count: 0,
            activate_group: false,
            comparison: CountComparison::Equals,
        })
    }

    pub fn collision_trigger(block_a_id: u32, block_b_id: u32, target_group_id: u32) -> Self {
        ObjectData::Collision(CollisionTrigger {
            block_a_id,
            block_b_id,
            target_group_id,
            activate_group: false,
            trigger_on_exit: false,
        })
    }
}
