use crate::ids::{IdKind, IdRole};

use super::object::{LevelObject, ObjectData, ObjectTag, PulseTarget};

/// A single ID-valued property. Each field belongs to exactly one namespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IdField {
    TargetGroup,
    TargetPosGroup,
    CenterGroup,
    FollowGroup,
    PulseTargetGroup,
    MainColor,
    DetailColor,
    TargetColor,
    CopiedColor,
    PulseTargetColor,
    Item,
    Block,
    BlockA,
    BlockB,
}

impl IdField {
    pub fn kind(self) -> IdKind {
        match self {
            IdField::TargetGroup
            | IdField::TargetPosGroup
            | IdField::CenterGroup
            | IdField::FollowGroup
            | IdField::PulseTargetGroup => IdKind::Group,
            IdField::MainColor
            | IdField::DetailColor
            | IdField::TargetColor
            | IdField::CopiedColor
            | IdField::PulseTargetColor => IdKind::Color,
            IdField::Item => IdKind::Item,
            IdField::Block | IdField::BlockA | IdField::BlockB => IdKind::Block,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BindingDescriptor {
    pub field: IdField,
    pub role: IdRole,
}

const fn bind(field: IdField, role: IdRole) -> BindingDescriptor {
    BindingDescriptor { field, role }
}

const COLORED: &[BindingDescriptor] = &[
    bind(IdField::MainColor, IdRole::Primary),
    bind(IdField::DetailColor, IdRole::Secondary),
];
const GROUP_TARGET: &[BindingDescriptor] = &[bind(IdField::TargetGroup, IdRole::Primary)];
const MOVE: &[BindingDescriptor] = &[
    bind(IdField::TargetGroup, IdRole::Primary),
    bind(IdField::TargetPosGroup, IdRole::Secondary),
];
const ROTATE: &[BindingDescriptor] = &[
    bind(IdField::TargetGroup, IdRole::Primary),
    bind(IdField::CenterGroup, IdRole::Secondary),
];
const FOLLOW: &[BindingDescriptor] = &[
    bind(IdField::TargetGroup, IdRole::Primary),
    bind(IdField::FollowGroup, IdRole::Secondary),
];
const PULSE: &[BindingDescriptor] = &[
    bind(IdField::PulseTargetGroup, IdRole::Primary),
    bind(IdField::PulseTargetColor, IdRole::Primary),
    bind(IdField::CopiedColor, IdRole::Secondary),
];
const COLOR: &[BindingDescriptor] = &[
    bind(IdField::TargetColor, IdRole::Primary),
    bind(IdField::CopiedColor, IdRole::Secondary),
];
const ITEM: &[BindingDescriptor] = &[bind(IdField::Item, IdRole::Primary)];
const COUNT: &[BindingDescriptor] = &[
    bind(IdField::Item, IdRole::Primary),
    bind(IdField::TargetGroup, IdRole::Primary),
];
const COLLISION: &[BindingDescriptor] = &[
    bind(IdField::BlockA, IdRole::Primary),
    bind(IdField::BlockB, IdRole::Secondary),
    bind(IdField::TargetGroup, IdRole::Primary),
];
const COLLISION_BLOCK: &[BindingDescriptor] = &[bind(IdField::Block, IdRole::Primary)];

/// Static capability table: which ID fields an object type exposes, and in
/// which role. Group membership is not listed here; every object has it.
pub fn binding_descriptors(tag: ObjectTag) -> &'static [BindingDescriptor] {
    match tag {
        ObjectTag::General | ObjectTag::Orb | ObjectTag::Portal => COLORED,
        ObjectTag::Move => MOVE,
        ObjectTag::Rotate => ROTATE,
        ObjectTag::Follow => FOLLOW,
        ObjectTag::Alpha
        | ObjectTag::Toggle
        | ObjectTag::Spawn
        | ObjectTag::Stop
        | ObjectTag::Touch => GROUP_TARGET,
        ObjectTag::Pulse => PULSE,
        ObjectTag::Color => COLOR,
        ObjectTag::Pickup | ObjectTag::ItemCounter => ITEM,
        ObjectTag::InstantCount | ObjectTag::Count => COUNT,
        ObjectTag::Collision => COLLISION,
        ObjectTag::CollisionBlock => COLLISION_BLOCK,
    }
}

/// Where a bound value lives inside one object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IdSlot {
    Field(IdField),
    Membership(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IdBinding {
    pub object_index: usize,
    pub role: IdRole,
    pub slot: IdSlot,
}

impl LevelObject {
    pub fn id_field(&self, field: IdField) -> Option<u32> {
        if let ObjectData::Pulse(pulse) = &self.data {
            match (field, pulse.target) {
                (IdField::PulseTargetGroup, PulseTarget::Group(id))
                | (IdField::PulseTargetColor, PulseTarget::Channel(id)) => return Some(id),
                (IdField::PulseTargetGroup | IdField::PulseTargetColor, _) => return None,
                _ => {}
            }
        }
        self.plain_field(field).copied()
    }

    /// Returns `false` when the object does not carry `field`.
    pub fn set_id_field(&mut self, field: IdField, value: u32) -> bool {
        if let ObjectData::Pulse(pulse) = &mut self.data {
            match (field, &mut pulse.target) {
                (IdField::PulseTargetGroup, PulseTarget::Group(id))
                | (IdField::PulseTargetColor, PulseTarget::Channel(id)) => {
                    *id = value;
                    return true;
                }
                (IdField::PulseTargetGroup | IdField::PulseTargetColor, _) => return false,
                _ => {}
            }
        }
        match self.field_slot_mut(field) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    pub fn read_slot(&self, slot: IdSlot) -> Option<u32> {
        match slot {
            IdSlot::Field(field) => self.id_field(field),
            IdSlot::Membership(index) => self.group_ids.get(index).copied(),
        }
    }

    pub fn write_slot(&mut self, slot: IdSlot, value: u32) -> bool {
        match slot {
            IdSlot::Field(field) => self.set_id_field(field, value),
            IdSlot::Membership(index) => match self.group_ids.get_mut(index) {
                Some(entry) => {
                    *entry = value;
                    true
                }
                None => false,
            },
        }
    }

    /// Every `(role, slot, current value)` of `kind` this object carries.
    pub fn bindings(&self, kind: IdKind) -> Vec<(IdRole, IdSlot, u32)> {
        let mut out = Vec::new();
        if kind == IdKind::Group {
            for (index, id) in self.group_ids.iter().enumerate() {
                out.push((IdRole::Membership, IdSlot::Membership(index), *id));
            }
        }
        for descriptor in binding_descriptors(self.tag()) {
            if descriptor.field.kind() != kind {
                continue;
            }
            if let Some(value) = self.id_field(descriptor.field) {
                out.push((descriptor.role, IdSlot::Field(descriptor.field), value));
            }
        }
        out
    }

    fn plain_field(&self, field: IdField) -> Option<&u32> {
        match (&self.data, field) {
            (ObjectData::General(colors), IdField::MainColor)
            | (ObjectData::Orb { colors, .. }, IdField::MainColor)
            | (ObjectData::Portal { colors, .. }, IdField::MainColor) => {
                Some(&colors.main_color_id)
            }
            (ObjectData::General(colors), IdField::DetailColor)
            | (ObjectData::Orb { colors, .. }, IdField::DetailColor)
            | (ObjectData::Portal { colors, .. }, IdField::DetailColor) => {
                Some(&colors.detail_color_id)
            }
            (ObjectData::Move(t), IdField::TargetGroup) => Some(&t.target_group_id),
            (ObjectData::Move(t), IdField::TargetPosGroup) => Some(&t.target_pos_group_id),
            (ObjectData::Rotate(t), IdField::TargetGroup) => Some(&t.target_group_id),
            (ObjectData::Rotate(t), IdField::CenterGroup) => Some(&t.center_group_id),
            (ObjectData::Follow(t), IdField::TargetGroup) => Some(&t.target_group_id),
            (ObjectData::Follow(t), IdField::FollowGroup) => Some(&t.follow_group_id),
            (ObjectData::Alpha(t), IdField::TargetGroup) => Some(&t.target_group_id),
            (ObjectData::Toggle(t), IdField::TargetGroup) => Some(&t.target_group_id),
            (ObjectData::Spawn(t), IdField::TargetGroup) => Some(&t.target_group_id),
            (ObjectData::Stop(t), IdField::TargetGroup) => Some(&t.target_group_id),
            (ObjectData::Touch(t), IdField::TargetGroup) => Some(&t.target_group_id),
            (ObjectData::Pulse(t), IdField::CopiedColor) => Some(&t.copied_color_id),
            (ObjectData::Color(t), IdField::TargetColor) => Some(&t.target_color_id),
            (ObjectData::Color(t), IdField::CopiedColor) => Some(&t.copied_color_id),
            (ObjectData::Pickup(t), IdField::Item) => Some(&t.item_id),
            (ObjectData::InstantCount(t), IdField::Item) => Some(&t.item_id),
            (ObjectData::InstantCount(t), IdField::TargetGroup) => Some(&t.target_group_id),
            (ObjectData::Count(t), IdField::Item) => Some(&t.item_id),
            (ObjectData::Count(t), IdField::TargetGroup) => Some(&t.target_group_id),
            (ObjectData::Collision(t), IdField::BlockA) => Some(&t.block_a_id),
            (ObjectData::Collision(t), IdField::BlockB) => Some(&t.block_b_id),
            (ObjectData::Collision(t), IdField::TargetGroup) => Some(&t.target_group_id),
            (ObjectData::CollisionBlock(t), IdField::Block) => Some(&t.block_id),
            (ObjectData::ItemCounter(t), IdField::Item) => Some(&t.item_id),
            _ => None,
        }
    }

    fn field_slot_mut(&mut self, field: IdField) -> Option<&mut u32> {
        match (&mut self.data, field) {
            (ObjectData::General(colors), IdField::MainColor)
            | (ObjectData::Orb { colors, .. }, IdField::MainColor)
            | (ObjectData::Portal { colors, .. }, IdField::MainColor) => {
                Some(&mut colors.main_color_id)
            }
            (ObjectData::General(colors), IdField::DetailColor)
            | (ObjectData::Orb { colors, .. }, IdField::DetailColor)
            | (ObjectData::Portal { colors, .. }, IdField::DetailColor) => {
                Some(&mut colors.detail_color_id)
            }
            (ObjectData::Move(t), IdField::TargetGroup) => Some(&mut t.target_group_id),
            (ObjectData::Move(t), IdField::TargetPosGroup) => Some(&mut t.target_pos_group_id),
            (ObjectData::Rotate(t), IdField::TargetGroup) => Some(&mut t.target_group_id),
            (ObjectData::Rotate(t), IdField::CenterGroup) => Some(&mut t.center_group_id),
            (ObjectData::Follow(t), IdField::TargetGroup) => Some(&mut t.target_group_id),
            (ObjectData::Follow(t), IdField::FollowGroup) => Some(&mut t.follow_group_id),
            (ObjectData::Alpha(t), IdField::TargetGroup) => Some(&mut t.target_group_id),
            (ObjectData::Toggle(t), IdField::TargetGroup) => Some(&mut t.target_group_id),
            (ObjectData::Spawn(t), IdField::TargetGroup) => Some(&mut t.target_group_id),
            (ObjectData::Stop(t), IdField::TargetGroup) => Some(&mut t.target_group_id),
            (ObjectData::Touch(t), IdField::TargetGroup) => Some(&mut t.target_group_id),
            (ObjectData::Pulse(t), IdField::CopiedColor) => Some(&mut t.copied_color_id),
            (ObjectData::Color(t), IdField::TargetColor) => Some(&mut t.target_color_id),
            (ObjectData::Color(t), IdField::CopiedColor) => Some(&mut t.copied_color_id),
            (ObjectData::Pickup(t), IdField::Item) => Some(&mut t.item_id),
            (ObjectData::InstantCount(t), IdField::Item) => Some(&mut t.item_id),
            (ObjectData::InstantCount(t), IdField::TargetGroup) => Some(&mut t.target_group_id),
            (ObjectData::Count(t), IdField::Item) => Some(&mut t.item_id),
            (ObjectData::Count(t), IdField::TargetGroup) => Some(&mut t.target_group_id),
            (ObjectData::Collision(t), IdField::BlockA) => Some(&mut t.block_a_id),
            (ObjectData::Collision(t), IdField::BlockB) => Some(&mut t.block_b_id),
            (ObjectData::Collision(t), IdField::TargetGroup) => Some(&mut t.target_group_id),
            (ObjectData::CollisionBlock(t), IdField::Block) => Some(&mut t.block_id),
            (ObjectData::ItemCounter(t), IdField::Item) => Some(&mut t.item_id),
            _ => None,
        }
    }
}

/// Enumerates every binding of `kind` across `objects`, with the value each
/// currently holds.
pub fn resolve_bindings(objects: &[LevelObject], kind: IdKind) -> Vec<(IdBinding, u32)> {
    let mut out = Vec::new();
    for (object_index, object) in objects.iter().enumerate() {
        for (role, slot, value) in object.bindings(kind) {
            out.push((
                IdBinding {
                    object_index,
                    role,
                    slot,
                },
                value,
            ));
        }
    }
    out
}
