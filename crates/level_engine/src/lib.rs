pub mod document;
mod ids;
pub mod level;
pub mod remap;

pub use document::{load_level, save_level, DocumentError, SaveOptions, LEVEL_DOCUMENT_FORMAT_VERSION};
pub use ids::{IdKind, IdRole, ParseIdKindError, MAX_COLOR_CHANNEL_ID};
pub use level::{
    ColorChannel, ColorChannelError, ColorChannelTable, IdBinding, IdField, IdSlot, Level,
    LevelObject, ObjectData, ObjectTag,
};
pub use remap::{
    parse_inclusive_span, parse_steps, IntervalSet, RangeError, RemapError, RemapReport,
    SourceTargetRange,
};
