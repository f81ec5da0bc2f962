mod compaction;
mod coupling;
mod interval;
mod migration;
mod plan;
mod range;


use thiserror::Error;

use crate::ids::{IdKind, MAX_COLOR_CHANNEL_ID};
use crate::level::ColorChannelError;

pub use interval::IntervalSet;
pub use range::{parse_inclusive_span, parse_steps, RangeError, SourceTargetRange};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RemapError {
    #[error("color id {value} is outside 1..={max}", max = MAX_COLOR_CHANNEL_ID)]
    ColorIdOutOfRange { value: u32 },
    #[error("{kind} remap would write the unset id 0 over value {old}")]
    UnsetIdTarget { kind: IdKind, old: u32 },
    #[error(
        "relocating color channel {source_id} onto {target_id} would overwrite a channel that is not being moved"
    )]
    ChannelCollision { source_id: u32, target_id: u32 },
    #[error(
        "color channels {first_source} and {second_source} would both be relocated onto {target_id}"
    )]
    DuplicateChannelTarget {
        first_source: u32,
        second_source: u32,
        target_id: u32,
    },
    #[error("compaction would assign {kind} id {value}, which is kept by an ignored range")]
    IgnoredIdCollision { kind: IdKind, value: u32 },
    #[error(transparent)]
    Channel(#[from] ColorChannelError),
}

/// What one migration or compaction call changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RemapReport {
    pub kind: IdKind,
    pub rewritten_values: usize,
    pub rewritten_pointers: usize,
    pub relocated_channels: usize,
}

impl RemapReport {
    pub fn empty(kind: IdKind) -> Self {
        Self {
            kind,
            rewritten_values: 0,
            rewritten_pointers: 0,
            relocated_channels: 0,
        }
    }

    pub fn is_noop(&self) -> bool {
        self.rewritten_values == 0 && self.rewritten_pointers == 0 && self.relocated_channels == 0
    }

    pub fn render_human_readable(&self) -> String {
        format!(
            "kind={} rewritten_values={} rewritten_pointers={} relocated_channels={}",
            self.kind, self.rewritten_values, self.rewritten_pointers, self.relocated_channels
        )
    }
}
