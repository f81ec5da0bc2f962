use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Highest addressable color channel; channel IDs are 1-indexed.
pub const MAX_COLOR_CHANNEL_ID: u32 = 5000;

/// One of the four independent numeric namespaces referenced by level objects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum IdKind {
    Group,
    Color,
    Item,
    Block,
}

impl IdKind {
    pub const ALL: [IdKind; 4] = [IdKind::Group, IdKind::Color, IdKind::Item, IdKind::Block];

    pub fn label(self) -> &'static str {
        match self {
            IdKind::Group => "group",
            IdKind::Color => "color",
            IdKind::Item => "item",
            IdKind::Block => "block",
        }
    }
}

impl fmt::Display for IdKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown id kind '{value}' (expected group, color, item or block)")]
pub struct ParseIdKindError {
    pub value: String,
}

impl FromStr for IdKind {
    type Err = ParseIdKindError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let trimmed = raw.trim();
        IdKind::ALL
            .into_iter()
            .find(|kind| kind.label().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ParseIdKindError {
                value: trimmed.to_string(),
            })
    }
}

/// Which same-kind field of an object a binding refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IdRole {
    Primary,
    Secondary,
    /// An entry of the object's own group list.
    Membership,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_kind_labels_case_insensitively() {
        assert_eq!("Group".parse::<IdKind>(), Ok(IdKind::Group));
        assert_eq!(" color ".parse::<IdKind>(), Ok(IdKind::Color));
        assert_eq!("ITEM".parse::<IdKind>(), Ok(IdKind::Item));
        assert_eq!("block".parse::<IdKind>(), Ok(IdKind::Block));
        assert!("channel".parse::<IdKind>().is_err());
    }

    #[test]
    fn display_round_trips_through_parse() {
        for kind in IdKind::ALL {
            assert_eq!(kind.to_string().parse::<IdKind>(), Ok(kind));
        }
    }
}
