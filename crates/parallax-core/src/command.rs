//! Command surface — palette commands and URI actions.
//!
//! # Palette commands
//!
//! | Id                        | Action                                        |
//! |---------------------------|-----------------------------------------------|
//! | `mirror-cursor-position`  | Copy the active cursor to the counterpart pane |
//! | `open-split-view`         | Re-run layout initialization                  |
//!
//! # URI actions
//!
//! The host hands URI handlers a string-keyed parameter map. The `action`
//! key picks the command; `mirror` may carry a 1-indexed `line` and `col`
//! to place the active cursor before mirroring.
//!
//! | Parameters                          | Command                  |
//! |-------------------------------------|--------------------------|
//! | `action=mirror`                     | `mirror-cursor-position` |
//! | `action=mirror&line=12&col=4`       | same, at 12:4            |
//! | `action=open-split`                 | `open-split-view`        |

use std::collections::BTreeMap;
use std::fmt;

use thiserror::Error;

use crate::position::Position;

/// A palette command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandId {
    MirrorCursor,
    OpenSplitView,
}

impl CommandId {
    /// Every command, in palette order.
    pub const ALL: [Self; 2] = [Self::MirrorCursor, Self::OpenSplitView];

    /// Stable identifier.
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::MirrorCursor => "mirror-cursor-position",
            Self::OpenSplitView => "open-split-view",
        }
    }

    /// Human-readable palette entry.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::MirrorCursor => "Mirror cursor position to the other pane",
            Self::OpenSplitView => "Open parallel split view",
        }
    }

    /// Look up a command by id.
    #[must_use]
    pub fn parse(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|cmd| cmd.id() == id.trim())
    }
}

impl fmt::Display for CommandId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

// ---------------------------------------------------------------------------
// URI actions
// ---------------------------------------------------------------------------

/// Why a URI parameter map was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UriError {
    #[error("missing `action` parameter")]
    MissingAction,

    #[error("unknown action `{0}`")]
    UnknownAction(String),

    #[error("`{key}` must be a positive number, got `{value}`")]
    InvalidNumber { key: &'static str, value: String },
}

/// A parsed URI action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UriAction {
    pub command: CommandId,
    /// Cursor to place in the active pane first (mirror only).
    pub cursor: Option<Position>,
}

fn number(params: &BTreeMap<String, String>, key: &'static str) -> Result<Option<usize>, UriError> {
    params
        .get(key)
        .map(|value| {
            value
                .parse::<usize>()
                .ok()
                .filter(|&n| n > 0)
                .ok_or_else(|| UriError::InvalidNumber {
                    key,
                    value: value.clone(),
                })
        })
        .transpose()
}

impl UriAction {
    /// Interpret a URI parameter map.
    ///
    /// # Errors
    ///
    /// Fails on a missing or unknown `action`, or a `line`/`col` that is not
    /// a positive integer.
    pub fn from_params(params: &BTreeMap<String, String>) -> Result<Self, UriError> {
        let action = params.get("action").ok_or(UriError::MissingAction)?;
        match action.as_str() {
            "mirror" => {
                let line = number(params, "line")?;
                let col = number(params, "col")?;
                let cursor = line.map(|line| Position::from_one_based(line, col.unwrap_or(1)));
                Ok(Self {
                    command: CommandId::MirrorCursor,
                    cursor,
                })
            }
            "open-split" => Ok(Self {
                command: CommandId::OpenSplitView,
                cursor: None,
            }),
            other => Err(UriError::UnknownAction(other.to_string())),
        }
    }
}
