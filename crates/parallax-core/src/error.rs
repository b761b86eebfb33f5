//! Error taxonomy for the parallel view.
//!
//! None of these are fatal. The plugin facade turns every one of them into a
//! notice and a log line; the host keeps running.

use thiserror::Error;

use crate::command::UriError;
use crate::host::{HostError, PaneId};
use crate::role::Role;

/// Why a layout, assignment, or mirroring operation did not complete.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// No editor pane or document was available where one was required.
    #[error("no active document")]
    NoActiveDocument,

    /// A configured file name is absent from the document store.
    #[error("document not found: {0}")]
    DocumentNotFound(String),

    /// A cached Left/Right pane no longer resolves to a live editor.
    #[error("not a left/right layout: {role} pane {}", describe_stale(.pane))]
    StaleLayout { role: Role, pane: Option<PaneId> },

    /// The store does not hold enough documents to form a pair.
    #[error("need two documents, the store has {0}")]
    NotEnoughDocuments(usize),

    /// The naming convention matched no pair in the store.
    #[error("no document pair matches *{left_suffix} / *{right_suffix}")]
    NoPairFound {
        left_suffix: String,
        right_suffix: String,
    },

    #[error(transparent)]
    Host(#[from] HostError),

    #[error(transparent)]
    Uri(#[from] UriError),
}

#[allow(clippy::ref_option)]
fn describe_stale(pane: &Option<PaneId>) -> String {
    pane.map_or_else(|| "is unset".to_string(), |id| format!("{id} is gone"))
}

pub type Result<T> = std::result::Result<T, Error>;
