//! Host contract — the capabilities the core borrows from the editing workspace.
//!
//! The core never owns panes or documents. Everything it knows about the
//! workspace comes through the [`Host`] trait: which panes are open and what
//! they show, how to split one, how to open a document into one, and how to
//! read and write a pane's cursor.
//!
//! ```text
//!   parallax-core                        host workspace
//!  ┌──────────────────┐   panes()      ┌──────────────────────┐
//!  │ registry/layout  │ ─────────────▶ │ split tree of panes  │
//!  │ assigner/sync    │   split_pane() │ document store       │
//!  │                  │   open_doc()   │ cursors, focus, MRU  │
//!  └──────────────────┘ ◀───────────── └──────────────────────┘
//!                         HostEvent
//! ```
//!
//! Pane ids are opaque and compared by identity. A stale id (the user closed
//! the pane) simply stops resolving: [`Host::pane`] returns `None` and the
//! cursor accessors fail with [`HostError::NoSuchPane`].

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::position::Position;

/// Opaque pane identifier. Unique for the lifetime of the host, never reused.
pub type PaneId = usize;

// ---------------------------------------------------------------------------
// Pane metadata
// ---------------------------------------------------------------------------

/// What kind of view a pane hosts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewKind {
    /// A document editor, the only kind that takes part in the parallel view.
    Editor,
    /// An empty pane (new tab, nothing opened yet).
    Empty,
    /// Anything else the host shows: file explorer, graph, settings.
    Other,
}

impl ViewKind {
    #[inline]
    #[must_use]
    pub const fn is_editor(self) -> bool {
        matches!(self, Self::Editor)
    }
}

/// Direction of a new split, relative to the pane being split.
///
/// `Vertical` places the panes side by side (new pane on the right),
/// `Horizontal` stacks them (new pane below).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SplitDirection {
    Horizontal,
    #[default]
    Vertical,
}

impl fmt::Display for SplitDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Horizontal => f.write_str("horizontal"),
            Self::Vertical => f.write_str("vertical"),
        }
    }
}

impl FromStr for SplitDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "horizontal" => Ok(Self::Horizontal),
            "vertical" => Ok(Self::Vertical),
            other => Err(format!("expected `horizontal` or `vertical`, got `{other}`")),
        }
    }
}

/// How a document is displayed once opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DisplayMode {
    /// Editable source view.
    #[default]
    Source,
    /// Read-only rendered view.
    Preview,
}

/// Options for [`Host::open_document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OpenOptions {
    pub mode: DisplayMode,
    /// Mark the pane as the active one once the document is loaded.
    pub active: bool,
    /// Move keyboard focus into the pane.
    pub focus: bool,
}

impl OpenOptions {
    /// Editable, active, without stealing focus. This is how both halves of the
    /// pair are opened.
    #[must_use]
    pub const fn editable() -> Self {
        Self {
            mode: DisplayMode::Source,
            active: true,
            focus: false,
        }
    }
}

/// A document in the host's store, identified by its store-relative path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DocumentRef {
    path: PathBuf,
}

impl DocumentRef {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store-relative path, e.g. `books/witte-en.md`.
    #[inline]
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// File name without directories, e.g. `witte-en.md`. This is what the
    /// named-pair lookup compares against.
    #[must_use]
    pub fn name(&self) -> &str {
        self.path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
    }
}

impl fmt::Display for DocumentRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path.display())
    }
}

/// A snapshot of one pane, as returned by enumeration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaneInfo {
    pub id: PaneId,
    pub view: ViewKind,
    pub document: Option<DocumentRef>,
}

impl PaneInfo {
    #[inline]
    #[must_use]
    pub const fn is_editor(&self) -> bool {
        self.view.is_editor()
    }
}

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

/// Workspace events the core subscribes to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostEvent {
    /// A document finished loading into a pane.
    DocumentOpened { pane: PaneId, document: DocumentRef },
    /// A pane was closed by the user. Any cached reference to it is stale.
    PaneClosed { pane: PaneId },
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Failures reported by a host capability.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HostError {
    #[error("pane {0} does not exist")]
    NoSuchPane(PaneId),

    #[error("document {0} is not in the store")]
    NoSuchDocument(String),

    #[error("pane {0} is not a document editor")]
    NotAnEditor(PaneId),

    #[error("cannot split: {0}")]
    SplitFailed(String),
}

// ---------------------------------------------------------------------------
// Host
// ---------------------------------------------------------------------------

/// The capability surface of the host workspace.
///
/// Implementations must enumerate panes in a stable order for the duration
/// of one call, but nothing more: the core does not assume the order is the
/// same across hosts.
pub trait Host {
    /// All open panes, in host enumeration order.
    fn panes(&self) -> Vec<PaneInfo>;

    /// Look up one pane. `None` once the pane has been closed.
    fn pane(&self, id: PaneId) -> Option<PaneInfo>;

    /// The most recently used pane of any kind, if any pane is open.
    fn most_recent_pane(&self) -> Option<PaneId>;

    /// The pane that currently has focus.
    fn active_pane(&self) -> Option<PaneId>;

    /// Create a new pane by splitting `reference` in `direction`. With no
    /// reference the host chooses where the new pane goes.
    ///
    /// # Errors
    ///
    /// Fails if the reference pane does not exist or cannot be split.
    fn split_pane(
        &mut self,
        reference: Option<PaneId>,
        direction: SplitDirection,
    ) -> Result<PaneId, HostError>;

    /// Make a pane the active one.
    ///
    /// # Errors
    ///
    /// Fails if the pane does not exist.
    fn set_active_pane(&mut self, id: PaneId) -> Result<(), HostError>;

    /// Every document in the store, in the store's default order.
    fn documents(&self) -> Vec<DocumentRef>;

    /// Load `document` into `pane`, turning it into an editor view.
    ///
    /// # Errors
    ///
    /// Fails if the pane or the document does not exist.
    fn open_document(
        &mut self,
        pane: PaneId,
        document: &DocumentRef,
        options: OpenOptions,
    ) -> Result<(), HostError>;

    /// The cursor of an editor pane.
    ///
    /// # Errors
    ///
    /// Fails if the pane is gone or is not an editor.
    fn cursor(&self, pane: PaneId) -> Result<Position, HostError>;

    /// Move the cursor of an editor pane. Scroll state is left alone.
    ///
    /// # Errors
    ///
    /// Fails if the pane is gone or is not an editor.
    fn set_cursor(&mut self, pane: PaneId, position: Position) -> Result<(), HostError>;

    /// Show a transient message to the user.
    fn notice(&mut self, message: &str);
}
