//! Panes — per-pane view state.

use parallax_core::host::{DisplayMode, PaneInfo};
use parallax_core::{DocumentRef, PaneId, Position, ViewKind};

/// One pane in the workspace.
///
/// Only editor panes carry a meaningful cursor. `scroll_top` is the first
/// visible line; cursor moves from outside never touch it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pane {
    pub id: PaneId,
    pub view: ViewKind,
    pub document: Option<DocumentRef>,
    pub cursor: Position,
    pub scroll_top: usize,
    pub mode: DisplayMode,
}

impl Pane {
    /// A fresh pane with nothing opened.
    #[must_use]
    pub const fn empty(id: PaneId) -> Self {
        Self::with_view(id, ViewKind::Empty)
    }

    #[must_use]
    pub const fn with_view(id: PaneId, view: ViewKind) -> Self {
        Self {
            id,
            view,
            document: None,
            cursor: Position::ZERO,
            scroll_top: 0,
            mode: DisplayMode::Source,
        }
    }

    /// Load a document, turning the pane into an editor at the top of the
    /// text.
    pub fn load(&mut self, document: DocumentRef, mode: DisplayMode) {
        self.view = ViewKind::Editor;
        self.document = Some(document);
        self.cursor = Position::ZERO;
        self.scroll_top = 0;
        self.mode = mode;
    }

    #[must_use]
    pub fn info(&self) -> PaneInfo {
        PaneInfo {
            id: self.id,
            view: self.view,
            document: self.document.clone(),
        }
    }
}
