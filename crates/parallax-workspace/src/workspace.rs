//! Workspace — an in-memory host for the parallel view.
//!
//! Owns the split tree, the pane states, and the vault. Implements
//! [`parallax_core::Host`] so the core can run against it directly.
//!
//! # Focus and history
//!
//! | State      | Changes when                                            |
//! |------------|---------------------------------------------------------|
//! | `active`   | `set_active_pane`, opening with `active`/`focus`, close |
//! | `history`  | every activation; closed panes are dropped from it      |
//!
//! The most recent pane is the last entry of `history`. Splitting does not
//! activate the new pane.
//!
//! # Events
//!
//! Opening a document and closing a pane queue a [`HostEvent`]. The driver
//! drains them with [`Workspace::drain_events`] and forwards them to the
//! plugin.

use std::collections::{HashMap, VecDeque};

use parallax_core::host::OpenOptions;
use parallax_core::{DocumentRef, Host, HostError, HostEvent, PaneId, PaneInfo, Position, SplitDirection, ViewKind};
use tracing::{debug, info};

use crate::document::Document;
use crate::pane::Pane;
use crate::split::Split;
use crate::vault::Vault;

#[derive(Debug)]
pub struct Workspace {
    vault: Vault,
    root: Option<Split>,
    panes: HashMap<PaneId, Pane>,
    next_id: PaneId,
    active: Option<PaneId>,
    history: Vec<PaneId>,
    notices: Vec<String>,
    events: VecDeque<HostEvent>,
}

impl Workspace {
    /// An empty workspace (no panes) over `vault`.
    #[must_use]
    pub fn new(vault: Vault) -> Self {
        Self {
            vault,
            root: None,
            panes: HashMap::new(),
            next_id: 1,
            active: None,
            history: Vec::new(),
            notices: Vec::new(),
            events: VecDeque::new(),
        }
    }

    #[inline]
    #[must_use]
    pub const fn vault(&self) -> &Vault {
        &self.vault
    }

    #[must_use]
    pub const fn layout(&self) -> Option<&Split> {
        self.root.as_ref()
    }

    /// Full state of one pane.
    #[must_use]
    pub fn pane_state(&self, id: PaneId) -> Option<&Pane> {
        self.panes.get(&id)
    }

    /// The document shown in `pane`, if it is an editor.
    #[must_use]
    pub fn document_in(&self, pane: PaneId) -> Option<&Document> {
        let reference = self.panes.get(&pane)?.document.as_ref()?;
        self.vault.get(reference)
    }

    fn alloc_id(&mut self) -> PaneId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn touch(&mut self, id: PaneId) {
        self.history.retain(|&p| p != id);
        self.history.push(id);
    }

    fn activate(&mut self, id: PaneId) {
        self.active = Some(id);
        self.touch(id);
    }

    /// Insert a new pane with `id` into the tree next to `reference`, or as
    /// the root when the workspace is empty.
    fn insert_pane(
        &mut self,
        id: PaneId,
        reference: Option<PaneId>,
        direction: SplitDirection,
    ) -> Result<(), HostError> {
        let active = self.active;
        let Some(root) = self.root.as_mut() else {
            self.root = Some(Split::leaf(id));
            return Ok(());
        };
        let target = reference
            .or(active)
            .or_else(|| root.leaves().last().copied())
            .ok_or_else(|| HostError::SplitFailed("no pane to split".into()))?;
        if root.split(target, id, direction) {
            Ok(())
        } else {
            Err(HostError::NoSuchPane(target))
        }
    }

    /// Open a new pane of kind `view`, splitting the active pane vertically.
    /// The pane is not activated.
    ///
    /// # Errors
    ///
    /// Fails if the active pane is no longer in the tree.
    pub fn add_pane(&mut self, view: ViewKind) -> Result<PaneId, HostError> {
        let id = self.alloc_id();
        self.insert_pane(id, None, SplitDirection::Vertical)?;
        self.panes.insert(id, Pane::with_view(id, view));
        debug!(pane = id, ?view, "pane added");
        Ok(id)
    }

    /// Close a pane; its sibling takes its place. The last pane can be
    /// closed too, leaving the workspace empty.
    ///
    /// # Errors
    ///
    /// [`HostError::NoSuchPane`] if the pane is not open.
    pub fn close_pane(&mut self, id: PaneId) -> Result<(), HostError> {
        if self.panes.remove(&id).is_none() {
            return Err(HostError::NoSuchPane(id));
        }
        let collapsed = self.root.as_mut().is_some_and(|root| root.remove(id));
        if !collapsed {
            self.root = None;
        }
        self.history.retain(|&p| p != id);
        if self.active == Some(id) {
            self.active = self.history.last().copied();
        }
        self.events.push_back(HostEvent::PaneClosed { pane: id });
        info!(pane = id, "pane closed");
        Ok(())
    }

    /// Set the first visible line of a pane, clamped to its document.
    ///
    /// # Errors
    ///
    /// Fails if the pane is gone or is not an editor.
    pub fn scroll_to(&mut self, pane: PaneId, line: usize) -> Result<(), HostError> {
        let max = self.document_in(pane).map_or(0, |d| d.line_count().saturating_sub(1));
        let state = self.editor_mut(pane)?;
        state.scroll_top = line.min(max);
        Ok(())
    }

    /// Take every queued event, oldest first.
    pub fn drain_events(&mut self) -> Vec<HostEvent> {
        self.events.drain(..).collect()
    }

    /// Take every notice shown since the last call.
    pub fn take_notices(&mut self) -> Vec<String> {
        std::mem::take(&mut self.notices)
    }

    fn editor_mut(&mut self, id: PaneId) -> Result<&mut Pane, HostError> {
        let pane = self.panes.get_mut(&id).ok_or(HostError::NoSuchPane(id))?;
        if !pane.view.is_editor() {
            return Err(HostError::NotAnEditor(id));
        }
        Ok(pane)
    }
}

impl Host for Workspace {
    fn panes(&self) -> Vec<PaneInfo> {
        self.root
            .as_ref()
            .map(Split::leaves)
            .unwrap_or_default()
            .into_iter()
            .filter_map(|id| self.panes.get(&id).map(Pane::info))
            .collect()
    }

    fn pane(&self, id: PaneId) -> Option<PaneInfo> {
        self.panes.get(&id).map(Pane::info)
    }

    fn most_recent_pane(&self) -> Option<PaneId> {
        self.history.last().copied()
    }

    fn active_pane(&self) -> Option<PaneId> {
        self.active
    }

    fn split_pane(
        &mut self,
        reference: Option<PaneId>,
        direction: SplitDirection,
    ) -> Result<PaneId, HostError> {
        if let Some(r) = reference.filter(|r| !self.panes.contains_key(r)) {
            return Err(HostError::NoSuchPane(r));
        }
        let id = self.alloc_id();
        self.insert_pane(id, reference, direction)?;
        self.panes.insert(id, Pane::empty(id));
        debug!(pane = id, ?reference, %direction, "split");
        Ok(id)
    }

    fn set_active_pane(&mut self, id: PaneId) -> Result<(), HostError> {
        if !self.panes.contains_key(&id) {
            return Err(HostError::NoSuchPane(id));
        }
        self.activate(id);
        Ok(())
    }

    fn documents(&self) -> Vec<DocumentRef> {
        self.vault.references()
    }

    fn open_document(
        &mut self,
        pane: PaneId,
        document: &DocumentRef,
        options: OpenOptions,
    ) -> Result<(), HostError> {
        if self.vault.get(document).is_none() {
            return Err(HostError::NoSuchDocument(document.to_string()));
        }
        let state = self.panes.get_mut(&pane).ok_or(HostError::NoSuchPane(pane))?;
        state.load(document.clone(), options.mode);
        if options.active || options.focus {
            self.activate(pane);
        }
        self.events.push_back(HostEvent::DocumentOpened {
            pane,
            document: document.clone(),
        });
        debug!(pane, %document, "document opened");
        Ok(())
    }

    fn cursor(&self, pane: PaneId) -> Result<Position, HostError> {
        let state = self.panes.get(&pane).ok_or(HostError::NoSuchPane(pane))?;
        if !state.view.is_editor() {
            return Err(HostError::NotAnEditor(pane));
        }
        Ok(state.cursor)
    }

    fn set_cursor(&mut self, pane: PaneId, position: Position) -> Result<(), HostError> {
        let clamped = self
            .document_in(pane)
            .map_or(position, |doc| doc.clamp(position));
        self.editor_mut(pane)?.cursor = clamped;
        Ok(())
    }

    fn notice(&mut self, message: &str) {
        info!(notice = message);
        self.notices.push(message.to_string());
    }
}
