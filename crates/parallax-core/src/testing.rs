//! Scripted host for unit tests.
//!
//! Records every capability call so tests can assert on what the core asked
//! for, and lets tests build awkward workspaces (duplicate enumeration,
//! non-editor panes, closed panes) that a real host rarely produces.

use std::collections::HashMap;

use crate::host::{
    DocumentRef, Host, HostError, OpenOptions, PaneId, PaneInfo, SplitDirection, ViewKind,
};
use crate::position::Position;

#[derive(Debug, Default)]
pub struct FakeHost {
    pub panes: Vec<PaneInfo>,
    pub cursors: HashMap<PaneId, Position>,
    pub documents: Vec<DocumentRef>,
    pub recent: Option<PaneId>,
    pub active: Option<PaneId>,
    pub next_id: PaneId,
    pub splits: Vec<(Option<PaneId>, SplitDirection, PaneId)>,
    pub opened: Vec<(PaneId, String, OpenOptions)>,
    pub activations: Vec<PaneId>,
    pub notices: Vec<String>,
}

impl FakeHost {
    pub fn new() -> Self {
        Self {
            next_id: 100,
            ..Self::default()
        }
    }

    pub fn with_editor(mut self, id: PaneId, doc: &str) -> Self {
        self.panes.push(PaneInfo {
            id,
            view: ViewKind::Editor,
            document: Some(DocumentRef::new(doc)),
        });
        self.cursors.insert(id, Position::ZERO);
        self
    }

    pub fn with_pane(mut self, id: PaneId, view: ViewKind) -> Self {
        self.panes.push(PaneInfo { id, view, document: None });
        self
    }

    pub fn with_documents(mut self, names: &[&str]) -> Self {
        self.documents
            .extend(names.iter().map(|n| DocumentRef::new(*n)));
        self
    }

    pub const fn with_recent(mut self, id: PaneId) -> Self {
        self.recent = Some(id);
        self
    }

    pub fn close(&mut self, id: PaneId) {
        self.panes.retain(|p| p.id != id);
        self.cursors.remove(&id);
    }

    pub fn opened_names(&self) -> Vec<(PaneId, &str)> {
        self.opened
            .iter()
            .map(|(pane, name, _)| (*pane, name.as_str()))
            .collect()
    }

    fn editor(&self, id: PaneId) -> Result<&PaneInfo, HostError> {
        let pane = self.pane_ref(id).ok_or(HostError::NoSuchPane(id))?;
        if pane.is_editor() {
            Ok(pane)
        } else {
            Err(HostError::NotAnEditor(id))
        }
    }

    fn pane_ref(&self, id: PaneId) -> Option<&PaneInfo> {
        self.panes.iter().find(|p| p.id == id)
    }
}

impl Host for FakeHost {
    fn panes(&self) -> Vec<PaneInfo> {
        self.panes.clone()
    }

    fn pane(&self, id: PaneId) -> Option<PaneInfo> {
        self.pane_ref(id).cloned()
    }

    fn most_recent_pane(&self) -> Option<PaneId> {
        self.recent
    }

    fn active_pane(&self) -> Option<PaneId> {
        self.active
    }

    fn split_pane(
        &mut self,
        reference: Option<PaneId>,
        direction: SplitDirection,
    ) -> Result<PaneId, HostError> {
        if let Some(r) = reference {
            self.pane_ref(r).ok_or(HostError::NoSuchPane(r))?;
        }
        let id = self.next_id;
        self.next_id += 1;
        self.panes.push(PaneInfo {
            id,
            view: ViewKind::Empty,
            document: None,
        });
        self.splits.push((reference, direction, id));
        Ok(id)
    }

    fn set_active_pane(&mut self, id: PaneId) -> Result<(), HostError> {
        self.pane_ref(id).ok_or(HostError::NoSuchPane(id))?;
        self.active = Some(id);
        self.recent = Some(id);
        self.activations.push(id);
        Ok(())
    }

    fn documents(&self) -> Vec<DocumentRef> {
        self.documents.clone()
    }

    fn open_document(
        &mut self,
        pane: PaneId,
        document: &DocumentRef,
        options: OpenOptions,
    ) -> Result<(), HostError> {
        if !self.documents.contains(document) {
            return Err(HostError::NoSuchDocument(document.to_string()));
        }
        let info = self
            .panes
            .iter_mut()
            .find(|p| p.id == pane)
            .ok_or(HostError::NoSuchPane(pane))?;
        info.view = ViewKind::Editor;
        info.document = Some(document.clone());
        self.cursors.insert(pane, Position::ZERO);
        self.opened
            .push((pane, document.name().to_string(), options));
        Ok(())
    }

    fn cursor(&self, pane: PaneId) -> Result<Position, HostError> {
        self.editor(pane)?;
        Ok(self.cursors.get(&pane).copied().unwrap_or_default())
    }

    fn set_cursor(&mut self, pane: PaneId, position: Position) -> Result<(), HostError> {
        self.editor(pane)?;
        self.cursors.insert(pane, position);
        Ok(())
    }

    fn notice(&mut self, message: &str) {
        self.notices.push(message.to_string());
    }
}
