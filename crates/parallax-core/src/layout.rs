//! Layout initializer — make sure a Left/Right split exists, then fill it.
//!
//! ```text
//!   discover ──▶ count >= 2 ? ──yes──▶ reuse first two panes
//!                    │
//!                    no
//!                    ▼
//!   anchor = most recent editor pane (may be none)
//!   right  = split(anchor, direction)        ← always exactly one new pane
//!   left   = anchor
//!                    │
//!                    ▼
//!   focus right, focus left ──▶ assign documents
//! ```
//!
//! With no editor pane at all the new pane is still created and becomes
//! Right; Left stays unset and only the Right side gets a document.

use tracing::{info, warn};

use crate::assign::{self, DocumentPair, PairingPolicy};
use crate::error::Result;
use crate::host::{Host, PaneId, SplitDirection};
use crate::registry::discover_panes;
use crate::role::RoleAssignment;

/// What one initialization pass did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutOutcome {
    pub left: Option<PaneId>,
    pub right: PaneId,
    /// The pane created by splitting, if the existing layout was not enough.
    pub created: Option<PaneId>,
    pub pair: DocumentPair,
}

/// The most recently used pane, if it is an editor. Falls back to `fallback`
/// (the only editor discovery found) when the host's most recent pane is
/// something else.
fn most_recent_editor<H: Host + ?Sized>(host: &H, fallback: Option<PaneId>) -> Option<PaneId> {
    host.most_recent_pane()
        .filter(|&id| host.pane(id).is_some_and(|pane| pane.is_editor()))
        .or(fallback)
}

/// Guarantee a two-pane layout and load the document pair into it.
///
/// Roles are rewritten on every call. Existing panes are reused when at
/// least two editors are open; otherwise exactly one pane is created.
///
/// # Errors
///
/// Host failures while splitting or focusing, and every assignment error
/// from [`assign::assign_documents`]. Roles are already updated when an
/// assignment error is returned.
pub fn ensure_split_layout<H: Host + ?Sized>(
    host: &mut H,
    roles: &mut RoleAssignment,
    direction: SplitDirection,
    policy: &PairingPolicy,
) -> Result<LayoutOutcome> {
    let found = discover_panes(host, roles);

    let (left, right, created) = if let (Some(left), Some(right)) = (found.first, found.second) {
        info!(left, right, "reusing existing editor panes");
        (Some(left), right, None)
    } else {
        let anchor = most_recent_editor(host, found.first);
        if anchor.is_none() {
            warn!("no editor pane open, the split has no left side");
        }
        let right = host.split_pane(anchor, direction)?;
        roles.replace(anchor, Some(right));
        info!(?anchor, right, %direction, "created split pane");
        (anchor, right, Some(right))
    };

    host.set_active_pane(right)?;
    if let Some(left) = left {
        host.set_active_pane(left)?;
    }

    let pair = assign::assign_documents(host, left, right, policy)?;

    Ok(LayoutOutcome {
        left,
        right,
        created,
        pair,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::host::{HostError, ViewKind};
    use crate::testing::FakeHost;
    use pretty_assertions::assert_eq;

    fn witte() -> PairingPolicy {
        PairingPolicy::Named {
            left: "witte-en.md".into(),
            right: "witte-cn.md".into(),
        }
    }

    const DOCS: &[&str] = &["notes.md", "witte-cn.md", "witte-en.md"];

    #[test]
    fn no_editor_creates_right_only() {
        let mut host = FakeHost::new().with_documents(DOCS);
        let mut roles = RoleAssignment::new();

        let out = ensure_split_layout(&mut host, &mut roles, SplitDirection::Vertical, &witte())
            .unwrap();

        assert_eq!(host.splits, vec![(None, SplitDirection::Vertical, 100)]);
        assert_eq!(out.created, Some(100));
        assert_eq!(out.left, None);
        assert_eq!(roles.left(), None);
        assert_eq!(roles.right(), Some(100));
        assert_eq!(host.opened_names(), vec![(100, "witte-cn.md")]);
    }

    #[test]
    fn non_editor_panes_do_not_count() {
        let mut host = FakeHost::new()
            .with_pane(1, ViewKind::Other)
            .with_pane(2, ViewKind::Empty)
            .with_recent(1)
            .with_documents(DOCS);
        let mut roles = RoleAssignment::new();

        ensure_split_layout(&mut host, &mut roles, SplitDirection::Vertical, &witte()).unwrap();

        assert_eq!(host.splits.len(), 1);
        assert_eq!(host.splits[0].0, None);
        assert_eq!(roles.left(), None);
        assert_eq!(roles.right(), Some(100));
    }

    #[test]
    fn two_editors_are_reused() {
        let mut host = FakeHost::new()
            .with_editor(3, "a.md")
            .with_editor(8, "b.md")
            .with_editor(5, "c.md")
            .with_documents(DOCS);
        let mut roles = RoleAssignment::new();

        let out = ensure_split_layout(&mut host, &mut roles, SplitDirection::Vertical, &witte())
            .unwrap();

        assert!(host.splits.is_empty());
        assert_eq!(out.created, None);
        assert_eq!(roles.left(), Some(3));
        assert_eq!(roles.right(), Some(8));
        assert_eq!(host.opened_names(), vec![(8, "witte-cn.md"), (3, "witte-en.md")]);
        assert_eq!(host.active, Some(3));
    }

    #[test]
    fn single_editor_becomes_left_of_new_split() {
        let mut host = FakeHost::new()
            .with_pane(1, ViewKind::Other)
            .with_editor(4, "draft.md")
            .with_recent(4)
            .with_documents(DOCS);
        let mut roles = RoleAssignment::new();

        let out =
            ensure_split_layout(&mut host, &mut roles, SplitDirection::Horizontal, &witte())
                .unwrap();

        assert_eq!(host.splits, vec![(Some(4), SplitDirection::Horizontal, 100)]);
        assert_eq!(out.left, Some(4));
        assert_eq!(out.right, 100);
        assert_eq!(roles.left(), Some(4));
        assert_eq!(roles.right(), Some(100));
        assert_eq!(host.activations, vec![100, 4, 4]);
    }

    #[test]
    fn recent_non_editor_falls_back_to_discovered_editor() {
        let mut host = FakeHost::new()
            .with_pane(1, ViewKind::Other)
            .with_editor(4, "draft.md")
            .with_recent(1)
            .with_documents(DOCS);
        let mut roles = RoleAssignment::new();

        ensure_split_layout(&mut host, &mut roles, SplitDirection::Vertical, &witte()).unwrap();

        assert_eq!(host.splits[0].0, Some(4));
        assert_eq!(roles.left(), Some(4));
    }

    #[test]
    fn rerun_after_split_reuses_panes() {
        let mut host = FakeHost::new()
            .with_editor(4, "draft.md")
            .with_recent(4)
            .with_documents(DOCS);
        let mut roles = RoleAssignment::new();

        ensure_split_layout(&mut host, &mut roles, SplitDirection::Vertical, &witte()).unwrap();
        ensure_split_layout(&mut host, &mut roles, SplitDirection::Vertical, &witte()).unwrap();

        assert_eq!(host.splits.len(), 1);
        assert_eq!(roles.left(), Some(4));
        assert_eq!(roles.right(), Some(100));
    }

    #[test]
    fn assignment_error_keeps_roles() {
        let mut host = FakeHost::new()
            .with_editor(4, "draft.md")
            .with_recent(4)
            .with_documents(&["notes.md"]);
        let mut roles = RoleAssignment::new();

        let err = ensure_split_layout(&mut host, &mut roles, SplitDirection::Vertical, &witte())
            .unwrap_err();

        assert_eq!(err, Error::DocumentNotFound("witte-en.md".into()));
        assert_eq!(roles.left(), Some(4));
        assert_eq!(roles.right(), Some(100));
        assert!(host.opened.is_empty());
    }

    #[test]
    fn split_failure_is_reported() {
        struct NoSplit(FakeHost);
        impl Host for NoSplit {
            fn panes(&self) -> Vec<crate::host::PaneInfo> {
                self.0.panes()
            }
            fn pane(&self, id: PaneId) -> Option<crate::host::PaneInfo> {
                self.0.pane(id)
            }
            fn most_recent_pane(&self) -> Option<PaneId> {
                self.0.most_recent_pane()
            }
            fn active_pane(&self) -> Option<PaneId> {
                self.0.active_pane()
            }
            fn split_pane(
                &mut self,
                _: Option<PaneId>,
                _: SplitDirection,
            ) -> std::result::Result<PaneId, HostError> {
                Err(HostError::SplitFailed("window too small".into()))
            }
            fn set_active_pane(&mut self, id: PaneId) -> std::result::Result<(), HostError> {
                self.0.set_active_pane(id)
            }
            fn documents(&self) -> Vec<crate::host::DocumentRef> {
                self.0.documents()
            }
            fn open_document(
                &mut self,
                pane: PaneId,
                document: &crate::host::DocumentRef,
                options: crate::host::OpenOptions,
            ) -> std::result::Result<(), HostError> {
                self.0.open_document(pane, document, options)
            }
            fn cursor(&self, pane: PaneId) -> std::result::Result<crate::Position, HostError> {
                self.0.cursor(pane)
            }
            fn set_cursor(
                &mut self,
                pane: PaneId,
                position: crate::Position,
            ) -> std::result::Result<(), HostError> {
                self.0.set_cursor(pane, position)
            }
            fn notice(&mut self, message: &str) {
                self.0.notice(message);
            }
        }

        let mut host = NoSplit(FakeHost::new().with_documents(DOCS));
        let mut roles = RoleAssignment::new();

        let err = ensure_split_layout(&mut host, &mut roles, SplitDirection::Vertical, &witte())
            .unwrap_err();

        assert_eq!(err, Error::Host(HostError::SplitFailed("window too small".into())));
        assert!(host.0.opened.is_empty());
    }
}
