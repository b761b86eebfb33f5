//! Layout manager — owner of the session state.
//!
//! The [`Session`] holds the Left/Right assignment and the document pair
//! last loaded into it. Exactly one [`LayoutManager`] owns it; registry,
//! initializer, assigner and synchronizer receive the pieces they need by
//! reference. Every mutation goes through `&mut LayoutManager`, so no reader
//! can observe a half-updated assignment.

use tracing::debug;

use crate::assign::{DocumentPair, PairingPolicy};
use crate::error::{Error, Result};
use crate::host::{Host, PaneId, SplitDirection};
use crate::layout::{self, LayoutOutcome};
use crate::position::Position;
use crate::role::RoleAssignment;
use crate::sync::{self, Mirrored};

/// Session-scoped state of the parallel view. Not persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    roles: RoleAssignment,
    pair: Option<DocumentPair>,
}

impl Session {
    #[inline]
    #[must_use]
    pub const fn roles(&self) -> &RoleAssignment {
        &self.roles
    }

    /// The pair loaded by the last successful assignment.
    #[inline]
    #[must_use]
    pub const fn pair(&self) -> Option<&DocumentPair> {
        self.pair.as_ref()
    }
}

/// Drives the four components against a host.
#[derive(Debug, Default)]
pub struct LayoutManager {
    session: Session,
}

impl LayoutManager {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    #[must_use]
    pub const fn session(&self) -> &Session {
        &self.session
    }

    #[inline]
    #[must_use]
    pub const fn roles(&self) -> &RoleAssignment {
        &self.session.roles
    }

    /// See [`layout::ensure_split_layout`].
    ///
    /// # Errors
    ///
    /// Whatever the initializer reports. The previous pair is forgotten
    /// when assignment fails.
    pub fn ensure_split_layout<H: Host + ?Sized>(
        &mut self,
        host: &mut H,
        direction: SplitDirection,
        policy: &PairingPolicy,
    ) -> Result<LayoutOutcome> {
        self.session.pair = None;
        let outcome =
            layout::ensure_split_layout(host, &mut self.session.roles, direction, policy)?;
        self.session.pair = Some(outcome.pair.clone());
        Ok(outcome)
    }

    /// See [`sync::mirror_position`].
    ///
    /// # Errors
    ///
    /// [`Error::StaleLayout`] when a role pane no longer resolves.
    pub fn mirror_position<H: Host + ?Sized>(
        &self,
        host: &mut H,
        active: PaneId,
        cursor: Position,
    ) -> Result<Mirrored> {
        sync::mirror_position(host, &self.session.roles, active, cursor)
    }

    /// Mirror from the best guess at the pane the user is working in: the
    /// active pane, or the most recent one when nothing has focus.
    ///
    /// # Errors
    ///
    /// [`Error::NoActiveDocument`] when there is no such pane or it is not
    /// an editor, otherwise as [`Self::mirror_position`].
    pub fn mirror_from_active<H: Host + ?Sized>(&self, host: &mut H) -> Result<Mirrored> {
        let active = host
            .active_pane()
            .or_else(|| host.most_recent_pane())
            .ok_or(Error::NoActiveDocument)?;
        let cursor = host.cursor(active).map_err(|_| Error::NoActiveDocument)?;
        self.mirror_position(host, active, cursor)
    }

    /// Drop all session state.
    pub fn reset(&mut self) {
        debug!("clearing session");
        self.session = Session::default();
    }
}
