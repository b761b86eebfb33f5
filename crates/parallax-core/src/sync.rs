//! Position synchronizer — copy the cursor to the counterpart pane.
//!
//! The invoking pane decides the direction: the cached Right pane mirrors
//! into Left, every other pane mirrors into Right. That includes panes that
//! are neither Left nor Right — an unrelated editor is treated as if it were
//! Left and its cursor lands in the Right pane.
//!
//! Both role panes must still resolve to live editors. A closed or
//! repurposed pane makes the layout stale; the copy is skipped and
//! [`Error::StaleLayout`] names the side that went missing.

use tracing::debug;

use crate::error::{Error, Result};
use crate::host::{Host, PaneId};
use crate::position::Position;
use crate::role::{Role, RoleAssignment};

/// A completed mirror.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mirrored {
    pub from: Role,
    pub to: Role,
    /// The pane the position was read from. For a pane outside the pair
    /// this is that pane, not the Left pane.
    pub source: PaneId,
    pub target: PaneId,
    pub position: Position,
}

/// `(source, target)` roles for a mirror invoked from `active`.
#[must_use]
pub fn direction(roles: &RoleAssignment, active: PaneId) -> (Role, Role) {
    if roles.right() == Some(active) {
        (Role::Right, Role::Left)
    } else {
        (Role::Left, Role::Right)
    }
}

fn live_editor<H: Host + ?Sized>(host: &H, roles: &RoleAssignment, role: Role) -> Result<PaneId> {
    let pane = roles.get(role);
    match pane.and_then(|id| host.pane(id)) {
        Some(info) if info.is_editor() => Ok(info.id),
        _ => Err(Error::StaleLayout { role, pane }),
    }
}

/// Write `cursor` (the invoking pane's cursor) into the counterpart pane.
///
/// Only the target's cursor changes; its scroll position and the source are
/// left alone.
///
/// # Errors
///
/// [`Error::StaleLayout`] when either role pane is unset, closed, or no
/// longer an editor. Nothing is mutated in that case.
pub fn mirror_position<H: Host + ?Sized>(
    host: &mut H,
    roles: &RoleAssignment,
    active: PaneId,
    cursor: Position,
) -> Result<Mirrored> {
    let (from, to) = direction(roles, active);
    live_editor(host, roles, from)?;
    let target = live_editor(host, roles, to)?;

    host.set_cursor(target, cursor)?;
    debug!(%from, %to, source = active, target, %cursor, "mirrored cursor");

    Ok(Mirrored {
        from,
        to,
        source: active,
        target,
        position: cursor,
    })
}
