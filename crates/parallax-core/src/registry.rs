//! Pane registry — find the editor panes and classify the first two.
//!
//! Discovery walks the host's panes in enumeration order, keeps only
//! document-editor views, drops repeated ids, and hands the first match the
//! Left role and the second the Right role. Anything past the second match
//! is counted but otherwise ignored.
//!
//! Discovery never fails. Fewer than two matches is a normal outcome that
//! the layout initializer reacts to by creating a split.

use std::collections::HashSet;

use tracing::debug;

use crate::host::{Host, PaneId};
use crate::role::RoleAssignment;

/// Result of one discovery pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Discovery {
    /// Number of distinct editor panes found.
    pub count: usize,
    /// First editor pane in enumeration order; becomes Left.
    pub first: Option<PaneId>,
    /// Second editor pane in enumeration order; becomes Right.
    pub second: Option<PaneId>,
}

/// Enumerate editor panes and overwrite `roles` with the first two.
///
/// Roles with no matching pane are cleared, so stale references from an
/// earlier pass never survive a rediscovery.
pub fn discover_panes<H: Host + ?Sized>(host: &H, roles: &mut RoleAssignment) -> Discovery {
    let mut seen = HashSet::new();
    let mut found = host
        .panes()
        .into_iter()
        .filter(|pane| pane.is_editor())
        .filter(|pane| seen.insert(pane.id))
        .map(|pane| pane.id);

    let first = found.next();
    let second = found.next();
    let count = usize::from(first.is_some()) + usize::from(second.is_some()) + found.count();

    roles.replace(first, second);
    debug!(count, ?first, ?second, "discovered editor panes");

    Discovery {
        count,
        first,
        second,
    }
}
