//! Pane roles — which pane is Left and which is Right.
//!
//! A [`RoleAssignment`] maps each [`Role`] to at most one pane, and each pane
//! to at most one role. Only the pane registry and the layout initializer
//! write it; the assigner and the synchronizer read it.

use std::fmt;

use crate::host::PaneId;

/// The two sides of the parallel view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Left,
    Right,
}

impl Role {
    /// Both roles, Left first.
    pub const ALL: [Self; 2] = [Self::Left, Self::Right];

    /// The other side.
    #[inline]
    #[must_use]
    pub const fn counterpart(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    const fn index(self) -> usize {
        match self {
            Self::Left => 0,
            Self::Right => 1,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Left => f.write_str("left"),
            Self::Right => f.write_str("right"),
        }
    }
}

/// A pane handle tagged with the role it plays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackedPane {
    pub id: PaneId,
    pub role: Role,
}

/// The current Left/Right assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RoleAssignment {
    slots: [Option<PaneId>; 2],
}

impl RoleAssignment {
    #[must_use]
    pub const fn new() -> Self {
        Self { slots: [None, None] }
    }

    /// The pane holding `role`, if any.
    #[inline]
    #[must_use]
    pub const fn get(&self, role: Role) -> Option<PaneId> {
        self.slots[role.index()]
    }

    #[inline]
    #[must_use]
    pub const fn left(&self) -> Option<PaneId> {
        self.get(Role::Left)
    }

    #[inline]
    #[must_use]
    pub const fn right(&self) -> Option<PaneId> {
        self.get(Role::Right)
    }

    /// Give `role` to `pane`, or clear it with `None`.
    ///
    /// A pane never holds both roles: if `pane` currently holds the other
    /// role, that role is cleared.
    pub fn set(&mut self, role: Role, pane: Option<PaneId>) {
        if pane.is_some() && self.get(role.counterpart()) == pane {
            self.slots[role.counterpart().index()] = None;
        }
        self.slots[role.index()] = pane;
    }

    /// Replace both roles at once.
    pub fn replace(&mut self, left: Option<PaneId>, right: Option<PaneId>) {
        self.slots = [None, None];
        self.set(Role::Left, left);
        self.set(Role::Right, right);
    }

    /// Forget both panes.
    pub const fn clear(&mut self) {
        self.slots = [None, None];
    }

    /// The role `pane` plays, if it is tracked.
    #[must_use]
    pub fn role_of(&self, pane: PaneId) -> Option<Role> {
        Role::ALL
            .into_iter()
            .find(|&role| self.get(role) == Some(pane))
    }

    /// True when both roles are held.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.slots[0].is_some() && self.slots[1].is_some()
    }

    /// Tracked panes, Left first.
    #[must_use]
    pub fn tracked(&self) -> Vec<TrackedPane> {
        Role::ALL
            .into_iter()
            .filter_map(|role| self.get(role).map(|id| TrackedPane { id, role }))
            .collect()
    }
}
