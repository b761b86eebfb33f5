//! Split tree — pane layout for the in-memory workspace.
//!
//! The split tree is a binary tree where each leaf is a pane and each
//! internal node is a horizontal or vertical split:
//!
//! ```text
//! Vertical
//! ├── Leaf(1)           ← left pane
//! └── Horizontal
//!     ├── Leaf(2)       ← top-right pane
//!     └── Leaf(3)       ← bottom-right pane
//! ```
//!
//! Depth-first, left-to-right leaf order is the workspace's pane
//! enumeration order. The tree stores only ids; pane state lives in the
//! workspace.

use parallax_core::{PaneId, SplitDirection};

/// A node in the split tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Split {
    /// A single pane occupying the entire area.
    Leaf(PaneId),

    /// Horizontal split: first is on top, second is on the bottom.
    Horizontal { first: Box<Self>, second: Box<Self> },

    /// Vertical split: first is on the left, second is on the right.
    Vertical { first: Box<Self>, second: Box<Self> },
}

impl Split {
    #[must_use]
    pub const fn leaf(id: PaneId) -> Self {
        Self::Leaf(id)
    }

    /// Two subtrees split in `direction`, `first` on the left or on top.
    #[must_use]
    pub fn join(first: Self, second: Self, direction: SplitDirection) -> Self {
        let (first, second) = (Box::new(first), Box::new(second));
        match direction {
            SplitDirection::Horizontal => Self::Horizontal { first, second },
            SplitDirection::Vertical => Self::Vertical { first, second },
        }
    }

    // -- Queries ---------------------------------------------------------------

    /// All pane ids, depth-first, left-to-right.
    #[must_use]
    pub fn leaves(&self) -> Vec<PaneId> {
        let mut out = Vec::new();
        self.collect_leaves(&mut out);
        out
    }

    fn collect_leaves(&self, out: &mut Vec<PaneId>) {
        match self {
            Self::Leaf(id) => out.push(*id),
            Self::Horizontal { first, second } | Self::Vertical { first, second } => {
                first.collect_leaves(out);
                second.collect_leaves(out);
            }
        }
    }

    /// Number of panes (leaf nodes) in the tree.
    #[must_use]
    pub fn pane_count(&self) -> usize {
        match self {
            Self::Leaf(_) => 1,
            Self::Horizontal { first, second } | Self::Vertical { first, second } => {
                first.pane_count() + second.pane_count()
            }
        }
    }

    #[must_use]
    pub fn contains(&self, id: PaneId) -> bool {
        match self {
            Self::Leaf(p) => *p == id,
            Self::Horizontal { first, second } | Self::Vertical { first, second } => {
                first.contains(id) || second.contains(id)
            }
        }
    }

    // -- Mutations --------------------------------------------------------------

    /// Split pane `target` in `direction`; `new_id` becomes the right (or
    /// bottom) half.
    ///
    /// Returns `true` if the target was found and split.
    pub fn split(&mut self, target: PaneId, new_id: PaneId, direction: SplitDirection) -> bool {
        match self {
            Self::Leaf(id) if *id == target => {
                *self = Self::join(Self::Leaf(target), Self::Leaf(new_id), direction);
                true
            }
            Self::Leaf(_) => false,
            Self::Horizontal { first, second } | Self::Vertical { first, second } => {
                first.split(target, new_id, direction) || second.split(target, new_id, direction)
            }
        }
    }

    /// Remove a pane; its parent split is replaced by the sibling.
    ///
    /// Cannot remove the last remaining pane; returns `false` if the tree
    /// is a single leaf.
    pub fn remove(&mut self, target: PaneId) -> bool {
        if matches!(self, Self::Leaf(_)) {
            return false;
        }
        self.remove_inner(target)
    }

    fn remove_inner(&mut self, target: PaneId) -> bool {
        match self {
            Self::Leaf(_) => false,
            Self::Horizontal { first, second } | Self::Vertical { first, second } => {
                if matches!(first.as_ref(), Self::Leaf(id) if *id == target) {
                    *self = *second.clone();
                    return true;
                }
                if matches!(second.as_ref(), Self::Leaf(id) if *id == target) {
                    *self = *first.clone();
                    return true;
                }
                first.remove_inner(target) || second.remove_inner(target)
            }
        }
    }
}
