//! # parallax-core — Left/Right parallel view over a host workspace
//!
//! Keeps two related documents side by side and their cursors in step:
//!
//! - **[`registry`]** — find editor panes, give the first two the Left/Right roles
//! - **[`layout`]** — create the split when fewer than two editors are open
//! - **[`assign`]** — pick the document pair and load it into the panes
//! - **[`sync`]** — copy the cursor from one pane to its counterpart
//!
//! The workspace itself is abstracted by the [`host::Host`] trait. State
//! that lives for a session (the role assignment, the loaded pair) is owned
//! by [`manager::LayoutManager`]; [`plugin::Plugin`] wraps it with settings,
//! commands, and notices.

pub mod assign;
pub mod command;
pub mod error;
pub mod host;
pub mod layout;
pub mod manager;
pub mod plugin;
pub mod position;
pub mod registry;
pub mod role;
pub mod settings;
pub mod sync;

#[cfg(test)]
mod testing;

pub use error::{Error, Result};
pub use host::{DocumentRef, Host, HostError, HostEvent, PaneId, PaneInfo, SplitDirection, ViewKind};
pub use plugin::Plugin;
pub use position::Position;
pub use role::Role;
