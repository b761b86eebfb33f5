//! # parallax-workspace — In-memory document workspace
//!
//! A small editing workspace that implements [`parallax_core::Host`]:
//!
//! - **[`split`]** — binary split tree of pane ids, enumeration order
//! - **[`document`]** — rope-backed documents, cursor clamping
//! - **[`vault`]** — the document store, loaded from a directory of `*.md`
//! - **[`pane`]** — per-pane view state (document, cursor, scroll)
//! - **[`workspace`]** — focus, history, notices, and the event queue

pub mod document;
pub mod pane;
pub mod split;
pub mod vault;
pub mod workspace;

#[cfg(test)]
mod scenarios;

pub use document::Document;
pub use pane::Pane;
pub use split::Split;
pub use vault::{Vault, VaultError};
pub use workspace::Workspace;
