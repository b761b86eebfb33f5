//! Document assigner — choose the pair of documents and load them.
//!
//! # Pairing policies
//!
//! | Policy        | Left document                     | Right document                    |
//! |---------------|-----------------------------------|-----------------------------------|
//! | `Named`       | name == configured left file      | name == configured right file     |
//! | `Convention`  | first `<stem><left_suffix>.<ext>` | sibling `<stem><right_suffix>.<ext>` |
//! | `FirstTwo`    | first document in store order     | second document in store order    |
//!
//! `Named` ignores store order entirely: the same two documents are picked no
//! matter how the store enumerates. A configured name that is missing from
//! the store is an error, and nothing is opened. When either name is left
//! blank the policy degrades to `FirstTwo`, which is logged as a warning
//! since the store's order says nothing about which documents belong
//! together.
//!
//! Selection always completes before the first open, so a failed lookup never
//! leaves one pane populated and the other not.

use regex::Regex;
use tracing::{info, warn};

use crate::error::{Error, Result};
use crate::host::{DocumentRef, Host, HostError, OpenOptions, PaneId};

/// How the two documents of the parallel view are chosen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PairingPolicy {
    /// Exact file names, e.g. `witte-en.md` and `witte-cn.md`.
    Named { left: String, right: String },
    /// Sibling files that differ only by a suffix before the extension.
    Convention {
        left_suffix: String,
        right_suffix: String,
    },
    /// The first two documents in store order.
    FirstTwo,
}

/// The documents shown on each side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentPair {
    pub left: DocumentRef,
    pub right: DocumentRef,
}

/// Find a document by exact file name.
#[must_use]
pub fn find_by_name<'a>(documents: &'a [DocumentRef], name: &str) -> Option<&'a DocumentRef> {
    documents.iter().find(|doc| doc.name() == name)
}

/// Pick the pair `policy` selects from `documents` (in store order).
///
/// # Errors
///
/// - [`Error::DocumentNotFound`] when a configured name is absent.
/// - [`Error::NoPairFound`] when no file follows the naming convention.
/// - [`Error::NotEnoughDocuments`] when `FirstTwo` has fewer than two to pick.
pub fn select_pair(documents: &[DocumentRef], policy: &PairingPolicy) -> Result<DocumentPair> {
    match policy {
        PairingPolicy::Named { left, right } if left.is_empty() || right.is_empty() => {
            warn!("named pair is not configured, pairing the first two documents");
            first_two(documents)
        }
        PairingPolicy::Named { left, right } => {
            let left = find_by_name(documents, left)
                .ok_or_else(|| Error::DocumentNotFound(left.clone()))?;
            let right = find_by_name(documents, right)
                .ok_or_else(|| Error::DocumentNotFound(right.clone()))?;
            Ok(DocumentPair {
                left: left.clone(),
                right: right.clone(),
            })
        }
        PairingPolicy::Convention {
            left_suffix,
            right_suffix,
        } => convention_pair(documents, left_suffix, right_suffix).ok_or_else(|| {
            Error::NoPairFound {
                left_suffix: left_suffix.clone(),
                right_suffix: right_suffix.clone(),
            }
        }),
        PairingPolicy::FirstTwo => first_two(documents),
    }
}

fn first_two(documents: &[DocumentRef]) -> Result<DocumentPair> {
    match documents {
        [left, right, ..] => {
            warn!(%left, %right, "pairing by store order, the pair may be unrelated");
            Ok(DocumentPair {
                left: left.clone(),
                right: right.clone(),
            })
        }
        _ => Err(Error::NotEnoughDocuments(documents.len())),
    }
}

/// The file name that pairs with `name` under a suffix convention, or `None`
/// if `name` does not carry `from_suffix`.
///
/// `counterpart_name("witte-en.md", "-en", "-cn")` is `Some("witte-cn.md")`.
#[must_use]
pub fn counterpart_name(name: &str, from_suffix: &str, to_suffix: &str) -> Option<String> {
    if from_suffix.is_empty() || from_suffix == to_suffix {
        return None;
    }
    let pattern = format!(r"^(.+){}(\.[^.]+)?$", regex::escape(from_suffix));
    let re = Regex::new(&pattern).ok()?;
    let caps = re.captures(name)?;
    let stem = caps.get(1)?.as_str();
    let ext = caps.get(2).map_or("", |m| m.as_str());
    Some(format!("{stem}{to_suffix}{ext}"))
}

fn convention_pair(
    documents: &[DocumentRef],
    left_suffix: &str,
    right_suffix: &str,
) -> Option<DocumentPair> {
    documents.iter().find_map(|left| {
        let wanted = counterpart_name(left.name(), left_suffix, right_suffix)?;
        let right = find_by_name(documents, &wanted)?;
        Some(DocumentPair {
            left: left.clone(),
            right: right.clone(),
        })
    })
}

/// Select a pair and load it: right document into `right`, left document
/// into `left`, both editable, then make `left` active.
///
/// With no Left pane only the Right side is populated and Right ends up
/// active.
///
/// # Errors
///
/// Selection errors (see [`select_pair`]) and a closed target pane
/// ([`HostError::NoSuchPane`]) are reported before any pane is touched.
/// Host failures while opening are passed through.
pub fn assign_documents<H: Host + ?Sized>(
    host: &mut H,
    left: Option<PaneId>,
    right: PaneId,
    policy: &PairingPolicy,
) -> Result<DocumentPair> {
    let documents = host.documents();
    let pair = select_pair(&documents, policy)?;

    for pane in left.into_iter().chain([right]) {
        if host.pane(pane).is_none() {
            return Err(HostError::NoSuchPane(pane).into());
        }
    }

    host.open_document(right, &pair.right, OpenOptions::editable())?;

    if let Some(left) = left {
        host.open_document(left, &pair.left, OpenOptions::editable())?;
        host.set_active_pane(left)?;
    } else {
        warn!(right = %pair.right, "no left pane, only the right side is populated");
        host.set_active_pane(right)?;
    }

    info!(left = %pair.left, right = %pair.right, "assigned documents");
    Ok(pair)
}
