//! Vault — the document store.
//!
//! Documents are keyed by their vault-relative path. The store's default
//! order, which the pairing policies walk, is the sorted relative path.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use parallax_core::DocumentRef;
use thiserror::Error;
use tracing::{debug, info};

use crate::document::Document;

#[derive(Debug, Error)]
pub enum VaultError {
    #[error("vault root {} is not a directory", .0.display())]
    NotADirectory(PathBuf),

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// File extension of the documents a vault picks up.
const DOCUMENT_EXTENSION: &str = "md";

#[derive(Debug, Clone, Default)]
pub struct Vault {
    documents: BTreeMap<PathBuf, Document>,
}

impl Vault {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A vault holding exactly `documents`. A later document with the same
    /// path replaces an earlier one.
    #[must_use]
    pub fn from_documents(documents: impl IntoIterator<Item = Document>) -> Self {
        let documents = documents
            .into_iter()
            .map(|doc| (doc.reference().path().to_path_buf(), doc))
            .collect();
        Self { documents }
    }

    /// Load every `*.md` file under `root`, recursively.
    ///
    /// # Errors
    ///
    /// Fails if `root` is not a directory or any document cannot be read.
    pub fn open(root: &Path) -> Result<Self, VaultError> {
        if !root.is_dir() {
            return Err(VaultError::NotADirectory(root.to_path_buf()));
        }
        let mut relative = Vec::new();
        collect_documents(root, Path::new(""), &mut relative)?;

        let mut vault = Self::new();
        for rel in relative {
            let doc = Document::from_file(root, &rel).map_err(|source| VaultError::Io {
                path: root.join(&rel),
                source,
            })?;
            vault.insert(doc);
        }
        info!(root = %root.display(), documents = vault.len(), "vault loaded");
        Ok(vault)
    }

    pub fn insert(&mut self, document: Document) {
        debug!(document = %document.reference(), "document added");
        self.documents
            .insert(document.reference().path().to_path_buf(), document);
    }

    #[must_use]
    pub fn get(&self, reference: &DocumentRef) -> Option<&Document> {
        self.documents.get(reference.path())
    }

    /// All documents in default order.
    #[must_use]
    pub fn references(&self) -> Vec<DocumentRef> {
        self.documents.values().map(|d| d.reference().clone()).collect()
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

fn collect_documents(root: &Path, dir: &Path, out: &mut Vec<PathBuf>) -> Result<(), VaultError> {
    let abs = root.join(dir);
    let entries = fs::read_dir(&abs).map_err(|source| VaultError::Io {
        path: abs.clone(),
        source,
    })?;
    for entry in entries {
        let io_err = |source| VaultError::Io {
            path: abs.clone(),
            source,
        };
        let entry = entry.map_err(io_err)?;
        // Not followed through symlinks, so a link to an ancestor cannot loop.
        let file_type = entry.file_type().map_err(io_err)?;
        let rel = dir.join(entry.file_name());
        if file_type.is_dir() {
            collect_documents(root, &rel, out)?;
        } else if rel.extension().is_some_and(|ext| ext == DOCUMENT_EXTENSION) {
            out.push(rel);
        }
    }
    Ok(())
}
