//! JSON document renderer.

use std::fs;
use std::path::PathBuf;

use serde::Serialize;
use tracing::debug;

use dons_core::attestation::{AttestationContext, AttestationError, AttestationKind, DocumentRenderer};

/// Writes the contexts of one document as pretty-printed JSON.
#[derive(Debug, Clone)]
pub(crate) struct JsonFileRenderer {
    path: PathBuf,
}

#[derive(Serialize)]
struct Document<'a> {
    kind: AttestationKind,
    documents: &'a [AttestationContext],
}

impl JsonFileRenderer {
    pub(crate) fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl DocumentRenderer for JsonFileRenderer {
    type Output = PathBuf;

    fn render(
        &self,
        kind: AttestationKind,
        contexts: &[AttestationContext],
    ) -> Result<PathBuf, AttestationError> {
        let json = serde_json::to_string_pretty(&Document {
            kind,
            documents: contexts,
        })
        .map_err(|e| AttestationError::render(e.to_string()))?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| {
                AttestationError::render(format!("{}: {e}", parent.display()))
            })?;
        }
        fs::write(&self.path, json)
            .map_err(|e| AttestationError::render(format!("{}: {e}", self.path.display())))?;

        debug!(path = %self.path.display(), documents = contexts.len(), "Wrote document");
        Ok(self.path.clone())
    }
}
