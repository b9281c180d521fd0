//! The on-disk artifact store.
//!
//! Layout under one root directory: `pdfs/<id>.pdf`, `signatures/<id>.png`,
//! and a reserved `archives/` directory. Files are named by agreement id
//! only, so paths are derivable without a database round trip.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use znznow_core::AgreementId;

/// Owns the upload directory tree for generated artifacts.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Open the file store, creating the directory tree if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the directories cannot be created.
    pub fn open<P: AsRef<Path>>(root: P) -> io::Result<Self> {
        let root = root.as_ref().to_path_buf();
        for subdir in ["pdfs", "signatures", "archives"] {
            fs::create_dir_all(root.join(subdir))?;
        }
        Ok(Self { root })
    }

    /// Path of the PDF for an agreement.
    #[must_use]
    pub fn pdf_path(&self, id: &AgreementId) -> PathBuf {
        self.root.join("pdfs").join(format!("{id}.pdf"))
    }

    /// Path of the signature image for an agreement.
    #[must_use]
    pub fn signature_path(&self, id: &AgreementId) -> PathBuf {
        self.root.join("signatures").join(format!("{id}.png"))
    }

    /// Write the rendered PDF, returning its path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save_pdf(&self, id: &AgreementId, bytes: &[u8]) -> io::Result<PathBuf> {
        let path = self.pdf_path(id);
        fs::write(&path, bytes)?;
        Ok(path)
    }

    /// Write the decoded signature image, returning its path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save_signature(&self, id: &AgreementId, bytes: &[u8]) -> io::Result<PathBuf> {
        let path = self.signature_path(id);
        fs::write(&path, bytes)?;
        Ok(path)
    }
}
