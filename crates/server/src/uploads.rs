// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Multipart parsing and on-disk storage of uploaded files.
//!
//! Files are kept in memory until the upload policy has accepted the whole
//! batch. Only then are they written under the upload root, and the caller
//! removes them again if the record update that follows fails.

use axum::body::Bytes;
use axum::extract::Multipart;
use permit_portal::StoredFile;
use permit_portal_api::{UploadKind, UploadedFile, stored_extension};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use time::OffsetDateTime;
use tracing::{debug, warn};

use crate::HttpError;

/// Public path prefix under which uploads are served.
pub const PUBLIC_PREFIX: &str = "/uploads";

/// A file received in a multipart request.
pub struct ReceivedFile {
    pub meta: UploadedFile,
    pub bytes: Bytes,
}

/// The parts of a multipart request.
#[derive(Default)]
pub struct MultipartForm {
    /// Text fields by name. A repeated name keeps the last value.
    pub fields: HashMap<String, String>,
    /// Files sent under the expected file field, in request order.
    pub files: Vec<ReceivedFile>,
}

impl MultipartForm {
    /// Reads a whole multipart request.
    ///
    /// Parts named `file_field` are collected as files. Every other part is
    /// read as text.
    ///
    /// # Errors
    ///
    /// Returns a 400 error if the body is not valid multipart data.
    pub async fn read(mut multipart: Multipart, file_field: &str) -> Result<Self, HttpError> {
        let mut form: Self = Self::default();

        while let Some(field) = multipart.next_field().await.map_err(HttpError::from)? {
            let name: String = field.name().unwrap_or_default().to_string();

            if name == file_field {
                let file_name: String = field.file_name().unwrap_or_default().to_string();
                let content_type: String = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let bytes: Bytes = field.bytes().await.map_err(HttpError::from)?;
                if file_name.is_empty() && bytes.is_empty() {
                    // Browsers send an empty part for an untouched file input.
                    continue;
                }
                form.files.push(ReceivedFile {
                    meta: UploadedFile {
                        file_name,
                        content_type,
                        size: bytes.len(),
                    },
                    bytes,
                });
            } else {
                let value: String = field.text().await.map_err(HttpError::from)?;
                form.fields.insert(name, value);
            }
        }

        Ok(form)
    }

    /// Returns the text field `name`, if present.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<String> {
        self.fields.get(name).cloned()
    }

    /// Metadata of every received file.
    #[must_use]
    pub fn file_metadata(&self) -> Vec<UploadedFile> {
        self.files.iter().map(|file| file.meta.clone()).collect()
    }
}

/// The directory tree uploaded files are written to.
#[derive(Debug, Clone)]
pub struct UploadStore {
    root: PathBuf,
}

impl UploadStore {
    /// Creates a store rooted at `root`.
    #[must_use]
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// The upload root.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Creates the upload subdirectories.
    ///
    /// # Errors
    ///
    /// Returns an error if a directory cannot be created.
    pub async fn ensure_directories(&self) -> std::io::Result<()> {
        for kind in [UploadKind::PaymentProof, UploadKind::RevisionDocuments] {
            tokio::fs::create_dir_all(self.root.join(kind.directory())).await?;
        }
        Ok(())
    }

    /// Writes one file and returns its stored name and public path.
    ///
    /// Stored names are `{epochMillis}-{random}{.ext}`; the client name is
    /// only kept as metadata.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub async fn store(
        &self,
        kind: UploadKind,
        file: &ReceivedFile,
        now: OffsetDateTime,
    ) -> std::io::Result<StoredFile> {
        let millis: i128 = now.unix_timestamp_nanos() / 1_000_000;
        let stored_name: String = format!(
            "{millis}-{}{}",
            rand::random::<u32>(),
            stored_extension(&file.meta.file_name)
        );

        let directory: PathBuf = self.root.join(kind.directory());
        tokio::fs::create_dir_all(&directory).await?;
        tokio::fs::write(directory.join(&stored_name), &file.bytes).await?;
        debug!(
            directory = kind.directory(),
            stored_name = %stored_name,
            size = file.meta.size,
            "Stored upload"
        );

        Ok(StoredFile {
            file_name: file.meta.file_name.clone(),
            file_path: format!("{PUBLIC_PREFIX}/{}/{stored_name}", kind.directory()),
        })
    }

    /// Writes a batch of files. On failure nothing from the batch is kept.
    ///
    /// # Errors
    ///
    /// Returns an error if any file cannot be written.
    pub async fn store_all(
        &self,
        kind: UploadKind,
        files: &[ReceivedFile],
        now: OffsetDateTime,
    ) -> std::io::Result<Vec<StoredFile>> {
        let mut stored: Vec<StoredFile> = Vec::with_capacity(files.len());
        for file in files {
            match self.store(kind, file, now).await {
                Ok(done) => stored.push(done),
                Err(e) => {
                    self.remove_all(&stored).await;
                    return Err(e);
                }
            }
        }
        Ok(stored)
    }

    /// Removes previously stored files. Failures are logged and ignored.
    pub async fn remove_all(&self, stored: &[StoredFile]) {
        for file in stored {
            let Some(relative) = file
                .file_path
                .strip_prefix(PUBLIC_PREFIX)
                .map(|path| path.trim_start_matches('/'))
            else {
                warn!(file_path = %file.file_path, "Not an upload path, skipping removal");
                continue;
            };
            if let Err(e) = tokio::fs::remove_file(self.root.join(relative)).await {
                warn!(file_path = %file.file_path, error = %e, "Failed to remove upload");
            }
        }
    }
}
