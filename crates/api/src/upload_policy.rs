// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Upload policy validation.
//!
//! Uploaded files are checked here before anything is written to disk.
//! Both the declared content type and the file extension must be allowed.

use thiserror::Error;

/// Maximum size of a single uploaded file: 10 MiB.
pub const MAX_FILE_SIZE: usize = 10 * 1024 * 1024;

/// Maximum number of revision documents per request.
pub const MAX_REVISION_FILES: usize = 10;

const IMAGE_TYPES: &[&str] = &["image/jpeg", "image/jpg", "image/png"];
const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];

const DOCUMENT_TYPES: &[&str] = &[
    "application/pdf",
    "application/msword",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    "image/jpeg",
    "image/jpg",
    "image/png",
];
const DOCUMENT_EXTENSIONS: &[&str] = &["pdf", "doc", "docx", "jpg", "jpeg", "png"];

/// Upload policy errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum UploadPolicyError {
    /// A payment proof is not a JPEG or PNG image.
    #[error("Only JPG, JPEG, PNG images allowed.")]
    ImageTypeNotAllowed { file_name: String },

    /// A revision document has a type outside the allowed set.
    #[error("Only PDF, Word, and Image files are allowed.")]
    DocumentTypeNotAllowed { file_name: String },

    /// A file is larger than [`MAX_FILE_SIZE`].
    #[error("File '{file_name}' exceeds the {max_bytes} byte limit")]
    TooLarge { file_name: String, max_bytes: usize },

    /// No file was supplied where one is required.
    #[error("No files uploaded")]
    NoFiles,

    /// More files were supplied than the upload accepts.
    #[error("At most {max} file(s) may be uploaded at once")]
    TooManyFiles { max: usize },
}

impl UploadPolicyError {
    /// The request field the error refers to.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::ImageTypeNotAllowed { .. } => "file",
            Self::DocumentTypeNotAllowed { .. }
            | Self::TooLarge { .. }
            | Self::NoFiles
            | Self::TooManyFiles { .. } => "files",
        }
    }
}

/// What an upload is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadKind {
    /// A single proof-of-payment image.
    PaymentProof,
    /// Corrected documents attached after a rejection.
    RevisionDocuments,
}

impl UploadKind {
    /// Subdirectory of the upload root the files are stored in.
    #[must_use]
    pub const fn directory(&self) -> &'static str {
        match self {
            Self::PaymentProof => "payments",
            Self::RevisionDocuments => "documents",
        }
    }

    const fn max_files(self) -> usize {
        match self {
            Self::PaymentProof => 1,
            Self::RevisionDocuments => MAX_REVISION_FILES,
        }
    }
}

/// Metadata of an uploaded file, as received from the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    /// The client-side file name.
    pub file_name: String,
    /// The declared MIME type.
    pub content_type: String,
    /// Size in bytes.
    pub size: usize,
}

/// Validates a batch of uploaded files.
///
/// # Arguments
///
/// * `kind` - What the files are for
/// * `files` - The files in the request
///
/// # Errors
///
/// Returns an error if the batch is empty, too large, or any file has a
/// disallowed type, extension or size.
pub fn validate_upload(kind: UploadKind, files: &[UploadedFile]) -> Result<(), UploadPolicyError> {
    if files.is_empty() {
        return Err(UploadPolicyError::NoFiles);
    }
    if files.len() > kind.max_files() {
        return Err(UploadPolicyError::TooManyFiles {
            max: kind.max_files(),
        });
    }

    for file in files {
        let (types, extensions): (&[&str], &[&str]) = match kind {
            UploadKind::PaymentProof => (IMAGE_TYPES, IMAGE_EXTENSIONS),
            UploadKind::RevisionDocuments => (DOCUMENT_TYPES, DOCUMENT_EXTENSIONS),
        };
        let content_type: String = file.content_type.to_ascii_lowercase();
        let extension: Option<String> = extension_of(&file.file_name);
        let allowed: bool = types.contains(&content_type.as_str())
            && extension
                .as_deref()
                .is_some_and(|ext| extensions.contains(&ext));

        if !allowed {
            let file_name: String = file.file_name.clone();
            return Err(match kind {
                UploadKind::PaymentProof => UploadPolicyError::ImageTypeNotAllowed { file_name },
                UploadKind::RevisionDocuments => {
                    UploadPolicyError::DocumentTypeNotAllowed { file_name }
                }
            });
        }

        if file.size > MAX_FILE_SIZE {
            return Err(UploadPolicyError::TooLarge {
                file_name: file.file_name.clone(),
                max_bytes: MAX_FILE_SIZE,
            });
        }
    }

    Ok(())
}

/// Returns the lower-cased extension of `file_name`, including the dot, or
/// an empty string when there is none.
#[must_use]
pub fn stored_extension(file_name: &str) -> String {
    extension_of(file_name).map_or_else(String::new, |ext| format!(".{ext}"))
}

fn extension_of(file_name: &str) -> Option<String> {
    std::path::Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .filter(|ext| !ext.is_empty())
        .map(str::to_ascii_lowercase)
}
