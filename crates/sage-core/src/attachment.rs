//! Attachment validation.
//!
//! A single file may be queued for the next send. Only images and PDFs up
//! to 10 MiB are accepted; everything else is rejected before any state
//! changes.

use std::fmt;
use std::path::{Path, PathBuf};

/// MIME types the backend can analyze.
pub const ALLOWED_MIME_TYPES: [&str; 5] = [
    "image/jpeg",
    "image/png",
    "image/gif",
    "image/webp",
    "application/pdf",
];

/// Largest accepted file size in bytes.
pub const MAX_ATTACHMENT_BYTES: u64 = 10 * 1024 * 1024;

/// A file the user picked, before validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileCandidate {
    pub path: PathBuf,
    pub name: String,
    pub mime_type: String,
    pub size: u64,
}

/// A validated file waiting for the next send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingAttachment {
    pub path: PathBuf,
    pub name: String,
    pub mime_type: String,
    pub size: u64,
}

impl PendingAttachment {
    /// Preview chip text.
    pub fn preview_label(&self) -> String {
        format!("📎 {}", self.name)
    }
}

/// Why a picked file was not accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttachmentRejection {
    UnsupportedType { mime_type: String },
    TooLarge { size: u64 },
    Unreadable { reason: String },
}

impl AttachmentRejection {
    /// User-facing alert text.
    pub fn alert_message(&self) -> &'static str {
        match self {
            AttachmentRejection::UnsupportedType { .. } => "Please upload an image or PDF file.",
            AttachmentRejection::TooLarge { .. } => "File size should be less than 10MB.",
            AttachmentRejection::Unreadable { .. } => "Could not read that file.",
        }
    }
}

impl fmt::Display for AttachmentRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttachmentRejection::UnsupportedType { mime_type } => {
                write!(f, "unsupported file type '{mime_type}'")
            }
            AttachmentRejection::TooLarge { size } => {
                write!(f, "file is {size} bytes (limit {MAX_ATTACHMENT_BYTES})")
            }
            AttachmentRejection::Unreadable { reason } => write!(f, "unreadable file: {reason}"),
        }
    }
}

impl std::error::Error for AttachmentRejection {}

/// Validates a candidate against the type allow-list and size limit.
///
/// # Errors
/// Returns the rejection reason; the type check runs first.
pub fn validate(candidate: FileCandidate) -> Result<PendingAttachment, AttachmentRejection> {
    if !ALLOWED_MIME_TYPES.contains(&candidate.mime_type.as_str()) {
        return Err(AttachmentRejection::UnsupportedType {
            mime_type: candidate.mime_type,
        });
    }
    if candidate.size > MAX_ATTACHMENT_BYTES {
        return Err(AttachmentRejection::TooLarge {
            size: candidate.size,
        });
    }
    Ok(PendingAttachment {
        path: candidate.path,
        name: candidate.name,
        mime_type: candidate.mime_type,
        size: candidate.size,
    })
}

/// Stats a file and detects its MIME type.
///
/// Content sniffing wins over the extension; unknown content falls back
/// to the extension, then to `application/octet-stream`.
///
/// # Errors
/// Returns `Unreadable` if the path is missing, not a file, or cannot be read.
pub async fn inspect_file(path: &Path) -> Result<FileCandidate, AttachmentRejection> {
    let unreadable = |err: std::io::Error| AttachmentRejection::Unreadable {
        reason: err.to_string(),
    };

    let metadata = tokio::fs::metadata(path).await.map_err(unreadable)?;
    if !metadata.is_file() {
        return Err(AttachmentRejection::Unreadable {
            reason: format!("{} is not a file", path.display()),
        });
    }

    let head = read_head(path).await.map_err(unreadable)?;
    let name = path
        .file_name()
        .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned());

    Ok(FileCandidate {
        path: path.to_path_buf(),
        name,
        mime_type: detect_mime(path, &head),
        size: metadata.len(),
    })
}

async fn read_head(path: &Path) -> std::io::Result<Vec<u8>> {
    use tokio::io::AsyncReadExt;

    let file = tokio::fs::File::open(path).await?;
    let mut head = Vec::with_capacity(8192);
    file.take(8192).read_to_end(&mut head).await?;
    Ok(head)
}

/// Detects a MIME type from leading bytes, falling back to the extension.
pub fn detect_mime(path: &Path, head: &[u8]) -> String {
    if let Some(kind) = infer::get(head) {
        return kind.mime_type().to_string();
    }
    mime_guess::from_path(path)
        .first()
        .map_or_else(|| "application/octet-stream".to_string(), |m| m.essence_str().to_string())
}
