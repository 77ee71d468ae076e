//! Attachment storage for admin uploads.
//!
//! Storing an attachment is a single fallible operation whose result is
//! consumed before any record is constructed, so a rejected file can never
//! leave a partial record behind. The outcome is one of:
//!
//! - `Ok(None)` - no attachment was supplied; the record is created without
//!   an attachment reference
//! - `Ok(Some(name))` - the bytes were written under the upload directory
//!   and `name` is the sanitized stored reference
//! - `Err(UploadError::DisallowedType)` - the declared extension is not in
//!   the allow-list; the whole record creation aborts

use std::path::Path;

use thiserror::Error;

/// Canonical allow-list for uploaded attachments.
///
/// Matched case-insensitively against the substring after the final `.` of
/// the declared filename. A filename without a `.` is disallowed.
pub const ALLOWED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp"];

/// An inbound attachment taken from a multipart field.
#[derive(Debug, Clone)]
pub struct Attachment {
    /// Client-declared filename, not yet sanitized.
    pub filename: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Error)]
pub enum UploadError {
    /// User-recoverable: the file type is not accepted.
    #[error("Invalid file type. Allowed: {}", ALLOWED_EXTENSIONS.join(", "))]
    DisallowedType { filename: String },

    /// The file write itself failed.
    #[error("failed to write upload: {0}")]
    Io(#[from] std::io::Error),
}

/// True when `filename` carries an extension in `allowed`.
pub fn allowed_file(filename: &str, allowed: &[&str]) -> bool {
    match filename.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() || !ext.is_empty() => {
            let ext = ext.to_ascii_lowercase();
            allowed.iter().any(|a| *a == ext)
        }
        _ => false,
    }
}

/// Reduce a client-declared filename to a safe flat name.
///
/// Keeps only the final path component (both separator styles), replaces
/// any character outside `[A-Za-z0-9._-]` with `_`, and strips leading
/// dots so the result can never traverse or hide. Returns an empty string
/// for names with nothing salvageable; callers treat that as disallowed.
pub fn sanitize_filename(filename: &str) -> String {
    let last = filename
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(filename);

    let cleaned: String = last
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '_' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect();

    cleaned.trim_start_matches('.').to_string()
}

/// Store an optional attachment under `upload_dir`.
///
/// Same-named uploads overwrite silently; there is no collision detection.
pub async fn store_attachment(
    upload_dir: &Path,
    attachment: Option<Attachment>,
    allowed: &[&str],
) -> Result<Option<String>, UploadError> {
    let Some(attachment) = attachment else {
        return Ok(None);
    };

    if !allowed_file(&attachment.filename, allowed) {
        return Err(UploadError::DisallowedType {
            filename: attachment.filename,
        });
    }

    let stored_name = sanitize_filename(&attachment.filename);
    if stored_name.is_empty() {
        return Err(UploadError::DisallowedType {
            filename: attachment.filename,
        });
    }

    tokio::fs::create_dir_all(upload_dir).await?;
    tokio::fs::write(upload_dir.join(&stored_name), &attachment.bytes).await?;

    Ok(Some(stored_name))
}

/// Best-effort removal of a stored attachment.
///
/// I/O failures are logged and swallowed: the caller's database deletion is
/// the authoritative action and has already succeeded or is about to.
pub async fn remove_attachment(upload_dir: &Path, filename: &str) {
    let path = upload_dir.join(filename);
    if let Err(e) = tokio::fs::remove_file(&path).await {
        if e.kind() != std::io::ErrorKind::NotFound {
            tracing::warn!("Failed to remove attachment {}: {}", path.display(), e);
        }
    }
}
