//! Files embedded in document shortcuts as `data:` URLs.

use std::path::Path;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::error::{AttachmentError, Result};

pub fn mime_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("pdf") => "application/pdf",
        Some("txt") => "text/plain",
        Some("md") => "text/markdown",
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        _ => "application/octet-stream",
    }
}

pub fn encode_bytes(mime: &str, bytes: &[u8]) -> String {
    format!("data:{mime};base64,{}", STANDARD.encode(bytes))
}

/// Read `path` and encode it. Empty files are refused.
pub fn encode_file(path: &Path) -> Result<String, AttachmentError> {
    let bytes = std::fs::read(path).map_err(|source| AttachmentError::ReadFailed {
        path: path.to_path_buf(),
        source,
    })?;
    if bytes.is_empty() {
        return Err(AttachmentError::EmptyFile(path.to_path_buf()));
    }
    Ok(encode_bytes(mime_for(path), &bytes))
}

/// Shortcut name suggested for a file: its stem.
pub fn default_name(path: &Path) -> Option<String> {
    path.file_stem()
        .and_then(|s| s.to_str())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Split a stored payload into its mime type and bytes.
pub fn decode_data_url(content: &str) -> Result<(String, Vec<u8>), AttachmentError> {
    let rest = content
        .strip_prefix("data:")
        .ok_or(AttachmentError::NotDataUrl)?;
    let (mime, payload) = rest
        .split_once(";base64,")
        .ok_or(AttachmentError::NotDataUrl)?;
    let bytes = STANDARD.decode(payload)?;
    Ok((mime.to_string(), bytes))
}

/// Decode a stored payload and write its bytes to `path`. Returns the byte count.
pub fn save_data_url(content: &str, path: &Path) -> Result<usize> {
    let (_, bytes) = decode_data_url(content)?;
    std::fs::write(path, &bytes)?;
    Ok(bytes.len())
}
