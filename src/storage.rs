//! Content-addressed storage for uploaded document files.
//!
//! Files are stored under a two-level directory keyed by content hash:
//! `{documents_dir}/{hash[0..2]}/{hash[0..16]}.{extension}`. The relative
//! path doubles as the opaque file ref recorded on the owning document.

use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};

/// Compute the SHA-256 hash of file content.
pub fn content_hash(content: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content);
    hex::encode(hasher.finalize())
}

/// The relative storage path (and file ref) for a piece of content.
pub fn file_ref_for(content: &[u8], extension: &str) -> String {
    let hash = content_hash(content);
    format!("{}/{}.{}", &hash[..2], &hash[..16], extension)
}

/// Save content and return its file ref. Identical content saves to the
/// same ref; the write is simply repeated.
pub fn save(documents_dir: &Path, content: &[u8], extension: &str) -> std::io::Result<String> {
    let file_ref = file_ref_for(content, extension);
    let path = documents_dir.join(&file_ref);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&path, content)?;
    Ok(file_ref)
}

/// Read content back by file ref.
pub fn open(documents_dir: &Path, file_ref: &str) -> std::io::Result<Vec<u8>> {
    std::fs::read(resolve_ref(documents_dir, file_ref))
}

/// Delete stored content. Returns false when the ref points at nothing.
pub fn delete(documents_dir: &Path, file_ref: &str) -> bool {
    std::fs::remove_file(resolve_ref(documents_dir, file_ref)).is_ok()
}

fn resolve_ref(documents_dir: &Path, file_ref: &str) -> PathBuf {
    documents_dir.join(file_ref)
}

/// Pick a file extension for uploaded content, sniffing the bytes first
/// and falling back to the original filename's extension.
pub fn detect_extension(content: &[u8], filename: &str) -> String {
    if let Some(kind) = infer::get(content) {
        return kind.extension().to_string();
    }
    Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_else(|| "bin".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_file_ref_layout() {
        let file_ref = file_ref_for(b"brochure content", "pdf");
        let (prefix, rest) = file_ref.split_once('/').unwrap();
        assert_eq!(prefix.len(), 2);
        assert!(rest.ends_with(".pdf"));
        assert!(rest.starts_with(prefix));
    }

    #[test]
    fn test_save_open_delete_round_trip() {
        let dir = tempdir().unwrap();
        let content = b"quote sheet";

        let file_ref = save(dir.path(), content, "txt").unwrap();
        assert_eq!(open(dir.path(), &file_ref).unwrap(), content);
        assert!(delete(dir.path(), &file_ref));
        assert!(!delete(dir.path(), &file_ref));
        assert!(open(dir.path(), &file_ref).is_err());
    }

    #[test]
    fn test_identical_content_same_ref() {
        let dir = tempdir().unwrap();
        let a = save(dir.path(), b"same bytes", "pdf").unwrap();
        let b = save(dir.path(), b"same bytes", "pdf").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_detect_extension_falls_back_to_filename() {
        // Plain text is not sniffable; the filename extension wins.
        assert_eq!(detect_extension(b"just text", "Quote.TXT"), "txt");
        assert_eq!(detect_extension(b"just text", "noext"), "bin");
        // PDF magic bytes are sniffed regardless of filename.
        assert_eq!(detect_extension(b"%PDF-1.7 rest", "misleading.txt"), "pdf");
    }
}
