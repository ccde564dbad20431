//! Content-Type derivation for uploaded files

use std::path::Path;

/// Fallback when the extension is unknown or missing.
pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// Derive the Content-Type for a file from its extension.
///
/// Unknown or missing extensions fall back to [`DEFAULT_CONTENT_TYPE`].
pub fn content_type_for_filename(filename: &str) -> &'static str {
    let extension = Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        // Images
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "avif" => "image/avif",
        "svg" => "image/svg+xml",
        "bmp" => "image/bmp",
        "ico" => "image/x-icon",
        "heic" => "image/heic",
        // Videos
        "mp4" => "video/mp4",
        "webm" => "video/webm",
        "mov" => "video/quicktime",
        // Audio
        "mp3" => "audio/mpeg",
        "wav" => "audio/wav",
        "ogg" => "audio/ogg",
        "m4a" => "audio/mp4",
        // Documents
        "pdf" => "application/pdf",
        "doc" => "application/msword",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "xls" => "application/vnd.ms-excel",
        "xlsx" => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        "ppt" => "application/vnd.ms-powerpoint",
        "pptx" => "application/vnd.openxmlformats-officedocument.presentationml.presentation",
        "txt" => "text/plain",
        "csv" => "text/csv",
        "json" => "application/json",
        // Archives
        "zip" => "application/zip",
        "gz" => "application/gzip",
        _ => DEFAULT_CONTENT_TYPE,
    }
}

/// File extension used when generating storage keys: lowercased, `bin` when absent.
pub fn key_extension(filename: &str) -> String {
    Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .filter(|e| !e.is_empty() && e.chars().all(|c| c.is_ascii_alphanumeric()))
        .map(|e| e.to_lowercase())
        .unwrap_or_else(|| "bin".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_extensions() {
        assert_eq!(content_type_for_filename("photo.JPG"), "image/jpeg");
        assert_eq!(content_type_for_filename("report.pdf"), "application/pdf");
        assert_eq!(content_type_for_filename("marks.xlsx"),
            "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet");
    }

    #[test]
    fn test_unknown_falls_back_to_octet_stream() {
        assert_eq!(content_type_for_filename("blob.xyz"), DEFAULT_CONTENT_TYPE);
        assert_eq!(content_type_for_filename("README"), DEFAULT_CONTENT_TYPE);
        assert_eq!(content_type_for_filename(""), DEFAULT_CONTENT_TYPE);
    }

    #[test]
    fn test_key_extension() {
        assert_eq!(key_extension("Photo.PNG"), "png");
        assert_eq!(key_extension("archive.tar.gz"), "gz");
        assert_eq!(key_extension("noext"), "bin");
        assert_eq!(key_extension("weird.p$g"), "bin");
    }
}
