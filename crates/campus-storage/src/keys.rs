//! Upload key generation.

use campus_core::key_extension;
use uuid::Uuid;

/// Generate a fresh key for a file uploaded through `field`.
///
/// Produces `uploads/{field}/{uuid}.{ext}` where `ext` is the lowercased
/// filename extension, or `bin` when there is none. The random component
/// means two uploads of the same file never share a key.
pub fn generate_upload_key(field: &str, filename: &str) -> String {
    format!(
        "uploads/{}/{}.{}",
        field,
        Uuid::new_v4(),
        key_extension(filename)
    )
}
