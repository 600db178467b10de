//! Locally chosen image files attached to a portfolio submission.

use std::fmt;

/// A file picked by the user. Holds the raw bytes, never a remote URL.
#[derive(Clone, PartialEq, Eq)]
pub struct ImageUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }

    /// Returns `true` for `image/*` content types.
    pub fn is_image(&self) -> bool {
        self.content_type
            .split_once('/')
            .map(|(top, sub)| top.eq_ignore_ascii_case("image") && !sub.is_empty())
            .unwrap_or(false)
    }

    /// Guesses an `image/*` content type from a file extension.
    pub fn content_type_for(file_name: &str) -> Option<&'static str> {
        let (_, ext) = file_name.rsplit_once('.')?;
        match ext.to_ascii_lowercase().as_str() {
            "png" => Some("image/png"),
            "jpg" | "jpeg" => Some("image/jpeg"),
            "gif" => Some("image/gif"),
            "webp" => Some("image/webp"),
            "svg" => Some("image/svg+xml"),
            "bmp" => Some("image/bmp"),
            "avif" => Some("image/avif"),
            _ => None,
        }
    }
}

// Bytes are elided so form state can be logged.
impl fmt::Debug for ImageUpload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageUpload")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_detection_uses_top_level_type() {
        assert!(ImageUpload::new("a.png", "image/png", vec![]).is_image());
        assert!(ImageUpload::new("a.PNG", "IMAGE/PNG", vec![]).is_image());
        assert!(!ImageUpload::new("a.pdf", "application/pdf", vec![]).is_image());
        assert!(!ImageUpload::new("a", "image/", vec![]).is_image());
    }

    #[test]
    fn content_type_guess_covers_common_extensions() {
        assert_eq!(ImageUpload::content_type_for("logo.JPG"), Some("image/jpeg"));
        assert_eq!(ImageUpload::content_type_for("logo.webp"), Some("image/webp"));
        assert_eq!(ImageUpload::content_type_for("notes.txt"), None);
        assert_eq!(ImageUpload::content_type_for("README"), None);
    }
}
