//! File attachments for image-analysis turns
//!
//! Handles the user-supplied image file: the controller needs a local object
//! reference and a display name, never the file contents.

#![allow(dead_code)]

use std::path::Path;

/// Supported image formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Png,
    Jpeg,
    Gif,
    WebP,
}

impl ImageFormat {
    /// Get the MIME type for this format
    pub fn mime_type(&self) -> &'static str {
        match self {
            ImageFormat::Png => "image/png",
            ImageFormat::Jpeg => "image/jpeg",
            ImageFormat::Gif => "image/gif",
            ImageFormat::WebP => "image/webp",
        }
    }

    /// Detect format from file extension
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "png" => Some(ImageFormat::Png),
            "jpg" | "jpeg" => Some(ImageFormat::Jpeg),
            "gif" => Some(ImageFormat::Gif),
            "webp" => Some(ImageFormat::WebP),
            _ => None,
        }
    }
}

/// A user-supplied file staged for an image-analysis turn
///
/// `url` is a local object reference (`file://` URI); `name` is the display
/// name used as the attachment's alt text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileAttachment {
    pub name: String,
    pub url: String,
    pub format: Option<ImageFormat>,
}

impl FileAttachment {
    /// Build an attachment from a filesystem path
    ///
    /// The file is referenced, not read: the backend adapter decides what to
    /// do with the URI.
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("attachment")
            .to_string();
        let format = path
            .extension()
            .and_then(|e| e.to_str())
            .and_then(ImageFormat::from_extension);
        Self {
            name,
            url: format!("file://{}", path.display()),
            format,
        }
    }

    /// Build an attachment from an already-resolved reference
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        let name = name.into();
        let format = Path::new(&name)
            .extension()
            .and_then(|e| e.to_str())
            .and_then(ImageFormat::from_extension);
        Self {
            name,
            url: url.into(),
            format,
        }
    }

    /// Whether the file extension looks like a supported image
    pub fn is_image(&self) -> bool {
        self.format.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(ImageFormat::from_extension("PNG"), Some(ImageFormat::Png));
        assert_eq!(ImageFormat::from_extension("jpeg"), Some(ImageFormat::Jpeg));
        assert_eq!(ImageFormat::from_extension("txt"), None);
    }

    #[test]
    fn test_from_path_uses_file_name_and_uri() {
        let att = FileAttachment::from_path("/tmp/photos/cat.png");
        assert_eq!(att.name, "cat.png");
        assert_eq!(att.url, "file:///tmp/photos/cat.png");
        assert!(att.is_image());
    }

    #[test]
    fn test_non_image_extension() {
        let att = FileAttachment::from_path("/tmp/notes.txt");
        assert!(!att.is_image());
        assert_eq!(att.format, None);
    }
}
