/// Fixed extension → mime-type table. Lookup is case-insensitive on the
/// extension; anything unknown maps to a generic binary type.
const MIME_TABLE: &[(&str, &str)] = &[
    ("png", "image/png"),
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("gif", "image/gif"),
    ("webp", "image/webp"),
    ("svg", "image/svg+xml"),
    ("ico", "image/x-icon"),
    ("bmp", "image/bmp"),
    ("mp4", "video/mp4"),
    ("webm", "video/webm"),
    ("mov", "video/quicktime"),
    ("avi", "video/x-msvideo"),
    ("pdf", "application/pdf"),
    ("txt", "text/plain"),
    ("csv", "text/csv"),
    ("json", "application/json"),
    ("zip", "application/zip"),
    ("doc", "application/msword"),
    ("docx", "application/vnd.openxmlformats-officedocument.wordprocessingml.document"),
    ("xls", "application/vnd.ms-excel"),
    ("xlsx", "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"),
    ("ppt", "application/vnd.ms-powerpoint"),
    ("pptx", "application/vnd.openxmlformats-officedocument.presentationml.presentation"),
    ("mp3", "audio/mpeg"),
    ("wav", "audio/wav"),
    ("eps", "application/postscript"),
    ("ai", "application/postscript"),
    ("psd", "image/vnd.adobe.photoshop"),
];

/// Fallback for names without a recognized extension.
pub const DEFAULT_MIME: &str = "application/octet-stream";

/// Derive the mime type from a file name's extension.
pub fn mime_for_name(name: &str) -> &'static str {
    let ext = match name.rsplit_once('.') {
        Some((_, ext)) if !ext.is_empty() => ext.to_ascii_lowercase(),
        _ => return DEFAULT_MIME,
    };
    for &(known, mime) in MIME_TABLE {
        if known == ext {
            return mime;
        }
    }
    DEFAULT_MIME
}

/// Coarse grouping used by the preview modal and icon selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MimeCategory {
    Image,
    Video,
    Pdf,
    Other,
}

impl MimeCategory {
    pub fn of(mime: &str) -> Self {
        if mime.starts_with("image/") {
            MimeCategory::Image
        } else if mime.starts_with("video/") {
            MimeCategory::Video
        } else if mime == "application/pdf" {
            MimeCategory::Pdf
        } else {
            MimeCategory::Other
        }
    }

    /// Single-cell glyph shown next to item names.
    pub fn glyph(self) -> &'static str {
        match self {
            MimeCategory::Image => "◩",
            MimeCategory::Video => "▶",
            MimeCategory::Pdf => "▤",
            MimeCategory::Other => "■",
        }
    }
}
