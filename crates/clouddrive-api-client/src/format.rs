//! Display helpers: human-readable sizes, dates, and file kinds.

use chrono::{DateTime, Utc};
use std::fmt;

const SIZE_UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];

/// Format a byte count with 1024-based units and at most two decimals,
/// trailing zeros dropped (`1536` → `"1.5 KB"`). Sizes past GB stay in GB.
pub fn format_file_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let mut unit = 0;
    while unit + 1 < SIZE_UNITS.len() && bytes >= 1024u64.pow(unit as u32 + 1) {
        unit += 1;
    }

    let value = bytes as f64 / 1024f64.powi(unit as i32);
    let rounded = (value * 100.0).round() / 100.0;
    format!("{} {}", rounded, SIZE_UNITS[unit])
}

/// Calendar date of an upload, as shown in listings.
pub fn format_date(timestamp: &DateTime<Utc>) -> String {
    timestamp.format("%Y-%m-%d").to_string()
}

/// Coarse file category used for icons and labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Image,
    Video,
    Audio,
    Pdf,
    Word,
    Spreadsheet,
    Archive,
    Text,
    Other,
}

impl FileKind {
    /// Classify a MIME type. Rules apply in order; the first match wins.
    pub fn classify(mime: &str) -> Self {
        let mime = mime.to_ascii_lowercase();
        if mime.starts_with("image/") {
            FileKind::Image
        } else if mime.starts_with("video/") {
            FileKind::Video
        } else if mime.starts_with("audio/") {
            FileKind::Audio
        } else if mime.contains("pdf") {
            FileKind::Pdf
        } else if mime.contains("word") {
            FileKind::Word
        } else if mime.contains("excel") || mime.contains("spreadsheet") {
            FileKind::Spreadsheet
        } else if mime.contains("zip") || mime.contains("rar") {
            FileKind::Archive
        } else if mime.contains("text") {
            FileKind::Text
        } else {
            FileKind::Other
        }
    }

    /// Classify a stored object by the MIME type its name implies.
    pub fn from_file_name(name: &str) -> Self {
        mime_guess::from_path(name)
            .first_raw()
            .map(Self::classify)
            .unwrap_or(FileKind::Other)
    }

    pub fn label(&self) -> &'static str {
        match self {
            FileKind::Image => "image",
            FileKind::Video => "video",
            FileKind::Audio => "audio",
            FileKind::Pdf => "pdf",
            FileKind::Word => "word",
            FileKind::Spreadsheet => "spreadsheet",
            FileKind::Archive => "archive",
            FileKind::Text => "text",
            FileKind::Other => "file",
        }
    }
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
