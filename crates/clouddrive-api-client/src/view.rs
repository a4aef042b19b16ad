//! Directory listing state and its text rendering.

use crate::format::{format_date, format_file_size, FileKind};
use clouddrive_core::models::FileEntry;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ViewMode {
    #[default]
    Grid,
    List,
}

impl FromStr for ViewMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "grid" => Ok(ViewMode::Grid),
            "list" => Ok(ViewMode::List),
            other => Err(anyhow::anyhow!("Unknown view mode: {}", other)),
        }
    }
}

const GRID_COLUMNS: usize = 3;
const GRID_CELL_WIDTH: usize = 32;

/// Last fetched listing plus the layout it is shown in.
#[derive(Debug, Default)]
pub struct DirectoryView {
    files: Vec<FileEntry>,
    mode: ViewMode,
    error: Option<String>,
}

impl DirectoryView {
    pub fn new(mode: ViewMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: ViewMode) {
        self.mode = mode;
    }

    pub fn files(&self) -> &[FileEntry] {
        &self.files
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn set_files(&mut self, files: Vec<FileEntry>) {
        self.files = files;
        self.error = None;
    }

    /// A failed load replaces the listing with an error panel.
    pub fn set_error(&mut self, message: impl Into<String>) {
        self.files.clear();
        self.error = Some(message.into());
    }

    pub fn find(&self, key: &str) -> Option<&FileEntry> {
        self.files.iter().find(|f| f.key == key)
    }

    pub fn preview(&self, key: &str) -> Option<FilePreview> {
        self.find(key).map(FilePreview::from)
    }

    pub fn render(&self) -> String {
        if let Some(ref message) = self.error {
            return format!("Error loading files\n{}", message);
        }
        if self.files.is_empty() {
            return "No files found\nUpload some files to get started!".to_string();
        }
        match self.mode {
            ViewMode::Grid => self.render_grid(),
            ViewMode::List => self.render_list(),
        }
    }

    fn render_grid(&self) -> String {
        self.files
            .chunks(GRID_COLUMNS)
            .map(|row| {
                row.iter()
                    .map(|f| {
                        let cell = format!(
                            "[{}] {} ({})",
                            FileKind::from_file_name(&f.file_name),
                            f.file_name,
                            format_file_size(f.size)
                        );
                        format!("{:<width$}", cell, width = GRID_CELL_WIDTH)
                    })
                    .collect::<String>()
                    .trim_end()
                    .to_string()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn render_list(&self) -> String {
        self.files
            .iter()
            .map(|f| {
                format!(
                    "{:<12} {:>10}  {}  {}",
                    FileKind::from_file_name(&f.file_name).label(),
                    format_file_size(f.size),
                    format_date(&f.last_modified),
                    f.file_name
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Metadata-only preview of one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePreview {
    pub key: String,
    pub file_name: String,
    pub kind: FileKind,
    pub size: String,
    pub uploaded: String,
}

impl From<&FileEntry> for FilePreview {
    fn from(entry: &FileEntry) -> Self {
        Self {
            key: entry.key.clone(),
            file_name: entry.file_name.clone(),
            kind: FileKind::from_file_name(&entry.file_name),
            size: format_file_size(entry.size),
            uploaded: format_date(&entry.last_modified),
        }
    }
}

impl fmt::Display for FilePreview {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.file_name)?;
        writeln!(f, "Type: {}", self.kind)?;
        writeln!(f, "Size: {}", self.size)?;
        write!(f, "Uploaded: {}", self.uploaded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn entry(name: &str, size: u64) -> FileEntry {
        FileEntry {
            key: format!("uploads/{}", name),
            file_name: name.to_string(),
            url: format!("https://b.s3.us-east-1.amazonaws.com/uploads/{}", name),
            size,
            last_modified: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
            etag: None,
        }
    }

    #[test]
    fn empty_state() {
        let view = DirectoryView::new(ViewMode::Grid);
        assert!(view.render().starts_with("No files found"));
    }

    #[test]
    fn error_panel_replaces_listing() {
        let mut view = DirectoryView::default();
        view.set_files(vec![entry("a.txt", 1)]);
        view.set_error("Failed to load files: NoSuchBucket");
        assert!(view.files().is_empty());
        assert_eq!(
            view.render(),
            "Error loading files\nFailed to load files: NoSuchBucket"
        );
    }

    #[test]
    fn list_layout_has_one_line_per_file() {
        let mut view = DirectoryView::new(ViewMode::List);
        view.set_files(vec![entry("a.txt", 1536), entry("b.png", 10)]);
        let rendered = view.render();
        let lines: Vec<_> = rendered.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("1.5 KB"));
        assert!(lines[0].contains("2024-05-01"));
        assert!(lines[0].ends_with("a.txt"));
        assert!(lines[1].starts_with("image"));
    }

    #[test]
    fn grid_layout_wraps_rows() {
        let mut view = DirectoryView::new(ViewMode::Grid);
        view.set_files((0..4).map(|i| entry(&format!("{}.txt", i), 1)).collect());
        assert_eq!(view.render().lines().count(), 2);
    }

    #[test]
    fn preview_shows_metadata() {
        let mut view = DirectoryView::default();
        view.set_files(vec![entry("report.pdf", 1048576)]);
        let preview = view.preview("uploads/report.pdf").unwrap();
        assert_eq!(preview.kind, FileKind::Pdf);
        assert_eq!(
            preview.to_string(),
            "report.pdf\nType: pdf\nSize: 1 MB\nUploaded: 2024-05-01"
        );
        assert!(view.preview("uploads/missing").is_none());
    }

    #[test]
    fn view_mode_parses() {
        assert_eq!("LIST".parse::<ViewMode>().unwrap(), ViewMode::List);
        assert!("tiles".parse::<ViewMode>().is_err());
    }
}
