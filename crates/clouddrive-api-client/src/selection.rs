//! Files chosen for the next upload batch.

use anyhow::{Context, Result};
use bytes::Bytes;
use clouddrive_core::models::FileDescriptor;
use std::path::Path;

/// A file waiting to be uploaded, held in memory.
#[derive(Debug, Clone)]
pub struct PendingFile {
    pub name: String,
    pub size: u64,
    pub content_type: String,
    pub data: Bytes,
}

impl PendingFile {
    pub fn new(name: impl Into<String>, content_type: impl Into<String>, data: Bytes) -> Self {
        Self {
            name: name.into(),
            size: data.len() as u64,
            content_type: content_type.into(),
            data,
        }
    }

    /// Read a local file. The MIME type is guessed from the extension.
    pub async fn from_path(path: &Path) -> Result<Self> {
        let data = tokio::fs::read(path)
            .await
            .with_context(|| format!("Failed to read file: {}", path.display()))?;

        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| anyhow::anyhow!("Invalid file name: {}", path.display()))?;

        let content_type = mime_guess::from_path(path)
            .first_or_octet_stream()
            .to_string();

        Ok(Self::new(name, content_type, Bytes::from(data)))
    }

    pub fn descriptor(&self) -> FileDescriptor {
        FileDescriptor {
            name: self.name.clone(),
            content_type: self.content_type.clone(),
            size: self.size,
        }
    }
}

/// Ordered pending-file set. A file with the same name and size as one already
/// selected is ignored.
#[derive(Debug, Default)]
pub struct FileSelection {
    files: Vec<PendingFile>,
}

impl FileSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file; returns `false` when it duplicates an existing entry.
    pub fn add(&mut self, file: PendingFile) -> bool {
        let duplicate = self
            .files
            .iter()
            .any(|f| f.name == file.name && f.size == file.size);
        if duplicate {
            tracing::debug!(name = %file.name, size = file.size, "Skipping duplicate selection");
            return false;
        }
        self.files.push(file);
        true
    }

    pub fn remove(&mut self, index: usize) -> Option<PendingFile> {
        (index < self.files.len()).then(|| self.files.remove(index))
    }

    pub fn clear(&mut self) {
        self.files.clear();
    }

    pub fn files(&self) -> &[PendingFile] {
        &self.files
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn total_size(&self) -> u64 {
        self.files.iter().map(|f| f.size).sum()
    }

    pub fn descriptors(&self) -> Vec<FileDescriptor> {
        self.files.iter().map(PendingFile::descriptor).collect()
    }

    /// Whether the selection is past the advertised per-batch limit.
    pub fn exceeds_batch_limit(&self, max_files: usize) -> bool {
        self.files.len() > max_files
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(name: &str, len: usize) -> PendingFile {
        PendingFile::new(name, "text/plain", Bytes::from(vec![b'x'; len]))
    }

    #[test]
    fn identical_name_and_size_is_deduplicated() {
        let mut selection = FileSelection::new();
        assert!(selection.add(file("a.txt", 3)));
        assert!(!selection.add(file("a.txt", 3)));
        assert_eq!(selection.len(), 1);
    }

    #[test]
    fn same_name_different_size_is_kept() {
        let mut selection = FileSelection::new();
        selection.add(file("a.txt", 3));
        selection.add(file("a.txt", 4));
        assert_eq!(selection.len(), 2);
        assert_eq!(selection.total_size(), 7);
    }

    #[test]
    fn remove_out_of_range_is_none() {
        let mut selection = FileSelection::new();
        selection.add(file("a.txt", 1));
        assert!(selection.remove(5).is_none());
        assert_eq!(selection.remove(0).unwrap().name, "a.txt");
        assert!(selection.is_empty());
    }

    #[test]
    fn descriptors_follow_selection_order() {
        let mut selection = FileSelection::new();
        selection.add(file("b.txt", 2));
        selection.add(file("a.txt", 1));
        let names: Vec<_> = selection.descriptors().into_iter().map(|d| d.name).collect();
        assert_eq!(names, vec!["b.txt", "a.txt"]);
    }

    #[test]
    fn batch_limit() {
        let mut selection = FileSelection::new();
        for i in 0..11 {
            selection.add(file(&format!("{}.txt", i), 1));
        }
        assert!(selection.exceeds_batch_limit(10));
        selection.remove(0);
        assert!(!selection.exceeds_batch_limit(10));
    }

    #[tokio::test]
    async fn from_path_guesses_content_type() {
        let dir = std::env::temp_dir().join(format!("clouddrive-sel-{}", std::process::id()));
        tokio::fs::create_dir_all(&dir).await.unwrap();
        let path = dir.join("notes.txt");
        tokio::fs::write(&path, b"hello").await.unwrap();

        let pending = PendingFile::from_path(&path).await.unwrap();
        assert_eq!(pending.name, "notes.txt");
        assert_eq!(pending.size, 5);
        assert_eq!(pending.content_type, "text/plain");

        tokio::fs::remove_dir_all(&dir).await.unwrap();
    }
}
