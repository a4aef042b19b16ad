//! Upload orchestration.
//!
//! A batch moves through explicit states:
//!
//! ```text
//! Idle -> Transferring{0} -> Confirming{0} -> Transferring{1} -> ... -> Succeeded
//!   \__________________________\_________________\______________________> Failed
//! ```
//!
//! Credentials for the whole selection are requested once, then each file is PUT
//! directly to storage and confirmed, strictly one at a time. The first failure
//! ends the batch; later files are never attempted. Objects already stored by then
//! are handled according to the batch's [`OrphanPolicy`].

use crate::selection::PendingFile;
use crate::{error_message, ApiClient};
use clouddrive_core::models::{ConfirmUploadRequest, PresignedUpload, UploadedFile};
use reqwest::StatusCode;
use thiserror::Error;

/// What to do with objects stored earlier in a batch that later failed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OrphanPolicy {
    /// Leave them in the bucket.
    #[default]
    Retain,
    /// Issue a best-effort delete for each of them.
    Delete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadState {
    Idle,
    Transferring { index: usize },
    Confirming { index: usize },
    Succeeded,
    Failed,
}

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("No files selected")]
    NothingSelected,

    /// The presign request failed; carries the server's message.
    #[error("{0}")]
    Credentials(String),

    #[error("Server issued {issued} upload URLs for {requested} files")]
    SlotMismatch { requested: usize, issued: usize },

    #[error("Failed to upload {file_name}: S3 upload failed for {file_name}")]
    Rejected {
        file_name: String,
        status: StatusCode,
    },

    #[error("Failed to upload {file_name}: {message}")]
    Transport { file_name: String, message: String },

    #[error("Failed to upload {file_name}: {message}")]
    Confirmation { file_name: String, message: String },
}

impl UploadError {
    /// Name of the file the batch stopped at, when the failure is file-specific.
    pub fn file_name(&self) -> Option<&str> {
        match self {
            UploadError::Rejected { file_name, .. }
            | UploadError::Transport { file_name, .. }
            | UploadError::Confirmation { file_name, .. } => Some(file_name),
            _ => None,
        }
    }
}

/// A failed batch: the single aggregate error plus the keys stored earlier in
/// the discarded batch that are still in the bucket.
#[derive(Debug, Error)]
#[error("{error}")]
pub struct UploadFailure {
    pub error: UploadError,
    pub orphaned_keys: Vec<String>,
}

/// A completed batch.
#[derive(Debug, Clone, Default)]
pub struct UploadReport {
    pub uploaded: Vec<UploadedFile>,
}

impl UploadReport {
    /// One `name (url)` entry per uploaded file, comma separated.
    pub fn summary(&self) -> String {
        self.uploaded
            .iter()
            .map(|f| format!("{} ({})", f.original_name, f.url))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// One upload batch over a borrowed selection.
pub struct UploadBatch<'a> {
    client: &'a ApiClient,
    files: &'a [PendingFile],
    policy: OrphanPolicy,
    state: UploadState,
    slots: Vec<PresignedUpload>,
    stored_keys: Vec<String>,
    uploaded: Vec<UploadedFile>,
}

impl<'a> UploadBatch<'a> {
    pub fn new(client: &'a ApiClient, files: &'a [PendingFile], policy: OrphanPolicy) -> Self {
        Self {
            client,
            files,
            policy,
            state: UploadState::Idle,
            slots: Vec::new(),
            stored_keys: Vec::new(),
            uploaded: Vec::new(),
        }
    }

    pub fn state(&self) -> UploadState {
        self.state
    }

    /// Coarse progress in percent: `(index + 1) / total * 100` while file `index`
    /// is in flight.
    pub fn progress(&self) -> f64 {
        let total = self.files.len();
        match self.state {
            UploadState::Transferring { index } | UploadState::Confirming { index } => {
                (index + 1) as f64 / total as f64 * 100.0
            }
            UploadState::Succeeded => 100.0,
            UploadState::Idle | UploadState::Failed => 0.0,
        }
    }

    /// Advance by one transition. On error the batch is `Failed`.
    pub async fn step(&mut self) -> Result<(), UploadError> {
        let result = match self.state {
            UploadState::Idle => self.request_credentials().await,
            UploadState::Transferring { index } => self.transfer(index).await,
            UploadState::Confirming { index } => self.confirm(index).await,
            UploadState::Succeeded | UploadState::Failed => Ok(()),
        };

        if result.is_err() {
            self.state = UploadState::Failed;
        }
        result
    }

    /// Drive the batch to a terminal state. `on_progress` is called before each
    /// file's PUT.
    pub async fn run<F>(mut self, mut on_progress: F) -> Result<UploadReport, UploadFailure>
    where
        F: FnMut(f64),
    {
        loop {
            match self.state {
                UploadState::Succeeded => {
                    tracing::info!(count = self.uploaded.len(), "Upload batch complete");
                    return Ok(UploadReport {
                        uploaded: self.uploaded,
                    });
                }
                UploadState::Transferring { .. } => on_progress(self.progress()),
                _ => {}
            }

            if let Err(error) = self.step().await {
                tracing::warn!(
                    error = %error,
                    stored = self.stored_keys.len(),
                    "Upload batch failed"
                );
                let orphaned_keys = self.settle_orphans().await;
                return Err(UploadFailure {
                    error,
                    orphaned_keys,
                });
            }
        }
    }

    async fn request_credentials(&mut self) -> Result<(), UploadError> {
        if self.files.is_empty() {
            return Err(UploadError::NothingSelected);
        }

        let descriptors: Vec<_> = self.files.iter().map(PendingFile::descriptor).collect();
        let response = self
            .client
            .generate_presigned_urls(&descriptors)
            .await
            .map_err(|e| UploadError::Credentials(error_message(&e)))?;

        if response.presigned_data.len() != self.files.len() {
            return Err(UploadError::SlotMismatch {
                requested: self.files.len(),
                issued: response.presigned_data.len(),
            });
        }

        self.slots = response.presigned_data;
        self.state = UploadState::Transferring { index: 0 };
        Ok(())
    }

    async fn transfer(&mut self, index: usize) -> Result<(), UploadError> {
        let files = self.files;
        let file = &files[index];
        // Slots correspond to files by position
        let slot = &self.slots[index];

        let status = self
            .client
            .put_object(&slot.presigned_url, &file.content_type, file.data.clone())
            .await
            .map_err(|e| UploadError::Transport {
                file_name: file.name.clone(),
                message: format!("{:#}", e),
            })?;

        if !status.is_success() {
            return Err(UploadError::Rejected {
                file_name: file.name.clone(),
                status,
            });
        }

        tracing::debug!(key = %slot.s3_key, size = file.size, "Stored object");
        self.stored_keys.push(slot.s3_key.clone());
        self.state = UploadState::Confirming { index };
        Ok(())
    }

    async fn confirm(&mut self, index: usize) -> Result<(), UploadError> {
        let slot = &self.slots[index];
        let response = self
            .client
            .confirm_upload(&ConfirmUploadRequest::from(slot))
            .await
            .map_err(|e| UploadError::Confirmation {
                file_name: self.files[index].name.clone(),
                message: error_message(&e),
            })?;

        self.uploaded.push(response.uploaded_file);
        self.state = if index + 1 < self.files.len() {
            UploadState::Transferring { index: index + 1 }
        } else {
            UploadState::Succeeded
        };
        Ok(())
    }

    /// Apply the orphan policy; returns the keys that remain stored.
    async fn settle_orphans(&mut self) -> Vec<String> {
        let stored = std::mem::take(&mut self.stored_keys);
        match self.policy {
            OrphanPolicy::Retain => stored,
            OrphanPolicy::Delete => {
                let mut remaining = Vec::new();
                for key in stored {
                    if let Err(e) = self.client.delete_file(&key).await {
                        tracing::warn!(key = %key, error = %e, "Failed to remove orphaned object");
                        remaining.push(key);
                    }
                }
                remaining
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;

    fn files(n: usize) -> Vec<PendingFile> {
        (0..n)
            .map(|i| {
                PendingFile::new(format!("{}.txt", i), "text/plain", Bytes::from_static(b"x"))
            })
            .collect()
    }

    #[test]
    fn progress_is_per_file() {
        let client = ApiClient::new("http://localhost:1").unwrap();
        let files = files(4);
        let mut batch = UploadBatch::new(&client, &files, OrphanPolicy::Retain);
        assert_eq!(batch.progress(), 0.0);

        batch.state = UploadState::Transferring { index: 0 };
        assert_eq!(batch.progress(), 25.0);
        batch.state = UploadState::Confirming { index: 2 };
        assert_eq!(batch.progress(), 75.0);
        batch.state = UploadState::Succeeded;
        assert_eq!(batch.progress(), 100.0);
    }

    #[tokio::test]
    async fn empty_selection_fails_without_network() {
        let client = ApiClient::new("http://localhost:1").unwrap();
        let failure = UploadBatch::new(&client, &[], OrphanPolicy::Retain)
            .run(|_| {})
            .await
            .unwrap_err();
        assert!(matches!(failure.error, UploadError::NothingSelected));
        assert!(failure.orphaned_keys.is_empty());
    }

    #[test]
    fn rejected_message_names_file() {
        let err = UploadError::Rejected {
            file_name: "b.txt".to_string(),
            status: StatusCode::INTERNAL_SERVER_ERROR,
        };
        assert_eq!(
            err.to_string(),
            "Failed to upload b.txt: S3 upload failed for b.txt"
        );
        assert_eq!(err.file_name(), Some("b.txt"));
    }
}
