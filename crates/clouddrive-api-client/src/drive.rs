//! Drive controller: the selection, listing and status log behind one client.
//!
//! Every operation reports its outcome through the [`StatusLog`] instead of
//! failing the caller; the returned values exist for callers that want to act
//! on the result.

use crate::selection::{FileSelection, PendingFile};
use crate::status::StatusLog;
use crate::upload::{OrphanPolicy, UploadBatch, UploadReport};
use crate::view::{DirectoryView, FilePreview, ViewMode};
use crate::{error_message, is_api_error, ApiClient};

/// Confirmation text shown before a delete.
pub fn delete_prompt(file_name: &str) -> String {
    format!(
        "Are you sure you want to delete \"{}\"? This action cannot be undone.",
        file_name
    )
}

pub struct Drive {
    client: ApiClient,
    selection: FileSelection,
    view: DirectoryView,
    status: StatusLog,
    orphan_policy: OrphanPolicy,
}

impl Drive {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            selection: FileSelection::new(),
            view: DirectoryView::default(),
            status: StatusLog::new(),
            orphan_policy: OrphanPolicy::default(),
        }
    }

    pub fn with_orphan_policy(mut self, policy: OrphanPolicy) -> Self {
        self.orphan_policy = policy;
        self
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    pub fn selection(&self) -> &FileSelection {
        &self.selection
    }

    pub fn view(&self) -> &DirectoryView {
        &self.view
    }

    pub fn status(&self) -> &StatusLog {
        &self.status
    }

    pub fn status_mut(&mut self) -> &mut StatusLog {
        &mut self.status
    }

    pub fn add_file(&mut self, file: PendingFile) -> bool {
        self.selection.add(file)
    }

    pub fn remove_file(&mut self, index: usize) -> Option<PendingFile> {
        self.selection.remove(index)
    }

    /// Explicit user clear: drops the selection and every status message.
    pub fn clear_selection(&mut self) {
        self.selection.clear();
        self.status.clear();
    }

    /// Refetch the listing. A failure replaces the listing with an error panel.
    pub async fn refresh(&mut self) {
        match self.client.list_files().await {
            Ok(response) => {
                tracing::debug!(count = response.count, "Loaded file listing");
                self.view.set_files(response.files);
            }
            Err(e) => {
                let message = if is_api_error(&e) {
                    format!("Failed to load files: {}", error_message(&e))
                } else {
                    format!("Error loading files: {}", error_message(&e))
                };
                self.view.set_error(message);
            }
        }
    }

    /// Switch layout; the listing is refetched on every toggle.
    pub async fn toggle_view(&mut self, mode: ViewMode) {
        self.view.set_mode(mode);
        self.refresh().await;
    }

    pub fn preview(&self, key: &str) -> Option<FilePreview> {
        self.view.preview(key)
    }

    /// Obtain a download URL for `key`. Returns `None` when the request failed.
    pub async fn download(&mut self, key: &str, file_name: &str) -> Option<String> {
        self.status
            .info(format!("Generating download link for {}...", file_name));

        match self.client.download_url(key).await {
            Ok(response) => {
                self.status
                    .success(format!("Download started for {}", file_name));
                Some(response.download_url)
            }
            Err(e) if is_api_error(&e) => {
                self.status
                    .error(format!("Download failed: {}", error_message(&e)));
                None
            }
            Err(e) => {
                self.status
                    .error(format!("Download error: {}", error_message(&e)));
                None
            }
        }
    }

    /// Delete `key` once `confirm` accepts the prompt. Declining sends nothing.
    /// Returns whether the object was deleted.
    pub async fn delete<F>(&mut self, key: &str, file_name: &str, confirm: F) -> bool
    where
        F: FnOnce(&str) -> bool,
    {
        if !confirm(&delete_prompt(file_name)) {
            return false;
        }

        self.status.info(format!("Deleting {}...", file_name));

        match self.client.delete_file(key).await {
            Ok(_) => {
                self.status
                    .success(format!("Successfully deleted {}", file_name));
                self.refresh().await;
                true
            }
            Err(e) if is_api_error(&e) => {
                self.status
                    .error(format!("Delete failed: {}", error_message(&e)));
                false
            }
            Err(e) => {
                self.status
                    .error(format!("Delete error: {}", error_message(&e)));
                false
            }
        }
    }

    /// Upload the current selection as one batch.
    ///
    /// On success the selection is cleared and the listing refetched; the
    /// status log keeps the outcome. On failure the selection is kept. An empty
    /// selection is a no-op that leaves the status log untouched.
    pub async fn upload<F>(&mut self, on_progress: F) -> Option<UploadReport>
    where
        F: FnMut(f64),
    {
        if self.selection.is_empty() {
            return None;
        }
        self.status.clear();

        let result = UploadBatch::new(&self.client, self.selection.files(), self.orphan_policy)
            .run(on_progress)
            .await;

        match result {
            Ok(report) => {
                self.status.success("Files uploaded successfully!");
                self.status
                    .info(format!("Uploaded files: {}", report.summary()));
                self.selection.clear();
                self.refresh().await;
                Some(report)
            }
            Err(failure) => {
                if !failure.orphaned_keys.is_empty() {
                    tracing::warn!(keys = ?failure.orphaned_keys, "Objects left without confirmation");
                }
                self.status.error(format!("Upload error: {}", failure));
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_quotes_file_name() {
        assert_eq!(
            delete_prompt("a.txt"),
            "Are you sure you want to delete \"a.txt\"? This action cannot be undone."
        );
    }
}
