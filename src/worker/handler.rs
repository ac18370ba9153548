//! Worker thread implementation for asynchronous vault operations.
//!
//! The worker owns the [`Vault`] and processes [`VaultRequest`] messages from a
//! channel, answering each with exactly one [`VaultResponse`] on a completion
//! channel. This replaces callback-style completion signaling: callers send a
//! request and block on (or poll) the response receiver, and the single worker
//! thread serializes all storage access — the single logical actor model.

use crate::domain::error::{Result, VaultError};
use crate::vault::Vault;
use crate::worker::{VaultRequest, VaultResponse};
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread::JoinHandle;

/// Worker state: the vault plus request dispatch.
///
/// Usable directly for synchronous processing, or spawned onto a dedicated
/// thread via [`VaultWorker::spawn`].
pub struct VaultWorker {
    vault: Vault,
}

impl VaultWorker {
    /// Creates a worker with a vault opened at `db_path`.
    ///
    /// # Errors
    ///
    /// Returns [`VaultError::Unavailable`] if the embedded database cannot be
    /// opened.
    pub fn new(db_path: impl Into<PathBuf>) -> Result<Self> {
        let vault = Vault::open(db_path.into())?;
        Ok(Self { vault })
    }

    /// Wraps an existing vault.
    #[must_use]
    pub fn with_vault(vault: Vault) -> Self {
        Self { vault }
    }

    /// Helper for handling vault operation results with consistent logging.
    ///
    /// Standardizes error handling across all operations: successes map
    /// through `on_success`, failures become [`VaultResponse::Error`] tagged
    /// with the operation name.
    fn handle_db_result<T, F>(operation: &str, result: Result<T>, on_success: F) -> VaultResponse
    where
        F: FnOnce(T) -> VaultResponse,
    {
        match result {
            Ok(value) => {
                tracing::debug!(operation = operation, "vault operation successful");
                on_success(value)
            }
            Err(e) => {
                tracing::debug!(operation = operation, error = %e, "vault operation failed");
                VaultResponse::Error {
                    message: format!("{operation}: {e}"),
                }
            }
        }
    }

    /// Processes one request and returns its response.
    ///
    /// This is the main dispatch entry point; every request variant maps to
    /// one façade call.
    pub fn handle_request(&mut self, request: VaultRequest) -> VaultResponse {
        let span = tracing::debug_span!("worker_handle_request", request_type = ?request_name(&request));
        let _guard = span.entered();

        match request {
            VaultRequest::SubmitProjects { submissions } => Self::handle_db_result(
                "submit projects",
                self.vault.save_all(&submissions),
                |projects| VaultResponse::ProjectsSaved {
                    count: projects.len(),
                    projects,
                },
            ),

            VaultRequest::LoadProjects => Self::handle_db_result(
                "load projects",
                self.vault.load_all(),
                |projects| VaultResponse::ProjectsLoaded { projects },
            ),

            VaultRequest::DeleteProject { id } => Self::handle_db_result(
                "delete project",
                self.vault.delete_project(id),
                |()| VaultResponse::ProjectDeleted { id },
            ),

            VaultRequest::ClearAll => {
                Self::handle_db_result("clear database", self.vault.clear_all(), |()| {
                    VaultResponse::Cleared
                })
            }

            VaultRequest::Stats => {
                Self::handle_db_result("database stats", self.vault.stats(), |stats| {
                    VaultResponse::Stats {
                        project_count: stats.project_count,
                        blob_count: stats.blob_count,
                    }
                })
            }

            VaultRequest::ExportSnapshot { path } => Self::handle_db_result(
                "export snapshot",
                self.vault.export_to_file(&path),
                |snapshot| VaultResponse::SnapshotExported {
                    path,
                    project_count: snapshot.projects.len(),
                },
            ),

            VaultRequest::ImportSnapshot { path } => Self::handle_db_result(
                "import snapshot",
                self.vault.import_from_file(&path),
                |project_count| VaultResponse::SnapshotImported { project_count },
            ),

            VaultRequest::FetchBlob { id } => Self::handle_db_result(
                "fetch blob",
                self.vault.fetch_blob(id),
                |found| match found {
                    Some((metadata, bytes)) => VaultResponse::BlobFetched { metadata, bytes },
                    None => VaultResponse::BlobMissing { id },
                },
            ),

            VaultRequest::Shutdown => {
                tracing::debug!("worker shutting down");
                VaultResponse::ShuttingDown
            }
        }
    }

    /// Spawns the worker onto a dedicated thread and returns its handle.
    ///
    /// The vault is opened before the thread starts, so an unusable database
    /// fails fast here rather than on the first request.
    ///
    /// # Errors
    ///
    /// Returns [`VaultError::Unavailable`] if the database cannot be opened,
    /// or [`VaultError::Worker`] if the thread cannot be spawned.
    pub fn spawn(db_path: impl Into<PathBuf>) -> Result<VaultWorkerHandle> {
        let mut worker = Self::new(db_path)?;

        let (request_tx, request_rx) = mpsc::channel::<VaultRequest>();
        let (response_tx, response_rx) = mpsc::channel::<VaultResponse>();

        let join = std::thread::Builder::new()
            .name("foliovault-worker".to_string())
            .spawn(move || {
                while let Ok(request) = request_rx.recv() {
                    let stopping = matches!(request, VaultRequest::Shutdown);
                    let response = worker.handle_request(request);
                    if response_tx.send(response).is_err() {
                        tracing::debug!("response channel closed, stopping worker");
                        break;
                    }
                    if stopping {
                        break;
                    }
                }
            })
            .map_err(|e| VaultError::Worker(format!("failed to spawn worker thread: {e}")))?;

        Ok(VaultWorkerHandle {
            request_tx,
            response_rx,
            join: Some(join),
        })
    }
}

/// Returns a short name for a request, for span fields.
fn request_name(request: &VaultRequest) -> &'static str {
    match request {
        VaultRequest::SubmitProjects { .. } => "SubmitProjects",
        VaultRequest::LoadProjects => "LoadProjects",
        VaultRequest::DeleteProject { .. } => "DeleteProject",
        VaultRequest::ClearAll => "ClearAll",
        VaultRequest::Stats => "Stats",
        VaultRequest::ExportSnapshot { .. } => "ExportSnapshot",
        VaultRequest::ImportSnapshot { .. } => "ImportSnapshot",
        VaultRequest::FetchBlob { .. } => "FetchBlob",
        VaultRequest::Shutdown => "Shutdown",
    }
}

/// Handle to a spawned vault worker.
///
/// Requests are answered one-for-one in submission order. Dropping the handle
/// asks the worker to stop and joins the thread.
pub struct VaultWorkerHandle {
    request_tx: mpsc::Sender<VaultRequest>,
    response_rx: mpsc::Receiver<VaultResponse>,
    join: Option<JoinHandle<()>>,
}

impl VaultWorkerHandle {
    /// Sends a request and blocks until its completion response arrives.
    ///
    /// # Errors
    ///
    /// Returns [`VaultError::Worker`] if the worker thread is gone and the
    /// channel is closed. Operation failures are not errors at this level;
    /// they arrive as [`VaultResponse::Error`].
    pub fn request(&self, request: VaultRequest) -> Result<VaultResponse> {
        self.request_tx
            .send(request)
            .map_err(|e| VaultError::Worker(format!("worker request channel closed: {e}")))?;
        self.response_rx
            .recv()
            .map_err(|e| VaultError::Worker(format!("worker response channel closed: {e}")))
    }

    /// Stops the worker and joins its thread.
    ///
    /// # Errors
    ///
    /// Returns [`VaultError::Worker`] if the worker already stopped.
    pub fn shutdown(mut self) -> Result<()> {
        let _ = self.request(VaultRequest::Shutdown)?;
        if let Some(join) = self.join.take() {
            join.join()
                .map_err(|_| VaultError::Worker("worker thread panicked".to_string()))?;
        }
        Ok(())
    }
}

impl Drop for VaultWorkerHandle {
    fn drop(&mut self) {
        if let Some(join) = self.join.take() {
            let _ = self.request_tx.send(VaultRequest::Shutdown);
            let _ = join.join();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ProjectSubmission;

    fn spawn_temp() -> (tempfile::TempDir, VaultWorkerHandle) {
        let dir = tempfile::tempdir().unwrap();
        let handle = VaultWorker::spawn(dir.path().join("vault.redb")).unwrap();
        (dir, handle)
    }

    #[test]
    fn submit_then_load_round_trip() {
        let (_dir, handle) = spawn_temp();

        let response = handle
            .request(VaultRequest::SubmitProjects {
                submissions: vec![
                    ProjectSubmission::new("A", "File", 100),
                    ProjectSubmission::new("B", "File", 200),
                ],
            })
            .unwrap();
        assert!(matches!(
            response,
            VaultResponse::ProjectsSaved { count: 2, .. }
        ));

        let response = handle.request(VaultRequest::LoadProjects).unwrap();
        let VaultResponse::ProjectsLoaded { projects } = response else {
            panic!("unexpected response: {response:?}");
        };
        assert_eq!(projects.len(), 2);
        assert_eq!(projects[0].id, 1);
    }

    #[test]
    fn responses_arrive_in_submission_order() {
        let (_dir, handle) = spawn_temp();

        handle
            .request(VaultRequest::SubmitProjects {
                submissions: vec![ProjectSubmission::new("only", "File", 1)],
            })
            .unwrap();

        let deleted = handle.request(VaultRequest::DeleteProject { id: 1 }).unwrap();
        assert_eq!(deleted, VaultResponse::ProjectDeleted { id: 1 });

        let stats = handle.request(VaultRequest::Stats).unwrap();
        assert_eq!(
            stats,
            VaultResponse::Stats {
                project_count: 0,
                blob_count: 0
            }
        );
    }

    #[test]
    fn failed_operation_comes_back_as_error_response() {
        let (dir, handle) = spawn_temp();

        let response = handle
            .request(VaultRequest::ImportSnapshot {
                path: dir.path().join("does-not-exist.json"),
            })
            .unwrap();
        assert!(matches!(response, VaultResponse::Error { .. }));
    }

    #[test]
    fn fetch_missing_blob_reports_blob_missing() {
        let (_dir, handle) = spawn_temp();

        let response = handle.request(VaultRequest::FetchBlob { id: 42 }).unwrap();
        assert_eq!(response, VaultResponse::BlobMissing { id: 42 });
    }

    #[test]
    fn shutdown_stops_the_worker() {
        let (_dir, handle) = spawn_temp();
        handle.shutdown().unwrap();
    }
}
