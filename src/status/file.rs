//! File-based status persistence.

use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{LoadResult, StatusError, StatusReport, StatusStore};

/// Current status file format version.
const STATUS_FILE_VERSION: u32 = 1;

/// On-disk status file format.
///
/// Incompatible versions are treated as corrupted.
#[derive(Debug, Serialize, Deserialize)]
struct StatusFile {
    version: u32,

    /// Unix timestamp of the save. Informational only.
    #[serde(skip_serializing_if = "Option::is_none")]
    saved_at: Option<String>,

    #[serde(flatten)]
    report: StatusReport,
}

impl StatusFile {
    fn new(report: &StatusReport) -> Self {
        Self {
            version: STATUS_FILE_VERSION,
            saved_at: Some(unix_timestamp_now()),
            report: report.clone(),
        }
    }
}

fn unix_timestamp_now() -> String {
    use std::time::SystemTime;

    let duration = SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .unwrap_or_default();

    format!("{}", duration.as_secs())
}

/// File-based implementation of [`StatusStore`].
///
/// Writes go to `{path}.tmp` first and are then renamed over `{path}`, so
/// readers see either the old report or the new one.
#[derive(Debug, Clone)]
pub struct FileStatusStore {
    path: PathBuf,
}

impl FileStatusStore {
    /// Creates a store writing to `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the status file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn save_blocking(path: &Path, file: &StatusFile) -> Result<(), StatusError> {
        let content = serde_json::to_string_pretty(file).map_err(StatusError::Serialize)?;

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(StatusError::Write)?;
        }

        // status.json -> status.json.tmp, keeping the original extension
        let temp_path = PathBuf::from(format!("{}.tmp", path.display()));

        std::fs::write(&temp_path, content).map_err(StatusError::Write)?;
        std::fs::rename(&temp_path, path).map_err(StatusError::Write)?;

        Ok(())
    }
}

impl StatusStore for FileStatusStore {
    fn load(&self) -> LoadResult {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == ErrorKind::NotFound => return LoadResult::NotFound,
            Err(e) => {
                return LoadResult::Corrupted {
                    reason: format!("Failed to read file: {e}"),
                };
            }
        };

        match serde_json::from_str::<StatusFile>(&content) {
            Ok(file) if file.version != STATUS_FILE_VERSION => LoadResult::Corrupted {
                reason: format!(
                    "Incompatible version: expected {STATUS_FILE_VERSION}, got {}",
                    file.version
                ),
            },
            Ok(file) => LoadResult::Loaded(file.report),
            Err(e) => LoadResult::Corrupted {
                reason: format!("Invalid JSON: {e}"),
            },
        }
    }

    async fn save(&self, report: &StatusReport) -> Result<(), StatusError> {
        let path = self.path.clone();
        let file = StatusFile::new(report);

        tokio::task::spawn_blocking(move || Self::save_blocking(&path, &file))
            .await
            .map_err(|e| StatusError::Write(io::Error::other(e)))?
    }
}
