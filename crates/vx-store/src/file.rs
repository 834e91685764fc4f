//! File-backed project store.
//!
//! Layout:
//! ```text
//! <root>/projects/<project_id>.json
//! ```
//!
//! Each record is written to a temporary sibling and renamed into place, so a
//! crash or failed write never leaves a half-written record behind. There is
//! no cross-process locking; concurrent writers race last-write-wins.

use crate::error::{Result, StoreError};
use crate::record::{ListOptions, ProjectRecord, ProjectSummary};
use crate::{ensure_owner, ProjectStore};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, warn};
use vx_common::{OwnerId, PlayerConfig, ProjectId};

const PROJECTS_DIR: &str = "projects";

static TMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Store keeping one JSON file per project.
#[derive(Debug, Clone)]
pub struct FileProjectStore {
    root: PathBuf,
}

impl FileProjectStore {
    /// Open a store rooted at `root`. Directories are created lazily.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn projects_dir(&self) -> PathBuf {
        self.root.join(PROJECTS_DIR)
    }

    /// Path of a project's record file.
    ///
    /// `None` for ids that are not well-formed, which keeps arbitrary
    /// strings from escaping the projects directory.
    pub fn record_path(&self, id: &ProjectId) -> Option<PathBuf> {
        ProjectId::parse(&id.0)?;
        Some(self.projects_dir().join(format!("{}.json", id.0)))
    }

    fn existing_path(&self, id: &ProjectId) -> Result<PathBuf> {
        let not_found = || StoreError::NotFound {
            project_id: id.to_string(),
        };
        let path = self.record_path(id).ok_or_else(not_found)?;
        if !path.exists() {
            return Err(not_found());
        }
        Ok(path)
    }

    fn read_record(&self, path: &Path) -> Result<ProjectRecord> {
        let content = std::fs::read_to_string(path).map_err(|e| StoreError::io(path, e))?;
        serde_json::from_str(&content).map_err(|e| StoreError::Corrupt {
            path: path.to_path_buf(),
            source: e,
        })
    }

    fn write_record(&self, record: &ProjectRecord) -> Result<()> {
        let path = self
            .record_path(&record.id)
            .ok_or_else(|| StoreError::NotFound {
                project_id: record.id.to_string(),
            })?;
        write_json_pretty_atomic(&path, record).map_err(|e| match e {
            AtomicWriteError::Io(path, source) => StoreError::Io { path, source },
            AtomicWriteError::Json(source) => StoreError::Serialize {
                project_id: record.id.to_string(),
                source,
            },
        })?;
        debug!(project_id = %record.id, path = %path.display(), "Project written");
        Ok(())
    }
}

impl ProjectStore for FileProjectStore {
    fn create(&self, owner: &OwnerId, config: PlayerConfig) -> Result<ProjectRecord> {
        let mut record = ProjectRecord::new(owner.clone(), config);
        while self
            .record_path(&record.id)
            .is_some_and(|path| path.exists())
        {
            record.id = ProjectId::new();
        }
        self.write_record(&record)?;
        Ok(record)
    }

    fn get(&self, owner: &OwnerId, id: &ProjectId) -> Result<ProjectRecord> {
        let path = self.existing_path(id)?;
        let record = self.read_record(&path)?;
        ensure_owner(&record, owner)?;
        Ok(record)
    }

    fn update(
        &self,
        owner: &OwnerId,
        id: &ProjectId,
        config: PlayerConfig,
    ) -> Result<ProjectRecord> {
        let mut record = self.get(owner, id)?;
        record.apply_update(config);
        self.write_record(&record)?;
        Ok(record)
    }

    fn delete(&self, owner: &OwnerId, id: &ProjectId) -> Result<()> {
        let path = self.existing_path(id)?;
        let record = self.read_record(&path)?;
        ensure_owner(&record, owner)?;
        std::fs::remove_file(&path).map_err(|e| StoreError::io(&path, e))?;
        debug!(project_id = %id, "Project deleted");
        Ok(())
    }

    fn list(&self, owner: &OwnerId, options: &ListOptions) -> Result<Vec<ProjectSummary>> {
        let dir = self.projects_dir();
        if !dir.exists() {
            return Ok(Vec::new());
        }
        let entries = std::fs::read_dir(&dir).map_err(|e| StoreError::io(&dir, e))?;

        let mut summaries = Vec::new();
        for entry in entries.flatten() {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let record = match self.read_record(&path) {
                Ok(record) => record,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Skipping unreadable project record");
                    continue;
                }
            };
            if &record.owner == owner && options.matches(&record) {
                summaries.push(record.summary());
            }
        }
        Ok(options.finish(summaries))
    }
}

enum AtomicWriteError {
    Io(PathBuf, std::io::Error),
    Json(serde_json::Error),
}

fn write_json_pretty_atomic<T: Serialize>(
    path: &Path,
    value: &T,
) -> std::result::Result<(), AtomicWriteError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|e| AtomicWriteError::Io(parent.to_path_buf(), e))?;
    }
    let content = serde_json::to_vec_pretty(value).map_err(AtomicWriteError::Json)?;
    let file_name = path
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("project.json");
    let tmp_path = path.with_file_name(format!(
        "{}.tmp.{}.{}",
        file_name,
        std::process::id(),
        TMP_COUNTER.fetch_add(1, Ordering::Relaxed)
    ));
    {
        use std::io::Write;
        let mut file = std::fs::File::create(&tmp_path)
            .map_err(|e| AtomicWriteError::Io(tmp_path.clone(), e))?;
        if let Err(e) = file.write_all(&content) {
            let _ = std::fs::remove_file(&tmp_path);
            return Err(AtomicWriteError::Io(tmp_path, e));
        }
        let _ = file.sync_all();
    }
    std::fs::rename(&tmp_path, path).map_err(|e| {
        let _ = std::fs::remove_file(&tmp_path);
        AtomicWriteError::Io(path.to_path_buf(), e)
    })
}
