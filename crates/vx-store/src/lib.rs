//! Owner-keyed persistence of Vortex VSL projects.
//!
//! Two implementations of [`ProjectStore`]:
//! - [`FileProjectStore`]: one JSON file per project, atomic writes
//! - [`MemoryProjectStore`]: in-process map for tests and embedding
//!
//! Every operation is scoped to an owner. Touching another owner's project
//! yields [`StoreError::Forbidden`]; a failed write leaves the previously
//! stored record untouched. Nothing here retries.

pub mod error;
pub mod file;
pub mod memory;
pub mod record;

pub use error::{Result, StoreError};
pub use file::FileProjectStore;
pub use memory::MemoryProjectStore;
pub use record::{ListOptions, ProjectRecord, ProjectSummary};

use vx_common::{OwnerId, PlayerConfig, ProjectId};

/// Persistence of player configurations.
pub trait ProjectStore: Send + Sync {
    /// Store a new project for `owner`.
    fn create(&self, owner: &OwnerId, config: PlayerConfig) -> Result<ProjectRecord>;

    /// Fetch one project.
    fn get(&self, owner: &OwnerId, id: &ProjectId) -> Result<ProjectRecord>;

    /// Replace a project's configuration. Keeps `created_at` and `views`.
    fn update(&self, owner: &OwnerId, id: &ProjectId, config: PlayerConfig)
        -> Result<ProjectRecord>;

    /// Remove a project.
    fn delete(&self, owner: &OwnerId, id: &ProjectId) -> Result<()>;

    /// The owner's projects, newest `last_edited` first.
    fn list(&self, owner: &OwnerId, options: &ListOptions) -> Result<Vec<ProjectSummary>>;
}

/// Check that `record` belongs to `owner`.
pub(crate) fn ensure_owner(record: &ProjectRecord, owner: &OwnerId) -> Result<()> {
    if &record.owner != owner {
        return Err(StoreError::Forbidden {
            project_id: record.id.to_string(),
            owner: owner.to_string(),
        });
    }
    Ok(())
}
