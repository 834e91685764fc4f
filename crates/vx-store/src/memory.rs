//! In-memory project store.

use crate::error::{Result, StoreError};
use crate::record::{ListOptions, ProjectRecord, ProjectSummary};
use crate::{ensure_owner, ProjectStore};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use vx_common::{OwnerId, PlayerConfig, ProjectId};

/// `RwLock<HashMap>`-backed store.
///
/// Can be switched offline, in which case every call fails with the
/// transient [`StoreError::Unavailable`].
#[derive(Debug, Default)]
pub struct MemoryProjectStore {
    records: RwLock<HashMap<ProjectId, ProjectRecord>>,
    offline: AtomicBool,
}

impl MemoryProjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulate losing (or regaining) the backing service.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Number of stored records across all owners.
    pub fn len(&self) -> usize {
        self.read().map(|r| r.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn check_online(&self) -> Result<()> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("store is offline".to_string()));
        }
        Ok(())
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, HashMap<ProjectId, ProjectRecord>>> {
        self.records
            .read()
            .map_err(|_| StoreError::Unavailable("store lock poisoned".to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, HashMap<ProjectId, ProjectRecord>>> {
        self.records
            .write()
            .map_err(|_| StoreError::Unavailable("store lock poisoned".to_string()))
    }
}

impl ProjectStore for MemoryProjectStore {
    fn create(&self, owner: &OwnerId, config: PlayerConfig) -> Result<ProjectRecord> {
        self.check_online()?;
        let mut records = self.write()?;
        let mut record = ProjectRecord::new(owner.clone(), config);
        while records.contains_key(&record.id) {
            record.id = ProjectId::new();
        }
        records.insert(record.id.clone(), record.clone());
        Ok(record)
    }

    fn get(&self, owner: &OwnerId, id: &ProjectId) -> Result<ProjectRecord> {
        self.check_online()?;
        let records = self.read()?;
        let record = records.get(id).ok_or_else(|| StoreError::NotFound {
            project_id: id.to_string(),
        })?;
        ensure_owner(record, owner)?;
        Ok(record.clone())
    }

    fn update(
        &self,
        owner: &OwnerId,
        id: &ProjectId,
        config: PlayerConfig,
    ) -> Result<ProjectRecord> {
        self.check_online()?;
        let mut records = self.write()?;
        let record = records.get_mut(id).ok_or_else(|| StoreError::NotFound {
            project_id: id.to_string(),
        })?;
        ensure_owner(record, owner)?;
        record.apply_update(config);
        Ok(record.clone())
    }

    fn delete(&self, owner: &OwnerId, id: &ProjectId) -> Result<()> {
        self.check_online()?;
        let mut records = self.write()?;
        let record = records.get(id).ok_or_else(|| StoreError::NotFound {
            project_id: id.to_string(),
        })?;
        ensure_owner(record, owner)?;
        records.remove(id);
        Ok(())
    }

    fn list(&self, owner: &OwnerId, options: &ListOptions) -> Result<Vec<ProjectSummary>> {
        self.check_online()?;
        let records = self.read()?;
        let summaries = records
            .values()
            .filter(|r| &r.owner == owner && options.matches(r))
            .map(ProjectRecord::summary)
            .collect();
        Ok(options.finish(summaries))
    }
}
