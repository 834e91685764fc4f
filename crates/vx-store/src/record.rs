//! Persisted project records and listing options.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use vx_common::{AspectRatio, OwnerId, PlayerConfig, ProjectId, SCHEMA_VERSION};

/// One stored player configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ProjectRecord {
    pub schema_version: String,
    pub id: ProjectId,
    pub owner: OwnerId,
    pub config: PlayerConfig,
    #[serde(default)]
    pub views: u64,
    pub created_at: DateTime<Utc>,
    pub last_edited: DateTime<Utc>,
}

impl ProjectRecord {
    /// Fresh record with a new id.
    pub fn new(owner: OwnerId, config: PlayerConfig) -> Self {
        let now = Utc::now();
        Self {
            schema_version: SCHEMA_VERSION.to_string(),
            id: ProjectId::new(),
            owner,
            config,
            views: 0,
            created_at: now,
            last_edited: now,
        }
    }

    /// Replace the configuration and bump `last_edited`.
    pub fn apply_update(&mut self, config: PlayerConfig) {
        self.config = config;
        self.last_edited = Utc::now().max(self.last_edited);
    }

    pub fn summary(&self) -> ProjectSummary {
        ProjectSummary {
            id: self.id.clone(),
            name: self.config.display_name.clone(),
            aspect_ratio: self.config.aspect_ratio,
            views: self.views,
            created_at: self.created_at,
            last_edited: self.last_edited,
        }
    }
}

/// Listing row for a project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectSummary {
    pub id: ProjectId,
    pub name: String,
    pub aspect_ratio: AspectRatio,
    pub views: u64,
    pub created_at: DateTime<Utc>,
    pub last_edited: DateTime<Utc>,
}

/// Options for listing projects.
#[derive(Debug, Clone, Default)]
pub struct ListOptions {
    /// Case-insensitive substring match on the display name.
    pub search: Option<String>,
    /// Maximum number of projects to return.
    pub limit: Option<usize>,
}

impl ListOptions {
    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Whether a record passes the name filter.
    pub fn matches(&self, record: &ProjectRecord) -> bool {
        match self.search.as_deref().map(str::trim) {
            None | Some("") => true,
            Some(term) => record
                .config
                .display_name
                .to_lowercase()
                .contains(&term.to_lowercase()),
        }
    }

    /// Sort newest `last_edited` first and apply the limit.
    pub(crate) fn finish(&self, mut summaries: Vec<ProjectSummary>) -> Vec<ProjectSummary> {
        summaries.sort_by(|a, b| {
            b.last_edited
                .cmp(&a.last_edited)
                .then_with(|| b.id.cmp(&a.id))
        });
        if let Some(limit) = self.limit {
            summaries.truncate(limit);
        }
        summaries
    }
}
