//! JSON Schema generation for persisted and exchanged types.
//!
//! ```bash
//! vortex schema --list
//! vortex schema PlayerConfig
//! vortex schema            # every schema, keyed by type name
//! ```

use schemars::schema_for;
use serde_json::Value;
use std::collections::BTreeMap;

pub use vx_common::{AspectRatio, OwnerId, PlayerConfig, ProjectId};
pub use vx_store::ProjectRecord;

/// Available schema types with their descriptions.
pub fn available_schemas() -> Vec<(&'static str, &'static str)> {
    vec![
        ("PlayerConfig", "Player configuration as saved by the editor"),
        ("AspectRatio", "Video frame shape (16:9 or 9:16)"),
        ("ProjectId", "Stored project identifier"),
        ("OwnerId", "Identity that owns stored projects"),
        ("ProjectRecord", "Stored project: configuration plus metadata"),
    ]
}

/// Generate JSON Schema for a type by name.
///
/// Returns `None` if the type is unknown.
pub fn generate_schema(type_name: &str) -> Option<Value> {
    let schema = match type_name {
        "PlayerConfig" => schema_for!(PlayerConfig),
        "AspectRatio" => schema_for!(AspectRatio),
        "ProjectId" => schema_for!(ProjectId),
        "OwnerId" => schema_for!(OwnerId),
        "ProjectRecord" => schema_for!(ProjectRecord),
        _ => return None,
    };
    serde_json::to_value(schema).ok()
}

/// Generate all schemas as a map from type name to schema.
pub fn generate_all_schemas() -> BTreeMap<String, Value> {
    available_schemas()
        .into_iter()
        .filter_map(|(name, _)| generate_schema(name).map(|s| (name.to_string(), s)))
        .collect()
}
