//! Instance, project and owner identity types.
//!
//! Every generated player gets an [`InstanceId`] that scopes all of its DOM
//! lookups, so several players can live on one page. Where the id comes from
//! is an injected capability ([`InstanceIdSource`]) so tests can pin it.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

const INSTANCE_ID_MAX_LEN: usize = 64;
/// Room for `-` plus the decimal form of any `u64`.
const COUNTER_SUFFIX_MAX_LEN: usize = 21;
const OWNER_ID_MAX_LEN: usize = 128;

/// Container id of one generated player.
///
/// Always starts with an ASCII letter and contains only `[A-Za-z0-9_-]`, so it
/// is safe inside HTML attributes, CSS identifiers and JS string literals.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub struct InstanceId(String);

impl InstanceId {
    /// Validate an instance id.
    pub fn new(raw: &str) -> Option<Self> {
        if raw.is_empty() || raw.len() > INSTANCE_ID_MAX_LEN {
            return None;
        }
        let mut chars = raw.chars();
        if !chars.next().is_some_and(|c| c.is_ascii_alphabetic()) {
            return None;
        }
        if !chars.all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_') {
            return None;
        }
        Some(InstanceId(raw.to_string()))
    }

    /// Coerce arbitrary text into a valid instance id.
    ///
    /// Invalid characters become `-`, a `vsl-` prefix is added when the text
    /// does not start with a letter, and the result is truncated to 64 chars.
    pub fn sanitize(raw: &str) -> Self {
        let mut cleaned: String = raw
            .trim()
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                    c
                } else {
                    '-'
                }
            })
            .collect();
        if !cleaned.starts_with(|c: char| c.is_ascii_alphabetic()) {
            cleaned.insert_str(0, "vsl-");
        }
        cleaned.truncate(INSTANCE_ID_MAX_LEN);
        InstanceId(cleaned)
    }

    /// The id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for InstanceId {
    type Error = String;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        InstanceId::new(&raw).ok_or_else(|| format!("invalid instance id: {:?}", raw))
    }
}

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Source of per-invocation container ids.
pub trait InstanceIdSource: Send + Sync {
    /// Produce the id for the next generated player.
    fn next_id(&self) -> InstanceId;
}

/// Random ids: `vsl-` followed by 12 hex characters of a v4 UUID.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomInstanceIds;

impl InstanceIdSource for RandomInstanceIds {
    fn next_id(&self) -> InstanceId {
        let uuid = uuid::Uuid::new_v4().simple().to_string();
        InstanceId(format!("vsl-{}", &uuid[..12]))
    }
}

/// Counter-based ids: `<prefix>-1`, `<prefix>-2`, ...
#[derive(Debug)]
pub struct SequentialInstanceIds {
    prefix: InstanceId,
    next: AtomicU64,
}

impl SequentialInstanceIds {
    /// Create a sequence with the given prefix (sanitized).
    ///
    /// The prefix is shortened so the counter always fits in the id.
    pub fn new(prefix: &str) -> Self {
        let mut prefix = InstanceId::sanitize(prefix);
        prefix
            .0
            .truncate(INSTANCE_ID_MAX_LEN - COUNTER_SUFFIX_MAX_LEN);
        Self {
            prefix,
            next: AtomicU64::new(1),
        }
    }
}

impl Default for SequentialInstanceIds {
    fn default() -> Self {
        Self::new("vsl-player")
    }
}

impl InstanceIdSource for SequentialInstanceIds {
    fn next_id(&self) -> InstanceId {
        let n = self.next.fetch_add(1, Ordering::Relaxed);
        InstanceId(format!("{}-{}", self.prefix, n))
    }
}

/// Always returns the same id. Intended for tests and reproducible exports;
/// two artifacts from one fixed source must not share a page.
#[derive(Debug, Clone)]
pub struct FixedInstanceId(pub InstanceId);

impl InstanceIdSource for FixedInstanceId {
    fn next_id(&self) -> InstanceId {
        self.0.clone()
    }
}

/// Stored project identifier.
///
/// Format: `vsl-YYYYMMDD-HHMMSS-XXXX`
/// Example: `vsl-20260115-143022-a7xq`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct ProjectId(pub String);

impl ProjectId {
    /// Generate a new project ID.
    pub fn new() -> Self {
        let now = chrono::Utc::now();
        let suffix = generate_base32_suffix();
        ProjectId(format!(
            "vsl-{}-{}-{}",
            now.format("%Y%m%d"),
            now.format("%H%M%S"),
            suffix
        ))
    }

    /// Parse an existing project ID string.
    pub fn parse(s: &str) -> Option<Self> {
        if s.len() != 24 || !s.is_ascii() {
            return None;
        }
        let bytes = s.as_bytes();
        if !s.starts_with("vsl-") || bytes[12] != b'-' || bytes[19] != b'-' {
            return None;
        }
        let date = &s[4..12];
        let time = &s[13..19];
        let suffix = &s[20..24];
        if !date.chars().all(|c| c.is_ascii_digit()) {
            return None;
        }
        if !time.chars().all(|c| c.is_ascii_digit()) {
            return None;
        }
        if !suffix.chars().all(|c| matches!(c, 'a'..='z' | '2'..='7')) {
            return None;
        }
        Some(ProjectId(s.to_string()))
    }
}

impl Default for ProjectId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identity that owns stored projects.
///
/// Restricted to `[A-Za-z0-9._@-]`, not starting with `.`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct OwnerId(pub String);

impl OwnerId {
    /// Validate an owner identity.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if s.is_empty() || s.len() > OWNER_ID_MAX_LEN || s.starts_with('.') {
            return None;
        }
        if !s
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '@' | '-'))
        {
            return None;
        }
        Some(OwnerId(s.to_string()))
    }

    /// The owner as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OwnerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

fn generate_base32_suffix() -> String {
    let uuid = uuid::Uuid::new_v4();
    let bytes = uuid.as_bytes();
    let mut value = ((bytes[0] as u32) << 16) | ((bytes[1] as u32) << 8) | (bytes[2] as u32);
    value &= 0x000F_FFFF;
    let alphabet = b"abcdefghijklmnopqrstuvwxyz234567";
    let mut out = String::with_capacity(4);
    for shift in [15_u32, 10, 5, 0] {
        let idx = ((value >> shift) & 0x1F) as usize;
        out.push(alphabet[idx] as char);
    }
    out
}
