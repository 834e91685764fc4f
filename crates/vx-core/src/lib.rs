//! Vortex VSL command-line core.
//!
//! Shared pieces behind the `vortex` binary:
//! - Exit codes and error mapping
//! - Logging setup (human or JSONL on stderr)
//! - Runtime resolution (settings, data directory, owner)
//! - Output envelopes and JSON Schema export

pub mod context;
pub mod exit_codes;
pub mod logging;
pub mod output;
pub mod overrides;
pub mod schema;

pub use context::{Runtime, RuntimeOptions};
pub use exit_codes::ExitCode;
pub use overrides::PlayerOverrides;
