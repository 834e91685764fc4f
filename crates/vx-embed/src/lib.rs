//! Embed-code generator for Vortex VSL players.
//!
//! Turns a [`vx_common::PlayerConfig`] into a standalone HTML/CSS/script
//! snippet that can be pasted into any page.
//!
//! # Features
//!
//! - **Self-contained output**: one `<div>`, one `<style>`, one `<script>` IIFE;
//!   no globals, no external assets besides the video itself
//! - **Instance scoping**: every lookup goes through a per-artifact container id,
//!   so several players can share a page
//! - **Retention curve**: progress fill follows `min(100, (t/d)^e * 100)`
//! - **Content reveal**: optional delayed unhiding of marked page elements
//! - **Minification**: optional, comments kept
//!
//! # Example
//!
//! ```no_run
//! use vx_common::PlayerConfig;
//! use vx_embed::{EmbedGenerator, EmbedOptions};
//!
//! let config = PlayerConfig::new()
//!     .with_display_name("Spring Launch")
//!     .with_video_source("https://cdn.example.com/spring.mp4");
//! let generator = EmbedGenerator::new(EmbedOptions::default());
//! let snippet = generator.generate(&config).unwrap();
//! println!("{snippet}");
//! ```

pub mod config;
pub mod error;
pub mod generator;
pub mod preview;

pub use config::{CopyText, CopyVariant, EmbedOptions};
pub use error::{EmbedError, Result};
pub use generator::{encode_video_url, html_escape, EmbedGenerator};
pub use preview::{PlaybackState, PlayerSimulation, PlayerView};
