//! Per-field player configuration overrides from the command line.

use clap::Args;
use vx_common::{AspectRatio, PlayerConfig};

/// Flags that replace individual fields of a loaded configuration.
#[derive(Args, Debug, Clone, Default)]
pub struct PlayerOverrides {
    /// Display name
    #[arg(long)]
    pub name: Option<String>,

    /// Video URL (http or https)
    #[arg(long)]
    pub video: Option<String>,

    /// Aspect ratio: 16:9 or 9:16
    #[arg(long)]
    pub ratio: Option<AspectRatio>,

    /// Accent color (#RGB or #RRGGBB)
    #[arg(long)]
    pub color: Option<String>,

    /// Retention curve exponent, 0.1 to 1.0 (1.0 is linear)
    #[arg(long)]
    pub exponent: Option<f64>,

    /// Reveal delayed content after this many seconds of playback
    #[arg(long, conflicts_with = "no_delay")]
    pub delay: Option<u32>,

    /// Disable the delayed content reveal
    #[arg(long)]
    pub no_delay: bool,
}

impl PlayerOverrides {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.video.is_none()
            && self.ratio.is_none()
            && self.color.is_none()
            && self.exponent.is_none()
            && self.delay.is_none()
            && !self.no_delay
    }

    /// Apply every given flag on top of `config`.
    pub fn apply(&self, mut config: PlayerConfig) -> PlayerConfig {
        if let Some(name) = &self.name {
            config.display_name = name.clone();
        }
        if let Some(video) = &self.video {
            config.video_source = video.clone();
        }
        if let Some(ratio) = self.ratio {
            config.aspect_ratio = ratio;
        }
        if let Some(color) = &self.color {
            config.accent_color = color.clone();
        }
        if let Some(exponent) = self.exponent {
            config.retention_curve_exponent = exponent;
        }
        if let Some(delay) = self.delay {
            config = config.with_content_delay(Some(delay));
        } else if self.no_delay {
            config = config.with_content_delay(None);
        }
        config
    }
}
