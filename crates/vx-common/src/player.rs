//! Player configuration record.
//!
//! `PlayerConfig` is the only entity the embed generator touches. It is built
//! from defaults, adjusted field by field by callers, and handed to the
//! generator by reference. Field names serialize in camelCase.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use vx_math::{RetentionCurve, EXPONENT_DEFAULT};

/// Accent color used when a configured color is not a hex color.
pub const DEFAULT_ACCENT_COLOR: &str = "#2563eb";

/// Default sample video for new projects.
pub const DEFAULT_VIDEO_SOURCE: &str =
    "https://commondatastorage.googleapis.com/gtv-videos-bucket/sample/BigBuckBunny.mp4";

/// Default display name for new projects.
pub const DEFAULT_DISPLAY_NAME: &str = "Untitled VSL";

/// Default content delay in seconds (only meaningful when enabled).
pub const DEFAULT_CONTENT_DELAY_SECONDS: u32 = 60;

/// Player aspect ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema)]
pub enum AspectRatio {
    /// Horizontal 16:9 player.
    #[default]
    #[serde(rename = "16:9")]
    Landscape,
    /// Vertical 9:16 player.
    #[serde(rename = "9:16")]
    Portrait,
}

impl AspectRatio {
    /// Value for the CSS `aspect-ratio` property.
    pub fn css_ratio(&self) -> &'static str {
        match self {
            AspectRatio::Landscape => "16/9",
            AspectRatio::Portrait => "9/16",
        }
    }

    /// True for the vertical (mobile-first) format.
    pub fn is_vertical(&self) -> bool {
        matches!(self, AspectRatio::Portrait)
    }
}

impl fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AspectRatio::Landscape => write!(f, "16:9"),
            AspectRatio::Portrait => write!(f, "9:16"),
        }
    }
}

impl FromStr for AspectRatio {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "16:9" | "16/9" | "landscape" | "horizontal" => Ok(AspectRatio::Landscape),
            "9:16" | "9/16" | "portrait" | "vertical" => Ok(AspectRatio::Portrait),
            _ => Err(format!("unknown aspect ratio: {} (expected 16:9 or 9:16)", s)),
        }
    }
}

/// A normalized `#rrggbb` accent color.
///
/// Accepts `#RGB` and `#RRGGBB` in any case with surrounding whitespace;
/// everything else is rejected by [`AccentColor::parse`] and replaced by
/// [`DEFAULT_ACCENT_COLOR`] in [`AccentColor::or_default`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AccentColor(String);

impl AccentColor {
    /// Parse and normalize a hex color.
    pub fn parse(raw: &str) -> Option<Self> {
        let hex = raw.trim().strip_prefix('#')?;
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        let expanded = match hex.len() {
            3 => hex.chars().flat_map(|c| [c, c]).collect::<String>(),
            6 => hex.to_string(),
            _ => return None,
        };
        Some(AccentColor(format!("#{}", expanded.to_ascii_lowercase())))
    }

    /// Parse a color, falling back to the default accent.
    pub fn or_default(raw: &str) -> Self {
        Self::parse(raw).unwrap_or_default()
    }

    /// The normalized `#rrggbb` string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `#rrggbbaa` form with the given alpha byte, for halos and shadows.
    pub fn with_alpha(&self, alpha: u8) -> String {
        format!("{}{:02x}", self.0, alpha)
    }
}

impl Default for AccentColor {
    fn default() -> Self {
        AccentColor(DEFAULT_ACCENT_COLOR.to_string())
    }
}

impl fmt::Display for AccentColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Complete VSL player configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct PlayerConfig {
    /// Human label, embedded as an annotation in generated markup.
    pub display_name: String,
    /// URL of the externally hosted video file.
    pub video_source: String,
    /// Player aspect ratio.
    pub aspect_ratio: AspectRatio,
    /// `#RRGGBB` accent for the overlay button, pause icon and progress fill.
    pub accent_color: String,
    /// Exponent applied to the elapsed fraction, in [0.1, 1.0].
    pub retention_curve_exponent: f64,
    /// Whether delayed page content is revealed during playback.
    pub content_delay_enabled: bool,
    /// Seconds of playback after which delayed content is revealed.
    pub content_delay_seconds: u32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            display_name: DEFAULT_DISPLAY_NAME.to_string(),
            video_source: DEFAULT_VIDEO_SOURCE.to_string(),
            aspect_ratio: AspectRatio::default(),
            accent_color: DEFAULT_ACCENT_COLOR.to_string(),
            retention_curve_exponent: EXPONENT_DEFAULT,
            content_delay_enabled: false,
            content_delay_seconds: DEFAULT_CONTENT_DELAY_SECONDS,
        }
    }
}

impl PlayerConfig {
    /// Create a configuration with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the display name.
    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = name.into();
        self
    }

    /// Set the video source URL.
    pub fn with_video_source(mut self, url: impl Into<String>) -> Self {
        self.video_source = url.into();
        self
    }

    /// Set the aspect ratio.
    pub fn with_aspect_ratio(mut self, ratio: AspectRatio) -> Self {
        self.aspect_ratio = ratio;
        self
    }

    /// Set the accent color.
    pub fn with_accent_color(mut self, color: impl Into<String>) -> Self {
        self.accent_color = color.into();
        self
    }

    /// Set the retention curve exponent.
    pub fn with_retention_curve_exponent(mut self, exponent: f64) -> Self {
        self.retention_curve_exponent = exponent;
        self
    }

    /// Enable the content delay with the given number of seconds, or disable it.
    pub fn with_content_delay(mut self, seconds: Option<u32>) -> Self {
        match seconds {
            Some(s) => {
                self.content_delay_enabled = true;
                self.content_delay_seconds = s;
            }
            None => self.content_delay_enabled = false,
        }
        self
    }

    /// Retention curve, clamped into the valid exponent range.
    pub fn retention_curve(&self) -> RetentionCurve {
        RetentionCurve::clamped(self.retention_curve_exponent)
    }

    /// Normalized accent color (default accent if malformed).
    pub fn accent(&self) -> AccentColor {
        AccentColor::or_default(&self.accent_color)
    }

    /// Content delay in seconds, if enabled.
    pub fn content_delay(&self) -> Option<u32> {
        self.content_delay_enabled.then_some(self.content_delay_seconds)
    }

    /// Load configuration from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serialize to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
