//! Embed generator implementation.

use crate::config::{CopyText, EmbedOptions};
use crate::error::{EmbedError, Result};

use askama::Template;
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use std::sync::Arc;
use tracing::{debug, info};
use vx_common::{InstanceId, InstanceIdSource, PlayerConfig, RandomInstanceIds};
use vx_math::DISPLAY_PERCENT_JS;

/// Characters `encodeURI` escapes, minus `%` so existing escapes survive.
const URI_ESCAPE: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'<')
    .add(b'>')
    .add(b'[')
    .add(b'\\')
    .add(b']')
    .add(b'^')
    .add(b'`')
    .add(b'{')
    .add(b'|')
    .add(b'}');

/// Alpha byte of the accent halo (`#rrggbb66`).
const HALO_ALPHA: u8 = 0x66;

#[derive(Template)]
#[template(path = "player.html", escape = "none")]
struct PlayerTemplate<'a> {
    id: &'a str,
    display_name: String,
    video_src: String,
    video_mime: String,
    max_width: &'a str,
    css_ratio: &'static str,
    accent: &'a str,
    accent_halo: String,
    cta: &'static str,
    exponent: f64,
    reveal_enabled: bool,
    reveal_after: u32,
    display_percent_js: &'static str,
}

#[derive(Template)]
#[template(path = "instructions.txt", escape = "none")]
struct InstructionsTemplate<'a> {
    text: &'a CopyText,
    has_reveal_step: bool,
    reveal_step: String,
    artifact: &'a str,
}

/// Embed generator.
///
/// Stateless apart from the injected id source; safe to share across threads.
pub struct EmbedGenerator {
    options: EmbedOptions,
    ids: Arc<dyn InstanceIdSource>,
}

impl EmbedGenerator {
    /// Create a generator with options and random instance ids.
    pub fn new(options: EmbedOptions) -> Self {
        Self {
            options,
            ids: Arc::new(RandomInstanceIds),
        }
    }

    /// Create a generator with default options.
    pub fn default_options() -> Self {
        Self::new(EmbedOptions::default())
    }

    /// Replace the instance id source.
    pub fn with_id_source(mut self, ids: Arc<dyn InstanceIdSource>) -> Self {
        self.ids = ids;
        self
    }

    /// Get the current options.
    pub fn options(&self) -> &EmbedOptions {
        &self.options
    }

    /// Generate the full bundle with a fresh instance id.
    pub fn generate(&self, config: &PlayerConfig) -> Result<String> {
        let id = self.ids.next_id();
        self.generate_with_id(config, &id)
    }

    /// Generate the full bundle with a caller-chosen instance id.
    ///
    /// Output is byte-identical for identical inputs.
    pub fn generate_with_id(&self, config: &PlayerConfig, id: &InstanceId) -> Result<String> {
        let artifact = self.render_artifact(config, id)?;
        let output = if self.options.include_instructions {
            self.wrap_instructions(config, id, &artifact)?
        } else {
            artifact
        };

        info!(
            bytes = output.len(),
            instance_id = %id,
            minified = self.options.minify,
            "Embed generated"
        );

        Ok(output)
    }

    /// Render only the HTML/CSS/script artifact, without instructions.
    pub fn render_artifact(&self, config: &PlayerConfig, id: &InstanceId) -> Result<String> {
        debug!(instance_id = %id, ratio = %config.aspect_ratio, "Rendering embed artifact");

        let accent = config.accent();
        let curve = config.retention_curve();
        let reveal_after = config.content_delay();

        let template = PlayerTemplate {
            id: id.as_str(),
            display_name: html_escape(&config.display_name),
            video_src: html_escape(&encode_video_url(&config.video_source)),
            video_mime: html_escape(&self.options.video_mime),
            max_width: self.options.max_width_for(config.aspect_ratio),
            css_ratio: config.aspect_ratio.css_ratio(),
            accent: accent.as_str(),
            accent_halo: accent.with_alpha(HALO_ALPHA),
            cta: self.options.copy.text().cta,
            exponent: curve.exponent(),
            reveal_enabled: reveal_after.is_some(),
            reveal_after: reveal_after.unwrap_or_default(),
            display_percent_js: DISPLAY_PERCENT_JS,
        };

        let html = template.render()?;
        let html = html.trim().to_string();

        if self.options.minify {
            minify(&html)
        } else {
            Ok(html)
        }
    }

    fn wrap_instructions(
        &self,
        config: &PlayerConfig,
        id: &InstanceId,
        artifact: &str,
    ) -> Result<String> {
        let text = self.options.copy.text();
        let reveal_step = config
            .content_delay()
            .map(|seconds| {
                text.step_reveal
                    .replace("{id}", id.as_str())
                    .replace("{seconds}", &seconds.to_string())
            })
            .unwrap_or_default();

        let template = InstructionsTemplate {
            text,
            has_reveal_step: !reveal_step.is_empty(),
            reveal_step,
            artifact,
        };
        Ok(template.render()?.trim().to_string())
    }
}

fn minify(html: &str) -> Result<String> {
    let cfg = minify_html::Cfg {
        minify_js: true,
        minify_css: true,
        keep_comments: true,
        ..Default::default()
    };
    String::from_utf8(minify_html::minify(html.as_bytes(), &cfg))
        .map_err(|e| EmbedError::MinifyError(e.to_string()))
}

/// Percent-encode a video URL for use in `src`.
///
/// Absolute URLs are normalized by the `url` crate (spaces and non-ASCII
/// characters percent-encoded, host punycoded). Anything it cannot parse is
/// escaped like `encodeURI`, leaving existing `%XX` sequences alone.
pub fn encode_video_url(raw: &str) -> String {
    let trimmed = raw.trim();
    match url::Url::parse(trimmed) {
        Ok(url) => url.to_string(),
        Err(_) => utf8_percent_encode(trimmed, URI_ESCAPE).to_string(),
    }
}

/// Escape HTML special characters.
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
