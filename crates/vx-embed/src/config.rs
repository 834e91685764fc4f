//! Embed emission options.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use vx_common::AspectRatio;

/// Default maximum width of a horizontal player.
pub const DEFAULT_MAX_WIDTH_LANDSCAPE: &str = "900px";

/// Default maximum width of a vertical player.
pub const DEFAULT_MAX_WIDTH_PORTRAIT: &str = "400px";

/// Default MIME type for the `<source>` element.
pub const DEFAULT_VIDEO_MIME: &str = "video/mp4";

/// Language of the call-to-action and install instructions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CopyVariant {
    /// English.
    #[default]
    En,
    /// Brazilian Portuguese.
    PtBr,
}

/// Fixed text blocks for one copy variant.
#[derive(Debug, Clone, Copy)]
pub struct CopyText {
    /// Label of the click-to-unmute button.
    pub cta: &'static str,
    pub heading: &'static str,
    pub objective: &'static str,
    pub location_label: &'static str,
    pub location_placeholder: &'static str,
    pub steps_title: &'static str,
    pub step_copy: &'static str,
    pub step_paste: &'static str,
    /// Extra step shown only when a content delay is configured.
    pub step_reveal: &'static str,
    pub code_start: &'static str,
    pub code_end: &'static str,
}

const EN: CopyText = CopyText {
    cta: "CLICK TO UNMUTE",
    heading: "=== INSTALL NOTES FOR AI / DEVELOPER ===",
    objective: "GOAL: Insert the high-conversion video player (VSL) below into the site.",
    location_label: "TARGET LOCATION:",
    location_placeholder: "[ !!! DESCRIBE WHERE THE VIDEO SHOULD APPEAR !!! ]",
    steps_title: "TECHNICAL INSTRUCTIONS:",
    step_copy: "Copy the whole code block below.",
    step_paste: "Paste it as a \"Custom HTML\" or \"Embed Code\" element.",
    step_reveal: "Mark content to reveal later with data-vsl-reveal=\"{id}\" and the hidden attribute; it is shown after {seconds} seconds of playback.",
    code_start: "--- VORTEX PLAYER CODE ---",
    code_end: "--- END OF CODE ---",
};

const PT_BR: CopyText = CopyText {
    cta: "CLIQUE PARA OUVIR",
    heading: "=== PROMPT PARA IA / DESENVOLVEDOR ===",
    objective: "OBJETIVO: Inserir o player de vídeo de alta conversão (VSL) abaixo no site.",
    location_label: "LOCALIZAÇÃO DESEJADA:",
    location_placeholder: "[ !!! INSIRA AQUI O LOCAL ONDE O VÍDEO DEVE APARECER !!! ]",
    steps_title: "INSTRUÇÕES TÉCNICAS:",
    step_copy: "Copie o bloco de código abaixo integralmente.",
    step_paste: "Cole-o como um elemento \"HTML Personalizado\" ou \"Embed Code\".",
    step_reveal: "Marque o conteúdo a ser liberado com data-vsl-reveal=\"{id}\" e o atributo hidden; ele aparece após {seconds} segundos de vídeo.",
    code_start: "--- CÓDIGO DO PLAYER VORTEX ---",
    code_end: "--- FIM DO CÓDIGO ---",
};

impl CopyVariant {
    /// Text blocks for this variant.
    pub fn text(&self) -> &'static CopyText {
        match self {
            CopyVariant::En => &EN,
            CopyVariant::PtBr => &PT_BR,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CopyVariant::En => "en",
            CopyVariant::PtBr => "pt-br",
        }
    }
}

impl std::fmt::Display for CopyVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CopyVariant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" | "english" => Ok(CopyVariant::En),
            "pt-br" | "pt_br" | "ptbr" | "pt" => Ok(CopyVariant::PtBr),
            other => Err(format!("unknown copy variant: {} (expected en or pt-br)", other)),
        }
    }
}

/// Options controlling how an artifact is emitted.
///
/// Unlike [`vx_common::PlayerConfig`], these come from the operator, not from
/// stored project content, and are inserted into CSS as given.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbedOptions {
    /// Copy variant for the CTA and instructions.
    pub copy: CopyVariant,
    /// Wrap the artifact in install instructions.
    pub include_instructions: bool,
    /// Minify the artifact (comments are kept).
    pub minify: bool,
    /// MIME type for the `<source>` element.
    pub video_mime: String,
    pub max_width_landscape: String,
    pub max_width_portrait: String,
}

impl Default for EmbedOptions {
    fn default() -> Self {
        Self {
            copy: CopyVariant::default(),
            include_instructions: true,
            minify: false,
            video_mime: DEFAULT_VIDEO_MIME.to_string(),
            max_width_landscape: DEFAULT_MAX_WIDTH_LANDSCAPE.to_string(),
            max_width_portrait: DEFAULT_MAX_WIDTH_PORTRAIT.to_string(),
        }
    }
}

impl EmbedOptions {
    /// Set the copy variant.
    pub fn with_copy(mut self, copy: CopyVariant) -> Self {
        self.copy = copy;
        self
    }

    /// Enable or disable the instruction wrapper.
    pub fn with_instructions(mut self, enabled: bool) -> Self {
        self.include_instructions = enabled;
        self
    }

    /// Enable or disable minification.
    pub fn with_minify(mut self, enabled: bool) -> Self {
        self.minify = enabled;
        self
    }

    /// Set the `<source>` MIME type.
    pub fn with_video_mime(mut self, mime: impl Into<String>) -> Self {
        self.video_mime = mime.into();
        self
    }

    /// Maximum container width for an aspect ratio.
    pub fn max_width_for(&self, ratio: AspectRatio) -> &str {
        match ratio {
            AspectRatio::Landscape => &self.max_width_landscape,
            AspectRatio::Portrait => &self.max_width_portrait,
        }
    }
}
