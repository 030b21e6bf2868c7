//! Typed data handed to every template

use crate::stack::{
    CssStrategy, Extra, ModulePath, RenderingStrategy, StackConfig, UiLibrary, WebFramework,
};
use serde::Serialize;

/// Render context, built once per run.
///
/// Serialized with PascalCase keys, so templates read `Web.IsEcho`,
/// `UI.HasTailwind`, `ModPath`, and so on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ProjectContext {
    pub mod_path: String,
    pub is_linux: bool,
    pub web: WebFlags,
    #[serde(rename = "UI")]
    pub ui: UiFlags,
    pub render: RenderFlags,
    pub extras: ExtraFlags,
}

/// Exactly one flag is set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct WebFlags {
    pub is_echo: bool,
    pub is_fiber: bool,
    pub is_chi: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct UiFlags {
    pub has_tailwind: bool,
    pub has_preline: bool,
    pub has_daisy: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct RenderFlags {
    pub is_templates: bool,
    pub is_separate: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ExtraFlags {
    #[serde(rename = "HasHTMX")]
    pub has_htmx: bool,
    #[serde(rename = "HasDockerfile")]
    pub has_dockerfile: bool,
}

impl ProjectContext {
    /// `os` is a `std::env::consts::OS` style name of the target host
    pub fn new(cfg: &StackConfig, mod_path: &ModulePath, os: &str) -> Self {
        Self {
            mod_path: mod_path.to_string(),
            is_linux: os == "linux",
            web: WebFlags {
                is_echo: cfg.web_framework == WebFramework::Echo,
                is_fiber: cfg.web_framework == WebFramework::Fiber,
                is_chi: cfg.web_framework == WebFramework::Chi,
            },
            ui: UiFlags {
                has_tailwind: cfg.css_strategy == CssStrategy::Tailwind,
                has_preline: cfg.ui_library == Some(UiLibrary::Preline),
                has_daisy: cfg.ui_library == Some(UiLibrary::DaisyUI),
            },
            render: RenderFlags {
                is_templates: cfg.rendering == RenderingStrategy::Templates,
                is_separate: cfg.rendering == RenderingStrategy::Separate,
            },
            extras: ExtraFlags {
                has_htmx: cfg.has_extra(Extra::Htmx),
                has_dockerfile: cfg.has_extra(Extra::Dockerfile),
            },
        }
    }

    /// Context for the host this process runs on
    pub fn for_host(cfg: &StackConfig, mod_path: &ModulePath) -> Self {
        Self::new(cfg, mod_path, std::env::consts::OS)
    }
}
