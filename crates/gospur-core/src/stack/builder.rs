//! Stack configuration model and its builder

use super::options::{
    CssStrategy, Extra, RenderingStrategy, StackOptions, UiLibrary, WebFramework,
};
use crate::error::{Error, Result};
use std::collections::BTreeSet;

/// The user's scaffolding choices
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StackConfig {
    pub web_framework: WebFramework,
    pub css_strategy: CssStrategy,
    pub ui_library: Option<UiLibrary>,
    pub rendering: RenderingStrategy,
    pub extras: BTreeSet<Extra>,
}

impl StackConfig {
    pub fn has_extra(&self, extra: Extra) -> bool {
        self.extras.contains(&extra)
    }
}

/// Collects choices step by step, validating each against the option tables.
///
/// Prompts and flags both feed this builder, so scripted construction
/// follows exactly the same filtering as the interactive flow.
#[derive(Debug, Clone)]
pub struct StackConfigBuilder<'a> {
    options: &'a StackOptions,
    web_framework: Option<WebFramework>,
    css_strategy: Option<CssStrategy>,
    ui_library: Option<UiLibrary>,
    rendering: Option<RenderingStrategy>,
    extras: BTreeSet<Extra>,
}

impl<'a> StackConfigBuilder<'a> {
    pub fn new(options: &'a StackOptions) -> Self {
        Self {
            options,
            web_framework: None,
            css_strategy: None,
            ui_library: None,
            rendering: None,
            extras: BTreeSet::new(),
        }
    }

    pub fn options(&self) -> &'a StackOptions {
        self.options
    }

    pub fn web_framework(&mut self, framework: WebFramework) -> Result<&mut Self> {
        if !self.options.web_frameworks.contains(&framework) {
            return Err(Error::UnsupportedFramework(framework.to_string()));
        }
        self.web_framework = Some(framework);
        Ok(self)
    }

    pub fn web_framework_str(&mut self, framework: &str) -> Result<&mut Self> {
        self.web_framework(framework.parse()?)
    }

    pub fn css_strategy(&mut self, css: CssStrategy) -> Result<&mut Self> {
        if !self.options.css_strategies.contains(&css) {
            return Err(unknown("CSS strategy", css));
        }
        self.css_strategy = Some(css);
        Ok(self)
    }

    pub fn css_strategy_str(&mut self, css: &str) -> Result<&mut Self> {
        self.css_strategy(css.parse()?)
    }

    /// UI libraries compatible with the chosen CSS strategy.
    /// Empty until a CSS strategy is chosen.
    pub fn ui_library_options(&self) -> Vec<UiLibrary> {
        match self.css_strategy {
            Some(css) => self.options.ui_libraries_for(css),
            None => Vec::new(),
        }
    }

    pub fn ui_library(&mut self, library: UiLibrary) -> Result<&mut Self> {
        if self.options.ui_library(library).is_none() {
            return Err(unknown("UI library", library));
        }
        self.ui_library = Some(library);
        Ok(self)
    }

    pub fn ui_library_str(&mut self, library: &str) -> Result<&mut Self> {
        self.ui_library(library.parse()?)
    }

    pub fn rendering(&mut self, rendering: RenderingStrategy) -> Result<&mut Self> {
        if !self.options.rendering_strategies.contains(&rendering) {
            return Err(unknown("rendering strategy", rendering));
        }
        self.rendering = Some(rendering);
        Ok(self)
    }

    pub fn rendering_str(&mut self, rendering: &str) -> Result<&mut Self> {
        self.rendering(rendering.parse()?)
    }

    pub fn extra(&mut self, extra: Extra) -> Result<&mut Self> {
        if !self.options.extras.contains(&extra) {
            return Err(unknown("extra option", extra));
        }
        self.extras.insert(extra);
        Ok(self)
    }

    pub fn extra_str(&mut self, extra: &str) -> Result<&mut Self> {
        self.extra(extra.parse()?)
    }

    pub fn remove_extra(&mut self, extra: Extra) -> &mut Self {
        self.extras.remove(&extra);
        self
    }

    pub fn has_web_framework(&self) -> bool {
        self.web_framework.is_some()
    }

    pub fn has_css_strategy(&self) -> bool {
        self.css_strategy.is_some()
    }

    pub fn has_ui_library(&self) -> bool {
        self.ui_library.is_some()
    }

    pub fn has_rendering(&self) -> bool {
        self.rendering.is_some()
    }

    pub fn build(&self) -> Result<StackConfig> {
        let web_framework = self.web_framework.ok_or(Error::ConfigIncomplete {
            field: "web framework",
        })?;
        let css_strategy = self.css_strategy.ok_or(Error::ConfigIncomplete {
            field: "CSS strategy",
        })?;
        let rendering = self.rendering.ok_or(Error::ConfigIncomplete {
            field: "rendering strategy",
        })?;

        if let Some(library) = self.ui_library {
            if let Some(opt) = self.options.ui_library(library) {
                if !opt.supports(css_strategy) {
                    let requires: Vec<&str> =
                        opt.requires.iter().map(|c| c.display_name()).collect();
                    return Err(Error::IncompatibleUiLibrary {
                        library: library.to_string(),
                        css: css_strategy.to_string(),
                        requires: requires.join(", "),
                    });
                }
            }
        }

        Ok(StackConfig {
            web_framework,
            css_strategy,
            ui_library: self.ui_library,
            rendering,
            extras: self.extras.clone(),
        })
    }
}

fn unknown(kind: &'static str, value: impl ToString) -> Error {
    Error::UnknownOption {
        kind,
        value: value.to_string(),
    }
}
