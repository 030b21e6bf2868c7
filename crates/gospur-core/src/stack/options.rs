//! Stack option identifiers and the tables that offer them

use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// Web frameworks the API templates are written for
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum WebFramework {
    Echo,
    Fiber,
    Chi,
}

impl WebFramework {
    pub fn display_name(&self) -> &'static str {
        match self {
            WebFramework::Echo => "Echo",
            WebFramework::Fiber => "Fiber",
            WebFramework::Chi => "Chi",
        }
    }

    /// Fiber and Chi render pages inside a shared root layout; Echo pages
    /// are self-contained documents.
    pub fn uses_layout_shell(&self) -> bool {
        matches!(self, WebFramework::Fiber | WebFramework::Chi)
    }
}

impl FromStr for WebFramework {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "echo" => Ok(WebFramework::Echo),
            "fiber" => Ok(WebFramework::Fiber),
            "chi" => Ok(WebFramework::Chi),
            _ => Err(Error::UnsupportedFramework(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CssStrategy {
    Tailwind,
    Vanilla,
}

impl CssStrategy {
    pub fn display_name(&self) -> &'static str {
        match self {
            CssStrategy::Tailwind => "Tailwind",
            CssStrategy::Vanilla => "Vanilla CSS",
        }
    }
}

impl FromStr for CssStrategy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "tailwind" => Ok(CssStrategy::Tailwind),
            "vanilla" | "vanilla css" | "css" => Ok(CssStrategy::Vanilla),
            _ => Err(Error::UnknownOption {
                kind: "CSS strategy",
                value: s.to_string(),
            }),
        }
    }
}

/// Pre-styled component libraries
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum UiLibrary {
    Preline,
    DaisyUI,
}

impl UiLibrary {
    pub fn display_name(&self) -> &'static str {
        match self {
            UiLibrary::Preline => "Preline",
            UiLibrary::DaisyUI => "DaisyUI",
        }
    }
}

impl FromStr for UiLibrary {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "preline" => Ok(UiLibrary::Preline),
            "daisyui" | "daisy" => Ok(UiLibrary::DaisyUI),
            _ => Err(Error::UnknownOption {
                kind: "UI library",
                value: s.to_string(),
            }),
        }
    }
}

/// How HTML reaches the browser
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RenderingStrategy {
    /// Server-side html/template pages
    Templates,
    /// A separately built client served from `web/dist`
    Separate,
}

impl RenderingStrategy {
    pub fn display_name(&self) -> &'static str {
        match self {
            RenderingStrategy::Templates => "Templates",
            RenderingStrategy::Separate => "Seperate Client (eg. React, Svelte, etc.)",
        }
    }

    /// Short identifier accepted on the command line
    pub fn id(&self) -> &'static str {
        match self {
            RenderingStrategy::Templates => "templates",
            RenderingStrategy::Separate => "separate",
        }
    }
}

impl FromStr for RenderingStrategy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "templates" | "template" => Ok(RenderingStrategy::Templates),
            "separate" | "seperate" | "client" => Ok(RenderingStrategy::Separate),
            _ => Err(Error::UnknownOption {
                kind: "rendering strategy",
                value: s.to_string(),
            }),
        }
    }
}

/// Independent add-ons
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Extra {
    Htmx,
    Dockerfile,
}

impl Extra {
    pub fn display_name(&self) -> &'static str {
        match self {
            Extra::Htmx => "HTMX",
            Extra::Dockerfile => "Dockerfile",
        }
    }
}

impl FromStr for Extra {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "htmx" => Ok(Extra::Htmx),
            "dockerfile" | "docker" => Ok(Extra::Dockerfile),
            _ => Err(Error::UnknownOption {
                kind: "extra option",
                value: s.to_string(),
            }),
        }
    }
}

macro_rules! display_via_name {
    ($($ty:ty),*) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    write!(f, "{}", self.display_name())
                }
            }
        )*
    };
}

display_via_name!(WebFramework, CssStrategy, UiLibrary, RenderingStrategy, Extra);

/// A UI library and the CSS strategies it works with.
/// An empty `requires` list means any strategy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiLibraryOption {
    pub library: UiLibrary,
    pub requires: Vec<CssStrategy>,
}

impl UiLibraryOption {
    pub fn supports(&self, css: CssStrategy) -> bool {
        self.requires.is_empty() || self.requires.contains(&css)
    }
}

/// The option tables offered to the user, in prompt order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StackOptions {
    pub web_frameworks: Vec<WebFramework>,
    pub css_strategies: Vec<CssStrategy>,
    pub ui_libraries: Vec<UiLibraryOption>,
    pub rendering_strategies: Vec<RenderingStrategy>,
    pub extras: Vec<Extra>,
}

impl Default for StackOptions {
    fn default() -> Self {
        Self {
            web_frameworks: vec![WebFramework::Echo, WebFramework::Fiber, WebFramework::Chi],
            css_strategies: vec![CssStrategy::Tailwind, CssStrategy::Vanilla],
            ui_libraries: vec![
                UiLibraryOption {
                    library: UiLibrary::Preline,
                    requires: vec![CssStrategy::Tailwind],
                },
                UiLibraryOption {
                    library: UiLibrary::DaisyUI,
                    requires: vec![CssStrategy::Tailwind],
                },
            ],
            rendering_strategies: vec![RenderingStrategy::Templates, RenderingStrategy::Separate],
            extras: vec![Extra::Htmx, Extra::Dockerfile],
        }
    }
}

impl StackOptions {
    /// UI libraries usable with `css`, in table order
    pub fn ui_libraries_for(&self, css: CssStrategy) -> Vec<UiLibrary> {
        self.ui_libraries
            .iter()
            .filter(|opt| opt.supports(css))
            .map(|opt| opt.library)
            .collect()
    }

    pub fn ui_library(&self, library: UiLibrary) -> Option<&UiLibraryOption> {
        self.ui_libraries.iter().find(|opt| opt.library == library)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("ECHO".parse::<WebFramework>().unwrap(), WebFramework::Echo);
        assert_eq!("fiber".parse::<WebFramework>().unwrap(), WebFramework::Fiber);
        assert_eq!(
            "Vanilla CSS".parse::<CssStrategy>().unwrap(),
            CssStrategy::Vanilla
        );
        assert_eq!("daisyui".parse::<UiLibrary>().unwrap(), UiLibrary::DaisyUI);
        assert_eq!(
            "Seperate".parse::<RenderingStrategy>().unwrap(),
            RenderingStrategy::Separate
        );
        assert_eq!("HTMX".parse::<Extra>().unwrap(), Extra::Htmx);
    }

    #[test]
    fn test_unknown_framework_is_unsupported() {
        let err = "Gin".parse::<WebFramework>().unwrap_err();
        assert!(matches!(err, Error::UnsupportedFramework(ref f) if f == "Gin"));
    }

    #[test]
    fn test_unknown_option_names_kind() {
        let err = "Bootstrap".parse::<UiLibrary>().unwrap_err();
        assert_eq!(err.to_string(), "unknown UI library 'Bootstrap'");
    }

    #[test]
    fn test_ui_libraries_filtered_by_css() {
        let opts = StackOptions::default();
        assert_eq!(
            opts.ui_libraries_for(CssStrategy::Tailwind),
            vec![UiLibrary::Preline, UiLibrary::DaisyUI]
        );
        assert!(opts.ui_libraries_for(CssStrategy::Vanilla).is_empty());
    }

    #[test]
    fn test_library_without_dependencies_is_always_offered() {
        let mut opts = StackOptions::default();
        opts.ui_libraries[1].requires.clear();
        assert_eq!(
            opts.ui_libraries_for(CssStrategy::Vanilla),
            vec![UiLibrary::DaisyUI]
        );
    }

    #[test]
    fn test_layout_shell_frameworks() {
        assert!(!WebFramework::Echo.uses_layout_shell());
        assert!(WebFramework::Fiber.uses_layout_shell());
        assert!(WebFramework::Chi.uses_layout_shell());
    }
}
