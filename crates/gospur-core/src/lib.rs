//! Go Spur Core - scaffolding for Go web projects and CLI self-update
//!
//! This library provides the functionality behind the `gospur` binary: it
//! turns a handful of stack choices into a ready-to-run Go project, and
//! replaces the running binary with a newer release.
//!
//! # Architecture
//!
//! The library is organized into layers:
//!
//! - **Layer 1: Core Operations** - Path validation, stack configuration,
//!   file-set resolution, template rendering, release handling
//! - **Layer 2: Workflow Orchestration** - `ProjectInitializer`, `Updater`
//!   and the `ProductConfig` trait
//! - **Layer 3: CLI/TUI Interface** - Optional cliclack-based prompts (feature-gated)
//!
//! # Feature Flags
//!
//! - `tui` (default): Enables the cliclack-based TUI prompts module
//!
//! # Example Usage (without TUI)
//!
//! ```ignore
//! use gospur_core::{InitRequest, ProjectInitializer, StackConfigBuilder, StackOptions};
//!
//! let options = StackOptions::default();
//! let mut builder = StackConfigBuilder::new(&options);
//! builder
//!     .web_framework_str("echo")?
//!     .css_strategy_str("tailwind")?
//!     .rendering_str("templates")?;
//!
//! let request = InitRequest::parse(Some("my-app"), &cwd, &builder, "github.com/me/my-app")?;
//! let report = ProjectInitializer::default().init(&request).await?;
//! ```

pub mod error;
pub mod init;
pub mod path;
pub mod product;
pub mod runtime;
pub mod stack;
pub mod templates;
pub mod update;

#[cfg(feature = "tui")]
pub mod tui;

// Re-export main types for convenience
pub use error::{Error, Result};
pub use init::{InitReport, InitRequest, ProjectInitializer};
pub use path::{create_target_dir, validate_dir_path, ProjectPath};
pub use product::ProductConfig;
pub use runtime::Toolchain;
pub use stack::{
    validate_module_path, CssStrategy, Extra, ModulePath, RenderingStrategy, StackConfig,
    StackConfigBuilder, StackOptions, UiLibrary, WebFramework,
};
pub use templates::{ProjectContext, ProjectGenerator, TemplateStore};
pub use update::{UpdateCheck, UpdateOutcome, UpdateState, Updater};

#[cfg(feature = "tui")]
pub use tui::{run_init, run_update, InitArgs};
