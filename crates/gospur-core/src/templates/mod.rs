//! Project templates: embedded assets, file tables, rendering and writing
//!
//! This module provides:
//! - The embedded template store (`assets`)
//! - Output path tables and their resolution for a stack (`files`)
//! - The typed render context (`context`)
//! - Raw HTML page generation (`pages`)
//! - Rendering with tera and writing to disk (`render`)

pub mod assets;
pub mod context;
pub mod files;
pub mod pages;
pub mod render;

pub use assets::{TemplateStore, EXAMPLE_ASSET};
pub use context::ProjectContext;
pub use files::{resolve, Page, ProjectFileMap, ResolvedFiles};
pub use pages::{format_html, generate_page};
pub use render::{write_file, ProjectGenerator, TemplateRenderer};
