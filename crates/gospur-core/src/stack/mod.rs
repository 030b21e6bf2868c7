//! Stack configuration: option tables, the builder, and module paths

pub mod builder;
pub mod module_path;
pub mod options;

pub use builder::{StackConfig, StackConfigBuilder};
pub use module_path::{validate_module_path, ModulePath};
pub use options::{
    CssStrategy, Extra, RenderingStrategy, StackOptions, UiLibrary, UiLibraryOption, WebFramework,
};
