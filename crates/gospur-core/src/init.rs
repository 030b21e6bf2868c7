//! Project initialization: validated inputs in, a generated Go project out

use crate::error::Result;
use crate::path::{create_target_dir, ProjectPath};
use crate::runtime::Toolchain;
use crate::stack::{validate_module_path, ModulePath, StackConfig, StackConfigBuilder};
use crate::templates::{ProjectContext, ProjectGenerator};
use std::path::{Path, PathBuf};

/// Everything `init` needs, validated up front
#[derive(Debug, Clone)]
pub struct InitRequest {
    pub project: ProjectPath,
    pub stack: StackConfig,
    pub module: ModulePath,
}

impl InitRequest {
    /// Validates the destination, the stack choices and the module path, in
    /// that order. Nothing touches the filesystem.
    pub fn parse(
        raw_path: Option<&str>,
        cwd: &Path,
        builder: &StackConfigBuilder<'_>,
        raw_module: &str,
    ) -> Result<Self> {
        let project = ProjectPath::from_arg(raw_path, cwd)?;
        let stack = builder.build()?;
        let module = validate_module_path(raw_module)?;

        Ok(Self {
            project,
            stack,
            module,
        })
    }
}

/// Result of a successful `init`
#[derive(Debug, Clone)]
pub struct InitReport {
    pub project: ProjectPath,
    /// Files written, in write order
    pub files: Vec<PathBuf>,
    /// False when `go mod init` was skipped
    pub module_initialized: bool,
}

/// Creates the project directory, writes the files and initializes the module
#[derive(Debug, Clone, Default)]
pub struct ProjectInitializer {
    generator: ProjectGenerator,
    toolchain: Toolchain,
    skip_mod_init: bool,
}

impl ProjectInitializer {
    pub fn new(generator: ProjectGenerator, toolchain: Toolchain) -> Self {
        Self {
            generator,
            toolchain,
            skip_mod_init: false,
        }
    }

    /// Leave the module uninitialized (no `go` required)
    pub fn skip_mod_init(mut self, skip: bool) -> Self {
        self.skip_mod_init = skip;
        self
    }

    pub fn toolchain(&self) -> &Toolchain {
        &self.toolchain
    }

    pub async fn init(&self, request: &InitRequest) -> Result<InitReport> {
        let root = request.project.full_path();

        create_target_dir(root, true)?;
        tracing::debug!(path = %root.display(), "created project directory");

        let ctx = ProjectContext::for_host(&request.stack, &request.module);
        let files = self.generator.generate(root, &request.stack, &ctx).await?;
        tracing::info!(count = files.len(), path = %root.display(), "project files written");

        if !self.skip_mod_init {
            self.toolchain.mod_init(root, &request.module).await?;
            tracing::info!(module = %request.module, "initialized go module");
        }

        Ok(InitReport {
            project: request.project.clone(),
            files,
            module_initialized: !self.skip_mod_init,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::stack::{CssStrategy, Extra, RenderingStrategy, StackOptions, WebFramework};

    fn builder(options: &StackOptions) -> StackConfigBuilder<'_> {
        let mut builder = StackConfigBuilder::new(options);
        builder
            .web_framework(WebFramework::Echo)
            .unwrap()
            .css_strategy(CssStrategy::Vanilla)
            .unwrap()
            .rendering(RenderingStrategy::Templates)
            .unwrap()
            .extra(Extra::Dockerfile)
            .unwrap();
        builder
    }

    #[test]
    fn test_default_toolchain_is_go() {
        let initializer = ProjectInitializer::default();
        assert_eq!(initializer.toolchain().program(), "go");
    }

    #[test]
    fn test_parse_checks_path_first() {
        let options = StackOptions::default();
        let incomplete = StackConfigBuilder::new(&options);

        let err = InitRequest::parse(Some("../x"), Path::new("/work"), &incomplete, "a b")
            .unwrap_err();
        assert!(matches!(err, Error::InvalidPath { .. }));

        let err = InitRequest::parse(Some("app"), Path::new("/work"), &incomplete, "a b")
            .unwrap_err();
        assert!(matches!(err, Error::ConfigIncomplete { .. }));

        let err = InitRequest::parse(Some("app"), Path::new("/work"), &builder(&options), "a b")
            .unwrap_err();
        assert!(matches!(err, Error::InvalidModulePath { .. }));
    }

    #[tokio::test]
    async fn test_init_without_mod_init() {
        let cwd = tempfile::tempdir().unwrap();
        let options = StackOptions::default();
        let request = InitRequest::parse(
            Some("my-app"),
            cwd.path(),
            &builder(&options),
            "github.com/org/my-app",
        )
        .unwrap();

        let report = ProjectInitializer::default()
            .skip_mod_init(true)
            .init(&request)
            .await
            .unwrap();

        let root = cwd.path().join("my-app");
        assert_eq!(report.project.full_path(), root);
        assert!(!report.module_initialized);
        assert!(report.files.iter().all(|f| f.starts_with(&root)));
        assert!(root.join("Dockerfile").is_file());
        assert!(!root.join("tailwind.config.js").exists());
        assert!(!root.join("go.mod").exists());
    }

    #[tokio::test]
    async fn test_non_empty_directory_is_rejected() {
        let cwd = tempfile::tempdir().unwrap();
        std::fs::create_dir(cwd.path().join("taken")).unwrap();
        std::fs::write(cwd.path().join("taken/keep.txt"), "mine").unwrap();

        let options = StackOptions::default();
        let request =
            InitRequest::parse(Some("taken"), cwd.path(), &builder(&options), "example.com/app")
                .unwrap();

        let err = ProjectInitializer::default()
            .skip_mod_init(true)
            .init(&request)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::DirectoryNotEmpty(_)));
        assert_eq!(
            std::fs::read_to_string(cwd.path().join("taken/keep.txt")).unwrap(),
            "mine"
        );
        assert_eq!(std::fs::read_dir(cwd.path().join("taken")).unwrap().count(), 1);
    }

    #[tokio::test]
    async fn test_missing_toolchain_fails_after_generation() {
        let cwd = tempfile::tempdir().unwrap();
        let options = StackOptions::default();
        let request =
            InitRequest::parse(None, cwd.path(), &builder(&options), "example.com/app").unwrap();

        let err = ProjectInitializer::new(
            ProjectGenerator::default(),
            Toolchain::new("gospur-no-such-toolchain"),
        )
        .init(&request)
        .await
        .unwrap_err();

        assert!(matches!(err, Error::ToolchainFailed { .. }));
        assert!(cwd.path().join("gospur/main.go").is_file());
    }
}
