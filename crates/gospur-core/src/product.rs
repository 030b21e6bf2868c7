//! Product configuration trait for CLI binaries
//!
//! The binary implements this trait to supply its identity, release
//! endpoint and post-init instructions to the shared workflows.

use crate::path::ProjectPath;

/// Configuration trait for the CLI product
///
/// Implementors define:
/// - Product identity (name, display name, version)
/// - Release API location and its override variable
/// - Naming of the published binaries
/// - Post-init instructions
pub trait ProductConfig: Clone + Send + Sync + 'static {
    /// Internal product name (used for CLI command, env vars)
    fn name(&self) -> &'static str;

    /// Human-readable display name
    fn display_name(&self) -> &'static str;

    /// Version of the running binary
    fn version(&self) -> &'static str;

    /// Releases API endpoint (without `/latest` or `/tags/<tag>`)
    fn default_release_url(&self) -> &'static str;

    /// Environment variable name for overriding the release URL
    fn release_url_env(&self) -> &'static str;

    /// URL for product documentation
    fn docs_url(&self) -> &'static str;

    /// Commands to run after the project was created
    fn next_steps(&self, project: &ProjectPath) -> Vec<String>;

    /// CLI description shown in help text
    fn cli_description(&self) -> &'static str;

    /// Base name of the published executable
    fn binary_name(&self) -> &'static str {
        self.name()
    }

    /// User agent string for HTTP requests
    fn user_agent(&self) -> &'static str {
        self.name()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Minimal product used by library tests
    #[derive(Clone)]
    pub(crate) struct TestProduct {
        pub release_url: &'static str,
        pub release_url_env: &'static str,
        pub version: &'static str,
    }

    impl ProductConfig for TestProduct {
        fn name(&self) -> &'static str {
            "gospur"
        }

        fn display_name(&self) -> &'static str {
            "Go Spur"
        }

        fn version(&self) -> &'static str {
            self.version
        }

        fn default_release_url(&self) -> &'static str {
            self.release_url
        }

        fn release_url_env(&self) -> &'static str {
            self.release_url_env
        }

        fn docs_url(&self) -> &'static str {
            "https://example.com/docs"
        }

        fn next_steps(&self, project: &ProjectPath) -> Vec<String> {
            vec![format!("cd {}", project.path().display())]
        }

        fn cli_description(&self) -> &'static str {
            "test product"
        }
    }

    #[test]
    fn test_defaults_follow_name() {
        let product = TestProduct {
            release_url: "http://localhost/releases",
            release_url_env: "GOSPUR_TEST_RELEASE_URL_UNSET",
            version: "v1.0.0",
        };
        assert_eq!(product.binary_name(), "gospur");
        assert_eq!(product.user_agent(), "gospur");
    }
}
