//! Go toolchain invocation
//!
//! Wraps the `go` binary the generated project is initialized with.

use crate::error::{Error, Result};
use crate::stack::ModulePath;
use std::path::Path;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command as TokioCommand;
use tokio::time::timeout;

/// Timeout for a single toolchain command
const COMMAND_TIMEOUT: Duration = Duration::from_secs(60);

/// A toolchain binary reachable through PATH
#[derive(Debug, Clone)]
pub struct Toolchain {
    /// Name of the binary (e.g., "go")
    program: String,
}

impl Default for Toolchain {
    fn default() -> Self {
        Self::go()
    }
}

impl Toolchain {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// The Go toolchain
    pub fn go() -> Self {
        Self::new("go")
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Check if the toolchain answers `version`
    pub fn is_installed(&self) -> bool {
        self.version().is_some()
    }

    /// Get the installed toolchain version (if available)
    pub fn version(&self) -> Option<String> {
        std::process::Command::new(&self.program)
            .arg("version")
            .output()
            .ok()
            .and_then(|output| {
                if output.status.success() {
                    String::from_utf8(output.stdout)
                        .ok()
                        .map(|s| s.trim().to_string())
                } else {
                    None
                }
            })
    }

    /// `go mod init <module>` inside `dir`
    pub async fn mod_init(&self, dir: &Path, module: &ModulePath) -> Result<()> {
        self.run(dir, &["mod", "init", module.as_str()]).await
    }

    /// Run the toolchain with `args` in `dir`, failing on a non-zero exit
    pub async fn run(&self, dir: &Path, args: &[&str]) -> Result<()> {
        let command = format!("{} {}", self.program, args.join(" "));
        let failed = |reason: String| Error::ToolchainFailed {
            command: command.clone(),
            reason,
        };

        tracing::debug!(%command, dir = %dir.display(), "running toolchain");

        let child = TokioCommand::new(&self.program)
            .args(args)
            .current_dir(dir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    failed(format!("'{}' is not installed or not in PATH", self.program))
                } else {
                    failed(e.to_string())
                }
            })?;

        let output = match timeout(COMMAND_TIMEOUT, child.wait_with_output()).await {
            Ok(Ok(output)) => output,
            Ok(Err(e)) => return Err(failed(e.to_string())),
            Err(_) => {
                return Err(failed(format!(
                    "timed out after {} seconds",
                    COMMAND_TIMEOUT.as_secs()
                )))
            }
        };

        if output.status.success() {
            return Ok(());
        }

        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        let reason = if stderr.is_empty() {
            format!("exit code {}", output.status.code().unwrap_or(-1))
        } else {
            stderr
        };
        Err(failed(reason))
    }
}
