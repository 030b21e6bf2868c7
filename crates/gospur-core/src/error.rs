//! Error taxonomy shared by project generation and self-update

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid directory path '{path}': {reason}")]
    InvalidPath { path: String, reason: String },

    #[error("stack configuration is incomplete: no {field} selected")]
    ConfigIncomplete { field: &'static str },

    #[error("unsupported web framework '{0}'")]
    UnsupportedFramework(String),

    #[error("unknown {kind} '{value}'")]
    UnknownOption { kind: &'static str, value: String },

    #[error("UI library '{library}' cannot be used with '{css}' (requires {requires})")]
    IncompatibleUiLibrary {
        library: String,
        css: String,
        requires: String,
    },

    /// Only reachable from a broken asset store, never from user input.
    #[error("template '{template}' is corrupt (please report this): {reason}")]
    TemplateCorrupt { template: String, reason: String },

    #[error("'{}' already exists and is not empty", .0.display())]
    DirectoryNotEmpty(PathBuf),

    #[error("invalid module path '{path}': {reason}")]
    InvalidModulePath { path: String, reason: String },

    #[error("failed to write '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("`{command}` failed: {reason}")]
    ToolchainFailed { command: String, reason: String },

    #[error("request took too long or was cancelled")]
    RequestTimedOut,

    #[error("release '{0}' not found")]
    VersionNotFound(String),

    #[error("release request to {url} failed: {reason}")]
    ReleaseRequest { url: String, reason: String },

    #[error("could not decode release metadata: {0}")]
    MalformedRelease(String),

    #[error("no release binary matches {os}/{arch}")]
    NoCompatibleBinary { os: String, arch: String },

    #[error("'{0}' is not a .tar.gz or .zip archive")]
    UnsupportedArchiveFormat(String),

    #[error("failed to uncompress '{archive}': {reason}")]
    ArchiveCorrupt { archive: String, reason: String },

    #[error("binary '{0}' not found after uncompressing")]
    BinaryNotFoundInArchive(String),

    #[error("failed to replace '{}': {reason}", path.display())]
    ReplaceFailed { path: PathBuf, reason: String },
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn invalid_path(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidPath {
            path: path.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn corrupt(template: impl Into<String>, reason: impl ToString) -> Self {
        Self::TemplateCorrupt {
            template: template.into(),
            reason: reason.to_string(),
        }
    }
}
