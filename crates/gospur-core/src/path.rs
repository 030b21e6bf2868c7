//! Destination path validation and target directory creation

use crate::error::{Error, Result};
use std::fs;
use std::path::{Component, Path, PathBuf, MAIN_SEPARATOR};

/// Generated layouts never nest deeper than this many separators
pub const MAX_NESTING_DEPTH: usize = 3;

/// Directory used when `init` is run without a path argument
pub const DEFAULT_PROJECT_DIR: &str = "gospur";

/// Where the project is created
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectPath {
    /// Absolute path to the project directory
    full_path: PathBuf,
    /// Sanitized path as given by the user
    path: PathBuf,
}

impl ProjectPath {
    /// Validate an optional `init` argument and anchor it to `cwd`
    pub fn from_arg(arg: Option<&str>, cwd: &Path) -> Result<Self> {
        let path = match arg {
            Some(raw) => validate_dir_path(raw)?,
            None => PathBuf::from(DEFAULT_PROJECT_DIR),
        };

        let full_path = if path == Path::new(".") {
            cwd.to_path_buf()
        } else {
            cwd.join(&path)
        };

        Ok(Self { full_path, path })
    }

    pub fn full_path(&self) -> &Path {
        &self.full_path
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// True when the project is generated into the working directory itself
    pub fn is_cwd(&self) -> bool {
        self.path == Path::new(".")
    }
}

/// Normalize `raw` syntactically and reject traversal or deep nesting
pub fn validate_dir_path(raw: &str) -> Result<PathBuf> {
    let dir = normalize(Path::new(raw));

    if dir.components().any(|c| c == Component::ParentDir) {
        return Err(Error::invalid_path(
            dir.display().to_string(),
            "contains '..'",
        ));
    }

    let rendered = dir.to_string_lossy();
    let depth = rendered
        .chars()
        .filter(|c| *c == MAIN_SEPARATOR || *c == '/')
        .count();
    if depth > MAX_NESTING_DEPTH {
        return Err(Error::invalid_path(
            rendered.into_owned(),
            format!("exceeds maximum allowed depth of {MAX_NESTING_DEPTH}"),
        ));
    }

    Ok(dir)
}

/// Lexical cleanup: drops `.`, folds `name/..`, keeps leading `..`
fn normalize(path: &Path) -> PathBuf {
    let mut parts: Vec<Component> = Vec::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match parts.last() {
                Some(Component::Normal(_)) => {
                    parts.pop();
                }
                // `/..` is still `/`
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => parts.push(component),
            },
            other => parts.push(other),
        }
    }

    if parts.is_empty() {
        return PathBuf::from(".");
    }
    parts.iter().collect()
}

/// Create `path` and its parents.
///
/// In strict mode an existing path must be an empty directory. Otherwise
/// existing contents are ignored, since several generated files share a
/// directory.
pub fn create_target_dir(path: &Path, strict: bool) -> Result<()> {
    if strict && path.exists() {
        if !path.is_dir() {
            return Err(Error::invalid_path(
                path.display().to_string(),
                "is not a directory",
            ));
        }
        let mut entries = fs::read_dir(path).map_err(|e| Error::io(path, e))?;
        if entries.next().is_some() {
            return Err(Error::DirectoryNotEmpty(path.to_path_buf()));
        }
    }

    fs::create_dir_all(path).map_err(|e| Error::io(path, e))
}
