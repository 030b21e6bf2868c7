//! Go module path validation

use crate::error::{Error, Result};
use std::fmt;

const MIN_LEN: usize = 3;
const MAX_LEN: usize = 255;
const RESERVED_CHARS: &[char] = &[' ', ':', '*', '?', '|'];

/// A module path accepted by `go mod init`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModulePath(String);

impl ModulePath {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ModulePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

pub fn validate_module_path(path: &str) -> Result<ModulePath> {
    let reject = |reason: String| Error::InvalidModulePath {
        path: path.to_string(),
        reason,
    };

    // Byte length, as the Go toolchain measures it
    let len = path.len();
    if len < MIN_LEN {
        return Err(reject(format!(
            "length cannot be less than {MIN_LEN} character(s)"
        )));
    }
    if len > MAX_LEN {
        return Err(reject(format!(
            "length exceeds maximum of {MAX_LEN} character(s)"
        )));
    }
    if has_url_scheme(path) {
        return Err(reject("should not start with a URL scheme".to_string()));
    }
    if path.contains(RESERVED_CHARS) {
        return Err(reject(
            "contains reserved characters (space : * ? |)".to_string(),
        ));
    }

    Ok(ModulePath(path.to_string()))
}

fn has_url_scheme(path: &str) -> bool {
    match path.split_once("://") {
        Some((scheme, _)) => {
            !scheme.is_empty()
                && scheme
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
        }
        None => false,
    }
}
