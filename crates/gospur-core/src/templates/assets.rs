//! Read-only store of template and static files bundled into the binary

use crate::error::{Error, Result};
use include_dir::{include_dir, Dir};
use std::collections::HashMap;

static EMBEDDED: Dir<'static> = include_dir!("$CARGO_MANIFEST_DIR/assets");

/// Example image copied verbatim into every project
pub const EXAMPLE_ASSET: &str = "public/gopher.png";

/// Template store - either the bundled assets or an in-memory map
#[derive(Debug, Clone)]
pub enum TemplateStore {
    Embedded(&'static Dir<'static>),
    Memory(HashMap<String, Vec<u8>>),
}

impl Default for TemplateStore {
    fn default() -> Self {
        Self::embedded()
    }
}

impl TemplateStore {
    /// The assets compiled into this crate
    pub fn embedded() -> Self {
        Self::Embedded(&EMBEDDED)
    }

    /// Build a store from `(id, bytes)` pairs
    pub fn memory<I, K, V>(files: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Vec<u8>>,
    {
        Self::Memory(
            files
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Raw bytes for `id`. A missing id means the store itself is broken.
    pub fn read(&self, id: &str) -> Result<&[u8]> {
        let bytes = match self {
            Self::Embedded(dir) => dir.get_file(id).map(|f| f.contents()),
            Self::Memory(files) => files.get(id).map(Vec::as_slice),
        };
        bytes.ok_or_else(|| Error::corrupt(id, "missing from the asset store"))
    }

    pub fn read_str(&self, id: &str) -> Result<&str> {
        std::str::from_utf8(self.read(id)?).map_err(|e| Error::corrupt(id, e))
    }
}
