//! Template rendering and project file writing

use crate::error::{Error, Result};
use crate::stack::StackConfig;
use crate::templates::assets::{TemplateStore, EXAMPLE_ASSET};
use crate::templates::context::ProjectContext;
use crate::templates::files::{resolve, ProjectFileMap};
use crate::templates::pages::generate_page;
use std::path::{Path, PathBuf};
use tera::{Context, Tera};
use tokio::fs;

/// Tera instance holding the templates one project needs
pub struct TemplateRenderer {
    tera: Tera,
}

impl TemplateRenderer {
    /// Parses every template in `ids`. A parse failure is a broken store.
    pub fn new<'a, I>(store: &TemplateStore, ids: I) -> Result<Self>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut tera = Tera::default();
        tera.autoescape_on(vec![]);

        for id in ids {
            let source = store.read_str(id)?;
            tera.add_raw_template(id, source)
                .map_err(|e| Error::corrupt(id, describe(&e)))?;
        }

        Ok(Self { tera })
    }

    pub fn render(&self, id: &str, ctx: &ProjectContext) -> Result<String> {
        let context = Context::from_serialize(ctx).map_err(|e| Error::corrupt(id, describe(&e)))?;
        self.tera
            .render(id, &context)
            .map_err(|e| Error::corrupt(id, describe(&e)))
    }
}

/// Tera keeps the useful part of an error in its source chain
fn describe(err: &tera::Error) -> String {
    let mut message = err.to_string();
    let mut source = std::error::Error::source(err);
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

/// Write `bytes` to `path`, creating parent directories and truncating
/// an existing file.
pub async fn write_file(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .await
            .map_err(|e| Error::io(parent, e))?;
    }
    fs::write(path, bytes).await.map_err(|e| Error::io(path, e))
}

/// Renders and writes every file of a project
#[derive(Debug, Clone, Default)]
pub struct ProjectGenerator {
    pub store: TemplateStore,
    pub file_map: ProjectFileMap,
}

impl ProjectGenerator {
    pub fn new(store: TemplateStore, file_map: ProjectFileMap) -> Self {
        Self { store, file_map }
    }

    /// Writes the project under `root` and returns the written paths.
    ///
    /// Everything is rendered before the first write, so a broken template
    /// leaves `root` untouched. A write failure aborts and keeps the files
    /// already written.
    pub async fn generate(
        &self,
        root: &Path,
        cfg: &StackConfig,
        ctx: &ProjectContext,
    ) -> Result<Vec<PathBuf>> {
        let files = resolve(&self.file_map, cfg)?;
        tracing::debug!(
            outputs = ?files.outputs().collect::<Vec<_>>(),
            "resolved project files"
        );
        let renderer = TemplateRenderer::new(
            &self.store,
            files.base.values().chain(files.api.values()).copied(),
        )?;

        let mut contents: Vec<(&str, Vec<u8>)> = Vec::with_capacity(files.len() + 1);
        for (output, template) in files.base.iter().chain(files.api.iter()) {
            contents.push((*output, renderer.render(template, ctx)?.into_bytes()));
        }
        for (output, page) in &files.pages {
            contents.push((*output, generate_page(*page, cfg).into_bytes()));
        }
        contents.push((EXAMPLE_ASSET, self.store.read(EXAMPLE_ASSET)?.to_vec()));

        let mut written = Vec::with_capacity(contents.len());
        for (output, bytes) in contents {
            let path = root.join(output);
            write_file(&path, &bytes).await?;
            tracing::debug!(path = %path.display(), "wrote file");
            written.push(path);
        }

        Ok(written)
    }
}
