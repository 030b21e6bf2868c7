//! Project file tables and the resolver that applies them to a stack

use crate::error::{Error, Result};
use crate::stack::{CssStrategy, Extra, RenderingStrategy, StackConfig, WebFramework};
use std::collections::BTreeMap;

/// Excludes an otherwise listed base file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipRule {
    /// Tooling config that only makes sense for one CSS strategy
    RequiresCss(CssStrategy),
    /// Files belonging to an optional add-on
    RequiresExtra(Extra),
}

impl SkipRule {
    pub fn skips(&self, cfg: &StackConfig) -> bool {
        match self {
            SkipRule::RequiresCss(css) => cfg.css_strategy != *css,
            SkipRule::RequiresExtra(extra) => !cfg.has_extra(*extra),
        }
    }
}

/// Framework-independent file rendered from a template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseFile {
    pub output: &'static str,
    pub template: &'static str,
    pub skip: Option<SkipRule>,
}

/// File whose template differs per web framework
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiFile {
    pub output: &'static str,
    pub candidates: Vec<(WebFramework, &'static str)>,
}

/// Pages generated from HTML fragments instead of templates
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Page {
    Home,
    Error,
    RootLayout,
    ClientInstructions,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageInclusion {
    Always,
    /// Only for frameworks that compose pages inside a root layout
    WhenLayoutShell,
    WhenRendering(RenderingStrategy),
}

impl PageInclusion {
    pub fn includes(&self, cfg: &StackConfig) -> bool {
        match self {
            PageInclusion::Always => true,
            PageInclusion::WhenLayoutShell => cfg.web_framework.uses_layout_shell(),
            PageInclusion::WhenRendering(rendering) => cfg.rendering == *rendering,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageFile {
    pub output: &'static str,
    pub page: Page,
    pub include: PageInclusion,
}

/// Every file a project can contain, grouped by class
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectFileMap {
    pub base: Vec<BaseFile>,
    pub api: Vec<ApiFile>,
    pub pages: Vec<PageFile>,
}

impl Default for ProjectFileMap {
    fn default() -> Self {
        let base = |output: &'static str, template: &'static str, skip: Option<SkipRule>| BaseFile {
            output,
            template,
            skip,
        };
        let api = |output: &'static str, [echo, fiber, chi]: [&'static str; 3]| ApiFile {
            output,
            candidates: vec![
                (WebFramework::Echo, echo),
                (WebFramework::Fiber, fiber),
                (WebFramework::Chi, chi),
            ],
        };
        let page = |output: &'static str, page: Page, include: PageInclusion| PageFile {
            output,
            page,
            include,
        };

        Self {
            base: vec![
                base("config/env.go", "base/env.go.tmpl", None),
                base("web/styles/globals.css", "base/globals.css.tmpl", None),
                base(".gitignore", "base/gitignore.tmpl", None),
                base("Makefile", "base/makefile.tmpl", None),
                base("README.md", "base/readme.md.tmpl", None),
                base("esbuild.config.js", "base/esbuild.config.js.tmpl", None),
                base("package.json", "base/package.json.tmpl", None),
                base(
                    "tailwind.config.js",
                    "base/tailwind.config.js.tmpl",
                    Some(SkipRule::RequiresCss(CssStrategy::Tailwind)),
                ),
                base("build_dev.go", "base/build_dev.go.tmpl", None),
                base("build_prod.go", "base/build_prod.go.tmpl", None),
                base(
                    "Dockerfile",
                    "base/dockerfile.tmpl",
                    Some(SkipRule::RequiresExtra(Extra::Dockerfile)),
                ),
                base(
                    ".dockerignore",
                    "base/dockerignore.tmpl",
                    Some(SkipRule::RequiresExtra(Extra::Dockerfile)),
                ),
                base("main.go", "base/main.go.tmpl", None),
            ],
            api: vec![
                api(
                    "api/api.go",
                    [
                        "api/api.go.echo.tmpl",
                        "api/api.go.fiber.tmpl",
                        "api/api.go.chi.tmpl",
                    ],
                ),
                api(
                    "api/route.go",
                    [
                        "api/route.go.echo.tmpl",
                        "api/route.go.fiber.tmpl",
                        "api/route.go.chi.tmpl",
                    ],
                ),
                api(
                    "api/handler.go",
                    [
                        "api/handler.go.echo.tmpl",
                        "api/handler.go.fiber.tmpl",
                        "api/handler.go.chi.tmpl",
                    ],
                ),
            ],
            pages: vec![
                page("web/Home.html", Page::Home, PageInclusion::Always),
                page("web/Error.html", Page::Error, PageInclusion::Always),
                page(
                    "web/layouts/Root.html",
                    Page::RootLayout,
                    PageInclusion::WhenLayoutShell,
                ),
                page(
                    "web/dist/instruction.md",
                    Page::ClientInstructions,
                    PageInclusion::WhenRendering(RenderingStrategy::Separate),
                ),
            ],
        }
    }
}

/// Output path -> source for each file class, sorted by output path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedFiles {
    pub base: BTreeMap<&'static str, &'static str>,
    pub api: BTreeMap<&'static str, &'static str>,
    pub pages: BTreeMap<&'static str, Page>,
}

impl ResolvedFiles {
    pub(crate) fn len(&self) -> usize {
        self.base.len() + self.api.len() + self.pages.len()
    }

    /// All output paths across the three classes
    pub fn outputs(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.base
            .keys()
            .chain(self.api.keys())
            .chain(self.pages.keys())
            .copied()
    }
}

/// Compute exactly which files a stack produces
pub fn resolve(map: &ProjectFileMap, cfg: &StackConfig) -> Result<ResolvedFiles> {
    let base = map
        .base
        .iter()
        .filter(|file| !file.skip.is_some_and(|rule| rule.skips(cfg)))
        .map(|file| (file.output, file.template))
        .collect();

    let mut api = BTreeMap::new();
    for file in &map.api {
        let template = file
            .candidates
            .iter()
            .find(|(framework, _)| *framework == cfg.web_framework)
            .map(|(_, template)| *template)
            .ok_or_else(|| Error::UnsupportedFramework(cfg.web_framework.to_string()))?;
        api.insert(file.output, template);
    }

    let pages = map
        .pages
        .iter()
        .filter(|file| file.include.includes(cfg))
        .map(|file| (file.output, file.page))
        .collect();

    Ok(ResolvedFiles { base, api, pages })
}
