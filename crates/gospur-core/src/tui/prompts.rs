//! Charm-style CLI prompts using cliclack

use crate::init::{InitReport, InitRequest, ProjectInitializer};
use crate::path::ProjectPath;
use crate::product::ProductConfig;
use crate::stack::{
    validate_module_path, CssStrategy, RenderingStrategy, StackConfigBuilder, StackOptions,
    UiLibrary, WebFramework,
};
use crate::update::{UpdateCheck, Updater, FETCH_DEADLINE};
use anyhow::Result;
use colored::Colorize;
use std::future::Future;
use std::time::Duration;

/// Pause after stopping a spinner so its last frame is not interleaved
/// with the next line of output
const SPINNER_GRACE: Duration = Duration::from_millis(100);

/// CLI arguments for the init command. Anything left unset is prompted for.
#[derive(Debug, Clone, Default)]
pub struct InitArgs {
    /// Project directory, relative to the working directory
    pub path: Option<String>,

    pub framework: Option<String>,
    pub styling: Option<String>,
    pub ui: Option<String>,
    pub render: Option<String>,

    /// Add-ons, only selectable through flags
    pub extras: Vec<String>,

    /// Go module path
    pub module: Option<String>,

    /// Do not run `go mod init`
    pub skip_mod_init: bool,
}

/// Run `init` with interactive prompts for missing choices
pub async fn run_init<C: ProductConfig>(config: &C, args: InitArgs) -> Result<InitReport> {
    cliclack::intro(config.display_name())?;

    let cwd = std::env::current_dir()?;
    // Reject a bad destination before asking anything
    ProjectPath::from_arg(args.path.as_deref(), &cwd)?;

    let options = StackOptions::default();
    let mut builder = StackConfigBuilder::new(&options);
    select_stack(&mut builder, &args)?;

    let module = match &args.module {
        Some(module) => module.clone(),
        None => prompt_module_path()?,
    };

    let request = InitRequest::parse(args.path.as_deref(), &cwd, &builder, &module)?;
    let initializer = ProjectInitializer::default().skip_mod_init(args.skip_mod_init);
    let toolchain = initializer.toolchain();
    if !args.skip_mod_init && !toolchain.is_installed() {
        cliclack::log::warning(format!(
            "'{}' was not found in PATH, `go mod init` will fail",
            toolchain.program()
        ))?;
    }

    let report = with_spinner("Creating project...", initializer.init(&request), |report| {
        format!(
            "Created {} files in {}",
            report.files.len(),
            report.project.full_path().display()
        )
    })
    .await?;

    if report.module_initialized {
        let version = toolchain.version().unwrap_or_else(|| toolchain.program().to_string());
        cliclack::log::success(format!("Initialized {} ({version})", request.module))?;
    } else {
        cliclack::log::info("Skipped go mod init")?;
    }
    print_next_steps(config, &report)?;

    Ok(report)
}

/// Apply flag values, then prompt for whatever is still missing
fn select_stack(builder: &mut StackConfigBuilder<'_>, args: &InitArgs) -> Result<()> {
    let options = builder.options();

    match &args.framework {
        Some(framework) => {
            builder.web_framework_str(framework)?;
        }
        None => {
            let mut select = cliclack::select("Choose a web framework");
            for framework in &options.web_frameworks {
                select = select.item(*framework, framework.display_name(), "");
            }
            let framework: WebFramework = select.interact()?;
            builder.web_framework(framework)?;
        }
    }

    match &args.styling {
        Some(css) => {
            builder.css_strategy_str(css)?;
        }
        None => {
            let mut select = cliclack::select("Choose a CSS Strategy");
            for css in &options.css_strategies {
                select = select.item(*css, css.display_name(), "");
            }
            let css: CssStrategy = select.interact()?;
            builder.css_strategy(css)?;
        }
    }

    match &args.ui {
        Some(library) => {
            builder.ui_library_str(library)?;
        }
        None => {
            // Only ask when something is compatible with the chosen CSS
            let libraries = builder.ui_library_options();
            if !libraries.is_empty() {
                let mut select = cliclack::select("Choose a UI Library");
                for library in &libraries {
                    select = select.item(*library, library.display_name(), "");
                }
                let library: UiLibrary = select.interact()?;
                builder.ui_library(library)?;
            }
        }
    }

    match &args.render {
        Some(rendering) => {
            builder.rendering_str(rendering)?;
        }
        None => {
            let mut select = cliclack::select("Choose a Rendering Strategy");
            for rendering in &options.rendering_strategies {
                select = select.item(*rendering, rendering.display_name(), "");
            }
            let rendering: RenderingStrategy = select.interact()?;
            builder.rendering(rendering)?;
        }
    }

    for extra in &args.extras {
        builder.extra_str(extra)?;
    }

    Ok(())
}

fn prompt_module_path() -> Result<String> {
    let module: String = cliclack::input("Enter go mod path")
        .placeholder("github.com/username/repo")
        .validate(|input: &String| {
            validate_module_path(input)
                .map(|_| ())
                .map_err(|e| e.to_string())
        })
        .interact()?;
    Ok(module)
}

/// Run `update`: fetch the release, then install it unless already current
pub async fn run_update<C: ProductConfig>(config: &C, tag: Option<String>) -> Result<()> {
    let mut updater = Updater::from_config(config)?;

    let check = with_spinner(
        "Getting the latest version...",
        updater.check(tag.as_deref(), FETCH_DEADLINE),
        |check| match check {
            UpdateCheck::UpToDate { version } => format!("Found {version}"),
            UpdateCheck::Available(release) => format!("Found {}", release.version),
        },
    )
    .await?;

    let release = match check {
        UpdateCheck::UpToDate { version } => {
            println!(
                "{} ({})",
                "Latest version is already installed".yellow(),
                version
            );
            return Ok(());
        }
        UpdateCheck::Available(release) => release,
    };
    cliclack::log::info(format!(
        "Updating {} -> {}",
        updater.current_version(),
        release.version
    ))?;

    let outcome = with_spinner("Updating...", updater.install(&release), |outcome| {
        format!("Installed {}", outcome.asset)
    })
    .await?;

    println!(
        "CLI has been updated to the latest version ({})",
        outcome.version.green()
    );
    Ok(())
}

/// Show a spinner while `work` runs. The spinner is stopped before the
/// result is returned, success or not.
async fn with_spinner<T, E, F, M>(message: &str, work: F, done: M) -> std::result::Result<T, E>
where
    F: Future<Output = std::result::Result<T, E>>,
    M: FnOnce(&T) -> String,
{
    let spinner = cliclack::spinner();
    spinner.start(message);

    let result = work.await;
    match &result {
        Ok(value) => spinner.stop(done(value)),
        Err(_) => spinner.error("Failed"),
    }
    tokio::time::sleep(SPINNER_GRACE).await;

    result
}

fn print_next_steps<C: ProductConfig>(config: &C, report: &InitReport) -> Result<()> {
    let steps = config.next_steps(&report.project);

    println!();
    println!("  {}", "Project Created!".green().bold());
    println!("  Please Run:");
    println!();

    for step in &steps {
        println!("    {}", step.dimmed());
    }

    cliclack::outro(format!("Docs: {}", config.docs_url()))?;

    Ok(())
}
