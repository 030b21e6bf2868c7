//! Go Spur CLI - Build web applications with Go, without the hassle of JavaScript

mod logging;

use anyhow::Result;
use clap::{Args as ClapArgs, Parser, Subcommand};
use colored::Colorize;
use gospur_core::{InitArgs, ProductConfig, ProjectPath};

/// CLI version
pub const CLI_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Banner printed before every command
pub const LOGO: &str = r"
   _____       _____
  / ____|     / ____|
 | |  __  ___| (___  _ __  _   _ _ __
 | | |_ |/ _ \___ \| '_ \| | | | '__|
 | |__| | (_) |___) | |_) | |_| | |
  \_____|\___/_____/| .__/ \__,_|_|
                    | |
                    |_|
";

/// Go Spur product configuration
#[derive(Clone)]
pub struct GoSpurConfig;

impl ProductConfig for GoSpurConfig {
    fn name(&self) -> &'static str {
        "gospur"
    }

    fn display_name(&self) -> &'static str {
        "Go Spur"
    }

    fn version(&self) -> &'static str {
        CLI_VERSION
    }

    fn default_release_url(&self) -> &'static str {
        "https://api.github.com/repos/nilotpaul/gospur/releases"
    }

    fn release_url_env(&self) -> &'static str {
        "GOSPUR_RELEASE_URL"
    }

    fn docs_url(&self) -> &'static str {
        "https://github.com/nilotpaul/gospur"
    }

    fn cli_description(&self) -> &'static str {
        "Go Spur: Build web applications with Go, without the hassle of JavaScript"
    }

    fn next_steps(&self, project: &ProjectPath) -> Vec<String> {
        let mut steps = Vec::new();

        if !project.is_cwd() {
            steps.push(format!("cd {}", project.path().display()));
        }

        // Live reload for `make dev`
        steps.push("go install github.com/bokwoon95/wgo@latest".to_string());
        steps.push("go mod tidy".to_string());
        steps.push("npm install".to_string());

        steps
    }
}

#[derive(Parser, Debug)]
#[command(name = "gospur")]
#[command(about = "Go Spur: Build web applications with Go, without the hassle of JavaScript")]
#[command(version)]
pub struct Args {
    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Initialize a Full-Stack Go Web Project
    Init(CliInitArgs),
    /// Updates the CLI to the latest version
    Update(UpdateArgs),
    /// Shows the current installed version
    Version,
}

#[derive(ClapArgs, Debug)]
pub struct CliInitArgs {
    /// Project directory to create (defaults to ./gospur)
    pub path: Option<String>,

    /// Web framework: echo, fiber, chi
    #[arg(long)]
    pub framework: Option<String>,

    /// CSS strategy: tailwind, vanilla
    #[arg(long)]
    pub styling: Option<String>,

    /// UI library: preline, daisyui
    #[arg(long)]
    pub ui: Option<String>,

    /// Rendering strategy: templates, separate
    #[arg(long)]
    pub render: Option<String>,

    /// One or many (comma-separated): htmx, dockerfile
    #[arg(long = "extra", value_delimiter = ',')]
    pub extras: Vec<String>,

    /// Go module path (e.g. github.com/username/repo)
    #[arg(short, long)]
    pub module: Option<String>,

    /// Do not run `go mod init` after generating files
    #[arg(long = "skip-mod-init")]
    pub skip_mod_init: bool,
}

impl From<CliInitArgs> for InitArgs {
    fn from(args: CliInitArgs) -> Self {
        InitArgs {
            path: args.path,
            framework: args.framework,
            styling: args.styling,
            ui: args.ui,
            render: args.render,
            extras: args.extras,
            module: args.module,
            skip_mod_init: args.skip_mod_init,
        }
    }
}

#[derive(ClapArgs, Debug)]
pub struct UpdateArgs {
    /// Release tag to install instead of the latest one
    #[arg(long)]
    pub tag: Option<String>,
}

#[tokio::main]
async fn main() {
    // Ensure terminal cursor is restored on panic
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = console::Term::stderr().show_cursor();
        default_panic(info);
    }));

    // Handle Ctrl+C gracefully
    ctrlc::set_handler(move || {
        let _ = console::Term::stderr().show_cursor();
        std::process::exit(130);
    })
    .ok();

    let args = Args::parse();
    if let Err(e) = logging::init_logging(args.verbose, args.quiet) {
        eprintln!("{e}");
    }

    let result = run(args.command, &GoSpurConfig).await;

    // Ensure cursor is visible on normal exit
    let _ = console::Term::stderr().show_cursor();

    if let Err(e) = result {
        tracing::debug!(error = ?e, "command failed");
        let _ = cliclack::log::error(format!("{:#}", e).red());
        std::process::exit(1);
    }
}

async fn run(command: Command, config: &GoSpurConfig) -> Result<()> {
    println!("{}", LOGO.cyan().bold());

    match command {
        Command::Init(init_args) => {
            gospur_core::run_init(config, init_args.into()).await?;
            Ok(())
        }
        Command::Update(update_args) => gospur_core::run_update(config, update_args.tag).await,
        Command::Version => {
            println!("Version: {}", config.version().green());
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use std::path::Path;

    #[test]
    fn test_cli_definition() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_parse_init_flags() {
        let args = Args::parse_from([
            "gospur",
            "init",
            "my-app",
            "--framework",
            "chi",
            "--extra",
            "htmx,dockerfile",
            "--skip-mod-init",
        ]);
        let Command::Init(init) = args.command else {
            panic!("expected init");
        };
        assert_eq!(init.path.as_deref(), Some("my-app"));
        assert_eq!(init.framework.as_deref(), Some("chi"));
        assert_eq!(init.extras, vec!["htmx", "dockerfile"]);
        assert!(init.skip_mod_init);
        assert!(init.module.is_none());
    }

    #[test]
    fn test_verbosity_is_global() {
        let args = Args::parse_from(["gospur", "update", "-vv", "--tag", "v0.7.0"]);
        assert_eq!(args.verbose, 2);
        let Command::Update(update) = args.command else {
            panic!("expected update");
        };
        assert_eq!(update.tag.as_deref(), Some("v0.7.0"));
    }

    #[test]
    fn test_logo_spells_name() {
        let lines: Vec<&str> = LOGO.lines().filter(|l| !l.trim().is_empty()).collect();
        assert_eq!(lines.len(), 8);
        assert!(lines[0].contains("_____       _____"));
    }

    #[test]
    fn test_next_steps() {
        let cwd = Path::new("/work");

        let nested = ProjectPath::from_arg(Some("my-app"), cwd).unwrap();
        let steps = GoSpurConfig.next_steps(&nested);
        assert_eq!(steps[0], "cd my-app");
        assert_eq!(steps.len(), 4);

        let here = ProjectPath::from_arg(Some("."), cwd).unwrap();
        let steps = GoSpurConfig.next_steps(&here);
        assert!(steps.iter().all(|s| !s.starts_with("cd ")));
        assert_eq!(steps.last().map(String::as_str), Some("npm install"));
    }
}
