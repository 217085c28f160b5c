mod commands;
mod config;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{
    apply, export, import, init, live_apply, new_template, publish, render, reset, sections, status, ApplyArgs,
    ExportArgs, ImportArgs, InitArgs, LiveApplyArgs, NewArgs, RenderArgs, Session, StatusArgs, TemplateArgs,
};
use config::Config;
use tracing_subscriber::EnvFilter;

/// Pagecraft CLI - edit, publish and live-patch site templates
#[derive(Parser, Debug)]
#[command(name = "pagecraft")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Working directory (defaults to the current directory)
    #[arg(short = 'C', long, global = true)]
    dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write a config file and seed the built-in templates
    Init(InitArgs),

    /// Show draft/published state of templates
    Status(StatusArgs),

    /// List section types that can be added
    Sections,

    /// Create a draft for a new template
    New(NewArgs),

    /// Apply mutations from a JSON file to a template draft
    Apply(ApplyArgs),

    /// Publish the current draft
    Publish(TemplateArgs),

    /// Replace the draft with the published copy
    Reset(TemplateArgs),

    /// Export a template draft with global settings
    Export(ExportArgs),

    /// Import an exported template
    Import(ImportArgs),

    /// Render a template to HTML
    Render(RenderArgs),

    /// Replay live element edits on the published page
    LiveApply(LiveApplyArgs),
}

/// RUST_LOG wins, then the config's logLevel, then `info`
fn init_logging(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.as_deref().unwrap_or("info")))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let cwd = match cli.dir {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };
    let config = Config::load(&cwd)?;
    init_logging(&config);

    let session = Session::new(&cwd, config);
    match cli.command {
        Command::Init(args) => init(args, &session).await,
        Command::Status(args) => status(args, &session).await,
        Command::Sections => sections(&session),
        Command::New(args) => new_template(args, &session).await,
        Command::Apply(args) => apply(args, &session).await,
        Command::Publish(args) => publish(args, &session).await,
        Command::Reset(args) => reset(args, &session).await,
        Command::Export(args) => export(args, &session).await,
        Command::Import(args) => import(args, &session).await,
        Command::Render(args) => render(args, &session).await,
        Command::LiveApply(args) => live_apply(args, &session).await,
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(err) = run(cli).await {
        eprintln!();
        eprintln!("{} {}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}
