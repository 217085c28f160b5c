use std::fs;

use anyhow::Result;
use clap::Args;
use colored::Colorize;

use super::Session;
use crate::config::{Config, DEFAULT_CONFIG_NAME};

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Storage directory
    #[arg(short, long, default_value = ".pagecraft")]
    pub storage_dir: String,

    /// Force overwrite existing config
    #[arg(short, long)]
    pub force: bool,
}

pub async fn init(args: InitArgs, session: &Session) -> Result<()> {
    let config_path = session.cwd.join(DEFAULT_CONFIG_NAME);

    if config_path.exists() && !args.force {
        println!("{} {} already exists", "⚠️".yellow(), DEFAULT_CONFIG_NAME.bright_white());
        println!("Use --force to overwrite");
        return Ok(());
    }

    println!("{}", "📝 Initializing Pagecraft site...".bright_blue().bold());

    let config = Config {
        storage_dir: args.storage_dir.clone(),
        ..session.config.clone()
    };
    fs::write(&config_path, serde_json::to_string_pretty(&config)?)?;
    println!("  {} Created {}", "✓".green(), DEFAULT_CONFIG_NAME);

    let session = Session::new(&session.cwd, config);
    let seeded = session.storage().initialize_defaults().await?;
    for id in &seeded {
        println!("  {} Seeded {} (draft + published)", "✓".green(), id);
    }
    if seeded.is_empty() {
        println!("  {} Existing templates kept", "•".dimmed());
    }

    println!();
    println!("{}", "✅ Site initialized!".green().bold());
    println!();
    println!("Next steps:");
    println!("  1. Run: pagecraft status");
    println!("  2. Run: pagecraft render home --out home.html");

    Ok(())
}
