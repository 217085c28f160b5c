use std::fs;
use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use colored::Colorize;

use super::Session;

#[derive(Debug, Args)]
pub struct ExportArgs {
    /// Template id
    pub template: String,

    /// Output file (stdout when omitted)
    #[arg(short, long)]
    pub out: Option<PathBuf>,
}

pub async fn export(args: ExportArgs, session: &Session) -> Result<()> {
    let store = session.open(&args.template).await?;
    let payload = store.export().await?;

    match &args.out {
        Some(path) => {
            fs::write(path, payload)?;
            println!("  {} {} → {}", "✓".green(), args.template, path.display());
        }
        None => println!("{}", payload),
    }
    Ok(())
}

#[derive(Debug, Args)]
pub struct ImportArgs {
    /// Exported JSON file
    pub file: PathBuf,

    /// Save the imported document as the draft
    #[arg(long)]
    pub save: bool,
}

pub async fn import(args: ImportArgs, session: &Session) -> Result<()> {
    let data = fs::read_to_string(&args.file)?;
    let mut store = session.editor();
    store.import(&data).await?;

    let template_id = store.template_id().unwrap_or_default().to_string();
    println!("  {} Imported {}", "✓".green(), template_id.bright_white());

    if args.save {
        store.save().await?;
        let version = store.document().map_or(0, |d| d.version);
        println!("  {} Draft saved (v{})", "✓".green(), version);
    } else {
        println!("  {} Not saved, pass --save to keep it", "•".dimmed());
    }
    Ok(())
}
