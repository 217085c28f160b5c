use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Result};
use clap::Args;
use colored::Colorize;
use pagecraft_editor::{Created, Mutation};
use pagecraft_model::Locale;

use super::Session;

#[derive(Debug, Args)]
pub struct TemplateArgs {
    /// Template id
    pub template: String,
}

pub async fn publish(args: TemplateArgs, session: &Session) -> Result<()> {
    let mut store = session.open(&args.template).await?;
    store.publish().await?;

    let version = store.document().map_or(0, |d| d.version);
    println!("  {} Published {} (v{})", "✓".green(), args.template.bright_white(), version);
    Ok(())
}

pub async fn reset(args: TemplateArgs, session: &Session) -> Result<()> {
    let mut store = session.open(&args.template).await?;
    store.reset_to_published().await?;

    println!(
        "  {} Draft of {} reset to the published version",
        "✓".green(),
        args.template.bright_white()
    );
    Ok(())
}

#[derive(Debug, Args)]
pub struct NewArgs {
    /// Template id
    pub template: String,

    /// Page locale (defaults to the configured locale)
    #[arg(short, long)]
    pub locale: Option<String>,
}

/// Create a draft for a template id, seeded from built-in content when
/// there is some.
pub async fn new_template(args: NewArgs, session: &Session) -> Result<()> {
    let locale = match &args.locale {
        Some(value) => Locale::parse(value).ok_or_else(|| anyhow!("Invalid locale: {}. Use: en or ar", value))?,
        None => session.config.default_locale,
    };

    if session.storage().get_draft(&args.template).await?.is_some() {
        return Err(anyhow!("Template '{}' already has a draft", args.template));
    }

    let mut store = session.open(&args.template).await?;
    let current = store.document().map(|d| d.locale);
    if current != Some(locale) {
        store.apply(Mutation::SetLocale { locale })?;
        store.save().await?;
    }

    let sections = store.document().map_or(0, |d| d.sections.len());
    println!(
        "  {} Created {} ({}, {} sections)",
        "✓".green(),
        args.template.bright_white(),
        locale.as_str(),
        sections
    );
    Ok(())
}

#[derive(Debug, Args)]
pub struct ApplyArgs {
    /// Template id
    pub template: String,

    /// JSON file with one mutation or an array of mutations
    pub file: PathBuf,

    /// Apply without saving the draft
    #[arg(long)]
    pub dry_run: bool,

    /// Publish after saving
    #[arg(long, conflicts_with = "dry_run")]
    pub publish: bool,
}

fn read_mutations(file: &Path) -> Result<Vec<Mutation>> {
    let content = fs::read_to_string(file)?;
    let value: serde_json::Value = serde_json::from_str(&content)?;
    let mutations = match value {
        serde_json::Value::Array(_) => serde_json::from_value(value)?,
        single => vec![serde_json::from_value(single)?],
    };
    Ok(mutations)
}

pub async fn apply(args: ApplyArgs, session: &Session) -> Result<()> {
    let mutations = read_mutations(&args.file)?;
    let mut store = session.open(&args.template).await?;

    println!("{}", format!("✏️  Applying {} mutations...", mutations.len()).bright_blue().bold());

    for (index, mutation) in mutations.into_iter().enumerate() {
        let label = mutation.label();
        let result = store
            .apply(mutation)
            .map_err(|e| anyhow!("Mutation #{} ({}) rejected: {}", index + 1, label, e))?;

        let note = match (&result.created, result.changed) {
            (Some(Created::Section(id)), _) => format!("created {}", id),
            (Some(Created::Block { section_id, block_id }), _) => format!("created {}/{}", section_id, block_id),
            (None, true) => "changed".to_string(),
            (None, false) => "no change".to_string(),
        };
        println!("  {} {} {}", "✓".green(), label, note.dimmed());
        if let Some(unknown) = result.unknown_type {
            println!("    {} no schema for '{}', rendered as placeholder", "⚠️".yellow(), unknown);
        }
    }

    if args.dry_run {
        println!("  {} Dry run, draft not saved", "•".dimmed());
        return Ok(());
    }

    if store.is_dirty() {
        store.save().await?;
        let version = store.document().map_or(0, |d| d.version);
        println!("  {} Draft saved (v{})", "✓".green(), version);
    }
    if args.publish {
        store.publish().await?;
        println!("  {} Published", "✓".green());
    }
    Ok(())
}
