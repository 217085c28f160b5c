use anyhow::Result;
use clap::Args;
use colored::Colorize;
use pagecraft_schema::template_catalog;
use pagecraft_storage::TemplateStatus;

use super::Session;

#[derive(Debug, Args)]
pub struct StatusArgs {
    /// Template id (all catalog templates when omitted)
    pub template: Option<String>,

    /// Print JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

pub async fn status(args: StatusArgs, session: &Session) -> Result<()> {
    let storage = session.storage();

    let mut ids: Vec<String> = match &args.template {
        Some(id) => vec![id.clone()],
        None => template_catalog().into_iter().map(|t| t.id).collect(),
    };
    if args.template.is_none() {
        for id in storage.list_template_ids().await? {
            if !ids.contains(&id) {
                ids.push(id);
            }
        }
    }

    let mut rows = Vec::new();
    for id in ids {
        let status = storage.template_status(&id).await?;
        rows.push((id, status));
    }

    if args.json {
        let map: serde_json::Map<String, serde_json::Value> = rows
            .iter()
            .map(|(id, status)| -> Result<(String, serde_json::Value)> { Ok((id.clone(), serde_json::to_value(status)?)) })
            .collect::<Result<_>>()?;
        println!("{}", serde_json::to_string_pretty(&map)?);
        return Ok(());
    }

    for (id, status) in &rows {
        println!("  {} {}", badge(status), id.bright_white());
        if let Some(at) = status.last_draft_update {
            println!("      draft     {}", at.to_rfc3339().dimmed());
        }
        if let Some(at) = status.last_published_update {
            println!("      published {}", at.to_rfc3339().dimmed());
        }
    }
    Ok(())
}

fn badge(status: &TemplateStatus) -> colored::ColoredString {
    match (status.has_draft, status.has_published, status.has_unsaved_changes) {
        (false, false, _) => "[empty]      ".dimmed(),
        (true, false, _) => "[unpublished]".yellow(),
        (_, true, true) => "[changed]    ".yellow(),
        (_, true, false) => "[published]  ".green(),
    }
}

pub fn sections(session: &Session) -> Result<()> {
    println!("{}", "Available sections".bright_blue().bold());
    for summary in session.registry.list_available_sections() {
        println!(
            "  {:<18} {:<18} {}",
            summary.section_type.bright_white(),
            summary.label,
            summary.description.dimmed()
        );
    }
    Ok(())
}
