use std::fs;
use std::path::PathBuf;

use anyhow::{anyhow, Result};
use clap::Args;
use colored::Colorize;
use pagecraft_model::TemplateDocument;
use pagecraft_renderer::{render_html, HtmlOptions, RenderOutput, RenderSelection, ThemeRenderer};

use super::{parse_device, Session};

#[derive(Debug, Args)]
pub struct RenderArgs {
    /// Template id
    pub template: String,

    /// Device preset (desktop, tablet, mobile)
    #[arg(short, long, default_value = "desktop")]
    pub device: String,

    /// Render the published copy instead of the draft
    #[arg(long)]
    pub published: bool,

    /// Highlight a section, or a block as `section/block`
    #[arg(long)]
    pub select: Option<String>,

    /// Emit a complete HTML document
    #[arg(long)]
    pub full: bool,

    /// Output file (stdout when omitted)
    #[arg(short, long)]
    pub out: Option<PathBuf>,
}

/// Stored draft or published copy, bootstrapping the draft when missing
pub async fn load_document(session: &Session, template_id: &str, published: bool) -> Result<TemplateDocument> {
    if published {
        return session
            .storage()
            .get_published(template_id)
            .await?
            .ok_or_else(|| anyhow!("Template '{}' has no published version", template_id));
    }
    let store = session.open(template_id).await?;
    store
        .document()
        .cloned()
        .ok_or_else(|| anyhow!("Template '{}' could not be loaded", template_id))
}

pub fn html_options(full: bool, title: &str) -> HtmlOptions {
    HtmlOptions {
        full_document: full,
        title: title.to_string(),
        ..HtmlOptions::default()
    }
}

pub fn report_unknown(output: &RenderOutput) {
    for unknown in &output.unknown_types {
        eprintln!("  {} No renderer for '{}', placeholder used", "⚠️".yellow(), unknown);
    }
}

pub async fn render(args: RenderArgs, session: &Session) -> Result<()> {
    let device = parse_device(&args.device)?;
    let document = load_document(session, &args.template, args.published).await?;

    let selection = match args.select.as_deref().map(|s| s.split_once('/')) {
        None => RenderSelection::none(),
        Some(Some((section, block))) => RenderSelection::block(section, block),
        Some(None) => RenderSelection::section(args.select.as_deref().unwrap_or_default()),
    };

    let renderer = ThemeRenderer::new(session.registry.clone());
    let output = renderer.render(&document, device, selection);
    report_unknown(&output);

    let html = render_html(&output.root, html_options(args.full, &args.template));
    match &args.out {
        Some(path) => {
            fs::write(path, html)?;
            eprintln!(
                "  {} {} ({}, v{}) → {}",
                "✓".green(),
                args.template,
                device.as_str(),
                document.version,
                path.display()
            );
        }
        None => print!("{}", html),
    }
    Ok(())
}
