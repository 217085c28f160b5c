use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use pagecraft_live_edit::{BroadcastEditHub, EditOutcome, LiveEditRelay, Surface};
use pagecraft_model::ElementEdit;
use pagecraft_renderer::{render_html, RenderSelection, ThemeRenderer};

use super::render::{html_options, load_document, report_unknown};
use super::{parse_device, Session};

/// Give up when no edit has been applied for this long
const IDLE_TIMEOUT: Duration = Duration::from_secs(2);

#[derive(Debug, Args)]
pub struct LiveApplyArgs {
    /// Template id of the live page
    pub template: String,

    /// JSON file with one element edit or an array of them
    pub file: PathBuf,

    /// Device preset (desktop, tablet, mobile)
    #[arg(short, long, default_value = "desktop")]
    pub device: String,

    /// Emit a complete HTML document
    #[arg(long)]
    pub full: bool,

    /// Output file for the patched page (stdout when omitted)
    #[arg(short, long)]
    pub out: Option<PathBuf>,
}

fn read_edits(file: &Path) -> Result<Vec<ElementEdit>> {
    let content = fs::read_to_string(file)?;
    let value: serde_json::Value = serde_json::from_str(&content)?;
    let edits = match value {
        serde_json::Value::Array(_) => serde_json::from_value(value)?,
        single => vec![serde_json::from_value(single)?],
    };
    Ok(edits)
}

/// Render the published page and replay edits on it through a live channel
pub async fn live_apply(args: LiveApplyArgs, session: &Session) -> Result<()> {
    let device = parse_device(&args.device)?;
    let edits = read_edits(&args.file)?;
    let document = load_document(session, &args.template, true).await?;

    let renderer = ThemeRenderer::new(session.registry.clone());
    let output = renderer.render(&document, device, RenderSelection::none());
    report_unknown(&output);

    let relay = LiveEditRelay::with_journal_limit(
        &args.template,
        Surface::from_node(output.root),
        session.config.resolution_chain(),
        edits.len().max(1),
    );
    let hub = BroadcastEditHub::new();
    let subscription = relay.attach(&hub);

    eprintln!("{}", format!("⚡ Replaying {} live edits...", edits.len()).bright_blue().bold());
    for edit in &edits {
        hub.publish(&args.template, edit.clone());
    }

    let mut processed = 0;
    let mut idle_since = tokio::time::Instant::now();
    while processed < edits.len() && idle_since.elapsed() < IDLE_TIMEOUT {
        tokio::time::sleep(Duration::from_millis(10)).await;
        let now = relay.journal().len();
        if now > processed {
            processed = now;
            idle_since = tokio::time::Instant::now();
        }
    }
    subscription.cancel();
    if processed < edits.len() {
        tracing::warn!(processed, total = edits.len(), "Live edits were not all delivered");
    }

    for entry in relay.journal() {
        match &entry.outcome {
            EditOutcome::Applied { strategy } => {
                eprintln!("  {} {} {} {}", "✓".green(), entry.edit_id, entry.property, format!("via {}", strategy).dimmed())
            }
            EditOutcome::ResolutionFailed { reason } | EditOutcome::ApplyFailed { reason } => {
                eprintln!("  {} {} {} {}", "✗".red(), entry.edit_id, entry.property, reason.dimmed())
            }
        }
    }

    let html = render_html(&relay.snapshot().into_node(), html_options(args.full, &args.template));
    match &args.out {
        Some(path) => {
            fs::write(path, html)?;
            eprintln!("  {} Patched page → {}", "✓".green(), path.display());
        }
        None => print!("{}", html),
    }
    Ok(())
}
