//! qrcraft CLI entrypoint

use clap::Parser;
use qrcraft::{Color, Error, Outcome, QrcraftConfig, Result, desktop_workflow, logging};
use serde_json::{Value, json};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "qrcraft",
    version,
    about = "Turn text or URLs into colorful QR codes"
)]
struct Cli {
    /// Text or URL to encode
    text: Option<String>,

    /// Optional configuration file (toml/yaml). Defaults to qrcraft.{toml,yaml} in cwd/XDG config.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Foreground (dark module) color name or #rrggbb
    #[arg(long, value_name = "COLOR")]
    fg: Option<String>,

    /// Background (light module) color name or #rrggbb
    #[arg(long, value_name = "COLOR")]
    bg: Option<String>,

    /// Draw both colors at random from the configured palettes
    #[arg(long)]
    random_colors: bool,

    /// Directory the image is saved into (overrides config)
    #[arg(long, value_name = "DIR")]
    out_dir: Option<PathBuf>,

    /// Skip saving the image (useful together with --share)
    #[arg(long)]
    no_download: bool,

    /// Share via a platform deep link (whatsapp, telegram, facebook, x, instagram)
    #[arg(long, value_name = "PLATFORM")]
    share: Option<String>,

    /// Print share deep links instead of opening a browser
    #[arg(long)]
    print_link: bool,

    /// Output results as formatted JSON instead of human-readable text
    #[arg(long)]
    json: bool,

    /// List the configured color palettes and exit
    #[arg(long)]
    palettes: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = QrcraftConfig::load(cli.config.as_deref())?;

    if let Some(ref dir) = cli.out_dir {
        config.export.directory = dir.clone();
    }

    logging::init(&config.logging)?;

    let mut workflow = desktop_workflow(&config, cli.print_link)?;

    if cli.palettes {
        list_palettes(&workflow, cli.json)?;
        return Ok(());
    }

    let text = cli.text.clone().ok_or_else(|| {
        Error::Config("No payload given; pass text or a URL to encode".to_string())
    })?;

    if let Some(ref fg) = cli.fg {
        workflow.set_foreground(fg.parse::<Color>()?)?;
    }
    if let Some(ref bg) = cli.bg {
        workflow.set_background(bg.parse::<Color>()?)?;
    }
    if cli.random_colors {
        let (fg, bg) = workflow.randomize_colors()?;
        info!(foreground = %fg, background = %bg, "Randomized colors");
    }

    workflow.set_payload(text)?;

    if workflow.symbol().is_none() {
        // Empty payload: nothing to render, nothing to export.
        if cli.json {
            println!("{}", serde_json::to_string_pretty(&json!({ "state": "empty" }))?);
        }
        return Ok(());
    }

    let mut outcomes: Vec<Value> = Vec::new();

    if !cli.no_download {
        let outcome = workflow.request_download().await?;
        emit(&outcome, cli.json, &mut outcomes);
    }

    if let Some(ref platform) = cli.share {
        let prepared = workflow.request_share().await?;
        emit(&prepared, cli.json, &mut outcomes);

        let shared = workflow.share_via(platform)?;
        emit(&shared, cli.json, &mut outcomes);
    }

    if cli.json {
        let root = json!({
            "payload": workflow.payload(),
            "foreground": workflow.foreground().to_string(),
            "background": workflow.background().to_string(),
            "outcomes": outcomes,
        });
        println!("{}", serde_json::to_string_pretty(&root)?);
    }

    Ok(())
}

fn list_palettes(workflow: &qrcraft::DesktopWorkflow, as_json: bool) -> Result<()> {
    let palette = workflow.palette();

    if as_json {
        let root = json!({
            "foreground": palette.foreground.iter().map(ToString::to_string).collect::<Vec<_>>(),
            "background": palette.background.iter().map(ToString::to_string).collect::<Vec<_>>(),
        });
        println!("{}", serde_json::to_string_pretty(&root)?);
        return Ok(());
    }

    println!("Foreground palette:");
    for color in &palette.foreground {
        println!("  {color}");
    }
    println!("Background palette:");
    for color in &palette.background {
        println!("  {color}");
    }
    Ok(())
}

fn emit(outcome: &Outcome, as_json: bool, outcomes: &mut Vec<Value>) {
    if as_json {
        outcomes.push(outcome_value(outcome));
        return;
    }

    if let Some(notice) = outcome.notice() {
        println!("{notice}");
    }
}

fn outcome_value(outcome: &Outcome) -> Value {
    match outcome {
        Outcome::Ignored => json!({ "outcome": "ignored" }),
        Outcome::Saved { path } => json!({
            "outcome": "saved",
            "path": path.display().to_string(),
        }),
        Outcome::SharePrepared => json!({ "outcome": "share_prepared" }),
        Outcome::Opened { platform, url } => json!({
            "outcome": "opened",
            "platform": platform.label(),
            "url": url,
        }),
        Outcome::ManualShareRequired { platform } => json!({
            "outcome": "manual_share_required",
            "platform": platform.label(),
        }),
    }
}
