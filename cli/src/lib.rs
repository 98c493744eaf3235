use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use repodeck_common::{GenerationSettings, Theme, Tone};
use repodeck_core::config::Config;
use repodeck_core::pipeline::{self, GenerationRequest, PipelineEvent};
use repodeck_tui::WizardOptions;

#[derive(Parser)]
#[command(name = "repodeck")]
#[command(about = "Turn a public GitHub repository into an investor-ready pitch deck")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable debug output
    #[arg(long)]
    pub debug: bool,

    /// Override the completion model (e.g. llama3-70b-8192)
    #[arg(long)]
    pub model: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Interactive five-step deck builder (the default)
    Wizard {
        /// Seed the custom chart slide from a CSV file
        #[arg(long)]
        chart_csv: Option<PathBuf>,

        /// Seed the media embed URL (tweet or YouTube link)
        #[arg(long)]
        media_url: Option<String>,
    },
    /// Generate a deck without the wizard and export it straight to a file
    Generate {
        /// Public GitHub repository URL
        repo_url: String,

        /// Visual theme: modern | classic | bold
        #[arg(long, default_value = "modern")]
        theme: Theme,

        /// Presentation tone: balanced | business | technical
        #[arg(long, default_value = "balanced")]
        tone: Tone,

        /// Skip chart slides entirely
        #[arg(long)]
        no_charts: bool,

        /// Build a custom chart slide from a CSV file
        #[arg(long)]
        chart_csv: Option<PathBuf>,

        /// Embed a tweet or YouTube link as a media slide
        #[arg(long)]
        media_url: Option<String>,

        /// Output file
        #[arg(short, long, default_value = repodeck_pptx::DEFAULT_FILENAME)]
        output: PathBuf,
    },
}

pub async fn run_cli() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    let mut config = Config::from_env();
    if let Some(model) = cli.model {
        config.model = model;
    }
    tracing::debug!("using completion model {}", config.model);

    match cli.command {
        Some(Commands::Generate {
            repo_url,
            theme,
            tone,
            no_charts,
            chart_csv,
            media_url,
            output,
        }) => {
            let settings = GenerationSettings {
                tone,
                include_charts: !no_charts,
                custom_chart_csv: read_csv(chart_csv)?,
                media_embed_url: media_url,
            };
            generate(config, repo_url, settings, theme, output).await
        }
        Some(Commands::Wizard {
            chart_csv,
            media_url,
        }) => {
            let options = WizardOptions {
                chart_csv: read_csv(chart_csv)?,
                media_url,
            };
            repodeck_tui::run_wizard(config, options).await
        }
        None => repodeck_tui::run_wizard(config, WizardOptions::default()).await,
    }
}

fn init_tracing(debug: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    // Logs go to stderr so the TUI keeps stdout to itself.
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn read_csv(path: Option<PathBuf>) -> Result<Option<String>> {
    match path {
        Some(path) => {
            let text = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read chart CSV from {}", path.display()))?;
            Ok(Some(text))
        }
        None => Ok(None),
    }
}

/// Headless flow: same pipeline as the wizard, statuses printed to the
/// terminal, demo-deck substitution on failure.
async fn generate(
    config: Config,
    repo_url: String,
    settings: GenerationSettings,
    theme: Theme,
    output: PathBuf,
) -> Result<()> {
    let request = GenerationRequest {
        repo_url,
        settings,
        theme,
    };

    let mut events = pipeline::spawn(config, request);
    let mut final_deck = None;
    while let Some(event) = events.recv().await {
        match event {
            PipelineEvent::Status(status) => println!("{status}"),
            PipelineEvent::Completed { deck } => {
                final_deck = Some(deck);
            }
            PipelineEvent::Failed { message, deck } => {
                eprintln!("warning: {message}");
                final_deck = Some(deck);
            }
        }
    }

    let deck = final_deck.context("generation pipeline ended without producing a deck")?;
    repodeck_pptx::write_file(&output, &deck, theme)
        .with_context(|| format!("failed to export {}", output.display()))?;
    println!("Deck exported to {} ({} slides)", output.display(), deck.len());
    Ok(())
}
