//! CLI Adapter.

use std::io::ErrorKind;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use dialoguer::{Error as DialoguerError, Input};
use env_logger::{Builder, Env};

use crate::domain::{AppError, ConfigOverrides};
use crate::{GenerateOptions, LayoutsOptions};

#[derive(Parser)]
#[command(name = "deckgen")]
#[command(version)]
#[command(
    about = "Generate PowerPoint presentations from a topic with a language model",
    long_about = None
)]
struct Cli {
    /// Log fallback decisions and raw model replies
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a presentation for a topic
    #[clap(visible_alias = "g")]
    Generate {
        /// Presentation topic (prompted for when omitted)
        topic: Option<String>,
        #[command(flatten)]
        source: SourceArgs,
        /// Output .pptx path
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Approximate number of slides to ask for
        #[arg(short = 'n', long)]
        slides: Option<u32>,
        /// Model name sent to the chat completions endpoint
        #[arg(short, long)]
        model: Option<String>,
        /// Chat completions endpoint URL
        #[arg(long)]
        api_url: Option<String>,
    },
    /// List the layouts a template offers
    #[clap(visible_alias = "l")]
    Layouts {
        #[command(flatten)]
        source: SourceArgs,
    },
}

#[derive(Args)]
struct SourceArgs {
    /// Configuration file (defaults to ./deckgen.toml when present)
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Template .pptx path
    #[arg(short, long)]
    template: Option<PathBuf>,
}

/// Entry point for the CLI.
pub fn run() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result: Result<(), AppError> = match cli.command {
        Commands::Generate { topic, source, output, slides, model, api_url } => {
            let overrides = ConfigOverrides {
                template: source.template,
                output,
                slide_count: slides,
                model,
                api_url,
            };
            run_generate(topic, source.config, overrides)
        }
        Commands::Layouts { source } => run_layouts(source),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    let _ = Builder::from_env(Env::default().default_filter_or(level)).try_init();
}

fn run_generate(
    topic: Option<String>,
    config_path: Option<PathBuf>,
    overrides: ConfigOverrides,
) -> Result<(), AppError> {
    let topic = match topic {
        Some(value) => value,
        None => {
            // A broken template aborts before the user is asked for anything.
            crate::layouts(LayoutsOptions {
                config_path: config_path.clone(),
                template: overrides.template.clone(),
            })?;
            match prompt_topic()? {
                Some(value) => value,
                None => return Ok(()),
            }
        }
    };

    let outcome = crate::generate(GenerateOptions { topic, config_path, overrides })?;
    if !outcome.skipped.is_empty() {
        println!("⚠️  Skipped {} slide(s):", outcome.skipped.len());
        for title in &outcome.skipped {
            println!("  • {}", title);
        }
    }
    Ok(())
}

fn run_layouts(source: SourceArgs) -> Result<(), AppError> {
    let layouts =
        crate::layouts(LayoutsOptions { config_path: source.config, template: source.template })?;

    println!("✅ {} layouts:", layouts.len());
    for layout in layouts {
        if layout.placeholders.is_empty() {
            println!("  • {} (no placeholders)", layout.name);
        } else {
            println!("  • {} [{}]", layout.name, layout.placeholders.join(", "));
        }
    }
    Ok(())
}

fn prompt_topic() -> Result<Option<String>, AppError> {
    match Input::<String>::new()
        .with_prompt("Presentation topic")
        .allow_empty(true)
        .interact_text()
    {
        Ok(value) => Ok(Some(value)),
        Err(DialoguerError::IO(err)) if err.kind() == ErrorKind::Interrupted => Ok(None),
        Err(err) => Err(AppError::Input(format!("Failed to read topic: {}", err))),
    }
}
