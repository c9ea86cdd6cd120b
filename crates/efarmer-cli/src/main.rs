mod advise;
mod locate;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use efarmer_core::{AppConfig, FacilityRegistry, Language};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "efarmer-cli")]
#[command(about = "E-Farmer facility locator and advisory chat")]
struct Cli {
    /// Facility registry YAML (overrides `EFARMER_FACILITIES_PATH`).
    #[arg(long, global = true)]
    facilities: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Rank facilities by distance from a position.
    ///
    /// Without coordinates there is no position capability, so the default
    /// facility list is shown.
    Locate {
        #[arg(long, requires = "lng", allow_hyphen_values = true)]
        lat: Option<f64>,
        #[arg(long, requires = "lat", allow_hyphen_values = true)]
        lng: Option<f64>,
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Ask the advisor a single question.
    Ask {
        #[arg(long, default_value = "en")]
        lang: Language,
        #[arg(required = true, num_args = 1..)]
        question: Vec<String>,
    },
    /// Interactive advisory chat (type `/lang <code>` to switch, `/quit` to leave).
    Chat {
        #[arg(long, default_value = "en")]
        lang: Language,
    },
    /// List the facility registry.
    Facilities,
    /// List supported languages.
    Languages,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = efarmer_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Locate { lat, lng, limit } => {
            let registry = load_registry(&config, cli.facilities.as_ref())?;
            let limit = limit.unwrap_or(config.locator_default_limit);
            locate::run_locate(&registry, lat.zip(lng), limit).await;
        }
        Commands::Ask { lang, question } => {
            advise::run_ask(&config, lang, &question.join(" ")).await?;
        }
        Commands::Chat { lang } => advise::run_chat(&config, lang).await?,
        Commands::Facilities => {
            let registry = load_registry(&config, cli.facilities.as_ref())?;
            print!("{}", locate::format_registry(&registry));
        }
        Commands::Languages => {
            for lang in Language::ALL {
                println!("{:<5} {}", lang.code(), lang.name());
            }
        }
    }

    Ok(())
}

fn load_registry(
    config: &AppConfig,
    override_path: Option<&PathBuf>,
) -> anyhow::Result<FacilityRegistry> {
    let path = override_path.unwrap_or(&config.facilities_path);
    let registry = efarmer_core::load_facilities(path)?;
    tracing::debug!(facilities = registry.len(), path = %path.display(), "facility registry loaded");
    Ok(registry)
}
