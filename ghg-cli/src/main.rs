mod store;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use ghg_engine_core::inventory::ActivityRecord;
use ghg_engine_core::{
    import_catalog, ActivityData, EmissionEngine, EmissionFactor, EngineConfig, Methodology,
    Subcategory,
};
use serde::Serialize;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Agriculture GHG emission calculator
#[derive(Parser, Debug)]
#[command(name = "ghg-cli")]
#[command(about = "Agricultural greenhouse-gas inventory calculator (GHG Protocol Brasil)", long_about = None)]
struct Args {
    /// Engine configuration file (TOML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Calculate emissions of one activity
    Calculate {
        /// Subcategory label or alias, e.g. "Fermentação Entérica"
        #[arg(short, long)]
        subcategory: String,

        /// Activity payload as inline JSON
        #[arg(short, long, conflicts_with = "activity_file")]
        activity: Option<String>,

        /// Activity payload JSON file ("-" for stdin)
        #[arg(long)]
        activity_file: Option<PathBuf>,
    },

    /// Show the factor an activity would be calculated with
    Resolve {
        #[arg(short, long)]
        subcategory: String,

        /// Species or crop qualifier
        #[arg(long)]
        species: Option<String>,

        /// Management system, rice regime, fertilizer or limestone type
        #[arg(long)]
        system: Option<String>,
    },

    /// List the reference factors, optionally for one subcategory
    Catalog {
        #[arg(short, long)]
        subcategory: Option<String>,
    },

    /// Calculate a JSON array of activity records
    Inventory {
        /// Input file ("-" for stdin)
        input: PathBuf,
    },

    /// Upsert the reference catalog into a JSON factor store
    Import {
        /// Store file, created if missing
        #[arg(long)]
        store: PathBuf,
    },
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CatalogListing<'a> {
    methodology: &'a Methodology,
    factors: Vec<&'a EmissionFactor>,
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn read_input(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut text = String::new();
        io::stdin()
            .read_to_string(&mut text)
            .context("failed to read stdin")?;
        return Ok(text);
    }
    fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

fn load_config(path: Option<&Path>) -> Result<EngineConfig> {
    let Some(path) = path else {
        return Ok(EngineConfig::default());
    };
    let text = read_input(path)?;
    toml::from_str(&text).with_context(|| format!("invalid engine config {}", path.display()))
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn parse_activity(inline: Option<String>, file: Option<&Path>) -> Result<ActivityData> {
    let text = match (inline, file) {
        (Some(json), _) => json,
        (None, Some(path)) => read_input(path)?,
        (None, None) => bail!("either --activity or --activity-file is required"),
    };
    serde_json::from_str(&text).context("invalid activity payload")
}

fn run(args: Args) -> Result<()> {
    let config = load_config(args.config.as_deref())?;
    let engine = EmissionEngine::new(config)?;

    match args.command {
        Command::Calculate {
            subcategory,
            activity,
            activity_file,
        } => {
            let activity = parse_activity(activity, activity_file.as_deref())?;
            let result = engine.calculate_emissions(&subcategory, &activity)?;
            print_json(&result)
        }
        Command::Resolve {
            subcategory,
            species,
            system,
        } => {
            let factor =
                engine.resolve_factor(&subcategory, species.as_deref(), system.as_deref())?;
            print_json(factor)
        }
        Command::Catalog { subcategory } => {
            let catalog = engine.catalog();
            let factors = match subcategory {
                Some(text) => catalog
                    .factors_for(text.parse::<Subcategory>()?)
                    .collect(),
                None => catalog.factors().iter().collect(),
            };
            print_json(&CatalogListing {
                methodology: catalog.methodology(),
                factors,
            })
        }
        Command::Inventory { input } => {
            let text = read_input(&input)?;
            let records: Vec<ActivityRecord> =
                serde_json::from_str(&text).context("invalid inventory file")?;
            let report = engine.calculate_inventory(&records);
            print_json(&report)
        }
        Command::Import { store: path } => {
            let mut store = store::load(&path)?;
            let report = import_catalog(&mut store, engine.catalog());
            store::save(&store, &path)?;
            info!("Store {} now holds {} factors", path.display(), store.len());
            print_json(&report)?;
            if !report.is_complete() {
                bail!("{} factors failed to import", report.errors.len());
            }
            Ok(())
        }
    }
}

fn main() -> Result<()> {
    init_logging();
    run(Args::parse())
}
