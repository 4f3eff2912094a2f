//! Localized routing CLI.
//!
//! Operator tooling around an endpoint manifest:
//!
//! ```text
//!   manifest (TOML)
//!       → check    validate, report every problem
//!       → table    build and print the route table as JSON
//!       → resolve  translate one controller/action pair
//!       → watch    keep a router alive, rebuild on file change
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand, ValueEnum};

use localized_routing::config::loader::{load_config, ConfigError};
use localized_routing::config::watcher::{rebuild_on_change, ManifestWatcher};
use localized_routing::descriptor::FileDescriptorSource;
use localized_routing::observability::logging;
use localized_routing::routing::build_entries;
use localized_routing::{Direction, LocalizedRouter};

#[derive(Parser)]
#[command(name = "localized-routing")]
#[command(about = "Inspect and resolve localized routes from an endpoint manifest", long_about = None)]
struct Cli {
    /// Path to the endpoint manifest.
    #[arg(short, long, default_value = "routes.toml")]
    manifest: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate the manifest and compile it once
    Check,
    /// Print the compiled route table as JSON
    Table,
    /// Translate a controller/action pair
    Resolve {
        /// Culture tag; omit to search the culture-agnostic scope only
        #[arg(short, long)]
        culture: Option<String>,

        #[arg(short, long, value_enum, default_value_t = DirectionArg::ToOriginal)]
        direction: DirectionArg,

        controller: String,
        action: String,
    },
    /// Rebuild the table whenever the manifest changes, until Ctrl+C
    Watch,
}

#[derive(Clone, Copy, ValueEnum)]
enum DirectionArg {
    /// Localized name in, canonical name out
    ToOriginal,
    /// Canonical name in, localized name out
    ToTranslated,
}

impl From<DirectionArg> for Direction {
    fn from(arg: DirectionArg) -> Self {
        match arg {
            DirectionArg::ToOriginal => Direction::TranslatedToOriginal,
            DirectionArg::ToTranslated => Direction::OriginalToTranslated,
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match load_config(&cli.manifest) {
        Ok(config) => config,
        Err(ConfigError::Validation(errors)) => {
            eprintln!("{}: {} problem(s)", cli.manifest.display(), errors.len());
            for err in &errors {
                eprintln!("  - {}", err);
            }
            std::process::exit(1);
        }
        Err(e) => return Err(e.into()),
    };

    logging::init(&config.observability)?;

    let router = LocalizedRouter::from_config(
        &config.router,
        Arc::new(FileDescriptorSource::new(&cli.manifest)),
    );

    match cli.command {
        Commands::Check => {
            let entries = build_entries(&config.endpoints, config.router.ambiguity)?;
            println!(
                "{}: ok ({} endpoints, {} route entries)",
                cli.manifest.display(),
                config.endpoints.len(),
                entries.len()
            );
        }
        Commands::Table => {
            let table = router.table().await?;
            println!("{}", serde_json::to_string_pretty(table.entries())?);
        }
        Commands::Resolve {
            culture,
            direction,
            controller,
            action,
        } => {
            let resolved = router
                .query(culture.as_deref(), &controller, &action, direction.into())
                .await?;
            match resolved {
                Some(name) => println!("{}", name),
                None => println!("unresolved"),
            }
        }
        Commands::Watch => {
            let table = router.table().await?;
            tracing::info!(
                manifest = %cli.manifest.display(),
                entries = table.len(),
                "Initial route table installed"
            );

            let (watcher, updates) = ManifestWatcher::new(&cli.manifest);
            let _watcher = watcher.run()?;
            let rebuilds = tokio::spawn(rebuild_on_change(router.clone(), updates));

            tokio::signal::ctrl_c().await?;
            tracing::info!("Shutdown signal received");
            rebuilds.abort();
        }
    }

    Ok(())
}
