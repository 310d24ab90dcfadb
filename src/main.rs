use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use datamodel_docs::build::Builder;
use datamodel_docs::catalog::Catalog;
use datamodel_docs::config::{DocsConfig, FieldLayout};
use datamodel_docs::directive::ModelFieldsDirective;
use datamodel_docs::models::{ModelLookup, Registry};
use datamodel_docs::writer::{self, OutputFormat};
use datamodel_docs::{extension, listing};

#[derive(Parser)]
#[command(name = "dmdocs")]
#[command(about = "Reference documentation for registered data models")]
struct Cli {
    /// JSON config file (defaults apply if it doesn't exist)
    #[arg(long, global = true, default_value = "dmdocs.json")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the index and per-category listing pages
    Listings {
        /// Catalog describing the registry and models
        #[arg(short, long)]
        catalog: PathBuf,

        /// Documentation source root
        #[arg(short, long)]
        srcdir: PathBuf,
    },
    /// Render a single model, e.g. `geo.RockSample`
    Render {
        model_path: String,

        #[arg(short, long)]
        catalog: PathBuf,

        #[arg(short, long, value_enum, default_value_t = OutputFormat::Markdown)]
        format: OutputFormat,

        #[arg(short, long, value_enum)]
        layout: Option<FieldLayout>,
    },
    /// Write the listing pages and expand every model directive into `outdir`
    Build {
        #[arg(short, long)]
        catalog: PathBuf,

        #[arg(short, long)]
        srcdir: PathBuf,

        #[arg(short, long)]
        outdir: PathBuf,

        #[arg(short, long, value_enum)]
        layout: Option<FieldLayout>,
    },
    /// Print the JSON Schema of the catalog format
    Schema,
}

/// Initialize tracing on stderr so rendered output on stdout stays clean
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| "datamodel_docs=info,dmdocs=info".into()),
    );

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn load_catalog(path: &Path) -> anyhow::Result<(Arc<Registry>, Arc<dyn ModelLookup>)> {
    let catalog = Catalog::load(path)
        .with_context(|| format!("Failed to load catalog {}", path.display()))?;
    let registry = Arc::new(catalog.registry().clone());
    let lookup: Arc<dyn ModelLookup> = Arc::new(catalog);
    Ok((registry, lookup))
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let mut config = DocsConfig::load(&cli.config).context("Failed to load config")?;

    match cli.command {
        Commands::Listings { catalog, srcdir } => {
            let (registry, _) = load_catalog(&catalog)?;
            let paths = listing::write_listings(&srcdir.join(&config.output_subdir), &registry)?;
            for path in paths.all() {
                println!("{}", path.display());
            }
        }
        Commands::Render {
            model_path,
            catalog,
            format,
            layout,
        } => {
            let (registry, lookup) = load_catalog(&catalog)?;
            let directive = ModelFieldsDirective::new(registry, lookup)
                .with_layout(layout.unwrap_or(config.field_layout));

            let nodes = directive
                .render(&model_path)
                .with_context(|| format!("Failed to render {}", model_path))?;
            let output = writer::render(&nodes, format, 1)
                .context("Failed to serialize document tree")?;
            print!("{}", output);
        }
        Commands::Build {
            catalog,
            srcdir,
            outdir,
            layout,
        } => {
            if let Some(layout) = layout {
                config.field_layout = layout;
            }
            let (registry, lookup) = load_catalog(&catalog)?;

            let mut builder = Builder::new(config.output_subdir.clone());
            let metadata = extension::setup(&mut builder, registry, lookup, &config);
            tracing::debug!("Extension loaded: {:?}", metadata);

            let stats = builder.build(&srcdir, &outdir)?;
            println!(
                "Built {} documents with {} model directives into {}",
                stats.documents,
                stats.directives,
                outdir.display()
            );
        }
        Commands::Schema => {
            println!("{}", serde_json::to_string_pretty(&Catalog::json_schema())?);
        }
    }

    Ok(())
}
