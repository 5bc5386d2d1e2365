use clap::{Parser, Subcommand};
use storefront_catalog::CatalogProvider;
use storefront_core::{AppConfig, CachePolicy};
use tracing_subscriber::EnvFilter;

mod cart;
mod probe;
mod products;

#[derive(Debug, Parser)]
#[command(name = "storefront-cli")]
#[command(about = "Catalog browser and cart simulator backed by the upstream product API")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Browse the product catalog
    Products {
        #[command(subcommand)]
        command: ProductsCommands,
    },
    /// List the catalog's category labels
    Categories {
        /// Override the configured cache policy for this invocation
        #[arg(long)]
        policy: Option<CachePolicy>,
    },
    /// Run one scripted cart session against the catalog
    Cart(cart::CartArgs),
    /// Report whether the upstream API is reachable and what it answers
    Probe,
}

#[derive(Debug, Subcommand)]
enum ProductsCommands {
    /// Print every product visible under the current policy
    List {
        /// Only show products in this category (matched case-insensitively)
        #[arg(long)]
        category: Option<String>,

        /// Override the configured cache policy for this invocation
        #[arg(long)]
        policy: Option<CachePolicy>,
    },
    /// Print one product by id
    Show {
        /// Product id to look up
        id: u32,

        /// Override the configured cache policy for this invocation
        #[arg(long)]
        policy: Option<CachePolicy>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    dotenvy::dotenv().ok();
    let config = storefront_core::load_app_config_from_env()?;

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    match cli.command {
        Commands::Products { command } => match command {
            ProductsCommands::List { category, policy } => {
                products::list(&config, category.as_deref(), policy).await
            }
            ProductsCommands::Show { id, policy } => products::show(&config, id, policy).await,
        },
        Commands::Categories { policy } => products::categories(&config, policy).await,
        Commands::Cart(args) => cart::run(&config, &args).await,
        Commands::Probe => probe::run(&config).await,
    }
}

/// Builds a catalog provider from config, honoring a per-invocation cache
/// policy override.
fn build_provider(
    config: &AppConfig,
    policy_override: Option<CachePolicy>,
) -> anyhow::Result<CatalogProvider> {
    let mut config = config.clone();
    if let Some(policy) = policy_override {
        config.cache_policy = policy;
    }
    Ok(CatalogProvider::from_config(&config)?)
}
