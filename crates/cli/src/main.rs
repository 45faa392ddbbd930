//! Velour CLI - catalog inspection tools.
//!
//! # Usage
//!
//! ```bash
//! # Aggregated product list, filtered like GET /api/products
//! velour-cli products --category men --max-price 3000 --sort price-low
//!
//! # One product (local id or external-<n>)
//! velour-cli product 1
//! velour-cli product external-30
//!
//! # Related products
//! velour-cli related 1
//!
//! # Static category tree
//! velour-cli categories
//!
//! # Raw normalized remote feed (no cache, no local products)
//! velour-cli external
//! ```
//!
//! Configuration comes from the same environment variables as the
//! storefront binary (`REMOTE_CATALOG_URL`, `STOREFRONT_CATALOG_PATH`, ...).

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Args, Parser, Subcommand};
use velour_storefront::products::ProductQuery;

mod commands;

#[derive(Parser)]
#[command(name = "velour-cli")]
#[command(author, version, about = "Velour catalog tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List products from the local catalog and the remote feed
    Products(FilterArgs),
    /// Show one product by id
    Product {
        /// Local numeric id or `external-<n>`
        id: String,
    },
    /// Show products related to one product
    Related {
        /// Local numeric id or `external-<n>`
        id: String,
    },
    /// Print the static category tree
    Categories,
    /// Fetch and print the normalized remote feed
    External,
}

/// Filter flags, mirroring the `GET /api/products` query parameters.
#[derive(Args)]
struct FilterArgs {
    /// Category tag (`all` disables the filter)
    #[arg(long)]
    category: Option<String>,

    /// Sub-category (also matches a main category of the same name)
    #[arg(long)]
    sub_category: Option<String>,

    /// Case-insensitive text in name or description
    #[arg(long)]
    search: Option<String>,

    /// Minimum effective price, inclusive
    #[arg(long)]
    min_price: Option<String>,

    /// Maximum effective price, inclusive
    #[arg(long)]
    max_price: Option<String>,

    /// Color token
    #[arg(long)]
    color: Option<String>,

    /// Size token (case-sensitive)
    #[arg(long)]
    size: Option<String>,

    /// `true` or `false`
    #[arg(long)]
    is_new: Option<String>,

    /// `newest`, `price-low` or `price-high`
    #[arg(long)]
    sort: Option<String>,
}

impl From<FilterArgs> for ProductQuery {
    fn from(args: FilterArgs) -> Self {
        Self {
            category: args.category,
            sub_category: args.sub_category,
            search: args.search,
            min_price: args.min_price,
            max_price: args.max_price,
            color: args.color,
            size: args.size,
            is_new: args.is_new,
            sort: args.sort,
        }
    }
}

#[tokio::main]
async fn main() {
    // Logs go to stderr so stdout stays valid JSON
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "velour_storefront=warn".into()),
        )
        .init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Products(args) => commands::catalog::products(args.into()).await?,
        Commands::Product { id } => commands::catalog::product(&id).await?,
        Commands::Related { id } => commands::catalog::related(&id).await?,
        Commands::Categories => commands::catalog::categories()?,
        Commands::External => commands::catalog::external().await?,
    }
    Ok(())
}
