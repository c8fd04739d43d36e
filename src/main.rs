//! Harvest - Product Search Service
//!
//! Harvest answers filtered and sorted queries over the product catalog of an
//! upstream inventory service. It runs as an HTTP server, or performs a single
//! search from the command line.

use chrono::NaiveDateTime;
use clap::{Parser, Subcommand};
use harvest_core::config::ProviderConfig;
use harvest_core::product::{parse_lower_bound, parse_upper_bound};
use harvest_core::{
    FilterCriteria, HarvestConfig, HarvestError, InMemoryProductProvider, ProductProvider,
    ProductSearchService, Result, SearchProductsUseCase, SearchRequest, SortField,
};
use harvest_infra::{init_logger, HttpProductProvider, LoggerConfig};
use harvest_serve::api::SEARCH_PATH;
use harvest_serve::openapi::{get_openapi_json, get_openapi_yaml};
use harvest_serve::{AppState, ServerBuilder, ServerConfig};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "harvest")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Harvest product search service")]
#[command(long_about = r#"
Harvest fetches the full product catalog from an upstream inventory service
and returns the subset matching name, type, price, quantity and harvest date
filters, optionally ordered by one field.

Configuration is read from an optional YAML file, then HARVEST_* environment
variables (e.g. HARVEST_SERVER__PORT), then PORT and PRODUCT_PROVIDER_URL.
"#)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the product search HTTP server
    Serve {
        /// Server host address
        #[arg(long)]
        host: Option<String>,

        /// Server port
        #[arg(short, long)]
        port: Option<u16>,

        /// Base URL of the upstream product catalog
        #[arg(long)]
        provider_url: Option<String>,

        /// Serve products from a local JSON file instead of the upstream catalog
        #[arg(long)]
        fixture: Option<PathBuf>,
    },

    /// Run a single search and print the result as JSON
    Search(SearchArgs),

    /// Print the effective configuration as YAML
    Config,

    /// Print the OpenAPI document of the HTTP API
    Openapi {
        /// Output format
        #[arg(short, long, default_value = "yaml", value_parser = ["json", "yaml"])]
        format: String,
    },
}

#[derive(clap::Args, Debug, Default)]
struct SearchArgs {
    /// Case-insensitive substring of the product name
    #[arg(long)]
    name: Option<String>,

    /// Case-insensitive substring of the product type
    #[arg(long = "type")]
    product_type: Option<String>,

    /// Minimum price per unit (inclusive)
    #[arg(long)]
    min_price: Option<f64>,

    /// Maximum price per unit (inclusive)
    #[arg(long)]
    max_price: Option<f64>,

    /// Minimum quantity (inclusive)
    #[arg(long)]
    min_quantity: Option<i64>,

    /// Maximum quantity (inclusive)
    #[arg(long)]
    max_quantity: Option<i64>,

    /// Earliest harvest date, YYYY-MM-DD
    #[arg(long, value_parser = lower_bound)]
    harvest_start: Option<NaiveDateTime>,

    /// Latest harvest date, YYYY-MM-DD (inclusive)
    #[arg(long, value_parser = upper_bound)]
    harvest_end: Option<NaiveDateTime>,

    /// Sort field: name, price_per_unit, quantity or harvest_date
    #[arg(long, value_parser = sort_field)]
    order_by: Option<String>,

    /// Sort direction: asc or desc
    #[arg(long)]
    order_dir: Option<String>,

    /// Search a local JSON file instead of the upstream catalog
    #[arg(long)]
    fixture: Option<PathBuf>,
}

impl SearchArgs {
    fn to_request(&self) -> SearchRequest {
        let criteria = FilterCriteria {
            name: self.name.clone(),
            product_type: self.product_type.clone(),
            min_price: self.min_price,
            max_price: self.max_price,
            min_quantity: self.min_quantity,
            max_quantity: self.max_quantity,
            harvest_start: self.harvest_start,
            harvest_end: self.harvest_end,
        };

        SearchRequest {
            criteria,
            order_by: self.order_by.clone(),
            order_dir: self.order_dir.clone(),
        }
    }
}

fn lower_bound(value: &str) -> std::result::Result<NaiveDateTime, String> {
    parse_lower_bound(value).ok_or_else(|| format!("invalid date '{}'", value))
}

fn upper_bound(value: &str) -> std::result::Result<NaiveDateTime, String> {
    parse_upper_bound(value).ok_or_else(|| format!("invalid date '{}'", value))
}

fn sort_field(value: &str) -> std::result::Result<String, String> {
    SortField::parse(value)
        .map(|field| field.as_str().to_string())
        .ok_or_else(|| {
            let all: Vec<&str> = SortField::all().iter().map(|f| f.as_str()).collect();
            format!("expected one of {}", all.join(", "))
        })
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = HarvestConfig::load(cli.config.as_deref())?;

    let mut logger = LoggerConfig::from(&config.logging);
    if cli.verbose {
        logger.level = "debug".to_string();
    }
    init_logger(logger)?;

    info!("Starting Harvest v{}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Commands::Serve {
            host,
            port,
            provider_url,
            fixture,
        } => handle_serve(config, host, port, provider_url, fixture).await,
        Commands::Search(args) => handle_search(&config, &args).await,
        Commands::Config => handle_config(&config),
        Commands::Openapi { format } => handle_openapi(&format),
    }
}

async fn handle_serve(
    config: HarvestConfig,
    host: Option<String>,
    port: Option<u16>,
    provider_url: Option<String>,
    fixture: Option<PathBuf>,
) -> Result<()> {
    let mut builder = ServerBuilder::from_config(ServerConfig::from(&config));
    if let Some(host) = host {
        builder = builder.host(host);
    }
    if let Some(port) = port {
        builder = builder.port(port);
    }
    if let Some(url) = provider_url {
        builder = builder.provider_url(url);
    }

    let server = match &fixture {
        Some(path) => builder.build_with_state(AppState::new(load_fixture(path).await?)),
        None => builder.build()?,
    };

    let settings = server.config();
    info!(
        "Product search available at http://{}:{}{}",
        settings.host, settings.port, SEARCH_PATH
    );
    if fixture.is_none() {
        let upstream = HttpProductProvider::new(&ProviderConfig {
            base_url: settings.provider_url.clone(),
            timeout_secs: settings.provider_timeout_secs,
        })?;
        if !upstream.health_check().await {
            warn!("Product catalog is not reachable yet; searches will fail until it is");
        }
    }

    server.start().await
}

async fn handle_search(config: &HarvestConfig, args: &SearchArgs) -> Result<()> {
    let provider: Arc<dyn ProductProvider> = match &args.fixture {
        Some(path) => load_fixture(path).await?,
        None => Arc::new(HttpProductProvider::new(&config.provider)?),
    };

    let use_case = SearchProductsUseCase::new(ProductSearchService::new(provider));
    let products = use_case.execute(args.to_request()).await?;

    info!("Found {} products", products.len());
    println!("{}", serde_json::to_string_pretty(&products)?);

    Ok(())
}

fn handle_config(config: &HarvestConfig) -> Result<()> {
    print!("{}", config.to_yaml()?);
    Ok(())
}

fn handle_openapi(format: &str) -> Result<()> {
    let document = match format {
        "json" => get_openapi_json()?,
        _ => get_openapi_yaml()?,
    };
    println!("{}", document);
    Ok(())
}

async fn load_fixture(path: &Path) -> Result<Arc<dyn ProductProvider>> {
    if !path.exists() {
        return Err(HarvestError::validation(format!(
            "Fixture file not found: {}",
            path.display()
        )));
    }

    let provider = InMemoryProductProvider::from_json_file(path).await?;
    info!("Loaded {} products from {}", provider.len(), path.display());
    Ok(Arc::new(provider))
}
