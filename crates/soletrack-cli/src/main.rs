use clap::{Parser, Subcommand};
use soletrack_scraper::{build_http_client, ProductScraper, Retailer};

#[derive(Debug, Parser)]
#[command(name = "soletrack-cli")]
#[command(about = "Sneaker scraper command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Scrape one product page and print the extracted record as JSON.
    Scrape {
        /// Retailer slug (nike or adidas).
        #[arg(long)]
        retailer: String,
        /// Product page URL.
        url: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Scrape { retailer, url } => scrape(&retailer, &url).await,
    }
}

async fn scrape(retailer: &str, url: &str) -> anyhow::Result<()> {
    let Some(retailer) = Retailer::from_slug(retailer) else {
        anyhow::bail!("unsupported retailer: {retailer} (expected nike or adidas)");
    };
    if !retailer.profile().is_product_url(url) {
        anyhow::bail!("URL does not look like a {} product page", retailer.slug());
    }

    let config = soletrack_core::load_app_config()?;
    let client = build_http_client(config.fetch_timeout_secs)?;
    let scraper = ProductScraper::new(client, retailer, config.fetch_user_agent);

    let product = scraper.scrape(url).await?;
    println!("{}", serde_json::to_string_pretty(&product)?);
    Ok(())
}
