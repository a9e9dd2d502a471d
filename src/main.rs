use anyhow::{Context, Result};
use clap::Parser;
use mars_realestate::overview::{describe_properties, describe_response};
use mars_realestate::{ApiConfig, FetchStatus, Filter, MarsApiClient, OverviewController, Property};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Browse real estate listings on Mars
#[derive(Parser, Debug)]
#[command(name = "mars-realestate", version)]
struct Args {
    /// Which listings to show: rent, buy or all
    #[arg(long, default_value_t = Filter::All)]
    filter: Filter,

    /// Root URL of the realestate web service
    #[arg(long, default_value = mars_realestate::network::types::DEFAULT_BASE_URL)]
    base_url: String,

    /// Request timeout in seconds
    #[arg(long, default_value_t = mars_realestate::network::types::DEFAULT_TIMEOUT_SECS)]
    timeout_secs: u64,

    /// Print the raw response body instead of decoded listings
    #[arg(long)]
    raw: bool,

    /// Save the decoded listings as JSON
    #[arg(long)]
    output: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    info!("🪐 Mars Real Estate");
    info!("==================");

    let client = MarsApiClient::with_config(ApiConfig {
        base_url: args.base_url.clone(),
        timeout: Duration::from_secs(args.timeout_secs),
        ..ApiConfig::default()
    })
    .context("Failed to create HTTP client")?;

    if args.raw {
        let response = client.fetch_raw(Some(args.filter)).await;
        println!("{}", describe_response(&response));
        response.context("Failed to fetch listings")?;
        return Ok(());
    }

    let controller = OverviewController::new(Arc::new(client));
    if args.filter != Filter::All {
        controller.refresh(args.filter);
    }

    info!("Fetching {} listings from {}...", args.filter, args.base_url);
    let mut status = controller.subscribe_status();
    let final_status = *status
        .wait_for(|s| *s != FetchStatus::Loading)
        .await
        .context("Status channel closed before the fetch finished")?;

    if final_status == FetchStatus::Error {
        warn!("Could not load listings, see the log above for the cause");
        controller.dispose();
        anyhow::bail!("Failed to fetch listings");
    }

    let properties = controller.properties();
    info!("✅ {}", describe_properties(&properties));

    for (i, property) in properties.iter().enumerate() {
        print_property(i + 1, property);
    }

    if let Some(path) = &args.output {
        let json = serde_json::to_string_pretty(&properties)?;
        tokio::fs::write(path, json)
            .await
            .with_context(|| format!("Failed to write {}", path.display()))?;
        info!("💾 Saved {} properties to {}", properties.len(), path.display());
    }

    // Walk through the navigation signal a detail view would consume
    if let Some(first) = properties.first() {
        controller.select(first.clone());
        if let Some(target) = controller.navigation_target() {
            info!("Showing details for property {}", target.id);
            print_property(1, &target);
        }
        controller.acknowledge_selection();
    }

    controller.dispose();
    Ok(())
}

fn print_property(position: usize, property: &Property) {
    if property.is_rental() {
        println!("{}. {} for rent (${:.0}/month)", position, property.id, property.price);
    } else {
        println!("{}. {} for sale (${:.0})", position, property.id, property.price);
    }
    println!("   Image: {}", property.img_src_url);
    println!();
}
