mod cache;
mod catalog;
mod propagate;
mod query;
mod refresh;
mod stream;
mod trajectory;
mod web;

use clap::{Parser, Subcommand};
use std::process::ExitCode;
use std::sync::Arc;

use crate::cache::SnapshotCache;
use crate::catalog::HttpCatalog;
use crate::propagate::{Propagator, Sgp4Propagator};
use crate::refresh::RefreshScheduler;
use crate::web::Config;

#[derive(Parser)]
#[command(name = "satpos")]
#[command(about = "Near-real-time satellite position service")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Refresh the catalog and serve positions over HTTP and WebSocket
    Serve {
        #[arg(short, long)]
        config: Option<String>,
    },
    /// Run a single refresh cycle and report the result
    Fetch {
        #[arg(short, long)]
        config: Option<String>,
        /// Print the computed positions as JSON
        #[arg(long)]
        json: bool,
    },
    /// Validate a configuration file and print the effective settings
    CheckConfig { config: String },
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { config } => serve(config.as_deref()).await,
        Commands::Fetch { config, json } => fetch(config.as_deref(), json).await,
        Commands::CheckConfig { config } => check_config(&config),
    }
}

fn load_config(path: Option<&str>) -> Option<Config> {
    match path {
        None => Some(Config::default()),
        Some(path) => match Config::from_file(path) {
            Ok(c) => Some(c),
            Err(e) => {
                eprintln!("Error loading config {}: {}", path, e);
                None
            }
        },
    }
}

fn scheduler(
    config: &Config,
    cache: Arc<SnapshotCache>,
    propagator: Arc<dyn Propagator>,
) -> Option<RefreshScheduler<HttpCatalog>> {
    let source = match HttpCatalog::new(&config.catalog) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error creating catalog client: {}", e);
            return None;
        }
    };
    Some(RefreshScheduler::new(
        source,
        propagator,
        cache,
        config.catalog.refresh_interval,
    ))
}

async fn serve(path: Option<&str>) -> ExitCode {
    let Some(config) = load_config(path) else {
        return ExitCode::FAILURE;
    };

    let cache = Arc::new(SnapshotCache::new());
    let propagator: Arc<dyn Propagator> = Arc::new(Sgp4Propagator);
    let Some(scheduler) = scheduler(&config, cache.clone(), propagator.clone()) else {
        return ExitCode::FAILURE;
    };

    let refresh_loop = Arc::new(scheduler).start_with_initial_refresh().await;

    let result = web::run_server(config, cache, propagator).await;
    refresh_loop.abort();

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("Server error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn fetch(path: Option<&str>, json: bool) -> ExitCode {
    let Some(config) = load_config(path) else {
        return ExitCode::FAILURE;
    };

    let cache = Arc::new(SnapshotCache::new());
    let Some(scheduler) = scheduler(&config, cache.clone(), Arc::new(Sgp4Propagator)) else {
        return ExitCode::FAILURE;
    };

    let report = match scheduler.refresh().await {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Refresh failed: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if json {
        let snapshot = cache.read();
        match serde_json::to_string_pretty(snapshot.samples()) {
            Ok(s) => println!("{}", s),
            Err(e) => {
                eprintln!("Error encoding positions: {}", e);
                return ExitCode::FAILURE;
            }
        }
    } else {
        println!(
            "Computed {} positions at {} ({} skipped)",
            report.installed,
            report.updated_at,
            report.skipped.len()
        );
        for skipped in &report.skipped {
            println!("  skipped {}: {}", skipped.name, skipped.reason);
        }
    }

    ExitCode::SUCCESS
}

fn check_config(path: &str) -> ExitCode {
    match Config::from_file(path) {
        Ok(config) => {
            println!("Configuration is valid");
            println!("  bind:              {}", config.web.bind);
            println!("  default page size: {}", config.web.default_page_size);
            println!("  catalog:           {}", config.catalog.url);
            println!("  user agent:        {}", config.catalog.user_agent);
            println!(
                "  fetch timeout:     {}",
                humantime::format_duration(config.catalog.timeout)
            );
            println!(
                "  refresh interval:  {}",
                humantime::format_duration(config.catalog.refresh_interval)
            );
            println!(
                "  stream interval:   {}",
                humantime::format_duration(config.stream.interval)
            );
            println!("  max hours ahead:   {}", config.orbit.max_hours_ahead);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Config error: {}", e);
            ExitCode::FAILURE
        }
    }
}
