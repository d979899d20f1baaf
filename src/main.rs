use anyhow::Result;
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use waste_dashboard::models::Config;
use waste_dashboard::ui;
use waste_dashboard::{WasteDataView, WasteDataset};

/// Interactive waste-collection dashboard
#[derive(Parser, Debug)]
#[command(name = "waste-dashboard")]
#[command(version)]
#[command(about = "Explore campus waste data by building and waste stream")]
struct Args {
    /// CSV with Building, Stream, Date and Weight columns (overrides WASTE_DATA_PATH)
    #[arg(long, short = 'd')]
    data: Option<String>,
}

fn main() -> Result<()> {
    // Keep logs quiet and on stderr so they don't tear the TUI
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("waste_dashboard=error"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .expect("setting default subscriber failed");

    let args = Args::parse();
    let config = Config::from_env()?.with_data_path(args.data);

    let dataset = match WasteDataset::from_csv_path(&config.data_path) {
        Ok(dataset) => dataset,
        Err(e) => {
            error!("Failed to load {}: {}", config.data_path, e);
            eprintln!("❌ Data Error: {}", e);
            std::process::exit(1);
        }
    };
    info!("📋 Loaded {} records from {}", dataset.len(), config.data_path);

    match ui::run_app(WasteDataView::new(dataset), &config) {
        Ok(_) => Ok(()),
        Err(e) => {
            eprintln!("❌ TUI Error: {}", e);
            std::process::exit(1);
        }
    }
}
