use anyhow::Result;
use clap::{Parser, ValueEnum};
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use waste_dashboard::models::{Aggregation, Config, Selection};
use waste_dashboard::{DashboardData, WasteDataView, WasteDataset};

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    Json,
    Table,
}

/// Print the chart data for one selection without starting the dashboard
#[derive(Parser, Debug)]
#[command(name = "waste-report")]
#[command(version)]
#[command(about = "Filter and total waste records by building and stream")]
#[command(long_about = "
Loads the waste CSV, applies a building/stream selection and prints the data behind
the trend and totals charts. Without -b, -s or --all the first building and the
first stream are selected, matching the dashboard's opening state.

Examples:
  waste-report -b Harrington -s Landfill -s Recycling
  waste-report --all --format table
")]
struct Args {
    /// CSV with Building, Stream, Date and Weight columns (overrides WASTE_DATA_PATH)
    #[arg(long, short = 'd')]
    data: Option<String>,

    /// Building to include; repeat for more
    #[arg(long = "building", short = 'b')]
    buildings: Vec<String>,

    /// Waste stream to include; repeat for more
    #[arg(long = "stream", short = 's')]
    streams: Vec<String>,

    /// Select every building and stream
    #[arg(long, conflicts_with_all = ["buildings", "streams"])]
    all: bool,

    #[arg(long, short = 'f', value_enum, default_value_t = Format::Json)]
    format: Format,
}

fn selection_from_args(args: &Args, view: &WasteDataView) -> Selection {
    if args.all {
        return view.full_selection();
    }
    if args.buildings.is_empty() && args.streams.is_empty() {
        return view.default_selection();
    }
    Selection::new(args.buildings.iter().cloned(), args.streams.iter().cloned())
}

/// Aligned text table of the aggregation, one row per building/stream pair
fn render_table(totals: &Aggregation) -> String {
    let building_width = totals
        .keys()
        .map(|(b, _)| b.len())
        .chain(std::iter::once("Building".len()))
        .max()
        .unwrap_or(0);
    let stream_width = totals
        .keys()
        .map(|(_, s)| s.len())
        .chain(std::iter::once("Stream".len()))
        .max()
        .unwrap_or(0);

    let mut out = format!(
        "{:<bw$}  {:<sw$}  {:>14}\n",
        "Building",
        "Stream",
        "Weight (lbs)",
        bw = building_width,
        sw = stream_width
    );
    for ((building, stream), total) in totals {
        out.push_str(&format!(
            "{:<bw$}  {:<sw$}  {:>14.2}\n",
            building,
            stream,
            total,
            bw = building_width,
            sw = stream_width
        ));
    }
    out
}

fn main() -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .expect("setting default subscriber failed");

    let args = Args::parse();
    let config = Config::from_env()?.with_data_path(args.data.clone());

    let dataset = match WasteDataset::from_csv_path(&config.data_path) {
        Ok(dataset) => dataset,
        Err(e) => {
            eprintln!("❌ Data Error: {}", e);
            std::process::exit(1);
        }
    };

    let view = WasteDataView::new(dataset);
    let selection = selection_from_args(&args, &view);
    if selection.is_empty() {
        warn!("⚠️  Selection has no buildings or no streams; output will be empty");
    }
    info!(
        "🔍 Selected {} buildings x {} streams",
        selection.buildings.len(),
        selection.streams.len()
    );

    match args.format {
        Format::Json => {
            let data = DashboardData::build(&view, &selection);
            println!("{}", serde_json::to_string_pretty(&data)?);
        }
        Format::Table => {
            let totals = view.aggregate_by_building_and_stream(&selection);
            print!("{}", render_table(&totals));
        }
    }

    Ok(())
}
