#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! CLI entry point for the incident map.
//!
//! Loads a report collection (the built-in sample or a remote endpoint),
//! draws it onto an in-memory map the same way the interactive view would,
//! and prints either the drawn layers or the summary statistics.

use clap::{Parser, Subcommand, ValueEnum};
use incident_map_analytics::{DEFAULT_TOP_N, stats};
use incident_map_map::config::{DEFAULT_MAP_ID, all_maps, map_settings};
use incident_map_map::export;
use incident_map_map::memory::InMemoryMap;
use incident_map_map::session::{FetchOutcome, MapSession};
use incident_map_map::{ViewMode, canvas};
use incident_map_source::{
    HttpReportSource, ReportSource, SampleReportSource, http::DEFAULT_REPORTS_URL,
};

#[derive(Parser)]
#[command(name = "incident_map", about = "Incident map renderer and statistics")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum SourceKind {
    /// Built-in Barangay Parian snapshot
    Sample,
    /// Remote reports endpoint
    Http,
}

#[derive(Clone, Copy, ValueEnum)]
enum ModeArg {
    /// One pin per report
    Markers,
    /// A single density layer
    Heatmap,
}

impl From<ModeArg> for ViewMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Markers => Self::Markers,
            ModeArg::Heatmap => Self::Heatmap,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    /// Layer-by-layer dump including popup HTML
    Json,
    /// `GeoJSON` `FeatureCollection` of drawn points
    Geojson,
}

#[derive(clap::Args)]
struct SourceArgs {
    /// Where to load reports from
    #[arg(long, value_enum, default_value = "sample")]
    source: SourceKind,
    /// Reports endpoint used with `--source http`
    #[arg(long, default_value = DEFAULT_REPORTS_URL)]
    url: String,
    /// Category key to show (repeatable). Shows everything if omitted.
    #[arg(long = "category")]
    categories: Vec<String>,
    /// Map configuration id
    #[arg(long, default_value = DEFAULT_MAP_ID)]
    map: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Draw reports and print the resulting layers
    Render {
        #[command(flatten)]
        source: SourceArgs,
        /// How to draw the reports
        #[arg(long, value_enum, default_value = "markers")]
        mode: ModeArg,
        /// Output format
        #[arg(long, value_enum, default_value = "json")]
        format: Format,
    },
    /// Print summary statistics
    Summary {
        #[command(flatten)]
        source: SourceArgs,
        /// Window for the recent-reports count, in days
        #[arg(long, default_value = "7")]
        days: u32,
        /// Number of top categories to list
        #[arg(long, default_value_t = DEFAULT_TOP_N)]
        top: usize,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// List the crime categories with their labels and colors
    Categories,
    /// List the configured maps
    Maps,
}

async fn load_session(
    args: &SourceArgs,
) -> Result<MapSession<InMemoryMap>, Box<dyn std::error::Error>> {
    let settings =
        map_settings(&args.map).ok_or_else(|| format!("Unknown map '{}'", args.map))?;

    let source: Box<dyn ReportSource> = match args.source {
        SourceKind::Sample => Box::new(SampleReportSource),
        SourceKind::Http => Box::new(HttpReportSource::new(args.url.clone())),
    };

    let mut session = MapSession::new(settings);
    let (surface, ready) = canvas::readiness();
    if surface.ready(InMemoryMap::new()).is_err() {
        return Err("Map surface was not awaited".into());
    }
    session.initialize(ready).await;

    match session.refresh(source.as_ref()).await {
        FetchOutcome::Applied(count) => log::info!("Loaded {count} reports from '{}'", source.id()),
        outcome => return Err(format!("Failed to load reports: {outcome:?}").into()),
    }

    for category in &args.categories {
        session.toggle_category(category.as_str());
    }

    Ok(session)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Render {
            source,
            mode,
            format,
        } => {
            let mut session = load_session(&source).await?;
            session.set_mode(mode.into());
            let map = session
                .canvas()
                .map()
                .ok_or("Map failed to initialize")?;
            let value = match format {
                Format::Json => export::layer_dump(map),
                Format::Geojson => export::to_geojson(map),
            };
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
        Commands::Summary {
            source,
            days,
            top,
            json,
        } => {
            let session = load_session(&source).await?;
            let summary = session.summary(days, top, chrono::Utc::now());
            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
                return Ok(());
            }

            println!("Total reports:     {}", summary.total);
            println!("Verified:          {}", summary.verified);
            println!("Last {days} days:      {}", summary.recent);
            println!("Shown by filter:   {}", summary.filtered);
            println!("Clusters:          {}", summary.clusters);
            println!();
            println!("{:<20} COUNT", "CATEGORY");
            println!("{}", "-".repeat(30));
            for category in &summary.top_categories {
                println!("{:<20} {}", category.label, category.count);
            }
            println!();
            println!("{:<20} COUNT", "MONTH");
            println!("{}", "-".repeat(30));
            for point in stats::monthly_counts(session.reports()) {
                println!("{:<20} {}", point.period, point.count);
            }
        }
        Commands::Categories => {
            println!("{:<12} {:<12} COLOR", "KEY", "LABEL");
            println!("{}", "-".repeat(34));
            for def in incident_map_crime_models::table() {
                println!("{:<12} {:<12} {}", def.key, def.label, def.color);
            }
        }
        Commands::Maps => {
            println!("{:<12} NAME", "ID");
            println!("{}", "-".repeat(40));
            for settings in all_maps() {
                println!("{:<12} {}", settings.id, settings.name);
            }
        }
    }

    Ok(())
}
