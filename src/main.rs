// FleetLens - main.rs
//
// Application entry point. Handles:
// 1. CLI argument parsing
// 2. Logging initialisation (debug mode support)
// 3. Configuration loading (config.toml)
// 4. Snapshot loading and command dispatch

mod render;

// Re-export modules from the library crate so that `render.rs` and other
// binary-side code can use `crate::core::...`, `crate::data::...` etc.
pub use fleetlens::core;
pub use fleetlens::data;
pub use fleetlens::platform;
pub use fleetlens::util;

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::path::PathBuf;

use crate::core::classify::parse_date;
use crate::core::export::{export_csv, export_json};
use crate::core::filter::{FilterState, StatusFilter};
use crate::core::model::{
    Alert, Driver, FleetSnapshot, LoadSummary, MaintenanceItem, Trip, Vehicle, ViewProfile,
};
use crate::core::summary::SummarySpec;
use crate::core::view::{self, build_view, ViewQuery};
use crate::data::discovery::DiscoveryConfig;
use crate::data::loader::load_snapshot;
use crate::platform::config::AppConfig;
use crate::util::constants;
use crate::util::error::{ExportError, FleetLensError};

/// FleetLens - fleet operations snapshot analyser.
///
/// Point FleetLens at a directory of fleet dataset files (vehicles.json,
/// drivers.json, trips.json, maintenance.json, alerts.json) to derive the
/// filtered, grouped, and classified views a dashboard shows.
#[derive(Parser, Debug)]
#[command(name = "FleetLens", version, about)]
struct Cli {
    /// Directory containing fleet dataset files.
    #[arg(short = 'D', long = "data-dir", default_value = ".")]
    data_dir: PathBuf,

    /// Enable debug logging (equivalent to RUST_LOG=debug).
    #[arg(short = 'd', long = "debug")]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List vehicles.
    Vehicles(ListArgs),

    /// List drivers.
    Drivers(ListArgs),

    /// List trips.
    Trips(ListArgs),

    /// List maintenance items.
    Maintenance(ListArgs),

    /// List alerts.
    Alerts(ListArgs),

    /// Dashboard overview across all collections.
    Summary(SummaryArgs),
}

/// Options shared by every list command.
#[derive(Args, Debug)]
struct ListArgs {
    /// Case-insensitive substring search across the collection's text fields.
    #[arg(short = 's', long = "search", default_value = "")]
    search: String,

    /// Status filter ("all" disables filtering).
    #[arg(long = "status", default_value = "all")]
    status: String,

    /// Regex filter across the collection's text fields.
    #[arg(long = "regex")]
    regex: Option<String>,

    /// Group records by this field.
    #[arg(short = 'g', long = "group-by")]
    group_by: Option<String>,

    /// Sum this numeric field per group (requires --group-by).
    #[arg(long = "sum")]
    sum_by: Option<String>,

    /// Reference date for deadline classification (YYYY-MM-DD; defaults to today).
    #[arg(long = "as-of")]
    as_of: Option<String>,

    /// Warning window in days (overrides config).
    #[arg(short = 'w', long = "window")]
    window: Option<u32>,

    /// Write the filtered records to this file instead of rendering a table.
    #[arg(long = "export")]
    export: Option<PathBuf>,

    /// Export format.
    #[arg(long = "format", value_enum, default_value = "csv")]
    format: ExportFormat,
}

#[derive(Args, Debug)]
struct SummaryArgs {
    /// Reference date for deadline classification (YYYY-MM-DD; defaults to today).
    #[arg(long = "as-of")]
    as_of: Option<String>,

    /// Warning window in days (overrides config).
    #[arg(short = 'w', long = "window")]
    window: Option<u32>,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
enum ExportFormat {
    Csv,
    Json,
}

fn main() {
    let cli = Cli::parse();

    // Initialise logging before anything that might want to log.
    util::logging::init(cli.debug, None);

    tracing::info!(
        version = constants::APP_VERSION,
        debug = cli.debug,
        "FleetLens starting"
    );

    if let Err(e) = run(cli) {
        tracing::error!(error = %e, "Command failed");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> util::error::Result<()> {
    // Resolve platform paths and load config.toml.
    let platform_paths = platform::config::PlatformPaths::resolve();
    let (config, config_warnings) = platform::config::load_config(&platform_paths.config_dir);
    for warning in &config_warnings {
        tracing::warn!("{}", warning);
        eprintln!("Warning: {warning}");
    }

    let discovery_config = DiscoveryConfig {
        max_depth: config.max_depth,
        max_files: config.max_files,
        include_patterns: config.include_patterns.clone(),
        exclude_patterns: config.exclude_patterns.clone(),
        ..Default::default()
    };

    let (snapshot, load_summary) = load_snapshot(&cli.data_dir, &discovery_config)?;
    for warning in &load_summary.warnings {
        tracing::warn!("{}", warning);
    }

    match &cli.command {
        Command::Vehicles(args) => run_list(
            &snapshot.vehicles,
            &Vehicle::view_profile(),
            &view::vehicle_summary_spec(),
            args,
            &config,
        ),
        Command::Drivers(args) => run_list(
            &snapshot.drivers,
            &Driver::view_profile(),
            &view::driver_summary_spec(),
            args,
            &config,
        ),
        Command::Trips(args) => run_list(
            &snapshot.trips,
            &Trip::view_profile(),
            &view::trip_summary_spec(),
            args,
            &config,
        ),
        Command::Maintenance(args) => run_list(
            &snapshot.maintenance,
            &MaintenanceItem::view_profile(),
            &view::maintenance_summary_spec(),
            args,
            &config,
        ),
        Command::Alerts(args) => run_list(
            &snapshot.alerts,
            &Alert::view_profile(),
            &view::alert_summary_spec(),
            args,
            &config,
        ),
        Command::Summary(args) => run_summary(&snapshot, &load_summary, args, &config),
    }
}

/// Build and output one collection view: render a table or export a file.
fn run_list<R: Serialize>(
    records: &[R],
    profile: &ViewProfile<R>,
    spec: &SummarySpec<R>,
    args: &ListArgs,
    config: &AppConfig,
) -> util::error::Result<()> {
    let mut filter = FilterState {
        text_search: args.search.clone(),
        status: StatusFilter::parse(&args.status),
        regex_search: None,
    };
    if let Some(ref pattern) = args.regex {
        filter.set_regex(pattern)?;
    }

    let query = ViewQuery {
        filter,
        group_by: args.group_by.clone(),
        sum_by: args.sum_by.clone(),
        reference: resolve_reference(args.as_of.as_deref())?,
        warning_window_days: resolve_window(args.window, config),
    };

    let view_model = build_view(records, &query, profile, spec)?;

    if let Some(ref export_path) = args.export {
        let file = std::fs::File::create(export_path).map_err(|e| ExportError::Io {
            path: export_path.clone(),
            source: e,
        })?;
        let rows = match args.format {
            ExportFormat::Csv => {
                export_csv(records, &view_model.indices, profile, file, export_path)?
            }
            ExportFormat::Json => export_json(records, &view_model.indices, file, export_path)?,
        };
        tracing::info!(rows, path = %export_path.display(), "View exported");
        println!("Exported {rows} rows to {}", export_path.display());
        return Ok(());
    }

    print!("{}", render::list_view(records, &view_model, profile, &query));
    Ok(())
}

/// Render the dashboard overview across all collections.
fn run_summary(
    snapshot: &FleetSnapshot,
    load_summary: &LoadSummary,
    args: &SummaryArgs,
    config: &AppConfig,
) -> util::error::Result<()> {
    let reference = resolve_reference(args.as_of.as_deref())?;
    let window = resolve_window(args.window, config);

    let dashboard = render::dashboard(snapshot, load_summary, reference, window)?;
    print!("{dashboard}");
    Ok(())
}

/// Reference date: explicit --as-of wins; otherwise today in local time.
fn resolve_reference(as_of: Option<&str>) -> Result<chrono::NaiveDate, FleetLensError> {
    match as_of {
        Some(value) => Ok(parse_date(value)?),
        None => Ok(chrono::Local::now().date_naive()),
    }
}

/// Warning window: explicit --window wins over config, clamped to bounds.
fn resolve_window(cli_window: Option<u32>, config: &AppConfig) -> u32 {
    let window = cli_window.unwrap_or(config.warning_window_days);
    let clamped = window.clamp(
        constants::MIN_WARNING_WINDOW_DAYS,
        constants::MAX_WARNING_WINDOW_DAYS,
    );
    if clamped != window {
        tracing::warn!(
            requested = window,
            used = clamped,
            "Warning window out of range; clamped"
        );
    }
    clamped
}
