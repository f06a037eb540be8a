// PeerLens - main.rs
//
// Application entry point. Handles:
// 1. CLI argument parsing
// 2. Logging initialisation (debug mode support)
// 3. Configuration loading and validation
// 4. One refresh cycle against the router, then table or export output

use clap::Parser;
use peerlens::app::source::RouterRestSource;
use peerlens::app::state::ViewState;
use peerlens::core::export;
use peerlens::core::filter::StatusFilter;
use peerlens::core::model::Peer;
use peerlens::platform;
use peerlens::util;
use peerlens::util::error::{ConfigError, PeerLensError, Result};
use std::io::Write;
use std::path::PathBuf;

/// Output format for the peer list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
enum OutputFormat {
    /// Aligned table with a statistics footer.
    Table,
    /// CSV export (same columns as the table).
    Csv,
    /// JSON export of the normalised peer objects.
    Json,
}

/// PeerLens - WireGuard peer dashboard.
///
/// Fetches the peer list from a router's REST API and prints a
/// categorised, filterable view with pool-capacity statistics.
#[derive(Parser, Debug)]
#[command(name = "PeerLens", version, about)]
struct Cli {
    /// Path to config.toml (defaults to the platform config directory).
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// Router base URL (overrides [router] base_url from the config).
    #[arg(short = 'u', long = "url")]
    url: Option<String>,

    /// Free-text search over name, tunnel address, and comment.
    #[arg(short = 's', long = "search")]
    search: Option<String>,

    /// Status filter: all, active, inactive, reserved, static-override.
    #[arg(short = 't', long = "status")]
    status: Option<StatusFilter>,

    /// Output format.
    #[arg(short = 'f', long = "format", value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,

    /// Write output to a file instead of stdout.
    #[arg(short = 'o', long = "output")]
    output: Option<PathBuf>,

    /// Enable debug logging (equivalent to RUST_LOG=debug).
    #[arg(short = 'd', long = "debug")]
    debug: bool,
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        tracing::error!(error = %e, "Fatal error");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    // Resolve platform paths and load configuration. This happens before
    // logging is initialised (the config carries the log level), so any
    // tracing calls inside it are dropped; config errors still surface
    // through the eprintln path in main.
    let platform_paths = platform::config::PlatformPaths::resolve();
    let config_path = cli
        .config
        .unwrap_or_else(|| platform_paths.config_file());
    let config = platform::config::load(&config_path)?;

    // Initialise logging subsystem
    util::logging::init(cli.debug, config.log_level.as_deref());

    tracing::info!(
        version = util::constants::APP_VERSION,
        config = %config_path.display(),
        debug = cli.debug,
        "PeerLens starting"
    );

    // Determine the router URL: CLI override > config
    let base_url = cli
        .url
        .or_else(|| config.router.base_url.clone())
        .ok_or(PeerLensError::Config(ConfigError::MissingBaseUrl))?;

    let source = RouterRestSource::new(&config.router, &base_url).map_err(PeerLensError::Source)?;

    let mut state = ViewState::new(
        config.rules.clone(),
        config.infrastructure_prefixes.clone(),
        config.pool_capacity,
    );
    if let Some(search) = cli.search {
        state.filter_state.text_search = search;
    }
    if let Some(status) = cli.status {
        state.filter_state.status = status;
    }

    // One refresh cycle per invocation: the source polls on demand only.
    state.refresh(&source)?;

    let mut writer = open_output(cli.output.as_deref())?;
    let export_path = cli
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from("(stdout)"));

    match cli.format {
        OutputFormat::Table => {
            print_table(&state, &mut writer, cli.output.as_deref())?;
        }
        OutputFormat::Csv => {
            let snapshot = state.filtered_snapshot();
            let count = export::export_csv(&snapshot, &mut writer, &export_path)
                .map_err(PeerLensError::Export)?;
            tracing::info!(count, "CSV export written");
        }
        OutputFormat::Json => {
            let snapshot = state.filtered_snapshot();
            let count = export::export_json(&snapshot, &mut writer, &export_path)
                .map_err(PeerLensError::Export)?;
            tracing::info!(count, "JSON export written");
        }
    }

    Ok(())
}

/// Open the output target: a file when --output is given, stdout otherwise.
fn open_output(path: Option<&std::path::Path>) -> Result<Box<dyn Write>> {
    match path {
        Some(p) => {
            let file = std::fs::File::create(p).map_err(|e| PeerLensError::Io {
                path: p.to_path_buf(),
                operation: "create",
                source: e,
            })?;
            Ok(Box::new(file))
        }
        None => Ok(Box::new(std::io::stdout())),
    }
}

/// Print the filtered peer list as an aligned table with a stats footer.
fn print_table(
    state: &ViewState,
    writer: &mut Box<dyn Write>,
    output_path: Option<&std::path::Path>,
) -> Result<()> {
    let io_err = |e: std::io::Error| PeerLensError::Io {
        path: output_path
            .map(|p| p.to_path_buf())
            .unwrap_or_else(|| PathBuf::from("(stdout)")),
        operation: "write",
        source: e,
    };

    let rows: Vec<[String; 6]> = state
        .filtered_peers()
        .map(|peer: &Peer| {
            [
                peer.name.clone(),
                peer.tunnel_address.clone(),
                peer.status.label().to_string(),
                peer.last_handshake.clone(),
                peer.endpoint_address.clone(),
                peer.local_networks.join(", "),
            ]
        })
        .collect();

    let headers = [
        "NAME",
        "TUNNEL ADDRESS",
        "STATUS",
        "LAST HANDSHAKE",
        "ENDPOINT",
        "LOCAL NETWORKS",
    ];

    // Column widths: header width or widest cell, whichever is larger.
    let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
    for row in &rows {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.len());
        }
    }

    let format_row = |cells: &[&str]| -> String {
        cells
            .iter()
            .enumerate()
            .map(|(i, cell)| format!("{cell:<width$}", width = widths[i]))
            .collect::<Vec<_>>()
            .join("  ")
    };

    writeln!(writer, "{}", format_row(&headers)).map_err(io_err)?;
    for row in &rows {
        let cells: Vec<&str> = row.iter().map(String::as_str).collect();
        writeln!(writer, "{}", format_row(&cells)).map_err(io_err)?;
    }

    let stats = &state.stats;
    let breakdown = peerlens::core::model::PeerStatus::all()
        .iter()
        .map(|&status| format!("{} {}", status.label().to_lowercase(), stats.count_for(status)))
        .collect::<Vec<_>>()
        .join(", ");
    writeln!(writer).map_err(io_err)?;
    writeln!(
        writer,
        "{} shown of {} peers  |  {}  |  available {}",
        rows.len(),
        stats.total,
        breakdown,
        stats.available
    )
    .map_err(io_err)?;

    if let Some(refreshed) = state.last_refresh {
        writeln!(
            writer,
            "Last refreshed {}",
            refreshed.format("%Y-%m-%d %H:%M:%S UTC")
        )
        .map_err(io_err)?;
    }

    Ok(())
}
