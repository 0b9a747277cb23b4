use circuit_routes::config::RouteConfig;
use circuit_routes::logging::init_logger;
use circuit_routes::utils::point_source::JsonFileSource;
use circuit_routes::{Result, RouteService};

use clap::{Parser, Subcommand};
use log::LevelFilter;
use serde::Serialize;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(name = "circuit_routes", about = "Route computation over race circuits")]
struct Cli {
    /// JSON array of {name, latitude, longitude} records
    #[arg(long, global = true, default_value = "data/circuits.json")]
    points: PathBuf,

    /// Optional JSON configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "warn")]
    log_level: LevelFilter,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Heuristic tour: nearest neighbour + 2-opt
    Nearest,
    /// Shortest path between two circuits
    Dijkstra {
        #[arg(long)]
        origin: String,
        #[arg(long)]
        destination: String,
    },
    /// Level traversal where circuits within max-km are connected
    Bfs {
        #[arg(long)]
        start: String,
        #[arg(long)]
        max_km: Option<f64>,
    },
    /// Branch & bound tour from an origin
    BranchBound {
        #[arg(long)]
        origin: Option<String>,
        #[arg(long)]
        time_limit_ms: Option<u64>,
        #[arg(long)]
        max_nodes: Option<usize>,
        #[arg(long)]
        expansion_limit: Option<usize>,
    },
    /// Edges of the threshold graph
    Connections {
        #[arg(long)]
        max_km: Option<f64>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    if let Err(e) = init_logger(cli.log_level) {
        eprintln!("{e}");
        return ExitCode::FAILURE;
    }

    match run(cli) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("{e}");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<String> {
    let mut config = match &cli.config {
        Some(path) => RouteConfig::from_json_file(path)?,
        None => RouteConfig::default(),
    };

    if let Command::BranchBound {
        time_limit_ms,
        max_nodes,
        expansion_limit,
        ..
    } = &cli.command
    {
        let limits = &mut config.branch_bound;
        limits.time_limit_ms = time_limit_ms.or(limits.time_limit_ms);
        limits.max_nodes = max_nodes.or(limits.max_nodes);
        limits.expansion_limit = expansion_limit.or(limits.expansion_limit);
    }

    let service = RouteService::with_config(JsonFileSource::new(&cli.points), config);

    match &cli.command {
        Command::Nearest => to_json(&service.nearest()?),
        Command::Dijkstra {
            origin,
            destination,
        } => to_json(&service.dijkstra(origin, destination)?),
        Command::Bfs { start, max_km } => to_json(&service.bfs(start, *max_km)?),
        Command::BranchBound { origin, .. } => to_json(&service.branch_bound(origin.as_deref())?),
        Command::Connections { max_km } => to_json(&service.connections(*max_km)?),
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).map_err(|e| {
        circuit_routes::RouteError::invalid_argument(format!("failed to serialize response: {e}"))
    })
}
