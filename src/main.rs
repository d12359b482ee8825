//! Water-tank sensor simulator entry point.

use std::net::IpAddr;

use clap::{Parser, Subcommand};
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use tank_sim::api::{create_router, AppState};
use tank_sim::config::Config;
use tank_sim::metrics;
use tank_sim::tank::SensorState;
use tank_sim::utils::{log_reachable_addresses, shutdown_signal};
use tank_sim::SimError;

/// Simulated ultrasonic water-tank level sensor.
#[derive(Parser, Debug)]
#[command(name = "tank-sim")]
#[command(about = "Serve a simulated water-tank level sensor over HTTP")]
#[command(version)]
struct Args {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,

    /// HTTP server port (overrides PORT).
    #[arg(short, long)]
    port: Option<u16>,

    /// Address to bind (overrides BIND_ADDRESS).
    #[arg(short, long)]
    bind: Option<IpAddr>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the simulator HTTP server (default).
    Serve {
        /// HTTP server port (overrides PORT).
        #[arg(short, long)]
        port: Option<u16>,

        /// Address to bind (overrides BIND_ADDRESS).
        #[arg(short, long)]
        bind: Option<IpAddr>,
    },

    /// Check configuration validity.
    CheckConfig,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Initialize logging
    let filter = if args.verbose {
        EnvFilter::new("tank_sim=debug,info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    match args.command {
        Some(Command::CheckConfig) => cmd_check_config(),
        Some(Command::Serve { port, bind }) => cmd_serve(port, bind).await,
        None => cmd_serve(args.port, args.bind).await,
    }
}

/// Load, override and validate configuration.
fn load_config(port: Option<u16>, bind: Option<IpAddr>) -> Result<Config, SimError> {
    let mut config = Config::load()?;

    if let Some(port) = port {
        config.port = port;
    }
    if let Some(bind) = bind {
        config.bind_address = bind;
    }

    config.validate()?;
    Ok(config)
}

/// Check configuration validity.
fn cmd_check_config() -> anyhow::Result<()> {
    println!("======================================================================");
    println!("TANK SIMULATOR - CONFIGURATION CHECK");
    println!("======================================================================");

    print!("Loading configuration... ");
    let config = match load_config(None, None) {
        Ok(c) => {
            println!("OK");
            c
        }
        Err(e) => {
            println!("FAILED");
            println!("  Error: {}", e);
            return Err(anyhow::anyhow!("Configuration check failed"));
        }
    };

    let reading = config.geometry().reading(config.initial_distance_mm);

    println!("----------------------------------------------------------------------");
    println!("Configuration Summary:");
    println!("  Listen Address: {}", config.socket_addr());
    println!("  Tank Height: {} mm", config.tank_height_mm);
    println!("  Max Water Level: {} mm", config.max_water_level_mm);
    println!("  Jitter: +/-{} mm", config.jitter_mm);
    println!(
        "  Random Range: {}..={} mm",
        config.random_min_mm, config.random_max_mm
    );
    println!(
        "  Initial Reading: distance {:.1} mm, level {:.1} mm, {:.1}%",
        reading.distance_mm, reading.water_level_mm, reading.percent
    );
    println!("======================================================================");
    println!("CONFIGURATION CHECK PASSED");
    println!("======================================================================");

    Ok(())
}

/// Run the simulator HTTP server until shutdown.
async fn cmd_serve(port: Option<u16>, bind: Option<IpAddr>) -> anyhow::Result<()> {
    info!("Loading configuration...");
    let config = load_config(port, bind).map_err(|e| {
        error!("Failed to load configuration: {}", e);
        e
    })?;

    let handle = metrics::install_recorder().map_err(SimError::from)?;

    let sensor = SensorState::new(config.sensor_settings());
    let initial = sensor.current();
    info!(
        "Tank: height {} mm, full at {} mm",
        config.tank_height_mm, config.max_water_level_mm
    );
    let settings = sensor.settings();
    info!(
        "Simulation: jitter +/-{} mm, random range {}..={} mm",
        settings.jitter_mm, settings.random_min_mm, settings.random_max_mm
    );
    info!(
        "Initial reading: distance {:.1} mm, level {:.1} mm, {:.1}%",
        initial.distance_mm, initial.water_level_mm, initial.percent
    );

    let app_state = AppState::new(sensor).with_metrics(handle);
    let router = create_router(app_state);

    let addr = config.socket_addr();
    let listener = TcpListener::bind(addr).await.map_err(|e| {
        error!("Failed to bind {}: {}", addr, e);
        SimError::from(e)
    })?;
    info!("HTTP server listening on {}", addr);
    log_reachable_addresses(config.port);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}
