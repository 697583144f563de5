#![warn(clippy::all)]

// main entry point
use clap::Parser;
use log::{error, info, warn};
use pktmeter::network::core::{Device, SimulatedDevice};
use pktmeter::network::format::format_names;
use pktmeter::network::processing::StatsTask;
use pktmeter::settings::{
    default_config_path, load_config, load_config_if_exists, save_config, StatsOptions,
};
use pktmeter::MeterError;
use std::io::Write;
use std::ops::Range;
use std::process::ExitCode;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

/// Meter simulated devices and print throughput statistics
#[derive(Parser, Debug)]
#[command(name = "pktmeter", version)]
struct Cli {
    /// Load stats options from a named config or a TOML file
    #[arg(long = "config", id = "config")]
    config: Option<String>,

    /// Save the effective stats options under this name or path, then exit
    #[arg(long = "save-config", id = "save-config")]
    save_config: Option<String>,

    /// Simulated devices metered in both directions
    #[arg(long = "devices", default_value_t = 1)]
    devices: u16,

    /// Additional simulated devices metered on rx only
    #[arg(long = "rx-only", default_value_t = 0)]
    rx_only: u16,

    /// Additional simulated devices metered on tx only
    #[arg(long = "tx-only", default_value_t = 0)]
    tx_only: u16,

    /// Simulated rate per device and direction in Mpps
    #[arg(long = "mpps", default_value_t = 14.88)]
    mpps: f64,

    /// Simulated frame size in bytes, CRC excluded
    #[arg(long = "frame-size", default_value_t = 60)]
    frame_size: u64,

    /// Stop after this many seconds (0 = run until Ctrl-C)
    #[arg(long = "duration-secs", default_value_t = 0)]
    duration_secs: u64,

    #[command(flatten)]
    stats: StatsOptions,
}

/// Initialize the application logger
///
/// Logs go to stderr with a local timestamp so they never mix with stats
/// written to stdout. `RUST_LOG` overrides the default `info` level.
fn init_logger() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format(|buf, record| {
            writeln!(
                buf,
                "[{}] {} - {}: {}",
                chrono::Local::now().format("%H:%M:%S%.3f"),
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();
}

/// Device ids `first_id..first_id + count`, failing if they run past `u16::MAX`.
fn id_range(first_id: u16, count: u16) -> pktmeter::Result<Range<u16>> {
    let end = first_id.checked_add(count).ok_or_else(|| {
        MeterError::InvalidDevice(format!(
            "{} simulated devices starting at id {} exceed the device id range",
            count, first_id
        ))
    })?;
    Ok(first_id..end)
}

fn simulated(ids: Range<u16>, cli: &Cli) -> Vec<Arc<dyn Device>> {
    ids.map(|id| Arc::new(SimulatedDevice::new(id, cli.mpps, cli.frame_size)) as Arc<dyn Device>)
        .collect()
}

/// Options from `--config`, else the default config if present, else the command line.
fn resolve_options(cli: &Cli) -> pktmeter::Result<StatsOptions> {
    if let Some(name) = &cli.config {
        return load_config(name);
    }

    match default_config_path() {
        Ok(path) => Ok(load_config_if_exists(&path)?.unwrap_or_else(|| cli.stats.clone())),
        Err(e) => {
            warn!("Skipping default configuration: {}", e);
            Ok(cli.stats.clone())
        }
    }
}

fn run(cli: Cli) -> pktmeter::Result<()> {
    let options = resolve_options(&cli)?;

    if let Some(name) = &cli.save_config {
        let path = save_config(name, &options)?;
        info!("Wrote {}", path.display());
        return Ok(());
    }

    let both_ids = id_range(0, cli.devices)?;
    let rx_ids = id_range(both_ids.end, cli.rx_only)?;
    let tx_ids = id_range(rx_ids.end, cli.tx_only)?;

    let devices = simulated(both_ids, &cli);
    let rx_devices = simulated(rx_ids, &cli);
    let tx_devices = simulated(tx_ids, &cli);

    let task = StatsTask::new(&devices, &rx_devices, &tx_devices, &options).map_err(|e| {
        if matches!(e, MeterError::UnknownFormat(_)) {
            error!("Available formats: {}", format_names().join(", "));
        }
        e
    })?;

    let running = Arc::new(AtomicBool::new(true));
    let running_ctrlc = running.clone();
    if let Err(e) = ctrlc::set_handler(move || running_ctrlc.store(false, Ordering::SeqCst)) {
        error!("Failed to install Ctrl-C handler: {}", e);
    }

    let handle = task.spawn(running.clone())?;

    let started = Instant::now();
    let limit = Duration::from_secs(cli.duration_secs);
    while running.load(Ordering::SeqCst) && !handle.is_finished() {
        if cli.duration_secs > 0 && started.elapsed() >= limit {
            info!("Run time of {}s reached", cli.duration_secs);
            running.store(false, Ordering::SeqCst);
        }
        thread::sleep(Duration::from_millis(50));
    }
    running.store(false, Ordering::SeqCst);

    let stats = handle.join().map_err(|_| MeterError::TaskPanicked)??;
    info!("Finalized {} counters", stats.len());
    Ok(())
}

/// Main entry point for the pktmeter demo
fn main() -> ExitCode {
    init_logger();
    let cli = Cli::parse();

    info!("pktmeter starting up");

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
