use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use env_logger::{Builder, WriteStyle};
use log::LevelFilter;
use meshsensor_tools::{
    decode_status, describe_registry, load_registry, parse_hex, run_dispatch, DispatchReport,
    ModelKind, SensorSummary, StatusEntry,
};
use serde::Serialize;

#[derive(Parser)]
#[command(
    name = "meshsensor-tools",
    version,
    about = "meshsensor registry and message tools"
)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace). RUST_LOG overrides.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Pretty, global = true)]
    format: OutputFormat,

    /// Largest accepted access message in bytes.
    #[arg(long, global = true)]
    max_message_bytes: Option<usize>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List the sensors of a registry.
    Describe {
        /// Registry JSON file.
        registry: PathBuf,
    },
    /// Dispatch a hex-encoded request (opcode + payload) through a model.
    Dispatch {
        /// Registry JSON file.
        registry: PathBuf,
        /// Request bytes, e.g. "82 30 56 00".
        request: String,
        /// Model receiving the request.
        #[arg(long, value_enum, default_value_t = ModelArg::Server)]
        model: ModelArg,
    },
    /// Decode a hex-encoded Descriptor Status message.
    DecodeStatus {
        /// Message bytes, opcode included.
        message: String,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormat {
    Json,
    Pretty,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ModelArg {
    Server,
    Setup,
}

impl From<ModelArg> for ModelKind {
    fn from(arg: ModelArg) -> Self {
        match arg {
            ModelArg::Server => Self::Server,
            ModelArg::Setup => Self::Setup,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut limits = wire::Limits::default();
    if let Some(max) = cli.max_message_bytes {
        limits.max_message_bytes = max;
    }

    match cli.command {
        Command::Describe { registry } => {
            let registry = load_registry(&registry).context("load registry")?;
            let summary = describe_registry(&registry)?;
            emit(cli.format, summary.as_slice(), print_summary)?;
        }
        Command::Dispatch {
            registry,
            request,
            model,
        } => {
            let registry = load_registry(&registry).context("load registry")?;
            let request = parse_hex(&request)?;
            let report = run_dispatch(Arc::new(registry), model.into(), &request, &limits);
            emit(cli.format, &report, print_dispatch)?;
        }
        Command::DecodeStatus { message } => {
            let bytes = parse_hex(&message)?;
            let entries = decode_status(&bytes, &limits)?;
            emit(cli.format, entries.as_slice(), print_entries)?;
        }
    }
    Ok(())
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    let mut builder = Builder::new();
    builder.filter_level(level).write_style(WriteStyle::Auto);
    if let Ok(filters) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filters);
    }
    builder.init();
}

fn emit<T: Serialize + ?Sized>(format: OutputFormat, value: &T, pretty: fn(&T)) -> Result<()> {
    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(value).context("serialize json")?;
            println!("{json}");
        }
        OutputFormat::Pretty => pretty(value),
    }
    Ok(())
}

fn print_summary(sensors: &[SensorSummary]) {
    println!("{} sensors", sensors.len());
    for sensor in sensors {
        println!("0x{:04X}: {}", sensor.id, sensor.entry_hex);
        println!(
            "  tolerance: +{} / -{}",
            percent(sensor.tolerance_pos_percent),
            percent(sensor.tolerance_neg_percent)
        );
        println!("  sampling: {}", sensor.sampling_function);
        println!(
            "  period: {} interval: {}",
            seconds(sensor.period_secs),
            seconds(sensor.interval_secs)
        );
        if !sensor.settings.is_empty() {
            let ids: Vec<String> = sensor
                .settings
                .iter()
                .map(|id| format!("0x{id:04X}"))
                .collect();
            println!("  settings: {}", ids.join(", "));
        }
    }
}

fn print_dispatch(report: &DispatchReport) {
    println!("model 0x{:04X}: {}", report.model_id, report.outcome);
    if let Some(reply) = &report.reply_hex {
        println!("reply: {reply}");
    }
}

fn print_entries(entries: &[StatusEntry]) {
    for entry in entries {
        match entry {
            StatusEntry::Known {
                id,
                tolerance_pos,
                tolerance_neg,
                sampling_func,
                period,
                interval,
            } => println!(
                "0x{id:04X}: tolerance +{tolerance_pos}/-{tolerance_neg} sampling {sampling_func} period {period} interval {interval}"
            ),
            StatusEntry::Unknown { id } => println!("0x{id:04X}: unknown property"),
        }
    }
}

fn percent(value: Option<f64>) -> String {
    value.map_or_else(|| "unspecified".to_string(), |v| format!("{v:.2}%"))
}

fn seconds(value: Option<f64>) -> String {
    value.map_or_else(|| "n/a".to_string(), |v| format!("{v:.3}s"))
}
