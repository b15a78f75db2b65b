use clap::{Parser, Subcommand, ValueEnum};
use radial_heat_core::solver::{PhysicalInputs, SimulationConfig};
use radial_heat_core::{ConductionRun, FreeFall, RunSummary, Snapshot, SnapshotSink};
use std::process::ExitCode;
use tracing::error;
use tracing_subscriber::EnvFilter;

/// Radial heat conduction and free-fall demos
#[derive(Parser, Debug)]
#[command(name = "radial-heat-demo")]
#[command(about = "Explicit heat conduction and free-fall integrators", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Heat a 4 cm slab of beef in boiling water and print the profile
    Conduction {
        /// Output format for snapshots
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },
    /// Drop a body and print `t x v` until it reaches the ground
    Freefall {
        /// Initial downward velocity in m/s
        #[arg(short = 'v', long, allow_hyphen_values = true)]
        initial_velocity: f64,

        /// Initial height in m
        #[arg(short = 'x', long, allow_hyphen_values = true)]
        initial_height: f64,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// One row per snapshot with centre / mean / surface temperatures
    Table,
    /// One JSON object per snapshot
    Json,
}

/// Prints one text row per snapshot
struct TableSink;

impl SnapshotSink for TableSink {
    fn on_snapshot(&mut self, snapshot: Snapshot, _config: &SimulationConfig) {
        let field = &snapshot.field;
        println!(
            "{:>6} | {:>8.0} | {:>8.2} | {:>8.2} | {:>8.2}",
            snapshot.frame_label(),
            snapshot.elapsed.value(),
            field.center().unwrap_or(f64::NAN),
            field.mean().unwrap_or(f64::NAN),
            field.boundary().unwrap_or(f64::NAN)
        );
    }

    fn on_complete(&mut self, summary: &RunSummary) {
        println!("\n=== Conduction Complete ===");
        println!("Steps: {}", summary.steps_completed);
        println!("Snapshots: {}", summary.snapshots_emitted);
        println!("Final time: {}", summary.final_time);
        if let Some(centre) = summary.final_field.center() {
            println!("Final centre temperature: {centre:.2}°C");
        }
    }
}

/// Prints one JSON line per snapshot
struct JsonSink;

impl SnapshotSink for JsonSink {
    fn on_snapshot(&mut self, snapshot: Snapshot, _config: &SimulationConfig) {
        match serde_json::to_string(&snapshot) {
            Ok(line) => println!("{line}"),
            Err(e) => error!("Failed to serialize snapshot {}: {}", snapshot.iteration, e),
        }
    }
}

fn run_conduction(format: OutputFormat) -> Result<(), Box<dyn std::error::Error>> {
    let inputs = PhysicalInputs::default();
    let config = SimulationConfig::from_inputs(&inputs)?;
    let run = ConductionRun::new(config)?;

    match format {
        OutputFormat::Table => {
            println!("=== Radial Heat Conduction ===\n");
            println!(
                "[{:.0} cm {}, init {}, boundary {}]",
                (inputs.half_extent * 2.0).to_centimeters(),
                inputs.geometry,
                inputs.temp_init,
                inputs.temp_boundary
            );
            println!(
                "nr={}, delta_t={:.3}s, nstep={}, stability={:.4}\n",
                config.nr(),
                config.delta_t(),
                config.nstep(),
                config.stability_number()
            );
            println!(" Frame | Time (s) |   Centre |     Mean |  Surface");
            println!("-------|----------|----------|----------|---------");
            run.run(&mut TableSink);
        }
        OutputFormat::Json => {
            run.run(&mut JsonSink);
        }
    }
    Ok(())
}

fn run_freefall(
    initial_velocity: f64,
    initial_height: f64,
) -> Result<(), Box<dyn std::error::Error>> {
    let fall = FreeFall::new(initial_velocity, initial_height)?;
    for state in fall.trajectory() {
        println!("{state}");
    }
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let result = match args.command {
        Command::Conduction { format } => run_conduction(format),
        Command::Freefall {
            initial_velocity,
            initial_height,
        } => run_freefall(initial_velocity, initial_height),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
