use clap::{Parser, Subcommand, ValueEnum};
use log::warn;
use serde::Serialize;
use skijump_engine::constants::DESIGN_ANGLE_MAX_DEG;
use skijump_engine::{
    friction_grid, logging, simulate, sweep_friction, Scenario, SimulationParameters, SimulationResult,
    SlopeDirection, SlopeSegment, SweepPoint, TrajectoryPoint,
};
use std::error::Error;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "skijump")]
#[command(version)]
#[command(about = "Airbag ski jump slide and flight calculator", long_about = None)]
struct Cli {
    /// Enable debug logging (RUST_LOG overrides)
    #[arg(short = 'v', long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Args, Clone)]
struct SlideArgs {
    /// Load the slide from a JSON scenario file instead of the flags below
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// Friction coefficient (0 - 0.5)
    #[arg(short = 'f', long, default_value = "0.18")]
    friction: f64,

    /// Drag coefficient Cd (0.1 - 0.9, reserved)
    #[arg(short = 'd', long, default_value = "0.9")]
    drag: f64,

    /// In-run slope angle (degrees)
    #[arg(long, default_value = "40.0")]
    inrun_angle: f64,

    /// In-run slope length (meters)
    #[arg(long, default_value = "43.0")]
    inrun_length: f64,

    /// Transition zone angle (degrees, descending)
    #[arg(long, default_value = "0.0")]
    transition_angle: f64,

    /// Transition zone length (meters, 0 to omit)
    #[arg(long, default_value = "10.0")]
    transition_length: f64,

    /// Kicker angle (degrees, ascending)
    #[arg(long, default_value = "30.0")]
    kicker_angle: f64,

    /// Kicker length (meters)
    #[arg(long, default_value = "11.0")]
    kicker_length: f64,
}

impl SlideArgs {
    fn to_parameters(&self) -> Result<SimulationParameters, Box<dyn Error>> {
        let params = match &self.config {
            Some(path) => Scenario::load(path)?.to_parameters(),
            None => self.flag_parameters(),
        };

        for (i, segment) in params.segments.iter().enumerate() {
            let angle = segment.angle_degrees();
            if angle > DESIGN_ANGLE_MAX_DEG {
                warn!(
                    "segment {} ({}) angle {:.1}° is steeper than the usual {:.0}° design limit",
                    i + 1, segment.direction, angle, DESIGN_ANGLE_MAX_DEG
                );
            }
        }

        Ok(params)
    }

    fn flag_parameters(&self) -> SimulationParameters {
        let mut segments = vec![SlopeSegment::from_degrees(
            SlopeDirection::Descending,
            self.inrun_angle,
            self.inrun_length,
        )];
        // Exactly zero omits the transition; anything else goes to validation
        if self.transition_length != 0.0 {
            segments.push(SlopeSegment::from_degrees(
                SlopeDirection::Descending,
                self.transition_angle,
                self.transition_length,
            ));
        }
        segments.push(SlopeSegment::from_degrees(
            SlopeDirection::Ascending,
            self.kicker_angle,
            self.kicker_length,
        ));

        SimulationParameters::new(self.friction, self.drag, segments)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Simulate one slide and its flight
    Simulate {
        #[command(flatten)]
        slide: SlideArgs,

        /// Number of flight samples for plotting [default: 100, or the scenario's value]
        #[arg(short = 'n', long)]
        samples: Option<usize>,

        /// Output format
        #[arg(short = 'o', long, default_value = "table")]
        output: OutputFormat,

        /// Full output (include ramp profile and trajectory points)
        #[arg(long)]
        full: bool,
    },

    /// Run the same slide over a range of friction coefficients
    Sweep {
        #[command(flatten)]
        slide: SlideArgs,

        /// First friction coefficient
        #[arg(long, default_value = "0.0")]
        from: f64,

        /// Last friction coefficient
        #[arg(long, default_value = "0.5")]
        to: f64,

        /// Number of friction values
        #[arg(long, default_value = "11")]
        steps: usize,

        /// Output format
        #[arg(short = 'o', long, default_value = "table")]
        output: OutputFormat,
    },

    /// Display model information
    Info,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Json,
    Csv,
    Table,
}

#[derive(Debug, Serialize)]
struct SegmentSummary {
    index: usize,
    direction: SlopeDirection,
    angle_deg: f64,
    length_m: f64,
    exit_velocity_mps: f64,
    exit_velocity_kmh: f64,
    elapsed_time_s: f64,
    stalled: bool,
}

#[derive(Debug, Serialize)]
struct SimulationSummary {
    friction_coefficient: f64,
    drag_coefficient: f64,
    segments: Vec<SegmentSummary>,
    exit_velocity_kmh: f64,
    horizontal_range_m: f64,
    max_height_m: f64,
    flight_time_s: f64,
    total_time_s: f64,
    knuckle_distance_m: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    ramp_profile: Option<Vec<[f64; 2]>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    trajectory: Option<Vec<TrajectoryPoint>>,
}

impl SimulationSummary {
    fn new(result: &SimulationResult, full: bool) -> Self {
        Self {
            friction_coefficient: result.parameters.friction_coefficient,
            drag_coefficient: result.parameters.drag_coefficient,
            segments: result
                .segments
                .iter()
                .map(|s| SegmentSummary {
                    index: s.index + 1,
                    direction: s.segment.direction,
                    angle_deg: s.segment.angle_degrees(),
                    length_m: s.segment.length,
                    exit_velocity_mps: s.exit_velocity_mps,
                    exit_velocity_kmh: s.exit_velocity_kmh,
                    elapsed_time_s: s.elapsed_time_s,
                    stalled: s.stalled,
                })
                .collect(),
            exit_velocity_kmh: result.final_exit_velocity_kmh(),
            horizontal_range_m: result.horizontal_range_m(),
            max_height_m: result.max_height_m(),
            flight_time_s: result.flight_time_s(),
            total_time_s: result.total_time_s,
            knuckle_distance_m: result.knuckle_distance_m(),
            ramp_profile: full.then(|| result.ramp_profile().iter().map(|p| [p.x, p.y]).collect()),
            trajectory: full.then(|| result.trajectory().collect()),
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    match cli.command {
        Commands::Simulate { slide, samples, output, full } => {
            let mut params = slide.to_parameters()?;
            if let Some(samples) = samples {
                params.trajectory_samples = samples;
            }

            let result = simulate(params)?;
            if result.stalled() {
                eprintln!("Warning: the slider stalls before the end of the ramp");
            }

            display_simulation(&result, output, full)?;
        },

        Commands::Sweep { slide, from, to, steps, output } => {
            let params = slide.to_parameters()?;
            let grid = friction_grid(from, to, steps);
            let points = sweep_friction(&params, &grid)?;

            display_sweep(&points, output)?;
        },

        Commands::Info => {
            println!("╔════════════════════════════════════════╗");
            println!("║      SKI JUMP ENGINE v{:<17}║", env!("CARGO_PKG_VERSION"));
            println!("╠════════════════════════════════════════╣");
            println!("║ Airbag ski jump slide calculator.      ║");
            println!("╠════════════════════════════════════════╣");
            println!("║ Model:                                 ║");
            println!("║ • Work-energy balance per segment      ║");
            println!("║ • Coulomb friction, g = 9.81 m/s²      ║");
            println!("║ • Drag-free parabolic flight           ║");
            println!("║ • Knuckle at 65% of flight range       ║");
            println!("╚════════════════════════════════════════╝");
        }
    }

    Ok(())
}

fn display_simulation(result: &SimulationResult, format: OutputFormat, full: bool) -> Result<(), Box<dyn Error>> {
    match format {
        OutputFormat::Json => {
            let summary = SimulationSummary::new(result, full);
            println!("{}", serde_json::to_string_pretty(&summary)?);
        },

        OutputFormat::Csv => {
            println!("metric,value");
            for s in &result.segments {
                println!("segment_{}_exit_velocity_kmh,{:.2}", s.index + 1, s.exit_velocity_kmh);
                println!("segment_{}_time_s,{:.2}", s.index + 1, s.elapsed_time_s);
            }
            println!("horizontal_range_m,{:.2}", result.horizontal_range_m());
            println!("max_height_m,{:.2}", result.max_height_m());
            println!("flight_time_s,{:.2}", result.flight_time_s());
            println!("total_time_s,{:.2}", result.total_time_s);
            println!("knuckle_distance_m,{:.2}", result.knuckle_distance_m());

            if full {
                println!();
                println!("time,x,y");
                for p in result.trajectory() {
                    println!("{:.3},{:.3},{:.3}", p.time_s, p.x, p.y);
                }
            }
        },

        OutputFormat::Table => {
            println!("╔════════════════════════════════════════╗");
            println!("║         SLIDE RESULTS                  ║");
            println!("╠════════════════════════════════════════╣");
            for s in &result.segments {
                println!("║ Segment {} exit:    {:>8.1} km/h       ║", s.index + 1, s.exit_velocity_kmh);
            }
            println!("╠════════════════════════════════════════╣");
            println!("║ Flight Distance:   {:>8.2} m          ║", result.horizontal_range_m());
            println!("║ Max Height:        {:>8.2} m          ║", result.max_height_m());
            println!("║ Flight Time:       {:>8.2} s          ║", result.flight_time_s());
            println!("║ Total Time:        {:>8.2} s          ║", result.total_time_s);
            println!("║ Knuckle Distance:  {:>8.2} m          ║", result.knuckle_distance_m());
            println!("╚════════════════════════════════════════╝");

            if full {
                println!("\nRamp Profile:");
                println!("┌──────────┬──────────┐");
                println!("│  X (m)   │  Y (m)   │");
                println!("├──────────┼──────────┤");
                for p in result.ramp_profile() {
                    println!("│ {:>8.2} │ {:>8.2} │", p.x, p.y);
                }
                println!("└──────────┴──────────┘");

                println!("\nFlight Points:");
                println!("┌──────────┬──────────┬──────────┐");
                println!("│ Time (s) │  X (m)   │  Y (m)   │");
                println!("├──────────┼──────────┼──────────┤");
                for p in result.trajectory() {
                    println!("│ {:>8.3} │ {:>8.2} │ {:>8.2} │", p.time_s, p.x, p.y);
                }
                println!("└──────────┴──────────┴──────────┘");
            }
        },
    }

    Ok(())
}

fn display_sweep(points: &[SweepPoint], format: OutputFormat) -> Result<(), Box<dyn Error>> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(points)?);
        },

        OutputFormat::Csv => {
            println!("friction,exit_velocity_kmh,horizontal_range_m,max_height_m,knuckle_distance_m,total_time_s,stalled");
            for p in points {
                println!("{:.3},{:.2},{:.2},{:.2},{:.2},{:.2},{}",
                    p.friction_coefficient, p.exit_velocity_kmh, p.horizontal_range_m,
                    p.max_height_m, p.knuckle_distance_m, p.total_time_s, p.stalled);
            }
        },

        OutputFormat::Table => {
            println!("┌──────────┬──────────┬──────────┬──────────┬──────────┐");
            println!("│    μ     │ Exit km/h│ Range (m)│ Knuckle m│ Total (s)│");
            println!("├──────────┼──────────┼──────────┼──────────┼──────────┤");
            for p in points {
                println!("│ {:>8.3} │ {:>8.1} │ {:>8.2} │ {:>8.2} │ {:>8.2} │",
                    p.friction_coefficient, p.exit_velocity_kmh, p.horizontal_range_m,
                    p.knuckle_distance_m, p.total_time_s);
            }
            println!("└──────────┴──────────┴──────────┴──────────┴──────────┘");
        },
    }

    Ok(())
}
