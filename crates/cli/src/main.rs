//! Command-line front end for the Gaussian plume dispersion core.
//!
//! Runs the model in single-point or grid mode, prints previews, exports
//! CSV, and renders a terminal heatmap of a height slice. All numeric
//! parameters default to the built-in demonstration scenario; pass
//! `--interactive` to be prompted for each one instead.
//!
//! # Usage
//!
//! ```bash
//! cargo run --package plume-cli -- --single
//! cargo run --package plume-cli -- --downwind 5 --lateral 800 --csv
//! cargo run --package plume-cli -- --heatmap 10 --preview
//! ```

use clap::Parser;
use plume_sim_core::{
    classify, AmbientState, ConcentrationGrid, EmissionState, GridSpec, Scenario, SkyCondition,
    SourceGeometry, StabilityClass,
};
use std::error::Error;
use std::io::{self, BufWriter, Write};

/// Gaussian plume stack-dispersion model with configurable parameters
#[derive(Parser, Debug)]
#[command(name = "plume-cli")]
#[command(about = "Stack dispersion model (Gaussian plume, total ground reflection)", long_about = None)]
struct Args {
    /// Stability class A-F
    #[arg(short = 'c', long, default_value = "D")]
    class: String,

    /// Derive the class from wind speed and sky condition instead of
    /// --class (strong, moderate, slight, night-low, night-moderate)
    #[arg(long)]
    sky: Option<String>,

    /// Downwind extent [km]
    #[arg(short = 'x', long, default_value_t = 10)]
    downwind: u32,

    /// Lateral half-extent [m]
    #[arg(short = 'y', long, default_value_t = 1500)]
    lateral: u32,

    /// Vertical extent [m]
    #[arg(short = 'z', long, default_value_t = 20)]
    height: u32,

    /// Stack height [m]
    #[arg(long, default_value_t = 120.0)]
    stack_height: f64,

    /// Stack diameter [m]
    #[arg(long, default_value_t = 1.2)]
    stack_diameter: f64,

    /// Ambient air pressure [kPa]
    #[arg(long, default_value_t = 95.0)]
    pressure: f64,

    /// Wind speed [m/s]
    #[arg(short = 'w', long, default_value_t = 4.5)]
    wind_speed: f64,

    /// Ambient temperature [K]
    #[arg(long, default_value_t = 298.15)]
    air_temp: f64,

    /// Stack exit temperature [K]
    #[arg(long, default_value_t = 588.15)]
    stack_temp: f64,

    /// Emission rate [g/s or Ci/s]
    #[arg(short = 'q', long, default_value_t = 1656.2)]
    emission_rate: f64,

    /// Emission exit velocity [m/s]
    #[arg(long, default_value_t = 10.0)]
    emission_velocity: f64,

    /// Height resolution [m]
    #[arg(long, default_value_t = 10)]
    height_step: u32,

    /// Downwind resolution [m]
    #[arg(long, default_value_t = 100)]
    downwind_step: u32,

    /// Lateral resolution [m]
    #[arg(long, default_value_t = 100)]
    lateral_step: u32,

    /// Single-point mode: one concentration at the sample-box corner
    #[arg(short, long)]
    single: bool,

    /// Prompt for every parameter instead of reading flags
    #[arg(short, long)]
    interactive: bool,

    /// Print the atmospheric conditions reference table and exit
    #[arg(long)]
    stability_table: bool,

    /// Print a preview table of the grid results
    #[arg(short, long)]
    preview: bool,

    /// Write grid results to CSV; default name
    /// {downwind}x{lateral}x{height}-stack_dispersion.csv
    #[arg(long, value_name = "PATH", num_args = 0..=1, default_missing_value = "")]
    csv: Option<String>,

    /// Render a terminal heatmap of the height slice at this height [m]
    #[arg(long, value_name = "HEIGHT_M")]
    heatmap: Option<u32>,

    /// Load the scenario from a JSON file (overrides parameter flags)
    #[arg(long, value_name = "PATH")]
    scenario: Option<String>,

    /// Save the resolved scenario to a JSON file
    #[arg(long, value_name = "PATH")]
    save_scenario: Option<String>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    if args.stability_table {
        print_stability_reference();
        return;
    }

    if let Err(e) = run(&args) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), Box<dyn Error>> {
    println!("=== Atmospheric Stack Dispersion (Gaussian plume) ===\n");

    let scenario = resolve_scenario(args)?;
    scenario.validate()?;

    if let Some(path) = &args.save_scenario {
        scenario.save(path)?;
        println!("Saved scenario to {path}");
    }

    let effective = scenario.effective_height()?;
    println!(
        "Stability class {} | effective stack height {:.2} m (stack {:.1} m + rise {:.2} m)\n",
        scenario.stability,
        effective,
        scenario.source.stack_height_m,
        effective - scenario.source.stack_height_m
    );

    if args.single {
        let concentration = scenario.single_point()?;
        println!(
            "Concentration at D{}km / L{}m / H{}m: {:.10}",
            scenario.grid.downwind_km, scenario.grid.lateral_half_m, scenario.grid.max_height_m,
            concentration
        );
        return Ok(());
    }

    let grid = scenario.sweep()?;
    let (heights, downwinds, laterals) = grid.dims();
    println!(
        "Swept {} cells ({} heights x {} downwind x {} lateral), peak {:.10}",
        heights * downwinds * laterals,
        heights,
        downwinds,
        laterals,
        grid.max_sample()
    );

    if args.preview {
        print_preview(&grid);
    }

    if let Some(path) = &args.csv {
        let path = if path.is_empty() {
            format!(
                "{}x{}x{}-stack_dispersion.csv",
                scenario.grid.downwind_km, scenario.grid.lateral_half_m, scenario.grid.max_height_m
            )
        } else {
            path.clone()
        };
        write_csv(&grid, &path)?;
        println!("Wrote {path}");
    }

    if let Some(height_m) = args.heatmap {
        render_heatmap(&grid, height_m)?;
    }

    Ok(())
}

/// Build the scenario from prompts, a JSON file, or parameter flags.
fn resolve_scenario(args: &Args) -> Result<Scenario, Box<dyn Error>> {
    if args.interactive {
        return prompt_scenario(args);
    }
    if let Some(path) = &args.scenario {
        return Ok(Scenario::load(path)?);
    }

    let stability = if let Some(sky) = &args.sky {
        classify(args.wind_speed, parse_sky(sky)?)?
    } else {
        args.class.parse::<StabilityClass>()?
    };

    Ok(Scenario {
        stability,
        source: SourceGeometry {
            stack_height_m: args.stack_height,
            stack_diameter_m: args.stack_diameter,
        },
        emission: EmissionState {
            rate: args.emission_rate,
            exit_velocity_m_s: args.emission_velocity,
        },
        ambient: AmbientState {
            wind_speed_m_s: args.wind_speed,
            pressure_kpa: args.pressure,
            air_temp_k: args.air_temp,
            stack_temp_k: args.stack_temp,
        },
        grid: GridSpec {
            downwind_km: args.downwind,
            lateral_half_m: args.lateral,
            max_height_m: args.height,
            height_step_m: args.height_step,
            downwind_step_m: args.downwind_step,
            lateral_step_m: args.lateral_step,
        },
    })
}

fn parse_sky(name: &str) -> Result<SkyCondition, String> {
    match name.to_lowercase().as_str() {
        "strong" => Ok(SkyCondition::DayStrongInsolation),
        "moderate" => Ok(SkyCondition::DayModerateInsolation),
        "slight" => Ok(SkyCondition::DaySlightInsolation),
        "night-low" => Ok(SkyCondition::NightLowCloud),
        "night-moderate" => Ok(SkyCondition::NightModerateCloud),
        other => Err(format!(
            "unknown sky condition '{other}', expected strong, moderate, slight, night-low, or night-moderate"
        )),
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Interactive prompting
// ═══════════════════════════════════════════════════════════════════════════

/// Attempts allowed per prompt before giving up
const MAX_PROMPT_ATTEMPTS: u32 = 3;

/// Prompt until the reply parses as a float, up to the attempt limit.
fn prompt_f64(prompt: &str) -> Result<f64, Box<dyn Error>> {
    for _ in 0..MAX_PROMPT_ATTEMPTS {
        let reply = read_reply(prompt)?;
        match reply.parse::<f64>() {
            Ok(value) => return Ok(value),
            Err(_) => println!("'{reply}' is not valid. Argument must be a number."),
        }
    }
    Err("maximum number of attempts exceeded".into())
}

/// Prompt until the reply is one of the allowed options.
fn prompt_choice(prompt: &str, options: &[&str]) -> Result<String, Box<dyn Error>> {
    for _ in 0..MAX_PROMPT_ATTEMPTS {
        let reply = read_reply(prompt)?.to_uppercase();
        if options.contains(&reply.as_str()) {
            return Ok(reply);
        }
        println!("'{reply}' is not valid. Options: {options:?}");
    }
    Err("maximum number of attempts exceeded".into())
}

fn read_reply(prompt: &str) -> Result<String, Box<dyn Error>> {
    print!("{prompt}");
    io::stdout().flush()?;
    let mut reply = String::new();
    io::stdin().read_line(&mut reply)?;
    Ok(reply.trim().to_string())
}

/// Gather a full scenario from prompts; extents and steps fall back to the
/// flag values.
fn prompt_scenario(args: &Args) -> Result<Scenario, Box<dyn Error>> {
    print_stability_reference();
    let class = prompt_choice(
        "Atmospheric category [A/B/C/D/E/F]: ",
        &["A", "B", "C", "D", "E", "F"],
    )?;

    let downwind = prompt_f64("Downwind distance [km]: ")? as u32;
    let lateral = prompt_f64("Lateral distance [m]: ")? as u32;
    let height = prompt_f64("Vertical distance [m]: ")? as u32;

    Ok(Scenario {
        stability: class.parse::<StabilityClass>()?,
        source: SourceGeometry {
            stack_height_m: prompt_f64("Stack height [m]: ")?,
            stack_diameter_m: prompt_f64("Stack diameter [m]: ")?,
        },
        ambient: AmbientState {
            pressure_kpa: prompt_f64("Ambient air pressure [kPa]: ")?,
            wind_speed_m_s: prompt_f64("Wind speed [m/s]: ")?,
            air_temp_k: prompt_f64("Ambient temperature [K]: ")?,
            stack_temp_k: prompt_f64("Stack temperature [K]: ")?,
        },
        emission: EmissionState {
            rate: prompt_f64("Emission rate [g/s]: ")?,
            exit_velocity_m_s: prompt_f64("Emission velocity [m/s]: ")?,
        },
        grid: GridSpec {
            downwind_km: downwind,
            lateral_half_m: lateral,
            max_height_m: height,
            height_step_m: args.height_step,
            downwind_step_m: args.downwind_step,
            lateral_step_m: args.lateral_step,
        },
    })
}

// ═══════════════════════════════════════════════════════════════════════════
// Output rendering
// ═══════════════════════════════════════════════════════════════════════════

/// Print the Turner surface classification table for reference.
fn print_stability_reference() {
    println!("-------------------------------------------------------");
    println!("                Atmospheric Conditions");
    println!("-------------------------------------------------------");
    println!("            |        Day        |       Night");
    println!(" Wind [m/s] | Strong Mod. Slight| Low cld  Mod. cld");
    println!("------------|-------------------|------------------");
    println!("     <2     |   A    A-B    B   |    -        -");
    println!("    2-3     |  A-B    B     C   |    E        F");
    println!("    3-5     |   B    B-C    C   |    D        E");
    println!("    5-6     |   C    C-D    D   |    D        D");
    println!("     >6     |   C     D     D   |    D        D");
    println!("-------------------------------------------------------");
    println!("*Wind speed is at a height of 10m");
    println!("*Day is an estimation of solar radiation");
    println!("*Night is an estimation of cloud cover");
    println!("*Category 'D' can be assumed for all overcast");
    println!("    conditions, regardless of wind speed");
    println!("*Split cells (e.g. A-B) resolve to the first class");
    println!("-------------------------------------------------------");
}

/// Print a trimmed table per height slice: up to 12 downwind rows and 7
/// lateral columns, sampled evenly with the extremes kept.
fn print_preview(grid: &ConcentrationGrid) {
    let spec = grid.spec();
    let (heights, downwinds, laterals) = grid.dims();
    let row_picks = sample_indices(downwinds, 12);
    let col_picks = sample_indices(laterals, 7);
    let lateral_labels = spec.lateral_labels();
    let downwind_labels = spec.downwind_labels();

    for (i, height_label) in spec.height_labels().iter().enumerate().take(heights) {
        println!("\n--- Slice {height_label} ---");
        print!("{:>10}", "");
        for &k in &col_picks {
            print!(" {:>13}", lateral_labels[k]);
        }
        println!();
        for &j in &row_picks {
            print!("{:>10}", downwind_labels[j]);
            for &k in &col_picks {
                print!(" {:>13.6e}", grid.at(i, j, k));
            }
            println!();
        }
    }
    println!();
}

/// Evenly sample up to `max` indices out of `count`, always keeping the
/// first and last.
fn sample_indices(count: usize, max: usize) -> Vec<usize> {
    if count <= max {
        return (0..count).collect();
    }
    let mut picks: Vec<usize> = (0..max)
        .map(|i| i * (count - 1) / (max - 1))
        .collect();
    picks.dedup();
    picks
}

/// Write the grid as one 2D block per height slice: downwind rows, lateral
/// columns. One file per run.
fn write_csv(grid: &ConcentrationGrid, path: &str) -> Result<(), Box<dyn Error>> {
    let spec = grid.spec();
    let (heights, downwinds, laterals) = grid.dims();
    let downwind_labels = spec.downwind_labels();
    let lateral_labels = spec.lateral_labels();

    let file = std::fs::File::create(path)?;
    let mut out = BufWriter::new(file);

    for (i, height_label) in spec.height_labels().iter().enumerate().take(heights) {
        write!(out, "{height_label}")?;
        for label in &lateral_labels {
            write!(out, ",{label}")?;
        }
        writeln!(out)?;

        for j in 0..downwinds {
            write!(out, "{}", downwind_labels[j])?;
            for k in 0..laterals {
                write!(out, ",{:.10}", grid.at(i, j, k))?;
            }
            writeln!(out)?;
        }
        writeln!(out)?;
    }
    out.flush()?;
    Ok(())
}

/// Shade ramp for the heatmap, faintest first
const SHADE_RAMP: [char; 5] = ['\u{b7}', '\u{2591}', '\u{2592}', '\u{2593}', '\u{2588}'];

/// Render one height slice as a character heatmap: downwind rows (stack at
/// the top), lateral columns, shaded by fraction of the slice maximum.
fn render_heatmap(grid: &ConcentrationGrid, height_m: u32) -> Result<(), Box<dyn Error>> {
    let spec = grid.spec();
    if height_m % spec.height_step_m != 0 || height_m > spec.max_height_m {
        return Err(format!(
            "height {height_m} m is not a grid level (step {} m, max {} m)",
            spec.height_step_m, spec.max_height_m
        )
        .into());
    }
    let slice_idx = (height_m / spec.height_step_m) as usize;
    let (_, downwinds, laterals) = grid.dims();

    let slice = grid.height_slice(slice_idx);
    let peak = slice.iter().copied().fold(0.0, f64::max);

    println!("\nStack Dispersion Heatmap | Height: {height_m}m");
    if peak <= 0.0 {
        println!("(slice is all zero)");
        return Ok(());
    }
    println!(
        "Legend: {} <20%  {} <40%  {} <60%  {} <80%  {} >=80% of peak {:.3e}\n",
        SHADE_RAMP[0], SHADE_RAMP[1], SHADE_RAMP[2], SHADE_RAMP[3], SHADE_RAMP[4], peak
    );

    for j in 0..downwinds {
        print!("{:>7.1} \u{2502} ", spec.downwind_at(j));
        for k in 0..laterals {
            let fraction = grid.at(slice_idx, j, k) / peak;
            let shade = if fraction <= 0.0 {
                ' '
            } else {
                let bucket = ((fraction * 5.0) as usize).min(4);
                SHADE_RAMP[bucket]
            };
            print!("{shade} ");
        }
        println!();
    }

    // Lateral axis
    print!("        \u{2514}");
    for _ in 0..laterals {
        print!("\u{2500}\u{2500}");
    }
    println!();
    print!("          ");
    for k in (0..laterals).step_by(5) {
        print!("{:<10}", spec.lateral_at(k) as i64);
    }
    println!("\nDownwind axis in km, lateral axis in m\n");
    Ok(())
}
