#![deny(unsafe_code)]
//! Headless driver binary for the marbling engine.
//!
//! Subcommands:
//! - `simulate`: run a seeded marbling session, write the final geometry as JSON
//! - `list`: print available palettes

mod error;

use clap::{Parser, Subcommand};
use error::CliError;
use glam::DVec2;
use marbling_core::{Palette, Xorshift64};
use marbling_drops::{snapshot, AnimationParams, Bath, InkDrop};
use std::path::PathBuf;
use std::process;

/// Border kept free of drop centers, matching the interactive driver.
const MARGIN: f64 = 40.0;
/// Drop radius range the driver draws from.
const RADIUS_MIN: f64 = 30.0;
const RADIUS_MAX: f64 = 120.0;
/// Cap applied to each drop's gradual blend toward its target color.
const TARGET_MAX_BLEND: f64 = 0.6;
/// Per-frame color blend step.
const COLOR_STEP: f64 = 0.02;

#[derive(Parser)]
#[command(name = "marbling", about = "Ink-marbling drop engine CLI")]
struct Cli {
    /// Output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run a seeded marbling session and write the final geometry as JSON.
    Simulate {
        /// Bath width in pixels.
        #[arg(short = 'W', long, default_value_t = 1200)]
        width: usize,

        /// Bath height in pixels.
        #[arg(short = 'H', long, default_value_t = 800)]
        height: usize,

        /// Number of drops to place.
        #[arg(short, long, default_value_t = 12)]
        drops: usize,

        /// Number of animation frames.
        #[arg(short, long, default_value_t = 120)]
        frames: usize,

        /// Animation clock advance per frame, in seconds.
        #[arg(long, default_value_t = 1.0 / 60.0)]
        dt: f64,

        /// PRNG seed for deterministic placement and colors.
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Palette name (see `list`).
        #[arg(short, long, default_value = "suminagashi")]
        palette: String,

        /// Perimeter vertices per drop.
        #[arg(long, default_value_t = 100)]
        vertex_count: usize,

        /// Drag a vertical tine at this x position during the second half
        /// of the run.
        #[arg(long)]
        tine_x: Option<f64>,

        /// Tine strength (max vertical displacement per frame).
        #[arg(long, default_value_t = 2.0)]
        tine_strength: f64,

        /// Tine sharpness (influence radius control).
        #[arg(long, default_value_t = 48.0)]
        tine_sharpness: f64,

        /// Animation parameters as a JSON string
        /// (noise_amplitude, noise_frequency, wave_amplitude, wave_speed, harmonics).
        #[arg(long, default_value = "{}")]
        params: String,

        /// Output file path.
        #[arg(short, long, default_value = "marbling.json")]
        output: PathBuf,
    },
    /// List available palettes.
    List,
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::List => {
            let palettes = Palette::list_names();
            if cli.json {
                let info = serde_json::json!({ "palettes": palettes });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                println!("Palettes:");
                println!("  {}", palettes.join(", "));
            }
        }
        Command::Simulate {
            width,
            height,
            drops,
            frames,
            dt,
            seed,
            palette,
            vertex_count,
            tine_x,
            tine_strength,
            tine_sharpness,
            params,
            output,
        } => {
            if width as f64 <= 2.0 * MARGIN || height as f64 <= 2.0 * MARGIN {
                return Err(CliError::Input(format!(
                    "bath must be larger than {}x{} pixels",
                    2.0 * MARGIN,
                    2.0 * MARGIN
                )));
            }
            let params: serde_json::Value = serde_json::from_str(&params)
                .map_err(|e| CliError::Input(format!("invalid --params JSON: {e}")))?;
            let anim = AnimationParams::from_json(&params);
            let palette = Palette::from_name(&palette)?;
            let mut rng = Xorshift64::new(seed);

            let mut bath = Bath::new();
            let interval = (frames / drops.max(1)).max(1);
            let mut placed = 0usize;
            for frame in 0..frames {
                if placed < drops && frame % interval == 0 {
                    let center = DVec2::new(
                        rng.next_range(MARGIN, width as f64 - MARGIN),
                        rng.next_range(MARGIN, height as f64 - MARGIN),
                    );
                    let radius = rng.next_range(RADIUS_MIN, RADIUS_MAX);
                    let color = palette.pick(&mut rng);
                    let mut drop = InkDrop::new(center, color, radius, vertex_count)?;
                    drop.set_target_color(palette.pick(&mut rng), TARGET_MAX_BLEND);
                    bath.drop_ink(drop);
                    placed += 1;
                }
                let time = frame as f64 * dt;
                bath.animate(time, &anim);
                bath.update_colors(COLOR_STEP);
                if let Some(x) = tine_x {
                    if frame >= frames / 2 {
                        bath.tine(x, tine_strength, tine_sharpness);
                    }
                }
            }

            snapshot::write_json(&bath, &output)?;

            if cli.json {
                let info = serde_json::json!({
                    "drops": bath.len(),
                    "frames": frames,
                    "seed": seed,
                    "vertex_count": vertex_count,
                    "output": output.display().to_string(),
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                eprintln!(
                    "simulated {} drops over {} frames (seed {}) -> {}",
                    bath.len(),
                    frames,
                    seed,
                    output.display()
                );
            }
        }
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("error: {e}");
        process::exit(e.exit_code());
    }
}
