use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

use spheretrack::{FrameReader, FrameTracker, Report, Settings};

#[derive(Parser)]
#[command(name = "spheretrack", version, about = "Falling sphere tracker")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Track spheres through a recorded detection log and print measurements.
    Replay {
        /// Detection log, one `<frame>:<json detections>` line per frame
        input: PathBuf,

        /// Settings JSON file (defaults are used otherwise)
        #[arg(long)]
        settings: Option<PathBuf>,

        /// Max displacement between frames, px
        #[arg(long)]
        tracking_distance: Option<f32>,

        /// Frame rate of the recording, Hz
        #[arg(long)]
        frame_rate: Option<f32>,

        /// Pixel to physical unit factor, overrides the calibration
        #[arg(long)]
        scale: Option<f32>,

        /// Average speed at or below which a track is reported as noise
        #[arg(long)]
        threshold: Option<f32>,

        /// Write the final measurement snapshot as JSON
        #[arg(long)]
        snapshot: Option<PathBuf>,

        /// Only print the final report
        #[arg(short, long)]
        quiet: bool,
    },

    /// Write default settings to a JSON file.
    Settings {
        #[arg(default_value = "settings.json")]
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Replay {
            input,
            settings,
            tracking_distance,
            frame_rate,
            scale,
            threshold,
            snapshot,
            quiet,
        } => {
            let mut settings = match settings {
                Some(path) => Settings::from_json(&path)
                    .with_context(|| format!("loading settings {}", path.display()))?,
                None => Settings::default(),
            };

            if let Some(d) = tracking_distance {
                settings.tracking_distance = d;
            }
            if let Some(rate) = frame_rate {
                settings.frame_rate_hz = rate;
            }
            if let Some(t) = threshold {
                settings.noise_threshold = t;
            }
            settings.validate()?;

            let scale = scale.unwrap_or_else(|| settings.calibration.scaling_factor());
            run_replay(&input, &settings, scale, snapshot.as_deref(), quiet)?;
        }
        Commands::Settings { output } => {
            Settings::default()
                .to_json(&output)
                .with_context(|| format!("writing settings {}", output.display()))?;
            info!(path = %output.display(), "default settings written");
        }
    }

    Ok(())
}

fn run_replay(
    input: &Path,
    settings: &Settings,
    scale: f32,
    snapshot_path: Option<&Path>,
    quiet: bool,
) -> Result<()> {
    let file = File::open(input).with_context(|| format!("opening {}", input.display()))?;
    let mut tracker = FrameTracker::new(settings.tracking_distance);

    let frames = tracker
        .replay(
            FrameReader::new(BufReader::new(file)),
            settings.frame_rate_hz,
            scale,
            |frame, found| {
                if quiet {
                    return;
                }

                let line = found
                    .iter()
                    .map(|d| format!("{}@({}, {}, {})", d.track_id, d.x, d.y, d.r))
                    .collect::<Vec<_>>()
                    .join(" ");

                println!("{}: {}", frame.index, line);
            },
        )
        .with_context(|| format!("replaying {}", input.display()))?;

    let store = tracker.finish();
    info!(frames, tracks = store.len(), "replay finished");

    if let Some(path) = snapshot_path {
        let json = serde_json::to_string_pretty(&store)?;
        std::fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
    }

    let report = Report::from_store(&store, settings.noise_threshold);
    print!("{}", report);

    Ok(())
}
