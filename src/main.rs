use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};
use fractal_voyage::controllers::cli::fly::{FlightRequest, FlyCommandController};
use fractal_voyage::controllers::cli::render::{RenderCommandController, RenderRequest};
use fractal_voyage::controllers::cli::scenes::scene_listing;
use fractal_voyage::controllers::cli::{CameraTarget, CliError, parse_complex};
use fractal_voyage::{CameraPose, Complex, ExplorerConfig, ExplorerSession, FractalKind, PgmFilePresenter};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Renders and animates escape-time fractal voyages")]
struct Args {
    /// JSON config file; every field is optional
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output width in pixels
    #[arg(long, global = true)]
    width: Option<u32>,

    /// Output height in pixels
    #[arg(long, global = true)]
    height: Option<u32>,

    /// Render the Julia set for constant RE,IM instead of the Mandelbrot set
    #[arg(long, global = true, value_parser = parse_complex, allow_hyphen_values = true)]
    julia: Option<Complex>,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Args, Debug)]
struct TargetArgs {
    /// Scene name from the scene table
    #[arg(long, conflicts_with_all = ["center_x", "center_y", "zoom"])]
    scene: Option<String>,

    #[arg(long, allow_hyphen_values = true, default_value_t = 0.0)]
    center_x: f64,

    #[arg(long, allow_hyphen_values = true, default_value_t = 0.0)]
    center_y: f64,

    #[arg(long, default_value_t = 1.0)]
    zoom: f64,
}

impl TargetArgs {
    fn target(&self) -> CameraTarget {
        match &self.scene {
            Some(name) => CameraTarget::Scene(name.clone()),
            None => CameraTarget::Pose(CameraPose::new(self.center_x, self.center_y, self.zoom)),
        }
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render one frame to a PGM file
    Render {
        #[command(flatten)]
        target: TargetArgs,

        /// Fixed iteration ceiling instead of the configured one
        #[arg(long)]
        iterations: Option<u32>,

        /// Output file
        #[arg(long, default_value = "output/frame.pgm")]
        out: PathBuf,
    },

    /// Animate from a start camera to a target and write every frame
    Fly {
        #[command(flatten)]
        target: TargetArgs,

        #[arg(long, allow_hyphen_values = true, default_value_t = 0.0)]
        start_x: f64,

        #[arg(long, allow_hyphen_values = true, default_value_t = 0.0)]
        start_y: f64,

        #[arg(long, default_value_t = 1.0)]
        start_zoom: f64,

        /// Navigation duration; defaults to the configured one
        #[arg(long)]
        duration_ms: Option<u64>,

        #[arg(long, default_value_t = 30)]
        fps: u32,

        #[arg(long, default_value_t = 600)]
        max_frames: u32,

        /// Directory for numbered frames
        #[arg(long, default_value = "output/flight")]
        out_dir: PathBuf,
    },

    /// List the scene table
    Scenes,
}

fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let config = load_config(&args)?;
    let mut session = ExplorerSession::new(&config)?;

    match args.command {
        Command::Render {
            target,
            iterations,
            out,
        } => {
            if let Some(parent) = out.parent() {
                std::fs::create_dir_all(parent).map_err(|source| CliError::Io {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }

            let controller = RenderCommandController::new(PgmFilePresenter::new());
            let request = RenderRequest {
                target: target.target(),
                iterations,
            };
            let frame = controller.run(&mut session, &request, config.iteration_ceiling, &out)?;

            println!(
                "Rendered {}x{} at zoom {} ({} iterations, {:?}) in {:?}",
                frame.field.pixel_rect().width(),
                frame.field.pixel_rect().height(),
                frame.contract.zoom,
                frame.contract.max_iterations,
                frame.contract.precision,
                frame.elapsed
            );
            println!("Saved to {}", out.display());
        }
        Command::Fly {
            target,
            start_x,
            start_y,
            start_zoom,
            duration_ms,
            fps,
            max_frames,
            out_dir,
        } => {
            let controller = FlyCommandController::new(PgmFilePresenter::new());
            let request = FlightRequest {
                start: CameraPose::new(start_x, start_y, start_zoom),
                target: target.target(),
                duration: duration_ms.map(Duration::from_millis),
                fps,
                max_frames,
            };
            let summary = controller.run(&mut session, &request, &out_dir)?;

            println!(
                "Wrote {} frames to {} ({})",
                summary.written.len(),
                out_dir.display(),
                if summary.report.settled { "settled" } else { "frame limit reached" }
            );
        }
        Command::Scenes => {
            for line in scene_listing(session.scenes()) {
                println!("{line}");
            }
        }
    }

    Ok(())
}

fn load_config(args: &Args) -> Result<ExplorerConfig, CliError> {
    let mut config = match &args.config {
        Some(path) => {
            info!(path = %path.display(), "loading config");
            ExplorerConfig::from_path(path)?
        }
        None => ExplorerConfig::default(),
    };

    if let Some(width) = args.width {
        config.width = width;
    }
    if let Some(height) = args.height {
        config.height = height;
    }
    if let Some(constant) = args.julia {
        config.fractal = FractalKind::Julia { constant };
    }

    config.validate()?;
    Ok(config)
}
