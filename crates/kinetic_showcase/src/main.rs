//! Kinetic showcase CLI
//!
//! Plays the showcase page headlessly and prints its frames, or prints the
//! computed page layout.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use kinetic_showcase::{ScrollStep, Showcase, ShowcaseConfig, Simulation, CONFIG_FILE};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "kinetic-showcase")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Headless Kinetic animation showcase", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play the page and print snapshots
    Simulate {
        /// Config file (defaults to ./kinetic.toml when present)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// How long to play
        #[arg(short, long, default_value = "3000")]
        duration_ms: f64,

        /// Frames per second
        #[arg(long, default_value = "60")]
        fps: u32,

        /// Scroll jump as AT_MS:Y (repeatable)
        #[arg(short, long = "scroll", value_name = "AT_MS:Y")]
        scrolls: Vec<ScrollStep>,

        /// Snapshot interval (0 prints only the final frame)
        #[arg(long, default_value = "500")]
        sample_ms: f64,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },

    /// Print the computed page layout
    Layout {
        /// Config file (defaults to ./kinetic.toml when present)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging; RUST_LOG wins over -v
    let level = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    match cli.command {
        Commands::Simulate {
            config,
            duration_ms,
            fps,
            scrolls,
            sample_ms,
            format,
        } => {
            let simulation = Simulation {
                duration_ms,
                fps,
                sample_ms,
                scrolls,
            };
            cmd_simulate(config.as_deref(), &simulation, format)
        }

        Commands::Layout { config } => cmd_layout(config.as_deref()),
    }
}

fn load_config(path: Option<&Path>) -> Result<ShowcaseConfig> {
    match path {
        Some(path) => ShowcaseConfig::load(path)
            .with_context(|| format!("Failed to load config from {}", path.display())),
        None if Path::new(CONFIG_FILE).exists() => {
            info!("Using {}", CONFIG_FILE);
            ShowcaseConfig::load(Path::new(CONFIG_FILE))
                .with_context(|| format!("Failed to load {}", CONFIG_FILE))
        }
        None => Ok(ShowcaseConfig::default()),
    }
}

fn cmd_simulate(config: Option<&Path>, simulation: &Simulation, format: Format) -> Result<()> {
    if simulation.fps == 0 {
        anyhow::bail!("--fps must be at least 1");
    }
    let config = load_config(config)?;
    let mut showcase = Showcase::mount(config).context("Failed to mount showcase")?;

    info!(
        "Simulating {}ms at {} fps ({} scroll steps)",
        simulation.duration_ms,
        simulation.fps,
        simulation.scrolls.len()
    );
    let snapshots = simulation
        .run(&mut showcase)
        .context("Simulation failed")?;

    match format {
        Format::Text => {
            for snapshot in &snapshots {
                print!("{}", snapshot);
            }
        }
        Format::Json => {
            let json = serde_json::to_string_pretty(&snapshots)
                .context("Failed to serialize snapshots")?;
            println!("{}", json);
        }
    }

    let removed = showcase.unmount();
    info!("Done: {} frames printed, {} motion values released", snapshots.len(), removed);
    Ok(())
}

fn cmd_layout(config: Option<&Path>) -> Result<()> {
    let config = load_config(config)?;
    let showcase = Showcase::mount(config).context("Failed to mount showcase")?;
    let layout = showcase.layout();

    println!(
        "viewport {}x{}  cell {:.2}  document {:.2}  max scroll {:.2}",
        layout.viewport().width,
        layout.viewport().height,
        layout.cell_size(),
        layout.document_height(),
        layout.max_scroll()
    );
    for (node, rect) in layout.iter() {
        println!(
            "  {:<16} x {:>8.2}  y {:>8.2}  w {:>8.2}  h {:>8.2}",
            node.to_string(),
            rect.x(),
            rect.y(),
            rect.width(),
            rect.height()
        );
    }
    let range = showcase.section_range();
    println!(
        "section scroll range {:.2}..{:.2}",
        range.start_y(),
        range.end_y()
    );
    Ok(())
}
