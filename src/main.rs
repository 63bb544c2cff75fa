//! Headless driver for the image session.
//!
//! Opens one image, runs a list of commands against it, and logs what
//! happened after each one.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use tracing::{Level, info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use image_session::config::Configuration;
use image_session::events::{Command, Outcome};
use image_session::{Direction, ImageSession, Navigation};

/// Simple CLI
#[derive(Debug, Parser)]
#[command(name = "image-session", about = "Browse and filter images from the command line")]
struct Cli {
    /// Path to YAML config file (defaults apply when omitted)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Image to open first
    #[arg(value_name = "IMAGE")]
    image: PathBuf,

    /// Command to run, in order (next, prev, blur[=K], erode[=N],
    /// dilate[=N], zoom-in, zoom-out, zoom=F, open=PATH, save=PATH)
    #[arg(short, long = "run", value_name = "CMD")]
    run: Vec<String>,

    /// Increase log verbosity (repeatable)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    verbose: u8,
}

fn init_tracing(verbosity: u8) -> Result<()> {
    // map -v to log level
    let level = match verbosity {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let filter = EnvFilter::from_default_env()
        .add_directive(format!("image_session={level}").parse()?);
    fmt().with_env_filter(filter).with_target(true).init();
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose)?;

    let cfg = match &cli.config {
        Some(path) => Configuration::from_yaml_file(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => Configuration::default(),
    }
    .validated()
    .context("validating configuration")?;

    // Parse everything up front so a typo fails before any work is done.
    let commands = cli
        .run
        .iter()
        .map(|s| Command::parse(s, &cfg))
        .collect::<Result<Vec<_>>>()?;

    let mut session = ImageSession::new(&cfg);
    session
        .open(&cli.image)
        .with_context(|| format!("opening {}", cli.image.display()))?;
    report(&session);

    for command in commands {
        let label = format!("{command:?}");
        let outcome = session
            .dispatch(command)
            .with_context(|| format!("running {label}"))?;
        match outcome {
            Outcome::Navigated(Navigation::AtBoundary(direction)) => {
                let which = match direction {
                    Direction::Previous => "first",
                    Direction::Next => "last",
                };
                warn!("current image is the {which} one");
            }
            Outcome::Zoomed(zoom) => info!(zoom, "zoom changed"),
            Outcome::Saved(path) => info!(path = %path.display(), "saved"),
            Outcome::Filtered(kind) => info!(filter = %kind, "filter applied"),
            Outcome::Opened(_) | Outcome::Navigated(Navigation::Moved(_)) => report(&session),
        }
    }
    Ok(())
}

fn report(session: &ImageSession) {
    if let Some(summary) = session.summary() {
        info!(state = ?session.state(), "{summary}");
    }
}
