use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use pizarra::Config;
use pizarra::export::{self, ExportConfig};
use pizarra::input::{InputState, ScrollViewport};
use pizarra::replay;
use pizarra::util::Size;
use std::path::{Path, PathBuf};

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("PIZARRA_GIT_HASH"),
    ")"
);

#[derive(Parser, Debug)]
#[command(name = "pizarra")]
#[command(
    version,
    long_version = LONG_VERSION,
    about = "Growing raster whiteboard with undo history"
)]
struct Cli {
    /// Run a JSON session script and save the resulting board as PNG
    #[arg(long, short = 'r', value_name = "SCRIPT")]
    replay: Option<PathBuf>,

    /// Where to write the PNG (default: export directory and template from config)
    #[arg(long, short = 'o', value_name = "FILE", requires = "replay")]
    output: Option<PathBuf>,

    /// Use this config file instead of ~/.config/pizarra/config.toml
    #[arg(long, short = 'c', value_name = "PATH")]
    config: Option<PathBuf>,

    /// Initial board width in pixels (overrides config)
    #[arg(long, value_name = "PX")]
    width: Option<i32>,

    /// Initial board height in pixels (overrides config)
    #[arg(long, value_name = "PX")]
    height: Option<i32>,

    /// Print the effective configuration as TOML
    #[arg(long, action = ArgAction::SetTrue)]
    print_config: bool,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    if let Some(width) = cli.width {
        config.canvas.initial_width = width;
    }
    if let Some(height) = cli.height {
        config.canvas.initial_height = height;
    }

    if cli.print_config {
        print!("{}", config.to_toml()?);
    } else if let Some(script) = &cli.replay {
        run_replay(&config, script, cli.output)?;
    } else {
        // No flags: show usage
        println!("pizarra: Growing raster whiteboard with undo history");
        println!();
        println!("Usage:");
        println!("  pizarra --replay <SCRIPT.json> [--output <FILE.png>]");
        println!("                               Run a session script and save the board");
        println!("  pizarra --print-config      Show the effective configuration");
        println!("  pizarra --help              Show help");
        println!();
        println!("Script steps (JSON array, one object per step):");
        println!("  {{\"op\": \"tool\", \"tool\": \"brush|eraser|text|hand\"}}");
        println!("  {{\"op\": \"down\", \"x\": 10, \"y\": 10}}  {{\"op\": \"move\", ...}}  {{\"op\": \"up\"}}");
        println!("  {{\"op\": \"text\", \"x\": 30, \"y\": 120, \"text\": \"Hola\"}}");
        println!("  {{\"op\": \"undo\"}}  {{\"op\": \"redo\"}}  {{\"op\": \"clear\"}}");
        println!();
        println!("Config file: ~/.config/pizarra/config.toml");
    }

    Ok(())
}

fn run_replay(config: &Config, script: &Path, output: Option<PathBuf>) -> Result<()> {
    let canvas = &config.canvas;
    let steps = replay::load_script(script)?;
    let size = Size::new(canvas.initial_width, canvas.initial_height);
    let viewport = ScrollViewport::new(size, size);
    let mut state =
        InputState::new(config, Box::new(viewport)).context("Failed to create board")?;

    let executed = replay::run(&mut state, &steps)
        .with_context(|| format!("Replay of {} failed", script.display()))?;
    log::info!(
        "Replayed {} steps, board is {}x{}",
        executed,
        state.surface_size().width,
        state.surface_size().height
    );

    let snapshot = state.snapshot().context("Failed to encode board")?;
    let path = match output {
        Some(path) => export::write_png(snapshot.as_png(), &path)?,
        None => export::save_png(
            snapshot.as_png(),
            &ExportConfig::from_settings(&config.export),
        )?,
    };
    println!("{}", path.display());

    Ok(())
}
