use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use portfolio_toys::game::GameConfig;
use portfolio_toys::modes::{SnakeMode, TodoMode};
use portfolio_toys::todo::FileStorage;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "portfolio_toys")]
#[command(version, about = "Small interactive widgets from a portfolio gallery")]
struct Cli {
    /// Widget to mount
    #[arg(long, default_value = "snake")]
    mode: Mode,

    /// Side length of the snake grid, in cells
    #[arg(long, default_value = "15", value_parser = clap::value_parser!(u16).range(11..=100))]
    grid_size: u16,

    /// Milliseconds between snake ticks
    #[arg(long, default_value = "200")]
    tick_ms: u64,

    /// Directory for persisted widget data
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Write logs to this file (the terminal belongs to the widget)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[derive(Clone, ValueEnum)]
enum Mode {
    /// Play snake with the arrow keys
    Snake,
    /// Keep a todo list
    Todo,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(path) = &cli.log_file {
        init_logging(path)?;
    }

    match cli.mode {
        Mode::Snake => {
            let config = GameConfig::new(usize::from(cli.grid_size)).with_tick_interval(cli.tick_ms);
            let mut snake_mode = SnakeMode::new(config)?;
            snake_mode.run().await?;
        }
        Mode::Todo => {
            let data_dir = cli.data_dir.unwrap_or_else(default_data_dir);
            let mut todo_mode = TodoMode::new(FileStorage::new(data_dir))?;
            todo_mode.run().await?;
        }
    }

    Ok(())
}

fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create log file {:?}", path))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join("portfolio_toys"))
        .unwrap_or_else(|| PathBuf::from("./data"))
}
