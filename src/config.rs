//! Configuration and CLI argument handling

use std::time::Duration;
use clap::Parser;

use crate::display::TimeFormatMode;

/// CLI argument parsing structure
#[derive(Debug, Parser)]
#[command(name = "countdown-view")]
#[command(about = "Run a visibility-aware countdown in the terminal")]
#[command(version)]
pub struct Config {
    /// Countdown length in milliseconds
    #[arg(short = 't', long, default_value = "10000")]
    pub time_in_future: u64,

    /// Tick interval in milliseconds
    #[arg(short, long, default_value = "1000", value_parser = clap::value_parser!(u64).range(1..))]
    pub interval: u64,

    /// Which fields of the remaining time to display
    #[arg(short = 'f', long, value_enum, default_value_t = TimeFormatMode::HoursMinSec)]
    pub time_format: TimeFormatMode,

    /// Display template with one placeholder, e.g. "Time left: %s"
    #[arg(long)]
    pub format: Option<String>,

    /// Do not render the remaining time on each tick
    #[arg(long)]
    pub no_auto_display: bool,

    /// Start hidden; send SIGUSR2 to show, SIGUSR1 to hide
    #[arg(long)]
    pub hidden: bool,

    /// Print notifications as JSON lines
    #[arg(long)]
    pub json: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    pub fn time_in_future(&self) -> Duration {
        Duration::from_millis(self.time_in_future)
    }

    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }
}
