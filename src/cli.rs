// CLI module - command-line argument parsing and handlers
//
// Flags override the loaded configuration for one run. Subcommands:
// - start / stop: send one control command and exit
// - config --show: Display effective configuration
// - config --path: Show config file path
// - config --reset: Regenerate config file with defaults

use crate::config::{Config, VERSION};
use crate::control::Command;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::Write;

/// logdeck - operator console for a remote process's log stream
#[derive(Parser, Debug)]
#[command(name = "logdeck")]
#[command(version = VERSION)]
#[command(about = "Watch a live log stream and start/stop the process behind it", long_about = None)]
pub struct Cli {
    /// Server host and port, e.g. 10.0.0.5:8080
    #[arg(long, global = true)]
    pub host: Option<String>,

    /// Use wss:// and https://
    #[arg(long, global = true)]
    pub secure: bool,

    /// Print the log to stdout instead of running the TUI
    #[arg(long)]
    pub headless: bool,

    /// Connect on startup (always on in headless mode)
    #[arg(long)]
    pub connect: bool,

    /// Headless output as JSON lines (implies --headless)
    #[arg(long)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Ask the server to start the process
    Start,

    /// Ask the server to stop the process
    Stop,

    /// Manage configuration
    Config {
        /// Show effective configuration
        #[arg(long)]
        show: bool,

        /// Show config file path
        #[arg(long)]
        path: bool,

        /// Reset config file to defaults
        #[arg(long)]
        reset: bool,
    },
}

impl Commands {
    /// The control command behind `start` / `stop`
    pub fn control(&self) -> Option<Command> {
        match self {
            Commands::Start => Some(Command::Start),
            Commands::Stop => Some(Command::Stop),
            Commands::Config { .. } => None,
        }
    }
}

impl Cli {
    /// Apply flags on top of env/file/default configuration
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(host) = &self.host {
            config.endpoint.host = host.clone();
        }
        if self.secure {
            config.endpoint.secure = true;
        }
        if self.headless || self.json {
            config.enable_tui = false;
        }
        if self.connect {
            config.auto_connect = true;
        }
    }
}

/// Handle `config` flags. Runs before the config file is loaded so a broken
/// file can still be located and reset.
pub fn handle_config(cli: &Cli, show: bool, path: bool, reset: bool) -> Result<()> {
    if path {
        handle_config_path()
    } else if show {
        let mut config = Config::load()?;
        cli.apply_overrides(&mut config);
        handle_config_show(&config);
        Ok(())
    } else if reset {
        handle_config_reset()
    } else {
        // No flag provided, show help
        println!("Usage: logdeck config [--show|--path|--reset]");
        println!();
        println!("Options:");
        println!("  --show    Display effective configuration");
        println!("  --path    Show config file path");
        println!("  --reset   Reset config file to defaults");
        Ok(())
    }
}

fn handle_config_path() -> Result<()> {
    let path = Config::config_path().context("Could not determine config path")?;
    println!("{}", path.display());
    Ok(())
}

fn handle_config_show(config: &Config) {
    println!("# Effective configuration (flags > env > file > defaults)");
    println!();
    print!("{}", config.to_toml());

    // Show source info
    println!();
    if let Some(path) = Config::config_path() {
        if path.exists() {
            println!("# Source: {}", path.display());
        } else {
            println!("# Source: defaults (no config file)");
        }
    }
}

fn handle_config_reset() -> Result<()> {
    let path = Config::config_path().context("Could not determine config path")?;

    // Confirm if file exists
    if path.exists() {
        eprint!(
            "Config file exists at {}. Overwrite? [y/N] ",
            path.display()
        );
        std::io::stderr().flush().context("Failed to flush stderr")?;

        let mut input = String::new();
        std::io::stdin()
            .read_line(&mut input)
            .context("Failed to read answer")?;

        if !input.trim().eq_ignore_ascii_case("y") {
            println!("Aborted.");
            return Ok(());
        }
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Error creating directory {}", parent.display()))?;
    }

    // Write the default config (using Config's single source of truth)
    std::fs::write(&path, Config::default().to_toml())
        .with_context(|| format!("Error writing config {}", path.display()))?;

    println!("Config reset to defaults: {}", path.display());
    Ok(())
}
