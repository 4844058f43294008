pub mod generate;
pub mod info;
pub mod list;
pub mod menu;
pub mod scripts;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::{Config, Overrides};
use crate::error::Result;

#[derive(Parser)]
#[command(name = "handcrack")]
#[command(about = "Interactive hashcat command builder for captured WiFi handshakes")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Config file (default: ./.handcrack.toml, then the user config dir)
    #[arg(long, global = true, env = "HANDCRACK_CONFIG")]
    pub config: Option<PathBuf>,

    /// Directory that relative paths resolve against (or HANDCRACK_ROOT env var)
    #[arg(long, global = true)]
    pub root: Option<PathBuf>,

    /// hashcat binary (or HANDCRACK_HASHCAT env var)
    #[arg(long, global = true)]
    pub hashcat: Option<String>,

    /// Suppress status messages
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

impl Cli {
    pub fn load_config(&self) -> Result<Config> {
        Config::load(
            self.config.as_deref(),
            Overrides {
                root: self.root.as_deref(),
                hashcat: self.hashcat.as_deref(),
            },
        )
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Pick files interactively and run or copy the command (default)
    Menu,
    /// Print a hashcat command for the given files
    Generate(generate::GenerateArgs),
    /// List handshake, wordlist and rule files
    List(list::ListArgs),
    /// List named scripts from the manifest
    Scripts,
    /// Run a named script from the manifest
    Run(scripts::RunArgs),
    /// Show the resolved configuration
    Info(info::InfoArgs),
}
