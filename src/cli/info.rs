use std::path::Path;

use anyhow::Result;
use clap::{Args, ValueEnum};

use crate::config::Config;

#[derive(Clone, ValueEnum)]
pub enum OutputFormat {
    Plain,
    Json,
}

#[derive(Args)]
pub struct InfoArgs {
    #[arg(short, long, default_value = "plain")]
    pub format: OutputFormat,
}

pub fn run(args: InfoArgs, config: &Config) -> Result<()> {
    match args.format {
        OutputFormat::Plain => print_plain(config),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(config)?),
    }
    Ok(())
}

fn print_plain(config: &Config) {
    println!("hashcat:     {}", config.hashcat);
    println!("Hash type:   {}", config.hash_type);
    println!("Temp abort:  {} C", config.abort_temperature);
    println!("Abort wait:  {}", config.abort_wait);
    println!("Extension:   .{}", config.handshake_extension);
    println!("Root:        {}", config.root.display());
    println!("Handshakes:  {}", describe(&config.handshake_dir));
    println!("Wordlists:   {}", describe(&config.wordlist_dir));
    println!("Rules:       {}", describe(&config.rule_dir));
    println!("Potfiles:    {}", config.potfile_dir.display());
    println!("Outputs:     {}", config.output_dir.display());
    println!("Manifest:    {}", describe(&config.manifest));
    println!("Runner:      {}", config.script_runner);
    println!(
        "Excluded:    {}",
        if config.exclude.is_empty() {
            "-".to_string()
        } else {
            config.exclude.join(", ")
        }
    );
}

fn describe(path: &Path) -> String {
    if path.exists() {
        path.display().to_string()
    } else {
        format!("{} (missing)", path.display())
    }
}
