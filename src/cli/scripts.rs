use anyhow::{bail, Result};
use clap::Args;

use crate::config::Config;
use crate::dispatch::Dispatcher;
use crate::manifest;

#[derive(Args)]
pub struct RunArgs {
    /// Script name from the manifest
    pub script: String,
}

pub fn list(config: &Config) -> Result<()> {
    for script in manifest::load(&config.manifest)? {
        println!("{}", script.label());
    }
    Ok(())
}

pub fn run(args: RunArgs, config: &Config) -> Result<()> {
    let scripts = manifest::load(&config.manifest)?;
    if !scripts.iter().any(|s| s.name == args.script) {
        let names: Vec<&str> = scripts.iter().map(|s| s.name.as_str()).collect();
        bail!(
            "Unknown script: '{}'. Available: {}",
            args.script,
            names.join(", ")
        );
    }

    Dispatcher::system().run_script(
        &config.script_runner,
        &args.script,
        config.script_dir(),
    )?;
    Ok(())
}
