use anyhow::{bail, Result};
use clap::{Args, ValueEnum};

use crate::command::{self, CrackCommand, Selection};
use crate::config::Config;
use crate::dispatch::{Action, Dispatcher};
use crate::inventory::{self, list_candidates};

#[derive(Clone, ValueEnum)]
pub enum OutputFormat {
    Plain,
    Json,
}

#[derive(Args)]
pub struct GenerateArgs {
    /// Handshake file name (inside the handshake directory)
    #[arg(long)]
    pub handshake: String,

    /// Wordlist file name (inside the wordlist directory)
    #[arg(long)]
    pub wordlist: Option<String>,

    /// Rules file name (inside the rules directory)
    #[arg(long)]
    pub rules: Option<String>,

    /// Output format
    #[arg(short, long, default_value = "plain")]
    pub format: OutputFormat,

    /// Run the command after printing it
    #[arg(long, conflicts_with = "copy")]
    pub exec: bool,

    /// Copy the command to the clipboard
    #[arg(long)]
    pub copy: bool,
}

pub fn run(args: GenerateArgs, config: &Config) -> Result<()> {
    let selection = validate(&args, config)?;
    let command = command::synthesize(config, &selection, &mut rand::thread_rng())?;

    match args.format {
        OutputFormat::Plain => println!("{}", command),
        OutputFormat::Json => print_json(&command)?,
    }

    let action = if args.exec {
        Action::Execute
    } else if args.copy {
        Action::CopyToClipboard
    } else {
        return Ok(());
    };

    Dispatcher::system().dispatch(action, &command.line)?;
    Ok(())
}

/// Every named file must be one the interactive menu would have offered.
pub fn validate(args: &GenerateArgs, config: &Config) -> Result<Selection> {
    let handshakes = inventory::list_handshakes(config)?;
    if !handshakes.contains(&args.handshake) {
        bail!(
            "Unknown handshake file: '{}'. Use `handcrack list handshakes` to see available files.",
            args.handshake
        );
    }

    if let Some(ref wordlist) = args.wordlist {
        let wordlists = list_candidates(&config.wordlist_dir, &config.exclude)?;
        if !wordlists.contains(wordlist) {
            bail!(
                "Unknown wordlist: '{}'. Use `handcrack list wordlists` to see available files.",
                wordlist
            );
        }
    }

    if let Some(ref rules) = args.rules {
        let rule_files = list_candidates(&config.rule_dir, &config.exclude)?;
        if !rule_files.contains(rules) {
            bail!(
                "Unknown rules file: '{}'. Use `handcrack list rules` to see available files.",
                rules
            );
        }
    }

    Ok(Selection {
        handshake: args.handshake.clone(),
        wordlist: args.wordlist.clone(),
        rules: args.rules.clone(),
    })
}

fn print_json(command: &CrackCommand) -> Result<()> {
    #[derive(serde::Serialize)]
    struct JsonCommand<'a> {
        session: &'a str,
        command: &'a str,
    }

    let out = JsonCommand {
        session: &command.session,
        command: &command.line,
    };
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}
