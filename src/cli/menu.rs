use std::time::Duration;

use console::style;
use dialoguer::theme::ColorfulTheme;
use dialoguer::Select;
use indicatif::{ProgressBar, ProgressStyle};
use rand::Rng;

use crate::command::{self, Selection};
use crate::config::Config;
use crate::dispatch::{Action, Dispatcher};
use crate::error::Result;
use crate::inventory::Inventory;
use crate::manifest::{self, Script};
use crate::output;
use crate::status;

pub const NONE: &str = "NONE";
pub const CANCEL: &str = "Cancel";
pub const EXIT: &str = "Exit";

/// A single-choice prompt.
pub trait Prompt {
    /// Index into `items`, or `None` when the user backs out (Esc / q).
    fn select(&mut self, message: &str, items: &[String]) -> Result<Option<usize>>;
}

pub struct TerminalPrompt {
    theme: ColorfulTheme,
}

impl Default for TerminalPrompt {
    fn default() -> Self {
        Self { theme: ColorfulTheme::default() }
    }
}

impl Prompt for TerminalPrompt {
    fn select(&mut self, message: &str, items: &[String]) -> Result<Option<usize>> {
        Ok(Select::with_theme(&self.theme)
            .with_prompt(message)
            .items(items)
            .default(0)
            .interact_opt()?)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandType {
    Standard,
    Custom,
    Exit,
}

impl CommandType {
    pub const ALL: [CommandType; 3] = [
        CommandType::Standard,
        CommandType::Custom,
        CommandType::Exit,
    ];

    pub fn label(self) -> &'static str {
        match self {
            CommandType::Standard => "Standard Commands",
            CommandType::Custom => "Custom Command",
            CommandType::Exit => EXIT,
        }
    }
}

pub fn run(config: &Config) -> anyhow::Result<()> {
    status!("{}", style("handcrack :: hashcat helper").yellow().bold());

    let mut prompt = TerminalPrompt::default();
    let mut dispatcher = Dispatcher::system();
    run_loop(config, &mut prompt, &mut dispatcher, &mut rand::thread_rng())?;
    Ok(())
}

/// Top-level menu. Recoverable errors are reported and the menu comes back;
/// fatal ones end the loop.
pub fn run_loop<R: Rng + ?Sized>(
    config: &Config,
    prompt: &mut dyn Prompt,
    dispatcher: &mut Dispatcher,
    rng: &mut R,
) -> Result<()> {
    loop {
        let outcome = match choose_command_type(prompt)? {
            CommandType::Exit => {
                status!("{}", style("Goodbye!").yellow());
                return Ok(());
            }
            CommandType::Standard => standard(config, prompt, dispatcher),
            CommandType::Custom => custom(config, prompt, dispatcher, rng),
        };

        if let Err(err) = outcome {
            if err.is_fatal() {
                return Err(err);
            }
            log::warn!("{}", err);
            status!("{}", style(format!("Error: {}", err)).red());
        }
    }
}

pub fn choose_command_type(prompt: &mut dyn Prompt) -> Result<CommandType> {
    let items: Vec<String> = CommandType::ALL.iter().map(|c| c.label().to_string()).collect();
    let choice = prompt.select("Select a command type:", &items)?;
    Ok(choice
        .and_then(|i| CommandType::ALL.get(i).copied())
        .unwrap_or(CommandType::Exit))
}

pub fn choose_action(prompt: &mut dyn Prompt) -> Result<Action> {
    let items: Vec<String> = Action::ALL.iter().map(|a| a.label().to_string()).collect();
    let choice = prompt.select("Select an action:", &items)?;
    Ok(choice
        .and_then(|i| Action::ALL.get(i).copied())
        .unwrap_or(Action::Cancel))
}

pub fn select_script<'a>(
    scripts: &'a [Script],
    prompt: &mut dyn Prompt,
) -> Result<Option<&'a Script>> {
    let mut items: Vec<String> = scripts.iter().map(Script::label).collect();
    items.push(EXIT.to_string());
    let choice = prompt.select("Select a command to run:", &items)?;
    Ok(choice.and_then(|i| scripts.get(i)))
}

enum FileChoice {
    File(String),
    Skip,
    Cancel,
}

fn choose_file(
    prompt: &mut dyn Prompt,
    message: &str,
    files: &[String],
    optional: bool,
) -> Result<FileChoice> {
    let mut items = files.to_vec();
    if optional {
        items.push(NONE.to_string());
    }
    items.push(CANCEL.to_string());

    let Some(index) = prompt.select(message, &items)? else {
        return Ok(FileChoice::Cancel);
    };

    Ok(match files.get(index) {
        Some(file) => FileChoice::File(file.clone()),
        None if optional && index == files.len() => FileChoice::Skip,
        None => FileChoice::Cancel,
    })
}

/// Ask for a handshake, then an optional wordlist and rules file.
/// `None` means the user cancelled. The handshake listing is checked
/// before the first prompt.
pub fn select_custom(config: &Config, prompt: &mut dyn Prompt) -> Result<Option<Selection>> {
    let inventory = Inventory::scan(config)?;

    let handshakes = &inventory.handshakes;
    let handshake = match choose_file(prompt, "Select a handshake file:", handshakes, false)? {
        FileChoice::File(file) => file,
        FileChoice::Skip | FileChoice::Cancel => return Ok(None),
    };

    let wordlists = &inventory.wordlists;
    let wordlist = match choose_file(prompt, "Select a wordlist file:", wordlists, true)? {
        FileChoice::File(file) => Some(file),
        FileChoice::Skip => None,
        FileChoice::Cancel => return Ok(None),
    };

    let rules = match choose_file(prompt, "Select a rules file:", &inventory.rules, true)? {
        FileChoice::File(file) => Some(file),
        FileChoice::Skip => None,
        FileChoice::Cancel => return Ok(None),
    };

    Ok(Some(Selection { handshake, wordlist, rules }))
}

fn standard(config: &Config, prompt: &mut dyn Prompt, dispatcher: &mut Dispatcher) -> Result<()> {
    let scripts = manifest::load(&config.manifest)?;
    let Some(script) = select_script(&scripts, prompt)? else {
        return Ok(());
    };

    loading();
    status!("{}", style(format!("You selected: {}", script.name)).green());
    dispatcher.run_script(
        &config.script_runner,
        &script.name,
        config.script_dir(),
    )
}

fn custom<R: Rng + ?Sized>(
    config: &Config,
    prompt: &mut dyn Prompt,
    dispatcher: &mut Dispatcher,
    rng: &mut R,
) -> Result<()> {
    status!("{}", style("You selected Custom Command.").blue());

    let Some(selection) = select_custom(config, prompt)? else {
        status!("{}", style("Selection canceled.").yellow());
        return Ok(());
    };

    let command = command::synthesize(config, &selection, rng)?;
    status!("{}", style("Generated Custom Command:").green());
    println!("{}", command);

    let action = choose_action(prompt)?;
    dispatcher.dispatch(action, &command.line)?;
    Ok(())
}

fn loading() {
    if output::is_quiet() {
        return;
    }

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message("Loading...");
    pb.enable_steady_tick(Duration::from_millis(80));
    std::thread::sleep(Duration::from_millis(500));
    pb.finish_and_clear();
}
