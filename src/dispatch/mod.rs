mod clipboard;
mod shell;

pub use clipboard::{ClipboardSink, SystemClipboard};
pub use shell::{Shell, SystemShell};

use std::path::Path;

use console::style;

use crate::error::Result;
use crate::status;

/// What to do with a generated command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Execute,
    CopyToClipboard,
    Cancel,
}

impl Action {
    pub const ALL: [Action; 3] = [Action::Execute, Action::CopyToClipboard, Action::Cancel];

    pub fn label(self) -> &'static str {
        match self {
            Action::Execute => "Execute",
            Action::CopyToClipboard => "Copy to Clipboard",
            Action::Cancel => "Cancel",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Executed,
    Copied,
    Cancelled,
}

pub struct Dispatcher {
    shell: Box<dyn Shell>,
    clipboard: Box<dyn ClipboardSink>,
}

impl Dispatcher {
    pub fn new(shell: Box<dyn Shell>, clipboard: Box<dyn ClipboardSink>) -> Self {
        Self { shell, clipboard }
    }

    pub fn system() -> Self {
        Self::new(Box::new(SystemShell), Box::<SystemClipboard>::default())
    }

    pub fn dispatch(&mut self, action: Action, command: &str) -> Result<Outcome> {
        match action {
            Action::Cancel => {
                status!("{}", style("Action canceled.").yellow());
                Ok(Outcome::Cancelled)
            }
            Action::CopyToClipboard => {
                self.clipboard.copy(command)?;
                status!("{}", style("Command copied to clipboard!").green());
                Ok(Outcome::Copied)
            }
            Action::Execute => {
                status!("{} {}", style("Executing command:").blue(), command);
                self.shell.run_line(command)?;
                Ok(Outcome::Executed)
            }
        }
    }

    /// `<runner> run <script>` inside `cwd`, straight to the shell with no
    /// action prompt.
    pub fn run_script(&mut self, runner: &str, script: &str, cwd: &Path) -> Result<()> {
        log::debug!("running script {} via {} in {:?}", script, runner, cwd);
        self.shell.run_program(runner, &["run", script], cwd)
    }
}
