use std::path::Path;
use std::process::{Command, ExitStatus};

use crate::error::{Error, Result};

/// Runs commands in the foreground with the terminal's stdio.
pub trait Shell {
    /// Run a full command line through the platform shell.
    fn run_line(&mut self, line: &str) -> Result<()>;
    /// Run `program` with `args` inside `cwd`, no shell in between.
    fn run_program(&mut self, program: &str, args: &[&str], cwd: &Path) -> Result<()>;
}

pub struct SystemShell;

impl Shell for SystemShell {
    fn run_line(&mut self, line: &str) -> Result<()> {
        let mut command = shell_command(line);
        wait(&mut command, line)
    }

    fn run_program(&mut self, program: &str, args: &[&str], cwd: &Path) -> Result<()> {
        let display = std::iter::once(program)
            .chain(args.iter().copied())
            .collect::<Vec<_>>()
            .join(" ");
        let mut command = Command::new(program);
        command.args(args).current_dir(cwd);
        wait(&mut command, &display)
    }
}

#[cfg(not(windows))]
fn shell_command(line: &str) -> Command {
    let mut command = Command::new("sh");
    command.arg("-c").arg(line);
    command
}

#[cfg(windows)]
fn shell_command(line: &str) -> Command {
    let mut command = Command::new("cmd");
    command.arg("/C").arg(line);
    command
}

fn wait(command: &mut Command, display: &str) -> Result<()> {
    log::debug!("spawning {:?}", command);
    let status = command.status().map_err(|e| Error::SubprocessFailure {
        command: display.to_string(),
        reason: e.to_string(),
    })?;
    check(status, display)
}

fn check(status: ExitStatus, display: &str) -> Result<()> {
    if status.success() {
        Ok(())
    } else {
        Err(Error::SubprocessFailure {
            command: display.to_string(),
            reason: status.to_string(),
        })
    }
}
