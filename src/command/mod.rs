mod session;

pub use session::{session_base_name, session_name, SUFFIX_RANGE};

use std::fmt;
use std::path::Path;

use rand::Rng;
use serde::Serialize;

use crate::config::Config;
use crate::error::{Error, Result};

/// Straight (dictionary) attack.
pub const ATTACK_MODE: u32 = 0;

const TEXT_EXTENSION: &str = ".txt";

/// Files picked for one custom run. `None` means "not selected".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub handshake: String,
    pub wordlist: Option<String>,
    pub rules: Option<String>,
}

/// Which optional inputs a selection carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttackInputs<'a> {
    WordlistAndRules { wordlist: &'a str, rules: &'a str },
    RulesOnly(&'a str),
    WordlistOnly(&'a str),
}

impl Selection {
    pub fn new(
        handshake: impl Into<String>,
        wordlist: Option<impl Into<String>>,
        rules: Option<impl Into<String>>,
    ) -> Self {
        Self {
            handshake: handshake.into(),
            wordlist: wordlist.map(Into::into),
            rules: rules.map(Into::into),
        }
    }

    pub fn attack_inputs(&self) -> Result<AttackInputs<'_>> {
        match (self.wordlist.as_deref(), self.rules.as_deref()) {
            (Some(wordlist), Some(rules)) => Ok(AttackInputs::WordlistAndRules { wordlist, rules }),
            (None, Some(rules)) => Ok(AttackInputs::RulesOnly(rules)),
            (Some(wordlist), None) => Ok(AttackInputs::WordlistOnly(wordlist)),
            (None, None) => Err(Error::IncompleteSelection),
        }
    }
}

/// A rendered hashcat invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CrackCommand {
    pub session: String,
    pub line: String,
}

impl fmt::Display for CrackCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.line)
    }
}

/// Render the hashcat command line for `selection`. Nothing is executed.
pub fn synthesize<R: Rng + ?Sized>(
    config: &Config,
    selection: &Selection,
    rng: &mut R,
) -> Result<CrackCommand> {
    let inputs = selection.attack_inputs()?;
    let session = session_name(&selection.handshake, &config.handshake_extension, rng);

    let potfile = config.potfile_dir.join(format!("{}-potfile.txt", session));
    let outfile = config.output_dir.join(format!("{}-output.txt", session));
    let handshake = config.handshake_dir.join(&selection.handshake);

    let mut args = vec![
        shell_word(&config.hashcat),
        format!("--hash-type={}", config.hash_type),
        format!("--attack-mode={}", ATTACK_MODE),
        "--session".to_string(),
        shell_word(&session),
        format!("--hwmon-temp-abort={}", config.abort_temperature),
        "-w".to_string(),
        config.abort_wait.to_string(),
        "--potfile-path".to_string(),
        quote(&potfile),
        format!("--outfile={}", quote(&outfile)),
        quote(&handshake),
    ];

    let (wordlist, rules) = match inputs {
        AttackInputs::WordlistAndRules { wordlist, rules } => (Some(wordlist), Some(rules)),
        AttackInputs::RulesOnly(rules) => (None, Some(rules)),
        AttackInputs::WordlistOnly(wordlist) => (Some(wordlist), None),
    };

    if let Some(rules) = rules {
        let path = config.rule_dir.join(strip_text_extension(rules));
        args.push(format!("--rules-file={}", quote(&path)));
    }
    if let Some(wordlist) = wordlist {
        let name = format!("{}{}", strip_text_extension(wordlist), TEXT_EXTENSION);
        args.push("-S".to_string());
        args.push(quote(&config.wordlist_dir.join(name)));
    }

    let line = args.join(" ");
    log::debug!("synthesized session {}: {}", session, line);

    Ok(CrackCommand { session, line })
}

fn strip_text_extension(name: &str) -> &str {
    name.strip_suffix(TEXT_EXTENSION).unwrap_or(name)
}

/// Double-quote a path for `sh`, escaping the characters that stay special
/// inside double quotes.
#[cfg(not(windows))]
pub fn quote(path: &Path) -> String {
    let raw = path.to_string_lossy();
    let mut quoted = String::with_capacity(raw.len() + 2);
    quoted.push('"');
    for c in raw.chars() {
        if matches!(c, '"' | '\\' | '$' | '`') {
            quoted.push('\\');
        }
        quoted.push(c);
    }
    quoted.push('"');
    quoted
}

/// Double-quote a path for `cmd`. There is no escape character inside
/// quotes and Windows file names cannot contain `"`.
#[cfg(windows)]
pub fn quote(path: &Path) -> String {
    format!("\"{}\"", path.to_string_lossy())
}

fn shell_word(word: &str) -> String {
    let safe = !word.is_empty()
        && word
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "-_.+:/=@%,".contains(c));
    if safe {
        word.to_string()
    } else {
        quote(Path::new(word))
    }
}
