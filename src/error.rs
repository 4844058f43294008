use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("directory unavailable: {path:?} ({source})")]
    DirectoryUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(
        "no handshake files found in {path:?}. Capture handshakes and convert them to hashcat format first."
    )]
    EmptySelectionSet { path: PathBuf },

    #[error("select a wordlist, a rules file, or both; hashcat needs at least one")]
    IncompleteSelection,

    #[error("command failed: {command}: {reason}")]
    SubprocessFailure { command: String, reason: String },

    #[error("clipboard unavailable: {0}")]
    ClipboardUnavailable(String),

    #[error("prompt failed: {0}")]
    Prompt(String),
}

impl Error {
    /// Fatal errors end the interactive session; the rest are reported and the menu resumes.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Error::Configuration(_) | Error::EmptySelectionSet { .. } | Error::Prompt(_)
        )
    }
}

impl From<dialoguer::Error> for Error {
    fn from(err: dialoguer::Error) -> Self {
        Error::Prompt(err.to_string())
    }
}
