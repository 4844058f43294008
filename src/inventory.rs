use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::error::{Error, Result};

/// Names of regular files in `dir`, sorted, minus dotfiles and any name
/// containing one of `exclude`.
pub fn list_candidates<S: AsRef<str>>(dir: &Path, exclude: &[S]) -> Result<Vec<String>> {
    let entries = std::fs::read_dir(dir).map_err(|source| Error::DirectoryUnavailable {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut names = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| Error::DirectoryUnavailable {
            path: dir.to_path_buf(),
            source,
        })?;

        if !entry.path().is_file() {
            continue;
        }

        let name = match entry.file_name().into_string() {
            Ok(name) => name,
            Err(raw) => {
                log::warn!("skipping non-UTF-8 file name {:?} in {:?}", raw, dir);
                continue;
            }
        };
        if name.starts_with('.') {
            continue;
        }
        if exclude.iter().any(|pattern| name.contains(pattern.as_ref())) {
            log::debug!("skipping {} in {:?}", name, dir);
            continue;
        }
        names.push(name);
    }

    names.sort();
    Ok(names)
}

/// Candidate input files for one custom command.
#[derive(Debug, Clone, Default)]
pub struct Inventory {
    pub handshakes: Vec<String>,
    pub wordlists: Vec<String>,
    pub rules: Vec<String>,
}

impl Inventory {
    /// Lists all three input directories. Fails before anything else when
    /// there are no handshakes to crack.
    pub fn scan(config: &Config) -> Result<Self> {
        let handshakes = list_handshakes(config)?;
        let wordlists = list_candidates(&config.wordlist_dir, &config.exclude)?;
        let rules = list_candidates(&config.rule_dir, &config.exclude)?;

        log::debug!(
            "inventory: {} handshakes, {} wordlists, {} rules",
            handshakes.len(),
            wordlists.len(),
            rules.len()
        );

        Ok(Self { handshakes, wordlists, rules })
    }
}

pub fn list_handshakes(config: &Config) -> Result<Vec<String>> {
    let handshakes = list_candidates(&config.handshake_dir, &config.exclude)?;
    if handshakes.is_empty() {
        return Err(Error::EmptySelectionSet {
            path: config.handshake_dir.clone(),
        });
    }
    Ok(handshakes)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Category {
    Handshakes,
    Wordlists,
    Rules,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Handshakes, Category::Wordlists, Category::Rules];

    pub fn dir(self, config: &Config) -> &PathBuf {
        match self {
            Category::Handshakes => &config.handshake_dir,
            Category::Wordlists => &config.wordlist_dir,
            Category::Rules => &config.rule_dir,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Category::Handshakes => "handshakes",
            Category::Wordlists => "wordlists",
            Category::Rules => "rules",
        }
    }
}
