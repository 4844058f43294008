use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub const DEFAULT_HASH_TYPE: u32 = 22000;
pub const DEFAULT_ABORT_TEMPERATURE: u32 = 100;
pub const DEFAULT_ABORT_WAIT: u32 = 2;
pub const DEFAULT_HANDSHAKE_EXTENSION: &str = "hc22000";
pub const DEFAULT_EXCLUDES: &[&str] = &[".gitkeep", ".gitignore", ".gz", ".zip", ".tar"];

/// On-disk layout of `.handcrack.toml`. Every field is optional.
#[derive(Debug, Default, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub hashcat: HashcatSection,
    #[serde(default)]
    pub paths: PathsSection,
    #[serde(default)]
    pub scripts: ScriptsSection,
    #[serde(default)]
    pub listing: ListingSection,
}

#[derive(Debug, Default, Deserialize)]
pub struct HashcatSection {
    pub binary: Option<String>,
    pub hash_type: Option<u32>,
    pub abort_temperature: Option<u32>,
    pub abort_wait: Option<u32>,
    pub handshake_extension: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct PathsSection {
    pub root: Option<PathBuf>,
    pub handshakes: Option<PathBuf>,
    pub wordlists: Option<PathBuf>,
    pub rules: Option<PathBuf>,
    pub potfiles: Option<PathBuf>,
    pub outputs: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ScriptsSection {
    pub manifest: Option<PathBuf>,
    pub runner: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ListingSection {
    pub exclude: Option<Vec<String>>,
}

#[derive(Default)]
pub struct Overrides<'a> {
    pub root: Option<&'a Path>,
    pub hashcat: Option<&'a str>,
}

/// Resolved settings. Built once at startup and passed by reference.
#[derive(Debug, Clone, Serialize)]
pub struct Config {
    pub hashcat: String,
    pub hash_type: u32,
    pub abort_temperature: u32,
    pub abort_wait: u32,
    pub handshake_extension: String,
    pub root: PathBuf,
    pub handshake_dir: PathBuf,
    pub wordlist_dir: PathBuf,
    pub rule_dir: PathBuf,
    pub potfile_dir: PathBuf,
    pub output_dir: PathBuf,
    pub manifest: PathBuf,
    pub script_runner: String,
    pub exclude: Vec<String>,
}

impl ConfigFile {
    /// Load the first config file found. An explicit path must exist.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::read(path);
        }

        for path in config_paths() {
            if path.exists() {
                return Self::read(&path);
            }
        }

        log::debug!("no config file found, using defaults");
        Ok(ConfigFile::default())
    }

    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::Configuration(e.to_string()))
    }

    fn read(path: &Path) -> Result<Self> {
        log::debug!("loading config from {:?}", path);
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Configuration(format!("cannot read {:?}: {}", path, e)))?;
        Self::parse(&content)
            .map_err(|e| Error::Configuration(format!("{:?}: {}", path, e)))
    }

    pub fn resolve(&self, overrides: Overrides) -> Result<Config> {
        let root = overrides
            .root
            .map(Path::to_path_buf)
            .or_else(|| std::env::var_os("HANDCRACK_ROOT").map(PathBuf::from))
            .or_else(|| self.paths.root.clone());
        let root = match root {
            Some(root) => absolute(&root)?,
            None => current_dir()?,
        };

        let hashcat = overrides.hashcat.map(String::from)
            .or_else(|| std::env::var("HANDCRACK_HASHCAT").ok())
            .or_else(|| self.hashcat.binary.clone())
            .unwrap_or_else(|| "hashcat".to_string());
        if hashcat.trim().is_empty() {
            return Err(Error::Configuration("hashcat binary must not be empty".into()));
        }

        let handshake_extension = self.hashcat.handshake_extension.as_deref()
            .unwrap_or(DEFAULT_HANDSHAKE_EXTENSION)
            .trim_start_matches('.')
            .to_string();
        if handshake_extension.is_empty() {
            return Err(Error::Configuration("handshake_extension must not be empty".into()));
        }

        let dir = |value: &Option<PathBuf>, default: &str| {
            root.join(value.clone().unwrap_or_else(|| PathBuf::from(default)))
        };

        let exclude = match &self.listing.exclude {
            Some(list) => list.iter().filter(|s| !s.is_empty()).cloned().collect(),
            None => DEFAULT_EXCLUDES.iter().map(|s| s.to_string()).collect(),
        };

        Ok(Config {
            hashcat,
            hash_type: self.hashcat.hash_type.unwrap_or(DEFAULT_HASH_TYPE),
            abort_temperature: self.hashcat.abort_temperature.unwrap_or(DEFAULT_ABORT_TEMPERATURE),
            abort_wait: self.hashcat.abort_wait.unwrap_or(DEFAULT_ABORT_WAIT),
            handshake_extension,
            handshake_dir: dir(&self.paths.handshakes, "handshakes/hccapx"),
            wordlist_dir: dir(&self.paths.wordlists, "hashcat/wordlists"),
            rule_dir: dir(&self.paths.rules, "hashcat/rules"),
            potfile_dir: dir(&self.paths.potfiles, "hashcat/potfiles"),
            output_dir: dir(&self.paths.outputs, "hashcat/outputs"),
            manifest: dir(&self.scripts.manifest, "package.json"),
            script_runner: self.scripts.runner.clone().unwrap_or_else(|| "npm".to_string()),
            exclude,
            root,
        })
    }
}

impl Config {
    /// Load from disk and resolve in one step.
    pub fn load(explicit: Option<&Path>, overrides: Overrides) -> Result<Self> {
        ConfigFile::load(explicit)?.resolve(overrides)
    }

    /// Directory named scripts run in: the one holding the manifest.
    pub fn script_dir(&self) -> &Path {
        self.manifest
            .parent()
            .filter(|dir| !dir.as_os_str().is_empty())
            .unwrap_or(&self.root)
    }

    /// Default layout rooted at `root`, ignoring config files and environment.
    pub fn with_root(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref().to_path_buf();
        Config {
            hashcat: "hashcat".to_string(),
            hash_type: DEFAULT_HASH_TYPE,
            abort_temperature: DEFAULT_ABORT_TEMPERATURE,
            abort_wait: DEFAULT_ABORT_WAIT,
            handshake_extension: DEFAULT_HANDSHAKE_EXTENSION.to_string(),
            handshake_dir: root.join("handshakes/hccapx"),
            wordlist_dir: root.join("hashcat/wordlists"),
            rule_dir: root.join("hashcat/rules"),
            potfile_dir: root.join("hashcat/potfiles"),
            output_dir: root.join("hashcat/outputs"),
            manifest: root.join("package.json"),
            script_runner: "npm".to_string(),
            exclude: DEFAULT_EXCLUDES.iter().map(|s| s.to_string()).collect(),
            root,
        }
    }
}

fn current_dir() -> Result<PathBuf> {
    std::env::current_dir()
        .map_err(|e| Error::Configuration(format!("cannot determine working directory: {}", e)))
}

fn absolute(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        Ok(current_dir()?.join(path))
    }
}

fn config_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        paths.push(cwd.join(".handcrack.toml"));
    }

    if let Some(config_dir) = dirs::config_dir() {
        paths.push(config_dir.join("handcrack").join("config.toml"));
    }

    paths
}
