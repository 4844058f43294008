use std::path::Path;

use serde::Deserialize;

use crate::error::{Error, Result};

/// One named script from the manifest's `scripts` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Script {
    pub name: String,
    pub command: String,
}

impl Script {
    /// Menu label, `name: command`.
    pub fn label(&self) -> String {
        format!("{}: {}", self.name, self.command)
    }
}

#[derive(Deserialize)]
struct RawManifest {
    scripts: Option<serde_json::Map<String, serde_json::Value>>,
}

/// Read the scripts table of a `package.json`-style manifest, in file order.
pub fn load(path: &Path) -> Result<Vec<Script>> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::Configuration(format!("error reading {}: {}", path.display(), e)))?;
    parse(&content).map_err(|e| match e {
        Error::Configuration(msg) => Error::Configuration(format!("{}: {}", path.display(), msg)),
        other => other,
    })
}

pub fn parse(content: &str) -> Result<Vec<Script>> {
    let raw: RawManifest =
        serde_json::from_str(content).map_err(|e| Error::Configuration(e.to_string()))?;

    let scripts = raw
        .scripts
        .filter(|scripts| !scripts.is_empty())
        .ok_or_else(|| Error::Configuration("no scripts found".to_string()))?;

    scripts
        .into_iter()
        .map(|(name, value)| match value {
            serde_json::Value::String(command) => Ok(Script { name, command }),
            other => Err(Error::Configuration(format!(
                "script '{}' must be a string, found {}",
                name, other
            ))),
        })
        .collect()
}
