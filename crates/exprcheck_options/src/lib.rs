//! exprcheck_options: exprcheck.json parsing.
//!
//! The config file names the declaration context the expressions are checked
//! against, an optional built-ins fixture override, and the expressions
//! themselves. Command-line flags take precedence over every field.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default config file name looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "exprcheck.json";

/// The exprcheck.json file structure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ExprcheckConfig {
    /// Declaration file providing the bindings expressions see.
    pub context: Option<String>,
    /// Replacement for the built-in types fixture.
    pub builtins: Option<String>,
    /// Expressions to check.
    pub expressions: Option<Vec<String>>,
    /// Render diagnostics graphically when stderr is a terminal.
    pub pretty: Option<bool>,
}

impl ExprcheckConfig {
    /// Make `context` and `builtins` relative to `base`, the directory of
    /// the config file. Absolute paths are left alone.
    pub fn resolve_paths(mut self, base: &Path) -> Self {
        let resolve = |path: String| -> String {
            if Path::new(&path).is_absolute() {
                path
            } else {
                base.join(path).to_string_lossy().into_owned()
            }
        };
        self.context = self.context.map(resolve);
        self.builtins = self.builtins.map(resolve);
        self
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file '{}'", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config file '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Parse an exprcheck.json document.
pub fn parse_config(content: &str) -> Result<ExprcheckConfig, serde_json::Error> {
    serde_json::from_str(content)
}

/// Read and parse a config file, resolving its paths against the file's
/// directory.
pub fn parse_config_file(path: impl AsRef<Path>) -> Result<ExprcheckConfig, ConfigError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let config = parse_config(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    let base = path.parent().unwrap_or_else(|| Path::new(""));
    Ok(config.resolve_paths(base))
}
