//! Configuration management for demeteorizer
//!
//! Options are built once per invocation by merging caller-supplied overrides
//! over a fixed set of defaults. They are never mutated afterwards.
//!
//! # Environment Variables
//!
//! - `DEMETEORIZER_TOOL`: Build executable looked up on `$PATH` - default: "meteor"
//! - `DEMETEORIZER_NODE_VERSION`: Node version used when the caller gives none
//!
//! Values supplied by the caller always take precedence over the environment.
//!
//! # Example
//!
//! ```no_run
//! use demeteorizer::config::{OptionOverrides, Options};
//!
//! let options = Options::from_overrides(OptionOverrides {
//!     input: Some("/path/to/meteor/app".into()),
//!     architecture: Some("os.linux.x86_64".to_string()),
//!     ..Default::default()
//! });
//!
//! options.validate().expect("Invalid configuration");
//! println!("{}", options.output_dir().display());
//! ```

use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

pub const DEFAULT_SERVER: &str = "localhost:3000";
pub const DEFAULT_DIRECTORY: &str = ".demeteorized";
pub const DEFAULT_TOOL: &str = "meteor";

const TOOL_ENV: &str = "DEMETEORIZER_TOOL";
const NODE_VERSION_ENV: &str = "DEMETEORIZER_NODE_VERSION";

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration validation failed
    #[error("Configuration validation failed: {0}")]
    ValidationFailed(String),
}

/// Options for a single conversion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Options {
    /// URL of the server the bundle talks to
    pub server: String,

    /// Output directory, relative to `input` unless absolute
    pub directory: PathBuf,

    /// Architecture build target
    pub architecture: Option<String>,

    pub debug: bool,

    pub server_only: bool,

    pub verbose: bool,

    /// Meteor project directory
    pub input: PathBuf,

    /// Explicit Node version, skips detection when set
    pub node_version: Option<String>,

    /// Build executable name or path
    pub tool: String,
}

/// Caller-supplied fields. Anything left as `None` falls back to a default.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OptionOverrides {
    pub server: Option<String>,
    pub directory: Option<PathBuf>,
    pub architecture: Option<String>,
    pub debug: Option<bool>,
    pub server_only: Option<bool>,
    pub verbose: Option<bool>,
    pub input: Option<PathBuf>,
    pub node_version: Option<String>,
    pub tool: Option<String>,
}

impl Default for Options {
    /// Defaults, with `DEMETEORIZER_*` environment variables applied
    fn default() -> Self {
        let tool = env::var(TOOL_ENV)
            .ok()
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_TOOL.to_string());

        let node_version = env::var(NODE_VERSION_ENV).ok().filter(|v| !v.is_empty());

        Self {
            server: DEFAULT_SERVER.to_string(),
            directory: PathBuf::from(DEFAULT_DIRECTORY),
            architecture: None,
            debug: false,
            server_only: false,
            verbose: false,
            input: PathBuf::from("."),
            node_version,
            tool,
        }
    }
}

impl Options {
    /// Merges `overrides` over the defaults
    pub fn from_overrides(overrides: OptionOverrides) -> Self {
        let defaults = Self::default();

        Self {
            server: overrides.server.unwrap_or(defaults.server),
            directory: overrides.directory.unwrap_or(defaults.directory),
            architecture: overrides.architecture.or(defaults.architecture),
            debug: overrides.debug.unwrap_or(defaults.debug),
            server_only: overrides.server_only.unwrap_or(defaults.server_only),
            verbose: overrides.verbose.unwrap_or(defaults.verbose),
            input: overrides.input.unwrap_or(defaults.input),
            node_version: overrides.node_version.or(defaults.node_version),
            tool: overrides.tool.unwrap_or(defaults.tool),
        }
    }

    /// Output directory resolved against the input directory
    pub fn output_dir(&self) -> PathBuf {
        self.input.join(&self.directory)
    }

    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when `server`, `directory` or `tool` is empty
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.trim().is_empty() {
            return Err(ConfigError::ValidationFailed(
                "Server must not be empty".to_string(),
            ));
        }

        if self.directory.as_os_str().is_empty() {
            return Err(ConfigError::ValidationFailed(
                "Output directory must not be empty".to_string(),
            ));
        }

        if self.tool.trim().is_empty() {
            return Err(ConfigError::ValidationFailed(
                "Build tool must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}

impl fmt::Display for Options {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Demeteorizer Configuration:")?;
        writeln!(f, "  Input: {}", self.input.display())?;
        writeln!(f, "  Output Directory: {}", self.directory.display())?;
        writeln!(f, "  Server: {}", self.server)?;
        if let Some(ref arch) = self.architecture {
            writeln!(f, "  Architecture: {}", arch)?;
        }
        if let Some(ref version) = self.node_version {
            writeln!(f, "  Node Version: {}", version)?;
        }
        writeln!(f, "  Debug: {}", self.debug)?;
        writeln!(f, "  Server Only: {}", self.server_only)?;
        writeln!(f, "  Verbose: {}", self.verbose)?;
        writeln!(f, "  Build Tool: {}", self.tool)?;
        Ok(())
    }
}
