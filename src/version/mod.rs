//! Node version resolution for a converted Meteor project
//!
//! The target Node version is taken from the first source that yields one:
//!
//! 1. an explicit `node_version` option
//! 2. `engines.node` in the project's `package.json`
//! 3. `MIN_NODE_VERSION` in the bundled server's `boot.js`
//! 4. [`DEFAULT_NODE_VERSION`]
//!
//! Sources never fail. A file that is missing, unreadable or malformed simply
//! yields nothing and resolution moves on to the next source.

mod sources;

pub use sources::{BootScriptSource, OverrideSource, PackageJsonSource, BOOT_SCRIPT_PATH};

use crate::config::Options;
use crate::fs::{FileSystem, RealFileSystem};
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

pub const DEFAULT_NODE_VERSION: &str = "0.10.33";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ResolveError {
    #[error("{0}")]
    Configuration(String),
}

/// Everything a source may look at
pub struct ResolveContext<'a> {
    pub options: &'a Options,
    pub output_dir: PathBuf,
    pub fs: &'a dyn FileSystem,
}

/// One link in the resolution chain
pub trait NodeVersionSource: Send + Sync {
    fn name(&self) -> &str;

    /// Returns a version when this source can supply one
    fn find(&self, ctx: &ResolveContext<'_>) -> Option<String>;
}

pub struct VersionResolver {
    fs: Arc<dyn FileSystem>,
    sources: Vec<Box<dyn NodeVersionSource>>,
}

impl VersionResolver {
    pub fn new() -> Self {
        Self::with_fs(Arc::new(RealFileSystem::new()))
    }

    /// Resolver with the standard source chain over the given file system
    pub fn with_fs(fs: Arc<dyn FileSystem>) -> Self {
        Self {
            fs,
            sources: vec![
                Box::new(OverrideSource),
                Box::new(PackageJsonSource),
                Box::new(BootScriptSource),
            ],
        }
    }

    /// Source names in the order they are consulted
    pub fn sources(&self) -> Vec<&str> {
        self.sources.iter().map(|s| s.name()).collect()
    }

    pub fn resolve(&self, options: &Options) -> Result<String, ResolveError> {
        let output_dir = options.output_dir();
        if !self.fs.is_dir(&output_dir) {
            return Err(ResolveError::Configuration(
                "Output directory not found".to_string(),
            ));
        }

        let ctx = ResolveContext {
            options,
            output_dir,
            fs: self.fs.as_ref(),
        };

        for source in &self.sources {
            if let Some(version) = source.find(&ctx) {
                info!(source = source.name(), version = %version, "Resolved Node version");
                return Ok(version);
            }
            debug!(source = source.name(), "No Node version found, trying next source");
        }

        info!(
            version = DEFAULT_NODE_VERSION,
            "No Node version detected, using default"
        );
        Ok(DEFAULT_NODE_VERSION.to_string())
    }
}

impl Default for VersionResolver {
    fn default() -> Self {
        Self::new()
    }
}

/// Resolves against the real file system. `None` options are rejected.
pub fn resolve_node_version(options: Option<&Options>) -> Result<String, ResolveError> {
    let options =
        options.ok_or_else(|| ResolveError::Configuration("options is required".to_string()))?;
    VersionResolver::new().resolve(options)
}
