//! demeteorizer - converts a Meteor application into a standalone Node.js bundle
//!
//! The conversion runs `meteor build` and works out which Node version the
//! resulting bundle targets.
//!
//! - [`build`]: spawns the Meteor build tool and classifies its exit
//! - [`version`]: resolves the target Node version from the project
//! - [`config`]: options merged over defaults
//!
//! # Example Usage
//!
//! ```no_run
//! use demeteorizer::{BuildOrchestrator, OptionOverrides, Options, VersionResolver};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let options = Options::from_overrides(OptionOverrides {
//!     input: Some("./my-app".into()),
//!     ..Default::default()
//! });
//!
//! BuildOrchestrator::new(options.clone()).run().await?;
//! let node_version = VersionResolver::new().resolve(&options)?;
//! println!("Node version: {}", node_version);
//! # Ok(())
//! # }
//! ```

pub mod build;
pub mod cli;
pub mod config;
pub mod fs;
pub mod util;
pub mod version;

pub use build::{build_args, BuildError, BuildOrchestrator, BuildOutcome};
pub use config::{ConfigError, OptionOverrides, Options};
pub use util::{config_from_env, init_logging, LoggingConfig};
pub use version::{resolve_node_version, ResolveError, VersionResolver, DEFAULT_NODE_VERSION};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
