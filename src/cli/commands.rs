use crate::config::OptionOverrides;
use crate::util::logging::{config_from_env, parse_level, LoggingConfig};
use clap::Parser;
use std::path::PathBuf;
use tracing::Level;

/// Converts a Meteor app into a standalone Node.js application
#[derive(Parser, Debug)]
#[command(
    name = "demeteorizer",
    version,
    about = "Converts a Meteor app into a standalone Node.js application",
    long_about = "demeteorizer runs `meteor build` on a Meteor project and reports the Node \
                  version the resulting bundle must run under.\n\n\
                  Examples:\n  \
                  demeteorizer\n  \
                  demeteorizer --input ./my-app --output ./dist\n  \
                  demeteorizer --architecture os.linux.x86_64 --node-version 0.10.40"
)]
pub struct CliArgs {
    #[arg(
        short = 'o',
        long = "output",
        visible_alias = "directory",
        value_name = "DIR",
        help = "Output directory"
    )]
    pub directory: Option<PathBuf>,

    #[arg(
        short = 'i',
        long,
        value_name = "DIR",
        help = "Meteor project directory (defaults to current directory)"
    )]
    pub input: Option<PathBuf>,

    #[arg(short = 's', long, value_name = "URL", help = "Server URL")]
    pub server: Option<String>,

    #[arg(short = 'a', long, value_name = "ARCH", help = "Architecture build target")]
    pub architecture: Option<String>,

    #[arg(short = 'n', long, value_name = "VERSION", help = "Node version to target")]
    pub node_version: Option<String>,

    #[arg(short = 'd', long, help = "Build in debug mode (don't minify, etc)")]
    pub debug: bool,

    #[arg(long, help = "Skip building mobile apps")]
    pub server_only: bool,

    #[arg(long, help = "Pass --verbose to the Meteor build")]
    pub verbose: bool,

    #[arg(long, value_name = "PATH", help = "Build executable to invoke")]
    pub tool: Option<String>,

    #[arg(long, value_name = "LEVEL", help = "Set logging level")]
    pub log_level: Option<String>,

    #[arg(
        short = 'q',
        long,
        help = "Quiet mode - suppress non-error output"
    )]
    pub quiet: bool,
}

impl CliArgs {
    /// Unset flags stay `None` so the configured defaults apply.
    pub fn overrides(&self) -> OptionOverrides {
        OptionOverrides {
            server: self.server.clone(),
            directory: self.directory.clone(),
            architecture: self.architecture.clone(),
            debug: self.debug.then_some(true),
            server_only: self.server_only.then_some(true),
            verbose: self.verbose.then_some(true),
            input: self.input.clone(),
            node_version: self.node_version.clone(),
            tool: self.tool.clone(),
        }
    }

    /// Environment settings, with `--log-level` or `--quiet` replacing the level
    pub fn logging_config(&self) -> LoggingConfig {
        let mut config = config_from_env();

        if let Some(level_str) = &self.log_level {
            config.level = parse_level(level_str);
        } else if self.quiet {
            config.level = Level::ERROR;
        }

        config
    }
}
