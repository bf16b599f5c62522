use demeteorizer::cli::CliArgs;
use demeteorizer::util::logging::init_logging;
use demeteorizer::{BuildOrchestrator, Options, VersionResolver, VERSION};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::debug;

#[tokio::main]
async fn main() {
    let args = CliArgs::parse();
    init_logging(args.logging_config());

    debug!("demeteorizer v{} starting", VERSION);
    debug!("Arguments: {:?}", args);

    let exit_code = match run(&args).await {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            1
        }
    };

    std::process::exit(exit_code);
}

async fn run(args: &CliArgs) -> Result<()> {
    let options = Options::from_overrides(args.overrides());
    options.validate()?;
    debug!("{}", options);

    BuildOrchestrator::new(options.clone())
        .run()
        .await
        .context("Meteor build failed")?;

    let node_version = VersionResolver::new()
        .resolve(&options)
        .context("Unable to determine Node version")?;

    println!("Node version: {}", node_version);
    Ok(())
}
