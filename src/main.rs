mod cli;

use clap::Parser;
use cli::{Cli, Commands};
use dscpull::config::Config;
use dscpull::observability;
use dscpull::providers::ProviderRegistry;
use dscpull::server::{self, AppState};
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let cli = Cli::parse();
    observability::init_tracing(&cli.log_filter);

    let config = match cli.config {
        Some(path) => Config::load_from_path(path)?,
        None => Config::load()?,
    };

    let checksum = config.checksum_algorithm()?;
    let checksum_name = checksum.name();
    let registry = ProviderRegistry::from_settings(&config.handler, checksum)?;

    match cli.command {
        Commands::Serve(args) => {
            // Fail at startup rather than on the first pull
            let handler = registry.resolve_configured()?;
            info!(handler = handler.kind(), checksum = checksum_name, "Handler ready");

            let address = args.address.unwrap_or(config.server.bind_addr);
            server::run(address, AppState::new(registry, checksum_name)).await?
        }
        Commands::Providers => {
            for summary in registry.summaries() {
                let marker = if registry.configured() == Some(summary.descriptor.name) {
                    "*"
                } else {
                    " "
                };
                println!("{marker} {}", summary.descriptor);
                for (position, parameter) in summary.parameters.iter().enumerate() {
                    println!("    {position}. {} ({})", parameter.name, parameter.kind);
                }
            }
        }
        Commands::Checksum(args) => {
            let handler = registry.resolve_configured()?;
            let artifact = handler.get_configuration(&args.name)?;
            println!("{}  {} ({} bytes)", artifact.checksum, artifact.name, artifact.size);
        }
    }

    Ok(())
}
