use clap::{Parser, Subcommand};
use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "dscpull")]
#[command(about = "DSC pull server", long_about = None)]
pub struct Cli {
    /// Configuration file (defaults to $DSCPULL_CONFIG or config/dscpull.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Tracing filter used when RUST_LOG is unset
    #[arg(long, global = true, default_value = dscpull::observability::DEFAULT_FILTER)]
    pub log_filter: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the HTTP server
    Serve(ServeArgs),
    /// List handler providers and their parameters
    Providers,
    /// Resolve the configured handler and print a configuration checksum
    Checksum(ChecksumArgs),
}

#[derive(clap::Args, Debug)]
pub struct ServeArgs {
    /// Address to bind the HTTP server to (overrides server.bind_addr)
    #[arg(long)]
    pub address: Option<SocketAddr>,
}

#[derive(clap::Args, Debug)]
pub struct ChecksumArgs {
    /// Configuration name
    pub name: String,
}
