pub use clap::Parser;

use std::path::PathBuf;

use tracing::level_filters::LevelFilter;

#[derive(Parser, Debug)]
#[command(name = "rpin")]
#[command(about = "Pin IPFS content to remote pinning services")]
pub struct Args {
    /// Path to the rpin config directory (defaults to ~/.rpin)
    #[arg(long, global = true)]
    pub config_path: Option<PathBuf>,

    /// Log level when RUST_LOG is unset (error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: LevelFilter,

    #[command(subcommand)]
    pub command: crate::Command,
}
