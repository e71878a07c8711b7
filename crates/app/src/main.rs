// CLI modules
mod args;
mod op;
mod ops;
mod output;

use args::Args;
use clap::{Parser, Subcommand};
use op::Op;
use ops::{Add, Init, Ls, Rm, Service, Version};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

command_enum! {
    (Init, Init),
    (Add, Add),
    (Ls, Ls),
    (Rm, Rm),
    (Service, Service),
    (Version, Version),
}

/// Logs go to stderr so stdout only carries command output.
fn init_logging(log_level: LevelFilter) -> tracing_appender::non_blocking::WorkerGuard {
    let (stderr_writer, guard) = tracing_appender::non_blocking(std::io::stderr());

    let env_filter = EnvFilter::builder()
        .with_default_directive(log_level.into())
        .from_env_lossy();

    let stderr_layer = tracing_subscriber::fmt::layer()
        .compact()
        .with_writer(stderr_writer)
        .with_filter(env_filter);

    tracing_subscriber::registry().with(stderr_layer).init();
    register_panic_logger();

    let build = common::build_info!();
    tracing::debug!(
        build_profile = build.build_profile,
        features = build.build_features,
        version = build.version,
        "rpin starting up"
    );

    guard
}

/// Registers a panic hook that logs panics using the `tracing` crate
fn register_panic_logger() {
    std::panic::set_hook(Box::new(|panic| match panic.location() {
        Some(loc) => {
            tracing::error!(
                message = %panic,
                panic.file = loc.file(),
                panic.line = loc.line(),
                panic.column = loc.column(),
            );
        }
        None => tracing::error!(message = %panic),
    }));
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    let guard = init_logging(args.log_level);

    let ctx = op::OpContext::new(args.config_path);

    let cancel = ctx.cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::debug!("interrupt received, cancelling");
            cancel.cancel();
        }
    });

    let code = match args.command.execute(&ctx).await {
        Ok(output) => {
            let output = output.to_string();
            if !output.is_empty() {
                println!("{}", output);
            }
            0
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    };

    // flush buffered log lines before exiting
    drop(guard);
    std::process::exit(code);
}
