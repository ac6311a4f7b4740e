/*!

This is the command line interface for uploading secret content to a cluster.

!*/

mod cluster;
mod content;
mod error;
mod secret;
mod secret_update;

use clap::Parser;
use cluster::ClusterConfig;
use env_logger::Builder;
use error::Result;
use log::{warn, LevelFilter};
use secretsys_model::constants::DEFAULT_NAMESPACE;
use secretsys_model::ExecutionContext;
use std::path::PathBuf;
use std::time::Duration;

/// The command line interface for managing secrets in a cluster.
#[derive(Debug, Parser)]
#[clap(author, version, about)]
struct Args {
    /// Set logging verbosity [trace|debug|info|warn|error]. If the environment variable `RUST_LOG`
    /// is present, it overrides the default logging behavior. See https://docs.rs/env_logger/latest
    #[clap(long = "log-level", default_value = "info")]
    log_level: LevelFilter,
    /// Path to the kubeconfig file. Also can be passed with the KUBECONFIG environment variable.
    #[clap(long = "kubeconfig")]
    kubeconfig: Option<PathBuf>,
    /// The namespace that holds the secret.
    #[clap(long = "namespace", short = 'n', default_value = DEFAULT_NAMESPACE)]
    namespace: String,
    /// Give up on calls to the cluster after this many seconds.
    #[clap(long = "timeout")]
    timeout: Option<u64>,
    #[clap(subcommand)]
    command: Command,
}

#[derive(Debug, Parser)]
enum Command {
    /// Manage secrets in the cluster.
    Secret(secret::Secret),
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let args = Args::parse();
    init_logger(args.log_level);
    let ctx = match args.timeout {
        Some(secs) => ExecutionContext::with_timeout(Duration::from_secs(secs)),
        None => ExecutionContext::new(),
    };
    cancel_on_interrupt(&ctx);
    if let Err(e) = run(args, &ctx).await {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

async fn run(args: Args, ctx: &ExecutionContext) -> Result<()> {
    let cluster = ClusterConfig::new(args.kubeconfig, args.namespace);
    match args.command {
        Command::Secret(secret) => secret.run(&cluster, ctx).await,
    }
}

/// Cancel `ctx` when the process receives Ctrl-C so that in-flight cluster calls are abandoned.
fn cancel_on_interrupt(ctx: &ExecutionContext) {
    let token = ctx.cancellation_token();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, cancelling");
            token.cancel();
        }
    });
}

/// Initialize the logger with the value passed by `--log-level` (or its default) when the
/// `RUST_LOG` environment variable is not present. If present, the `RUST_LOG` environment variable
/// overrides `--log-level`/`level`.
fn init_logger(level: LevelFilter) {
    match std::env::var(env_logger::DEFAULT_FILTER_ENV).ok() {
        Some(_) => {
            // RUST_LOG exists; env_logger will use it.
            Builder::from_default_env().init();
        }
        None => {
            // RUST_LOG does not exist; use default log level for this crate only.
            Builder::new()
                .filter(Some(env!("CARGO_CRATE_NAME")), level)
                .init();
        }
    }
}
