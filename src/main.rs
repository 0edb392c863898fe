use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use proto_mirror::cli::orchestration::{run_sync_workflow, SyncWorkflowArgs};
use proto_mirror::git::Backend;
use proto_mirror::ui;

#[derive(clap::Parser)]
#[command(
    name = "proto-mirror",
    version,
    about = "Mirror upstream .proto files and release tags into a downstream repository"
)]
struct Args {
    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<PathBuf>,

    #[arg(long, help = "Upstream working tree (default: ./v2ray-core)")]
    upstream: Option<PathBuf>,

    #[arg(long, help = "Mirror working tree (default: ./v2ray-proto)")]
    mirror: Option<PathBuf>,

    #[arg(short, long, help = "Number of newest upstream tags to consider")]
    limit: Option<usize>,

    #[arg(long, value_enum, help = "Git implementation to use")]
    backend: Option<Backend>,

    #[arg(long, help = "Preview what would happen without making changes")]
    dry_run: bool,

    #[arg(short, long, help = "Log every git operation")]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("proto_mirror={}", default_level)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let workflow_args = SyncWorkflowArgs {
        config_path: args.config,
        upstream: args.upstream,
        mirror: args.mirror,
        limit: args.limit,
        backend: args.backend,
        dry_run: args.dry_run,
    };

    if let Err(e) = run_sync_workflow(workflow_args) {
        ui::display_error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}
