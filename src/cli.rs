use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use securewipe::DEFAULT_PASSES;

#[derive(Parser)]
#[command(
    name = "securewipe",
    about = "Overwrite files with multiple passes, then delete them and their directories",
    version
)]
pub struct Cli {
    /// Log output format (level comes from RUST_LOG, default "info")
    #[arg(long, value_enum, default_value_t = LogFormat::Pretty, global = true)]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Pretty,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// List targets, their sizes and the pass schedule (dry-run, nothing is touched)
    Scan(TargetArgs),

    /// Wipe targets (requires --confirm to actually destroy anything)
    Wipe {
        #[command(flatten)]
        targets: TargetArgs,

        /// Actually destroy the targets. Without this flag, behaves like scan.
        #[arg(long)]
        confirm: bool,

        /// Re-read each file after its final pass and compare digests
        #[arg(long)]
        verify: bool,

        /// Number of targets wiped at the same time
        #[arg(long, short = 'j', default_value_t = 1)]
        jobs: usize,
    },
}

#[derive(Args)]
pub struct TargetArgs {
    /// Files or directories to destroy
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,

    /// Overwrite passes per file (3 to 35)
    #[arg(long, short = 'n', env = "SECUREWIPE_PASSES", default_value_t = DEFAULT_PASSES)]
    pub passes: i32,
}
