mod cli;
mod output;

use std::process;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use securewipe::utils::{display_path, entry_size, format_size};
use securewipe::{
    wipe_batch, CancelToken, ConfigError, PassPlan, TracingReporter, WipeConfig, WipeOptions,
    WipeTarget,
};

use crate::cli::{Cli, Command, LogFormat, TargetArgs};

const DEFAULT_LOG_LEVEL: &str = "info";

fn main() {
    let cli = Cli::parse();
    init_logging(cli.log_format);

    let code = match run(cli.command) {
        Ok(true) => 0,
        Ok(false) => 1,
        Err(err) => {
            output::print_alert(&err.to_string());
            2
        }
    };
    process::exit(code);
}

fn init_logging(format: LogFormat) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);
    let installed = match format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Pretty => builder.try_init(),
    };
    if let Err(err) = installed {
        eprintln!("failed to install tracing subscriber: {err}");
    }
}

/// Returns whether every target was destroyed.
fn run(command: Command) -> Result<bool, ConfigError> {
    output::print_banner();
    match command {
        Command::Scan(args) => {
            scan(&args)?;
            Ok(true)
        }
        Command::Wipe {
            targets,
            confirm,
            verify,
            jobs,
        } => {
            if !confirm {
                output::print_dry_run_header();
                scan(&targets)?;
                output::print_dry_run_footer();
                return Ok(true);
            }
            let config = WipeConfig {
                passes: targets.passes,
                options: WipeOptions { verify },
                jobs,
            };
            wipe(&targets, &config)
        }
    }
}

fn discover(args: &TargetArgs) -> Vec<WipeTarget> {
    args.paths
        .iter()
        .filter_map(|path| match WipeTarget::discover(path) {
            Ok(target) => Some(target),
            Err(err) => {
                output::print_wipe_error(&path.display().to_string(), &err.to_string());
                None
            }
        })
        .collect()
}

fn scan(args: &TargetArgs) -> Result<(), ConfigError> {
    let config = WipeConfig {
        passes: args.passes,
        ..WipeConfig::default()
    };
    config.validate()?;
    output::print_plan(args.passes, &PassPlan::new(args.passes).to_string());

    output::print_scan_header();
    let mut total = 0u64;
    for target in discover(args) {
        let size = entry_size(&target.path);
        total += size;
        output::print_scan_entry(
            &display_path(&target.path),
            &target.kind.to_string(),
            &format_size(size),
        );
    }
    output::print_scan_total(&format_size(total));
    Ok(())
}

fn wipe(args: &TargetArgs, config: &WipeConfig) -> Result<bool, ConfigError> {
    config.validate()?;
    output::print_plan(config.passes, &PassPlan::new(config.passes).to_string());

    let targets = discover(args);
    let unresolved = args.paths.len() - targets.len();
    let report = wipe_batch(&targets, config, &CancelToken::new(), &TracingReporter)?;

    for outcome in &report.outcomes {
        let path = display_path(&outcome.path);
        match outcome.error() {
            None => output::print_wiped(&path, &format_size(outcome.bytes_processed)),
            Some(err) => output::print_wipe_error(&path, &err.detail()),
        }
    }
    println!();

    let stats = &report.stats;
    output::print_summary_header(config.passes);
    output::print_summary_row("Targets destroyed:", &stats.succeeded.to_string());
    output::print_summary_row("Files wiped:", &stats.files_wiped.to_string());
    output::print_summary_row("Directories removed:", &stats.directories_removed.to_string());
    output::print_rule();
    if !stats.errors.is_empty() {
        output::print_alert(&format!("{} entries could not be destroyed:", stats.errors.len()));
        for line in &stats.errors {
            println!("    {line}");
        }
        if report.outcomes.iter().any(|o| o.content_may_survive()) {
            output::print_alert("some data may still be recoverable");
        }
        println!();
    }
    output::print_wipe_complete(&format_size(stats.bytes_wiped));

    Ok(report.all_succeeded() && unresolved == 0)
}
