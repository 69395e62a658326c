use anyhow::{Context, Result};
use clap::{Arg, ArgAction, Command};
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

use opkit::binder::{self, BinderOptions};
use opkit::config::AppContext;
use opkit::handlers::ConfigHandler;
use opkit_core::Api;

fn base_command() -> Command {
    Command::new("opkit")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Pluggable operation registry with a metadata-driven CLI")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("internal")
                .long("internal")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Expose internal operations and properties"),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .global(true)
                .action(ArgAction::Count)
                .help("Increase log verbosity"),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Render the report as JSON"),
        )
        .arg(
            Arg::new("timeout")
                .long("timeout")
                .global(true)
                .value_name("SECONDS")
                .value_parser(clap::value_parser!(u64))
                .help("Abort the wait for an operation result after this many seconds"),
        )
        .arg(
            Arg::new("project-dir")
                .long("project-dir")
                .global(true)
                .value_name("DIR")
                .value_parser(clap::value_parser!(PathBuf))
                .help("Directory to load configuration from (defaults to the current directory)"),
        )
}

// The command surface itself depends on --internal and --project-dir
// (which operations exist, where configuration comes from), so those two
// are pre-scanned from argv before clap ever parses.

fn prescan_internal() -> bool {
    std::env::args().skip(1).any(|arg| arg == "--internal")
}

fn prescan_project_dir() -> Option<PathBuf> {
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        if arg == "--project-dir" {
            return args.next().map(PathBuf::from);
        }
        if let Some(rest) = arg.strip_prefix("--project-dir=") {
            return Some(PathBuf::from(rest));
        }
    }
    None
}

fn prescan_verbosity() -> usize {
    let mut count = 0;
    for arg in std::env::args().skip(1) {
        if arg == "--verbose" {
            count += 1;
        } else if let Some(rest) = arg.strip_prefix('-') {
            if !rest.is_empty() && !rest.starts_with('-') && rest.chars().all(|c| c == 'v') {
                count += rest.len();
            }
        }
    }
    count
}

fn init_tracing(context: &AppContext) {
    let default_filter = match prescan_verbosity() {
        0 => context
            .config
            .cli
            .log_filter
            .clone()
            .unwrap_or_else(|| "info".to_string()),
        1 => "debug".to_string(),
        _ => "trace".to_string(),
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let working_dir = match prescan_project_dir() {
        Some(dir) => dir,
        None => std::env::current_dir().context("Failed to get current directory")?,
    };
    let context = AppContext::load(working_dir)?;
    init_tracing(&context);

    let internal = prescan_internal() || context.config.cli.internal;

    let mut api = Api::new();
    api.add_handler(Box::new(ConfigHandler::new(&context)));
    anyhow::ensure!(api.validate(), "no handlers registered");

    let mut ops = api.operations();
    let command = binder::attach_operations(base_command(), &ops, internal);
    let matches = command.get_matches();

    let Some((name, sub)) = matches.subcommand() else {
        anyhow::bail!("no command selected");
    };
    let timeout = sub
        .get_one::<u64>("timeout")
        .copied()
        .or(context.config.cli.timeout_secs)
        .map(Duration::from_secs);
    let options = BinderOptions { internal, timeout };

    let report = binder::dispatch(&mut ops, name, sub, options).await?;
    if sub.get_flag("json") {
        println!("{}", serde_json::to_string_pretty(&report.to_json())?);
    } else {
        print!("{}", report.render_text());
    }
    Ok(())
}
