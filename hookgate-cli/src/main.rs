//! Hookgate CLI - gate dispatcher for Claude Code hook events.
//!
//! Commands:
//! - `hookgate` (no args): Read JSON from stdin, run gates, write JSON to stdout
//! - `hookgate validate`: Load and validate the merged gates.json
//! - `hookgate list`: Show hook rules and gate definitions
//! - `hookgate session show|clear`: Inspect or reset the session record
//!
//! Exit codes:
//! - 0: Success, including a blocking decision (JSON on stdout)
//! - 1: Malformed input or fatal error (JSON on stderr)

use std::io::{self, IsTerminal, Read, Write};

use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use hookgate::cli::resolve_cwd;
use hookgate::hook::{run_hook, ERROR_EXIT_CODE};
use hookgate::logging::FileWriterGuard;
use hookgate::{list, session, validate};
use hookgate::{Cli, Commands, SessionAction};
use hookgate_common::{ConfigLoader, GateDispatcher};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let filter = if cli.debug {
        EnvFilter::new("hookgate=debug,hookgate_common=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false);

    match cli.log_file.as_deref().map(FileWriterGuard::open) {
        Some(Ok(writer)) => builder.with_writer(move || writer.clone()).init(),
        Some(Err(e)) => {
            builder.with_writer(io::stderr).init();
            tracing::warn!("Could not open log file: {}", e);
        }
        None => builder.with_writer(io::stderr).init(),
    }

    let exit_code = dispatch_command(cli).await;
    std::process::exit(exit_code);
}

/// Dispatch a parsed CLI to the appropriate command handler.
async fn dispatch_command(cli: Cli) -> i32 {
    match cli.command {
        Some(cmd) => dispatch_subcommand(cmd),
        None => run_hook_mode().await,
    }
}

/// Handle an explicit subcommand.
fn dispatch_subcommand(cmd: Commands) -> i32 {
    match cmd {
        Commands::Validate { cwd } => with_cwd(cwd, |cwd| {
            validate::run_validate(&ConfigLoader::from_env(), cwd)
        }),
        Commands::List { cwd, verbose } => with_cwd(cwd, |cwd| {
            list::run_list(&ConfigLoader::from_env(), cwd, verbose)
        }),
        Commands::Session { action } => match action {
            SessionAction::Show { cwd } => with_cwd(cwd, session::run_show),
            SessionAction::Clear { cwd } => with_cwd(cwd, session::run_clear),
        },
    }
}

fn with_cwd(cwd: Option<std::path::PathBuf>, run: impl FnOnce(&std::path::Path) -> i32) -> i32 {
    match resolve_cwd(cwd) {
        Ok(cwd) => run(&cwd),
        Err(e) => result_to_exit::<io::Error>(Err(e)),
    }
}

/// Convert a `Result<(), E: Display>` to an exit code.
fn result_to_exit<E: std::fmt::Display>(result: Result<(), E>) -> i32 {
    match result {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}

/// Read one event from stdin, dispatch it and write the decision.
async fn run_hook_mode() -> i32 {
    if io::stdin().is_terminal() {
        Cli::command().print_help().ok();
        println!();
        return 0;
    }

    let mut raw = String::new();
    if let Err(e) = io::stdin().read_to_string(&mut raw) {
        tracing::error!("Failed to read stdin: {}", e);
        return ERROR_EXIT_CODE;
    }

    let dispatcher = GateDispatcher::from_env();
    let run = run_hook(&raw, &dispatcher).await;

    if let Some(json) = run.stdout {
        write_line(&mut io::stdout(), &json);
    }
    if let Some(json) = run.stderr {
        write_line(&mut io::stderr(), &json);
    }

    run.exit_code
}

/// Best-effort: the exit code still reaches the caller.
fn write_line(out: &mut impl Write, json: &str) {
    if let Err(e) = out
        .write_all(json.as_bytes())
        .and_then(|_| out.write_all(b"\n"))
        .and_then(|_| out.flush())
    {
        tracing::error!("Failed to write output: {}", e);
    }
}
