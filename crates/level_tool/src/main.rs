use std::env;
use std::io;
use std::process::ExitCode;

use level_tool::{parse_command_line, run, IGNORE_ENV_VAR};
use tracing::error;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    init_tracing();
    match run_cli() {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            error!(error = %message, "level_tool_failed");
            eprintln!("{message}");
            ExitCode::from(1)
        }
    }
}

fn run_cli() -> Result<(), String> {
    let args = env::args().skip(1).collect::<Vec<_>>();
    if args.is_empty() {
        return Err(usage_text());
    }
    if args[0] == "-h" || args[0] == "--help" {
        println!("{}", usage_text());
        return Ok(());
    }

    let (command, options) =
        parse_command_line(&args).map_err(|message| format!("{message}\n\n{}", usage_text()))?;
    run(command, &options, &mut io::stdout())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .compact()
        .init();
}

fn usage_text() -> String {
    let defaults = format!(
        "Defaults: compact reads ignored ranges from {IGNORE_ENV_VAR} when no --ignore is given"
    );
    [
        "level_tool - ID migration and compaction for level documents",
        "",
        "Usage:",
        "  level_tool [--dry-run] [--output <path>] [--pretty] migrate <level.json> --kind <kind> [<a-b>c>...] [--steps-file <path>]",
        "  level_tool [--dry-run] [--output <path>] [--pretty] compact <level.json> --kind <kind> [--ignore <a-b,c>]...",
        "  level_tool used <level.json> --kind <kind>",
        "",
        "Kinds: group, color, item, block",
        "Steps: 1-5>6 moves 1..=5 to 6..=10; 7>9 moves a single id",
        defaults.as_str(),
    ]
    .join("\n")
}
