use anyhow::Result;
use clap::Parser;

mod commands;

#[derive(Parser)]
#[command(author, version = env!("CARGO_PKG_VERSION"), about = "Smoke-test an MCP stdio server before wiring it into a client", long_about = None)]
struct Cli {
    /// Server command to test (default: python grype_mcp/server.py)
    command: Option<String>,

    /// Arguments passed to the server command
    #[arg(trailing_var_arg = true)]
    args: Vec<String>,

    /// Server name used in the printed configuration snippet
    #[arg(long, default_value = "grype")]
    name: String,

    /// Seconds to wait before classifying the server as idling on input
    #[arg(long, default_value = "2")]
    timeout: u64,

    /// Fail the startup check when the server exits with a nonzero status
    #[arg(long)]
    strict: bool,

    /// Output results as JSON
    #[arg(short, long)]
    json: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // No command given: fall back to the stock grype server invocation.
    let (command, args) = match cli.command {
        Some(command) => (command, cli.args),
        None => (
            "python".to_string(),
            vec!["grype_mcp/server.py".to_string()],
        ),
    };

    let exit_code = commands::smoke::execute(commands::smoke::SmokeOptions {
        command,
        args,
        name: cli.name,
        timeout_secs: cli.timeout,
        strict: cli.strict,
        json: cli.json,
    })?;
    if exit_code != 0 {
        std::process::exit(exit_code);
    }

    Ok(())
}
