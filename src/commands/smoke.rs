use anyhow::Result;
use std::time::Duration;

use mcp_smoke::probe::ProbeOptions;
use mcp_smoke::report::{CheckStatus, SmokeReport};
use mcp_smoke::server::ServerSpec;

pub struct SmokeOptions {
    pub command: String,
    pub args: Vec<String>,
    pub name: String,
    pub timeout_secs: u64,
    pub strict: bool,
    pub json: bool,
}

pub fn execute(options: SmokeOptions) -> Result<i32> {
    let spec = ServerSpec::new(&options.name, &options.command, options.args);
    let probe_options = ProbeOptions {
        timeout: Duration::from_secs(options.timeout_secs),
    };

    if options.json {
        let report = SmokeReport::collect(&spec, &probe_options, options.strict);
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(report.exit_code());
    }

    println!("🧪 Testing MCP server '{}'...", spec.name);
    println!("{}", "=".repeat(40));

    let report = SmokeReport::collect(&spec, &probe_options, options.strict);
    for check in &report.checks {
        match check.status {
            CheckStatus::Passed => println!("✅ {}: {}", check.name, check.detail),
            CheckStatus::Failed => println!("❌ {}: {}", check.name, check.detail),
        }
    }

    if report.status == CheckStatus::Passed {
        println!("\n🎉 All checks passed!");
        println!("\nReady for MCP Inspector testing:");
        println!("  {}", spec.inspector_hint());
        println!("\nOr use with Claude Desktop:");
        if let Some(config) = &report.config {
            println!("{}", serde_json::to_string_pretty(config)?);
        }
    } else {
        println!("\n❌ Smoke test failed");
    }

    Ok(report.exit_code())
}
