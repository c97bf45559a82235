//! Run report - the two-step check sequence and its JSON document.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::probe::{probe_startup, ProbeOptions};
use crate::server::ServerSpec;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckStatus {
    Passed,
    Failed,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CheckResult {
    pub name: String,
    pub status: CheckStatus,
    pub detail: String,
    pub elapsed_ms: u64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SmokeReport {
    pub server: ServerSpec,
    pub checked_at: DateTime<Utc>,
    pub status: CheckStatus,
    pub checks: Vec<CheckResult>,
    /// Client configuration snippet, present only when every check passed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config: Option<serde_json::Value>,
}

impl SmokeReport {
    /// Run the checks against a server: load resolution first, startup only
    /// if that passed. Linear, no retries.
    pub fn collect(spec: &ServerSpec, options: &ProbeOptions, strict: bool) -> Self {
        let checked_at = Utc::now();
        let mut checks = Vec::new();

        let started = Instant::now();
        let load = match spec.locate() {
            Ok(path) => CheckResult {
                name: "load".to_string(),
                status: CheckStatus::Passed,
                detail: format!("server resolved to {}", path.display()),
                elapsed_ms: started.elapsed().as_millis() as u64,
            },
            Err(e) => CheckResult {
                name: "load".to_string(),
                status: CheckStatus::Failed,
                detail: format!("{e:#}"),
                elapsed_ms: started.elapsed().as_millis() as u64,
            },
        };
        let load_passed = load.status == CheckStatus::Passed;
        checks.push(load);

        if load_passed {
            let started = Instant::now();
            let startup = match probe_startup(spec, options) {
                Ok(outcome) => CheckResult {
                    name: "startup".to_string(),
                    status: if outcome.passes(strict) {
                        CheckStatus::Passed
                    } else {
                        CheckStatus::Failed
                    },
                    detail: outcome.describe(),
                    elapsed_ms: started.elapsed().as_millis() as u64,
                },
                Err(e) => CheckResult {
                    name: "startup".to_string(),
                    status: CheckStatus::Failed,
                    detail: format!("{e:#}"),
                    elapsed_ms: started.elapsed().as_millis() as u64,
                },
            };
            checks.push(startup);
        }

        let status = if checks.iter().all(|c| c.status == CheckStatus::Passed) {
            CheckStatus::Passed
        } else {
            CheckStatus::Failed
        };
        let config = (status == CheckStatus::Passed).then(|| spec.claude_config());

        Self {
            server: spec.clone(),
            checked_at,
            status,
            checks,
            config,
        }
    }

    pub fn exit_code(&self) -> i32 {
        match self.status {
            CheckStatus::Passed => 0,
            CheckStatus::Failed => 1,
        }
    }
}
