//! Server under test - command resolution and client configuration snippet.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// An MCP stdio server as a client would invoke it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSpec {
    /// Name the server appears under in client configuration.
    pub name: String,
    pub command: String,
    pub args: Vec<String>,
    #[serde(default)]
    pub env: BTreeMap<String, String>,
}

impl ServerSpec {
    pub fn new(name: &str, command: &str, args: Vec<String>) -> Self {
        Self {
            name: name.to_string(),
            command: command.to_string(),
            args,
            env: BTreeMap::new(),
        }
    }

    /// Resolve the server command to a concrete executable.
    ///
    /// Commands containing a path separator are checked directly (after tilde
    /// expansion); bare names go through a PATH lookup.
    pub fn locate(&self) -> Result<PathBuf> {
        if self.command.contains('/') {
            let expanded = shellexpand::tilde(&self.command);
            let path = PathBuf::from(expanded.as_ref());
            if !path.is_file() {
                bail!("'{}' does not exist", path.display());
            }
            Ok(path)
        } else {
            which::which(&self.command)
                .with_context(|| format!("'{}' not found in PATH", self.command))
        }
    }

    /// Claude Desktop `mcpServers` entry for this server.
    pub fn claude_config(&self) -> serde_json::Value {
        let entry = serde_json::json!({
            "command": self.command,
            "args": self.args,
            "env": self.env,
        });
        let mut servers = serde_json::Map::new();
        servers.insert(self.name.clone(), entry);
        serde_json::json!({ "mcpServers": servers })
    }

    /// MCP Inspector invocation for this server.
    pub fn inspector_hint(&self) -> String {
        let mut hint = format!("npx @modelcontextprotocol/inspector {}", self.command);
        for arg in &self.args {
            hint.push(' ');
            hint.push_str(arg);
        }
        hint
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn locate_finds_path_binaries() {
        let spec = ServerSpec::new("shell", "sh", vec![]);
        let path = spec.locate().unwrap();
        assert!(path.is_absolute());
    }

    #[test]
    fn locate_rejects_unknown_commands() {
        let spec = ServerSpec::new("ghost", "no-such-mcp-binary-zzz", vec![]);
        assert!(spec.locate().is_err());
    }

    #[test]
    fn locate_rejects_missing_paths() {
        let spec = ServerSpec::new("ghost", "/no/such/dir/server.py", vec![]);
        assert!(spec.locate().is_err());
    }

    #[test]
    fn claude_config_matches_client_shape() {
        let spec = ServerSpec::new("grype", "python", vec!["grype_mcp/server.py".into()]);
        let config = spec.claude_config();
        assert_eq!(config["mcpServers"]["grype"]["command"], "python");
        assert_eq!(config["mcpServers"]["grype"]["args"][0], "grype_mcp/server.py");
        assert_eq!(config["mcpServers"]["grype"]["env"], serde_json::json!({}));
    }

    #[test]
    fn inspector_hint_includes_args() {
        let spec = ServerSpec::new("grype", "python", vec!["grype_mcp/server.py".into()]);
        assert_eq!(
            spec.inspector_hint(),
            "npx @modelcontextprotocol/inspector python grype_mcp/server.py"
        );
    }
}
