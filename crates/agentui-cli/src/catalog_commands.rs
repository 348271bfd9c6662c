//! Catalog subcommands: MCP servers and the tools they expose.

use clap::Subcommand;

use agentui_core::McpTransport;

/// Manage catalog MCP servers.
#[derive(Subcommand, Debug)]
pub enum ServerCommand {
    /// Add a server to the catalog
    Add {
        /// Unique catalog name
        name: String,

        /// Transport used to reach the server (stdio, sse, http)
        #[arg(long, default_value = "stdio", value_parser = parse_transport)]
        transport: McpTransport,

        /// Executable to spawn (stdio servers)
        #[arg(long)]
        command: Option<String>,

        /// Default launch argument; repeat for several
        #[arg(long = "arg", allow_hyphen_values = true)]
        args: Vec<String>,

        /// Default environment variable as KEY=VALUE; repeat for several
        #[arg(long = "env", value_parser = parse_key_value)]
        env: Vec<(String, String)>,

        /// Endpoint (sse and http servers)
        #[arg(long)]
        url: Option<String>,

        /// Catalog default startup timeout in milliseconds
        #[arg(long)]
        startup_timeout_ms: Option<u64>,

        /// Add the server administratively disabled
        #[arg(long)]
        disabled: bool,
    },

    /// List catalog servers
    List,

    /// Re-enable a disabled server
    Enable {
        /// Catalog name of the server
        name: String,
    },

    /// Disable a server; selections keep it but resolution skips it
    Disable {
        /// Catalog name of the server
        name: String,
    },

    /// Remove a server and its tools
    Remove {
        /// Catalog name of the server
        name: String,
    },
}

/// Manage the tools exposed by a catalog server.
#[derive(Subcommand, Debug)]
pub enum ToolCommand {
    /// Register a tool under a server
    Add {
        /// Catalog name of the owning server
        server: String,

        /// Tool (function) name
        name: String,

        /// Human-readable description
        #[arg(long, default_value = "")]
        description: String,

        /// JSON Schema of the tool input
        #[arg(long, value_parser = parse_json)]
        input_schema: Option<serde_json::Value>,
    },

    /// List the tools of a server
    List {
        /// Catalog name of the server
        server: String,
    },

    /// Remove a tool from a server
    Remove {
        /// Catalog name of the owning server
        server: String,

        /// Tool (function) name
        name: String,
    },
}

fn parse_transport(s: &str) -> Result<McpTransport, String> {
    s.parse()
}

/// Parse a `KEY=VALUE` pair. The value may itself contain `=`.
pub fn parse_key_value(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{s}'"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("empty key in '{s}'"));
    }
    Ok((key.to_string(), value.to_string()))
}

fn parse_json(s: &str) -> Result<serde_json::Value, String> {
    serde_json::from_str(s).map_err(|e| format!("invalid JSON: {e}"))
}
