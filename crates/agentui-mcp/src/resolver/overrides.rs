//! Override precedence for a single server selection.
//!
//! - args: full replacement when the override is present and non-empty
//! - env: key-level merge, selection keys winning
//! - startup timeout: selection, then catalog, then the global default
//!
//! Malformed overrides fall back to the catalog value and push a warning.

use agentui_core::{
    McpEnvEntry, McpServer, Override, OverrideField, ResolutionWarning, ResolverSettings,
    ServerSelection,
};

/// Effective args for `selection` over `server`.
pub fn effective_args(
    server: &McpServer,
    selection: &ServerSelection,
    warnings: &mut Vec<ResolutionWarning>,
) -> Vec<String> {
    match &selection.custom_args {
        Some(Override::Value(args)) if !args.is_empty() => args.clone(),
        Some(Override::Malformed(raw)) => {
            warnings.push(malformed(
                server,
                OverrideField::CustomArgs,
                format!("expected an array of strings, got {}", json_type(raw)),
            ));
            server.args.clone()
        }
        Some(Override::Value(_)) | None => server.args.clone(),
    }
}

/// Effective env for `selection` over `server`.
///
/// Catalog order is preserved with overridden values replaced in place;
/// keys only present in the selection are appended in sorted order.
pub fn effective_env(
    server: &McpServer,
    selection: &ServerSelection,
    warnings: &mut Vec<ResolutionWarning>,
) -> Vec<McpEnvEntry> {
    let overrides = match &selection.custom_env {
        Some(Override::Value(map)) => map,
        Some(Override::Malformed(raw)) => {
            warnings.push(malformed(
                server,
                OverrideField::CustomEnv,
                format!("expected a map of strings, got {}", json_type(raw)),
            ));
            return server.env.clone();
        }
        None => return server.env.clone(),
    };

    let mut env: Vec<McpEnvEntry> = server
        .env
        .iter()
        .map(|entry| match overrides.get(&entry.key) {
            Some(value) => McpEnvEntry::new(entry.key.clone(), value.clone()),
            None => entry.clone(),
        })
        .collect();

    for (key, value) in overrides {
        if server.env_value(key).is_none() {
            env.push(McpEnvEntry::new(key.clone(), value.clone()));
        }
    }

    env
}

/// Effective startup timeout for `selection` over `server`.
pub fn effective_startup_timeout(
    server: &McpServer,
    selection: &ServerSelection,
    settings: &ResolverSettings,
    warnings: &mut Vec<ResolutionWarning>,
) -> u64 {
    let fallback = server
        .startup_timeout_ms
        .unwrap_or(settings.default_startup_timeout_ms);

    match &selection.custom_startup_timeout_ms {
        Some(Override::Value(timeout)) => *timeout,
        Some(Override::Malformed(raw)) => {
            warnings.push(malformed(
                server,
                OverrideField::CustomStartupTimeoutMs,
                format!("expected a non-negative integer, got {}", json_type(raw)),
            ));
            fallback
        }
        None => fallback,
    }
}

fn malformed(server: &McpServer, field: OverrideField, detail: String) -> ResolutionWarning {
    tracing::warn!(
        server_name = %server.name,
        field = %field,
        detail = %detail,
        "Ignoring malformed MCP override"
    );
    ResolutionWarning::MalformedOverride {
        server: server.name.clone(),
        field,
        detail,
    }
}

/// Short description of a JSON value's shape for diagnostics.
fn json_type(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::Null => "null".to_string(),
        serde_json::Value::Bool(_) => "a boolean".to_string(),
        serde_json::Value::Number(n) => format!("the number {n}"),
        serde_json::Value::String(_) => "a string".to_string(),
        serde_json::Value::Array(_) => "an array with non-string items".to_string(),
        serde_json::Value::Object(_) => "an object with non-string values".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agentui_core::McpTransport;
    use chrono::Utc;
    use serde_json::json;

    fn catalog_server() -> McpServer {
        McpServer {
            id: 1,
            name: "filesystem".to_string(),
            transport: McpTransport::Stdio,
            command: Some("npx".to_string()),
            args: vec!["-y".to_string(), "server-filesystem".to_string()],
            env: vec![McpEnvEntry::new("A", "0"), McpEnvEntry::new("B", "2")],
            url: None,
            disabled: false,
            startup_timeout_ms: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_args_full_replace() {
        let mut warnings = Vec::new();
        let selection = ServerSelection::new("filesystem").with_args(vec!["/data".to_string()]);

        let args = effective_args(&catalog_server(), &selection, &mut warnings);

        assert_eq!(args, vec!["/data".to_string()]);
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_empty_args_override_keeps_catalog() {
        let mut warnings = Vec::new();
        let selection = ServerSelection::new("filesystem").with_args(vec![]);

        let args = effective_args(&catalog_server(), &selection, &mut warnings);

        assert_eq!(args.len(), 2);
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_malformed_args_fall_back() {
        let mut warnings = Vec::new();
        let mut selection = ServerSelection::new("filesystem");
        selection.custom_args = Some(Override::Malformed(json!("--root /tmp")));

        let args = effective_args(&catalog_server(), &selection, &mut warnings);

        assert_eq!(args, catalog_server().args);
        assert_eq!(warnings.len(), 1);
        assert!(matches!(
            &warnings[0],
            ResolutionWarning::MalformedOverride { field: OverrideField::CustomArgs, .. }
        ));
    }

    #[test]
    fn test_env_key_level_override() {
        let mut warnings = Vec::new();
        let selection = ServerSelection::new("filesystem").with_env("A", "1");

        let env = effective_env(&catalog_server(), &selection, &mut warnings);

        assert_eq!(env, vec![McpEnvEntry::new("A", "1"), McpEnvEntry::new("B", "2")]);
    }

    #[test]
    fn test_env_new_keys_appended_sorted() {
        let mut warnings = Vec::new();
        let selection = ServerSelection::new("filesystem")
            .with_env("Z", "26")
            .with_env("C", "3");

        let env = effective_env(&catalog_server(), &selection, &mut warnings);
        let keys: Vec<&str> = env.iter().map(|e| e.key.as_str()).collect();

        assert_eq!(keys, vec!["A", "B", "C", "Z"]);
    }

    #[test]
    fn test_malformed_env_falls_back() {
        let mut warnings = Vec::new();
        let mut selection = ServerSelection::new("filesystem");
        selection.custom_env = Some(Override::Malformed(json!({ "A": 1 })));

        let env = effective_env(&catalog_server(), &selection, &mut warnings);

        assert_eq!(env, catalog_server().env);
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn test_timeout_precedence() {
        let settings = ResolverSettings::default();
        let mut warnings = Vec::new();
        let mut server = catalog_server();
        let plain = ServerSelection::new("filesystem");

        assert_eq!(
            effective_startup_timeout(&server, &plain, &settings, &mut warnings),
            30_000
        );

        server.startup_timeout_ms = Some(10_000);
        assert_eq!(
            effective_startup_timeout(&server, &plain, &settings, &mut warnings),
            10_000
        );

        let custom = ServerSelection::new("filesystem").with_startup_timeout_ms(2_500);
        assert_eq!(
            effective_startup_timeout(&server, &custom, &settings, &mut warnings),
            2_500
        );
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_malformed_timeout_uses_catalog() {
        let settings = ResolverSettings::default();
        let mut warnings = Vec::new();
        let mut server = catalog_server();
        server.startup_timeout_ms = Some(10_000);
        let mut selection = ServerSelection::new("filesystem");
        selection.custom_startup_timeout_ms = Some(Override::Malformed(json!(-1)));

        let timeout = effective_startup_timeout(&server, &selection, &settings, &mut warnings);

        assert_eq!(timeout, 10_000);
        assert!(warnings[0].to_string().contains("the number -1"));
    }
}
