//! agro-mcp stdio server binary.
//!
//! Serves line-delimited JSON on stdin/stdout. Each request line is either a
//! discovery call or a capability invocation:
//!
//! ```json
//! {"method": "capabilities/list"}
//! {"method": "capabilities/call", "params": {"capability_name": "disease_analysis", "arguments": {"crop_type": "tomato", "symptoms_text": "dark spots"}}}
//! ```
//!
//! # Environment Variables
//!
//! - `AGRO_MCP_CONFIG` — Path to a YAML configuration file (optional;
//!   compiled-in defaults otherwise)
//! - `AGRO_MCP_AUDIT_FILE` — Append audit lines to this file instead of the
//!   `audit` log target
//! - `RUST_LOG` — Log filter (default: "info")
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin server
//! ```

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use agro_mcp::audit::{AuditRecorder, AuditSink, FileSink, LogSink};
use agro_mcp::providers::OfflineProvider;
use agro_mcp::{
    builtin_catalog, CapabilityRegistry, CapabilityRequest, CatalogDeps, Dispatcher,
    ServerConfig, ZeroRetentionBoundary,
};

/// One request line on the wire.
#[derive(Debug, Deserialize)]
struct WireRequest {
    method: String,
    #[serde(default)]
    params: Option<Value>,
}

mod methods {
    pub const CAPABILITIES_LIST: &str = "capabilities/list";
    pub const CAPABILITIES_CALL: &str = "capabilities/call";
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match std::env::var("AGRO_MCP_CONFIG") {
        Ok(path) => ServerConfig::load_yaml(&path)
            .with_context(|| format!("loading configuration from {path}"))?,
        Err(_) => ServerConfig::default(),
    };

    // Configuration errors are fatal: the process refuses to start rather
    // than serve a partially valid capability set.
    let policy = config.sanitization.compile()?;

    let deps = CatalogDeps {
        weather: Arc::new(OfflineProvider::new("weather")),
        soil: Arc::new(OfflineProvider::new("soil")),
        search: Arc::new(OfflineProvider::new("search")),
    };
    let catalog = builtin_catalog(policy.location_precision, &deps);
    let registry = Arc::new(CapabilityRegistry::from_config(&config, catalog)?);

    let sink: Arc<dyn AuditSink> = match std::env::var("AGRO_MCP_AUDIT_FILE") {
        Ok(path) => {
            Arc::new(FileSink::open(&path).with_context(|| format!("opening audit file {path}"))?)
        }
        Err(_) => Arc::new(LogSink),
    };
    let audit = AuditRecorder::new(policy.audit_allowed_fields.clone(), sink);
    let boundary = ZeroRetentionBoundary::new(&policy);

    let dispatcher = Dispatcher::new(
        registry,
        boundary,
        audit,
        Duration::from_secs(config.execution_timeout_secs),
    );

    log::info!(
        "{} v{} serving {} capabilities on stdio",
        config.name,
        config.version,
        dispatcher.list_capabilities().len()
    );

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        let response = handle_line(&dispatcher, &config, &line).await;
        let mut encoded = serde_json::to_string(&response)?;
        encoded.push('\n');
        stdout.write_all(encoded.as_bytes()).await?;
        stdout.flush().await?;
    }

    log::info!("stdin closed, shutting down");
    Ok(())
}

async fn handle_line(dispatcher: &Dispatcher, config: &ServerConfig, line: &str) -> Value {
    let request: WireRequest = match serde_json::from_str(line) {
        Ok(request) => request,
        Err(e) => {
            log::warn!("unparseable request line: {e}");
            return json!({
                "status": "error",
                "error_kind": "invalid_request",
                "message": "Request must be a JSON object with a 'method' field",
            });
        }
    };

    match request.method.as_str() {
        methods::CAPABILITIES_LIST => json!({
            "status": "success",
            "payload": {
                "server": {"name": config.name, "version": config.version},
                "capabilities": dispatcher.list_capabilities(),
            },
        }),
        methods::CAPABILITIES_CALL => {
            let call: CapabilityRequest =
                match serde_json::from_value(request.params.unwrap_or(Value::Null)) {
                    Ok(call) => call,
                    Err(e) => {
                        log::warn!("invalid call params: {e}");
                        return json!({
                            "status": "error",
                            "error_kind": "invalid_request",
                            "message": "Params must carry 'capability_name' and 'arguments'",
                        });
                    }
                };
            match serde_json::to_value(dispatcher.dispatch(&call).await) {
                Ok(response) => response,
                Err(e) => {
                    log::error!("response serialization failed: {e}");
                    json!({
                        "status": "error",
                        "error_kind": "internal_error",
                        "message": "Response could not be serialized",
                    })
                }
            }
        }
        other => {
            log::warn!("unknown method '{other}'");
            json!({
                "status": "error",
                "error_kind": "unknown_method",
                "message": format!("Unknown method '{other}'"),
            })
        }
    }
}
