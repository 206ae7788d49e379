//! Nebula Nav RPC Server: JSON-RPC over stdin/stdout for a UI shell.
//!
//! Protocol: one JSON object per line (newline-delimited JSON).
//! Request:  {"id":1, "method":"links.add", "params":{"title":"...","url":"..."}}
//! Response: {"id":1, "result":{...}} or {"id":1, "error":"..."}
//!
//! Logs go to stderr; stdout carries only protocol lines.

use tokio::io::{self, AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use nebula_nav::app::App;
use nebula_nav::rpc_handler::handle_method;
use nebula_nav::services::config_engine::{ConfigEngine, ConfigEngineTrait};
use nebula_nav::types::config::AppConfig;

use serde_json::{json, Value};

fn init_logging(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn write_line(stdout: &mut io::Stdout, value: &Value) -> std::io::Result<()> {
    stdout.write_all(value.to_string().as_bytes()).await?;
    stdout.write_all(b"\n").await?;
    stdout.flush().await
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config_path = std::env::var("NEBULA_NAV_CONFIG").ok();
    let mut engine = ConfigEngine::new(config_path);
    // A broken config file must not keep the dashboard from starting.
    let (config, config_err) = match engine.load() {
        Ok(cfg) => (cfg, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };
    init_logging(&config);
    if let Some(e) = config_err {
        warn!(error = %e, path = %engine.config_path().display(), "using default config");
    }

    let app = App::new(engine)?;
    app.startup();

    let mut stdout = io::stdout();
    write_line(&mut stdout, &json!({"event": "ready", "version": env!("CARGO_PKG_VERSION")})).await?;

    let mut lines = BufReader::new(io::stdin()).lines();

    loop {
        let line = match lines.next_line().await {
            Ok(Some(l)) => l,
            Ok(None) => break,
            Err(e) => {
                error!(error = %e, "stdin read failed");
                break;
            }
        };
        if line.trim().is_empty() {
            continue;
        }

        let req: Value = match serde_json::from_str(&line) {
            Ok(v) => v,
            Err(e) => {
                write_line(&mut stdout, &json!({"id": null, "error": format!("parse error: {}", e)})).await?;
                continue;
            }
        };

        let id = req.get("id").cloned().unwrap_or(Value::Null);

        let method = req.get("method").and_then(|v| v.as_str()).unwrap_or("");
        let params = req.get("params").cloned().unwrap_or(json!({}));

        let response = match handle_method(&app, method, &params).await {
            Ok(val) => json!({"id": id, "result": val}),
            Err(err) => json!({"id": id, "error": err}),
        };
        write_line(&mut stdout, &response).await?;
    }

    info!("stdin closed, waiting for background sync");
    app.shutdown().await;
    Ok(())
}
