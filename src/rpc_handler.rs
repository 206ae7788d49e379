//! RPC method handler for the Nebula Nav JSON-RPC protocol.
//!
//! Kept apart from `rpc_server.rs` so it can be unit-tested independently.
//! `handle_method` dispatches a method name plus JSON params to the `App`.

use std::path::Path;

use serde_json::{json, Value};

use crate::app::App;
use crate::managers::link_manager::icon_url;
use crate::types::link::{Link, LinkDraft};
use crate::types::site::SiteConfig;

fn str_param<'a>(params: &'a Value, key: &str) -> Option<&'a str> {
    params.get(key).and_then(|v| v.as_str())
}

fn required<'a>(params: &'a Value, key: &str) -> Result<&'a str, String> {
    str_param(params, key).ok_or_else(|| format!("missing {}", key))
}

fn draft_from(params: &Value) -> Result<LinkDraft, String> {
    serde_json::from_value(params.clone()).map_err(|e| format!("invalid link fields: {}", e))
}

fn link_json(link: &Link) -> Result<Value, String> {
    let mut value = serde_json::to_value(link).map_err(|e| e.to_string())?;
    if let Value::Object(map) = &mut value {
        map.insert("iconUrl".to_string(), json!(icon_url(link)));
    }
    Ok(value)
}

fn links_json(links: &[Link]) -> Result<Value, String> {
    let items = links.iter().map(link_json).collect::<Result<Vec<_>, _>>()?;
    Ok(json!(items))
}

/// Dispatch a JSON-RPC method call to the appropriate handler.
///
/// Returns `Ok(Value)` on success or `Err(String)` with an error message.
pub async fn handle_method(app: &App, method: &str, params: &Value) -> Result<Value, String> {
    match method {
        "ping" => Ok(json!({"pong": true})),

        // ─── Browse ───
        "links.list" => links_json(&app.links()),
        "links.categories" => Ok(json!(app.categories())),
        "links.search" => {
            let query = str_param(params, "query").unwrap_or("");
            let category = str_param(params, "category");
            links_json(&app.search(query, category))
        }
        "site.get" => serde_json::to_value(app.site_config()).map_err(|e| e.to_string()),

        // ─── Admin ───
        "links.add" => {
            let link = app.add_link(draft_from(params)?).map_err(|e| e.to_string())?;
            link_json(&link)
        }
        "links.update" => {
            let id = required(params, "id")?;
            let link = app
                .update_link(id, draft_from(params)?)
                .map_err(|e| e.to_string())?;
            link_json(&link)
        }
        "links.delete" => {
            let id = required(params, "id")?;
            app.delete_link(id).map_err(|e| e.to_string())?;
            Ok(json!({"ok": true}))
        }
        "site.save" => {
            let config: SiteConfig = serde_json::from_value(params.clone())
                .map_err(|e| format!("invalid site config: {}", e))?;
            if config.title.trim().is_empty() {
                return Err("missing title".to_string());
            }
            app.save_site_config(config).map_err(|e| e.to_string())?;
            Ok(json!({"ok": true}))
        }

        // ─── Credential gate ───
        "auth.status" => Ok(json!({"first_run": app.is_first_run()})),
        "auth.login" => {
            let password = required(params, "password")?;
            let outcome = app.login(password).map_err(|e| e.to_string())?;
            Ok(json!({"ok": true, "outcome": outcome}))
        }
        "auth.change" => {
            let current = required(params, "current")?;
            let new = required(params, "new")?;
            app.change_password(current, new).map_err(|e| e.to_string())?;
            Ok(json!({"ok": true}))
        }

        // ─── Sync ───
        "sync.status" => serde_json::to_value(app.sync_status()).map_err(|e| e.to_string()),
        "sync.enable" => {
            let token = required(params, "token")?;
            let gist_id = str_param(params, "gist_id");
            let cfg = app
                .enable_sync(token, gist_id)
                .await
                .map_err(|e| e.to_string())?;
            Ok(json!({"ok": true, "gist_id": cfg.gist_id, "last_sync": cfg.last_sync}))
        }
        "sync.disable" => {
            app.disable_sync().map_err(|e| e.to_string())?;
            Ok(json!({"ok": true}))
        }
        "sync.restore" => {
            let confirmed = params
                .get("confirm")
                .and_then(|v| v.as_bool())
                .unwrap_or(false);
            let envelope = app
                .restore_from_cloud(confirmed)
                .await
                .map_err(|e| e.to_string())?;
            Ok(json!({"ok": true, "links": envelope.links.len()}))
        }

        // ─── Backup ───
        "backup.export" => Ok(json!({"content": app.export_backup()})),
        "backup.import" => {
            let content = required(params, "content")?;
            let envelope = app.import_backup(content).map_err(|e| e.to_string())?;
            Ok(json!({"ok": true, "links": envelope.links.len()}))
        }
        "backup.export_file" => {
            let dir = str_param(params, "dir").map(Path::new);
            let path = app.export_backup_to_file(dir).map_err(|e| e.to_string())?;
            Ok(json!({"path": path.to_string_lossy()}))
        }
        "backup.import_file" => {
            let path = required(params, "path")?;
            let envelope = app
                .import_backup_file(Path::new(path))
                .map_err(|e| e.to_string())?;
            Ok(json!({"ok": true, "links": envelope.links.len()}))
        }

        // ─── Configuration ───
        "config.get" => Ok(json!({
            "config": app.config(),
            "path": app.config_path().to_string_lossy(),
        })),
        "config.set" => {
            let key = required(params, "key")?;
            let value = params.get("value").cloned().unwrap_or(Value::Null);
            let config = app.set_config_value(key, value).map_err(|e| e.to_string())?;
            Ok(json!({"ok": true, "config": config}))
        }
        "config.reset" => {
            let config = app.reset_config().map_err(|e| e.to_string())?;
            Ok(json!({"ok": true, "config": config}))
        }

        _ => Err(format!("unknown method: {}", method)),
    }
}
