// Nebula Nav platform paths
//
// Linux:   config ~/.config/nebula-nav, data ~/.local/share/nebula-nav (XDG vars honoured)
// macOS:   ~/Library/Application Support/NebulaNav for both
// Windows: %APPDATA%/NebulaNav for both

use std::env;
use std::path::PathBuf;

#[cfg(target_os = "linux")]
const APP_DIR: &str = "nebula-nav";
#[cfg(not(target_os = "linux"))]
const APP_DIR: &str = "NebulaNav";

#[cfg_attr(target_os = "windows", allow(dead_code))]
fn home_dir() -> PathBuf {
    PathBuf::from(env::var("HOME").unwrap_or_else(|_| String::from("/tmp")))
}

/// Resolves `$var/<app>` when the variable is set, else `<home>/<fallback>/<app>`.
#[cfg(target_os = "linux")]
fn xdg_dir(var: &str, fallback: &[&str]) -> PathBuf {
    match env::var(var) {
        Ok(dir) if !dir.is_empty() => PathBuf::from(dir).join(APP_DIR),
        _ => fallback
            .iter()
            .fold(home_dir(), |path, part| path.join(part))
            .join(APP_DIR),
    }
}

/// Returns the platform-specific configuration directory.
pub fn get_config_dir() -> PathBuf {
    #[cfg(target_os = "linux")]
    {
        xdg_dir("XDG_CONFIG_HOME", &[".config"])
    }
    #[cfg(target_os = "macos")]
    {
        home_dir().join("Library").join("Application Support").join(APP_DIR)
    }
    #[cfg(target_os = "windows")]
    {
        let appdata = env::var("APPDATA")
            .unwrap_or_else(|_| String::from("C:\\Users\\Default\\AppData\\Roaming"));
        PathBuf::from(appdata).join(APP_DIR)
    }
    #[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
    {
        home_dir().join(".config").join(APP_DIR)
    }
}

/// Returns the platform-specific data directory (database, exported backups).
pub fn get_data_dir() -> PathBuf {
    #[cfg(target_os = "linux")]
    {
        xdg_dir("XDG_DATA_HOME", &[".local", "share"])
    }
    #[cfg(not(target_os = "linux"))]
    {
        get_config_dir()
    }
}
