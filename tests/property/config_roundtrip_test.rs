//! Property-based tests for Config Engine persistence.
//!
//! Any valid config saved through `set_value` loads back identically.

use nebula_nav::services::config_engine::{ConfigEngine, ConfigEngineTrait};
use proptest::prelude::*;
use serde_json::json;
use tempfile::TempDir;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(20))]

    #[test]
    fn config_values_survive_reload(
        timeout in proptest::option::of(1u64..600),
        filter in prop_oneof![Just("info"), Just("debug"), Just("nebula_nav=trace,warn")],
        file_name in "[a-z_]{3,20}\\.json",
        export_dir in proptest::option::of("/[a-z]{1,10}/[a-z]{1,10}"),
    ) {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.json").to_string_lossy().to_string();

        let mut engine = ConfigEngine::new(Some(path.clone()));
        engine.set_value("remote.timeout_secs", json!(timeout)).unwrap();
        engine.set_value("log_filter", json!(filter)).unwrap();
        engine.set_value("remote.gist_file_name", json!(file_name)).unwrap();
        engine.set_value("backup.export_dir", json!(export_dir)).unwrap();
        let saved = engine.get_config().clone();

        let mut reloaded = ConfigEngine::new(Some(path));
        let loaded = reloaded.load().unwrap();

        prop_assert_eq!(&loaded, &saved);
        prop_assert_eq!(loaded.remote.timeout_secs, timeout);
        prop_assert_eq!(loaded.remote.gist_file_name, file_name);
    }
}
