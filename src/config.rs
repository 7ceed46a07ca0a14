use crate::error::{ReachError, Result};
use crate::types::config::PowerReachConfig;
use std::path::{Path, PathBuf};
use toml::map::Map;
use toml::Value;

pub const DEFAULT_CONFIG_FILE: &str = "powerreach.toml";
pub const DEFAULT_LOCAL_FILE: &str = ".powerreach/local.toml";
pub const DEFAULT_GLOBAL_CONFIG_FILE: &str = ".config/powerreach/config.toml";

pub fn load_config(root: &Path) -> Result<Option<PowerReachConfig>> {
    let global = std::env::var_os("HOME")
        .map(PathBuf::from)
        .map(|home| home.join(DEFAULT_GLOBAL_CONFIG_FILE));
    load_config_with_global(root, global.as_deref())
}

pub(crate) fn load_config_with_global(
    root: &Path,
    global_path: Option<&Path>,
) -> Result<Option<PowerReachConfig>> {
    let repo_path = root.join(DEFAULT_CONFIG_FILE);
    if !repo_path.exists() {
        tracing::debug!(
            path = %repo_path.display(),
            "no config file, using built-in systems only"
        );
        return Ok(None);
    }

    let mut merged = Value::Table(Map::new());
    if let Some(path) = global_path {
        merge_file_if_exists(&mut merged, path)?;
    }
    merge_file_if_exists(&mut merged, &repo_path)?;
    merge_file_if_exists(&mut merged, &root.join(DEFAULT_LOCAL_FILE))?;

    let cfg: PowerReachConfig = merged
        .try_into()
        .map_err(|e: toml::de::Error| ReachError::ConfigParse(e.to_string()))?;
    cfg.validate()?;
    tracing::info!(
        roles = cfg.roles.len(),
        apis = cfg.apis.len(),
        "loaded config"
    );
    Ok(Some(cfg))
}

fn merge_file_if_exists(merged: &mut Value, path: &Path) -> Result<()> {
    if !path.exists() {
        return Ok(());
    }
    tracing::debug!(path = %path.display(), "merging config layer");
    let value = read_toml_value(path)?;
    merge_toml(merged, value);
    Ok(())
}

fn read_toml_value(path: &Path) -> Result<Value> {
    let content = std::fs::read_to_string(path)?;
    toml::from_str(&content)
        .map_err(|e| ReachError::ConfigParse(format!("{}: {}", path.display(), e)))
}

fn merge_toml(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (Value::Table(base_table), Value::Table(overlay_table)) => {
            for (key, value) in overlay_table {
                match base_table.get_mut(&key) {
                    Some(existing) => merge_toml(existing, value),
                    None => {
                        base_table.insert(key, value);
                    }
                }
            }
        }
        (Value::Array(base_items), Value::Array(overlay_items)) => {
            merge_keyed_entries(base_items, overlay_items);
        }
        (slot, value) => {
            *slot = value;
        }
    }
}

/// `[[roles]]` and `[[apis]]` accumulate across layers. A later entry with the
/// same `key` replaces the earlier one in place.
fn merge_keyed_entries(base: &mut Vec<Value>, overlay: Vec<Value>) {
    for entry in overlay {
        match position_by_key(base, &entry) {
            Some(index) => base[index] = entry,
            None => base.push(entry),
        }
    }
}

fn position_by_key(items: &[Value], entry: &Value) -> Option<usize> {
    let key = entry.get("key")?.as_str()?;
    items
        .iter()
        .position(|item| item.get("key").and_then(Value::as_str) == Some(key))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::config::FormatSetting;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn load_config_returns_none_when_repo_file_missing() {
        let dir = TempDir::new().expect("temp dir should be created");
        let cfg = load_config_with_global(dir.path(), None).expect("load should not fail");
        assert!(cfg.is_none());
    }

    #[test]
    fn load_config_merges_global_repo_and_local_in_order() {
        let root = TempDir::new().expect("root temp dir should be created");
        let global_root = TempDir::new().expect("global temp dir should be created");
        let global_path = global_root.path().join("config.toml");

        fs::write(
            &global_path,
            r#"
[report]
format = "json"
"#,
        )
        .expect("global config should write");

        fs::write(
            root.path().join(DEFAULT_CONFIG_FILE),
            r#"
[[roles]]
key = "cto"
title = "Chief Technology Officer"
level = "executive"
direct_reports = 6
budget_access = 2000000
"#,
        )
        .expect("repo config should write");

        fs::create_dir_all(root.path().join(".powerreach")).expect("local dir should create");
        fs::write(
            root.path().join(DEFAULT_LOCAL_FILE),
            r#"
[report]
format = "md"
"#,
        )
        .expect("local override should write");

        let cfg = load_config_with_global(root.path(), Some(&global_path))
            .expect("load should succeed")
            .expect("merged config should exist");

        assert_eq!(cfg.format(), Some(FormatSetting::Md));
        assert_eq!(cfg.roles.len(), 1);
        assert_eq!(cfg.roles[0].title, "Chief Technology Officer");
    }

    #[test]
    fn load_config_appends_roles_across_layers_and_replaces_by_key() {
        let root = TempDir::new().expect("root temp dir should be created");
        let global_root = TempDir::new().expect("global temp dir should be created");
        let global_path = global_root.path().join("config.toml");

        fs::write(
            &global_path,
            r#"
[[roles]]
key = "cto"
title = "Chief Technology Officer"
level = "executive"
direct_reports = 6
"#,
        )
        .expect("global config should write");

        fs::write(
            root.path().join(DEFAULT_CONFIG_FILE),
            r#"
[[roles]]
key = "staff-engineer"
title = "Staff Engineer"
level = "team_lead"

[[apis]]
key = "partner-api"
api_key = "pk_partner"
rate_limit_per_hour = 500
scopes = ["free_public"]
"#,
        )
        .expect("repo config should write");

        fs::create_dir_all(root.path().join(".powerreach")).expect("local dir should create");
        fs::write(
            root.path().join(DEFAULT_LOCAL_FILE),
            r#"
[[roles]]
key = "cto"
title = "Acting CTO"
level = "director"
"#,
        )
        .expect("local override should write");

        let cfg = load_config_with_global(root.path(), Some(&global_path))
            .expect("load should succeed")
            .expect("merged config should exist");

        let titles: Vec<&str> = cfg.roles.iter().map(|role| role.title.as_str()).collect();
        assert_eq!(titles, vec!["Acting CTO", "Staff Engineer"]);
        assert_eq!(cfg.roles[0].direct_reports, 0);
        assert_eq!(cfg.apis.len(), 1);
    }

    #[test]
    fn load_config_rejects_invalid_layers() {
        let root = TempDir::new().expect("root temp dir should be created");
        fs::write(root.path().join(DEFAULT_CONFIG_FILE), "[report\nformat = ")
            .expect("broken config should write");

        let err = load_config_with_global(root.path(), None).expect_err("parse should fail");
        assert!(matches!(err, ReachError::ConfigParse(_)));
    }

    #[test]
    fn load_config_runs_validation() {
        let root = TempDir::new().expect("root temp dir should be created");
        fs::write(
            root.path().join(DEFAULT_CONFIG_FILE),
            r#"
[[apis]]
key = "free-api"
api_key = "pk"
rate_limit_per_hour = 10
scopes = ["free_public"]
"#,
        )
        .expect("config should write");

        let err = load_config_with_global(root.path(), None).expect_err("validation should fail");
        assert!(err.to_string().contains("shadows a built-in system"));
    }
}
