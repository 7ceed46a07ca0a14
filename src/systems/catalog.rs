use super::api::{ApiExample, ApiScope};
use super::filesystem::FileSystemExample;
use super::organizational::OrganizationalExample;
use super::PowerSystem;
use crate::error::{ReachError, Result};
use crate::types::config::PowerReachConfig;

pub const BUILTIN_KEYS: [&str; 6] = [
    "filesystem",
    "junior-developer",
    "engineering-manager",
    "free-api",
    "analytics-api",
    "admin-api",
];

/// Selector keys mapped to constructed systems, built-ins first.
pub struct Catalog {
    entries: Vec<(String, Box<dyn PowerSystem>)>,
}

impl Catalog {
    pub fn builtin() -> Result<Self> {
        let mut entries: Vec<(String, Box<dyn PowerSystem>)> = Vec::new();
        for key in BUILTIN_KEYS {
            entries.push((key.to_string(), build_builtin(key)?));
        }
        Ok(Self { entries })
    }

    pub fn with_config(config: Option<&PowerReachConfig>) -> Result<Self> {
        let mut catalog = Self::builtin()?;
        let Some(config) = config else {
            return Ok(catalog);
        };

        for role in &config.roles {
            tracing::debug!(key = %role.key, "registering role from config");
            let system: Box<dyn PowerSystem> = Box::new(role.to_system()?);
            catalog.entries.push((role.key.trim().to_string(), system));
        }
        for api in &config.apis {
            tracing::debug!(key = %api.key, "registering api from config");
            let system: Box<dyn PowerSystem> = Box::new(api.to_system()?);
            catalog.entries.push((api.key.trim().to_string(), system));
        }
        Ok(catalog)
    }

    pub fn keys(&self) -> Vec<String> {
        self.iter().map(|(key, _)| key.to_string()).collect()
    }

    pub fn get(&self, key: &str) -> Result<&dyn PowerSystem> {
        self.entries
            .iter()
            .find(|(candidate, _)| candidate == key)
            .map(|(_, system)| system.as_ref())
            .ok_or_else(|| ReachError::UnknownSystem {
                key: key.to_string(),
                valid: self.keys(),
            })
    }

    /// Resolves every key, or all systems when `keys` is empty.
    pub fn select(&self, keys: &[String]) -> Result<Vec<&dyn PowerSystem>> {
        if keys.is_empty() {
            return Ok(self.iter().map(|(_, system)| system).collect());
        }
        keys.iter().map(|key| self.get(key)).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &dyn PowerSystem)> {
        self.entries
            .iter()
            .map(|(key, system)| (key.as_str(), system.as_ref()))
    }
}

fn build_builtin(key: &str) -> Result<Box<dyn PowerSystem>> {
    let system: Box<dyn PowerSystem> = match key {
        "filesystem" => Box::new(FileSystemExample::new()?),
        "junior-developer" => Box::new(OrganizationalExample::junior_developer()?),
        "engineering-manager" => Box::new(OrganizationalExample::engineering_manager()?),
        "free-api" => {
            let scopes = vec![ApiScope::free_public()];
            let api = ApiExample::new("pk_free_demo", scopes, 100)?;
            Box::new(api.with_name("Free Public API"))
        }
        "analytics-api" => {
            let scopes = vec![ApiScope::free_public(), ApiScope::paid_analytics()];
            let api = ApiExample::new("pk_analytics_demo", scopes, 1000)?;
            Box::new(api.with_name("Paid Analytics API"))
        }
        "admin-api" => {
            let scopes = vec![
                ApiScope::free_public(),
                ApiScope::paid_analytics(),
                ApiScope::admin(),
            ];
            let api = ApiExample::new("pk_admin_demo", scopes, 5000)?;
            Box::new(api.with_name("Admin API"))
        }
        _ => {
            return Err(ReachError::UnknownSystem {
                key: key.to_string(),
                valid: BUILTIN_KEYS.iter().map(|key| key.to_string()).collect(),
            })
        }
    };
    Ok(system)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_catalog_resolves_every_key() {
        let catalog = Catalog::builtin().expect("catalog should build");
        assert_eq!(catalog.keys(), BUILTIN_KEYS.map(String::from).to_vec());
        for key in BUILTIN_KEYS {
            assert!(catalog.get(key).is_ok(), "{key}");
        }
        let name = catalog.get("free-api").map(|system| system.name());
        assert_eq!(name.ok(), Some("Free Public API"));
    }

    #[test]
    fn unknown_key_lists_valid_keys() {
        let catalog = Catalog::builtin().expect("catalog should build");
        match catalog.get("panopticon").err() {
            Some(ReachError::UnknownSystem { key, valid }) => {
                assert_eq!(key, "panopticon");
                assert!(valid.contains(&"filesystem".to_string()));
            }
            other => panic!("unexpected lookup result: {other:?}"),
        }
    }

    #[test]
    fn select_defaults_to_all_systems() {
        let catalog = Catalog::builtin().expect("catalog should build");
        let all = catalog.select(&[]).expect("select should work");
        assert_eq!(all.len(), 6);

        let picked = catalog
            .select(&["admin-api".to_string(), "filesystem".to_string()])
            .expect("select should work");
        assert_eq!(picked[0].name(), "Admin API");
        assert_eq!(picked[1].name(), "File System Permissions");

        assert!(catalog.select(&["nope".to_string()]).is_err());
    }

    #[test]
    fn config_systems_are_appended() {
        let toml_str = r#"
[[roles]]
key = "vp"
title = "VP Engineering"
level = "executive"
direct_reports = 5

[[apis]]
key = "partner-api"
api_key = "pk_partner"
rate_limit_per_hour = 50
scopes = ["paid_analytics"]
"#;
        let config: PowerReachConfig = toml::from_str(toml_str).expect("config should parse");

        let catalog = Catalog::with_config(Some(&config)).expect("catalog should build");
        assert_eq!(catalog.keys().len(), 8);
        let name = catalog.get("vp").map(|system| system.name());
        assert_eq!(name.ok(), Some("VP Engineering"));
        assert!(catalog.get("partner-api").is_ok());
    }

    #[test]
    fn config_construction_errors_propagate() {
        let toml_str = r#"
[[apis]]
key = "broken-api"
api_key = "pk"
rate_limit_per_hour = -1
scopes = ["admin"]
"#;
        let config: PowerReachConfig = toml::from_str(toml_str).expect("config should parse");

        let err = Catalog::with_config(Some(&config)).err();
        assert!(matches!(err, Some(ReachError::InvalidRateLimit(_))));
    }
}
