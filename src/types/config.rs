use crate::error::{ReachError, Result};
use crate::systems::api::{ApiExample, ApiScope};
use crate::systems::catalog::BUILTIN_KEYS;
use crate::systems::organizational::{OrganizationalExample, Role, RoleLevel};
use crate::types::privilege::{Privilege, PrivilegeScope, PrivilegeSet};
use serde::Deserialize;
use std::collections::HashSet;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PowerReachConfig {
    pub report: Option<ReportConfig>,
    #[serde(default)]
    pub roles: Vec<RoleConfig>,
    #[serde(default)]
    pub apis: Vec<ApiConfig>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormatSetting {
    Md,
    Json,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReportConfig {
    pub format: Option<FormatSetting>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PrivilegeConfig {
    pub name: String,
    pub scope: PrivilegeScope,
    #[serde(default)]
    pub actions: Vec<String>,
    #[serde(default)]
    pub limitations: Vec<String>,
}

/// Counts stay signed here; `to_system` rejects negatives.
#[derive(Debug, Clone, Deserialize)]
pub struct RoleConfig {
    pub key: String,
    pub title: String,
    pub level: RoleLevel,
    #[serde(default)]
    pub direct_reports: i64,
    #[serde(default)]
    pub budget_access: i64,
    #[serde(default)]
    pub approval_limit: i64,
    #[serde(default)]
    pub approvals_needed: i64,
    #[serde(default)]
    pub departments: Vec<String>,
    #[serde(default)]
    pub systems_access: Vec<String>,
    #[serde(default)]
    pub privileges: Vec<PrivilegeConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScopeConfig {
    pub name: String,
    pub allowed_endpoints: Vec<String>,
    #[serde(default)]
    pub is_paid: bool,
    #[serde(default)]
    pub requires_auth: bool,
    #[serde(default)]
    pub max_data_rows_per_request: i64,
    #[serde(default)]
    pub data_access_limits: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    pub key: String,
    pub name: Option<String>,
    pub api_key: String,
    pub rate_limit_per_hour: i64,
    #[serde(default)]
    pub scopes: Vec<String>,
    #[serde(default)]
    pub custom_scopes: Vec<ScopeConfig>,
}

impl PowerReachConfig {
    pub fn format(&self) -> Option<FormatSetting> {
        self.report.as_ref().and_then(|report| report.format)
    }

    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        let keys = self
            .roles
            .iter()
            .map(|role| role.key.as_str())
            .chain(self.apis.iter().map(|api| api.key.as_str()));
        for key in keys {
            let normalized = key.trim();
            if normalized.is_empty() {
                return Err(ReachError::ConfigParse(
                    "system keys must be non-empty".to_string(),
                ));
            }
            if BUILTIN_KEYS.contains(&normalized) {
                return Err(ReachError::ConfigParse(format!(
                    "system key '{normalized}' shadows a built-in system"
                )));
            }
            if !seen.insert(normalized) {
                return Err(ReachError::ConfigParse(format!(
                    "duplicate system key: {normalized}"
                )));
            }
        }

        for api in &self.apis {
            let unknown = api
                .scopes
                .iter()
                .filter(|scope| ApiScope::stock(scope).is_none())
                .cloned()
                .collect::<Vec<_>>();
            if !unknown.is_empty() {
                return Err(ReachError::ConfigParse(format!(
                    "apis.{}.scopes contains unknown scope(s): {} (valid: {})",
                    api.key,
                    unknown.join(", "),
                    ApiScope::STOCK_NAMES.join(", ")
                )));
            }
            if api.scopes.is_empty() && api.custom_scopes.is_empty() {
                return Err(ReachError::ConfigParse(format!(
                    "apis.{} must declare scopes or custom_scopes",
                    api.key
                )));
            }
        }

        Ok(())
    }
}

impl PrivilegeConfig {
    fn to_privilege(&self) -> Result<Privilege> {
        Privilege::new(
            self.name.clone(),
            self.scope,
            self.actions.iter().cloned(),
            self.limitations.iter().cloned(),
        )
    }
}

fn non_negative(value: i64, field: &str, owner: &str) -> Result<u64> {
    u64::try_from(value).map_err(|_| {
        ReachError::InvalidRole(format!("{owner}: {field} must be >= 0 (found {value})"))
    })
}

impl RoleConfig {
    pub fn to_system(&self) -> Result<OrganizationalExample> {
        let direct_reports = u32::try_from(self.direct_reports).map_err(|_| {
            ReachError::InvalidRole(format!(
                "{}: direct_reports must be between 0 and {} (found {})",
                self.key,
                u32::MAX,
                self.direct_reports
            ))
        })?;
        let approvals_needed = u32::try_from(self.approvals_needed).map_err(|_| {
            ReachError::InvalidRole(format!(
                "{}: approvals_needed must be between 0 and {} (found {})",
                self.key,
                u32::MAX,
                self.approvals_needed
            ))
        })?;
        let privileges = self
            .privileges
            .iter()
            .map(PrivilegeConfig::to_privilege)
            .collect::<Result<Vec<_>>>()?;
        let privileges = PrivilegeSet::new(privileges)?;

        Ok(OrganizationalExample::new(Role {
            title: self.title.clone(),
            level: self.level,
            direct_reports,
            budget_access: non_negative(self.budget_access, "budget_access", &self.key)?,
            approval_limit: non_negative(self.approval_limit, "approval_limit", &self.key)?,
            approvals_needed,
            departments: self.departments.clone(),
            systems_access: self.systems_access.clone(),
            privileges,
        }))
    }
}

impl ScopeConfig {
    fn to_scope(&self, owner: &str) -> Result<ApiScope> {
        let max_rows = u64::try_from(self.max_data_rows_per_request).map_err(|_| {
            ReachError::InvalidScope(format!(
                "{owner}.{}: max_data_rows_per_request must be >= 0 (found {})",
                self.name, self.max_data_rows_per_request
            ))
        })?;
        Ok(ApiScope {
            name: self.name.clone(),
            allowed_endpoints: self.allowed_endpoints.clone(),
            is_paid: self.is_paid,
            requires_auth: self.requires_auth,
            max_data_rows_per_request: max_rows,
            data_access_limits: self.data_access_limits.clone(),
        })
    }
}

impl ApiConfig {
    pub fn to_system(&self) -> Result<ApiExample> {
        let rate_limit = u64::try_from(self.rate_limit_per_hour).map_err(|_| {
            ReachError::InvalidRateLimit(format!(
                "{}: rate_limit_per_hour must be greater than 0 (found {})",
                self.key, self.rate_limit_per_hour
            ))
        })?;

        let mut scopes = Vec::with_capacity(self.scopes.len() + self.custom_scopes.len());
        for name in &self.scopes {
            let scope = ApiScope::stock(name).ok_or_else(|| {
                ReachError::InvalidScope(format!("{}: unknown stock scope {name}", self.key))
            })?;
            scopes.push(scope);
        }
        for custom in &self.custom_scopes {
            scopes.push(custom.to_scope(&self.key)?);
        }

        let system = ApiExample::new(self.api_key.clone(), scopes, rate_limit)?;
        Ok(match &self.name {
            Some(name) => system.with_name(name.clone()),
            None => system,
        })
    }
}
