use super::PowerSystem;
use crate::error::{ReachError, Result};
use crate::types::estimation::ReachEstimation;
use crate::types::privilege::{Privilege, PrivilegeScope, PrivilegeSet};
use std::collections::{BTreeSet, HashSet};

/// API quotas are the most measurable class of system.
pub const API_CONFIDENCE: f64 = 0.98;
const BILLING_DAYS: u64 = 30;
/// Unpaid scopes with more endpoints than this are widened to `Limited`.
const RESTRICTED_ENDPOINT_CEILING: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiScope {
    pub name: String,
    pub allowed_endpoints: Vec<String>,
    pub is_paid: bool,
    pub requires_auth: bool,
    pub max_data_rows_per_request: u64,
    pub data_access_limits: Vec<String>,
}

impl ApiScope {
    pub fn free_public() -> Self {
        Self {
            name: "public".to_string(),
            allowed_endpoints: strings(&[
                "/v1/public/status",
                "/v1/public/search",
                "/v1/public/items",
            ]),
            is_paid: false,
            requires_auth: false,
            max_data_rows_per_request: 100,
            data_access_limits: strings(&[
                "No access to user records",
                "Responses cached for 15 minutes",
            ]),
        }
    }

    pub fn paid_analytics() -> Self {
        Self {
            name: "analytics".to_string(),
            allowed_endpoints: strings(&[
                "/v1/analytics/events",
                "/v1/analytics/reports",
                "/v1/analytics/export",
                "/v1/analytics/dashboards",
            ]),
            is_paid: true,
            requires_auth: true,
            max_data_rows_per_request: 10_000,
            data_access_limits: strings(&[
                "Aggregated data only",
                "Export size capped at 10000 rows",
            ]),
        }
    }

    pub fn admin() -> Self {
        Self {
            name: "admin".to_string(),
            allowed_endpoints: strings(&[
                "/v1/admin/users",
                "/v1/admin/roles",
                "/v1/admin/keys",
                "/v1/admin/audit",
                "/v1/admin/billing",
                "/v1/admin/settings",
            ]),
            is_paid: true,
            requires_auth: true,
            max_data_rows_per_request: 50_000,
            data_access_limits: strings(&[
                "Every call is written to the audit log",
                "Key rotation required every 90 days",
            ]),
        }
    }

    /// Looks up a stock scope by the name used in config files.
    pub fn stock(name: &str) -> Option<Self> {
        match name {
            "free_public" => Some(Self::free_public()),
            "paid_analytics" => Some(Self::paid_analytics()),
            "admin" => Some(Self::admin()),
            _ => None,
        }
    }

    pub const STOCK_NAMES: [&'static str; 3] = ["free_public", "paid_analytics", "admin"];

    fn privilege_scope(&self) -> PrivilegeScope {
        if self.is_paid {
            PrivilegeScope::Global
        } else if self.allowed_endpoints.len() > RESTRICTED_ENDPOINT_CEILING {
            PrivilegeScope::Limited
        } else {
            PrivilegeScope::Restricted
        }
    }

    fn to_privilege(&self, rate_limit_per_hour: u64) -> Result<Privilege> {
        let rate = format!("Rate limit: {rate_limit_per_hour} requests per hour");
        let mut limitations = vec![rate];
        if !self.is_paid {
            limitations.push("Public data only".to_string());
        }
        if self.requires_auth {
            limitations.push("Requires authentication".to_string());
        }
        limitations.extend(self.data_access_limits.iter().cloned());

        Privilege::new(
            self.name.clone(),
            self.privilege_scope(),
            self.allowed_endpoints.iter().cloned(),
            limitations,
        )
    }
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

#[derive(Debug, Clone)]
pub struct ApiExample {
    name: String,
    api_key: String,
    scopes: Vec<ApiScope>,
    rate_limit_per_hour: u64,
    /// Derived from `scopes` at construction; never set independently.
    privileges: PrivilegeSet,
    /// Mock usage counter. Nothing increments it, so `can_perform` never
    /// observes an exhausted quota.
    calls_this_hour: u64,
}

impl ApiExample {
    pub fn new(
        api_key: impl Into<String>,
        scopes: Vec<ApiScope>,
        rate_limit_per_hour: u64,
    ) -> Result<Self> {
        let api_key = api_key.into();
        if rate_limit_per_hour == 0 {
            return Err(ReachError::InvalidRateLimit(format!(
                "{api_key}: rate_limit_per_hour must be greater than 0"
            )));
        }
        if scopes.is_empty() {
            return Err(ReachError::InvalidScope(format!(
                "{api_key}: at least one scope is required"
            )));
        }

        let mut seen = HashSet::new();
        for scope in &scopes {
            if scope.allowed_endpoints.is_empty() {
                return Err(ReachError::InvalidScope(format!(
                    "{}: allowed_endpoints must be non-empty",
                    scope.name
                )));
            }
            if !seen.insert(scope.name.as_str()) {
                return Err(ReachError::InvalidScope(format!(
                    "{api_key}: duplicate scope {}",
                    scope.name
                )));
            }
        }

        let privileges = scopes
            .iter()
            .map(|scope| scope.to_privilege(rate_limit_per_hour))
            .collect::<Result<Vec<_>>>()?;
        let privileges = PrivilegeSet::new(privileges)?;

        Ok(Self {
            name: format!("API Access ({api_key})"),
            api_key,
            scopes,
            rate_limit_per_hour,
            privileges,
            calls_this_hour: 0,
        })
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn allowed_endpoints(&self) -> BTreeSet<&str> {
        self.scopes
            .iter()
            .flat_map(|scope| scope.allowed_endpoints.iter().map(String::as_str))
            .collect()
    }
}

impl PowerSystem for ApiExample {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        "An API key bounded by scopes, endpoints and an hourly rate limit."
    }

    fn privileges(&self) -> PrivilegeSet {
        self.privileges.clone()
    }

    fn can_perform(&self, action: &str) -> bool {
        let allowed = self.allowed_endpoints().contains(action);
        allowed && self.calls_this_hour < self.rate_limit_per_hour
    }

    fn estimate_minimum_reach(&self) -> Result<ReachEstimation> {
        let endpoints = self.allowed_endpoints().len() as u64;
        let max_rows = self
            .scopes
            .iter()
            .map(|scope| scope.max_data_rows_per_request)
            .max()
            .unwrap_or(0);
        let reasoning = format!(
            "Key {} allows {} requests/hour across {} allowed endpoints, \
             at most {} rows per request, granted through {} scopes.",
            self.api_key,
            self.rate_limit_per_hour,
            endpoints,
            max_rows,
            self.scopes.len()
        );

        let per_endpoint = self.rate_limit_per_hour.saturating_mul(BILLING_DAYS);
        let maximum = per_endpoint.saturating_mul(endpoints);

        ReachEstimation::new(
            true,
            self.rate_limit_per_hour,
            maximum,
            API_CONFIDENCE,
            reasoning,
        )
    }
}
