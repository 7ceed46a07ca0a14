use super::PowerSystem;
use crate::error::Result;
use crate::types::estimation::ReachEstimation;
use crate::types::privilege::{Privilege, PrivilegeScope, PrivilegeSet};
use serde::Deserialize;

const IMPACT_PER_REPORT: u64 = 10;
const BUDGET_PER_IMPACT_UNIT: u64 = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoleLevel {
    IndividualContributor,
    TeamLead,
    Manager,
    Director,
    Executive,
}

impl RoleLevel {
    /// Higher levels are harder to measure precisely.
    pub fn confidence(self) -> f64 {
        match self {
            Self::Executive => 0.7,
            Self::Manager => 0.8,
            Self::IndividualContributor | Self::TeamLead | Self::Director => 0.9,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::IndividualContributor => "individual contributor",
            Self::TeamLead => "team lead",
            Self::Manager => "manager",
            Self::Director => "director",
            Self::Executive => "executive",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Role {
    pub title: String,
    pub level: RoleLevel,
    pub direct_reports: u32,
    pub budget_access: u64,
    pub approval_limit: u64,
    pub approvals_needed: u32,
    pub departments: Vec<String>,
    pub systems_access: Vec<String>,
    pub privileges: PrivilegeSet,
}

#[derive(Debug, Clone)]
pub struct OrganizationalExample {
    role: Role,
}

impl OrganizationalExample {
    pub fn new(role: Role) -> Self {
        Self { role }
    }

    pub fn junior_developer() -> Result<Self> {
        let privileges = PrivilegeSet::new(vec![
            Privilege::new(
                "Commit Code",
                PrivilegeScope::Limited,
                ["commit", "push_branch", "open_pull_request"],
                [
                    "Requires 2 approving reviews before merge",
                    "No direct pushes to main",
                    "Max 10 open pull requests",
                ],
            )?,
            Privilege::new(
                "Read Documentation",
                PrivilegeScope::Limited,
                ["read_docs", "search_wiki"],
                [
                    "Internal engineering wiki only",
                    "No access to HR or finance spaces",
                ],
            )?,
            Privilege::new(
                "Deploy Staging",
                PrivilegeScope::Restricted,
                ["deploy_staging"],
                ["Staging environment only", "Max 5 deploys per day"],
            )?,
            Privilege::new(
                "Approve Spending",
                PrivilegeScope::None,
                Vec::<String>::new(),
                ["No budget authority"],
            )?,
        ])?;

        Ok(Self::new(Role {
            title: "Junior Developer".to_string(),
            level: RoleLevel::IndividualContributor,
            direct_reports: 0,
            budget_access: 0,
            approval_limit: 0,
            approvals_needed: 2,
            departments: vec!["Engineering".to_string()],
            systems_access: vec![
                "git".to_string(),
                "ci".to_string(),
                "staging".to_string(),
                "wiki".to_string(),
            ],
            privileges,
        }))
    }

    pub fn engineering_manager() -> Result<Self> {
        let privileges = PrivilegeSet::new(vec![
            Privilege::new(
                "Approve Pull Requests",
                PrivilegeScope::Limited,
                ["approve_pull_request", "merge"],
                [
                    "Only repositories owned by the team",
                    "Protected branches still need a green CI run",
                ],
            )?,
            Privilege::new(
                "Budget Allocation",
                PrivilegeScope::Limited,
                ["allocate_budget", "approve_expense"],
                [
                    "Annual budget limit of 500000",
                    "Single expenses above 25000 need director sign-off",
                    "Quarterly spend reviewed by finance",
                ],
            )?,
            Privilege::new(
                "Hiring",
                PrivilegeScope::Restricted,
                ["open_requisition", "extend_offer"],
                [
                    "Headcount limit set by the director",
                    "Offers need HR approval",
                ],
            )?,
            Privilege::new(
                "Performance Reviews",
                PrivilegeScope::Limited,
                ["write_review", "set_rating"],
                [
                    "Direct reports only",
                    "Ratings calibrated with peer managers",
                ],
            )?,
        ])?;

        Ok(Self::new(Role {
            title: "Engineering Manager".to_string(),
            level: RoleLevel::Manager,
            direct_reports: 8,
            budget_access: 500_000,
            approval_limit: 25_000,
            approvals_needed: 1,
            departments: vec!["Engineering".to_string(), "Platform".to_string()],
            systems_access: vec![
                "git".to_string(),
                "ci".to_string(),
                "production".to_string(),
                "hr-portal".to_string(),
            ],
            privileges,
        }))
    }

    /// Privileges that carry any decision-making authority.
    pub fn decision_scope(&self) -> usize {
        self.role
            .privileges
            .iter()
            .filter(|privilege| privilege.scope() != PrivilegeScope::None)
            .count()
    }
}

impl PowerSystem for OrganizationalExample {
    fn name(&self) -> &str {
        &self.role.title
    }

    fn description(&self) -> &str {
        "Authority granted by an organizational role: reports, budget and approvals."
    }

    fn privileges(&self) -> PrivilegeSet {
        self.role.privileges.clone()
    }

    fn estimate_minimum_reach(&self) -> Result<ReachEstimation> {
        let role = &self.role;
        let reports = u64::from(role.direct_reports);
        let minimum = reports + u64::from(role.budget_access > 0);
        let uncapped = reports
            .saturating_mul(IMPACT_PER_REPORT)
            .saturating_add(role.budget_access / BUDGET_PER_IMPACT_UNIT);
        // A small budget with no reports would otherwise invert the range.
        let maximum = uncapped.max(minimum);
        let departments = if role.departments.is_empty() {
            "no department".to_string()
        } else {
            role.departments.join(", ")
        };

        let mut reasoning = format!(
            "{} as {}: {} direct reports, budget access of {}, decision scope over {} privileges \
             in {}, access to {} systems; approvals above {} need {} more sign-off(s).",
            role.title,
            role.level.as_str(),
            role.direct_reports,
            role.budget_access,
            self.decision_scope(),
            departments,
            role.systems_access.len(),
            role.approval_limit,
            role.approvals_needed
        );
        if uncapped < minimum {
            reasoning.push_str(&format!(
                " Maximum raised from {uncapped} to the minimum of {minimum}."
            ));
        }

        ReachEstimation::new(true, minimum, maximum, role.level.confidence(), reasoning)
    }
}
