use crate::error::{ReachError, Result};
use crate::systems::PowerSystem;
use crate::types::analysis::{ThematicBreakdown, ThemeScore};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Surveillance,
    Normalization,
    Knowledge,
    Resistance,
}

impl Theme {
    pub const ALL: [Theme; 4] = [
        Theme::Surveillance,
        Theme::Normalization,
        Theme::Knowledge,
        Theme::Resistance,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Self::Surveillance => "surveillance",
            Self::Normalization => "normalization",
            Self::Knowledge => "knowledge",
            Self::Resistance => "resistance",
        }
    }

    pub fn from_key(key: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|theme| theme.key() == key)
            .ok_or_else(|| ReachError::UnknownTheme {
                key: key.to_string(),
                valid: Self::ALL
                    .iter()
                    .map(|theme| theme.key().to_string())
                    .collect(),
            })
    }

    fn keywords(self) -> &'static [&'static str] {
        match self {
            Self::Surveillance => &[
                "audit", "log", "monitor", "track", "observ", "review", "watch", "visible",
            ],
            Self::Normalization => &[
                "only", "require", "must", "calibrat", "standard", "approv", "policy", "rating",
            ],
            Self::Knowledge => &[
                "read", "search", "doc", "wiki", "report", "analytic", "data", "export", "list",
            ],
            Self::Resistance => &[
                "cannot", "no ", "never", "reject", "block", "deny", "appeal", "override",
            ],
        }
    }

    fn matches(self, statement: &str) -> bool {
        let lowered = statement.to_lowercase();
        self.keywords()
            .iter()
            .any(|keyword| lowered.contains(keyword))
    }
}

/// Scores each theme by the share of actions and limitations that mention it.
pub fn thematic_breakdown(system: &dyn PowerSystem, themes: &[Theme]) -> ThematicBreakdown {
    let privileges = system.privileges();
    let statements: Vec<String> = privileges
        .iter()
        .flat_map(|privilege| {
            privilege
                .actions()
                .iter()
                .chain(privilege.limitations().iter())
                .cloned()
                .collect::<Vec<_>>()
        })
        .collect();

    let scores = themes
        .iter()
        .map(|theme| {
            let mut evidence: Vec<String> = Vec::new();
            let mut matched = 0usize;
            for statement in &statements {
                if theme.matches(statement) {
                    matched += 1;
                    if !evidence.contains(statement) {
                        evidence.push(statement.clone());
                    }
                }
            }
            let relevance = if statements.is_empty() {
                0.0
            } else {
                matched as f64 / statements.len() as f64
            };
            ThemeScore {
                theme: theme.key().to_string(),
                relevance,
                evidence,
            }
        })
        .collect();

    tracing::debug!(
        system = system.name(),
        themes = themes.len(),
        "thematic breakdown"
    );
    ThematicBreakdown {
        system_name: system.name().to_string(),
        themes: scores,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::systems::api::{ApiExample, ApiScope};
    use crate::systems::filesystem::FileSystemExample;
    use crate::types::privilege::PrivilegeSet;

    #[test]
    fn from_key_rejects_unknown_theme() {
        assert_eq!(Theme::from_key("knowledge").ok(), Some(Theme::Knowledge));
        let err = Theme::from_key("biopower").expect_err("unknown theme should fail");
        assert!(err.to_string().contains("unknown theme: biopower"));
        assert!(err.to_string().contains("surveillance"));
    }

    #[test]
    fn admin_api_is_surveilled() {
        let api =
            ApiExample::new("pk_admin", vec![ApiScope::admin()], 10).expect("api should build");
        let breakdown = thematic_breakdown(&api, &[Theme::Surveillance]);
        let score = &breakdown.themes[0];
        assert_eq!(score.theme, "surveillance");
        assert!(score.relevance > 0.0);
        let cites_audit = score.evidence.iter().any(|s| s.contains("audit log"));
        assert!(cites_audit);
    }

    #[test]
    fn relevance_stays_in_unit_interval() {
        let system = FileSystemExample::new().expect("fixture should build");
        let breakdown = thematic_breakdown(&system, &Theme::ALL);
        assert_eq!(breakdown.themes.len(), 4);
        for score in &breakdown.themes {
            assert!((0.0..=1.0).contains(&score.relevance), "{}", score.theme);
        }
    }

    #[test]
    fn empty_system_scores_zero() {
        let system = FileSystemExample::with_privileges("Empty", PrivilegeSet::default());
        let breakdown = thematic_breakdown(&system, &Theme::ALL);
        for score in &breakdown.themes {
            assert_eq!(score.relevance, 0.0);
            assert!(score.evidence.is_empty());
        }
    }
}
