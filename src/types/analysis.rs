use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Verdict {
    #[serde(rename = "MEASURABLE")]
    Measurable,
    #[serde(rename = "ESTIMABLE")]
    Estimable,
    #[serde(rename = "SPECULATION")]
    Speculation,
    #[serde(rename = "NO PRIVILEGES")]
    NoPrivileges,
    #[serde(rename = "INDETERMINATE")]
    Indeterminate,
}

impl Verdict {
    pub fn tag(self) -> &'static str {
        match self {
            Self::Measurable => "MEASURABLE",
            Self::Estimable => "ESTIMABLE",
            Self::Speculation => "SPECULATION",
            Self::NoPrivileges => "NO PRIVILEGES",
            Self::Indeterminate => "INDETERMINATE",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::Measurable => "clear privileges with concrete limits.",
            Self::Estimable => "measurable but with some uncertainty.",
            Self::Speculation => "no reliable way to measure reach.",
            Self::NoPrivileges => "reach = 0 (perfectly measurable).",
            Self::Indeterminate => "needs further analysis.",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} — {}", self.tag(), self.description())
    }
}

/// Confidence as a whole percentage, rounded toward zero.
pub fn confidence_percent(confidence: f64) -> u32 {
    // 1e-9 absorbs binary noise such as 0.95 * 100.0 landing below 95.
    ((confidence * 100.0) + 1e-9).floor().clamp(0.0, 100.0) as u32
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Analysis {
    pub system_name: String,
    pub is_measurable: bool,
    pub is_speculation: bool,
    pub is_reliable: bool,
    pub minimum_reach: u64,
    pub maximum_reach: u64,
    pub confidence: f64,
    pub privilege_count: usize,
    pub measurable_privileges: usize,
    pub limitation_count: usize,
    pub verdict: Verdict,
    pub reasoning: String,
}

impl Analysis {
    pub fn measurability_ratio(&self) -> f64 {
        if self.privilege_count == 0 {
            return 0.0;
        }
        self.measurable_privileges as f64 / self.privilege_count as f64
    }

    pub fn confidence_percent(&self) -> u32 {
        confidence_percent(self.confidence)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Comparison {
    pub first: Analysis,
    pub second: Analysis,
    pub more_measurable: String,
    pub more_privileges: String,
    pub more_limitations: String,
    pub summary: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConceptStep {
    pub title: String,
    pub lines: Vec<String>,
}

/// Privileges, then the limitations they imply, then what that measures to.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConceptDemonstration {
    pub system_name: String,
    pub description: String,
    pub steps: [ConceptStep; 3],
    pub analysis: Analysis,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub analyses: Vec<Analysis>,
    pub most_measurable: Option<String>,
    pub least_measurable: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ThemeScore {
    pub theme: String,
    pub relevance: f64,
    pub evidence: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ThematicBreakdown {
    pub system_name: String,
    pub themes: Vec<ThemeScore>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn confidence_percent_rounds_toward_zero() {
        assert_eq!(confidence_percent(0.95), 95);
        assert_eq!(confidence_percent(0.98), 98);
        assert_eq!(confidence_percent(0.7), 70);
        assert_eq!(confidence_percent(0.999), 99);
        assert_eq!(confidence_percent(0.0), 0);
        assert_eq!(confidence_percent(1.0), 100);
    }

    #[test]
    fn verdict_tags_are_verbatim() {
        assert_eq!(Verdict::NoPrivileges.tag(), "NO PRIVILEGES");
        assert_eq!(
            Verdict::Measurable.to_string(),
            "MEASURABLE — clear privileges with concrete limits."
        );
        let json = serde_json::to_string(&Verdict::NoPrivileges).expect("verdict should serialize");
        assert_eq!(json, "\"NO PRIVILEGES\"");
    }
}
