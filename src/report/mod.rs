pub mod json;
pub mod md;

use crate::error::ReachError;
use crate::types::analysis::{
    Analysis, Comparison, ConceptDemonstration, Summary, ThematicBreakdown,
};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Md,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", content = "data", rename_all = "snake_case")]
pub enum Report {
    Analysis(Analysis),
    Comparison(Comparison),
    Summary(Summary),
    Demonstration(ConceptDemonstration),
    Themes(ThematicBreakdown),
}

pub fn render(report: &Report, format: OutputFormat) -> Result<String, ReachError> {
    match format {
        OutputFormat::Json => json::to_json(report).map_err(ReachError::Json),
        OutputFormat::Md => Ok(md::to_markdown(report)),
    }
}
