use super::Report;
use crate::types::analysis::{
    confidence_percent, Analysis, Comparison, ConceptDemonstration, Summary, ThematicBreakdown,
};

pub fn to_markdown(report: &Report) -> String {
    match report {
        Report::Analysis(analysis) => analysis_markdown(analysis),
        Report::Comparison(comparison) => comparison_markdown(comparison),
        Report::Summary(summary) => summary_markdown(summary),
        Report::Demonstration(demo) => demonstration_markdown(demo),
        Report::Themes(breakdown) => themes_markdown(breakdown),
    }
}

fn analysis_markdown(analysis: &Analysis) -> String {
    let mut output = String::new();
    output.push_str(&format!("# Reach Analysis: {}\n\n", analysis.system_name));
    output.push_str(&format!("Verdict: {}\n\n", analysis.verdict));
    output.push_str(&analysis_details(analysis));
    output.push_str(&format!("\n{}\n", analysis.reasoning));
    output
}

fn analysis_details(analysis: &Analysis) -> String {
    format!(
        "- confidence: {}%\n- reach: {} - {}\n- measurable: {}\n- speculation: {}\n\
         - reliable: {}\n- privileges: {} ({} measurable, {}%)\n- limitations: {}\n",
        analysis.confidence_percent(),
        analysis.minimum_reach,
        analysis.maximum_reach,
        analysis.is_measurable,
        analysis.is_speculation,
        analysis.is_reliable,
        analysis.privilege_count,
        analysis.measurable_privileges,
        confidence_percent(analysis.measurability_ratio()),
        analysis.limitation_count
    )
}

fn comparison_markdown(comparison: &Comparison) -> String {
    let mut output = String::new();
    output.push_str(&format!(
        "# Comparison: {} vs {}\n\n",
        comparison.first.system_name, comparison.second.system_name
    ));
    for analysis in [&comparison.first, &comparison.second] {
        output.push_str(&format!("## {}\n\n", analysis.system_name));
        output.push_str(&format!("Verdict: {}\n\n", analysis.verdict));
        output.push_str(&analysis_details(analysis));
        output.push('\n');
    }
    output.push_str("## Winners\n\n");
    output.push_str(&format!(
        "- more measurable: {}\n- more privileges: {}\n- more limitations: {}\n\n",
        comparison.more_measurable, comparison.more_privileges, comparison.more_limitations
    ));
    output.push_str(&comparison.summary);
    output.push('\n');
    output
}

fn summary_markdown(summary: &Summary) -> String {
    let mut output = String::new();
    output.push_str("# Reach Summary\n\n");
    if summary.analyses.is_empty() {
        output.push_str("- none\n");
        return output;
    }

    output.push_str("| System | Verdict | Confidence | Reach | Measurable/Total |\n");
    output.push_str("|---|---|---|---|---|\n");
    for analysis in &summary.analyses {
        output.push_str(&format!(
            "| {} | {} | {}% | {} - {} | {}/{} |\n",
            analysis.system_name,
            analysis.verdict.tag(),
            analysis.confidence_percent(),
            analysis.minimum_reach,
            analysis.maximum_reach,
            analysis.measurable_privileges,
            analysis.privilege_count
        ));
    }
    output.push('\n');

    if let Some(most) = &summary.most_measurable {
        output.push_str(&format!("Most measurable: {most}\n"));
    }
    if let Some(least) = &summary.least_measurable {
        output.push_str(&format!("Least measurable: {least}\n"));
    }
    output
}

fn demonstration_markdown(demo: &ConceptDemonstration) -> String {
    let mut output = String::new();
    output.push_str(&format!("# {}\n\n", demo.system_name));
    output.push_str(&format!("{}\n\n", demo.description));
    for (index, step) in demo.steps.iter().enumerate() {
        output.push_str(&format!("## {}. {}\n\n", index + 1, step.title));
        for line in &step.lines {
            output.push_str(&format!("- {line}\n"));
        }
        output.push('\n');
    }
    output
}

fn themes_markdown(breakdown: &ThematicBreakdown) -> String {
    let mut output = String::new();
    output.push_str(&format!("# Themes: {}\n\n", breakdown.system_name));
    for score in &breakdown.themes {
        output.push_str(&format!(
            "## {} ({}%)\n\n",
            score.theme,
            confidence_percent(score.relevance)
        ));
        if score.evidence.is_empty() {
            output.push_str("- none\n\n");
            continue;
        }
        for statement in &score.evidence {
            output.push_str(&format!("- {statement}\n"));
        }
        output.push('\n');
    }
    output
}
