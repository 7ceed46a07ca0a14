pub mod themes;
pub mod verdict;

use crate::error::Result;
use crate::systems::PowerSystem;
use crate::types::analysis::{
    Analysis, Comparison, ConceptDemonstration, ConceptStep, Summary,
};
use verdict::VerdictInputs;

pub fn analyze(system: &dyn PowerSystem) -> Result<Analysis> {
    let estimate = system.estimate_minimum_reach()?;
    let limitation_count = system.limitations().len();
    let privileges = system.privileges();
    let privilege_count = privileges.len();

    let verdict = verdict::decide(&VerdictInputs {
        is_measurable: estimate.is_measurable(),
        is_speculation: estimate.is_speculation(),
        is_reliable: estimate.is_reliable(),
        limitation_count,
        privilege_count,
    });
    tracing::debug!(
        system = system.name(),
        verdict = verdict.tag(),
        confidence = estimate.confidence(),
        "analyzed system"
    );

    Ok(Analysis {
        system_name: system.name().to_string(),
        is_measurable: estimate.is_measurable(),
        is_speculation: estimate.is_speculation(),
        is_reliable: estimate.is_reliable(),
        minimum_reach: estimate.minimum_impact(),
        maximum_reach: estimate.maximum_impact(),
        confidence: estimate.confidence(),
        privilege_count,
        measurable_privileges: privileges.measurable_count(),
        limitation_count,
        verdict,
        reasoning: estimate.reasoning().to_string(),
    })
}

/// Compares two systems. Every winner uses a strict `>` in favour of
/// `first`, so ties go to `second`.
pub fn compare(first: &dyn PowerSystem, second: &dyn PowerSystem) -> Result<Comparison> {
    let a = analyze(first)?;
    let b = analyze(second)?;

    let pick = |first_wins: bool| {
        if first_wins {
            a.system_name.clone()
        } else {
            b.system_name.clone()
        }
    };
    let more_measurable = pick(a.confidence > b.confidence);
    let more_privileges = pick(a.privilege_count > b.privilege_count);
    let more_limitations = pick(a.limitation_count > b.limitation_count);

    let mut summary = String::new();
    for analysis in [&a, &b] {
        summary.push_str(&format!(
            "{}: {} | Confidence: {}% | Reach: {} - {}\n",
            analysis.system_name,
            analysis.verdict.tag(),
            analysis.confidence_percent(),
            analysis.minimum_reach,
            analysis.maximum_reach
        ));
    }
    if a.confidence == b.confidence {
        summary.push_str(&format!(
            "Both systems are equally measurable; the tie goes to {more_measurable}.\n"
        ));
    } else {
        let loser = if more_measurable == a.system_name {
            &b.system_name
        } else {
            &a.system_name
        };
        summary.push_str(&format!("{more_measurable} is MORE MEASURABLE than {loser}.\n"));
    }
    summary.push_str(&format!("More privileges: {more_privileges}\n"));
    summary.push_str(&format!("More limitations: {more_limitations}"));

    Ok(Comparison {
        first: a,
        second: b,
        more_measurable,
        more_privileges,
        more_limitations,
        summary,
    })
}

/// Walks privileges -> limitations -> measurement for one system.
pub fn demonstrate_concept(system: &dyn PowerSystem) -> Result<ConceptDemonstration> {
    let analysis = analyze(system)?;
    let privileges = system.privileges();

    let privilege_lines = if privileges.is_empty() {
        vec!["none declared".to_string()]
    } else {
        privileges
            .iter()
            .map(|privilege| {
                let actions = privilege
                    .actions()
                    .iter()
                    .map(String::as_str)
                    .collect::<Vec<_>>();
                format!(
                    "{} [{}]: {}",
                    privilege.name(),
                    privilege.scope().as_str(),
                    if actions.is_empty() {
                        "no actions".to_string()
                    } else {
                        actions.join(", ")
                    }
                )
            })
            .collect()
    };

    let limitation_lines = privileges
        .iter()
        .flat_map(|privilege| {
            privilege
                .limitations()
                .iter()
                .map(move |limitation| format!("{}: {}", privilege.name(), limitation))
        })
        .collect::<Vec<_>>();
    let limitation_lines = if limitation_lines.is_empty() {
        vec!["none declared".to_string()]
    } else {
        limitation_lines
    };

    let measurement_lines = vec![
        format!("Verdict: {}", analysis.verdict),
        format!(
            "Reach: {} - {}",
            analysis.minimum_reach, analysis.maximum_reach
        ),
        format!("Confidence: {}%", analysis.confidence_percent()),
        format!(
            "Measurable privileges: {}/{}",
            analysis.measurable_privileges, analysis.privilege_count
        ),
        analysis.reasoning.clone(),
    ];

    Ok(ConceptDemonstration {
        system_name: analysis.system_name.clone(),
        description: system.description().to_string(),
        steps: [
            ConceptStep {
                title: "Privileges".to_string(),
                lines: privilege_lines,
            },
            ConceptStep {
                title: "Limitations".to_string(),
                lines: limitation_lines,
            },
            ConceptStep {
                title: "Measurement".to_string(),
                lines: measurement_lines,
            },
        ],
        analysis,
    })
}

/// Analyzes every system and names the first highest and lowest confidence.
pub fn summarize(systems: &[&dyn PowerSystem]) -> Result<Summary> {
    let analyses = systems
        .iter()
        .map(|system| analyze(*system))
        .collect::<Result<Vec<_>>>()?;

    let mut most: Option<&Analysis> = None;
    let mut least: Option<&Analysis> = None;
    for analysis in &analyses {
        if most.map_or(true, |best| analysis.confidence > best.confidence) {
            most = Some(analysis);
        }
        if least.map_or(true, |worst| analysis.confidence < worst.confidence) {
            least = Some(analysis);
        }
    }
    let most_measurable = most.map(|analysis| analysis.system_name.clone());
    let least_measurable = least.map(|analysis| analysis.system_name.clone());

    Ok(Summary {
        analyses,
        most_measurable,
        least_measurable,
    })
}
