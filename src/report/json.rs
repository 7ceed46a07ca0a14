use super::Report;
use chrono::Utc;
use serde::Serialize;

#[derive(Debug, Serialize)]
struct Envelope<'a> {
    version: &'static str,
    generated_at: String,
    #[serde(flatten)]
    report: &'a Report,
}

pub fn to_json(report: &Report) -> Result<String, serde_json::Error> {
    let envelope = Envelope {
        version: env!("CARGO_PKG_VERSION"),
        generated_at: Utc::now().to_rfc3339(),
        report,
    };
    serde_json::to_string_pretty(&envelope)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyze;
    use crate::systems::filesystem::FileSystemExample;

    #[test]
    fn json_report_carries_kind_and_verdict_tag() {
        let system = FileSystemExample::new().expect("fixture should build");
        let analysis = analyze::analyze(&system).expect("analysis should succeed");

        let rendered = to_json(&Report::Analysis(analysis)).expect("json should serialize");
        let value: serde_json::Value =
            serde_json::from_str(&rendered).expect("output should be valid json");

        assert_eq!(value["kind"], "analysis");
        assert_eq!(value["data"]["verdict"], "MEASURABLE");
        assert_eq!(value["data"]["minimum_reach"], 8);
        assert_eq!(value["data"]["maximum_reach"], 80);
        assert_eq!(value["version"], env!("CARGO_PKG_VERSION"));
        assert!(value["generated_at"].is_string());
    }
}
