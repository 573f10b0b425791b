use crate::report::RunReport;

pub fn render_report_json(report: &RunReport) -> serde_json::Result<String> {
    let mut out = serde_json::to_string_pretty(report)?;
    out.push('\n');
    Ok(out)
}
