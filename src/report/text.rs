use crate::report::{LevelReport, RankedEntry, RunReport, format_percent_1, format_z_4};

pub fn render_report_text(report: &RunReport) -> String {
    let mut out = String::new();

    out.push_str("City Ranking Report\n");
    out.push_str("===================\n\n");
    out.push_str(&format!(
        "{} {} | alternatives: {} | levels: {}\n\n",
        report.tool,
        report.version,
        report.alternatives,
        report.levels.len()
    ));

    let n_levels = report.levels.len();
    for (i, level) in report.levels.iter().enumerate() {
        let is_root = i + 1 == n_levels;
        out.push_str(&render_level(level, is_root));
        out.push('\n');
    }

    out
}

pub fn render_level(level: &LevelReport, is_root: bool) -> String {
    let mut out = String::new();

    out.push_str(&format!("== {} ==\n", level.name));
    let labels = level
        .rows
        .iter()
        .map(|r| r.axis.as_str())
        .collect::<Vec<_>>();
    out.push_str(&format!("[{}]\n", labels.join(" ")));
    out.push_str("data:\n");
    out.push_str(&render_matrix(level));

    for row in &level.rows {
        let percent = format!("{}%", format_percent_1(100.0 * row.weight));
        out.push_str(&format!("{:<6} {}\n", percent, row.axis));
        push_ranking(&mut out, &row.ranking);
    }

    if is_root {
        out.push_str("Final\n");
    } else {
        out.push_str(&format!("Composite {}\n", level.name));
    }
    push_ranking(&mut out, &level.composite);

    out
}

fn render_matrix(level: &LevelReport) -> String {
    let label_w = level
        .rows
        .iter()
        .map(|r| r.axis.len())
        .max()
        .unwrap_or(0)
        .max(4);
    let col_w = level
        .columns
        .iter()
        .map(|c| c.len())
        .max()
        .unwrap_or(0)
        .max(8);

    let mut out = String::new();
    out.push_str(&format!("    {:<label_w$}", "axis"));
    for name in &level.columns {
        out.push_str(&format!("  {:>col_w$}", name));
    }
    out.push('\n');
    for row in &level.rows {
        out.push_str(&format!("    {:<label_w$}", row.axis));
        for &z in &row.scores {
            out.push_str(&format!("  {:>col_w$}", format_z_4(z)));
        }
        out.push('\n');
    }
    out
}

fn push_ranking(out: &mut String, ranking: &[RankedEntry]) {
    for entry in ranking {
        out.push_str(&format!(
            "    {:<20}{:>5}%\n",
            entry.name,
            format_percent_1(entry.percentile)
        ));
    }
}
