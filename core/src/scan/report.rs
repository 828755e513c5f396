use serde_json::Value;

use super::file::ScanRun;
use super::render::render_highlight;

pub fn build_report(runs: &[ScanRun]) -> Value {
    let mut total_emissions = 0usize;
    let mut total_with_mismatch = 0usize;

    let mut file_items = Vec::new();

    for r in runs {
        total_emissions += r.emissions.len();
        total_with_mismatch += r.with_mismatch();

        let emissions: Vec<Value> = r
            .emissions
            .iter()
            .map(|e| {
                serde_json::json!({
                    "line": e.line,
                    "message": e.message,
                    "actual": e.mismatch.as_ref().map(|m| m.actual.as_str()),
                    "expected": e.mismatch.as_ref().map(|m| m.expected.as_str()),
                    "divergence": e.divergence,
                })
            })
            .collect();

        file_items.push(serde_json::json!({
            "path": r.path,
            "mode": r.mode,
            "lines": r.lines,
            "passed": r.emissions.is_empty(),
            "emissions": emissions,
        }));
    }

    serde_json::json!({
        "scanned_at": chrono::Utc::now().to_rfc3339(),
        "totals": {
            "files": runs.len(),
            "emissions": total_emissions,
            "emissions_with_mismatch": total_with_mismatch,
        },
        "files": file_items,
    })
}

pub fn format_text(runs: &[ScanRun], color: bool) -> String {
    let mut out = String::new();

    let emissions: usize = runs.iter().map(|r| r.emissions.len()).sum();
    out.push_str("errscan report\n");
    out.push_str(&format!("files: {}\n", runs.len()));
    out.push_str(&format!("emissions: {emissions}\n"));

    for r in runs {
        let verdict = if r.emissions.is_empty() {
            "PASSED"
        } else {
            "FAILED"
        };
        out.push_str(&format!("- file: {}\n", r.path));
        out.push_str(&format!("  lines: {}\n", r.lines));
        out.push_str(&format!(
            "  result: {verdict} ({} emissions)\n",
            r.emissions.len()
        ));

        for e in &r.emissions {
            let mut msg_lines = e.message.lines();
            out.push_str(&format!(
                "  line {}: {}\n",
                e.line,
                msg_lines.next().unwrap_or("")
            ));
            for cont in msg_lines {
                out.push_str(&format!("    {cont}\n"));
            }

            if let (Some(pair), Some(d)) = (&e.mismatch, e.divergence) {
                for hl in render_highlight(pair, d, color).lines() {
                    out.push_str(&format!("    {hl}\n"));
                }
            }
        }
    }

    out
}
