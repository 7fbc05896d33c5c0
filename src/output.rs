//! Text and JSON rendering of a diagnosis

use crate::report::Diagnosis;
use anyhow::Result;

/// Human-readable report
pub fn render_text(diagnosis: &Diagnosis) -> String {
    let mut output = String::new();

    output.push_str(&format!("Process: {}\n", diagnosis.pid));

    if !diagnosis.ancestry.is_empty() {
        let chain: Vec<String> = diagnosis
            .ancestry
            .iter()
            .map(|p| format!("{} ({})", p.command, p.pid))
            .collect();
        output.push_str(&format!("Ancestry: {}\n", chain.join(" <- ")));
    }

    match &diagnosis.source {
        Some(source) => output.push_str(&format!(
            "Source: {} ({}), confidence {}\n",
            source.source_type, source.name, source.confidence
        )),
        None => output.push_str("Source: unknown\n"),
    }

    if let Some(ctx) = &diagnosis.file_context {
        output.push_str("Files:\n");
        match ctx.usage_percent() {
            Some(usage) => output.push_str(&format!(
                "  Open descriptors: {} / {} ({:.1}%)\n",
                ctx.open_files, ctx.file_limit, usage
            )),
            None => output.push_str(&format!("  Open descriptors: {}\n", ctx.open_files)),
        }
        if !ctx.locked_files.is_empty() {
            output.push_str("  Locked files (device:inode):\n");
            for id in &ctx.locked_files {
                output.push_str(&format!("    {}\n", id));
            }
        }
    }

    output
}

/// Pretty-printed JSON report
pub fn render_json(diagnosis: &Diagnosis) -> Result<String> {
    Ok(serde_json::to_string_pretty(diagnosis)?)
}
