use anyhow::{Result, bail};

use crate::ctx::Ctx;

/// Console summary: one line per group in chart order.
pub fn format_summary(ctx: &Ctx) -> Result<String> {
    if ctx.statistics.is_empty() {
        bail!("group statistics missing");
    }

    let mut out = String::new();
    out.push_str(&format!(
        "Dataset: {} (rows={}, groups={})\n",
        ctx.dataset.name,
        ctx.input_meta.rows.unwrap_or(0),
        ctx.statistics.len()
    ));
    out.push_str("rank\tgroup\tsymbiont\tn\tmean\tse\tletter\n");
    for (i, s) in ctx.ranked_statistics().into_iter().enumerate() {
        out.push_str(&format!(
            "{}\t{}\t{}\t{}\t{:.4}\t{}\t{}\n",
            i + 1,
            s.group,
            s.symbiont_status.as_deref().unwrap_or("-"),
            s.n,
            s.mean,
            s.standard_error
                .map(|se| format!("{:.4}", se))
                .unwrap_or_else(|| "NA".to_string()),
            s.significance_letter.as_deref().unwrap_or("-")
        ));
    }
    if ctx.svg_written {
        out.push_str(&format!("Chart: {}\n", ctx.output.svg_path.display()));
    }
    Ok(out)
}
