use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result, bail};

use crate::ctx::Ctx;

pub fn write_tsv(path: &Path, ctx: &Ctx) -> Result<()> {
    if ctx.statistics.is_empty() {
        bail!("group statistics missing");
    }
    let file = std::fs::File::create(path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    let mut w = BufWriter::new(file);

    writeln!(
        w,
        "rank\tgroup\tsymbiont_status\tn\tmean\tstandard_error\tletter\tcensored"
    )?;
    for (i, s) in ctx.ranked_statistics().into_iter().enumerate() {
        writeln!(
            w,
            "{}\t{}\t{}\t{}\t{:.6}\t{}\t{}\t{}",
            i + 1,
            s.group,
            s.symbiont_status.as_deref().unwrap_or("NA"),
            s.n,
            s.mean,
            s.standard_error
                .map(|se| format!("{:.6}", se))
                .unwrap_or_else(|| "NA".to_string()),
            s.significance_letter.as_deref().unwrap_or("NA"),
            s.censored
        )?;
    }
    w.flush()?;
    Ok(())
}
