use anyhow::{Result, bail};
use tracing::{info, warn};

use crate::ctx::Ctx;
use crate::input::{TableColumns, read_observations};
use crate::pipeline::Stage;

pub struct Stage1Input;

impl Stage1Input {
    pub fn new() -> Self {
        Self
    }
}

impl Stage for Stage1Input {
    fn name(&self) -> &'static str {
        "stage1_input"
    }

    fn run(&self, ctx: &mut Ctx) -> Result<()> {
        let ds = &ctx.dataset;
        let columns = TableColumns {
            group: &ds.group_column,
            response: &ds.response_column,
            symbiont: ds.symbiont_column.as_deref(),
            censor: ds.censor_column.as_deref(),
        };
        let table = read_observations(&ds.input, columns)?;

        info!(
            input = %ds.input.display(),
            rows = table.rows,
            skipped = table.skipped,
            "input_loaded"
        );
        if table.skipped > 0 {
            warn!(skipped = table.skipped, "rows with missing response skipped");
        }

        let mut observations = table.observations;
        let mut dropped = 0u64;
        if ds.drop_censored {
            let before = observations.len();
            observations.retain(|o| o.censored != Some(true));
            dropped = (before - observations.len()) as u64;
            info!(dropped, "censored observations dropped");
        }

        if observations.is_empty() {
            bail!("{}: no usable observations", ds.input.display());
        }

        ctx.warnings.extend(table.warnings);
        ctx.observations = observations;
        ctx.input_meta.rows = Some(table.rows as u64);
        ctx.input_meta.skipped = Some(table.skipped as u64);
        ctx.input_meta.censored_dropped = Some(dropped);
        Ok(())
    }
}
