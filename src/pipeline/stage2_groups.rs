use anyhow::Result;
use tracing::{info, warn};

use crate::ctx::Ctx;
use crate::groups::{compute_group_statistics, single_observation_groups};
use crate::pipeline::Stage;

pub struct Stage2Groups;

impl Stage2Groups {
    pub fn new() -> Self {
        Self
    }
}

impl Stage for Stage2Groups {
    fn name(&self) -> &'static str {
        "stage2_groups"
    }

    fn run(&self, ctx: &mut Ctx) -> Result<()> {
        let statistics = compute_group_statistics(&ctx.observations)?;

        for group in single_observation_groups(&statistics) {
            warn!(group, "single observation; standard error undefined");
            ctx.warnings.push(format!(
                "group '{}' has a single observation; standard error undefined",
                group
            ));
        }

        info!(groups = statistics.len(), "group_statistics_ready");
        ctx.statistics = statistics;
        Ok(())
    }
}
