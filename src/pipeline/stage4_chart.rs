use anyhow::Result;
use tracing::{info, warn};

use crate::chart::{FillBy, build_ranked_bar_chart, write_svg};
use crate::ctx::Ctx;
use crate::pipeline::Stage;

pub struct Stage4Chart;

impl Stage4Chart {
    pub fn new() -> Self {
        Self
    }
}

impl Stage for Stage4Chart {
    fn name(&self) -> &'static str {
        "stage4_chart"
    }

    fn run(&self, ctx: &mut Ctx) -> Result<()> {
        if ctx.dataset.chart.fill_by == FillBy::SymbiontStatus
            && ctx.dataset.symbiont_column.is_none()
        {
            warn!("fill_by = symbiont_status without symbiont_column; bars left unfilled");
            ctx.warnings.push(
                "fill_by = symbiont_status requested but no symbiont_column configured"
                    .to_string(),
            );
        }

        let chart = build_ranked_bar_chart(&ctx.statistics, &ctx.dataset.chart)?;
        write_svg(&chart, &ctx.output.svg_path)?;
        ctx.svg_written = true;
        info!(
            svg = %ctx.output.svg_path.display(),
            bars = chart.bars.len(),
            "chart_rendered"
        );
        ctx.chart = Some(chart);
        Ok(())
    }
}
