use anyhow::Result;
use std::time::Instant;
use tracing::{info, warn};

use crate::ctx::Ctx;

pub mod stage0_scaffold;
pub mod stage1_input;
pub mod stage2_groups;
pub mod stage3_letters;
pub mod stage4_chart;
pub mod stage5_output;

pub trait Stage {
    fn name(&self) -> &'static str;
    fn run(&self, ctx: &mut Ctx) -> Result<()>;
}

pub struct Pipeline {
    stages: Vec<Box<dyn Stage>>,
}

impl Pipeline {
    pub fn new(stages: Vec<Box<dyn Stage>>) -> Self {
        Self { stages }
    }

    /// Load, summarize, annotate, render and write.
    pub fn full() -> Self {
        Self::new(vec![
            Box::new(stage0_scaffold::Stage0Scaffold::new()),
            Box::new(stage1_input::Stage1Input::new()),
            Box::new(stage2_groups::Stage2Groups::new()),
            Box::new(stage3_letters::Stage3Letters::required()),
            Box::new(stage4_chart::Stage4Chart::new()),
            Box::new(stage5_output::Stage5Output::new()),
        ])
    }

    /// Everything up to (and including) letter attachment; nothing is written.
    pub fn validate() -> Self {
        Self::new(vec![
            Box::new(stage1_input::Stage1Input::new()),
            Box::new(stage2_groups::Stage2Groups::new()),
            Box::new(stage3_letters::Stage3Letters::required()),
        ])
    }

    /// Group statistics only; letters are attached when configured.
    pub fn summarize() -> Self {
        Self::new(vec![
            Box::new(stage1_input::Stage1Input::new()),
            Box::new(stage2_groups::Stage2Groups::new()),
            Box::new(stage3_letters::Stage3Letters::optional()),
        ])
    }

    pub fn run(&self, ctx: &mut Ctx) -> Result<()> {
        for stage in &self.stages {
            let start = Instant::now();
            info!(dataset = %ctx.dataset.name, stage = stage.name(), "stage started");
            if let Err(err) = stage.run(ctx) {
                let elapsed_ms = start.elapsed().as_millis();
                warn!(
                    dataset = %ctx.dataset.name,
                    stage = stage.name(),
                    elapsed_ms = elapsed_ms as u64,
                    "stage failed"
                );
                return Err(err);
            }
            let elapsed_ms = start.elapsed().as_millis();
            info!(
                dataset = %ctx.dataset.name,
                stage = stage.name(),
                elapsed_ms = elapsed_ms as u64,
                "stage finished"
            );
        }
        Ok(())
    }
}
