use anyhow::{Result, bail};
use tracing::{info, warn};

use crate::ctx::Ctx;
use crate::letters::{LetterMap, attach_significance_letters, load_letters_file};
use crate::pipeline::Stage;

pub struct Stage3Letters {
    required: bool,
}

impl Stage3Letters {
    pub fn required() -> Self {
        Self { required: true }
    }

    pub fn optional() -> Self {
        Self { required: false }
    }
}

impl Stage for Stage3Letters {
    fn name(&self) -> &'static str {
        "stage3_letters"
    }

    fn run(&self, ctx: &mut Ctx) -> Result<()> {
        let letters: LetterMap = match (&ctx.dataset.letters, &ctx.dataset.letters_file) {
            (Some(inline), _) => inline.clone(),
            (None, Some(path)) => load_letters_file(path)?,
            (None, None) if self.required => {
                bail!(
                    "dataset '{}' has no significance letters (set letters or letters_file)",
                    ctx.dataset.name
                );
            }
            (None, None) => {
                warn!(dataset = %ctx.dataset.name, "no significance letters configured");
                return Ok(());
            }
        };

        let statistics = std::mem::take(&mut ctx.statistics);
        ctx.statistics = attach_significance_letters(statistics, &letters)?;
        ctx.letters = Some(letters);

        info!("significance_letters_attached");
        Ok(())
    }
}
