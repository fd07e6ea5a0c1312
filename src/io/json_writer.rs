use anyhow::Result;

use crate::ctx::Ctx;
use crate::schema::v1::{ChartMeta, GroupChartV1, GroupRow, InputMeta};

pub fn build_report(ctx: &Ctx) -> Result<GroupChartV1> {
    let input_meta = InputMeta {
        path: ctx.dataset.input.display().to_string(),
        rows: ctx.input_meta.rows.unwrap_or(0),
        skipped: ctx.input_meta.skipped.unwrap_or(0),
        observations: ctx.observations.len() as u64,
        groups: ctx.statistics.len() as u64,
        censored_dropped: ctx.input_meta.censored_dropped.unwrap_or(0),
    };

    let groups = ctx
        .ranked_statistics()
        .into_iter()
        .enumerate()
        .map(|(i, s)| GroupRow {
            rank: (i + 1) as u64,
            group: s.group.clone(),
            symbiont_status: s.symbiont_status.clone(),
            n: s.n as u64,
            mean: s.mean,
            standard_error: s.standard_error,
            significance_letter: s.significance_letter.clone(),
            censored: s.censored as u64,
        })
        .collect();

    let cfg = &ctx.dataset.chart;
    let svg_path = if ctx.svg_written {
        ctx.output
            .svg_path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
    } else {
        None
    };
    let chart = ChartMeta {
        svg_path,
        fill_by: cfg.fill_by.resolve(ctx.dataset.symbiont_column.is_some()),
        x_axis_label: cfg.x_axis_label.clone(),
        y_axis_label: cfg.y_axis_label.clone(),
        y_limit: cfg.y_limit,
        letter_offset: cfg.letter_offset,
        scale: cfg.scale,
    };

    Ok(GroupChartV1 {
        tool: "kira-groupchart".to_string(),
        version: ctx.tool_version.clone(),
        schema_version: "v1".to_string(),
        dataset: ctx.dataset.name.clone(),
        input_meta,
        groups,
        chart,
        warnings: ctx.warnings.clone(),
    })
}
