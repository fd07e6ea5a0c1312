//! SVG rendering of a [`RankedBarChart`] with plotters.
//!
//! The SVG backend emits text as `<text>` elements, so rendering needs no
//! system fonts and works in headless environments.

use std::path::Path;

use anyhow::{Context, Result};
use plotters::chart::SeriesAnno;
use plotters::coord::Shift;
use plotters::coord::types::RangedCoordf64;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use crate::chart::RankedBarChart;
use crate::error::ChartError;

const BAR_HALF_WIDTH: f64 = 0.35;
const ERROR_CAP_PX: u32 = 12;

const PLAIN_FILL: RGBColor = RGBColor(150, 150, 150);
const FILL_PALETTE: [RGBColor; 6] = [
    RGBColor(31, 119, 180),
    RGBColor(255, 127, 14),
    RGBColor(44, 160, 44),
    RGBColor(214, 39, 40),
    RGBColor(148, 103, 189),
    RGBColor(140, 86, 75),
];

fn render_err<E: std::fmt::Display>(e: E) -> ChartError {
    ChartError::Render(e.to_string())
}

pub fn fill_color(chart: &RankedBarChart, key: Option<&str>) -> RGBColor {
    key.and_then(|k| chart.fill_keys.iter().position(|f| f == k))
        .map(|i| FILL_PALETTE[i % FILL_PALETTE.len()])
        .unwrap_or(PLAIN_FILL)
}

/// Renders the chart to an in-memory SVG document.
pub fn render_svg(chart: &RankedBarChart) -> Result<String, ChartError> {
    let mut svg = String::new();
    {
        let size = (chart.config.width, chart.config.height);
        let root = SVGBackend::with_string(&mut svg, size).into_drawing_area();
        draw(&root, chart)?;
        root.present().map_err(render_err)?;
    }
    Ok(svg)
}

pub fn write_svg(chart: &RankedBarChart, path: &Path) -> Result<()> {
    let svg = render_svg(chart)?;
    std::fs::write(path, svg).with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}

fn draw(
    root: &DrawingArea<SVGBackend<'_>, Shift>,
    chart: &RankedBarChart,
) -> Result<(), ChartError> {
    root.fill(&WHITE).map_err(render_err)?;

    let n = chart.bars.len();
    let (y_min, y_max) = chart.y_range;
    let base = 0.0f64.clamp(y_min, y_max);

    let mut builder = ChartBuilder::on(root);
    builder
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(70);
    if let Some(title) = &chart.config.title {
        builder.caption(title, ("sans-serif", 24));
    }
    let mut cc = builder
        .build_cartesian_2d(-0.5f64..(n as f64 - 0.5), y_min..y_max)
        .map_err(render_err)?;

    let names: Vec<&str> = chart.bars.iter().map(|b| b.group.as_str()).collect();
    let x_formatter = |x: &f64| {
        let idx = x.round();
        if (x - idx).abs() > 1e-6 || idx < 0.0 {
            return String::new();
        }
        names.get(idx as usize).map(|s| s.to_string()).unwrap_or_default()
    };
    cc.configure_mesh()
        .disable_x_mesh()
        .x_labels(n)
        .x_label_formatter(&x_formatter)
        .x_desc(chart.config.x_axis_label.as_str())
        .y_desc(chart.config.y_axis_label.as_str())
        .draw()
        .map_err(render_err)?;

    if chart.fill_keys.is_empty() {
        draw_bars(&mut cc, chart, None, base)?;
    } else {
        for key in &chart.fill_keys {
            let color = fill_color(chart, Some(key));
            draw_bars(&mut cc, chart, Some(key), base)?
                .label(key.as_str())
                .legend(move |(x, y)| {
                    Rectangle::new([(x, y - 5), (x + 12, y + 5)], color.filled())
                });
        }
        cc.configure_series_labels()
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()
            .map_err(render_err)?;
    }

    cc.draw_series(chart.bars.iter().enumerate().filter_map(|(i, bar)| {
        bar.error_bar.map(|(lo, hi)| {
            ErrorBar::new_vertical(i as f64, lo, bar.mean, hi, BLACK.filled(), ERROR_CAP_PX)
        })
    }))
    .map_err(render_err)?;

    let letter_style = TextStyle::from(("sans-serif", 18).into_font())
        .pos(Pos::new(HPos::Center, VPos::Bottom));
    cc.draw_series(chart.bars.iter().enumerate().map(|(i, bar)| {
        Text::new(bar.letter.clone(), (i as f64, bar.letter_y), letter_style.clone())
    }))
    .map_err(render_err)?;

    Ok(())
}

type BarChartContext<'a, 'b> =
    ChartContext<'a, SVGBackend<'b>, Cartesian2d<RangedCoordf64, RangedCoordf64>>;

fn draw_bars<'c, 'a, 'b>(
    cc: &'c mut BarChartContext<'a, 'b>,
    chart: &RankedBarChart,
    key: Option<&str>,
    base: f64,
) -> Result<&'c mut SeriesAnno<'a, SVGBackend<'b>>, ChartError> {
    let color = fill_color(chart, key);
    cc.draw_series(
        chart
            .bars
            .iter()
            .enumerate()
            .filter(|(_, bar)| key.is_none() || bar.fill_key.as_deref() == key)
            .map(|(i, bar)| {
                let x = i as f64;
                Rectangle::new(
                    [(x - BAR_HALF_WIDTH, base), (x + BAR_HALF_WIDTH, bar.mean)],
                    color.filled(),
                )
            }),
    )
    .map_err(render_err)
}
