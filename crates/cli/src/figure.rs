//! Two-panel SVG comparison of the solvers across a sweep.
//!
//! Left: total value (`v_dp`, `v_greedy`) against n. Right: solve time
//! (`t_dp`, `t_greedy`) against n. Rows sharing an n are averaged first.

use std::path::Path;

use anyhow::{Context, Result};
use plotters::coord::Shift;
use plotters::prelude::{
    ChartBuilder, Circle, Color, Cross, DrawingArea, IntoDrawingArea, LineSeries, PathElement,
    RGBColor, SVGBackend, BLACK, CYAN, MAGENTA, WHITE,
};
use polars::prelude::*;

const SIZE: (u32, u32) = (1500, 500);
const DP_COLOR: RGBColor = MAGENTA;
const GREEDY_COLOR: RGBColor = CYAN;

/// Per-n means, ascending by n.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Curves {
    pub n: Vec<f64>,
    pub v_dp: Vec<f64>,
    pub v_greedy: Vec<f64>,
    pub t_dp: Vec<f64>,
    pub t_greedy: Vec<f64>,
}

fn column(df: &DataFrame, name: &str) -> Result<Vec<f64>> {
    Ok(df.column(name)?.f64()?.into_iter().flatten().collect())
}

/// Average the stacked results per n.
pub fn curves(df: &DataFrame) -> Result<Curves> {
    let by_n = df
        .clone()
        .lazy()
        .group_by([col("n")])
        .agg([
            col("v_dp").mean(),
            col("v_greedy").mean(),
            col("t_dp").mean(),
            col("t_greedy").mean(),
        ])
        .sort(["n"], SortMultipleOptions::default())
        .select([
            col("n").cast(DataType::Float64),
            col("v_dp"),
            col("v_greedy"),
            col("t_dp"),
            col("t_greedy"),
        ])
        .collect()?;
    Ok(Curves {
        n: column(&by_n, "n")?,
        v_dp: column(&by_n, "v_dp")?,
        v_greedy: column(&by_n, "v_greedy")?,
        t_dp: column(&by_n, "t_dp")?,
        t_greedy: column(&by_n, "t_greedy")?,
    })
}

fn span(values: &[f64]) -> (f64, f64) {
    let lo = values.iter().copied().fold(f64::INFINITY, f64::min);
    let hi = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if !lo.is_finite() || !hi.is_finite() {
        return (0.0, 1.0);
    }
    if hi > lo {
        (lo, hi)
    } else {
        (lo - 0.5, hi + 0.5)
    }
}

fn draw_panel(
    area: &DrawingArea<SVGBackend<'_>, Shift>,
    caption: &str,
    y_desc: &str,
    n: &[f64],
    dp: &[f64],
    greedy: &[f64],
) -> Result<()> {
    let (x_lo, x_hi) = span(n);
    let (_, y_hi) = span(&[dp, greedy].concat());
    let mut chart = ChartBuilder::on(area)
        .caption(caption, ("sans-serif", 18))
        .margin(15)
        .x_label_area_size(40)
        .y_label_area_size(80)
        .build_cartesian_2d(x_lo..x_hi, 0f64..y_hi * 1.05)?;
    chart
        .configure_mesh()
        .x_desc("n")
        .y_desc(y_desc)
        .draw()?;

    let dp_points: Vec<(f64, f64)> = n.iter().copied().zip(dp.iter().copied()).collect();
    let greedy_points: Vec<(f64, f64)> =
        n.iter().copied().zip(greedy.iter().copied()).collect();

    chart
        .draw_series(LineSeries::new(dp_points.iter().copied(), &DP_COLOR))?
        .label("Dynamic Programming")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], DP_COLOR));
    chart.draw_series(
        dp_points
            .iter()
            .map(|&p| Circle::new(p, 3, DP_COLOR.stroke_width(1))),
    )?;
    chart
        .draw_series(LineSeries::new(greedy_points.iter().copied(), &GREEDY_COLOR))?
        .label("Greedy")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], GREEDY_COLOR));
    chart.draw_series(
        greedy_points
            .iter()
            .map(|&p| Cross::new(p, 3, GREEDY_COLOR.stroke_width(1))),
    )?;

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;
    Ok(())
}

/// Render both panels into an SVG file at `out`.
pub fn render(curves: &Curves, out: &Path) -> Result<()> {
    if curves.n.is_empty() {
        anyhow::bail!("no rows to plot");
    }
    if let Some(parent) = out.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
    }
    let root = SVGBackend::new(out, SIZE).into_drawing_area();
    root.fill(&WHITE)?;
    let root = root.titled("Dynamic Programming vs. Greedy", ("sans-serif", 22))?;
    let (left, right) = root.split_horizontally((SIZE.0 / 2) as i32);
    draw_panel(
        &left,
        "(a) total sale value",
        "value",
        &curves.n,
        &curves.v_dp,
        &curves.v_greedy,
    )?;
    draw_panel(
        &right,
        "(b) execution time",
        "seconds",
        &curves.n,
        &curves.t_dp,
        &curves.t_greedy,
    )?;
    root.present()
        .with_context(|| format!("writing {}", out.display()))?;
    Ok(())
}
