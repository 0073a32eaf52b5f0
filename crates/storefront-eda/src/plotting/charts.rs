//! Chart drawing functions.

use std::path::Path;

use plotters::prelude::*;

use super::{
    ChartText, PIE_PALETTE, PlotError, Result, mid_step_points, padded_range, value_axis_max,
    year_tick_label,
};
use crate::types::LinearFit;

const BAR_COLOR: RGBColor = RGBColor(31, 119, 180);
const AREA_COLOR: RGBColor = RGBColor(44, 160, 44);

/// Degrees clockwise from 3 o'clock; the first slice starts at 12 o'clock.
const PIE_START_ANGLE: f64 = -90.0;

const CAPTION_FONT: (&str, u32) = ("sans-serif", 32);
const DESC_FONT: (&str, u32) = ("sans-serif", 22);
const LABEL_FONT: (&str, u32) = ("sans-serif", 16);

fn check_pairs(labels: usize, values: usize) -> Result<()> {
    if labels == 0 {
        return Err(PlotError::InvalidData("Data cannot be empty".to_string()));
    }
    if labels != values {
        return Err(PlotError::InvalidData(format!(
            "{labels} labels for {values} values"
        )));
    }
    Ok(())
}

/// Vertical bar chart with one bar per category and rotated category labels.
pub fn bar_chart(
    labels: &[String],
    values: &[f64],
    text: ChartText<'_>,
    output_path: &Path,
    size: (u32, u32),
) -> Result<()> {
    check_pairs(labels.len(), values.len())?;

    let root = BitMapBackend::new(output_path, size).into_drawing_area();
    root.fill(&WHITE)
        .map_err(|e| PlotError::DrawingArea(e.to_string()))?;

    let bars = labels.len() as u32;
    let mut chart = ChartBuilder::on(&root)
        .caption(text.title, CAPTION_FONT)
        .margin(20)
        .x_label_area_size(160)
        .y_label_area_size(80)
        .build_cartesian_2d((0u32..bars).into_segmented(), 0f64..value_axis_max(values))
        .map_err(|e| PlotError::ChartConfig(e.to_string()))?;

    let category_label = |value: &SegmentValue<u32>| match value {
        SegmentValue::CenterOf(i) => labels.get(*i as usize).cloned().unwrap_or_default(),
        _ => String::new(),
    };

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(labels.len())
        .x_label_formatter(&category_label)
        .x_label_style(
            LABEL_FONT
                .into_font()
                .transform(FontTransform::Rotate90),
        )
        .y_label_style(LABEL_FONT)
        .y_label_formatter(&|v| format!("{:.0}", v))
        .x_desc(text.x_desc)
        .y_desc(text.y_desc)
        .axis_desc_style(DESC_FONT)
        .draw()
        .map_err(|e| PlotError::Drawing(e.to_string()))?;

    chart
        .draw_series(
            Histogram::vertical(&chart)
                .style(BAR_COLOR.filled())
                .margin(4)
                .data(values.iter().enumerate().map(|(i, v)| (i as u32, *v))),
        )
        .map_err(|e| PlotError::Drawing(e.to_string()))?;

    root.present()
        .map_err(|e| PlotError::Drawing(e.to_string()))?;

    Ok(())
}

/// Pie chart with percentage labels inside the slices.
pub fn pie_chart(
    labels: &[String],
    sizes: &[f64],
    title: &str,
    output_path: &Path,
    size: (u32, u32),
) -> Result<()> {
    check_pairs(labels.len(), sizes.len())?;
    if sizes.iter().any(|s| !s.is_finite() || *s < 0.0) {
        return Err(PlotError::InvalidData(
            "Slice sizes must be finite and non-negative".to_string(),
        ));
    }
    if sizes.iter().sum::<f64>() <= 0.0 {
        return Err(PlotError::InvalidData("Slice sizes sum to zero".to_string()));
    }

    let root = BitMapBackend::new(output_path, size).into_drawing_area();
    root.fill(&WHITE)
        .map_err(|e| PlotError::DrawingArea(e.to_string()))?;
    let area = root
        .titled(title, CAPTION_FONT)
        .map_err(|e| PlotError::DrawingArea(e.to_string()))?;

    let (width, height) = area.dim_in_pixel();
    let center = ((width / 2) as i32, (height / 2) as i32);
    let radius = f64::from(width.min(height)) * 0.35;
    let colors: Vec<RGBColor> = (0..sizes.len())
        .map(|i| PIE_PALETTE[i % PIE_PALETTE.len()])
        .collect();

    let mut pie = Pie::new(&center, &radius, sizes, &colors, labels);
    pie.start_angle(PIE_START_ANGLE);
    pie.label_style(("sans-serif", 20).into_font().color(&BLACK));
    pie.percentages(LABEL_FONT.into_font().color(&WHITE));

    area.draw(&pie)
        .map_err(|e| PlotError::Drawing(e.to_string()))?;
    root.present()
        .map_err(|e| PlotError::Drawing(e.to_string()))?;

    Ok(())
}

/// Filled step chart over integer x positions (steps change midway between
/// points) with the step outline drawn on top.
pub fn step_area_chart(
    points: &[(f64, f64)],
    text: ChartText<'_>,
    max_x_ticks: usize,
    output_path: &Path,
    size: (u32, u32),
) -> Result<()> {
    let (Some(first), Some(last)) = (points.first(), points.last()) else {
        return Err(PlotError::InvalidData("Data cannot be empty".to_string()));
    };
    let steps = mid_step_points(points);
    let ys: Vec<f64> = points.iter().map(|p| p.1).collect();

    let root = BitMapBackend::new(output_path, size).into_drawing_area();
    root.fill(&WHITE)
        .map_err(|e| PlotError::DrawingArea(e.to_string()))?;

    let mut chart = ChartBuilder::on(&root)
        .caption(text.title, CAPTION_FONT)
        .margin(20)
        .x_label_area_size(60)
        .y_label_area_size(80)
        .build_cartesian_2d((first.0 - 0.5)..(last.0 + 0.5), 0f64..value_axis_max(&ys))
        .map_err(|e| PlotError::ChartConfig(e.to_string()))?;

    chart
        .configure_mesh()
        .x_labels(max_x_ticks)
        .x_label_formatter(&|x| year_tick_label(*x))
        .y_label_formatter(&|y| format!("{:.0}", y))
        .label_style(LABEL_FONT)
        .x_desc(text.x_desc)
        .y_desc(text.y_desc)
        .axis_desc_style(DESC_FONT)
        .draw()
        .map_err(|e| PlotError::Drawing(e.to_string()))?;

    chart
        .draw_series(AreaSeries::new(
            steps.iter().copied(),
            0.0,
            AREA_COLOR.mix(0.3),
        ))
        .map_err(|e| PlotError::Drawing(e.to_string()))?;
    chart
        .draw_series(LineSeries::new(
            steps.iter().copied(),
            AREA_COLOR.stroke_width(2),
        ))
        .map_err(|e| PlotError::Drawing(e.to_string()))?;

    root.present()
        .map_err(|e| PlotError::Drawing(e.to_string()))?;

    Ok(())
}

/// Scatter plot, optionally with a fitted line drawn in red across the x range.
pub fn scatter_chart(
    points: &[(f64, f64)],
    fit: Option<&LinearFit>,
    text: ChartText<'_>,
    output_path: &Path,
    size: (u32, u32),
) -> Result<()> {
    if points.is_empty() {
        return Err(PlotError::InvalidData("Data cannot be empty".to_string()));
    }

    let x_range = padded_range(points.iter().map(|p| p.0), 0.05);
    let fit_ends = fit.map(|f| {
        [
            (x_range.start, f.predict(x_range.start)),
            (x_range.end, f.predict(x_range.end)),
        ]
    });
    let y_range = padded_range(
        points
            .iter()
            .map(|p| p.1)
            .chain(fit_ends.iter().flatten().map(|p| p.1)),
        0.05,
    );

    let root = BitMapBackend::new(output_path, size).into_drawing_area();
    root.fill(&WHITE)
        .map_err(|e| PlotError::DrawingArea(e.to_string()))?;

    let mut chart = ChartBuilder::on(&root)
        .caption(text.title, CAPTION_FONT)
        .margin(20)
        .x_label_area_size(60)
        .y_label_area_size(90)
        .build_cartesian_2d(x_range, y_range)
        .map_err(|e| PlotError::ChartConfig(e.to_string()))?;

    chart
        .configure_mesh()
        .label_style(LABEL_FONT)
        .x_desc(text.x_desc)
        .y_desc(text.y_desc)
        .axis_desc_style(DESC_FONT)
        .draw()
        .map_err(|e| PlotError::Drawing(e.to_string()))?;

    chart
        .draw_series(
            points
                .iter()
                .map(|&(x, y)| Circle::new((x, y), 3, BLUE.mix(0.4).filled())),
        )
        .map_err(|e| PlotError::Drawing(e.to_string()))?;

    if let (Some(ends), Some(fit)) = (fit_ends, fit) {
        chart
            .draw_series(LineSeries::new(ends, RED.stroke_width(2)))
            .map_err(|e| PlotError::Drawing(e.to_string()))?
            .label(format!(
                "Linear fit: y = {:.3}x + {:.3}",
                fit.slope, fit.intercept
            ))
            .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], RED.stroke_width(2)));

        chart
            .configure_series_labels()
            .label_font(LABEL_FONT)
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()
            .map_err(|e| PlotError::Drawing(e.to_string()))?;
    }

    root.present()
        .map_err(|e| PlotError::Drawing(e.to_string()))?;

    Ok(())
}
