//! SVG renderers for the training artifacts: the loss curve and the
//! predictions-vs-truth scatter.

use std::fmt::Display;
use std::path::Path;

use ndarray::ArrayView1;
use plotters::prelude::*;

use crate::{MlErr, Result};

const SIZE: (u32, u32) = (800, 600);

/// Renders the per-epoch loss curve.
///
/// # Arguments
/// * `losses` - One value per epoch, in order.
/// * `path` - Destination of the SVG file.
///
/// # Errors
/// `InvalidInput` on an empty series, `Render` if drawing fails.
pub fn loss_curve(losses: &[f32], path: &Path) -> Result<()> {
    if losses.is_empty() {
        return Err(MlErr::InvalidInput("cannot plot an empty loss series"));
    }

    let root = SVGBackend::new(path, SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(render_err)?;

    let top = losses.iter().copied().fold(f32::EPSILON, f32::max);
    let mut chart = ChartBuilder::on(&root)
        .caption("Training loss", ("sans-serif", 24))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(0..losses.len() as u32, 0f32..top * 1.05)
        .map_err(render_err)?;

    chart
        .configure_mesh()
        .x_desc("Epoch")
        .y_desc("Cost")
        .draw()
        .map_err(render_err)?;

    chart
        .draw_series(LineSeries::new(
            losses.iter().enumerate().map(|(i, &l)| (i as u32, l)),
            &RED,
        ))
        .map_err(render_err)?;

    root.present().map_err(render_err)?;
    Ok(())
}

/// Renders predicted and true values against their sample index.
///
/// # Errors
/// `ShapeMismatch` if the series lengths differ, `InvalidInput` on empty
/// series, `Render` if drawing fails.
pub fn predictions(y_pred: ArrayView1<f32>, y_true: ArrayView1<f32>, path: &Path) -> Result<()> {
    if y_pred.len() != y_true.len() {
        return Err(MlErr::ShapeMismatch {
            a: "predictions",
            b: "true labels",
            got: y_pred.len(),
            expected: y_true.len(),
        });
    }
    if y_pred.is_empty() {
        return Err(MlErr::InvalidInput("cannot plot empty prediction series"));
    }

    let lo = y_pred
        .iter()
        .chain(y_true.iter())
        .copied()
        .fold(f32::INFINITY, f32::min);
    let hi = y_pred
        .iter()
        .chain(y_true.iter())
        .copied()
        .fold(f32::NEG_INFINITY, f32::max);
    let pad = ((hi - lo) * 0.05).max(1.0);

    let root = SVGBackend::new(path, SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(render_err)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Predictions vs. true labels", ("sans-serif", 24))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(0..y_pred.len() as u32, lo - pad..hi + pad)
        .map_err(render_err)?;

    chart
        .configure_mesh()
        .x_desc("Sample numbers")
        .y_desc("Values")
        .draw()
        .map_err(render_err)?;

    chart
        .draw_series(
            y_pred
                .iter()
                .enumerate()
                .map(|(i, &v)| Circle::new((i as u32, v), 3, RED.filled())),
        )
        .map_err(render_err)?
        .label("predictions")
        .legend(|(x, y)| Circle::new((x, y), 3, RED.filled()));

    chart
        .draw_series(
            y_true
                .iter()
                .enumerate()
                .map(|(i, &v)| Cross::new((i as u32, v), 3, &BLUE)),
        )
        .map_err(render_err)?
        .label("true labels")
        .legend(|(x, y)| Cross::new((x, y), 3, &BLUE));

    chart
        .configure_series_labels()
        .border_style(&BLACK)
        .background_style(&WHITE)
        .draw()
        .map_err(render_err)?;

    root.present().map_err(render_err)?;
    Ok(())
}

fn render_err(e: impl Display) -> MlErr {
    MlErr::Render(e.to_string())
}
