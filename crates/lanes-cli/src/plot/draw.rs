//! Drawing primitives on a pixel-addressed bitmap area.

use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::error::Error;

pub type Canvas<'a> = DrawingArea<BitMapBackend<'a>, Shift>;
pub type DrawResult = Result<(), Box<dyn Error>>;

pub type Pixel = (i32, i32);

/// Samples along a curved edge.
const CURVE_STEPS: usize = 24;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Circle,
    Square,
}

/// Straight edge when `curvature == 0`, otherwise a quadratic Bézier whose
/// control point sits `curvature × length` off the midpoint.
pub fn edge(
    canvas: &Canvas<'_>,
    from: Pixel,
    to: Pixel,
    width: u32,
    color: RGBColor,
    curvature: f64,
) -> DrawResult {
    let points = if curvature.abs() < f64::EPSILON {
        vec![from, to]
    } else {
        curve(from, to, curvature)
    };
    canvas.draw(&PathElement::new(points, color.stroke_width(width)))?;
    Ok(())
}

/// Filled vertex of diameter `size` with a black outline.
pub fn vertex(canvas: &Canvas<'_>, at: Pixel, shape: Shape, size: u32, fill: RGBColor) -> DrawResult {
    let half = i32::try_from(size / 2).unwrap_or(i32::MAX);
    match shape {
        Shape::Circle => {
            canvas.draw(&Circle::new(at, half, fill.filled()))?;
            canvas.draw(&Circle::new(at, half, BLACK.stroke_width(1)))?;
        }
        Shape::Square => {
            let corners = [(at.0 - half, at.1 - half), (at.0 + half, at.1 + half)];
            canvas.draw(&Rectangle::new(corners, fill.filled()))?;
            canvas.draw(&Rectangle::new(corners, BLACK.stroke_width(1)))?;
        }
    }
    Ok(())
}

/// Bold text centred on `at`. Regular weight loses thin stems at 12px.
pub fn label(canvas: &Canvas<'_>, at: Pixel, text: &str, size: u32) -> DrawResult {
    let style = ("sans-serif", f64::from(size), FontStyle::Bold)
        .into_font()
        .color(&BLACK)
        .pos(Pos::new(HPos::Center, VPos::Center));
    canvas.draw(&Text::new(text.to_string(), at, style))?;
    Ok(())
}

/// Text at the midpoint of a straight edge.
pub fn edge_label(canvas: &Canvas<'_>, from: Pixel, to: Pixel, text: &str, size: u32) -> DrawResult {
    label(canvas, midpoint(from, to), text, size)
}

const fn midpoint(a: Pixel, b: Pixel) -> Pixel {
    ((a.0 + b.0) / 2, (a.1 + b.1) / 2)
}

#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
fn curve(from: Pixel, to: Pixel, curvature: f64) -> Vec<Pixel> {
    let (x0, y0) = (f64::from(from.0), f64::from(from.1));
    let (x1, y1) = (f64::from(to.0), f64::from(to.1));
    let (dx, dy) = (x1 - x0, y1 - y0);
    let cx = f64::midpoint(x0, x1) - dy * curvature;
    let cy = f64::midpoint(y0, y1) + dx * curvature;

    (0..=CURVE_STEPS)
        .map(|step| {
            let t = step as f64 / CURVE_STEPS as f64;
            let u = 1.0 - t;
            let x = u * u * x0 + 2.0 * u * t * cx + t * t * x1;
            let y = u * u * y0 + 2.0 * u * t * cy + t * t * y1;
            (x.round() as i32, y.round() as i32)
        })
        .collect()
}
