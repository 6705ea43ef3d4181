//! Drawing a [`Figure`] onto a plotters backend.

use geosection_core::{Color, SectionStyle};
use plotters::coord::types::RangedCoordf64;
use plotters::coord::{CoordTranslate, Shift};
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::Color as _;

use crate::error::{RenderError, RenderResult};
use crate::figure::{Colorbar, Figure, Layer, LegendKind, MarkerShape, Paint, COLORBAR_WIDTH};

type Chart<'a, DB> = ChartContext<'a, DB, Cartesian2d<RangedCoordf64, RangedCoordf64>>;

/// Arrow head length in pixels.
const HEAD_LENGTH: f64 = 7.0;

/// Half-height of the diamond drawn in legend entries.
const LEGEND_MARKER: i32 = 5;

fn backend<E: std::error::Error + Send + Sync>(e: DrawingAreaErrorKind<E>) -> RenderError {
    RenderError::Backend(e.to_string())
}

fn rgba(paint: Paint) -> RGBAColor {
    let Color { r, g, b } = paint.color;
    RGBAColor(r, g, b, paint.alpha)
}

fn rgb(color: Color) -> RGBColor {
    RGBColor(color.r, color.g, color.b)
}

/// Diamond marker vertices around the origin, `s` pixels from center to tip.
fn diamond(s: i32) -> Vec<(i32, i32)> {
    vec![(0, -s), (s, 0), (0, s), (-s, 0)]
}

/// The diamond closed back onto its first vertex, for outlines.
fn diamond_outline(s: i32) -> Vec<(i32, i32)> {
    let mut outline = diamond(s);
    outline.push((0, -s));
    outline
}

fn small_font(style: &SectionStyle) -> f64 {
    f64::from(style.label_font_size) * 0.75
}

/// Widens an empty or inverted range so the chart has a valid span.
fn padded(range: (f64, f64)) -> std::ops::Range<f64> {
    let (lo, hi) = range;
    if hi > lo {
        lo..hi
    } else {
        lo - 0.5..lo + 0.5
    }
}

/// Draws `figure` onto `root`.
///
/// With `with_text` unset, no captions, tick labels, legends or text layers
/// are drawn; backends without a font rasterizer need this.
pub fn draw_figure<DB: DrawingBackend>(
    figure: &Figure,
    style: &SectionStyle,
    root: &DrawingArea<DB, Shift>,
    with_text: bool,
) -> RenderResult<()> {
    root.fill(&WHITE).map_err(backend)?;

    let split;
    let (plot_area, bar_area) = if figure.colorbar.is_some() {
        let (w, _) = root.dim_in_pixel();
        split = root.split_horizontally(w.saturating_sub(COLORBAR_WIDTH));
        (&split.0, Some(&split.1))
    } else {
        (root, None)
    };

    let mut builder = ChartBuilder::on(plot_area);
    builder
        .margin(15)
        .x_label_area_size(45)
        .y_label_area_size(70);
    if with_text {
        if let Some(title) = &figure.title {
            builder.caption(title, ("sans-serif", f64::from(style.title_font_size)));
        }
    }
    let mut chart = builder
        .build_cartesian_2d(padded(figure.x_range), padded(figure.y_range))
        .map_err(backend)?;

    let mut mesh = chart.configure_mesh();
    mesh.disable_mesh();
    if with_text {
        mesh.x_desc(figure.x_label.as_str())
            .y_desc(figure.y_label.as_str())
            .axis_desc_style(("sans-serif", f64::from(style.label_font_size)))
            .label_style(("sans-serif", small_font(style)));
    } else {
        mesh.x_labels(0).y_labels(0);
    }
    mesh.draw().map_err(backend)?;

    for layer in &figure.layers {
        draw_layer(&mut chart, layer, with_text)?;
    }

    if with_text && !figure.legend.is_empty() {
        draw_legend(&mut chart, figure, style)?;
    }

    if let (Some(colorbar), Some(area)) = (&figure.colorbar, bar_area) {
        draw_colorbar(colorbar, style, area, with_text)?;
    }

    root.present().map_err(backend)?;
    Ok(())
}

fn draw_layer<'a, DB: DrawingBackend + 'a>(
    chart: &mut Chart<'a, DB>,
    layer: &Layer,
    with_text: bool,
) -> RenderResult<()> {
    match layer {
        Layer::Raster { cells } => {
            chart
                .draw_series(cells.iter().map(|cell| {
                    let [x0, y0, x1, y1] = cell.bounds;
                    Rectangle::new([(x0, y0), (x1, y1)], rgba(cell.paint).filled())
                }))
                .map_err(backend)?;
        }
        Layer::Polyline {
            points,
            paint,
            width,
            closed,
        } => {
            let mut path: Vec<(f64, f64)> = points.iter().map(|p| (p.x, p.y)).collect();
            if *closed {
                if let Some(&first) = path.first() {
                    path.push(first);
                }
            }
            chart
                .draw_series(std::iter::once(PathElement::new(
                    path,
                    rgba(*paint).stroke_width(*width),
                )))
                .map_err(backend)?;
        }
        Layer::Polygon { points, paint } => {
            let poly: Vec<(f64, f64)> = points.iter().map(|p| (p.x, p.y)).collect();
            chart
                .draw_series(std::iter::once(Polygon::new(poly, rgba(*paint).filled())))
                .map_err(backend)?;
        }
        Layer::Markers {
            markers,
            shape,
            size,
            edge,
        } => {
            #[allow(clippy::cast_possible_wrap)]
            let s = *size as i32;
            let shape_points = diamond(s);
            match shape {
                MarkerShape::Circle => {
                    chart
                        .draw_series(markers.iter().map(|m| {
                            Circle::new((m.position.x, m.position.y), *size, rgba(m.fill).filled())
                        }))
                        .map_err(backend)?;
                }
                MarkerShape::Diamond => {
                    chart
                        .draw_series(markers.iter().map(|m| {
                            EmptyElement::at((m.position.x, m.position.y))
                                + Polygon::new(shape_points.clone(), rgba(m.fill).filled())
                        }))
                        .map_err(backend)?;
                }
            }
            if let Some(edge) = edge {
                let edge_style = rgba(*edge).stroke_width(1);
                match shape {
                    MarkerShape::Circle => {
                        chart
                            .draw_series(markers.iter().map(|m| {
                                Circle::new((m.position.x, m.position.y), *size, edge_style)
                            }))
                            .map_err(backend)?;
                    }
                    MarkerShape::Diamond => {
                        let outline = diamond_outline(s);
                        chart
                            .draw_series(markers.iter().map(|m| {
                                EmptyElement::at((m.position.x, m.position.y))
                                    + PathElement::new(outline.clone(), edge_style)
                            }))
                            .map_err(backend)?;
                    }
                }
            }
        }
        Layer::Arrows {
            arrows,
            paint,
            width,
        } => {
            let shaft = rgba(*paint).stroke_width(*width);
            chart
                .draw_series(arrows.iter().map(|a| {
                    let h = a.head();
                    PathElement::new(vec![(a.tail.x, a.tail.y), (h.x, h.y)], shaft)
                }))
                .map_err(backend)?;

            let heads: Vec<_> = {
                let coord = chart.as_coord_spec();
                arrows
                    .iter()
                    .filter_map(|a| {
                        let h = a.head();
                        let tail = coord.translate(&(a.tail.x, a.tail.y));
                        let head = coord.translate(&(h.x, h.y));
                        head_offsets(tail, head).map(|tri| ((h.x, h.y), tri))
                    })
                    .collect()
            };
            chart
                .draw_series(heads.into_iter().map(|(at, tri)| {
                    EmptyElement::at(at) + Polygon::new(tri.to_vec(), rgba(*paint).filled())
                }))
                .map_err(backend)?;
        }
        Layer::Text {
            position,
            text,
            paint,
            size,
        } => {
            if !with_text {
                return Ok(());
            }
            let font = ("sans-serif", f64::from(*size))
                .into_font()
                .color(&rgba(*paint))
                .pos(Pos::new(HPos::Center, VPos::Center));
            chart
                .draw_series(std::iter::once(Text::new(
                    text.clone(),
                    (position.x, position.y),
                    font,
                )))
                .map_err(backend)?;
        }
    }
    Ok(())
}

/// Pixel offsets of an arrow head triangle relative to its tip.
///
/// Returns `None` for arrows shorter than a pixel.
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
fn head_offsets(tail: (i32, i32), head: (i32, i32)) -> Option<[(i32, i32); 3]> {
    let dx = f64::from(head.0 - tail.0);
    let dy = f64::from(head.1 - tail.1);
    let len = dx.hypot(dy);
    if len < 1.0 {
        return None;
    }
    let l = HEAD_LENGTH.min(len);
    let (ux, uy) = (dx / len, dy / len);
    let (bx, by) = (-ux * l, -uy * l);
    let (px, py) = (-uy * l * 0.4, ux * l * 0.4);
    Some([
        (0, 0),
        ((bx + px).round() as i32, (by + py).round() as i32),
        ((bx - px).round() as i32, (by - py).round() as i32),
    ])
}

fn draw_legend<'a, DB: DrawingBackend + 'a>(
    chart: &mut Chart<'a, DB>,
    figure: &Figure,
    style: &SectionStyle,
) -> RenderResult<()> {
    for entry in &figure.legend {
        let color = rgba(entry.paint);
        let anno = chart
            .draw_series(std::iter::empty::<Rectangle<(f64, f64)>>())
            .map_err(backend)?;
        anno.label(entry.label.as_str());
        match entry.kind {
            LegendKind::Patch => {
                anno.legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 14, y + 5)], color.filled()));
            }
            LegendKind::Marker => {
                let edge = rgb(style.marker_edge_color).stroke_width(1);
                anno.legend(move |(x, y)| {
                    EmptyElement::at((x + 7, y))
                        + Polygon::new(diamond(LEGEND_MARKER), color.filled())
                        + PathElement::new(diamond_outline(LEGEND_MARKER), edge)
                });
            }
            LegendKind::Line => {
                anno.legend(move |(x, y)| {
                    PathElement::new(vec![(x, y), (x + 14, y)], color.stroke_width(2))
                });
            }
        }
    }
    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .label_font(("sans-serif", small_font(style)))
        .draw()
        .map_err(backend)?;
    Ok(())
}

#[allow(clippy::cast_precision_loss)]
fn draw_colorbar<DB: DrawingBackend>(
    colorbar: &Colorbar,
    style: &SectionStyle,
    area: &DrawingArea<DB, Shift>,
    with_text: bool,
) -> RenderResult<()> {
    let mut builder = ChartBuilder::on(area);
    builder
        .margin_top(60)
        .margin_bottom(60)
        .margin_right(10)
        .y_label_area_size(70);
    let (lo, hi) = (colorbar.min, colorbar.max);
    let mut chart = builder
        .build_cartesian_2d(0.0..1.0, padded((lo, hi)))
        .map_err(backend)?;

    let mut mesh = chart.configure_mesh();
    mesh.disable_mesh().disable_x_axis().x_labels(0);
    if with_text {
        mesh.y_desc(colorbar.label.as_str())
            .axis_desc_style(("sans-serif", small_font(style)))
            .label_style(("sans-serif", small_font(style)));
    } else {
        mesh.y_labels(0);
    }
    mesh.draw().map_err(backend)?;

    let n = colorbar.colors.len();
    if n == 0 {
        return Ok(());
    }
    let range = padded((lo, hi));
    let step = (range.end - range.start) / n as f64;
    chart
        .draw_series(colorbar.colors.iter().enumerate().map(|(i, &c)| {
            let y0 = range.start + step * i as f64;
            Rectangle::new([(0.0, y0), (1.0, y0 + step)], rgb(c).filled())
        }))
        .map_err(backend)?;
    Ok(())
}
