//! Rendering figures to SVG text and raster image files.

use std::path::Path;

use geosection_core::SectionStyle;
use image::{ImageBuffer, Rgb};
use plotters::prelude::*;

use crate::draw::draw_figure;
use crate::error::{RenderError, RenderResult};
use crate::figure::Figure;

/// Output encodings for figures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Svg,
    Png,
    Jpeg,
}

impl OutputFormat {
    /// Picks the format from a file extension.
    ///
    /// # Errors
    /// Returns [`RenderError::UnsupportedFormat`] for anything but
    /// `svg`, `png`, `jpg` and `jpeg`.
    pub fn from_path(path: &Path) -> RenderResult<Self> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase)
            .unwrap_or_default();
        match extension.as_str() {
            "svg" => Ok(Self::Svg),
            "png" => Ok(Self::Png),
            "jpg" | "jpeg" => Ok(Self::Jpeg),
            _ => Err(RenderError::UnsupportedFormat(extension)),
        }
    }
}

/// Renders a figure to an SVG document.
pub fn to_svg_string(figure: &Figure, style: &SectionStyle) -> RenderResult<String> {
    let size = figure.pixel_size(style);
    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, size).into_drawing_area();
        draw_figure(figure, style, &root, true)?;
    }
    Ok(svg)
}

/// Renders a figure to packed 8-bit RGB pixels.
///
/// Bitmaps carry no text: the plotting stack is built without a font
/// rasterizer.
pub fn to_rgb_image(
    figure: &Figure,
    style: &SectionStyle,
) -> RenderResult<ImageBuffer<Rgb<u8>, Vec<u8>>> {
    let (width, height) = figure.pixel_size(style);
    let mut buffer = vec![0u8; width as usize * height as usize * 3];
    {
        let root = BitMapBackend::with_buffer(&mut buffer, (width, height)).into_drawing_area();
        draw_figure(figure, style, &root, false)?;
    }
    ImageBuffer::from_raw(width, height, buffer).ok_or(RenderError::InvalidImageData)
}

/// Renders a figure to a PNG buffer in memory.
pub fn to_png_bytes(figure: &Figure, style: &SectionStyle) -> RenderResult<Vec<u8>> {
    let img = to_rgb_image(figure, style)?;
    let mut buffer = std::io::Cursor::new(Vec::new());
    img.write_to(&mut buffer, image::ImageFormat::Png)?;
    Ok(buffer.into_inner())
}

/// Saves a figure, choosing the encoding from the file extension.
///
/// # Errors
/// Returns an error if the extension is unsupported, drawing fails or the
/// file cannot be written.
pub fn save_figure(figure: &Figure, style: &SectionStyle, path: impl AsRef<Path>) -> RenderResult<()> {
    let path = path.as_ref();
    let format = OutputFormat::from_path(path)?;
    match format {
        OutputFormat::Svg => std::fs::write(path, to_svg_string(figure, style)?)?,
        OutputFormat::Png | OutputFormat::Jpeg => {
            log::warn!("{}: raster output omits labels and legend", path.display());
            let encoding = if format == OutputFormat::Png {
                image::ImageFormat::Png
            } else {
                image::ImageFormat::Jpeg
            };
            to_rgb_image(figure, style)?.save_with_format(path, encoding)?;
        }
    }
    log::info!("saved figure to {}", path.display());
    Ok(())
}
