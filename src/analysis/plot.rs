//! Raster line plot rendering.
//!
//! Draws a signal as a line chart on a white canvas with axes, then encodes
//! it as PNG once so the bytes can be written to any number of candidate
//! paths.

use std::io::{self, Cursor};
use std::path::Path;

use image::{ImageFormat, Rgb, RgbImage};

use crate::error::Result;

use super::Signal;

const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);
const AXIS: Rgb<u8> = Rgb([0, 0, 0]);
const GRID: Rgb<u8> = Rgb([220, 220, 220]);
const LINE: Rgb<u8> = Rgb([0, 128, 0]);

/// Canvas geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlotSize {
    pub width: u32,
    pub height: u32,
    /// Blank border around the plot area, in pixels.
    pub margin: u32,
}

impl Default for PlotSize {
    /// 10x6 inches at 100 dpi.
    fn default() -> Self {
        Self {
            width: 1000,
            height: 600,
            margin: 60,
        }
    }
}

/// Draw `signal` as a green line chart.
pub fn render_plot(signal: &Signal, size: PlotSize) -> RgbImage {
    let mut canvas = RgbImage::from_pixel(size.width, size.height, BACKGROUND);

    let left = size.margin.min(size.width.saturating_sub(1));
    let right = size.width.saturating_sub(size.margin.saturating_add(1)).max(left);
    let top = size.margin.min(size.height.saturating_sub(1));
    let bottom = size.height.saturating_sub(size.margin.saturating_add(1)).max(top);

    let (t_min, t_max) = match (signal.time.first(), signal.time.last()) {
        (Some(&first), Some(&last)) => (first, last),
        _ => (0.0, 1.0),
    };
    let (v_min, v_max) = signal.value_range().unwrap_or((-1.0, 1.0));

    let to_x = |t: f64| scale(t, t_min, t_max, left as f64, right as f64);
    let to_y = |v: f64| scale(v, v_min, v_max, bottom as f64, top as f64);

    // Horizontal reference at zero when it falls inside the value range.
    if v_min <= 0.0 && v_max >= 0.0 {
        let y = to_y(0.0);
        draw_line(&mut canvas, (left as i64, y), (right as i64, y), GRID);
    }

    draw_line(
        &mut canvas,
        (left as i64, top as i64),
        (left as i64, bottom as i64),
        AXIS,
    );
    draw_line(
        &mut canvas,
        (left as i64, bottom as i64),
        (right as i64, bottom as i64),
        AXIS,
    );

    let points: Vec<(i64, i64)> = signal
        .time
        .iter()
        .zip(&signal.values)
        .map(|(&t, &v)| (to_x(t), to_y(v)))
        .collect();
    for pair in points.windows(2) {
        draw_line(&mut canvas, pair[0], pair[1], LINE);
    }
    if let [only] = points.as_slice() {
        put(&mut canvas, only.0, only.1, LINE);
    }

    canvas
}

/// Encode an image as PNG bytes.
pub fn encode_png(image: &RgbImage) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    image.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
    Ok(bytes)
}

/// Encoded plot ready to be saved.
#[derive(Debug, Clone)]
pub struct PlotImage {
    bytes: Vec<u8>,
}

impl PlotImage {
    /// Render and encode a signal.
    pub fn from_signal(signal: &Signal, size: PlotSize) -> Result<Self> {
        let bytes = encode_png(&render_plot(signal, size))?;
        Ok(Self { bytes })
    }

    /// Encoded PNG bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Write the encoded bytes to `path`.
    pub fn save(&self, path: &Path) -> io::Result<()> {
        std::fs::write(path, &self.bytes)
    }
}

/// Map `value` from `[lo, hi]` onto `[out_lo, out_hi]`, rounded to a pixel.
fn scale(value: f64, lo: f64, hi: f64, out_lo: f64, out_hi: f64) -> i64 {
    let span = hi - lo;
    let ratio = if span.abs() < f64::EPSILON {
        0.5
    } else {
        (value - lo) / span
    };
    (out_lo + ratio * (out_hi - out_lo)).round() as i64
}

fn put(canvas: &mut RgbImage, x: i64, y: i64, color: Rgb<u8>) {
    if x >= 0 && y >= 0 && (x as u32) < canvas.width() && (y as u32) < canvas.height() {
        canvas.put_pixel(x as u32, y as u32, color);
    }
}

/// Bresenham line between two pixel coordinates, clipped to the canvas.
fn draw_line(canvas: &mut RgbImage, from: (i64, i64), to: (i64, i64), color: Rgb<u8>) {
    let (mut x, mut y) = from;
    let dx = (to.0 - x).abs();
    let dy = -(to.1 - y).abs();
    let sx = if x < to.0 { 1 } else { -1 };
    let sy = if y < to.1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        put(canvas, x, y, color);
        if x == to.0 && y == to.1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::SAMPLE_COUNT;

    #[test]
    fn plot_has_requested_size() {
        let image = render_plot(&Signal::sine(SAMPLE_COUNT), PlotSize::default());
        assert_eq!(image.dimensions(), (1000, 600));
    }

    #[test]
    fn plot_draws_signal_in_green() {
        let image = render_plot(&Signal::sine(SAMPLE_COUNT), PlotSize::default());
        let green = image.pixels().filter(|p| **p == LINE).count();
        assert!(green > 500, "only {green} line pixels");
    }

    #[test]
    fn sine_starts_on_left_axis_at_mid_height() {
        let size = PlotSize::default();
        let image = render_plot(&Signal::sine(SAMPLE_COUNT), size);
        // First sample is (0, 0): left edge, vertically centered.
        let mid = (size.margin + (size.height - 2 * size.margin - 1) / 2) as i64;
        let hit = (mid - 1..=mid + 1).any(|y| *image.get_pixel(size.margin + 1, y as u32) == LINE);
        assert!(hit);
    }

    #[test]
    fn empty_signal_still_renders_axes() {
        let signal = Signal::sine(0);
        let image = render_plot(&signal, PlotSize::default());
        assert_eq!(*image.get_pixel(60, 300), AXIS);
    }

    #[test]
    fn tiny_canvas_does_not_panic() {
        let size = PlotSize {
            width: 4,
            height: 3,
            margin: 60,
        };
        let image = render_plot(&Signal::sine(10), size);
        assert_eq!(image.dimensions(), (4, 3));
    }

    #[test]
    fn huge_margin_does_not_overflow() {
        let size = PlotSize {
            width: 10,
            height: 8,
            margin: u32::MAX,
        };
        let image = render_plot(&Signal::sine(10), size);
        assert_eq!(image.dimensions(), (10, 8));
    }

    #[test]
    fn encodes_png_signature() {
        let plot = PlotImage::from_signal(&Signal::sine(50), PlotSize::default()).unwrap();
        assert!(plot.as_bytes().starts_with(&[0x89, b'P', b'N', b'G']));
    }

    #[test]
    fn scale_handles_flat_range() {
        assert_eq!(scale(3.0, 3.0, 3.0, 0.0, 100.0), 50);
        assert_eq!(scale(1.0, 0.0, 1.0, 0.0, 100.0), 100);
    }
}
