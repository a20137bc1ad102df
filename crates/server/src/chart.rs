//! PNG charts embedded as data URIs
//!
//! Charts are rasterized directly onto an RGB canvas: a shaded interval band
//! with the point forecast on top, or one bar per predicted row.

use base64::Engine;
use forecast_facade::ForecastRecord;
use image::{ImageFormat, Rgb, RgbImage};
use predictor_facade::PredictionRecord;
use std::io::Cursor;
use thiserror::Error;

const WIDTH: u32 = 800;
const HEIGHT: u32 = 360;
const MARGIN: u32 = 30;

const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);
const AXIS: Rgb<u8> = Rgb([120, 120, 120]);
const BAND: Rgb<u8> = Rgb([198, 219, 239]);
const LINE: Rgb<u8> = Rgb([33, 102, 172]);
const BAR: Rgb<u8> = Rgb([65, 171, 93]);

/// Chart rendering errors
#[derive(Debug, Error)]
pub enum ChartError {
    #[error("No finite values to plot")]
    Empty,

    #[error("PNG encoding failed: {0}")]
    Encode(#[from] image::ImageError),
}

/// Forecast line over its lower/upper band
pub fn forecast_chart(records: &[ForecastRecord]) -> Result<String, ChartError> {
    let (min, max) = bounds(records.iter().flat_map(|r| [r.lower, r.upper, r.forecast]))
        .ok_or(ChartError::Empty)?;

    let lower: Vec<f64> = records.iter().map(|r| r.lower).collect();
    let upper: Vec<f64> = records.iter().map(|r| r.upper).collect();
    let forecast: Vec<f64> = records.iter().map(|r| r.forecast).collect();

    let mut canvas = Canvas::new(records.len(), min, max);
    canvas.band(&lower, &upper, BAND);
    canvas.polyline(&forecast, LINE);
    canvas.axes();
    Ok(data_uri(&canvas.into_png()?))
}

/// One bar per predicted row
pub fn predictions_chart(records: &[PredictionRecord]) -> Result<String, ChartError> {
    let values: Vec<f64> = records.iter().map(|r| r.predicted_sales).collect();
    let (min, max) = bounds(values.iter().copied().chain([0.0])).ok_or(ChartError::Empty)?;

    let mut canvas = Canvas::new(values.len(), min, max);
    canvas.bars(&values, BAR);
    canvas.axes();
    Ok(data_uri(&canvas.into_png()?))
}

/// `data:` URI for a PNG payload
pub fn data_uri(png: &[u8]) -> String {
    format!(
        "data:image/png;base64,{}",
        base64::engine::general_purpose::STANDARD.encode(png)
    )
}

/// Range of the finite values, padded when flat
fn bounds(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    let (min, max) = values
        .filter(|v| v.is_finite())
        .fold(None, |acc: Option<(f64, f64)>, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })?;
    if max - min < f64::EPSILON {
        Some((min - 1.0, max + 1.0))
    } else {
        let pad = (max - min) * 0.05;
        Some((min - pad, max + pad))
    }
}

struct Canvas {
    img: RgbImage,
    n: usize,
    min: f64,
    max: f64,
}

impl Canvas {
    fn new(n: usize, min: f64, max: f64) -> Self {
        Self {
            img: RgbImage::from_pixel(WIDTH, HEIGHT, BACKGROUND),
            n,
            min,
            max,
        }
    }

    fn plot_width(&self) -> f64 {
        f64::from(WIDTH - 2 * MARGIN)
    }

    /// Pixel column of point `i`
    fn x(&self, i: usize) -> f64 {
        let left = f64::from(MARGIN);
        if self.n <= 1 {
            left + self.plot_width() / 2.0
        } else {
            left + i as f64 * self.plot_width() / (self.n - 1) as f64
        }
    }

    /// Pixel row of value `v`
    fn y(&self, v: f64) -> f64 {
        let top = f64::from(MARGIN);
        let height = f64::from(HEIGHT - 2 * MARGIN);
        top + (self.max - v) / (self.max - self.min) * height
    }

    fn put(&mut self, x: f64, y: f64, color: Rgb<u8>) {
        if x.is_finite() && y.is_finite() && x >= 0.0 && y >= 0.0 {
            let (x, y) = (x.round() as u32, y.round() as u32);
            if x < WIDTH && y < HEIGHT {
                self.img.put_pixel(x, y, color);
            }
        }
    }

    fn vspan(&mut self, x: f64, y0: f64, y1: f64, color: Rgb<u8>) {
        if !(y0.is_finite() && y1.is_finite()) {
            return;
        }
        let (top, bottom) = (y0.min(y1).round() as i64, y0.max(y1).round() as i64);
        for y in top..=bottom {
            self.put(x, y as f64, color);
        }
    }

    fn segment(&mut self, (x0, y0): (f64, f64), (x1, y1): (f64, f64), color: Rgb<u8>) {
        let steps = (x1 - x0).abs().max((y1 - y0).abs()).ceil().max(1.0) as usize;
        for s in 0..=steps {
            let f = s as f64 / steps as f64;
            let (x, y) = (x0 + (x1 - x0) * f, y0 + (y1 - y0) * f);
            self.put(x, y, color);
            self.put(x, y + 1.0, color);
        }
    }

    fn polyline(&mut self, values: &[f64], color: Rgb<u8>) {
        let points: Vec<(f64, f64)> = values
            .iter()
            .enumerate()
            .map(|(i, &v)| (self.x(i), self.y(v)))
            .collect();
        if let [only] = points.as_slice() {
            self.segment((only.0 - 3.0, only.1), (only.0 + 3.0, only.1), color);
        }
        for pair in points.windows(2) {
            self.segment(pair[0], pair[1], color);
        }
    }

    /// Shade between two series, interpolating per pixel column
    fn band(&mut self, lower: &[f64], upper: &[f64], color: Rgb<u8>) {
        for i in 0..lower.len().min(upper.len()) {
            if i + 1 == lower.len() || i + 1 == upper.len() {
                let x = self.x(i);
                self.vspan(x, self.y(lower[i]), self.y(upper[i]), color);
                break;
            }
            let (x0, x1) = (self.x(i), self.x(i + 1));
            let columns = (x1 - x0).ceil().max(1.0) as usize;
            for c in 0..columns {
                let f = c as f64 / columns as f64;
                let lo = lower[i] + (lower[i + 1] - lower[i]) * f;
                let hi = upper[i] + (upper[i + 1] - upper[i]) * f;
                self.vspan(x0 + c as f64, self.y(lo), self.y(hi), color);
            }
        }
    }

    fn bars(&mut self, values: &[f64], color: Rgb<u8>) {
        let slot = self.plot_width() / values.len().max(1) as f64;
        let width = (slot * 0.8).max(1.0);
        let baseline = self.y(0.0);
        for (i, &v) in values.iter().enumerate() {
            let left = f64::from(MARGIN) + i as f64 * slot + (slot - width) / 2.0;
            let top = self.y(v);
            let mut x = left;
            while x < left + width {
                self.vspan(x, top, baseline, color);
                x += 1.0;
            }
        }
    }

    fn axes(&mut self) {
        let (left, right) = (f64::from(MARGIN), f64::from(WIDTH - MARGIN));
        let (top, bottom) = (f64::from(MARGIN), f64::from(HEIGHT - MARGIN));
        self.vspan(left, top, bottom, AXIS);
        let mut x = left;
        while x <= right {
            self.put(x, bottom, AXIS);
            x += 1.0;
        }
    }

    fn into_png(self) -> Result<Vec<u8>, ChartError> {
        let mut buf = Cursor::new(Vec::new());
        self.img.write_to(&mut buf, ImageFormat::Png)?;
        Ok(buf.into_inner())
    }
}
