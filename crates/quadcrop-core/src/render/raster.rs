//! Software rasterizer over an `image::RgbaImage`.
//!
//! Pixels are sampled at their centres with no anti-aliasing. Good enough for
//! previews and for asserting what the paint pass produced.

use super::{FillRule, Rgba, Surface};
use glam::DVec2;
use image::{Rgba as Pixel, RgbaImage};

/// A raster [`Surface`] whose pixel (0, 0) covers widget space [0, 1)².
#[derive(Debug, Clone)]
pub struct RasterSurface {
    image: RgbaImage,
}

impl RasterSurface {
    /// Transparent surface of the given size.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: RgbaImage::new(width, height),
        }
    }

    /// Surface pre-filled with `background`.
    pub fn filled(width: u32, height: u32, background: Rgba) -> Self {
        let px = Pixel([background.r, background.g, background.b, background.a]);
        Self {
            image: RgbaImage::from_pixel(width, height, px),
        }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn pixel(&self, x: u32, y: u32) -> Rgba {
        let Pixel([r, g, b, a]) = *self.image.get_pixel(x, y);
        Rgba::new(r, g, b, a)
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    fn blend(&mut self, x: u32, y: u32, color: Rgba) {
        if color.a == 0 {
            return;
        }
        let dst = self.image.get_pixel_mut(x, y);
        let sa = color.a as f32 / 255.0;
        let da = dst.0[3] as f32 / 255.0;
        let out_a = sa + da * (1.0 - sa);
        let mix = |s: u8, d: u8| -> u8 {
            if out_a <= 0.0 {
                return 0;
            }
            let v = (s as f32 * sa + d as f32 * da * (1.0 - sa)) / out_a;
            v.round().clamp(0.0, 255.0) as u8
        };
        let [dr, dg, db, _] = dst.0;
        dst.0 = [
            mix(color.r, dr),
            mix(color.g, dg),
            mix(color.b, db),
            (out_a * 255.0).round().clamp(0.0, 255.0) as u8,
        ];
    }

    /// Pixel rows whose centres fall inside [y0, y1).
    fn row_range(&self, y0: f64, y1: f64) -> std::ops::Range<u32> {
        let start = (y0 - 0.5).ceil().max(0.0);
        let end = (y1 - 0.5).ceil().min(self.height() as f64);
        if end <= start {
            return 0..0;
        }
        start as u32..end as u32
    }

    fn col_range(&self, x0: f64, x1: f64) -> std::ops::Range<u32> {
        let start = (x0 - 0.5).ceil().max(0.0);
        let end = (x1 - 0.5).ceil().min(self.width() as f64);
        if end <= start {
            return 0..0;
        }
        start as u32..end as u32
    }
}

impl Surface for RasterSurface {
    fn fill_path(&mut self, contours: &[Vec<DVec2>], rule: FillRule, color: Rgba) {
        let edges: Vec<(DVec2, DVec2)> = contours
            .iter()
            .filter(|c| c.len() >= 2)
            .flat_map(|c| (0..c.len()).map(move |i| (c[i], c[(i + 1) % c.len()])))
            .filter(|(a, b)| a.y != b.y)
            .collect();
        if edges.is_empty() {
            return;
        }

        let (y_min, y_max) = edges.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |acc, (a, b)| {
            (acc.0.min(a.y).min(b.y), acc.1.max(a.y).max(b.y))
        });

        let mut crossings: Vec<(f64, i32)> = Vec::new();
        for y in self.row_range(y_min, y_max) {
            let sample_y = y as f64 + 0.5;
            crossings.clear();
            for (a, b) in &edges {
                // Half-open in y so shared vertices are counted once
                let (lo, hi, winding) = if a.y < b.y { (a, b, 1) } else { (b, a, -1) };
                if sample_y >= lo.y && sample_y < hi.y {
                    let t = (sample_y - lo.y) / (hi.y - lo.y);
                    crossings.push((lo.x + t * (hi.x - lo.x), winding));
                }
            }
            crossings.sort_by(|l, r| l.0.total_cmp(&r.0));

            let mut winding = 0;
            for pair in crossings.windows(2) {
                winding += pair[0].1;
                let inside = match rule {
                    FillRule::EvenOdd => winding % 2 != 0,
                    FillRule::NonZero => winding != 0,
                };
                if inside {
                    for x in self.col_range(pair[0].0, pair[1].0) {
                        self.blend(x, y, color);
                    }
                }
            }
        }
    }

    fn stroke_polyline(&mut self, points: &[DVec2], color: Rgba, width: f64) {
        if points.is_empty() || self.width() == 0 || self.height() == 0 {
            return;
        }
        // At least one pixel wide so hairlines stay visible
        let half = (width * 0.5).max(0.5);
        let w = self.width() as usize;
        let mut covered = vec![false; w * self.height() as usize];

        let segments: Vec<(DVec2, DVec2)> = if points.len() == 1 {
            vec![(points[0], points[0])]
        } else {
            points.windows(2).map(|s| (s[0], s[1])).collect()
        };

        for (a, b) in segments {
            let min = a.min(b) - DVec2::splat(half);
            let max = a.max(b) + DVec2::splat(half);
            for y in self.row_range(min.y, max.y) {
                for x in self.col_range(min.x, max.x) {
                    let p = DVec2::new(x as f64 + 0.5, y as f64 + 0.5);
                    if distance_to_segment(p, a, b) <= half {
                        covered[y as usize * w + x as usize] = true;
                    }
                }
            }
        }

        for (i, hit) in covered.iter().enumerate() {
            if *hit {
                self.blend((i % w) as u32, (i / w) as u32, color);
            }
        }
    }

    fn fill_rect(&mut self, min: DVec2, max: DVec2, color: Rgba) {
        for y in self.row_range(min.y, max.y) {
            for x in self.col_range(min.x, max.x) {
                self.blend(x, y, color);
            }
        }
    }
}

fn distance_to_segment(p: DVec2, a: DVec2, b: DVec2) -> f64 {
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq == 0.0 {
        return p.distance(a);
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    p.distance(a + ab * t)
}
