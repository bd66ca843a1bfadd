//! Fit profile coordinates onto a drawing surface.

use nalgebra::Point2;

/// Fraction of the surface the data may occupy.
pub const FILL_FRACTION: f64 = 0.9;

/// Uniform scale plus offset mapping data units to surface units.
///
/// Surface coordinates grow rightwards and downwards (`y` is flipped).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub scale: f64,
    pub offset_x: f64,
    pub offset_y: f64,
    pub height: f64,
}

impl Viewport {
    /// Centre the bounds `min..max` on a `width × height` surface, keeping aspect ratio.
    pub fn fit(min: Point2<f64>, max: Point2<f64>, width: f64, height: f64) -> Self {
        let data_w = max.x - min.x;
        let data_h = max.y - min.y;

        let sx = (data_w > 0.0).then(|| width * FILL_FRACTION / data_w);
        let sy = (data_h > 0.0).then(|| height * FILL_FRACTION / data_h);
        let scale = match (sx, sy) {
            (Some(a), Some(b)) => a.min(b),
            (Some(a), None) | (None, Some(a)) => a,
            (None, None) => 1.0,
        };

        Self {
            scale,
            offset_x: (width - data_w * scale) / 2.0 - min.x * scale,
            offset_y: (height - data_h * scale) / 2.0 - min.y * scale,
            height,
        }
    }

    pub fn to_surface(&self, p: &Point2<f64>) -> (f64, f64) {
        (
            p.x * self.scale + self.offset_x,
            self.height - (p.y * self.scale + self.offset_y),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fit_centres_and_preserves_aspect() {
        let vp = Viewport::fit(Point2::new(-5.0, 0.0), Point2::new(5.0, 2.0), 200.0, 100.0);
        // Width-limited: 0.9 · 200 / 10 = 18 (height would allow 45).
        assert_eq!(vp.scale, 18.0);
        let (x0, y0) = vp.to_surface(&Point2::new(-5.0, 0.0));
        let (x1, y1) = vp.to_surface(&Point2::new(5.0, 2.0));
        assert!((x0 - 10.0).abs() < 1e-12 && (x1 - 190.0).abs() < 1e-12);
        // Centred vertically, y flipped.
        assert!((y0 - 68.0).abs() < 1e-12 && (y1 - 32.0).abs() < 1e-12);
    }

    #[test]
    fn flat_data_uses_the_other_axis() {
        let vp = Viewport::fit(Point2::new(0.0, 1.0), Point2::new(4.0, 1.0), 40.0, 10.0);
        assert_eq!(vp.scale, 9.0);
        let single = Viewport::fit(Point2::new(1.0, 1.0), Point2::new(1.0, 1.0), 40.0, 10.0);
        assert_eq!(single.scale, 1.0);
    }
}
