/// Fixed height of the signature drawing surface, in pixels.
pub const SURFACE_HEIGHT: u32 = 200;

/// Stroke width used for every signature stroke, in pixels.
pub const STROKE_WIDTH: f32 = 2.0;

/// Stroke colour (`#333`, opaque).
pub const STROKE_COLOR: [u8; 4] = [0x33, 0x33, 0x33, 0xff];

const BYTES_PER_PIXEL: usize = 4;

/// Maximum distance between two stamped discs along a segment.
const STAMP_STEP: f32 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Converts a client-space point into the space of a surface whose top-left corner is `origin`.
    pub fn relative_to(self, origin: Point) -> Self {
        Self {
            x: self.x - origin.x,
            y: self.y - origin.y,
        }
    }

    fn distance(self, other: Point) -> f32 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }

    fn lerp(self, other: Point, t: f32) -> Point {
        Point {
            x: self.x + (other.x - self.x) * t,
            y: self.y + (other.y - self.y) * t,
        }
    }
}

/// # Documentation
/// RGBA bitmap the signature is painted onto.
///
/// A freshly created surface is fully transparent. Strokes are rasterised by stamping
/// discs of the stroke width along each segment, which gives round caps and joins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Surface {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl Surface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; width as usize * height as usize * BYTES_PER_PIXEL],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw RGBA bytes, row-major.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let offset = self.offset(x, y);
        let mut rgba = [0u8; 4];
        rgba.copy_from_slice(&self.pixels[offset..offset + BYTES_PER_PIXEL]);
        Some(rgba)
    }

    pub fn clear(&mut self) {
        self.pixels.iter_mut().for_each(|b| *b = 0);
    }

    /// True when no pixel has been painted.
    pub fn is_blank(&self) -> bool {
        self.pixels
            .chunks_exact(BYTES_PER_PIXEL)
            .all(|px| px[3] == 0)
    }

    pub fn painted_pixel_count(&self) -> usize {
        self.pixels
            .chunks_exact(BYTES_PER_PIXEL)
            .filter(|px| px[3] != 0)
            .count()
    }

    /// Paints a single round dot centred on `at`.
    pub fn stamp(&mut self, at: Point, width: f32, color: [u8; 4]) {
        let radius = (width / 2.0).max(0.5);
        let min_x = (at.x - radius).floor().max(0.0) as i64;
        let min_y = (at.y - radius).floor().max(0.0) as i64;
        let max_x = ((at.x + radius).ceil() as i64).min(self.width as i64 - 1);
        let max_y = ((at.y + radius).ceil() as i64).min(self.height as i64 - 1);
        let radius_sq = radius * radius;

        for py in min_y..=max_y {
            for px in min_x..=max_x {
                let dx = px as f32 + 0.5 - at.x;
                let dy = py as f32 + 0.5 - at.y;
                if dx * dx + dy * dy <= radius_sq {
                    let offset = self.offset(px as u32, py as u32);
                    self.pixels[offset..offset + BYTES_PER_PIXEL].copy_from_slice(&color);
                }
            }
        }
    }

    /// Paints the straight segment `from -> to`.
    pub fn stroke_segment(&mut self, from: Point, to: Point, width: f32, color: [u8; 4]) {
        let steps = (from.distance(to) / STAMP_STEP).ceil().max(1.0) as u32;
        for i in 0..=steps {
            let t = i as f32 / steps as f32;
            self.stamp(from.lerp(to, t), width, color);
        }
    }

    fn offset(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * BYTES_PER_PIXEL
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_surface_is_blank() {
        let surface = Surface::new(300, SURFACE_HEIGHT);
        assert!(surface.is_blank());
        assert_eq!(surface.pixels().len(), 300 * 200 * 4);
    }

    #[test]
    fn test_stroke_segment_paints_along_the_line() {
        let mut surface = Surface::new(100, 100);
        surface.stroke_segment(Point::new(10.0, 50.0), Point::new(90.0, 50.0), STROKE_WIDTH, STROKE_COLOR);

        assert_eq!(surface.pixel(50, 50), Some(STROKE_COLOR));
        assert_eq!(surface.pixel(10, 50), Some(STROKE_COLOR));
        assert_eq!(surface.pixel(50, 10), Some([0, 0, 0, 0]));
        assert!(!surface.is_blank());
    }

    #[test]
    fn test_stamp_outside_bounds_is_clipped() {
        let mut surface = Surface::new(10, 10);
        surface.stamp(Point::new(-20.0, -20.0), STROKE_WIDTH, STROKE_COLOR);
        surface.stamp(Point::new(500.0, 3.0), STROKE_WIDTH, STROKE_COLOR);
        assert!(surface.is_blank());

        surface.stamp(Point::new(0.0, 0.0), STROKE_WIDTH, STROKE_COLOR);
        assert_eq!(surface.pixel(0, 0), Some(STROKE_COLOR));
    }

    #[test]
    fn test_clear_resets_all_pixels() {
        let mut surface = Surface::new(50, 50);
        surface.stroke_segment(Point::new(0.0, 0.0), Point::new(49.0, 49.0), STROKE_WIDTH, STROKE_COLOR);
        assert!(surface.painted_pixel_count() > 49);

        surface.clear();
        assert!(surface.is_blank());
    }

    #[test]
    fn test_relative_to_subtracts_origin() {
        let p = Point::new(120.0, 80.0).relative_to(Point::new(100.0, 50.0));
        assert_eq!(p, Point::new(20.0, 30.0));
    }
}
