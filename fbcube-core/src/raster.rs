/// Integer line rasterization
use crate::surface::{Canvas, Color};

/// Plot the segment from `(x0, y0)` to `(x1, y1)`, both endpoints included.
///
/// Error-accumulator (Bresenham) stepping, valid in every octant. Each pixel
/// goes through [`Canvas::set_pixel`], so the parts of a line that fall off
/// the surface are dropped pixel by pixel.
pub fn draw_line<C: Canvas + ?Sized>(
    canvas: &mut C,
    x0: i32,
    y0: i32,
    x1: i32,
    y1: i32,
    color: Color,
) {
    let dx = (x1 as i64 - x0 as i64).abs();
    let dy = -(y1 as i64 - y0 as i64).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;
    let (mut x, mut y) = (x0, y0);

    loop {
        canvas.set_pixel(x, y, color);
        if x == x1 && y == y1 {
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

    /// Records every plotted pixel
    struct Plotter {
        width: u32,
        height: u32,
        pixels: Vec<(i32, i32)>,
    }

    impl Plotter {
        fn new() -> Self {
            Self {
                width: 16,
                height: 16,
                pixels: Vec::new(),
            }
        }
    }

    impl Canvas for Plotter {
        fn width(&self) -> u32 {
            self.width
        }

        fn height(&self) -> u32 {
            self.height
        }

        fn clear(&mut self) {
            self.pixels.clear();
        }

        fn set_pixel(&mut self, x: i32, y: i32, _color: Color) {
            self.pixels.push((x, y));
        }
    }

    fn plot(x0: i32, y0: i32, x1: i32, y1: i32) -> Vec<(i32, i32)> {
        let mut plotter = Plotter::new();
        draw_line(&mut plotter, x0, y0, x1, y1, Color::WHITE);
        plotter.pixels
    }

    #[test]
    fn test_single_pixel() {
        assert_eq!(plot(3, 7, 3, 7), vec![(3, 7)]);
    }

    #[test]
    fn test_horizontal() {
        assert_eq!(plot(0, 0, 4, 0), vec![(0, 0), (1, 0), (2, 0), (3, 0), (4, 0)]);
    }

    #[test]
    fn test_vertical() {
        assert_eq!(plot(0, 0, 0, 4), vec![(0, 0), (0, 1), (0, 2), (0, 3), (0, 4)]);
    }

    #[test]
    fn test_diagonal() {
        assert_eq!(plot(0, 0, 4, 4), vec![(0, 0), (1, 1), (2, 2), (3, 3), (4, 4)]);
    }

    #[test]
    fn test_reverse_direction() {
        assert_eq!(plot(4, 0, 0, 0), vec![(4, 0), (3, 0), (2, 0), (1, 0), (0, 0)]);
        assert_eq!(plot(2, 2, -2, -2).len(), 5);
    }

    #[test]
    fn test_every_octant_is_connected() {
        let ends = [
            (7, 2),
            (2, 7),
            (-2, 7),
            (-7, 2),
            (-7, -2),
            (-2, -7),
            (2, -7),
            (7, -2),
        ];
        for (ex, ey) in ends {
            let pixels = plot(0, 0, ex, ey);
            assert_eq!(pixels.first(), Some(&(0, 0)));
            assert_eq!(pixels.last(), Some(&(ex, ey)));
            // One pixel per step along the major axis
            assert_eq!(pixels.len() as i32, ex.abs().max(ey.abs()) + 1);
            for pair in pixels.windows(2) {
                let (a, b) = (pair[0], pair[1]);
                assert!((a.0 - b.0).abs() <= 1 && (a.1 - b.1).abs() <= 1);
            }
        }
    }

    #[test]
    fn test_clipped_line_keeps_visible_part() {
        use crate::surface::{PixelSurface, SurfaceGeometry};

        let mut buffer = vec![0u8; 4 * 4 * 4];
        let mut surface =
            PixelSurface::new(&mut buffer[..], SurfaceGeometry::packed(4, 4, 32)).unwrap();
        draw_line(&mut surface, -3, 1, 6, 1, Color::WHITE);
        for x in 0..4 {
            assert_eq!(surface.pixel(x, 1), Some(0xFF_FFFF));
            assert_eq!(surface.pixel(x, 0), Some(0));
        }
    }
}
