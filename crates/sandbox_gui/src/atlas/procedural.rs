//! Procedurally generated sprites
//!
//! Antialiased circle quadrants for rounded corners and line profiles for
//! strokes. Both produce single-channel coverage bitmaps.

/// Coverage bitmap of a quarter disc of radius `radius`
///
/// The disc is centred on the bitmap's top-left corner, so coverage is full
/// near `(0, 0)` and falls off towards the far corner. Each cell holds the
/// exact area of the disc inside it, obtained by integrating the circle
/// equation over the cell. Only cells on or below the diagonal are evaluated;
/// the rest are mirrored.
pub fn quadrant_coverage(radius: u32) -> Vec<u8> {
    let size = radius as usize;
    let r = f64::from(radius);
    let mut pixels = vec![0u8; size * size];

    for j in 0..size {
        for i in j..size {
            let area = cell_area(r, i as f64, j as f64);
            let value = (area * 255.0).round().clamp(0.0, 255.0) as u8;
            pixels[j * size + i] = value;
            pixels[i * size + j] = value;
        }
    }

    pixels
}

/// Area of `{x² + y² <= r²}` inside the cell `[i, i+1] x [j, j+1]`
fn cell_area(r: f64, i: f64, j: f64) -> f64 {
    let r2 = r * r;
    // The circle height is at least j+1 for x <= x_full and at least j for x <= x_edge.
    let x_full = if j + 1.0 <= r { (r2 - (j + 1.0) * (j + 1.0)).sqrt() } else { 0.0 };
    let x_edge = (r2 - j * j).max(0.0).sqrt();

    let full = (i + 1.0).min(x_full) - i;
    let mut area = full.max(0.0);

    let lo = i.max(x_full);
    let hi = (i + 1.0).min(x_edge);
    if hi > lo {
        area += circle_integral(r, hi) - circle_integral(r, lo) - j * (hi - lo);
    }

    area.clamp(0.0, 1.0)
}

/// Antiderivative of `sqrt(r² - x²)`
fn circle_integral(r: f64, x: f64) -> f64 {
    let h = (r * r - x * x).max(0.0).sqrt();
    (x * h + r * r * x.atan2(h)) * 0.5
}

/// Vertical coverage profile of a stroke `width` pixels thick
///
/// The bitmap is one pixel wide and `width + 2` tall: a half-covered row on
/// each side of `width` fully covered rows, which softens the stroke edges
/// when the sprite is stretched along a line.
pub fn line_profile(width: u32) -> Vec<u8> {
    let rows = width as usize + 2;
    let mut pixels = vec![255u8; rows];
    pixels[0] = 128;
    pixels[rows - 1] = 128;
    pixels
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_quadrant_is_symmetric() {
        for radius in [1, 2, 5, 13, 32] {
            let size = radius as usize;
            let pixels = quadrant_coverage(radius);
            for j in 0..size {
                for i in 0..size {
                    assert_eq!(pixels[j * size + i], pixels[i * size + j]);
                }
            }
        }
    }

    #[test]
    fn test_unit_quadrant_covers_quarter_disc() {
        // pi / 4 of the single cell, scaled to 255.
        assert_eq!(quadrant_coverage(1), vec![200]);
    }

    #[test]
    fn test_quadrant_total_matches_disc_area() {
        let radius = 16u32;
        let total: f64 = quadrant_coverage(radius).iter().map(|&v| f64::from(v) / 255.0).sum();
        let expected = std::f64::consts::PI * f64::from(radius * radius) / 4.0;
        assert_relative_eq!(total, expected, epsilon = 1.0);
    }

    #[test]
    fn test_quadrant_inner_cells_are_opaque() {
        let pixels = quadrant_coverage(8);
        assert_eq!(pixels[0], 255);
        assert_eq!(pixels[3 * 8 + 3], 255);
        assert_eq!(pixels[8 * 8 - 1], 0);
    }

    #[test]
    fn test_line_profile_edges() {
        assert_eq!(line_profile(1), vec![128, 255, 128]);
        assert_eq!(line_profile(3), vec![128, 255, 255, 255, 128]);
    }
}
