//! Integer Bresenham rasterization.
//!
//! The same stepping drives both the overlay drawing and the parameter-space
//! voting; only the per-pixel paint operation differs.

use crate::{RasterBuffer, Sample};

/// Walk the Bresenham segment from `(x0, y0)` to `(x1, y1)`, calling `paint`
/// for every visited point, both endpoints included.
pub fn bresenham<F>(x0: i32, y0: i32, x1: i32, y1: i32, mut paint: F)
where
    F: FnMut(i32, i32),
{
    // i64 keeps differences between arbitrary i32 endpoints exact.
    let (x0, y0, x1, y1) = (x0 as i64, y0 as i64, x1 as i64, y1 as i64);
    let dx = (x1 - x0).abs();
    let dy = (y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx - dy;

    let (mut x, mut y) = (x0, y0);
    loop {
        // x and y stay between the i32 endpoints.
        paint(x as i32, y as i32);
        if x == x1 && y == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 > -dy {
            err -= dy;
            x += sx;
        }
        if e2 < dx {
            err += dx;
            y += sy;
        }
    }
}

/// Draw a segment with a fixed brightness. Points outside the buffer are skipped.
pub fn draw_line(buf: &mut RasterBuffer, x0: i32, y0: i32, x1: i32, y1: i32, brightness: Sample) {
    bresenham(x0, y0, x1, y1, |x, y| buf.set(x, y, brightness));
}

/// Add `weight` to every in-bounds sample along a segment.
pub fn vote_on_line(buf: &mut RasterBuffer, x0: i32, y0: i32, x1: i32, y1: i32, weight: Sample) {
    bresenham(x0, y0, x1, y1, |x, y| {
        let v = buf.get(x, y);
        buf.set(x, y, v + weight);
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn points(x0: i32, y0: i32, x1: i32, y1: i32) -> Vec<(i32, i32)> {
        let mut pts = Vec::new();
        bresenham(x0, y0, x1, y1, |x, y| pts.push((x, y)));
        pts
    }

    #[test]
    fn single_point_segment_paints_once() {
        assert_eq!(points(2, 3, 2, 3), vec![(2, 3)]);
    }

    #[test]
    fn includes_both_endpoints() {
        assert_eq!(points(0, 0, 3, 0), vec![(0, 0), (1, 0), (2, 0), (3, 0)]);
        assert_eq!(points(1, 4, 1, 1), vec![(1, 4), (1, 3), (1, 2), (1, 1)]);
        assert_eq!(points(0, 0, 3, 3), vec![(0, 0), (1, 1), (2, 2), (3, 3)]);
    }

    #[test]
    fn shallow_line_steps_once_per_column() {
        let pts = points(0, 0, 6, 2);
        assert_eq!(pts.len(), 7);
        assert_eq!(pts.first(), Some(&(0, 0)));
        assert_eq!(pts.last(), Some(&(6, 2)));
        for w in pts.windows(2) {
            assert_eq!(w[1].0 - w[0].0, 1);
            assert!((0..=1).contains(&(w[1].1 - w[0].1)));
        }
    }

    #[test]
    fn reversed_segment_covers_same_length() {
        let fwd = points(-3, 5, 9, -2);
        let back = points(9, -2, -3, 5);
        assert_eq!(fwd.len(), back.len());
        assert_eq!(fwd.first(), back.last());
        assert_eq!(fwd.last(), back.first());
    }

    #[test]
    fn extreme_coordinates_do_not_overflow() {
        assert_eq!(
            points(i32::MAX - 2, i32::MIN, i32::MAX, i32::MIN + 1),
            vec![
                (i32::MAX - 2, i32::MIN),
                (i32::MAX - 1, i32::MIN),
                (i32::MAX, i32::MIN + 1)
            ]
        );
        assert_eq!(
            points(i32::MIN, i32::MAX, i32::MIN, i32::MAX - 2),
            vec![(i32::MIN, i32::MAX), (i32::MIN, i32::MAX - 1), (i32::MIN, i32::MAX - 2)]
        );
    }

    #[test]
    fn draw_line_clips_silently() {
        let mut buf = RasterBuffer::new(4, 4, 255).expect("alloc");
        buf.fill(9);
        draw_line(&mut buf, -2, -2, 5, 5, 0);
        for i in 0..4 {
            assert_eq!(buf.at(i, i), 0);
        }
        assert_eq!(buf.sum(), 9 * 12);
    }

    #[test]
    fn vote_on_line_accumulates() {
        let mut buf = RasterBuffer::new(5, 3, 255).expect("alloc");
        vote_on_line(&mut buf, 0, 1, 4, 1, 7);
        vote_on_line(&mut buf, 2, 0, 2, 2, 3);
        assert_eq!(buf.at(2, 1), 10);
        assert_eq!(buf.at(0, 1), 7);
        assert_eq!(buf.at(2, 0), 3);
        assert_eq!(buf.sum(), 5 * 7 + 3 * 3);
    }

    #[test]
    fn vote_outside_does_not_leak_into_edge() {
        let mut buf = RasterBuffer::new(3, 3, 255).expect("alloc");
        vote_on_line(&mut buf, 0, 1, 5, 1, 4);
        assert_eq!(buf.samples(), &[0, 0, 0, 4, 4, 4, 0, 0, 0]);
    }
}
