//! Primitive rasterization for the PNG output path.
//!
//! Implements line, dashed line, filled circle, and filled triangle drawing
//! against a [`Raster`]. Marker shapes match the vector output: circles and
//! upward triangles of equal area.

use crate::color::Rgba;
use crate::raster::Raster;

/// Draw a line using Bresenham's algorithm.
pub fn draw_line(raster: &mut Raster, x0: i32, y0: i32, x1: i32, y1: i32, color: Rgba) {
    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    let mut x = x0;
    let mut y = y0;

    loop {
        if x >= 0 && y >= 0 {
            raster.set_pixel(x as u32, y as u32, color);
        }

        if x == x1 && y == y1 {
            break;
        }

        let e2 = 2 * err;
        if e2 >= dy {
            if x == x1 {
                break;
            }
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            if y == y1 {
                break;
            }
            err += dx;
            y += sy;
        }
    }
}

/// Draw a dashed line by stepping along the segment in pixel-length
/// increments and toggling between pen-down and pen-up runs.
pub fn draw_dashed_line(
    raster: &mut Raster,
    x0: f64,
    y0: f64,
    x1: f64,
    y1: f64,
    on: f32,
    off: f32,
    color: Rgba,
) {
    let length = ((x1 - x0).powi(2) + (y1 - y0).powi(2)).sqrt();
    if length < 1.0 {
        draw_line(raster, x0 as i32, y0 as i32, x1 as i32, y1 as i32, color);
        return;
    }

    let (on, off) = (f64::from(on.max(0.5)), f64::from(off.max(0.5)));
    let period = on + off;
    let mut start = 0.0;
    while start < length {
        let end = (start + on).min(length);
        let (sx, sy) = point_at(x0, y0, x1, y1, start / length);
        let (ex, ey) = point_at(x0, y0, x1, y1, end / length);
        draw_line(raster, sx as i32, sy as i32, ex as i32, ey as i32, color);
        start += period;
    }
}

fn point_at(x0: f64, y0: f64, x1: f64, y1: f64, t: f64) -> (f64, f64) {
    (x0 + (x1 - x0) * t, y0 + (y1 - y0) * t)
}

/// Draw a filled circle using the midpoint algorithm.
pub fn draw_circle(raster: &mut Raster, cx: i32, cy: i32, radius: i32, color: Rgba) {
    if radius <= 0 {
        if radius == 0 && cx >= 0 && cy >= 0 {
            raster.set_pixel(cx as u32, cy as u32, color);
        }
        return;
    }

    let mut x = radius;
    let mut y = 0;
    let mut err = 1 - radius;

    while x >= y {
        draw_horizontal_run(raster, cx - x, cx + x, cy + y, color);
        draw_horizontal_run(raster, cx - x, cx + x, cy - y, color);
        draw_horizontal_run(raster, cx - y, cx + y, cy + x, color);
        draw_horizontal_run(raster, cx - y, cx + y, cy - x, color);

        y += 1;
        if err < 0 {
            err += 2 * y + 1;
        } else {
            x -= 1;
            err += 2 * (y - x) + 1;
        }
    }
}

/// Draw a filled upward triangle centered at `(cx, cy)`.
///
/// The triangle is the equilateral one inscribed in the circle of the given
/// radius, so triangles and circles of equal radius cover comparable area.
pub fn draw_triangle(raster: &mut Raster, cx: f64, cy: f64, radius: f64, color: Rgba) {
    if radius <= 0.0 {
        raster.set_pixel(cx as u32, cy as u32, color);
        return;
    }

    // Apex at the top, flat base at cy + radius/2, half-width growing
    // linearly from apex to base.
    let apex_y = cy - radius;
    let base_y = cy + radius / 2.0;
    let base_half_width = radius * 3f64.sqrt() / 2.0;
    let height = base_y - apex_y;

    let y_start = apex_y.ceil() as i32;
    let y_end = base_y.floor() as i32;
    for y in y_start..=y_end {
        let t = (f64::from(y) - apex_y) / height;
        let half = base_half_width * t;
        draw_horizontal_run(
            raster,
            (cx - half).round() as i32,
            (cx + half).round() as i32,
            y,
            color,
        );
    }
}

/// Draw a horizontal run of pixels, clipped to the buffer.
#[inline]
fn draw_horizontal_run(raster: &mut Raster, x1: i32, x2: i32, y: i32, color: Rgba) {
    if y < 0 || y >= raster.height() as i32 {
        return;
    }

    let x_start = x1.max(0) as u32;
    let x_end = (x2 + 1).max(0).min(raster.width() as i32) as u32;
    if x_start < x_end {
        raster.fill_rect(x_start, y as u32, x_end - x_start, 1, color);
    }
}
