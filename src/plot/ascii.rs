//! ASCII plotting for terminal output.
//!
//! This is intentionally "dumb" (fixed-size grid), optimized for:
//! - quick visual sanity checks in a terminal
//! - deterministic output (helpful for golden tests)
//!
//! Each curve is stroked as its own connected polyline; curves are not joined
//! to each other.

use crate::domain::ScrollProfile;
use crate::plot::viewport::Viewport;

/// Render a profile on a `width × height` character grid.
pub fn render_ascii_profile(profile: &ScrollProfile, width: usize, height: usize, ch: char) -> String {
    let width = width.max(10);
    let height = height.max(5);
    let mut grid = vec![vec![' '; width]; height];

    let Some((min, max)) = profile.bounds() else {
        return format!("Plot: {} | (no finite points)\n", profile.side.display_name());
    };
    let viewport = Viewport::fit(min, max, width as f64, height as f64);

    for (_, curve) in profile.curves() {
        let cells: Vec<(usize, usize)> = curve
            .points
            .iter()
            .map(|p| {
                let (sx, sy) = viewport.to_surface(p);
                (to_cell(sx, width), to_cell(sy, height))
            })
            .collect();

        if let [(x, y)] = cells.as_slice() {
            grid[*y][*x] = ch;
        }
        for pair in cells.windows(2) {
            let ((x0, y0), (x1, y1)) = (pair[0], pair[1]);
            draw_line(&mut grid, x0, y0, x1, y1, ch);
        }
    }

    let mut out = String::new();
    out.push_str(&format!(
        "Plot: {} | x=[{:.3}, {:.3}] y=[{:.3}, {:.3}] mm\n",
        profile.side.display_name(),
        min.x,
        max.x,
        min.y,
        max.y
    ));
    for row in grid {
        out.push_str(&row.into_iter().collect::<String>());
        out.push('\n');
    }
    out
}

fn to_cell(v: f64, size: usize) -> usize {
    if !v.is_finite() || v <= 0.0 {
        return 0;
    }
    (v.floor() as usize).min(size - 1)
}

/// Integer line drawing (Bresenham-ish).
fn draw_line(grid: &mut [Vec<char>], x0: usize, y0: usize, x1: usize, y1: usize, ch: char) {
    let mut x0 = x0 as isize;
    let mut y0 = y0 as isize;
    let x1 = x1 as isize;
    let y1 = y1 as isize;

    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        if y0 >= 0 && (y0 as usize) < grid.len() && x0 >= 0 && (x0 as usize) < grid[0].len() {
            grid[y0 as usize][x0 as usize] = ch;
        }

        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}
