/// Z-buffered scanline rasterizer for terminal rendering
use crossterm::{
    cursor,
    style::{Attribute, Color as TermColor, Print, ResetColor, SetAttribute, SetForegroundColor},
    QueueableCommand,
};
use nalgebra::{Matrix4, Point3};
use std::io::Write;
use termcube_core::config::RenderConfig;
use termcube_core::projection::ndc_to_screen;
use termcube_core::{Camera, Color, Cube, MoveLog, Triangle};

use crate::grid::{Cell, PixelGrid};

/// A projected vertex: integer cell coordinates plus a depth key.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenVertex {
    pub x: i32,
    pub y: i32,
    pub z: f32,
}

impl ScreenVertex {
    pub fn new(x: i32, y: i32, z: f32) -> Self {
        Self { x, y, z }
    }
}

/// Software rasterizer that draws triangles into a [`PixelGrid`]
pub struct Rasterizer {
    grid: PixelGrid,
    depth_buffer: Vec<f32>,
    fill_char: char,
    cull_backfaces: bool,
}

impl Rasterizer {
    pub fn new(width: u16, height: u16, config: &RenderConfig) -> Self {
        let size = width as usize * height as usize;
        Self {
            grid: PixelGrid::new(width, height),
            depth_buffer: vec![f32::INFINITY; size],
            fill_char: config.fill_char,
            cull_backfaces: config.cull_backfaces,
        }
    }

    pub fn grid(&self) -> &PixelGrid {
        &self.grid
    }

    pub fn width(&self) -> u16 {
        self.grid.width()
    }

    pub fn height(&self) -> u16 {
        self.grid.height()
    }

    pub fn set_cull_backfaces(&mut self, cull: bool) {
        self.cull_backfaces = cull;
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        self.grid.resize(width, height);
        self.depth_buffer = vec![f32::INFINITY; width as usize * height as usize];
    }

    /// Reset depth to +inf and characters to blank. Colors are kept.
    pub fn begin_frame(&mut self) {
        self.depth_buffer.fill(f32::INFINITY);
        self.grid.clear_chars();
    }

    /// Draw a depth-tested line, interpolating depth along the driving axis.
    ///
    /// A cell is written only when the new depth is strictly nearer than
    /// what the z-buffer holds.
    pub fn draw_line(&mut self, from: ScreenVertex, to: ScreenVertex, color: Color) {
        let (mut x0, mut y0, mut z0) = (from.x, from.y, from.z);
        let (mut x1, mut y1, mut z1) = (to.x, to.y, to.z);

        let steep = (y1 - y0).abs() > (x1 - x0).abs();
        if steep {
            std::mem::swap(&mut x0, &mut y0);
            std::mem::swap(&mut x1, &mut y1);
        }
        if x0 > x1 {
            std::mem::swap(&mut x0, &mut x1);
            std::mem::swap(&mut y0, &mut y1);
            std::mem::swap(&mut z0, &mut z1);
        }

        let dx = x1 - x0;
        let dy = (y1 - y0).abs();
        let dz = if dx == 0 { 0.0 } else { (z1 - z0) / dx as f32 };
        let ystep = if y0 < y1 { 1 } else { -1 };

        let mut error = dx / 2;
        let mut y = y0;
        let mut z = z0;
        for x in x0..=x1 {
            let (draw_x, draw_y) = if steep { (y, x) } else { (x, y) };
            self.plot(draw_x, draw_y, z, color);

            z += dz;
            error -= dy;
            if error < 0 {
                y += ystep;
                error += dx;
            }
        }
    }

    #[inline(always)]
    fn plot(&mut self, x: i32, y: i32, z: f32, color: Color) {
        let Some(idx) = self.grid.index(x, y) else {
            return;
        };
        if z < self.depth_buffer[idx] {
            self.depth_buffer[idx] = z;
            self.grid.set_at(
                idx,
                Cell {
                    ch: self.fill_char,
                    color,
                    bold: false,
                },
            );
        }
    }

    /// Scanline fill: upper half from the apex to the middle vertex, lower
    /// half from the middle vertex to the base, each row bounded by the long
    /// edge and the current short edge.
    pub fn fill_triangle(&mut self, v0: ScreenVertex, v1: ScreenVertex, v2: ScreenVertex, color: Color) {
        let mut v = [v0, v1, v2];
        if v[0].y > v[1].y {
            v.swap(0, 1);
        }
        if v[0].y > v[2].y {
            v.swap(0, 2);
        }
        if v[1].y > v[2].y {
            v.swap(1, 2);
        }
        let [top, mid, base] = v;

        let last_row = self.height() as i32 - 1;

        for y in top.y.max(0)..=mid.y.min(last_row) {
            let (xa, za) = edge_at(top, base, y);
            let (xb, zb) = edge_at(top, mid, y);
            self.scanline(y, xa, za, xb, zb, color);
        }
        for y in mid.y.max(0)..=base.y.min(last_row) {
            let (xa, za) = edge_at(top, base, y);
            let (xb, zb) = edge_at(mid, base, y);
            self.scanline(y, xa, za, xb, zb, color);
        }
    }

    /// One horizontal span, clipped to the grid before handing it to the
    /// line primitive.
    fn scanline(&mut self, y: i32, mut xa: i32, mut za: f32, mut xb: i32, mut zb: f32, color: Color) {
        if xa > xb {
            std::mem::swap(&mut xa, &mut xb);
            std::mem::swap(&mut za, &mut zb);
        }
        let last_col = self.width() as i32 - 1;
        if xb < 0 || xa > last_col {
            return;
        }

        let span = (xb as i64 - xa as i64) as f32;
        let depth_at = |x: i32| za + (zb - za) * (x as i64 - xa as i64) as f32 / span;
        let (cxa, cxb) = (xa.max(0), xb.min(last_col));
        let (cza, czb) = (
            if cxa != xa { depth_at(cxa) } else { za },
            if cxb != xb { depth_at(cxb) } else { zb },
        );

        self.draw_line(ScreenVertex::new(cxa, y, cza), ScreenVertex::new(cxb, y, czb), color);
    }

    /// Project a world-space triangle and fill it.
    ///
    /// Returns `false` when the triangle was culled or could not be
    /// projected (a vertex at or behind the eye).
    pub fn render_triangle(&mut self, triangle: &Triangle, view: &Matrix4<f32>, projection: &Matrix4<f32>) -> bool {
        let view_points: [Point3<f32>; 3] = triangle.points.map(|p| view.transform_point(&p));

        if self.cull_backfaces {
            let [p0, p1, p2] = view_points;
            let normal = (p1 - p0).cross(&(p2 - p0));
            if normal.dot(&p0.coords) <= 0.0 {
                return false;
            }
        }

        let (width, height) = (self.width(), self.height());
        let mut screen = [ScreenVertex::new(0, 0, 0.0); 3];
        for (out, p) in screen.iter_mut().zip(view_points) {
            let clip = projection * p.to_homogeneous();
            if clip.w <= 1e-6 {
                return false;
            }
            let ndc = clip.xyz() / clip.w;
            let (x, y) = ndc_to_screen(ndc.x, ndc.y, width, height);
            *out = ScreenVertex::new(x, y, ndc.z);
        }

        let [v0, v1, v2] = screen;
        self.fill_triangle(v0, v1, v2, triangle.color);
        true
    }

    /// Render every unit of the cube as seen from `camera`.
    pub fn render_cube(&mut self, cube: &Cube, camera: &Camera) {
        let view = camera.view_matrix();
        let projection = camera.projection_matrix();
        for triangle in cube.world_triangles() {
            self.render_triangle(&triangle, &view, &projection);
        }
    }

    /// FPS counter at the top-left and the move history along the bottom.
    ///
    /// A history wider than the grid shows only its most recent moves.
    pub fn draw_hud(&mut self, fps: u32, moves: &MoveLog) {
        self.grid.put_str(0, 0, &format!("FPS: {fps}"), Color::Text, true);

        let letters: Vec<char> = moves.iter().map(|mv| mv.letter()).collect();
        let shown = letters.len().min(self.width() as usize);
        let tail: String = letters[letters.len() - shown..].iter().collect();
        let bottom = self.height() as i32 - 1;
        self.grid.put_str(0, bottom, &tail, Color::Text, true);
    }

    /// Write the grid to `writer` as styled terminal output.
    pub fn present<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        let mut style: Option<(Color, bool)> = None;
        for y in 0..self.height() {
            writer.queue(cursor::MoveTo(0, y))?;
            for x in 0..self.width() {
                let cell = self.grid.get(x as i32, y as i32).unwrap_or_default();
                if style != Some((cell.color, cell.bold)) {
                    writer.queue(SetForegroundColor(term_color(cell.color)))?;
                    writer.queue(SetAttribute(if cell.bold {
                        Attribute::Bold
                    } else {
                        Attribute::NormalIntensity
                    }))?;
                    style = Some((cell.color, cell.bold));
                }
                writer.queue(Print(cell.ch))?;
            }
        }
        writer.queue(ResetColor)?;
        writer.queue(SetAttribute(Attribute::Reset))?;
        Ok(())
    }
}

/// X and depth where the edge `a -> b` crosses row `y`.
///
/// A flat edge yields its start point.
fn edge_at(a: ScreenVertex, b: ScreenVertex, y: i32) -> (i32, f32) {
    if a.y == b.y {
        return (a.x, a.z);
    }
    // Saturated vertices put both factors near 2^32, past i64.
    let t = y as i128 - a.y as i128;
    let dy = b.y as i128 - a.y as i128;
    let x = a.x as i128 + (b.x as i128 - a.x as i128) * t / dy;
    let z = a.z + (b.z - a.z) * (t as f64 / dy as f64) as f32;
    (x.clamp(i32::MIN as i128, i32::MAX as i128) as i32, z)
}

fn term_color(color: Color) -> TermColor {
    match color {
        Color::Empty => TermColor::Black,
        Color::Red => TermColor::DarkRed,
        Color::Orange => TermColor::Red,
        Color::Blue => TermColor::DarkBlue,
        Color::Green => TermColor::DarkGreen,
        Color::Yellow => TermColor::Yellow,
        Color::White => TermColor::Grey,
        Color::Text => TermColor::White,
    }
}
