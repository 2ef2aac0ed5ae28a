//! PNG rendering of regions and navigation meshes.
//!
//! The region is filled white on black with a non-zero winding scanline fill,
//! so holes stay black. Cell outlines are drawn in red on top.

use std::path::Path;

use image::{ImageBuffer, Rgb, RgbImage};

use crate::geometry::{Bounds, Point, Region, Segment};
use crate::navmesh::{NavMesh, NavMeshCell};

pub const BACKGROUND: [u8; 3] = [0, 0, 0];
pub const FLOOR: [u8; 3] = [255, 255, 255];
pub const CELL_OUTLINE: [u8; 3] = [255, 0, 0];
pub const SEEKER: [u8; 3] = [220, 40, 40];
pub const HIDER: [u8; 3] = [40, 90, 220];

/// Default canvas side in pixels.
pub const DEFAULT_SIZE: u32 = 800;

/// Pixels left blank around the drawing.
const MARGIN: f64 = 4.0;

/// Maps region coordinates onto a square canvas, keeping the aspect ratio.
#[derive(Clone, Copy, Debug)]
pub struct Viewport {
    origin: Point,
    scale: f64,
}

impl Viewport {
    pub fn new(bounds: Option<Bounds>, size: u32) -> Self {
        let usable = (size as f64 - 2.0 * MARGIN).max(1.0);
        match bounds {
            Some(b) => {
                let extent = b.width().max(b.height());
                let scale = if extent > 0.0 { usable / extent } else { 1.0 };
                Self {
                    origin: Point::new(b.min_x, b.min_y),
                    scale,
                }
            }
            None => Self {
                origin: Point::new(0.0, 0.0),
                scale: 1.0,
            },
        }
    }

    pub fn for_region(region: &Region, size: u32) -> Self {
        Self::new(region.bounds(), size)
    }

    /// Canvas position (continuous pixel coordinates) of a region point.
    pub fn to_pixel(&self, p: Point) -> (f64, f64) {
        (
            MARGIN + (p.x - self.origin.x) * self.scale,
            MARGIN + (p.y - self.origin.y) * self.scale,
        )
    }

    fn project_segment(&self, s: &Segment) -> ((f64, f64), (f64, f64)) {
        (self.to_pixel(s.start), self.to_pixel(s.end))
    }
}

/// Fill `region` into `img` using the non-zero winding rule, sampling each
/// pixel at its centre.
fn fill_region(img: &mut RgbImage, region: &Region, view: &Viewport, color: [u8; 3]) {
    let edges: Vec<_> = region.edges().map(|e| view.project_segment(&e)).collect();
    let (width, height) = img.dimensions();
    let mut crossings: Vec<(f64, i32)> = Vec::new();

    for py in 0..height {
        let y = py as f64 + 0.5;
        crossings.clear();
        for &((x0, y0), (x1, y1)) in &edges {
            // Half-open rule so a vertex on the scanline counts once.
            let dir = if y0 <= y && y1 > y {
                1
            } else if y1 <= y && y0 > y {
                -1
            } else {
                continue;
            };
            let t = (y - y0) / (y1 - y0);
            crossings.push((x0 + t * (x1 - x0), dir));
        }
        crossings.sort_by(|a, b| a.0.total_cmp(&b.0));

        let mut winding = 0;
        for pair in crossings.windows(2) {
            winding += pair[0].1;
            if winding == 0 {
                continue;
            }
            let start = (pair[0].0 - 0.5).ceil().max(0.0) as u32;
            let end = (pair[1].0 - 0.5).ceil().min(width as f64).max(0.0) as u32;
            for px in start..end {
                img.put_pixel(px, py, Rgb(color));
            }
        }
    }
}

/// Bresenham line between two canvas positions, clipped to the image.
fn draw_line(img: &mut RgbImage, from: (f64, f64), to: (f64, f64), color: [u8; 3]) {
    let (width, height) = img.dimensions();
    let (mut x0, mut y0) = (from.0.floor() as i64, from.1.floor() as i64);
    let (x1, y1) = (to.0.floor() as i64, to.1.floor() as i64);
    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        if x0 >= 0 && y0 >= 0 && (x0 as u32) < width && (y0 as u32) < height {
            img.put_pixel(x0 as u32, y0 as u32, Rgb(color));
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

/// Render a region (white) on black, optionally outlining cells in red.
pub fn render_region(region: &Region, cells: Option<&[NavMeshCell]>, size: u32) -> RgbImage {
    let view = Viewport::for_region(region, size);
    let mut img: RgbImage = ImageBuffer::from_pixel(size, size, Rgb(BACKGROUND));

    fill_region(&mut img, region, &view, FLOOR);

    if let Some(cells) = cells {
        for cell in cells {
            for edge in cell.polygon().edges() {
                let (a, b) = view.project_segment(&edge);
                draw_line(&mut img, a, b, CELL_OUTLINE);
            }
        }
    }

    img
}

/// Draw a filled disc marker (e.g. an agent position).
pub fn draw_marker(img: &mut RgbImage, view: &Viewport, p: Point, radius: u32, color: [u8; 3]) {
    let (cx, cy) = view.to_pixel(p);
    let r = radius as i64;
    let (width, height) = img.dimensions();
    for dy in -r..=r {
        for dx in -r..=r {
            if dx * dx + dy * dy > r * r {
                continue;
            }
            let x = cx.floor() as i64 + dx;
            let y = cy.floor() as i64 + dy;
            if x >= 0 && y >= 0 && (x as u32) < width && (y as u32) < height {
                img.put_pixel(x as u32, y as u32, Rgb(color));
            }
        }
    }
}

/// Export a mesh's region (and optionally its cells) as a PNG.
pub fn export_map_png(mesh: &NavMesh, path: &Path, draw_cells: bool) -> Result<(), image::ImageError> {
    let cells = draw_cells.then(|| mesh.cells());
    render_region(mesh.region(), cells, DEFAULT_SIZE).save(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Ring;

    fn framed_square() -> Region {
        Region::from_rings(vec![
            Ring::new(vec![
                Point::new(0.0, 0.0),
                Point::new(10.0, 0.0),
                Point::new(10.0, 10.0),
                Point::new(0.0, 10.0),
            ]),
            Ring::new(vec![
                Point::new(3.0, 3.0),
                Point::new(3.0, 7.0),
                Point::new(7.0, 7.0),
                Point::new(7.0, 3.0),
            ]),
        ])
    }

    #[test]
    fn test_fill_leaves_hole_black() {
        let region = framed_square();
        let img = render_region(&region, None, 108);
        let view = Viewport::for_region(&region, 108);

        let px = |p: Point| {
            let (x, y) = view.to_pixel(p);
            *img.get_pixel(x as u32, y as u32)
        };
        assert_eq!(px(Point::new(1.5, 1.5)), Rgb(FLOOR));
        assert_eq!(px(Point::new(5.0, 5.0)), Rgb(BACKGROUND));
        assert_eq!(*img.get_pixel(0, 0), Rgb(BACKGROUND));
    }

    #[test]
    fn test_cell_outlines_are_red() {
        let mesh = NavMesh::new(Region::rectangle(0.0, 0.0, 10.0, 10.0));
        let img = render_region(mesh.region(), Some(mesh.cells()), 64);
        assert!(img.pixels().any(|p| *p == Rgb(CELL_OUTLINE)));
        assert!(img.pixels().any(|p| *p == Rgb(FLOOR)));
    }

    #[test]
    fn test_empty_region_renders_black() {
        let img = render_region(&Region::empty(), None, 16);
        assert!(img.pixels().all(|p| *p == Rgb(BACKGROUND)));
    }

    #[test]
    fn test_marker_is_clipped() {
        let region = Region::rectangle(0.0, 0.0, 10.0, 10.0);
        let view = Viewport::for_region(&region, 32);
        let mut img = render_region(&region, None, 32);
        draw_marker(&mut img, &view, Point::new(0.0, 0.0), 6, HIDER);
        draw_marker(&mut img, &view, Point::new(5.0, 5.0), 2, SEEKER);
        assert_eq!(*img.get_pixel(0, 0), Rgb(HIDER));
        let (cx, cy) = view.to_pixel(Point::new(5.0, 5.0));
        assert_eq!(*img.get_pixel(cx as u32, cy as u32), Rgb(SEEKER));
    }
}
