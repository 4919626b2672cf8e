use crate::{Extent, Point, Raster};

/// Integer pixel cell a point occupies once scaled to the target
/// raster.
pub type Cell = (i64, i64);

/// Per-axis scale factors mapping the data extent into the target
/// raster. Each factor is in (0, 1]: the mapping only ever shrinks the
/// data, it never spreads it out.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ratio {
    pub x: f64,
    pub y: f64,
}

impl Ratio {
    pub fn derive(raster: Raster, extent: &Extent) -> Self {
        Ratio {
            x: scale(raster.width.get(), extent.width()),
            y: scale(raster.height.get(), extent.height()),
        }
    }

    /// Scale each coordinate, then truncate toward zero. Two points are
    /// pixel-equivalent iff their cells match.
    pub fn cell(&self, point: &Point) -> Cell {
        ((point.x * self.x) as i64, (point.y * self.y) as i64)
    }
}

/// target / orig, clamped to 1. A zero original dimension means every
/// value coincides at zero on that axis; there is nothing to scale, so
/// the factor is 1 and the division is never evaluated.
fn scale(target: u32, orig: i64) -> f64 {
    if orig == 0 {
        return 1.0;
    }
    (target as f64 / orig as f64).min(1.0)
}
