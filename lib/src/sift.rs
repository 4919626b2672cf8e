use std::num::NonZeroU32;

use crate::{Error, Extent, Point, PointSet, Ratio};

/// Target raster dimensions, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Raster {
    pub width: NonZeroU32,
    pub height: NonZeroU32,
}

impl Raster {
    /// None if either dimension is zero.
    pub fn new(width: u32, height: u32) -> Option<Self> {
        Some(Raster {
            width: NonZeroU32::new(width)?,
            height: NonZeroU32::new(height)?,
        })
    }
}

/// Reduce `points` to the subset that stays pixel-distinct once the
/// whole data set is scaled to fit `raster`.
///
/// Two passes over the data: the first finds the bounding extent, the
/// second keeps the first point seen in each occupied pixel cell.
/// Retained points keep their input order and their exact values;
/// nothing is interpolated or synthesized.
pub fn sift(points: &[Point], raster: Raster) -> Result<PointSet, Error> {
    let extent = Extent::of(points);
    let ratio = Ratio::derive(raster, &extent);

    let mut set = PointSet::with_capacity(ratio, capacity(points.len(), ratio))?;
    for point in points {
        set.insert(*point)?;
    }

    Ok(set)
}

/// Worst-case number of occupied cells, sized from the densest axis.
/// The scale ratios never exceed 1, so this never exceeds the input
/// count.
fn capacity(count: usize, ratio: Ratio) -> usize {
    (count as f64 * ratio.x.max(ratio.y)).ceil() as usize
}
