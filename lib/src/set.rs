use std::collections::HashSet;

use crate::{Cell, Error, Point, Ratio};

/// The points retained so far, in first-encounter order, plus the
/// ratio used to judge pixel equivalence.
///
/// Storage is reserved once, up front, and never grows. Invariant: no
/// two retained points map to the same cell under the stored ratio.
#[derive(Debug)]
pub struct PointSet {
    points: Vec<Point>,
    cells: HashSet<Cell>,
    ratio: Ratio,
    capacity: usize,
}

impl PointSet {
    /// Reserve storage for up to `capacity` points. Reports a failed
    /// reservation as [`Error::Alloc`] instead of aborting.
    pub fn with_capacity(ratio: Ratio, capacity: usize) -> Result<Self, Error> {
        let mut points = Vec::new();
        points
            .try_reserve_exact(capacity)
            .map_err(|_| Error::Alloc(capacity))?;

        let mut cells = HashSet::new();
        cells.try_reserve(capacity).map_err(|_| Error::Alloc(capacity))?;

        Ok(PointSet {
            points,
            cells,
            ratio,
            capacity,
        })
    }

    /// Retain `point` unless an earlier point already occupies its
    /// cell. Returns whether the point was retained.
    pub fn insert(&mut self, point: Point) -> Result<bool, Error> {
        let cell = self.ratio.cell(&point);
        if self.cells.contains(&cell) {
            return Ok(false);
        }
        if self.points.len() == self.capacity {
            return Err(Error::CapacityExceeded(self.capacity));
        }

        self.cells.insert(cell);
        self.points.push(point);
        Ok(true)
    }

    /// Whether some retained point occupies `point`'s cell.
    pub fn contains(&self, point: &Point) -> bool {
        self.cells.contains(&self.ratio.cell(point))
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn into_points(self) -> Vec<Point> {
        self.points
    }

    pub fn ratio(&self) -> Ratio {
        self.ratio
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const UNSCALED: Ratio = Ratio { x: 1.0, y: 1.0 };

    #[test]
    fn first_point_in_a_cell_wins() {
        let mut set = PointSet::with_capacity(UNSCALED, 4).unwrap();
        assert!(set.insert(Point { x: 0.5, y: 0.5 }).unwrap());
        assert!(!set.insert(Point { x: 0.9, y: 0.9 }).unwrap());
        assert_eq!(set.points(), &[Point { x: 0.5, y: 0.5 }]);
    }

    #[test]
    fn distinct_cells_are_all_retained_in_order() {
        let mut set = PointSet::with_capacity(UNSCALED, 4).unwrap();
        set.insert(Point { x: 2.0, y: 2.0 }).unwrap();
        set.insert(Point { x: 0.0, y: 0.0 }).unwrap();
        set.insert(Point { x: 1.0, y: 1.0 }).unwrap();
        assert_eq!(
            set.points(),
            &[
                Point { x: 2.0, y: 2.0 },
                Point { x: 0.0, y: 0.0 },
                Point { x: 1.0, y: 1.0 },
            ]
        );
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn opposite_signs_collide_around_zero() {
        // Truncation is toward zero, so (-0.4, 0) and (0.4, 0) share
        // the cell (0, 0).
        let mut set = PointSet::with_capacity(UNSCALED, 2).unwrap();
        assert!(set.insert(Point { x: -0.4, y: 0.0 }).unwrap());
        assert!(!set.insert(Point { x: 0.4, y: 0.0 }).unwrap());
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn contains_matches_by_cell_not_by_value() {
        let mut set = PointSet::with_capacity(UNSCALED, 2).unwrap();
        set.insert(Point { x: 0.5, y: 0.5 }).unwrap();
        assert!(set.contains(&Point { x: 0.5, y: 0.5 }));
        assert!(set.contains(&Point { x: 0.1, y: 0.9 }));
        assert!(!set.contains(&Point { x: 1.5, y: 0.5 }));
    }

    #[test]
    fn overfilling_is_a_hard_error() {
        let mut set = PointSet::with_capacity(UNSCALED, 1).unwrap();
        assert!(set.insert(Point { x: 0.5, y: 0.5 }).unwrap());

        let err = set.insert(Point { x: 1.5, y: 1.5 }).unwrap_err();
        assert!(matches!(err, Error::CapacityExceeded(1)));

        // Duplicates are still recognized after the set is full.
        assert!(!set.insert(Point { x: 0.6, y: 0.6 }).unwrap());
    }

    #[test]
    fn empty_set() {
        let set = PointSet::with_capacity(UNSCALED, 0).unwrap();
        assert!(set.is_empty());
        assert_eq!(set.len(), 0);
        assert!(set.points().is_empty());
    }
}
