//! Axis-aligned bounding boxes.

use nalgebra::Vector3;

use crate::tolerance::EPSILON;
use crate::vertex::Vertex;

/// An axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vertex,
    pub max: Vertex,
}

impl Aabb {
    /// Creates a box from its corners.
    pub fn new(min: Vertex, max: Vertex) -> Self {
        Self { min, max }
    }

    /// Smallest box containing every point, or `None` for an empty set.
    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a Vertex>) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = *iter.next()?;
        let mut bounds = Self::new(first, first);
        for p in iter {
            bounds.expand(p);
        }
        Some(bounds)
    }

    /// Grows the box to contain `point`.
    pub fn expand(&mut self, point: &Vertex) {
        self.min = self.min.inf(point);
        self.max = self.max.sup(point);
    }

    /// Returns the union of two boxes.
    pub fn merged(&self, other: &Aabb) -> Aabb {
        Aabb::new(self.min.inf(&other.min), self.max.sup(&other.max))
    }

    /// Extent along each axis.
    pub fn size(&self) -> Vector3<f32> {
        self.max - self.min
    }

    pub fn center(&self) -> Vertex {
        nalgebra::center(&self.min, &self.max)
    }

    /// Length of the shortest side.
    pub fn min_dimension(&self) -> f32 {
        self.size().min()
    }

    /// Returns `true` if the boxes overlap with positive volume.
    ///
    /// Boxes that merely touch (within [`EPSILON`]) do not intersect.
    pub fn intersects(&self, other: &Aabb) -> bool {
        (0..3).all(|axis| {
            self.min[axis] < other.max[axis] - EPSILON && other.min[axis] < self.max[axis] - EPSILON
        })
    }

    /// Returns `true` if `point` lies inside or on the box.
    pub fn contains(&self, point: &Vertex) -> bool {
        (0..3).all(|axis| {
            point[axis] >= self.min[axis] - EPSILON && point[axis] <= self.max[axis] + EPSILON
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_box(min: [f32; 3], max: [f32; 3]) -> Aabb {
        Aabb::new(Vertex::new(min[0], min[1], min[2]), Vertex::new(max[0], max[1], max[2]))
    }

    #[test]
    fn from_points_and_size() {
        let points = [
            Vertex::new(1.0, -2.0, 3.0),
            Vertex::new(-1.0, 4.0, 0.0),
            Vertex::new(0.0, 0.0, 5.0),
        ];
        let bounds = Aabb::from_points(&points).unwrap();
        assert_eq!(bounds.min, Vertex::new(-1.0, -2.0, 0.0));
        assert_eq!(bounds.max, Vertex::new(1.0, 4.0, 5.0));
        assert_eq!(bounds.size(), Vector3::new(2.0, 6.0, 5.0));
        assert_eq!(bounds.min_dimension(), 2.0);
        assert_eq!(bounds.center(), Vertex::new(0.0, 1.0, 2.5));
        assert!(Aabb::from_points(&[] as &[Vertex]).is_none());
    }

    #[test]
    fn overlap_tests() {
        let a = make_box([0.0, 0.0, 0.0], [2.0, 2.0, 2.0]);
        let b = make_box([1.0, 1.0, 1.0], [3.0, 3.0, 3.0]);
        let touching = make_box([2.0, 0.0, 0.0], [4.0, 2.0, 2.0]);
        let far = make_box([10.0, 0.0, 0.0], [12.0, 2.0, 2.0]);

        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
        assert!(!a.intersects(&touching));
        assert!(!a.intersects(&far));
    }

    #[test]
    fn merge_and_contains() {
        let a = make_box([0.0, 0.0, 0.0], [1.0, 1.0, 1.0]);
        let b = make_box([2.0, 2.0, 2.0], [3.0, 3.0, 3.0]);
        let merged = a.merged(&b);
        assert!(merged.contains(&Vertex::new(1.5, 1.5, 1.5)));
        assert!(!a.contains(&Vertex::new(1.5, 1.5, 1.5)));
    }
}
