//! Parameters for brush operations.

/// Parameters for carving a cutter out of several targets.
///
/// # Example
///
/// ```
/// use brush_csg::CarveParams;
///
/// let params = CarveParams::default().keep_empty_results(true);
/// assert!(params.keep_empty_results);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CarveParams {
    /// Emit an empty brush for every target that was carved away entirely,
    /// instead of dropping it from the results.
    pub keep_empty_results: bool,
}

impl CarveParams {
    /// Set whether fully carved targets leave an empty placeholder.
    #[must_use]
    pub const fn keep_empty_results(mut self, keep: bool) -> Self {
        self.keep_empty_results = keep;
        self
    }
}

/// Parameters for hollowing a brush into wall slabs.
///
/// # Example
///
/// ```
/// use brush_csg::HollowParams;
///
/// // Hollow only the first and third faces, 4 units thick.
/// let params = HollowParams::with_thickness(4.0).face_mask(0b101);
/// assert!(!params.hollow_all_faces);
/// assert!(params.is_face_selected(2));
/// assert!(!params.is_face_selected(1));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HollowParams {
    /// Thickness of every wall, measured inward along the face normal.
    pub wall_thickness: f32,
    /// Turn every face into a wall, ignoring `face_mask`.
    pub hollow_all_faces: bool,
    /// Bit `i` selects face `i` when `hollow_all_faces` is off.
    pub face_mask: u64,
}

impl Default for HollowParams {
    fn default() -> Self {
        Self {
            wall_thickness: 8.0,
            hollow_all_faces: true,
            face_mask: 0,
        }
    }
}

impl HollowParams {
    /// Create params for hollowing every face with the given thickness.
    #[must_use]
    pub const fn with_thickness(wall_thickness: f32) -> Self {
        Self {
            wall_thickness,
            hollow_all_faces: true,
            face_mask: 0,
        }
    }

    /// Set the wall thickness.
    #[must_use]
    pub const fn wall_thickness(mut self, thickness: f32) -> Self {
        self.wall_thickness = thickness;
        self
    }

    /// Select faces by bitmask; this turns `hollow_all_faces` off.
    #[must_use]
    pub const fn face_mask(mut self, mask: u64) -> Self {
        self.face_mask = mask;
        self.hollow_all_faces = false;
        self
    }

    /// Set whether every face is hollowed.
    #[must_use]
    pub const fn hollow_all_faces(mut self, all: bool) -> Self {
        self.hollow_all_faces = all;
        self
    }

    /// Returns `true` if face `index` should become a wall.
    pub const fn is_face_selected(&self, index: usize) -> bool {
        if self.hollow_all_faces {
            return true;
        }
        index < u64::BITS as usize && (self.face_mask >> index) & 1 == 1
    }
}

/// Parameters for joining brushes into their convex hull.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JoinParams {
    /// Accept a result that fails the convexity check.
    pub allow_non_convex: bool,
    /// Flag non-convex results with a warning.
    pub warn_non_convex: bool,
}

impl Default for JoinParams {
    fn default() -> Self {
        Self {
            allow_non_convex: false,
            warn_non_convex: true,
        }
    }
}

impl JoinParams {
    /// Set whether non-convex results are accepted.
    #[must_use]
    pub const fn allow_non_convex(mut self, allow: bool) -> Self {
        self.allow_non_convex = allow;
        self
    }

    /// Set whether non-convex results raise a warning.
    #[must_use]
    pub const fn warn_non_convex(mut self, warn: bool) -> Self {
        self.warn_non_convex = warn;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_params() {
        assert!(!CarveParams::default().keep_empty_results);

        let hollow = HollowParams::default();
        assert!((hollow.wall_thickness - 8.0).abs() < f32::EPSILON);
        assert!(hollow.hollow_all_faces);

        let join = JoinParams::default();
        assert!(!join.allow_non_convex);
        assert!(join.warn_non_convex);
    }

    #[test]
    fn test_face_mask_selection() {
        let params = HollowParams::default().face_mask(0b1001);
        assert!(params.is_face_selected(0));
        assert!(!params.is_face_selected(1));
        assert!(params.is_face_selected(3));
        assert!(!params.is_face_selected(64));
        assert!(!params.is_face_selected(200));

        let all = params.hollow_all_faces(true);
        assert!(all.is_face_selected(200));
    }

    #[test]
    fn test_builder_pattern() {
        let params = HollowParams::with_thickness(2.0).wall_thickness(3.0);
        assert!((params.wall_thickness - 3.0).abs() < f32::EPSILON);

        let join = JoinParams::default().allow_non_convex(true).warn_non_convex(false);
        assert!(join.allow_non_convex);
        assert!(!join.warn_non_convex);
    }
}
