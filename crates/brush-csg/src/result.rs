//! Result envelopes returned by the public operations.
//!
//! Every operation reports success or failure in-band: `success`, a
//! human-readable `error_message` (empty on success, or a warning), and the
//! produced brushes. Nothing is raised or panicked across this boundary.

use crate::brush::Brush;
use crate::error::CsgError;

/// The uniform result shape shared by all operations.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OperationResult {
    pub success: bool,
    pub error_message: String,
    pub results: Vec<Brush>,
}

impl OperationResult {
    pub fn success(results: Vec<Brush>) -> Self {
        Self {
            success: true,
            error_message: String::new(),
            results,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            error_message: message.into(),
            results: Vec::new(),
        }
    }
}

impl From<CsgError> for OperationResult {
    fn from(err: CsgError) -> Self {
        Self::failure(err.to_string())
    }
}

/// Result of splitting one brush by a plane.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BrushSplitResult {
    pub success: bool,
    pub error_message: String,
    /// Part in front of the plane (empty if the plane misses the brush).
    pub front: Brush,
    /// Part behind the plane (empty if the plane misses the brush).
    pub back: Brush,
    /// Whether a cap face was added to `front`.
    pub front_capped: bool,
    /// Whether a cap face was added to `back`.
    pub back_capped: bool,
}

impl BrushSplitResult {
    pub fn success(front: Brush, back: Brush, front_capped: bool, back_capped: bool) -> Self {
        Self {
            success: true,
            error_message: String::new(),
            front,
            back,
            front_capped,
            back_capped,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            error_message: message.into(),
            ..Self::default()
        }
    }
}

impl From<BrushSplitResult> for OperationResult {
    fn from(result: BrushSplitResult) -> Self {
        let results = [result.front, result.back]
            .into_iter()
            .filter(|brush| !brush.is_empty())
            .collect();
        Self {
            success: result.success,
            error_message: result.error_message,
            results,
        }
    }
}

/// Result of carving a cutter out of one or more targets.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CarveResult {
    pub success: bool,
    pub error_message: String,
    /// Surviving fragments of every target.
    pub results: Vec<Brush>,
    /// Number of targets the cutter actually changed.
    pub affected_count: usize,
}

impl CarveResult {
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            error_message: message.into(),
            ..Self::default()
        }
    }
}

impl From<CarveResult> for OperationResult {
    fn from(result: CarveResult) -> Self {
        Self {
            success: result.success,
            error_message: result.error_message,
            results: result.results,
        }
    }
}

/// Result of hollowing a brush.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HollowResult {
    pub success: bool,
    pub error_message: String,
    /// One wall slab per hollowed face.
    pub results: Vec<Brush>,
    /// Selected faces that produced no slab (degenerate after offsetting).
    pub skipped_faces: usize,
}

impl HollowResult {
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            error_message: message.into(),
            ..Self::default()
        }
    }
}

impl From<HollowResult> for OperationResult {
    fn from(result: HollowResult) -> Self {
        Self {
            success: result.success,
            error_message: result.error_message,
            results: result.results,
        }
    }
}

/// Result of joining brushes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JoinResult {
    pub success: bool,
    /// Error on failure, or the non-convex warning.
    pub error_message: String,
    /// The joined brush (at most one).
    pub results: Vec<Brush>,
    /// Whether the joined brush passed the convexity check.
    pub is_convex: bool,
    /// Whether a warning was raised.
    pub had_warning: bool,
}

impl JoinResult {
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            error_message: message.into(),
            ..Self::default()
        }
    }
}

impl From<JoinResult> for OperationResult {
    fn from(result: JoinResult) -> Self {
        Self {
            success: result.success,
            error_message: result.error_message,
            results: result.results,
        }
    }
}

/// Result of a convex hull computation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConvexHullResult {
    pub success: bool,
    pub error_message: String,
    /// The triangulated hull (at most one).
    pub results: Vec<Brush>,
}

impl ConvexHullResult {
    pub fn success(hull: Brush) -> Self {
        Self {
            success: true,
            error_message: String::new(),
            results: vec![hull],
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            error_message: message.into(),
            results: Vec::new(),
        }
    }

    /// The hull brush, if the computation succeeded.
    pub fn hull(&self) -> Option<&Brush> {
        self.results.first()
    }
}

impl From<ConvexHullResult> for OperationResult {
    fn from(result: ConvexHullResult) -> Self {
        Self {
            success: result.success,
            error_message: result.error_message,
            results: result.results,
        }
    }
}
