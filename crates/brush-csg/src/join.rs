//! Joining brushes into the convex hull of their vertices.

use tracing::{info, warn};

use crate::brush::Brush;
use crate::error::CsgError;
use crate::hull::compute_convex_hull_of_brushes;
use crate::params::JoinParams;
use crate::result::JoinResult;
use crate::tolerance::PLANE_THICKNESS;

/// Returns `true` if no vertex of the brush lies in front of any of its
/// face planes.
pub fn is_convex_brush(brush: &Brush) -> bool {
    brush.polygons().iter().all(|face| {
        let plane = face.plane();
        brush.vertices().all(|v| plane.signed_distance(v) <= PLANE_THICKNESS)
    })
}

/// Replaces `brushes` with the convex hull of all their vertices.
///
/// The hull is checked for convexity. A failed check is a warning when
/// `allow_non_convex` is set and an error otherwise.
pub fn join_brushes(brushes: &[Brush], params: &JoinParams) -> JoinResult {
    info!(brushes = brushes.len(), "Starting join");

    if brushes.len() < 2 {
        return JoinResult::failure(
            CsgError::invalid_input(format!(
                "join needs at least 2 brushes, got {}",
                brushes.len()
            ))
            .to_string(),
        );
    }
    if let Some(index) = brushes.iter().position(|b| !b.is_valid()) {
        return JoinResult::failure(
            CsgError::invalid_input(format!("brush {index} is invalid")).to_string(),
        );
    }

    let hull = compute_convex_hull_of_brushes(brushes);
    if !hull.success {
        return JoinResult::failure(hull.error_message);
    }
    let Some(joined) = hull.results.into_iter().next() else {
        return JoinResult::failure(CsgError::internal("convex hull returned no brush").to_string());
    };

    let mut result = JoinResult {
        is_convex: is_convex_brush(&joined),
        ..JoinResult::default()
    };

    if !result.is_convex {
        warn!(faces = joined.len(), "Joined brush failed the convexity check");
        result.error_message = "Joined brush is not convex".to_string();
        result.had_warning = params.warn_non_convex;
        if !params.allow_non_convex {
            return result;
        }
    }

    info!(faces = joined.len(), convex = result.is_convex, "Join complete");
    result.success = true;
    result.results.push(joined);
    result
}
