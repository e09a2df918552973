//! Boolean subtraction of a cutter brush from target brushes.
//!
//! The cutter is treated as the intersection of the half-spaces behind its
//! face planes. The target is sliced by each plane in turn: whatever lies in
//! front of a plane is outside the cutter and survives, whatever lies behind
//! carries on to the next plane. The pieces still inside after the last plane
//! are the removed volume and are discarded.

use tracing::{debug, info, warn};

use crate::brush::Brush;
use crate::cap::build_cap;
use crate::error::CsgError;
use crate::params::CarveParams;
use crate::plane::Plane;
use crate::result::CarveResult;
use crate::split::{CoplanarRouting, partition_brush};

/// Subtracts `cutter` from `target`, returning the surviving fragments.
///
/// A target whose bounds miss the cutter comes back unchanged as the only
/// fragment. An empty result means the target was carved away entirely.
pub fn carve_brush(target: &Brush, cutter: &Brush) -> Vec<Brush> {
    if !target.intersects(cutter) {
        debug!("Cutter bounds miss target; nothing to carve");
        return vec![target.clone()];
    }

    let planes = cutter_planes(cutter);
    let mut outside = Vec::new();
    let mut inside = vec![target.clone()];

    for (index, plane) in planes.iter().enumerate() {
        let mut still_inside = Vec::with_capacity(inside.len());
        for fragment in &inside {
            let (front, back) = carve_split(fragment, plane);
            outside.extend(front);
            still_inside.extend(back);
        }
        inside = still_inside;

        debug!(
            plane = index,
            outside = outside.len(),
            inside = inside.len(),
            "Carved against cutter plane"
        );
        if inside.is_empty() {
            break;
        }
    }

    outside
}

/// Subtracts several cutters from one target in sequence.
pub fn carve_brush_by_cutters(target: &Brush, cutters: &[Brush]) -> Vec<Brush> {
    let mut fragments = vec![target.clone()];
    for cutter in cutters {
        fragments = fragments
            .iter()
            .flat_map(|fragment| carve_brush(fragment, cutter))
            .collect();
        if fragments.is_empty() {
            break;
        }
    }
    fragments
}

/// Carves `cutter` out of every target.
///
/// Targets the cutter does not touch are passed through. A target counts as
/// affected unless it came back as a single fragment with its original face
/// count. When every target is carved away and `keep_empty_results` is off,
/// the result is reported as unsuccessful so the caller can react.
pub fn carve_brushes(targets: &[Brush], cutter: &Brush, params: &CarveParams) -> CarveResult {
    info!(
        targets = targets.len(),
        cutter_faces = cutter.len(),
        keep_empty = params.keep_empty_results,
        "Starting carve"
    );

    if targets.is_empty() {
        return CarveResult::failure(
            CsgError::invalid_input("no target brushes to carve").to_string(),
        );
    }
    if !cutter.is_valid() {
        return CarveResult::failure(CsgError::invalid_input("cutter brush is invalid").to_string());
    }

    let mut result = CarveResult {
        success: true,
        ..CarveResult::default()
    };
    let mut consumed = 0usize;

    for (index, target) in targets.iter().enumerate() {
        if !target.is_valid() {
            warn!(target = index, "Skipping invalid target brush");
            result.results.push(target.clone());
            continue;
        }

        let fragments = carve_brush(target, cutter);
        let unchanged = fragments.len() == 1 && fragments[0].len() == target.len();
        if !unchanged {
            result.affected_count += 1;
        }

        if fragments.is_empty() {
            consumed += 1;
            if params.keep_empty_results {
                result.results.push(Brush::default());
            }
            continue;
        }
        result.results.extend(fragments);
    }

    if result.results.is_empty() && consumed > 0 {
        info!(consumed, "Every target was carved away");
        result.success = false;
        result.error_message = "Target was entirely carved away".to_string();
        return result;
    }

    info!(
        fragments = result.results.len(),
        affected = result.affected_count,
        "Carve complete"
    );
    result
}

/// Distinct face planes of the cutter, in face order.
fn cutter_planes(cutter: &Brush) -> Vec<Plane> {
    let mut planes: Vec<Plane> = Vec::with_capacity(cutter.len());
    for polygon in cutter.polygons() {
        let plane = polygon.plane();
        if !planes.iter().any(|p| p.is_coplanar_with(plane)) {
            planes.push(*plane);
        }
    }
    planes
}

/// Splits a fragment for carving: coplanar faces count as inside, and only
/// the outside (front) part is capped.
fn carve_split(fragment: &Brush, plane: &Plane) -> (Option<Brush>, Option<Brush>) {
    let (front, back) = partition_brush(fragment, plane, CoplanarRouting::AllBack);
    let mut front = Brush::from_polygons(front);
    let back = Brush::from_polygons(back);

    if !front.is_empty() && !back.is_empty() {
        match build_cap(fragment, plane, &plane.flipped()) {
            Some(cap) => front.push(cap),
            None => debug!("No cap for carved fragment"),
        }
    }

    (
        (!front.is_empty()).then_some(front),
        (!back.is_empty()).then_some(back),
    )
}
