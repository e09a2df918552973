//! Polygon and brush splitting by a plane.

use tracing::{debug, info, warn};

use crate::brush::Brush;
use crate::cap::build_cap;
use crate::plane::{Classification, Plane, PlaneSide};
use crate::polygon::Polygon;
use crate::result::BrushSplitResult;
use crate::vertex::{Uv, Vertex, lerp_uv};

/// Fragments of a polygon split by a plane.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SplitResult {
    /// Fragments in front of the plane.
    pub front: Vec<Polygon>,
    /// Fragments behind the plane.
    pub back: Vec<Polygon>,
    /// Polygons on the plane facing the same way as its normal.
    pub coplanar_front: Vec<Polygon>,
    /// Polygons on the plane facing against its normal.
    pub coplanar_back: Vec<Polygon>,
}

impl SplitResult {
    /// Total number of polygons across all four buckets.
    pub fn len(&self) -> usize {
        self.front.len() + self.back.len() + self.coplanar_front.len() + self.coplanar_back.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Where coplanar polygons go when a whole brush is split.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoplanarRouting {
    /// A polygon facing along the plane normal bounds a solid lying behind
    /// the plane, so it joins the back side; one facing against the normal
    /// joins the front side.
    BySolidSide,
    /// Every coplanar polygon joins the back side. Used when carving, where
    /// a face on the cutter boundary counts as inside the removed volume.
    AllBack,
}

/// Trait for geometry that can be cut by a plane.
pub trait Cuttable {
    /// What a cut produces.
    type Output;

    /// Cuts the geometry by a plane.
    fn cut(&self, plane: &Plane) -> Self::Output;
}

impl Cuttable for Polygon {
    type Output = SplitResult;

    fn cut(&self, plane: &Plane) -> SplitResult {
        split_polygon(self, plane)
    }
}

impl Cuttable for Brush {
    type Output = BrushSplitResult;

    fn cut(&self, plane: &Plane) -> BrushSplitResult {
        split_brush(self, plane)
    }
}

/// Splits a polygon by a plane into front, back and coplanar buckets.
pub fn split_polygon(polygon: &Polygon, plane: &Plane) -> SplitResult {
    let mut result = SplitResult::default();
    split_polygon_into(polygon, plane, &mut result);
    result
}

/// Like [`split_polygon`], appending to an existing result.
pub fn split_polygon_into(polygon: &Polygon, plane: &Plane, result: &mut SplitResult) {
    match polygon.classify(plane) {
        Classification::Front => result.front.push(polygon.clone()),
        Classification::Back => result.back.push(polygon.clone()),
        Classification::On => {
            if polygon.faces_same_direction(plane) {
                result.coplanar_front.push(polygon.clone());
            } else {
                result.coplanar_back.push(polygon.clone());
            }
        }
        Classification::Spanning => {
            let (front, back) = split_spanning(polygon, plane);
            result.front.extend(front);
            result.back.extend(back);
        }
    }
}

/// Splits a spanning polygon into front and back parts.
///
/// Walks the polygon edges Sutherland-Hodgman style and builds two vertex
/// lists, adding intersection points when edges cross the plane. Vertices
/// on the plane go to both lists.
fn split_spanning(polygon: &Polygon, plane: &Plane) -> (Option<Polygon>, Option<Polygon>) {
    let vertices = polygon.vertices();
    let uvs = polygon.uvs();
    let n = vertices.len();

    let mut front_verts = Vec::with_capacity(n + 1);
    let mut back_verts = Vec::with_capacity(n + 1);
    let mut front_uvs: Vec<Uv> = Vec::with_capacity(n + 1);
    let mut back_uvs: Vec<Uv> = Vec::with_capacity(n + 1);

    let sides: Vec<PlaneSide> = vertices.iter().map(|v| plane.classify_point(v)).collect();

    for i in 0..n {
        let next_idx = (i + 1) % n;
        let current = vertices[i];
        let next = vertices[next_idx];
        let current_side = sides[i];
        let next_side = sides[next_idx];

        match current_side {
            PlaneSide::Front => {
                front_verts.push(current);
                push_uv(uvs, i, &mut front_uvs);
            }
            PlaneSide::Back => {
                back_verts.push(current);
                push_uv(uvs, i, &mut back_uvs);
            }
            PlaneSide::On => {
                front_verts.push(current);
                back_verts.push(current);
                push_uv(uvs, i, &mut front_uvs);
                push_uv(uvs, i, &mut back_uvs);
            }
        }

        let crosses = matches!(
            (current_side, next_side),
            (PlaneSide::Front, PlaneSide::Back) | (PlaneSide::Back, PlaneSide::Front)
        );
        if !crosses {
            continue;
        }

        // A near-parallel edge yields no intersection; it is treated as lying on the plane.
        if let Some((t, intersection)) = plane.intersect_segment(&current, &next) {
            front_verts.push(intersection);
            back_verts.push(intersection);
            if let Some(uvs) = uvs {
                let uv = lerp_uv(&uvs[i], &uvs[next_idx], t);
                front_uvs.push(uv);
                back_uvs.push(uv);
            }
        }
    }

    let has_uvs = uvs.is_some();
    (
        build_fragment(polygon, front_verts, front_uvs, has_uvs),
        build_fragment(polygon, back_verts, back_uvs, has_uvs),
    )
}

fn push_uv(uvs: Option<&[Uv]>, index: usize, out: &mut Vec<Uv>) {
    if let Some(uvs) = uvs {
        out.push(uvs[index]);
    }
}

fn build_fragment(
    source: &Polygon,
    vertices: Vec<Vertex>,
    uvs: Vec<Uv>,
    has_uvs: bool,
) -> Option<Polygon> {
    if vertices.len() < 3 {
        return None;
    }
    source.with_vertices(vertices, has_uvs.then_some(uvs))
}

/// Splits every polygon of a brush and collects the front and back sides.
///
/// No cap faces are added; see [`split_brush`] for the capped variant.
pub fn partition_brush(
    brush: &Brush,
    plane: &Plane,
    routing: CoplanarRouting,
) -> (Vec<Polygon>, Vec<Polygon>) {
    let mut parts = SplitResult::default();
    for polygon in brush.polygons() {
        split_polygon_into(polygon, plane, &mut parts);
    }

    let SplitResult {
        mut front,
        mut back,
        coplanar_front,
        coplanar_back,
    } = parts;

    match routing {
        CoplanarRouting::BySolidSide => {
            back.extend(coplanar_front);
            front.extend(coplanar_back);
        }
        CoplanarRouting::AllBack => {
            back.extend(coplanar_front);
            back.extend(coplanar_back);
        }
    }

    (front, back)
}

/// Splits a brush by a plane into a front and a back brush.
///
/// When both sides are non-empty, each side receives a cap polygon on the
/// cutting plane: the front cap faces backwards (towards the back brush) and
/// the back cap faces forwards. If a cap cannot be built the side is
/// returned open, which is still a successful split.
pub fn split_brush(brush: &Brush, plane: &Plane) -> BrushSplitResult {
    info!(
        polygons = brush.len(),
        normal = ?plane.normal(),
        distance = plane.distance(),
        "Splitting brush by plane"
    );

    if brush.is_empty() {
        return BrushSplitResult::failure("cannot split an empty brush");
    }

    let (front, back) = partition_brush(brush, plane, CoplanarRouting::BySolidSide);
    let mut front = Brush::from_polygons(front);
    let mut back = Brush::from_polygons(back);

    if front.is_empty() || back.is_empty() {
        debug!(
            front = front.len(),
            back = back.len(),
            "Plane does not cross the brush"
        );
        return BrushSplitResult::success(front, back, false, false);
    }

    let front_cap = build_cap(brush, plane, &plane.flipped());
    let back_cap = build_cap(brush, plane, plane);

    let front_capped = front_cap.is_some();
    let back_capped = back_cap.is_some();
    if let Some(cap) = front_cap {
        front.push(cap);
    }
    if let Some(cap) = back_cap {
        back.push(cap);
    }
    if !front_capped || !back_capped {
        warn!("Could not build a cap for the cut surface; leaving it open");
    }

    debug!(front = front.len(), back = back.len(), "Brush split complete");
    BrushSplitResult::success(front, back, front_capped, back_capped)
}
