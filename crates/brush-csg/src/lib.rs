//! Brush-based CSG kernel.
//!
//! A brush is a solid made of planar polygons. The kernel splits brushes by
//! planes, carves cutters out of them, hollows them into wall slabs, joins
//! them through their convex hull and triangulates them for rendering.
//!
//! Every operation is a pure function over owned values. Public entry points
//! report failure in their result envelope instead of returning `Err`.
//!
//! ```
//! use brush_csg::{Brush, Plane, Vertex, split_brush};
//! use nalgebra::Vector3;
//!
//! let cube = Brush::cuboid(Vertex::origin(), Vector3::new(64.0, 64.0, 64.0));
//! let plane = Plane::new(Vector3::z(), 0.0).unwrap();
//! let halves = split_brush(&cube, &plane);
//!
//! assert!(halves.success);
//! assert!(halves.front_capped && halves.back_capped);
//! ```

mod bounds;
mod brush;
mod cap;
mod carve;
mod error;
mod hollow;
mod hull;
mod join;
mod mesh;
mod params;
mod plane;
mod polygon;
mod result;
mod split;
pub mod tolerance;
mod triangulate;
pub mod vertex;

pub use bounds::Aabb;
pub use brush::Brush;
pub use cap::{build_cap, collect_plane_intersection_points, order_points_into_polygon};
pub use carve::{carve_brush, carve_brush_by_cutters, carve_brushes};
pub use error::{CsgError, CsgResult};
pub use hollow::{
    compute_offset_vertex, create_wall_slab, hollow_brush, planes_meeting_at,
    validate_hollow_thickness,
};
pub use hull::{compute_convex_hull, compute_convex_hull_of_brushes};
pub use join::{is_convex_brush, join_brushes};
pub use mesh::TriangleMesh;
pub use params::{CarveParams, HollowParams, JoinParams};
pub use plane::{Classification, Plane, PlaneSide};
pub use polygon::{FaceProperties, Polygon, newell_normal};
pub use result::{
    BrushSplitResult, CarveResult, ConvexHullResult, HollowResult, JoinResult, OperationResult,
};
pub use split::{
    CoplanarRouting, Cuttable, SplitResult, partition_brush, split_brush, split_polygon,
    split_polygon_into,
};
pub use triangulate::{triangulate, triangulate_brush};
pub use vertex::{Uv, Vertex};
