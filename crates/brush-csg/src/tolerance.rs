//! Global geometric tolerances.
//!
//! These are plain compile-time constants. Every kernel routine reads them
//! directly; there is no runtime tolerance configuration.

/// General-purpose epsilon for near-zero tests (denominators, cross products).
pub const EPSILON: f32 = 1e-5;

/// Points within this distance of a plane are classified as lying on it.
pub const PLANE_THICKNESS: f32 = 0.01;

/// Dot-product threshold above which two unit normals are considered parallel.
pub const COPLANAR_NORMAL: f32 = 0.9999;

/// Polygons with an area at or below this value are degenerate.
pub const DEGENERATE_AREA: f32 = 1e-8;

/// Vertices closer than this are treated as the same point.
pub const VERTEX_WELD: f32 = 0.001;
