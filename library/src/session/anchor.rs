use crate::geometry::alias::{Extent, Point, Rotation, TextureCoordinate};
use crate::utils::object_uid::AnchorUid;
use strum_macros::Display;

#[derive(Display, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaneAlignment {
    Horizontal,
    Vertical,
}

/// Surface estimate the host keeps refining; local to the anchor, the plane lies in `y = 0`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PlaneAnchorGeometry {
    vertices: Vec<Point>,
    texture_coordinates: Vec<TextureCoordinate>,
    triangle_indices: Vec<u16>,
    boundary_vertices: Vec<Point>,
}

impl PlaneAnchorGeometry {
    #[must_use]
    pub fn new(vertices: Vec<Point>, texture_coordinates: Vec<TextureCoordinate>, triangle_indices: Vec<u16>, boundary_vertices: Vec<Point>) -> Self {
        assert_eq!(vertices.len(), texture_coordinates.len(), "each vertex needs a texture coordinate");
        assert_eq!(triangle_indices.len() % 3, 0, "indices must describe whole triangles");
        assert!(triangle_indices.iter().all(|index| (*index as usize) < vertices.len()), "index out of vertex range");
        Self { vertices, texture_coordinates, triangle_indices, boundary_vertices }
    }

    /// Axis-aligned rectangle of `extent` (x by z) around `center`.
    #[must_use]
    pub fn rectangle(center: Point, extent: Extent) -> Self {
        let half_x = extent.x / 2.0;
        let half_z = extent.y / 2.0;
        let vertices = vec![
            Point::new(center.x - half_x, center.y, center.z - half_z),
            Point::new(center.x + half_x, center.y, center.z - half_z),
            Point::new(center.x + half_x, center.y, center.z + half_z),
            Point::new(center.x - half_x, center.y, center.z + half_z),
        ];
        let texture_coordinates = vec![
            TextureCoordinate::new(0.0, 0.0),
            TextureCoordinate::new(1.0, 0.0),
            TextureCoordinate::new(1.0, 1.0),
            TextureCoordinate::new(0.0, 1.0),
        ];
        let triangle_indices = vec![0, 2, 1, 0, 3, 2];
        let boundary_vertices = vertices.clone();
        Self::new(vertices, texture_coordinates, triangle_indices, boundary_vertices)
    }

    #[must_use]
    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    #[must_use]
    pub fn texture_coordinates(&self) -> &[TextureCoordinate] {
        &self.texture_coordinates
    }

    #[must_use]
    pub fn triangle_indices(&self) -> &[u16] {
        &self.triangle_indices
    }

    #[must_use]
    pub fn boundary_vertices(&self) -> &[Point] {
        &self.boundary_vertices
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlaneAnchor {
    uid: AnchorUid,
    position: Point,
    rotation: Rotation,
    alignment: PlaneAlignment,
    center: Point,
    extent: Extent,
    geometry: PlaneAnchorGeometry,
}

impl PlaneAnchor {
    #[must_use]
    pub fn new(uid: AnchorUid, position: Point, rotation: Rotation, alignment: PlaneAlignment, center: Point, extent: Extent, geometry: PlaneAnchorGeometry) -> Self {
        Self { uid, position, rotation, alignment, center, extent, geometry }
    }

    /// Horizontal rectangular plane anchored at `position`, geometry centered on the anchor.
    #[must_use]
    pub fn horizontal_rectangle(uid: AnchorUid, position: Point, extent: Extent) -> Self {
        let center = Point::new(0.0, 0.0, 0.0);
        Self::new(
            uid,
            position,
            Rotation::new(1.0, 0.0, 0.0, 0.0),
            PlaneAlignment::Horizontal,
            center,
            extent,
            PlaneAnchorGeometry::rectangle(center, extent))
    }

    #[must_use]
    pub fn uid(&self) -> AnchorUid {
        self.uid
    }

    #[must_use]
    pub fn position(&self) -> Point {
        self.position
    }

    #[must_use]
    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    #[must_use]
    pub fn alignment(&self) -> PlaneAlignment {
        self.alignment
    }

    #[must_use]
    pub fn center(&self) -> Point {
        self.center
    }

    #[must_use]
    pub fn extent(&self) -> Extent {
        self.extent
    }

    #[must_use]
    pub fn geometry(&self) -> &PlaneAnchorGeometry {
        &self.geometry
    }
}

/// Anything the host tracks; only planes get a visualization.
#[derive(Debug, Clone, PartialEq)]
pub enum Anchor {
    Plane(PlaneAnchor),
    Point { uid: AnchorUid, position: Point },
}

impl Anchor {
    #[must_use]
    pub fn uid(&self) -> AnchorUid {
        match self {
            Anchor::Plane(plane) => plane.uid(),
            Anchor::Point { uid, .. } => *uid,
        }
    }

    #[must_use]
    pub fn as_plane(&self) -> Option<&PlaneAnchor> {
        match self {
            Anchor::Plane(plane) => Some(plane),
            Anchor::Point { .. } => None,
        }
    }
}
