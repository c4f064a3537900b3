use crate::geometry::alias::{Point, TextureCoordinate};
use crate::session::anchor::PlaneAnchorGeometry;
use bitflags::bitflags;
use palette::Srgba;

bitflags! {
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct ColorWriteMask: u8 {
        const RED = 0b0001;
        const GREEN = 0b0010;
        const BLUE = 0b0100;
        const ALPHA = 0b1000;
        const ALL = Self::RED.bits() | Self::GREEN.bits() | Self::BLUE.bits() | Self::ALPHA.bits();
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Material {
    diffuse: Srgba<f32>,
    color_write_mask: ColorWriteMask,
}

impl Default for Material {
    fn default() -> Self {
        Self::new()
    }
}

impl Material {
    #[must_use]
    pub fn new() -> Self {
        Self {
            diffuse: Srgba::new(1.0, 1.0, 1.0, 1.0),
            color_write_mask: ColorWriteMask::ALL,
        }
    }

    /// Writes depth only: invisible, yet hides whatever lies behind it.
    #[must_use]
    pub fn depth_only() -> Self {
        Self::new().with_color_write_mask(ColorWriteMask::empty())
    }

    #[must_use]
    pub fn with_diffuse(mut self, red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        self.diffuse = Srgba::new(red, green, blue, alpha);
        self
    }

    #[must_use]
    pub fn with_color_write_mask(mut self, mask: ColorWriteMask) -> Self {
        self.color_write_mask = mask;
        self
    }

    #[must_use]
    pub fn diffuse(&self) -> Srgba<f32> {
        self.diffuse
    }

    #[must_use]
    pub fn color_write_mask(&self) -> ColorWriteMask {
        self.color_write_mask
    }

    #[must_use]
    pub fn visible(&self) -> bool {
        false == self.color_write_mask.is_empty()
    }
}

/// Triangulated surface of a detected plane, in the anchor's local space.
#[derive(Clone, Debug, PartialEq)]
pub struct PlaneGeometry {
    vertices: Vec<Point>,
    texture_coordinates: Vec<TextureCoordinate>,
    triangle_indices: Vec<u16>,
    material: Material,
}

impl PlaneGeometry {
    #[must_use]
    pub fn from_anchor_geometry(source: &PlaneAnchorGeometry, material: Material) -> Self {
        Self {
            vertices: source.vertices().to_vec(),
            texture_coordinates: source.texture_coordinates().to_vec(),
            triangle_indices: source.triangle_indices().to_vec(),
            material,
        }
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
    pub fn triangle_count(&self) -> usize {
        self.triangle_indices.len() / 3
    }

    #[must_use]
    pub fn material(&self) -> &Material {
        &self.material
    }

    /// Axis-aligned bounds of the vertices: `(min, max)`.
    #[must_use]
    pub fn bounds(&self) -> Option<(Point, Point)> {
        let first = self.vertices.first()?;
        Some(self.vertices.iter().skip(1).fold((*first, *first), |(min, max), vertex| {
            (
                Point::new(min.x.min(vertex.x), min.y.min(vertex.y), min.z.min(vertex.z)),
                Point::new(max.x.max(vertex.x), max.y.max(vertex.y), max.z.max(vertex.z)),
            )
        }))
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Geometry {
    /// Mesh owned by the host's asset pipeline, referenced by name.
    Mesh { resource: String },
    Plane(PlaneGeometry),
}
