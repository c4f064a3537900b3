use crate::geometry::alias::{Point, Rotation, Vector};
use cgmath::Matrix4;

pub type Affine = Matrix4<f32>;

/// Translation column of a world transform.
#[must_use]
pub fn translation_of(source: &Affine) -> Point {
    Point::new(source.w.x, source.w.y, source.w.z)
}

#[must_use]
pub fn compose(position: Point, rotation: Rotation, scale: Vector) -> Affine {
    Affine::from_translation(Vector::new(position.x, position.y, position.z))
        * Affine::from(rotation)
        * Affine::from_nonuniform_scale(scale.x, scale.y, scale.z)
}
