use cgmath::{Point2, Point3, Quaternion, Vector2, Vector3};

pub type Point = Point3<f32>;
pub type Vector = Vector3<f32>;
pub type Rotation = Quaternion<f32>;

/// Location in view pixels, origin at the top-left corner.
pub type ScreenPoint = Point2<f32>;
pub type TextureCoordinate = Point2<f32>;
pub type Extent = Vector2<f32>;
