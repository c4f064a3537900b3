use crate::geometry::alias::{Point, Rotation, ScreenPoint, Vector};
use cgmath::{InnerSpace, Rad, Rotation as _, Rotation3};
use more_asserts::{assert_gt, assert_lt};

/// Device camera of the simulated host: looks along its local -Z, pitched around X.
#[derive(Debug, Clone, PartialEq)]
pub struct PinholeCamera {
    eye: Point,
    orientation: Rotation,
    vertical_field_of_view: Rad<f32>,
    viewport_width: f32,
    viewport_height: f32,
}

impl PinholeCamera {
    #[must_use]
    pub fn new(eye: Point, pitch: Rad<f32>, vertical_field_of_view: Rad<f32>) -> Self {
        assert_gt!(vertical_field_of_view.0, 0.0);
        assert_lt!(vertical_field_of_view.0, std::f32::consts::PI);
        Self {
            eye,
            orientation: Rotation::from_angle_x(pitch),
            vertical_field_of_view,
            viewport_width: 0.0,
            viewport_height: 0.0,
        }
    }

    #[must_use]
    pub fn with_viewport(mut self, width: f32, height: f32) -> Self {
        self.set_viewport(width, height);
        self
    }

    pub fn set_viewport(&mut self, width: f32, height: f32) {
        self.viewport_width = width.max(0.0);
        self.viewport_height = height.max(0.0);
    }

    #[must_use]
    pub fn eye(&self) -> Point {
        self.eye
    }

    /// Unit direction of the ray through `pixel`; `None` outside the viewport.
    #[must_use]
    pub fn ray_direction(&self, pixel: ScreenPoint) -> Option<Vector> {
        if self.viewport_width <= 0.0 || self.viewport_height <= 0.0 {
            return None;
        }
        if pixel.x < 0.0 || pixel.y < 0.0 || pixel.x > self.viewport_width || pixel.y > self.viewport_height {
            return None;
        }

        let aspect = self.viewport_width / self.viewport_height;
        let half_height = (self.vertical_field_of_view.0 / 2.0).tan();
        let ndc_x = 2.0 * pixel.x / self.viewport_width - 1.0;
        let ndc_y = 1.0 - 2.0 * pixel.y / self.viewport_height;

        let local = Vector::new(ndc_x * aspect * half_height, ndc_y * half_height, -1.0);
        Some(self.orientation.rotate_vector(local).normalize())
    }
}
