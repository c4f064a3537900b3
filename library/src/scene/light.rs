use crate::geometry::alias::{Rotation, Vector};
use crate::scene::graph::SceneGraph;
use crate::scene::node_tree::NodeTree;
use cgmath::{Rad, Rotation3};
use log::debug;
use more_asserts::assert_ge;
use palette::Srgba;
use std::f32::consts::FRAC_PI_2;
use strum_macros::Display;

#[derive(Display, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightKind {
    Ambient,
    Directional,
}

#[derive(Display, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShadowMode {
    Forward,
    Deferred,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Light {
    kind: LightKind,
    intensity: f32,
    casts_shadow: bool,
    shadow_mode: ShadowMode,
    shadow_color: Srgba<f32>,
    shadow_sample_count: u32,
    shadow_radius: f32,
}

const DEFAULT_INTENSITY: f32 = 1000.0;

impl Light {
    #[must_use]
    pub fn new(kind: LightKind) -> Self {
        Self {
            kind,
            intensity: DEFAULT_INTENSITY,
            casts_shadow: false,
            shadow_mode: ShadowMode::Forward,
            shadow_color: Srgba::new(0.0, 0.0, 0.0, 0.5),
            shadow_sample_count: 1,
            shadow_radius: 3.0,
        }
    }

    #[must_use]
    pub fn with_intensity(mut self, intensity: f32) -> Self {
        assert_ge!(intensity, 0.0);
        self.intensity = intensity;
        self
    }

    #[must_use]
    pub fn with_shadow(mut self, casts_shadow: bool) -> Self {
        self.casts_shadow = casts_shadow;
        self
    }

    #[must_use]
    pub fn with_shadow_mode(mut self, mode: ShadowMode) -> Self {
        self.shadow_mode = mode;
        self
    }

    #[must_use]
    pub fn with_shadow_color(mut self, red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        self.shadow_color = Srgba::new(red, green, blue, alpha);
        self
    }

    #[must_use]
    pub fn with_shadow_sample_count(mut self, count: u32) -> Self {
        self.shadow_sample_count = count;
        self
    }

    #[must_use]
    pub fn with_shadow_radius(mut self, radius: f32) -> Self {
        assert_ge!(radius, 0.0);
        self.shadow_radius = radius;
        self
    }

    #[must_use]
    pub fn kind(&self) -> LightKind {
        self.kind
    }

    #[must_use]
    pub fn intensity(&self) -> f32 {
        self.intensity
    }

    #[must_use]
    pub fn casts_shadow(&self) -> bool {
        self.casts_shadow
    }

    #[must_use]
    pub fn shadow_mode(&self) -> ShadowMode {
        self.shadow_mode
    }

    #[must_use]
    pub fn shadow_color(&self) -> Srgba<f32> {
        self.shadow_color
    }

    #[must_use]
    pub fn shadow_sample_count(&self) -> u32 {
        self.shadow_sample_count
    }

    #[must_use]
    pub fn shadow_radius(&self) -> f32 {
        self.shadow_radius
    }
}

pub(crate) const AMBIENT_LIGHT_NAME: &str = "ambient light";
pub(crate) const DIRECTIONAL_LIGHT_NAME: &str = "directional light";

/// Soft ambient fill plus a shadow-casting light pointing straight down.
pub(crate) fn install_default_lighting(scene: &mut SceneGraph) {
    let ambient = NodeTree::new(AMBIENT_LIGHT_NAME)
        .with_light(Light::new(LightKind::Ambient).with_shadow_mode(ShadowMode::Deferred));

    let directional = NodeTree::new(DIRECTIONAL_LIGHT_NAME)
        .with_rotation(Rotation::from_axis_angle(Vector::unit_x(), Rad(-FRAC_PI_2)))
        .with_light(Light::new(LightKind::Directional)
            .with_intensity(1000.0)
            .with_shadow(true)
            .with_shadow_mode(ShadowMode::Deferred)
            .with_shadow_color(0.0, 0.0, 0.0, 0.5)
            .with_shadow_sample_count(8)
            .with_shadow_radius(8.0));

    let root = scene.root();
    let ambient = scene.insert(root, &ambient);
    let directional = scene.insert(root, &directional);
    debug!("lights installed: ambient={ambient}, directional={directional}");
}
