use crate::geometry::alias::{Point, Rotation, Vector};
use crate::geometry::transform::{compose, Affine};
use crate::scene::animation::AnimationPlayer;
use crate::scene::geometry::Geometry;
use crate::scene::light::Light;
use crate::utils::object_uid::NodeUid;

#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    uid: NodeUid,
    name: Option<String>,
    parent: Option<NodeUid>,
    children: Vec<NodeUid>,

    position: Point,
    rotation: Rotation,
    scale: Vector,

    geometry: Option<Geometry>,
    light: Option<Light>,
    animations: Vec<AnimationPlayer>,
}

impl Node {
    #[must_use]
    pub(crate) fn new(uid: NodeUid, name: Option<String>, parent: Option<NodeUid>) -> Self {
        Self {
            uid,
            name,
            parent,
            children: Vec::new(),
            position: Point::new(0.0, 0.0, 0.0),
            rotation: Rotation::new(1.0, 0.0, 0.0, 0.0),
            scale: Vector::new(1.0, 1.0, 1.0),
            geometry: None,
            light: None,
            animations: Vec::new(),
        }
    }

    #[must_use]
    pub fn uid(&self) -> NodeUid {
        self.uid
    }

    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    #[must_use]
    pub fn parent(&self) -> Option<NodeUid> {
        self.parent
    }

    #[must_use]
    pub fn children(&self) -> &[NodeUid] {
        &self.children
    }

    pub(crate) fn push_child(&mut self, child: NodeUid) {
        self.children.push(child);
    }

    pub(crate) fn forget_child(&mut self, child: NodeUid) {
        self.children.retain(|candidate| *candidate != child);
    }

    #[must_use]
    pub fn position(&self) -> Point {
        self.position
    }

    pub fn set_position(&mut self, position: Point) {
        self.position = position;
    }

    #[must_use]
    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    pub fn set_rotation(&mut self, rotation: Rotation) {
        self.rotation = rotation;
    }

    #[must_use]
    pub fn scale(&self) -> Vector {
        self.scale
    }

    pub fn set_scale(&mut self, scale: Vector) {
        self.scale = scale;
    }

    #[must_use]
    pub fn local_transform(&self) -> Affine {
        compose(self.position, self.rotation, self.scale)
    }

    #[must_use]
    pub fn geometry(&self) -> Option<&Geometry> {
        self.geometry.as_ref()
    }

    /// Replaces the attached geometry; a node carries at most one.
    pub fn set_geometry(&mut self, geometry: Option<Geometry>) {
        self.geometry = geometry;
    }

    #[must_use]
    pub fn light(&self) -> Option<&Light> {
        self.light.as_ref()
    }

    pub fn set_light(&mut self, light: Option<Light>) {
        self.light = light;
    }

    #[must_use]
    pub fn animations(&self) -> &[AnimationPlayer] {
        &self.animations
    }

    #[must_use]
    pub fn animations_mutable(&mut self) -> &mut Vec<AnimationPlayer> {
        &mut self.animations
    }
}
