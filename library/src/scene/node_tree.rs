use crate::geometry::alias::{Point, Rotation, Vector};
use crate::scene::animation::AnimationPlayer;
use crate::scene::light::Light;
use serde::Deserialize;

/// Detached node hierarchy: the shape of loaded assets and of the placement template.
/// Instantiating it into a [`crate::scene::graph::SceneGraph`] copies every node.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct NodeTree {
    #[serde(default)]
    name: Option<String>,
    #[serde(default = "origin")]
    position: [f32; 3],
    /// Quaternion as `[x, y, z, w]`.
    #[serde(default = "identity_rotation")]
    rotation: [f32; 4],
    #[serde(default = "unit_scale")]
    scale: [f32; 3],
    #[serde(default)]
    mesh: Option<String>,
    #[serde(default)]
    animations: Vec<AnimationPlayer>,
    #[serde(skip)]
    light: Option<Light>,
    #[serde(default)]
    children: Vec<NodeTree>,
}

fn origin() -> [f32; 3] {
    [0.0, 0.0, 0.0]
}

fn identity_rotation() -> [f32; 4] {
    [0.0, 0.0, 0.0, 1.0]
}

fn unit_scale() -> [f32; 3] {
    [1.0, 1.0, 1.0]
}

impl Default for NodeTree {
    fn default() -> Self {
        Self {
            name: None,
            position: origin(),
            rotation: identity_rotation(),
            scale: unit_scale(),
            mesh: None,
            animations: Vec::new(),
            light: None,
            children: Vec::new(),
        }
    }
}

impl NodeTree {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: Some(name.into()), ..Self::default() }
    }

    #[must_use]
    pub fn with_position(mut self, position: Point) -> Self {
        self.set_position(position);
        self
    }

    #[must_use]
    pub fn with_rotation(mut self, rotation: Rotation) -> Self {
        self.rotation = [rotation.v.x, rotation.v.y, rotation.v.z, rotation.s];
        self
    }

    #[must_use]
    pub fn with_mesh(mut self, resource: impl Into<String>) -> Self {
        self.mesh = Some(resource.into());
        self
    }

    #[must_use]
    pub fn with_animation(mut self, player: AnimationPlayer) -> Self {
        self.animations.push(player);
        self
    }

    #[must_use]
    pub fn with_light(mut self, light: Light) -> Self {
        self.light = Some(light);
        self
    }

    #[must_use]
    pub fn with_child(mut self, child: NodeTree) -> Self {
        self.children.push(child);
        self
    }

    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    #[must_use]
    pub fn position(&self) -> Point {
        Point::new(self.position[0], self.position[1], self.position[2])
    }

    pub fn set_position(&mut self, position: Point) {
        self.position = [position.x, position.y, position.z];
    }

    #[must_use]
    pub fn rotation(&self) -> Rotation {
        Rotation::new(self.rotation[3], self.rotation[0], self.rotation[1], self.rotation[2])
    }

    #[must_use]
    pub fn scale(&self) -> Vector {
        Vector::new(self.scale[0], self.scale[1], self.scale[2])
    }

    pub fn set_uniform_scale(&mut self, scale: f32) {
        self.scale = [scale, scale, scale];
    }

    #[must_use]
    pub fn mesh(&self) -> Option<&str> {
        self.mesh.as_deref()
    }

    #[must_use]
    pub fn animations(&self) -> &[AnimationPlayer] {
        &self.animations
    }

    #[must_use]
    pub fn light(&self) -> Option<&Light> {
        self.light.as_ref()
    }

    #[must_use]
    pub fn children(&self) -> &[NodeTree] {
        &self.children
    }

    /// Depth-first, pre-order search among descendants; the node itself is not a candidate.
    #[must_use]
    pub fn find_descendant(&self, name: &str) -> Option<&NodeTree> {
        for child in self.children.iter() {
            if child.name() == Some(name) {
                return Some(child);
            }
            if let Some(found) = child.find_descendant(name) {
                return Some(found);
            }
        }
        None
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(|child| child.node_count()).sum::<usize>()
    }
}
