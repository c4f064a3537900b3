use crate::scene::geometry::{Geometry, Material, PlaneGeometry};
use crate::scene::graph::SceneGraph;
use crate::session::anchor::{Anchor, PlaneAnchor};
use crate::utils::object_uid::{AnchorUid, NodeUid};
use log::{debug, trace};

const DEBUG_PLANE_OPACITY: f32 = 0.8;

/// Keeps an occluder mesh on every plane anchor's node, matching the plane's current extent.
pub struct PlaneVisualizer {
    material: Material,
}

impl Default for PlaneVisualizer {
    fn default() -> Self {
        Self::new()
    }
}

impl PlaneVisualizer {
    /// Depth-only planes: invisible, but they hide the parts of placed models below the surface.
    #[must_use]
    pub fn new() -> Self {
        Self { material: Material::depth_only() }
    }

    /// Translucent white planes, for checking what the host has detected.
    #[must_use]
    pub fn visible() -> Self {
        Self { material: Material::new().with_diffuse(1.0, 1.0, 1.0, DEBUG_PLANE_OPACITY) }
    }

    #[must_use]
    pub fn material(&self) -> &Material {
        &self.material
    }

    /// Non-plane anchors are ignored (`None`). The previous geometry of the node is replaced.
    pub fn anchor_updated(&self, scene: &mut SceneGraph, anchor: &Anchor) -> Option<NodeUid> {
        let plane = anchor.as_plane()?;
        Some(self.rebuild(scene, plane))
    }

    pub fn rebuild(&self, scene: &mut SceneGraph, plane: &PlaneAnchor) -> NodeUid {
        let node_uid = scene.anchor_node(plane.uid(), plane.position(), plane.rotation());
        let geometry = PlaneGeometry::from_anchor_geometry(plane.geometry(), self.material.clone());
        trace!("plane {} rebuilt: {} triangles, extent {:?}", plane.uid(), geometry.triangle_count(), plane.extent());

        if let Some(node) = scene.node_mutable(node_uid) {
            node.set_geometry(Some(Geometry::Plane(geometry)));
        }
        node_uid
    }

    pub fn anchor_removed(&self, scene: &mut SceneGraph, anchor: AnchorUid) -> bool {
        let removed = scene.remove_anchor_node(anchor);
        if removed {
            debug!("plane {anchor} removed");
        }
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::alias::{Extent, Point};
    use crate::scene::geometry::ColorWriteMask;

    #[must_use]
    fn make_plane(extent: Extent) -> Anchor {
        Anchor::Plane(PlaneAnchor::horizontal_rectangle(AnchorUid(1), Point::new(0.0, 0.0, -1.0), extent))
    }

    #[must_use]
    fn plane_geometry_of(scene: &SceneGraph, node: NodeUid) -> PlaneGeometry {
        match scene.node(node).and_then(|node| node.geometry()) {
            Some(Geometry::Plane(geometry)) => geometry.clone(),
            other => panic!("expected plane geometry, got {other:?}"),
        }
    }

    #[test]
    fn test_first_update_creates_invisible_plane() {
        let system_under_test = PlaneVisualizer::new();
        let mut scene = SceneGraph::new();

        let node = system_under_test.anchor_updated(&mut scene, &make_plane(Extent::new(1.0, 2.0))).expect("plane anchor");

        let geometry = plane_geometry_of(&scene, node);
        assert_eq!(geometry.material().color_write_mask(), ColorWriteMask::empty());
        assert_eq!(geometry.bounds(), Some((Point::new(-0.5, 0.0, -1.0), Point::new(0.5, 0.0, 1.0))));
        assert_eq!(scene.node(node).expect("anchor node").position(), Point::new(0.0, 0.0, -1.0));
    }

    #[test]
    fn test_rebuild_is_idempotent() {
        let system_under_test = PlaneVisualizer::new();
        let mut scene = SceneGraph::new();
        let anchor = make_plane(Extent::new(1.0, 1.0));

        let first_node = system_under_test.anchor_updated(&mut scene, &anchor).expect("plane anchor");
        let first = plane_geometry_of(&scene, first_node);
        let node_count = scene.node_count();
        let second_node = system_under_test.anchor_updated(&mut scene, &anchor).expect("plane anchor");
        let second = plane_geometry_of(&scene, second_node);

        assert_eq!(first_node, second_node);
        assert_eq!(first, second);
        assert_eq!(scene.node_count(), node_count);
        assert!(scene.children_of(first_node).is_empty());
    }

    #[test]
    fn test_growing_plane_replaces_geometry() {
        let system_under_test = PlaneVisualizer::new();
        let mut scene = SceneGraph::new();

        let node = system_under_test.anchor_updated(&mut scene, &make_plane(Extent::new(1.0, 1.0))).expect("plane anchor");
        let _ = system_under_test.anchor_updated(&mut scene, &make_plane(Extent::new(3.0, 2.0))).expect("plane anchor");

        let geometry = plane_geometry_of(&scene, node);
        assert_eq!(geometry.bounds(), Some((Point::new(-1.5, 0.0, -1.0), Point::new(1.5, 0.0, 1.0))));
        assert_eq!(geometry.triangle_count(), 2);
    }

    #[test]
    fn test_point_anchor_is_ignored() {
        let system_under_test = PlaneVisualizer::new();
        let mut scene = SceneGraph::new();

        let result = system_under_test.anchor_updated(&mut scene, &Anchor::Point { uid: AnchorUid(9), position: Point::new(0.0, 0.0, 0.0) });

        assert!(result.is_none());
        assert_eq!(scene.node_count(), 1);
    }

    #[test]
    fn test_visible_debug_planes() {
        let system_under_test = PlaneVisualizer::visible();
        assert!(system_under_test.material().visible());
        assert_eq!(system_under_test.material().diffuse().alpha, DEBUG_PLANE_OPACITY);
    }

    #[test]
    fn test_anchor_removed() {
        let system_under_test = PlaneVisualizer::new();
        let mut scene = SceneGraph::new();
        let _ = system_under_test.anchor_updated(&mut scene, &make_plane(Extent::new(1.0, 1.0)));

        assert!(system_under_test.anchor_removed(&mut scene, AnchorUid(1)));
        assert_eq!(scene.node_count(), 1);
        assert_eq!(system_under_test.anchor_removed(&mut scene, AnchorUid(1)), false);
    }
}
