use crate::assets::template::TemplateObject;
use crate::geometry::alias::{Point, ScreenPoint, Vector};
use crate::geometry::transform::translation_of;
use crate::geometry::utils::debug_format_human_readable_point;
use crate::scene::graph::SceneGraph;
use crate::session::anchor::PlaneAlignment;
use crate::session::host::{RaycastTarget, TrackingHost};
use crate::utils::object_uid::NodeUid;
use log::debug;
use more_asserts::assert_gt;
use thiserror::Error;

/// Lifts placed objects off the detected surface so they do not z-fight with it.
pub const DEFAULT_OBJECT_OFFSET: Vector = Vector::new(0.0, 0.001, 0.0);

/// Amplifies the user-facing scale range.
pub const DEFAULT_SCALE_MULTIPLIER: f32 = 1.7;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementError {
    #[error("screen point can not be projected into the world")]
    NoQuery,
    #[error("raycast found no surface")]
    NoHit,
}

pub struct PlacementService {
    template: TemplateObject,
    object_offset: Vector,
    scale_multiplier: f32,
}

impl PlacementService {
    #[must_use]
    pub fn new(template: TemplateObject) -> Self {
        Self {
            template,
            object_offset: DEFAULT_OBJECT_OFFSET,
            scale_multiplier: DEFAULT_SCALE_MULTIPLIER,
        }
    }

    #[must_use]
    pub fn with_object_offset(mut self, offset: Vector) -> Self {
        self.object_offset = offset;
        self
    }

    #[must_use]
    pub fn with_scale_multiplier(mut self, multiplier: f32) -> Self {
        assert_gt!(multiplier, 0.0);
        self.scale_multiplier = multiplier;
        self
    }

    #[must_use]
    pub fn template(&self) -> &TemplateObject {
        &self.template
    }

    #[must_use]
    pub fn effective_scale(&self, current_scale: f32) -> f32 {
        self.scale_multiplier * current_scale
    }

    /// Raycasts from `screen_point` against estimated horizontal planes and drops a fresh clone of
    /// the template onto the nearest hit. `current_scale` is captured now and never re-applied.
    pub fn place_at<Host: TrackingHost + ?Sized>(
        &self,
        host: &Host,
        scene: &mut SceneGraph,
        screen_point: ScreenPoint,
        current_scale: f32,
    ) -> Result<NodeUid, PlacementError> {
        let query = host
            .raycast_query(screen_point, RaycastTarget::EstimatedPlane, PlaneAlignment::Horizontal)
            .ok_or(PlacementError::NoQuery)?;
        let hit = host.raycast(&query).into_iter().next().ok_or(PlacementError::NoHit)?;

        let position = self.placement_position(translation_of(hit.world_transform()));
        let scale = self.effective_scale(current_scale);

        let mut instance = self.template.instantiate();
        instance.set_position(position);
        instance.set_uniform_scale(scale);
        let uid = scene.insert(scene.root(), &instance);

        debug!("placed {} at {} with scale {}", uid, debug_format_human_readable_point(position), scale);
        Ok(uid)
    }

    #[must_use]
    fn placement_position(&self, surface: Point) -> Point {
        Point::new(
            surface.x + self.object_offset.x,
            surface.y + self.object_offset.y,
            surface.z + self.object_offset.z,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::animation::AnimationPlayer;
    use crate::scene::node_tree::NodeTree;
    use crate::simulation::scripted_host::tests::ScriptedHost;
    use cgmath::assert_abs_diff_eq;
    use rstest::rstest;

    #[must_use]
    fn make_service() -> PlacementService {
        PlacementService::new(TemplateObject::new(
            NodeTree::new("Base")
                .with_mesh("dancer")
                .with_animation(AnimationPlayer::new("samba"))
                .with_child(NodeTree::new("Hips"))))
    }

    #[must_use]
    fn tap() -> ScreenPoint {
        ScreenPoint::new(120.0, 340.0)
    }

    #[test]
    fn test_place_at_offsets_and_scales() {
        let system_under_test = make_service();
        let host = ScriptedHost::hitting(vec![Point::new(1.0, 0.5, -2.0)]);
        let mut scene = SceneGraph::new();

        let placed = system_under_test.place_at(&host, &mut scene, tap(), 0.3).expect("raycast hits");

        let node = scene.node(placed).expect("placed node");
        assert_eq!(node.position(), Point::new(1.0, 0.5 + 0.001, -2.0));
        assert_abs_diff_eq!(node.position(), Point::new(1.0, 0.501, -2.0), epsilon = 1e-6);
        assert_abs_diff_eq!(node.scale(), Vector::new(0.51, 0.51, 0.51), epsilon = 1e-6);
        assert_eq!(node.parent(), Some(scene.root()));
    }

    #[test]
    fn test_place_at_queries_estimated_horizontal_planes() {
        let system_under_test = make_service();
        let host = ScriptedHost::hitting(vec![Point::new(0.0, 0.0, 0.0)]);
        let mut scene = SceneGraph::new();

        let _ = system_under_test.place_at(&host, &mut scene, tap(), 1.0).expect("raycast hits");

        let queries = host.recorded_queries();
        assert_eq!(queries.len(), 1);
        assert_eq!(queries[0].target(), RaycastTarget::EstimatedPlane);
        assert_eq!(queries[0].alignment(), PlaneAlignment::Horizontal);
    }

    #[test]
    fn test_place_at_uses_nearest_hit() {
        let system_under_test = make_service();
        let host = ScriptedHost::hitting(vec![Point::new(0.0, 0.75, -1.0), Point::new(0.0, 0.0, -3.0)]);
        let mut scene = SceneGraph::new();

        let placed = system_under_test.place_at(&host, &mut scene, tap(), 1.0).expect("raycast hits");

        assert_abs_diff_eq!(scene.node(placed).expect("placed node").position(), Point::new(0.0, 0.751, -1.0), epsilon = 1e-6);
    }

    #[test]
    fn test_place_at_without_hit_adds_nothing() {
        let system_under_test = make_service();
        let host = ScriptedHost::missing();
        let mut scene = SceneGraph::new();

        let result = system_under_test.place_at(&host, &mut scene, tap(), 0.3);

        assert_eq!(result, Err(PlacementError::NoHit));
        assert_eq!(scene.node_count(), 1);
    }

    #[test]
    fn test_place_at_without_query_adds_nothing() {
        let system_under_test = make_service();
        let host = ScriptedHost::refusing_queries();
        let mut scene = SceneGraph::new();

        assert_eq!(system_under_test.place_at(&host, &mut scene, tap(), 0.3), Err(PlacementError::NoQuery));
        assert_eq!(scene.node_count(), 1);
    }

    #[test]
    fn test_repeated_taps_create_independent_instances() {
        let system_under_test = make_service();
        let host = ScriptedHost::hitting(vec![Point::new(1.0, 0.5, -2.0)]);
        let mut scene = SceneGraph::new();

        let first = system_under_test.place_at(&host, &mut scene, tap(), 0.3).expect("first tap");
        let second = system_under_test.place_at(&host, &mut scene, tap(), 0.3).expect("second tap");

        assert_ne!(first, second);
        assert_eq!(scene.children_of(scene.root()), &[first, second]);
        assert_eq!(scene.node_count(), 1 + 2 * system_under_test.template().tree().node_count());

        scene.node_mutable(first).expect("first").animations_mutable()[0].seek(2.5);
        assert_eq!(scene.node(second).expect("second").animations()[0].time_offset(), 0.0);
        assert_eq!(system_under_test.template().tree().animations()[0].time_offset(), 0.0);
    }

    #[test]
    fn test_scale_is_captured_at_tap_time() {
        let system_under_test = make_service();
        let host = ScriptedHost::hitting(vec![Point::new(0.0, 0.0, 0.0)]);
        let mut scene = SceneGraph::new();

        let small = system_under_test.place_at(&host, &mut scene, tap(), 0.2).expect("first tap");
        let large = system_under_test.place_at(&host, &mut scene, tap(), 1.0).expect("second tap");

        assert_abs_diff_eq!(scene.node(small).expect("small").scale().x, 0.34, epsilon = 1e-6);
        assert_abs_diff_eq!(scene.node(large).expect("large").scale().x, 1.7, epsilon = 1e-6);
    }

    #[rstest]
    #[case(0.0, 0.0)]
    #[case(0.5, 0.85)]
    #[case(1.0, 1.7)]
    fn test_effective_scale(#[case] current_scale: f32, #[case] expected: f32) {
        assert_abs_diff_eq!(make_service().effective_scale(current_scale), expected, epsilon = 1e-6);
    }

    #[test]
    fn test_custom_offset_and_multiplier() {
        let system_under_test = make_service()
            .with_object_offset(Vector::new(0.0, 0.01, 0.0))
            .with_scale_multiplier(2.0);
        let host = ScriptedHost::hitting(vec![Point::new(0.0, 0.0, 0.0)]);
        let mut scene = SceneGraph::new();

        let placed = system_under_test.place_at(&host, &mut scene, tap(), 0.5).expect("raycast hits");

        let node = scene.node(placed).expect("placed node");
        assert_abs_diff_eq!(node.position().y, 0.01, epsilon = 1e-7);
        assert_abs_diff_eq!(node.scale().x, 1.0, epsilon = 1e-7);
    }
}
