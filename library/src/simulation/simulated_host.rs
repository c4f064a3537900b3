use crate::geometry::alias::{Extent, Point, ScreenPoint};
use crate::geometry::transform::Affine;
use crate::session::anchor::{Anchor, PlaneAlignment, PlaneAnchor};
use crate::session::configuration::{FrameSemantics, RunOptions, TrackingConfiguration};
use crate::session::host::{Frame, HostEvent, RaycastHit, RaycastQuery, RaycastTarget, SessionError, TrackingHost, TrackingState};
use crate::simulation::pinhole_camera::PinholeCamera;
use crate::utils::object_uid::AnchorUid;
use cgmath::{EuclideanSpace, Rad};
use log::{debug, trace};
use std::collections::VecDeque;
use std::f32::consts::FRAC_PI_2;

const RAY_PARALLEL_EPSILON: f32 = 1e-6;

/// In-process stand-in for the platform AR runtime: a camera above a world of horizontal planes.
/// Callbacks are queued as [`HostEvent`]s; the owner drains and dispatches them on its own thread.
pub struct SimulatedHost {
    camera: PinholeCamera,
    planes: Vec<PlaneAnchor>,
    segmentation_supported: bool,

    running: bool,
    interrupted: bool,
    tracking_state: TrackingState,
    clock: f64,

    run_history: Vec<(TrackingConfiguration, RunOptions)>,
    pause_count: usize,
    pending: VecDeque<HostEvent>,
    last_anchor_uid: u64,
}

impl Default for SimulatedHost {
    /// Camera 1.5 above the floor, looking 45 degrees down, 800x600 view.
    fn default() -> Self {
        let camera = PinholeCamera::new(Point::new(0.0, 1.5, 0.0), Rad(-FRAC_PI_2 / 2.0), Rad(FRAC_PI_2))
            .with_viewport(800.0, 600.0);
        Self::new(camera)
    }
}

impl SimulatedHost {
    #[must_use]
    pub fn new(camera: PinholeCamera) -> Self {
        Self {
            camera,
            planes: Vec::new(),
            segmentation_supported: true,
            running: false,
            interrupted: false,
            tracking_state: TrackingState::NotAvailable,
            clock: 0.0,
            run_history: Vec::new(),
            pause_count: 0,
            pending: VecDeque::new(),
            last_anchor_uid: 0,
        }
    }

    #[must_use]
    pub fn with_segmentation_support(mut self, supported: bool) -> Self {
        self.segmentation_supported = supported;
        self
    }

    #[must_use]
    pub fn camera_mutable(&mut self) -> &mut PinholeCamera {
        &mut self.camera
    }

    #[must_use]
    pub fn running(&self) -> bool {
        self.running
    }

    #[must_use]
    pub fn run_history(&self) -> &[(TrackingConfiguration, RunOptions)] {
        &self.run_history
    }

    #[must_use]
    pub fn current_configuration(&self) -> Option<&TrackingConfiguration> {
        self.run_history.last().map(|(configuration, _)| configuration)
    }

    #[must_use]
    pub fn pause_count(&self) -> usize {
        self.pause_count
    }

    #[must_use]
    pub fn planes(&self) -> &[PlaneAnchor] {
        &self.planes
    }

    #[must_use]
    fn plane_detection_enabled(&self) -> bool {
        self.current_configuration()
            .is_some_and(|configuration| false == configuration.plane_detection().is_empty())
    }

    /// Registers a horizontal plane; reported only while the session runs with plane detection.
    pub fn detect_plane(&mut self, position: Point, extent: Extent) -> AnchorUid {
        self.last_anchor_uid += 1;
        let uid = AnchorUid(self.last_anchor_uid);
        let plane = PlaneAnchor::horizontal_rectangle(uid, position, extent);
        if self.running && self.plane_detection_enabled() {
            self.pending.push_back(HostEvent::AnchorAdded(Anchor::Plane(plane.clone())));
        }
        debug!("simulated plane {uid} at {:?}, extent {:?}", position, extent);
        self.planes.push(plane);
        uid
    }

    /// Refines a plane to a new extent. Returns `false` for unknown anchors.
    pub fn grow_plane(&mut self, uid: AnchorUid, extent: Extent) -> bool {
        let Some(index) = self.planes.iter().position(|plane| plane.uid() == uid) else {
            return false;
        };
        let grown = PlaneAnchor::horizontal_rectangle(uid, self.planes[index].position(), extent);
        self.planes[index] = grown.clone();
        if self.running {
            self.pending.push_back(HostEvent::AnchorUpdated(Anchor::Plane(grown)));
        }
        true
    }

    pub fn remove_plane(&mut self, uid: AnchorUid) -> bool {
        let count_before = self.planes.len();
        self.planes.retain(|plane| plane.uid() != uid);
        let removed = self.planes.len() != count_before;
        if removed {
            self.pending.push_back(HostEvent::AnchorRemoved(uid));
        }
        removed
    }

    pub fn set_tracking_state(&mut self, state: TrackingState) {
        self.tracking_state = state;
    }

    /// Emits a frame callback; silent while paused or interrupted.
    pub fn advance_frame(&mut self, delta_seconds: f64) {
        if false == self.running || self.interrupted {
            return;
        }
        self.clock += delta_seconds;
        trace!("simulated frame at {:.3}", self.clock);
        self.pending.push_back(HostEvent::FrameUpdated(Frame::new(self.clock, self.tracking_state)));
    }

    pub fn interrupt(&mut self) {
        if self.running && false == self.interrupted {
            self.interrupted = true;
            self.pending.push_back(HostEvent::InterruptionBegan);
        }
    }

    pub fn end_interruption(&mut self) {
        if self.interrupted {
            self.interrupted = false;
            self.pending.push_back(HostEvent::InterruptionEnded);
        }
    }

    pub fn fail(&mut self, error: SessionError) {
        self.pending.push_back(HostEvent::SessionFailed(error));
    }

    #[must_use]
    pub fn drain_events(&mut self) -> Vec<HostEvent> {
        self.pending.drain(..).collect()
    }

    #[must_use]
    fn hit_plane(query: &RaycastQuery, plane: &PlaneAnchor) -> Option<(f32, Point)> {
        if plane.alignment() != query.alignment() || PlaneAlignment::Horizontal != plane.alignment() {
            return None;
        }
        let direction = query.direction();
        if direction.y.abs() < RAY_PARALLEL_EPSILON {
            return None;
        }
        let distance = (plane.position().y - query.origin().y) / direction.y;
        if distance <= 0.0 {
            return None;
        }
        let hit = query.origin() + direction * distance;

        if RaycastTarget::ExistingPlaneGeometry == query.target() {
            let local_x = hit.x - plane.position().x - plane.center().x;
            let local_z = hit.z - plane.position().z - plane.center().z;
            if local_x.abs() > plane.extent().x / 2.0 || local_z.abs() > plane.extent().y / 2.0 {
                return None;
            }
        }
        Some((distance, hit))
    }
}

impl TrackingHost for SimulatedHost {
    fn supports_frame_semantics(&self, semantics: FrameSemantics) -> bool {
        semantics.is_empty() || self.segmentation_supported
    }

    fn run(&mut self, configuration: &TrackingConfiguration, options: RunOptions) {
        if options.contains(RunOptions::REMOVE_EXISTING_ANCHORS) {
            for plane in self.planes.drain(..) {
                self.pending.push_back(HostEvent::AnchorRemoved(plane.uid()));
            }
        }
        if options.contains(RunOptions::RESET_TRACKING) {
            self.tracking_state = TrackingState::NotAvailable;
        }

        let announce_planes = false == self.running && false == configuration.plane_detection().is_empty();
        self.running = true;
        self.run_history.push((configuration.clone(), options));

        if announce_planes {
            for plane in self.planes.iter() {
                self.pending.push_back(HostEvent::AnchorUpdated(Anchor::Plane(plane.clone())));
            }
        }
    }

    fn pause(&mut self) {
        self.running = false;
        self.pause_count += 1;
    }

    fn raycast_query(&self, from: ScreenPoint, target: RaycastTarget, alignment: PlaneAlignment) -> Option<RaycastQuery> {
        let direction = self.camera.ray_direction(from)?;
        Some(RaycastQuery::new(self.camera.eye(), direction, target, alignment))
    }

    fn raycast(&self, query: &RaycastQuery) -> Vec<RaycastHit> {
        let mut hits: Vec<(f32, RaycastHit)> = self.planes.iter()
            .filter_map(|plane| {
                Self::hit_plane(query, plane).map(|(distance, point)| {
                    (distance, RaycastHit::new(Affine::from_translation(point.to_vec()), query.target(), Some(plane.uid())))
                })
            })
            .collect();
        hits.sort_by(|left, right| left.0.total_cmp(&right.0));
        hits.into_iter().map(|(_, hit)| hit).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::transform::translation_of;
    use crate::session::configuration::PlaneDetection;
    use cgmath::assert_abs_diff_eq;

    #[must_use]
    fn plane_detecting_configuration() -> TrackingConfiguration {
        TrackingConfiguration::world_tracking().with_plane_detection(PlaneDetection::HORIZONTAL)
    }

    #[must_use]
    fn center_of_view() -> ScreenPoint {
        ScreenPoint::new(400.0, 300.0)
    }

    #[test]
    fn test_estimated_raycast_hits_beyond_extent() {
        let mut system_under_test = SimulatedHost::default();
        let _ = system_under_test.detect_plane(Point::new(0.0, 0.0, -5.0), Extent::new(0.1, 0.1));

        let query = system_under_test.raycast_query(center_of_view(), RaycastTarget::EstimatedPlane, PlaneAlignment::Horizontal)
            .expect("query from the view center");
        let hits = system_under_test.raycast(&query);

        assert_eq!(hits.len(), 1);
        assert_abs_diff_eq!(translation_of(hits[0].world_transform()), Point::new(0.0, 0.0, -1.5), epsilon = 1e-5);
    }

    #[test]
    fn test_existing_geometry_raycast_respects_extent() {
        let mut system_under_test = SimulatedHost::default();
        let _ = system_under_test.detect_plane(Point::new(0.0, 0.0, -5.0), Extent::new(0.1, 0.1));

        let query = system_under_test.raycast_query(center_of_view(), RaycastTarget::ExistingPlaneGeometry, PlaneAlignment::Horizontal)
            .expect("query from the view center");

        assert!(system_under_test.raycast(&query).is_empty());
    }

    #[test]
    fn test_hits_sorted_nearest_first() {
        let mut system_under_test = SimulatedHost::default();
        let floor = system_under_test.detect_plane(Point::new(0.0, 0.0, -1.0), Extent::new(4.0, 4.0));
        let table = system_under_test.detect_plane(Point::new(0.0, 0.75, -1.0), Extent::new(4.0, 4.0));

        let query = system_under_test.raycast_query(center_of_view(), RaycastTarget::EstimatedPlane, PlaneAlignment::Horizontal)
            .expect("query from the view center");
        let hits = system_under_test.raycast(&query);

        let anchors: Vec<Option<AnchorUid>> = hits.iter().map(|hit| hit.anchor()).collect();
        assert_eq!(anchors, vec![Some(table), Some(floor)]);
    }

    #[test]
    fn test_plane_above_camera_is_not_hit() {
        let mut system_under_test = SimulatedHost::default();
        let _ = system_under_test.detect_plane(Point::new(0.0, 3.0, 0.0), Extent::new(4.0, 4.0));

        let query = system_under_test.raycast_query(center_of_view(), RaycastTarget::EstimatedPlane, PlaneAlignment::Horizontal)
            .expect("query from the view center");

        assert!(system_under_test.raycast(&query).is_empty());
    }

    #[test]
    fn test_no_query_outside_view() {
        let system_under_test = SimulatedHost::default();
        assert!(system_under_test.raycast_query(ScreenPoint::new(900.0, 10.0), RaycastTarget::EstimatedPlane, PlaneAlignment::Horizontal).is_none());
    }

    #[test]
    fn test_events_follow_session_lifecycle() {
        let mut system_under_test = SimulatedHost::default();
        let early = system_under_test.detect_plane(Point::new(0.0, 0.0, -1.0), Extent::new(1.0, 1.0));
        assert!(system_under_test.drain_events().is_empty(), "nothing is reported before run");

        system_under_test.run(&plane_detecting_configuration(), RunOptions::empty());
        let late = system_under_test.detect_plane(Point::new(0.0, 0.0, -2.0), Extent::new(1.0, 1.0));
        system_under_test.advance_frame(0.016);
        system_under_test.interrupt();
        system_under_test.advance_frame(0.016);
        system_under_test.end_interruption();

        let events = system_under_test.drain_events();
        assert_eq!(events.len(), 5);
        assert!(matches!(&events[0], HostEvent::AnchorUpdated(anchor) if anchor.uid() == early));
        assert!(matches!(&events[1], HostEvent::AnchorAdded(anchor) if anchor.uid() == late));
        assert!(matches!(events[2], HostEvent::FrameUpdated(_)));
        assert_eq!(events[3], HostEvent::InterruptionBegan);
        assert_eq!(events[4], HostEvent::InterruptionEnded);
    }

    #[test]
    fn test_run_with_anchor_removal() {
        let mut system_under_test = SimulatedHost::default();
        let plane = system_under_test.detect_plane(Point::new(0.0, 0.0, -1.0), Extent::new(1.0, 1.0));

        system_under_test.run(&plane_detecting_configuration(), RunOptions::REMOVE_EXISTING_ANCHORS);

        assert!(system_under_test.planes().is_empty());
        assert_eq!(system_under_test.drain_events(), vec![HostEvent::AnchorRemoved(plane)]);
    }

    #[test]
    fn test_segmentation_support() {
        let supported = SimulatedHost::default();
        let unsupported = SimulatedHost::default().with_segmentation_support(false);

        assert!(supported.supports_frame_semantics(FrameSemantics::PERSON_SEGMENTATION_WITH_DEPTH));
        assert_eq!(unsupported.supports_frame_semantics(FrameSemantics::PERSON_SEGMENTATION_WITH_DEPTH), false);
        assert!(unsupported.supports_frame_semantics(FrameSemantics::empty()));
    }
}
