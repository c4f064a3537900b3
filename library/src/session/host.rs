use crate::geometry::alias::{Point, ScreenPoint, Vector};
use crate::geometry::transform::Affine;
use crate::session::anchor::{Anchor, PlaneAlignment};
use crate::session::configuration::{FrameSemantics, RunOptions, TrackingConfiguration};
use crate::utils::object_uid::AnchorUid;
use std::fmt;
use strum_macros::Display;
use thiserror::Error;

#[derive(Display, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RaycastTarget {
    /// Surfaces the host believes exist but whose geometry has not converged yet.
    EstimatedPlane,
    ExistingPlaneGeometry,
    ExistingPlaneInfinite,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RaycastQuery {
    origin: Point,
    direction: Vector,
    target: RaycastTarget,
    alignment: PlaneAlignment,
}

impl RaycastQuery {
    #[must_use]
    pub fn new(origin: Point, direction: Vector, target: RaycastTarget, alignment: PlaneAlignment) -> Self {
        Self { origin, direction, target, alignment }
    }

    #[must_use]
    pub fn origin(&self) -> Point {
        self.origin
    }

    #[must_use]
    pub fn direction(&self) -> Vector {
        self.direction
    }

    #[must_use]
    pub fn target(&self) -> RaycastTarget {
        self.target
    }

    #[must_use]
    pub fn alignment(&self) -> PlaneAlignment {
        self.alignment
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RaycastHit {
    world_transform: Affine,
    target: RaycastTarget,
    anchor: Option<AnchorUid>,
}

impl RaycastHit {
    #[must_use]
    pub fn new(world_transform: Affine, target: RaycastTarget, anchor: Option<AnchorUid>) -> Self {
        Self { world_transform, target, anchor }
    }

    #[must_use]
    pub fn world_transform(&self) -> &Affine {
        &self.world_transform
    }

    #[must_use]
    pub fn target(&self) -> RaycastTarget {
        self.target
    }

    #[must_use]
    pub fn anchor(&self) -> Option<AnchorUid> {
        self.anchor
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SessionError {
    #[error("camera access is not authorized")]
    CameraUnauthorized,
    #[error("sensor is unavailable: {what}")]
    SensorUnavailable { what: String },
    #[error("world tracking has failed: {reason}")]
    WorldTrackingFailed { reason: String },
    #[error("configuration is not supported by the device")]
    UnsupportedConfiguration,
}

#[derive(Display, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LimitedReason {
    Initializing,
    ExcessiveMotion,
    InsufficientFeatures,
    Relocalizing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackingState {
    NotAvailable,
    Limited(LimitedReason),
    Normal,
}

impl fmt::Display for TrackingState {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TrackingState::NotAvailable => write!(formatter, "NotAvailable"),
            TrackingState::Limited(reason) => write!(formatter, "Limited({reason})"),
            TrackingState::Normal => write!(formatter, "Normal"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    timestamp: f64,
    tracking_state: TrackingState,
}

impl Frame {
    #[must_use]
    pub fn new(timestamp: f64, tracking_state: TrackingState) -> Self {
        Self { timestamp, tracking_state }
    }

    #[must_use]
    pub fn timestamp(&self) -> f64 {
        self.timestamp
    }

    #[must_use]
    pub fn tracking_state(&self) -> TrackingState {
        self.tracking_state
    }
}

/// Capabilities consumed from the platform AR runtime.
pub trait TrackingHost {
    #[must_use]
    fn supports_frame_semantics(&self, semantics: FrameSemantics) -> bool;

    /// Starts the session or swaps the configuration of a running one; `options` decide whether
    /// the world map and anchors survive.
    fn run(&mut self, configuration: &TrackingConfiguration, options: RunOptions);

    fn pause(&mut self);

    /// `None` when the point can not be projected into the world (e.g. it lies outside the view).
    #[must_use]
    fn raycast_query(&self, from: ScreenPoint, target: RaycastTarget, alignment: PlaneAlignment) -> Option<RaycastQuery>;

    /// Hits ordered nearest first.
    #[must_use]
    fn raycast(&self, query: &RaycastQuery) -> Vec<RaycastHit>;
}

/// Callback surface the core registers with the host. Hosts deliver on the UI thread.
pub trait HostEventHandler {
    fn frame_did_update(&mut self, _frame: &Frame) {}

    fn anchor_did_add(&mut self, anchor: &Anchor) {
        self.anchor_did_update(anchor);
    }

    fn anchor_did_update(&mut self, anchor: &Anchor);

    fn anchor_did_remove(&mut self, _anchor: AnchorUid) {}

    fn session_did_fail(&mut self, error: &SessionError);

    fn session_was_interrupted(&mut self);

    fn session_interruption_ended(&mut self);
}

/// Host callback captured as a value, so a host can queue it and hand it over on the UI thread.
#[derive(Debug, Clone, PartialEq)]
pub enum HostEvent {
    FrameUpdated(Frame),
    AnchorAdded(Anchor),
    AnchorUpdated(Anchor),
    AnchorRemoved(AnchorUid),
    SessionFailed(SessionError),
    InterruptionBegan,
    InterruptionEnded,
}

impl HostEvent {
    pub fn dispatch<Handler: HostEventHandler + ?Sized>(&self, handler: &mut Handler) {
        match self {
            HostEvent::FrameUpdated(frame) => handler.frame_did_update(frame),
            HostEvent::AnchorAdded(anchor) => handler.anchor_did_add(anchor),
            HostEvent::AnchorUpdated(anchor) => handler.anchor_did_update(anchor),
            HostEvent::AnchorRemoved(uid) => handler.anchor_did_remove(*uid),
            HostEvent::SessionFailed(error) => handler.session_did_fail(error),
            HostEvent::InterruptionBegan => handler.session_was_interrupted(),
            HostEvent::InterruptionEnded => handler.session_interruption_ended(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::alias::Extent;
    use crate::session::anchor::PlaneAnchor;

    #[derive(Default)]
    struct RecordingHandler {
        calls: Vec<String>,
    }

    impl HostEventHandler for RecordingHandler {
        fn anchor_did_update(&mut self, anchor: &Anchor) {
            self.calls.push(format!("update {}", anchor.uid()));
        }

        fn anchor_did_remove(&mut self, anchor: AnchorUid) {
            self.calls.push(format!("remove {}", anchor));
        }

        fn session_did_fail(&mut self, error: &SessionError) {
            self.calls.push(format!("fail {}", error));
        }

        fn session_was_interrupted(&mut self) {
            self.calls.push("interrupted".to_string());
        }

        fn session_interruption_ended(&mut self) {
            self.calls.push("resumed".to_string());
        }
    }

    #[test]
    fn test_dispatch_routes_to_handler() {
        let anchor = Anchor::Plane(PlaneAnchor::horizontal_rectangle(AnchorUid(3), Point::new(0.0, 0.0, 0.0), Extent::new(1.0, 1.0)));
        let events = vec![
            HostEvent::FrameUpdated(Frame::new(0.0, TrackingState::Normal)),
            HostEvent::AnchorAdded(anchor.clone()),
            HostEvent::AnchorUpdated(anchor),
            HostEvent::AnchorRemoved(AnchorUid(3)),
            HostEvent::SessionFailed(SessionError::CameraUnauthorized),
            HostEvent::InterruptionBegan,
            HostEvent::InterruptionEnded,
        ];
        let mut system_under_test = RecordingHandler::default();

        for event in events.iter() {
            event.dispatch(&mut system_under_test);
        }

        assert_eq!(system_under_test.calls, vec![
            "update anchor#3",
            "update anchor#3",
            "remove anchor#3",
            "fail camera access is not authorized",
            "interrupted",
            "resumed",
        ]);
    }

    #[test]
    fn test_tracking_state_display() {
        assert_eq!(TrackingState::Limited(LimitedReason::Relocalizing).to_string(), "Limited(Relocalizing)");
        assert_eq!(TrackingState::Normal.to_string(), "Normal");
    }
}
