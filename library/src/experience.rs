use crate::assets::loader::{AssetError, AssetLoader};
use crate::assets::template::TemplateObject;
use crate::geometry::alias::ScreenPoint;
use crate::placement::service::PlacementService;
use crate::plane::visualization::PlaneVisualizer;
use crate::scene::graph::SceneGraph;
use crate::scene::light::install_default_lighting;
use crate::session::anchor::Anchor;
use crate::session::coaching::{CoachingGoal, CoachingOverlay};
use crate::session::controller::{SessionController, SessionNotice};
use crate::session::host::{Frame, HostEvent, HostEventHandler, SessionError, TrackingHost};
use crate::settings::{AppSettings, SettingsError};
use crate::ui::scale_slider::ScaleSlider;
use crate::ui::state_mirror::UiStateMirror;
use crate::utils::object_uid::{AnchorUid, NodeUid};
use crate::utils::throttled_logger::ThrottledInfoLogger;
use log::{debug, info};
use strum_macros::{Display, EnumIter};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExperienceError {
    #[error("failed to load the model: {0}")]
    Asset(#[from] AssetError),
    #[error("invalid settings: {0}")]
    Settings(#[from] SettingsError),
}

#[derive(Display, EnumIter, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GesturePhase {
    Began,
    Changed,
    Ended,
    Cancelled,
}

/// The whole placement screen: scene content, the tracking session and the on-screen controls.
/// Host events must be fed in through [`ArExperience::handle_host_event`] on the thread that owns
/// this value.
pub struct ArExperience<Host: TrackingHost> {
    scene: SceneGraph,
    session: SessionController<Host>,
    placement: PlacementService,
    planes: PlaneVisualizer,
    ui: UiStateMirror,
    coaching: CoachingOverlay,
    frame_logger: ThrottledInfoLogger,
    show_statistics: bool,
    placed: Vec<NodeUid>,
}

impl<Host: TrackingHost> ArExperience<Host> {
    pub fn new(host: Host, loader: &dyn AssetLoader, settings: &AppSettings) -> Result<Self, ExperienceError> {
        settings.validate()?;
        let template = TemplateObject::load(loader, &settings.model_asset, &settings.template_node)?;

        let mut scene = SceneGraph::new();
        install_default_lighting(&mut scene);

        let slider_settings = &settings.scale_slider;
        let slider = ScaleSlider::new(slider_settings.minimum, slider_settings.maximum, slider_settings.initial);
        let mut ui = UiStateMirror::new(slider, settings.occlusion_initially_enabled);
        ui.initial_label_sync();

        let planes = if settings.visualize_planes { PlaneVisualizer::visible() } else { PlaneVisualizer::new() };

        let placement = PlacementService::new(template)
            .with_object_offset(settings.object_offset())
            .with_scale_multiplier(settings.scale_multiplier);

        info!("experience ready: '{}' of '{}', {}", settings.template_node, settings.model_asset, ui.label());

        Ok(Self {
            scene,
            session: SessionController::new(host),
            placement,
            planes,
            ui,
            coaching: CoachingOverlay::new(CoachingGoal::HorizontalPlane, true),
            frame_logger: ThrottledInfoLogger::new(settings.frame_log_interval),
            show_statistics: settings.show_statistics,
            placed: Vec::new(),
        })
    }

    pub fn view_will_appear(&mut self) {
        self.session.start(self.ui.occlusion_switch());
    }

    pub fn view_will_disappear(&mut self) {
        self.session.stop();
    }

    /// Places a new instance when the gesture ends over a detectable surface; returns its uid.
    /// Missing the floor is not an error the user needs to see.
    pub fn on_tap(&mut self, location: ScreenPoint, phase: GesturePhase) -> Option<NodeUid> {
        if GesturePhase::Ended != phase {
            return None;
        }
        match self.placement.place_at(self.session.host(), &mut self.scene, location, self.ui.current_scale()) {
            Ok(uid) => {
                self.placed.push(uid);
                Some(uid)
            }
            Err(error) => {
                debug!("tap at ({}, {}) ignored: {}", location.x, location.y, error);
                None
            }
        }
    }

    pub fn on_scale_slider_changed(&mut self, raw: f32) -> f32 {
        self.ui.on_scale_changed(raw)
    }

    pub fn on_occlusion_switch_changed(&mut self, enabled: bool) -> bool {
        self.ui.on_occlusion_toggled(enabled, &mut self.session)
    }

    pub fn handle_host_event(&mut self, event: &HostEvent) {
        event.dispatch(self);
    }

    #[must_use]
    pub fn scene(&self) -> &SceneGraph {
        &self.scene
    }

    #[must_use]
    pub fn session(&self) -> &SessionController<Host> {
        &self.session
    }

    #[must_use]
    pub fn host_mutable(&mut self) -> &mut Host {
        self.session.host_mutable()
    }

    #[must_use]
    pub fn ui(&self) -> &UiStateMirror {
        &self.ui
    }

    #[must_use]
    pub fn coaching(&self) -> &CoachingOverlay {
        &self.coaching
    }

    #[must_use]
    pub fn placed_instances(&self) -> &[NodeUid] {
        &self.placed
    }

    #[must_use]
    pub fn show_statistics(&self) -> bool {
        self.show_statistics
    }

    #[must_use]
    pub fn take_notices(&mut self) -> Vec<SessionNotice> {
        self.session.take_notices()
    }

    #[must_use]
    pub fn statistics(&self) -> String {
        format!(
            "instances: {}, planes: {}, nodes: {}, session: {}",
            self.placed.len(),
            self.scene.anchor_count(),
            self.scene.node_count(),
            self.session.state(),
        )
    }
}

impl<Host: TrackingHost> HostEventHandler for ArExperience<Host> {
    fn frame_did_update(&mut self, frame: &Frame) {
        let _ = self.coaching.tracking_changed(frame.tracking_state());
        if self.show_statistics {
            let statistics = self.statistics();
            let timestamp = frame.timestamp();
            let _ = self.frame_logger.do_write(|| format!("frame {:.3}: {}", timestamp, statistics));
        }
    }

    fn anchor_did_update(&mut self, anchor: &Anchor) {
        if let Some(plane) = anchor.as_plane() {
            let _ = self.coaching.plane_found(plane.alignment());
        }
        let _ = self.planes.anchor_updated(&mut self.scene, anchor);
    }

    fn anchor_did_remove(&mut self, anchor: AnchorUid) {
        let _ = self.planes.anchor_removed(&mut self.scene, anchor);
    }

    fn session_did_fail(&mut self, error: &SessionError) {
        self.session.report_failure(error);
    }

    fn session_was_interrupted(&mut self) {
        self.session.interruption_began();
        let _ = self.coaching.session_interrupted();
    }

    fn session_interruption_ended(&mut self) {
        self.session.interruption_ended();
    }
}
