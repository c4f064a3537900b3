use crate::session::configuration::{EnvironmentTexturing, FrameSemantics, PlaneDetection, RunOptions, TrackingConfiguration};
use crate::session::host::{SessionError, TrackingHost};
use derive_more::Display;
use log::{debug, info, warn};

const OCCLUSION_SEMANTICS: FrameSemantics = FrameSemantics::PERSON_SEGMENTATION_WITH_DEPTH;

#[derive(Display, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    NotRunning,
    Running,
    Interrupted,
}

/// Something the user-facing layer should present; nothing here is fatal.
#[derive(Display, Debug, Clone, PartialEq)]
pub enum SessionNotice {
    #[display("session failed: {_0}")]
    Failed(SessionError),
    #[display("session interrupted")]
    InterruptionBegan,
    #[display("session resumed")]
    InterruptionEnded,
}

pub struct SessionController<Host: TrackingHost> {
    host: Host,
    state: SessionState,
    active_configuration: Option<TrackingConfiguration>,
    occlusion_requested: bool,
    notices: Vec<SessionNotice>,
}

impl<Host: TrackingHost> SessionController<Host> {
    #[must_use]
    pub fn new(host: Host) -> Self {
        Self {
            host,
            state: SessionState::NotRunning,
            active_configuration: None,
            occlusion_requested: false,
            notices: Vec::new(),
        }
    }

    #[must_use]
    pub fn host(&self) -> &Host {
        &self.host
    }

    #[must_use]
    pub fn host_mutable(&mut self) -> &mut Host {
        &mut self.host
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Configuration last submitted to the host; kept after `stop`.
    #[must_use]
    pub fn active_configuration(&self) -> Option<&TrackingConfiguration> {
        self.active_configuration.as_ref()
    }

    #[must_use]
    pub fn occlusion_supported(&self) -> bool {
        self.host.supports_frame_semantics(OCCLUSION_SEMANTICS)
    }

    #[must_use]
    pub fn occlusion_requested(&self) -> bool {
        self.occlusion_requested
    }

    #[must_use]
    fn make_configuration(&self) -> TrackingConfiguration {
        let occlusion = self.occlusion_requested && self.occlusion_supported();
        TrackingConfiguration::world_tracking()
            .with_plane_detection(PlaneDetection::HORIZONTAL)
            .with_light_estimation(true)
            .with_environment_texturing(EnvironmentTexturing::Automatic)
            .with_frame_semantic(OCCLUSION_SEMANTICS, occlusion)
    }

    pub fn start(&mut self, occlusion_requested: bool) {
        self.occlusion_requested = occlusion_requested;
        let configuration = self.make_configuration();
        self.host.run(&configuration, RunOptions::empty());
        info!("session started, frame semantics: {:?}", configuration.frame_semantics());
        self.active_configuration = Some(configuration);
        self.state = SessionState::Running;
    }

    pub fn stop(&mut self) {
        if SessionState::NotRunning == self.state {
            return;
        }
        self.host.pause();
        self.state = SessionState::NotRunning;
        info!("session paused");
    }

    /// Returns `true` when the host was re-run with a new configuration. Tracking state and
    /// anchors are kept: only the frame semantics change.
    pub fn set_occlusion(&mut self, enabled: bool) -> bool {
        if false == self.occlusion_supported() {
            debug!("person segmentation is not supported, occlusion toggle ignored");
            return false;
        }
        self.occlusion_requested = enabled;

        if SessionState::NotRunning == self.state {
            return false;
        }
        let Some(current) = self.active_configuration.as_ref() else {
            return false;
        };

        let reconfigured = current.clone().with_frame_semantic(OCCLUSION_SEMANTICS, enabled);
        self.host.run(&reconfigured, RunOptions::empty());
        info!("occlusion {}", if enabled { "enabled" } else { "disabled" });
        self.active_configuration = Some(reconfigured);
        true
    }

    pub fn report_failure(&mut self, error: &SessionError) {
        warn!("session failure: {error}");
        self.notices.push(SessionNotice::Failed(error.clone()));
    }

    pub fn interruption_began(&mut self) {
        if SessionState::Running == self.state {
            self.state = SessionState::Interrupted;
        }
        info!("session interrupted");
        self.notices.push(SessionNotice::InterruptionBegan);
    }

    /// Tracking is not reset: placed instances keep their positions.
    pub fn interruption_ended(&mut self) {
        if SessionState::Interrupted == self.state {
            self.state = SessionState::Running;
        }
        info!("session interruption ended");
        self.notices.push(SessionNotice::InterruptionEnded);
    }

    #[must_use]
    pub fn take_notices(&mut self) -> Vec<SessionNotice> {
        std::mem::take(&mut self.notices)
    }
}
