use bitflags::bitflags;
use strum_macros::Display;

bitflags! {
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct PlaneDetection: u8 {
        const HORIZONTAL = 0b01;
        const VERTICAL = 0b10;
    }
}

bitflags! {
    /// Per-frame processing the host may run on top of world tracking.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct FrameSemantics: u8 {
        const PERSON_SEGMENTATION = 0b001;
        const PERSON_SEGMENTATION_WITH_DEPTH = 0b010;
        const BODY_DETECTION = 0b100;
    }
}

bitflags! {
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct RunOptions: u8 {
        const RESET_TRACKING = 0b01;
        const REMOVE_EXISTING_ANCHORS = 0b10;
    }
}

#[derive(Display, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EnvironmentTexturing {
    #[default]
    None,
    Manual,
    Automatic,
}

/// Immutable world-tracking configuration. Changes produce a new value which is then resubmitted
/// to the host; nobody edits the configuration a session is running with.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TrackingConfiguration {
    plane_detection: PlaneDetection,
    light_estimation: bool,
    environment_texturing: EnvironmentTexturing,
    frame_semantics: FrameSemantics,
}

impl TrackingConfiguration {
    #[must_use]
    pub fn world_tracking() -> Self {
        Self {
            plane_detection: PlaneDetection::empty(),
            light_estimation: false,
            environment_texturing: EnvironmentTexturing::None,
            frame_semantics: FrameSemantics::empty(),
        }
    }

    #[must_use]
    pub fn with_plane_detection(mut self, detection: PlaneDetection) -> Self {
        self.plane_detection = detection;
        self
    }

    #[must_use]
    pub fn with_light_estimation(mut self, enabled: bool) -> Self {
        self.light_estimation = enabled;
        self
    }

    #[must_use]
    pub fn with_environment_texturing(mut self, texturing: EnvironmentTexturing) -> Self {
        self.environment_texturing = texturing;
        self
    }

    /// Same configuration with `semantic` inserted into or removed from the frame semantics.
    #[must_use]
    pub fn with_frame_semantic(mut self, semantic: FrameSemantics, enabled: bool) -> Self {
        self.frame_semantics.set(semantic, enabled);
        self
    }

    #[must_use]
    pub fn plane_detection(&self) -> PlaneDetection {
        self.plane_detection
    }

    #[must_use]
    pub fn light_estimation(&self) -> bool {
        self.light_estimation
    }

    #[must_use]
    pub fn environment_texturing(&self) -> EnvironmentTexturing {
        self.environment_texturing
    }

    #[must_use]
    pub fn frame_semantics(&self) -> FrameSemantics {
        self.frame_semantics
    }
}
