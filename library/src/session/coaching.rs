use crate::session::anchor::PlaneAlignment;
use crate::session::host::TrackingState;
use log::info;
use strum_macros::Display;

#[derive(Display, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoachingGoal {
    Tracking,
    HorizontalPlane,
    VerticalPlane,
    AnyPlane,
}

impl CoachingGoal {
    #[must_use]
    fn satisfied_by(self, alignment: PlaneAlignment) -> bool {
        match self {
            CoachingGoal::Tracking | CoachingGoal::AnyPlane => true,
            CoachingGoal::HorizontalPlane => PlaneAlignment::Horizontal == alignment,
            CoachingGoal::VerticalPlane => PlaneAlignment::Vertical == alignment,
        }
    }

    #[must_use]
    fn needs_plane(self) -> bool {
        CoachingGoal::Tracking != self
    }
}

/// Whether on-screen guidance ("move the phone slowly, look at the floor") should be shown.
pub struct CoachingOverlay {
    goal: CoachingGoal,
    activates_automatically: bool,
    tracking_normal: bool,
    goal_reached: bool,
    active: bool,
}

impl CoachingOverlay {
    #[must_use]
    pub fn new(goal: CoachingGoal, activates_automatically: bool) -> Self {
        Self {
            goal,
            activates_automatically,
            tracking_normal: false,
            goal_reached: false,
            active: false,
        }
    }

    #[must_use]
    pub fn goal(&self) -> CoachingGoal {
        self.goal
    }

    #[must_use]
    pub fn active(&self) -> bool {
        self.active
    }

    /// Returns the new activity when it changed.
    pub fn tracking_changed(&mut self, state: TrackingState) -> Option<bool> {
        self.tracking_normal = TrackingState::Normal == state;
        self.refresh()
    }

    pub fn plane_found(&mut self, alignment: PlaneAlignment) -> Option<bool> {
        if self.goal.satisfied_by(alignment) {
            self.goal_reached = true;
        }
        self.refresh()
    }

    /// After an interruption the host relocalizes; guidance is needed until tracking recovers.
    pub fn session_interrupted(&mut self) -> Option<bool> {
        self.tracking_normal = false;
        self.refresh()
    }

    pub fn set_active(&mut self, active: bool) -> Option<bool> {
        if active == self.active {
            return None;
        }
        self.active = active;
        info!("coaching overlay {} (goal: {})", if active { "activated" } else { "deactivated" }, self.goal);
        Some(active)
    }

    fn refresh(&mut self) -> Option<bool> {
        if false == self.activates_automatically {
            return None;
        }
        let goal_missing = self.goal.needs_plane() && false == self.goal_reached;
        self.set_active(false == self.tracking_normal || goal_missing)
    }
}
