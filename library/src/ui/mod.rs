pub mod scale_slider;
pub mod state_mirror;
