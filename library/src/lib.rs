//#![deny(warnings)]

#![allow(clippy::bool_assert_comparison)]
#![allow(clippy::bool_comparison)]

pub mod assets;
pub mod experience;
pub mod geometry;
pub mod placement;
pub mod plane;
pub mod scene;
pub mod session;
pub mod settings;
pub mod simulation;
pub mod ui;
pub mod utils;

pub use experience::{ArExperience, ExperienceError, GesturePhase};
pub use settings::AppSettings;
