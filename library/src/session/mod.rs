pub mod anchor;
pub mod coaching;
pub mod configuration;
pub mod controller;
pub mod host;
