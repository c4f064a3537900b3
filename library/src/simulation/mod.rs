pub mod pinhole_camera;
pub mod simulated_host;
