pub mod loader;
pub mod template;
