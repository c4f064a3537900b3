pub mod alias;
pub mod transform;
pub(crate) mod utils;
