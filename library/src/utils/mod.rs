pub mod object_uid;
pub(crate) mod throttled_logger;
pub(crate) mod uid_generator;
