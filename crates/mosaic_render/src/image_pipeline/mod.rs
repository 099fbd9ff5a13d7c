pub mod loader;
pub mod metadata;
pub mod sink;
