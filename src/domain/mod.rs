// Domain layer: models and the platform-independent controllers.
// Pure Rust, no framework dependencies
pub mod models;
pub mod services;
