// Re-export all public modules so they can be used from main.rs
pub mod logging;

// MVC Architecture
pub mod controller;
pub mod model;
pub mod view;
