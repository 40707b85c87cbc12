// Core state machines and configuration (platform independent)
pub mod config;
pub mod domain;
pub mod shared;

// Dioxus components and the data-attribute bootstrap
pub mod app;
