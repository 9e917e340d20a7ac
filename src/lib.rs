pub mod api;
pub mod assets;
pub mod config;
pub mod engine;
pub mod error;
pub mod models;
pub mod observability;
pub mod render;
pub mod session;
pub mod state;
