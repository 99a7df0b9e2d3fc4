pub mod app;
pub mod config;
pub mod registration;
pub mod shared;
pub mod tui;
pub mod wizard;
