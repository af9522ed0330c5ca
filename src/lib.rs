pub mod app;
pub mod config;
pub mod error;
pub mod event;
pub mod games;
pub mod scheduler;
pub mod sound;
pub mod ui;
