// src/core/mod.rs

pub mod app;
pub mod cli;
pub mod config;
pub mod config_loader;
pub mod logging;
pub mod report;
pub mod sensors;
