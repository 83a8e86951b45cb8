// src/lib.rs

//! Party finder watcher library

pub mod error;
pub mod models;
pub mod pipeline;
pub mod services;
pub mod sink;
pub mod utils;
