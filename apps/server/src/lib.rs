//! File bridge server library.
//!
//! This library provides the core functionality for the file bridge, which
//! streams files from a storage backend to HTTP clients as downloads.

pub mod api;
pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod services;
