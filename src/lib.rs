//! imgdrop - bitmap upload, JPEG conversion and content-addressed storage
//!
//! This library crate exposes the core functionality for integration testing.

pub mod config;
pub mod conversion;
pub mod error;
pub mod images;
pub mod server;
