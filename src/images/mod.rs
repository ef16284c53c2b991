//! Image storage module.
//!
//! Stored images are flat, content-addressed files under a single root
//! directory. There is no index: a file exists if and only if it is on disk.

mod storage;

pub use storage::{content_hash, ImageStore, StoredImage};
