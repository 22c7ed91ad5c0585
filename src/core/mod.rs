//! Core - cell storage and kernel plumbing
//!
//! - utils/     - Safety macros (must be first for macro export!)
//! - grid.rs    - SoA cell grid with toroidal indexing
//! - buffers.rs - Ping/pong buffer pair
//! - image.rs   - Capture-image luminance source

#[macro_use]
pub mod utils;
pub mod buffers;
pub mod grid;
pub mod image;
