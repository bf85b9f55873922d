//! Raster whiteboard engine.
//!
//! A growing pixel board with brush, eraser and text tools, bounded undo/redo
//! history of full-board snapshots, and optional stroke sharing between
//! participants. Hosts (a browser shell, a native window, the `pizarra` CLI)
//! own an [`input::InputState`] and forward pointer and toolbar events to it.

pub mod broadcast;
pub mod config;
pub mod draw;
pub mod export;
pub mod growth;
pub mod history;
pub mod input;
pub mod replay;
pub mod util;

pub use config::Config;
pub use input::InputState;
