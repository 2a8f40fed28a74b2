//! Display abstraction and screen rendering for Thermion panels
//!
//! This crate provides:
//! - `Screen`: a character buffer for the panel's 8x21 text grid
//! - `DisplayBackend` trait for the hardware driver (OLED over I2C)
//! - `Renderer`: builds the boot, dashboard and link-lost screens
//!
//! # Architecture
//!
//! The firmware keeps one `Renderer` in its display task. Cached thermostat
//! values flow in, the renderer rewrites the screen buffer, and [`present`]
//! pushes the result to whatever `DisplayBackend` the board provides. The
//! renderer never touches hardware, so every screen layout is testable on
//! the host.

#![no_std]

pub mod backend;
pub mod renderer;
pub mod screen;

// Re-export key types
pub use backend::{present, DisplayBackend};
pub use renderer::Renderer;
pub use screen::{Screen, LINE_LEN, SCREEN_COLS, SCREEN_ROWS};
