//! Portfolio toys - small interactive widgets from a portfolio's projects gallery
//!
//! This library provides:
//! - Snake game logic and its tick timer (game module)
//! - Todo list with injected key-value persistence (todo module)
//! - Bitmap and terminal rendering (render module)
//! - Keyboard mapping (input module)
//! - Mounted widget instances with their terminal loops (modes module)

pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod notify;
pub mod render;
pub mod todo;
