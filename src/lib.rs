//! Touch-to-mouse and on-screen keyboard input classification.
//!
//! Exposes the gesture classifier, the keyboard modifier router and the
//! configuration they are built from, plus a tokio-backed serial input queue
//! and a scripted replay harness for exercising both.

pub mod config;
pub mod input;
pub mod replay;
pub mod service;
pub mod util;

pub use config::Config;
pub use input::InputBridge;
