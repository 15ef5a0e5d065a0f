//! Platform abstraction layer
//!
//! Hosts provide the per-frame callback primitive:
//! - `manual`: synchronous stepping for tests and the native runner
//! - `web`: `requestAnimationFrame`, HTML audio and a 2D canvas (wasm32 only)

pub mod manual;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use manual::ManualScheduler;
