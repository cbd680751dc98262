//! Platform abstraction layer
//!
//! Host glue only. The browser binding wraps a session, its input queue
//! and a fixed-step clock behind a small `wasm-bindgen` surface; native
//! hosts use [`crate::driver`] directly.

#[cfg(target_arch = "wasm32")]
pub mod web;
